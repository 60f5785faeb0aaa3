mod commands;
mod output;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use movela_lib::types::MediaKind;
use movela_lib::{Catalog, Config};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "movela")]
#[command(about = "Browse the TMDB movie and series catalog, or serve it over HTTP")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Movie listings, genre rows and details
    Movies(commands::listing::ListingArgs),
    /// Series listings, genre rows and details
    Series(commands::listing::ListingArgs),
    /// Search movies, series and people
    Search(commands::search::SearchArgs),
    /// Show a person with their movie and series credits
    Person(commands::person::PersonArgs),
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("movela=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format: OutputFormat = cli.output.parse()?;

    let config = Config::from_env()?;
    let catalog = Catalog::from_config(&config)?;

    match &cli.command {
        Commands::Movies(args) => {
            commands::listing::run(MediaKind::Movie, args, &catalog, format).await?
        }
        Commands::Series(args) => commands::listing::run(MediaKind::Tv, args, &catalog, format).await?,
        Commands::Search(args) => commands::search::run(args, &catalog, format).await?,
        Commands::Person(args) => commands::person::run(args, &catalog, format).await?,
        Commands::Serve(args) => commands::serve::run(args, config, catalog).await?,
    }

    Ok(())
}
