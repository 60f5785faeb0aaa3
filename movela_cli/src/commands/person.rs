//! The `person` subcommand: biography and merged movie/series credits.

use anyhow::Result;
use clap::Args;
use movela_lib::types::CatalogItem;
use movela_lib::{validation, Catalog};

use crate::output::{print_items, print_json, OutputFormat};

#[derive(Args)]
pub struct PersonArgs {
    /// TMDB person id
    pub id: String,

    /// Print the cast credits as a list instead of the full JSON record
    #[arg(long)]
    pub credits: bool,
}

pub async fn run(args: &PersonArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let id = validation::validate_item_id(&args.id)?;
    let person = catalog.person(id).await?;

    if args.credits {
        let items: Vec<CatalogItem> = person
            .credits
            .cast
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect();
        return print_items(&items, format);
    }

    print_json(&person);
    Ok(())
}
