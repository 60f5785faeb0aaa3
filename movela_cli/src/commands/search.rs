//! The `search` subcommand.

use anyhow::{anyhow, Result};
use clap::Args;
use movela_lib::types::SearchScope;
use movela_lib::Catalog;

use crate::output::{print_items, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    /// Text to search for (at least 2 characters)
    pub text: String,

    /// What to search: multi, movie, tv, person
    #[arg(long, default_value = "multi")]
    pub scope: String,
}

pub async fn run(args: &SearchArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let scope: SearchScope = args.scope.parse().map_err(|_| {
        anyhow!(
            "unknown search scope '{}'. Valid: multi, movie, tv, person",
            args.scope
        )
    })?;
    let items = catalog.search(scope, &args.text).await?;

    if items.is_empty() {
        eprintln!("No results for '{}'", args.text.trim());
    }

    print_items(&items, format)
}
