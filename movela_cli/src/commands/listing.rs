//! The `movies` and `series` subcommands: listings, genre rows and title details.

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use movela_lib::remap::DEFAULT_LIMIT;
use movela_lib::tmdb_api::SortBy;
use movela_lib::types::MediaKind;
use movela_lib::{validation, Catalog};

use crate::output::{print_buckets, print_items, print_json, OutputFormat};

#[derive(Args)]
pub struct ListingArgs {
    #[command(subcommand)]
    pub command: ListingCommand,
}

#[derive(Subcommand)]
pub enum ListingCommand {
    /// Browse the full catalog, most popular first
    All {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page (capped by MOVELA_MAX_LIMIT)
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Order: popularity, popularity.asc, rating, release
        #[arg(long, default_value = "popularity")]
        sort: String,
    },
    /// Genre rows, each title shown in one genre only
    ByGenres,
    /// The popular row of the home page
    Popular,
    /// Titles currently in theatres (movies only)
    NowPlaying,
    /// Details, credits, recommendations and reviews of one title
    Details {
        /// TMDB id
        id: String,
    },
}

pub async fn run(
    kind: MediaKind,
    args: &ListingArgs,
    catalog: &Catalog,
    format: OutputFormat,
) -> Result<()> {
    match &args.command {
        ListingCommand::All { page, limit, sort } => {
            let window = catalog.bounded_window(*page, *limit);
            let result = catalog
                .list_all_sorted(kind, window, parse_sort(sort)?)
                .await?;

            eprintln!(
                "Page {}/{} ({} items)",
                result.pagination.current_page,
                result.pagination.total_pages,
                result.items.len()
            );

            print_items(&result.items, format)?;
        }
        ListingCommand::ByGenres => {
            let buckets = catalog.by_categories(kind).await?;
            print_buckets(&buckets, format)?;
        }
        ListingCommand::Popular => {
            let items = catalog.popular(kind).await?;
            print_items(&items, format)?;
        }
        ListingCommand::NowPlaying => {
            if kind != MediaKind::Movie {
                bail!("now-playing is only available for movies");
            }
            let items = catalog.now_playing().await?;
            print_items(&items, format)?;
        }
        ListingCommand::Details { id } => {
            let id = validation::validate_item_id(id)?;
            let details = catalog.details(kind, id).await?;
            // Nested provider payloads have no tabular form.
            print_json(&details);
        }
    }

    Ok(())
}

fn parse_sort(raw: &str) -> Result<SortBy> {
    raw.trim().to_lowercase().parse().map_err(|_| {
        anyhow!(
            "unknown sort '{}'. Valid: popularity, popularity.asc, rating, release",
            raw
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_names_map_to_provider_orders() {
        assert_eq!(parse_sort("popularity").unwrap(), SortBy::PopularityDesc);
        assert_eq!(parse_sort("Rating").unwrap(), SortBy::VoteAverageDesc);
        assert_eq!(parse_sort("release").unwrap(), SortBy::ReleaseDateDesc);
        assert_eq!(parse_sort("popularity.asc").unwrap(), SortBy::PopularityAsc);
    }

    #[test]
    fn unknown_sort_is_rejected() {
        let err = parse_sort("alphabetical").unwrap_err();
        assert!(err.to_string().contains("alphabetical"));
    }
}
