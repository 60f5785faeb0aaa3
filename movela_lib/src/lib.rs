//! Library layer for Movela: TMDB-backed catalog browsing.
//!
//! Serves 24-item application pages out of TMDB's 20-item pages
//! ([`remap`]), builds duplicate-free genre rows ([`aggregate`]), and relays
//! the detail, person and search lookups the front end needs ([`Catalog`]).

pub mod aggregate;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod error;
pub mod provider;
pub mod remap;
pub mod validation;

pub use tmdb_api;
pub use tmdb_api::types;

pub use aggregate::{aggregate, AggregateSettings, CategoryBucket, SeenIdRegistry};
pub use catalog::{Catalog, MergedCredits, PersonDetails, TitleDetails};
pub use categories::{Category, CategoryId};
pub use config::Config;
pub use error::CatalogError;
pub use provider::{CatalogProvider, ProviderPage, PROVIDER_PAGE_SIZE};
pub use remap::{remap, PageWindow, PaginationMetadata, RemapPlan, RemapSettings, RemappedPage};
