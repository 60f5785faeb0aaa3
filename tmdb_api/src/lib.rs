//! Typed async client for the TMDB v3 REST API.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_LANGUAGE};
pub use self::errors::Error;
pub use self::query::{DiscoverQuery, PageQuery, Query, QueryCommon, SearchQuery, SortBy};
