//! The single provider operation the paging and grouping engines depend on.

use std::future::Future;

use tmdb_api::types::{CatalogItem, MediaKind};
use tmdb_api::{Client, DiscoverQuery, Query};

use crate::categories::CategoryId;

/// Number of items TMDB serves per page. Fixed by the provider.
pub const PROVIDER_PAGE_SIZE: u32 = 20;

/// One provider page, in the order the provider sorted it.
#[derive(Debug, Clone, Default)]
pub struct ProviderPage {
    pub page_number: u32,
    pub items: Vec<CatalogItem>,
}

impl ProviderPage {
    pub fn new(page_number: u32, items: Vec<CatalogItem>) -> Self {
        Self { page_number, items }
    }
}

/// Source of popularity-sorted, optionally category-filtered pages.
///
/// Pages are 1-based. A page past the end of the data must come back empty,
/// not as an error.
pub trait CatalogProvider {
    fn fetch_category_page(
        &self,
        kind: MediaKind,
        category: Option<CategoryId>,
        page: u32,
    ) -> impl Future<Output = Result<ProviderPage, tmdb_api::Error>> + Send;
}

impl CatalogProvider for Client {
    fn fetch_category_page(
        &self,
        kind: MediaKind,
        category: Option<CategoryId>,
        page: u32,
    ) -> impl Future<Output = Result<ProviderPage, tmdb_api::Error>> + Send {
        let mut query = DiscoverQuery::new(kind).with_page(page);
        if let Some(id) = category {
            query = query.with_genre(id);
        }
        discover_page(self, query)
    }
}

/// Runs one discover query and wraps its results as a [`ProviderPage`].
pub(crate) async fn discover_page(
    client: &Client,
    query: DiscoverQuery,
) -> Result<ProviderPage, tmdb_api::Error> {
    let page = query.common.page.unwrap_or(1);
    let resp = client.discover(&query).await?;
    tracing::debug!(
        "fetched {} page {} (genres {:?}, {}): {} items",
        query.kind,
        page,
        query.genre_ids,
        query.sort_by,
        resp.results.len()
    );
    Ok(ProviderPage::new(page, resp.results))
}
