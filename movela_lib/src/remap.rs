//! Serves arbitrary application-sized pages out of the provider's fixed
//! 20-item pages.
//!
//! A window `(page, limit)` covers the global positions
//! `[(page - 1) * limit, page * limit)` of the provider's popularity-sorted
//! stream. [`RemapPlan`] works out which provider pages hold those positions,
//! [`remap`] fetches them concurrently and cuts the exact window out of their
//! concatenation.

use std::future::Future;
use std::ops::RangeInclusive;

use futures::future::try_join_all;
use serde::Serialize;
use tmdb_api::types::CatalogItem;

use crate::error::CatalogError;
use crate::provider::{ProviderPage, PROVIDER_PAGE_SIZE};

/// Application page size used when the caller does not send one.
pub const DEFAULT_LIMIT: u32 = 24;

/// Stand-in for the catalog size. TMDB stops serving discover results after
/// page 500, so 500 * 20 items.
pub const DEFAULT_TOTAL_ITEMS_CEILING: u64 = 10_000;

/// The application-level page request. Both fields are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl PageWindow {
    /// Builds a window, raising zero values to 1.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Position of the window's first item in the provider stream.
    pub fn start_index(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemapSettings {
    pub provider_page_size: u32,
    pub total_items_ceiling: u64,
}

impl Default for RemapSettings {
    fn default() -> Self {
        Self {
            provider_page_size: PROVIDER_PAGE_SIZE,
            total_items_ceiling: DEFAULT_TOTAL_ITEMS_CEILING,
        }
    }
}

/// Which provider pages a window needs and where the window starts inside
/// the first of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapPlan {
    pub start_index: u64,
    pub first_provider_page: u32,
    pub last_provider_page: u32,
    /// Index of the window's first item within `first_provider_page`.
    pub offset: usize,
}

impl RemapPlan {
    pub fn new(window: PageWindow, provider_page_size: u32) -> Self {
        let page_size = u64::from(provider_page_size.max(1));
        let start_index = window.start_index();
        let end_index = start_index + u64::from(window.limit.max(1)) - 1;
        Self {
            start_index,
            first_provider_page: to_page_number(start_index / page_size + 1),
            last_provider_page: to_page_number(end_index / page_size + 1),
            offset: (start_index % page_size) as usize,
        }
    }

    /// Provider pages to fetch, in ascending order.
    pub fn provider_pages(&self) -> RangeInclusive<u32> {
        self.first_provider_page..=self.last_provider_page
    }

    pub fn page_count(&self) -> usize {
        (self.last_provider_page - self.first_provider_page) as usize + 1
    }
}

fn to_page_number(page: u64) -> u32 {
    u32::try_from(page).unwrap_or(u32::MAX)
}

/// Pagination block attached to every listing response.
///
/// `total_items_ceiling` is a configured constant, not a count reported by
/// the provider, so `total_pages` and `has_next_page` derive from it alone.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items_ceiling: u64,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMetadata {
    pub fn new(window: PageWindow, total_items_ceiling: u64) -> Self {
        let total_pages = total_items_ceiling.div_ceil(u64::from(window.limit.max(1)));
        Self {
            current_page: window.page,
            total_pages,
            total_items_ceiling,
            items_per_page: window.limit,
            has_next_page: u64::from(window.page) < total_pages,
            has_prev_page: window.page > 1,
        }
    }
}

/// One application page cut from the provider stream.
#[derive(Serialize, Debug, Clone)]
pub struct RemappedPage {
    pub items: Vec<CatalogItem>,
    pub pagination: PaginationMetadata,
}

/// Fetches the provider pages covering `window` and returns exactly the
/// window's items.
///
/// The result is shorter than `window.limit` when the provider runs out of
/// data. If any page fetch fails the whole call fails.
pub async fn remap<F, Fut>(
    window: PageWindow,
    settings: RemapSettings,
    fetch_page: F,
) -> Result<RemappedPage, CatalogError>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<ProviderPage, tmdb_api::Error>>,
{
    let plan = RemapPlan::new(window, settings.provider_page_size);
    tracing::debug!(
        "page {} x {} -> provider pages {}..={} at offset {}",
        window.page,
        window.limit,
        plan.first_provider_page,
        plan.last_provider_page,
        plan.offset
    );

    // try_join_all keeps input order, so pages concatenate in page order
    // however the requests interleave.
    let pages = try_join_all(plan.provider_pages().map(&fetch_page)).await?;
    let items = pages
        .into_iter()
        .flat_map(|page| page.items)
        .skip(plan.offset)
        .take(window.limit as usize)
        .collect();

    Ok(RemappedPage {
        items,
        pagination: PaginationMetadata::new(window, settings.total_items_ceiling),
    })
}
