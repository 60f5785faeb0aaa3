//! Catalog service: the operations behind every listing, browse and lookup route.
//!
//! Listings and genre browsing go through [`remap`] and [`aggregate`]. The
//! remaining lookups call the provider and relay its payload, trimmed to what
//! the pages display.

use std::ops::Range;

use serde::Serialize;
use serde_json::Value;
use tmdb_api::types::{CatalogItem, ItemID, MediaKind, SearchScope};
use tmdb_api::{Client, DiscoverQuery, PageQuery, Query, SearchQuery, SortBy};

use crate::aggregate::{aggregate, AggregateSettings, CategoryBucket};
use crate::categories;
use crate::config::Config;
use crate::error::CatalogError;
use crate::provider::{discover_page, CatalogProvider};
use crate::remap::{remap, PageWindow, RemapSettings, RemappedPage};
use crate::validation::{self, DEFAULT_MAX_LIMIT};

/// Items shown in the home page hero carousel.
pub const NOW_PLAYING_COUNT: usize = 6;
/// Recommendations are relayed whole; reviews are cut to this many.
pub const MAX_REVIEWS: usize = 10;
/// Autocomplete results for the multi search.
pub const MAX_MULTI_RESULTS: usize = 8;
/// Reviews and filmographies are requested in English whatever the catalog language.
pub const SECONDARY_LANGUAGE: &str = "en-US";

/// Positions of the popular chart (page 1) that the home page rows show.
/// The movie row leaves out the titles the hero carousel already features.
pub fn popular_range(kind: MediaKind) -> Range<usize> {
    match kind {
        MediaKind::Movie => 7..20,
        MediaKind::Tv => 1..20,
    }
}

/// Everything the detail page of a movie or series shows.
#[derive(Serialize, Debug, Clone)]
pub struct TitleDetails {
    pub details: Value,
    pub credits: Value,
    pub recommendations: Vec<Value>,
    pub reviews: Vec<Value>,
}

/// Movie and series credits of a person, movie entries first.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct MergedCredits {
    pub cast: Vec<Value>,
    pub crew: Vec<Value>,
}

impl MergedCredits {
    pub fn merge(movie_credits: &Value, tv_credits: &Value) -> Self {
        Self {
            cast: tagged(movie_credits, "cast", MediaKind::Movie)
                .chain(tagged(tv_credits, "cast", MediaKind::Tv))
                .collect(),
            crew: tagged(movie_credits, "crew", MediaKind::Movie)
                .chain(tagged(tv_credits, "crew", MediaKind::Tv))
                .collect(),
        }
    }
}

/// Copies `credits[key]`, tagging each entry with its `media_type`.
fn tagged<'a>(
    credits: &'a Value,
    key: &str,
    kind: MediaKind,
) -> impl Iterator<Item = Value> + 'a {
    credits
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(move |entry| {
            let mut entry = entry.clone();
            if let Some(obj) = entry.as_object_mut() {
                obj.insert(
                    "media_type".to_string(),
                    Value::String(kind.as_str().to_string()),
                );
            }
            entry
        })
}

#[derive(Serialize, Debug, Clone)]
pub struct PersonDetails {
    pub details: Value,
    pub credits: MergedCredits,
}

/// Provider-backed catalog. Holds no per-request state, so one instance can
/// serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Client,
    remap: RemapSettings,
    aggregate: AggregateSettings,
    max_limit: u32,
}

impl Catalog {
    pub fn new(inner: Client) -> Self {
        Self {
            inner,
            remap: RemapSettings::default(),
            aggregate: AggregateSettings::default(),
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        Ok(Self {
            inner: config.client()?,
            remap: config.remap_settings(),
            aggregate: config.aggregate_settings(),
            max_limit: config.max_limit,
        })
    }

    pub fn with_remap_settings(mut self, settings: RemapSettings) -> Self {
        self.remap = settings;
        self
    }

    /// Builds the listing window from raw `page`/`limit` parameters.
    pub fn window(&self, page: Option<&str>, limit: Option<&str>) -> PageWindow {
        validation::page_window(page, limit, self.max_limit)
    }

    /// Same as [`Catalog::window`] for already-typed values.
    pub fn bounded_window(&self, page: u32, limit: u32) -> PageWindow {
        PageWindow::new(page, limit.min(self.max_limit))
    }

    /// One application page of the popularity-sorted catalog.
    pub async fn list_all(
        &self,
        kind: MediaKind,
        window: PageWindow,
    ) -> Result<RemappedPage, CatalogError> {
        self.list_all_sorted(kind, window, SortBy::default()).await
    }

    /// Like [`Catalog::list_all`], ordered by `sort_by` instead.
    pub async fn list_all_sorted(
        &self,
        kind: MediaKind,
        window: PageWindow,
        sort_by: SortBy,
    ) -> Result<RemappedPage, CatalogError> {
        let client = &self.inner;
        remap(window, self.remap, move |page| {
            let query = DiscoverQuery::new(kind)
                .with_page(page)
                .with_sort_by(sort_by);
            discover_page(client, query)
        })
        .await
    }

    /// Genre rows for the browse page, without a title appearing in two rows.
    pub async fn by_categories(&self, kind: MediaKind) -> Result<Vec<CategoryBucket>, CatalogError> {
        aggregate(categories::for_kind(kind), self.aggregate, |category, page| {
            self.inner.fetch_category_page(kind, Some(category), page)
        })
        .await
    }

    /// Movies in theatres for the hero carousel.
    pub async fn now_playing(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let resp = self
            .inner
            .now_playing(&PageQuery::default().with_page(1))
            .await?;
        Ok(resp.results.into_iter().take(NOW_PLAYING_COUNT).collect())
    }

    /// The popular row of the home page.
    pub async fn popular(&self, kind: MediaKind) -> Result<Vec<CatalogItem>, CatalogError> {
        let resp = self
            .inner
            .popular(kind, &PageQuery::default().with_page(1))
            .await?;
        let range = popular_range(kind);
        Ok(resp
            .results
            .into_iter()
            .skip(range.start)
            .take(range.len())
            .collect())
    }

    /// Details, credits, recommendations and reviews, fetched concurrently.
    pub async fn details(&self, kind: MediaKind, id: ItemID) -> Result<TitleDetails, CatalogError> {
        let base = PageQuery::default();
        let first_page = PageQuery::default().with_page(1);
        let reviews_query = PageQuery::default()
            .with_language(SECONDARY_LANGUAGE)
            .with_page(1);

        let (details, credits, recommendations, reviews) = tokio::try_join!(
            self.inner.details(kind, id, &base),
            self.inner.credits(kind, id, &base),
            self.inner.recommendations(kind, id, &first_page),
            self.inner.reviews(kind, id, &reviews_query),
        )?;

        Ok(TitleDetails {
            details,
            credits,
            recommendations: recommendations.results,
            reviews: reviews.results.into_iter().take(MAX_REVIEWS).collect(),
        })
    }

    /// Biography plus merged movie and series credits.
    pub async fn person(&self, id: ItemID) -> Result<PersonDetails, CatalogError> {
        let base = PageQuery::default();
        let credits_query = PageQuery::default().with_language(SECONDARY_LANGUAGE);

        let (details, movie_credits, tv_credits) = tokio::try_join!(
            self.inner.person(id, &base),
            self.inner.person_credits(id, MediaKind::Movie, &credits_query),
            self.inner.person_credits(id, MediaKind::Tv, &credits_query),
        )?;

        Ok(PersonDetails {
            details,
            credits: MergedCredits::merge(&movie_credits, &tv_credits),
        })
    }

    /// Searches page 1 of `scope`. Text shorter than two characters yields no
    /// results and no provider call. Multi search keeps movies and series only.
    pub async fn search(
        &self,
        scope: SearchScope,
        text: &str,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let Some(text) = validation::validate_search(text)? else {
            tracing::debug!("search text too short, skipping provider call");
            return Ok(Vec::new());
        };

        let resp = self.inner.search(&SearchQuery::new(scope, &text)).await?;
        Ok(match scope {
            SearchScope::Multi => resp
                .results
                .into_iter()
                .filter(|item| matches!(item.media_type(), Some("movie") | Some("tv")))
                .take(MAX_MULTI_RESULTS)
                .collect(),
            _ => resp.results,
        })
    }
}
