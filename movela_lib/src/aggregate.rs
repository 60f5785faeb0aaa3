//! Groups provider results into per-genre buckets where no title appears twice.

use std::collections::HashSet;
use std::future::Future;

use futures::future::try_join_all;
use serde::Serialize;
use tmdb_api::types::{CatalogItem, ItemID};

use crate::categories::{Category, CategoryId};
use crate::error::CatalogError;
use crate::provider::ProviderPage;

pub const DEFAULT_FANOUT_PAGES: u32 = 3;
pub const DEFAULT_PER_BUCKET_CAP: usize = 12;

#[derive(Debug, Clone, Copy)]
pub struct AggregateSettings {
    /// Provider pages fetched per category (pages 1 through this number).
    pub fanout_pages: u32,
    /// Maximum items kept in one bucket.
    pub per_bucket_cap: usize,
}

impl Default for AggregateSettings {
    fn default() -> Self {
        Self {
            fanout_pages: DEFAULT_FANOUT_PAGES,
            per_bucket_cap: DEFAULT_PER_BUCKET_CAP,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CategoryBucket {
    pub category: Category,
    pub items: Vec<CatalogItem>,
}

/// Ids already placed in a bucket during one aggregation call.
///
/// Lives for exactly one [`aggregate`] call and only grows.
#[derive(Debug, Default)]
pub struct SeenIdRegistry {
    ids: HashSet<ItemID>,
}

impl SeenIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ItemID) -> bool {
        self.ids.contains(&id)
    }

    /// Records every item of a finished bucket.
    pub fn claim(&mut self, items: &[CatalogItem]) {
        self.ids.extend(items.iter().map(|item| item.id));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Keeps the first `cap` items nobody has claimed yet, in order.
///
/// An id repeated across a category's own pages is kept once.
fn select_unclaimed(
    registry: &SeenIdRegistry,
    items: impl IntoIterator<Item = CatalogItem>,
    cap: usize,
) -> Vec<CatalogItem> {
    let mut picked = HashSet::new();
    items
        .into_iter()
        .filter(|item| !registry.contains(item.id) && picked.insert(item.id))
        .take(cap)
        .collect()
}

/// Builds one bucket per category, in list order, skipping empty ones.
///
/// Categories are processed strictly one after another: an item belongs to
/// the first category in `categories` whose results contain it, and the
/// registry must hold every earlier bucket before the next category is
/// filtered. Only the pages of a single category are fetched concurrently.
///
/// Any failed page fetch fails the whole call and drops buckets built so far.
pub async fn aggregate<F, Fut>(
    categories: &[Category],
    settings: AggregateSettings,
    fetch_category_page: F,
) -> Result<Vec<CategoryBucket>, CatalogError>
where
    F: Fn(CategoryId, u32) -> Fut,
    Fut: Future<Output = Result<ProviderPage, tmdb_api::Error>>,
{
    let mut registry = SeenIdRegistry::new();
    let mut buckets = Vec::with_capacity(categories.len());

    for category in categories {
        let fetches =
            (1..=settings.fanout_pages).map(|page| fetch_category_page(category.id, page));
        let pages = try_join_all(fetches).await?;

        let items = select_unclaimed(
            &registry,
            pages.into_iter().flat_map(|page| page.items),
            settings.per_bucket_cap,
        );
        if items.is_empty() {
            tracing::debug!("no unclaimed items left for {}", category.display_name);
            continue;
        }

        registry.claim(&items);
        buckets.push(CategoryBucket {
            category: *category,
            items,
        });
    }

    tracing::debug!(
        "built {} of {} buckets, {} distinct items",
        buckets.len(),
        categories.len(),
        registry.len()
    );
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    const ACTION: Category = Category::new(28, "Action");
    const COMEDY: Category = Category::new(35, "Comedy");
    const WESTERN: Category = Category::new(37, "Western");

    /// In-memory provider: each category maps to its full popularity-sorted id list.
    #[derive(Default)]
    struct Genres {
        lists: HashMap<CategoryId, Vec<i64>>,
        failing: Option<(CategoryId, u32)>,
        calls: Mutex<Vec<(CategoryId, u32)>>,
    }

    impl Genres {
        fn with(mut self, category: CategoryId, ids: impl IntoIterator<Item = i64>) -> Self {
            self.lists.insert(category, ids.into_iter().collect());
            self
        }

        async fn page(&self, category: CategoryId, page: u32) -> Result<ProviderPage, tmdb_api::Error> {
            self.calls.lock().unwrap().push((category, page));
            if self.failing == Some((category, page)) {
                return Err(tmdb_api::Error::RequestFailed);
            }
            let items = self
                .lists
                .get(&category)
                .map(|ids| {
                    ids.iter()
                        .skip((page as usize - 1) * 20)
                        .take(20)
                        .map(|&id| CatalogItem::new(id))
                        .collect()
                })
                .unwrap_or_default();
            Ok(ProviderPage::new(page, items))
        }
    }

    fn bucket_ids(bucket: &CategoryBucket) -> Vec<i64> {
        bucket.items.iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn shared_item_stays_with_the_earlier_category() {
        let x = 999;
        let genres = Genres::default()
            .with(ACTION.id, [1, x, 2, 3])
            .with(COMEDY.id, [x, 10, 11]);

        let buckets = aggregate(&[ACTION, COMEDY], AggregateSettings::default(), |c, p| {
            genres.page(c, p)
        })
        .await
        .unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(bucket_ids(&buckets[0]), vec![1, x, 2, 3]);
        assert_eq!(bucket_ids(&buckets[1]), vec![10, 11]);
    }

    #[tokio::test]
    async fn buckets_are_capped_and_pairwise_disjoint() {
        let genres = Genres::default()
            .with(ACTION.id, 0..60)
            .with(COMEDY.id, (0..60).rev())
            .with(WESTERN.id, (5..30).step_by(2));

        let buckets = aggregate(
            &[ACTION, COMEDY, WESTERN],
            AggregateSettings::default(),
            |c, p| genres.page(c, p),
        )
        .await
        .unwrap();

        let mut seen = HashSet::new();
        for bucket in &buckets {
            assert!(bucket.items.len() <= DEFAULT_PER_BUCKET_CAP);
            for item in &bucket.items {
                assert!(seen.insert(item.id), "{} appears twice", item.id);
            }
        }
        assert_eq!(bucket_ids(&buckets[0]), (0..12).collect::<Vec<_>>());
        assert_eq!(bucket_ids(&buckets[1]), (48..60).rev().collect::<Vec<_>>());
        assert_eq!(bucket_ids(&buckets[2]), vec![13, 15, 17, 19, 21, 23, 25, 27, 29]);
    }

    #[tokio::test]
    async fn exhausted_category_is_left_out() {
        let genres = Genres::default()
            .with(ACTION.id, [1, 2, 3])
            .with(COMEDY.id, [2, 3])
            .with(WESTERN.id, [4]);

        let buckets = aggregate(
            &[ACTION, COMEDY, WESTERN],
            AggregateSettings::default(),
            |c, p| genres.page(c, p),
        )
        .await
        .unwrap();

        let order: Vec<_> = buckets.iter().map(|b| b.category.id).collect();
        assert_eq!(order, vec![ACTION.id, WESTERN.id]);
    }

    #[tokio::test]
    async fn category_with_no_results_is_left_out() {
        let genres = Genres::default().with(COMEDY.id, [7]);
        let buckets = aggregate(&[ACTION, COMEDY], AggregateSettings::default(), |c, p| {
            genres.page(c, p)
        })
        .await
        .unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].category, COMEDY);
    }

    #[tokio::test]
    async fn items_are_drawn_from_all_fanout_pages_in_order() {
        // Action claims everything on Comedy's first two pages.
        let genres = Genres::default()
            .with(ACTION.id, 0..40)
            .with(COMEDY.id, (0..40).chain(100..112));
        let settings = AggregateSettings {
            per_bucket_cap: 40,
            ..AggregateSettings::default()
        };

        let buckets = aggregate(&[ACTION, COMEDY], settings, |c, p| genres.page(c, p))
            .await
            .unwrap();

        assert_eq!(bucket_ids(&buckets[0]), (0..40).collect::<Vec<_>>());
        assert_eq!(bucket_ids(&buckets[1]), (100..112).collect::<Vec<_>>());

        let mut calls = genres.calls.lock().unwrap().clone();
        calls.sort_unstable();
        assert_eq!(
            calls,
            vec![(28, 1), (28, 2), (28, 3), (35, 1), (35, 2), (35, 3)]
        );
    }

    #[tokio::test]
    async fn repeated_id_within_a_category_is_kept_once() {
        let genres = Genres::default().with(ACTION.id, (0..20).chain([19, 20, 21]));
        let settings = AggregateSettings {
            per_bucket_cap: 30,
            ..AggregateSettings::default()
        };
        let buckets = aggregate(&[ACTION], settings, |c, p| genres.page(c, p))
            .await
            .unwrap();
        assert_eq!(bucket_ids(&buckets[0]), (0..22).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn one_failed_page_fails_everything() {
        let genres = Genres {
            failing: Some((COMEDY.id, 2)),
            ..Genres::default()
        }
        .with(ACTION.id, 0..5)
        .with(COMEDY.id, 10..15);

        let result = aggregate(&[ACTION, COMEDY, WESTERN], AggregateSettings::default(), |c, p| {
            genres.page(c, p)
        })
        .await;

        assert!(matches!(
            result,
            Err(CatalogError::Upstream(tmdb_api::Error::RequestFailed))
        ));
        // Western is never queried once Comedy fails.
        let calls = genres.calls.lock().unwrap();
        assert!(calls.iter().all(|(c, _)| *c != WESTERN.id));
    }

    #[tokio::test]
    async fn registry_does_not_leak_between_calls() {
        let genres = Genres::default().with(ACTION.id, [1, 2]);
        for _ in 0..2 {
            let buckets = aggregate(&[ACTION], AggregateSettings::default(), |c, p| {
                genres.page(c, p)
            })
            .await
            .unwrap();
            assert_eq!(bucket_ids(&buckets[0]), vec![1, 2]);
        }
    }

    #[test]
    fn registry_claims_ids() {
        let mut registry = SeenIdRegistry::new();
        assert!(registry.is_empty());
        registry.claim(&[CatalogItem::new(4), CatalogItem::new(9)]);
        assert!(registry.contains(4));
        assert!(!registry.contains(5));
        assert_eq!(registry.len(), 2);
    }
}
