//! Hand-curated genre lists shown on the browse-by-genre pages.
//!
//! Order matters: when two genres share a title, the genre listed first keeps it.

use serde::Serialize;
use tmdb_api::types::MediaKind;

/// TMDB genre identifier.
pub type CategoryId = i64;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub display_name: &'static str,
}

impl Category {
    pub const fn new(id: CategoryId, display_name: &'static str) -> Self {
        Self { id, display_name }
    }
}

pub const MOVIE_GENRES: &[Category] = &[
    Category::new(28, "Action"),
    Category::new(12, "Aventure"),
    Category::new(35, "Comédie"),
    Category::new(53, "Thriller"),
    Category::new(18, "Drame"),
    Category::new(27, "Horreur"),
    Category::new(80, "Crime"),
    Category::new(14, "Fantastique"),
    Category::new(878, "Science-Fiction"),
    Category::new(10752, "Guerre"),
    Category::new(16, "Animation"),
    Category::new(10751, "Familial"),
];

pub const SERIES_GENRES: &[Category] = &[
    Category::new(18, "Drame"),
    Category::new(35, "Comédie"),
    Category::new(80, "Crime"),
    Category::new(10759, "Action & Aventure"),
    Category::new(10765, "Science-Fiction & Fantastique"),
    Category::new(10767, "Talk-show"),
    Category::new(10768, "Guerre & Politique"),
    Category::new(37, "Western"),
    Category::new(16, "Animation"),
    Category::new(10751, "Familial"),
    Category::new(10762, "Kids"),
    Category::new(10770, "Téléfilm"),
];

/// The browse list for a content kind.
pub fn for_kind(kind: MediaKind) -> &'static [Category] {
    match kind {
        MediaKind::Movie => MOVIE_GENRES,
        MediaKind::Tv => SERIES_GENRES,
    }
}
