use serde::{Deserialize, Serialize};

/// Envelope returned by every paginated TMDB endpoint.
///
/// TMDB always serves 20 results per page. Asking for a page past the end of
/// the data yields an empty `results` array rather than an error.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PagedResults<T> {
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}
