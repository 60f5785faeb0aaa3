//! HTTP client for the TMDB v3 API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    query::{DiscoverQuery, PageQuery, Query, SearchQuery},
    types::{CatalogItem, ItemID, MediaKind, PagedResults},
    Error,
};

/// Default response language, matching the French-language front end.
pub const DEFAULT_LANGUAGE: &str = "fr-FR";

/// HTTP client for the TMDB v3 API.
///
/// Every request carries the `api_key` query parameter and, unless the query
/// sets its own, the client's default `language`. A single `reqwest::Client`
/// is shared by all requests, with a 30-second timeout.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to `https://api.themoviedb.org/3`.
    base_api_url: String,
    api_key: String,
    language: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.base_api_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Sets the language used when a query does not name one.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        let mut url = query.add_to_url(&url);
        let has_language = url.query_pairs().any(|(k, _)| k == "language");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            if !has_language {
                pairs.append_pair("language", &self.language);
            }
        }
        Ok(url)
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", path);
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource {}: {}", path, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request {} failed with status {}: {}", path, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })
    }

    /// Fetches one page of `/discover/{kind}`, filtered and sorted per the query.
    pub async fn discover(&self, query: &DiscoverQuery) -> Result<PagedResults<CatalogItem>, Error> {
        self.get(format!("/discover/{}", query.kind).as_str(), query)
            .await
    }

    /// Fetches one page of movies currently in theatres.
    pub async fn now_playing(&self, query: &PageQuery) -> Result<PagedResults<CatalogItem>, Error> {
        self.get("/movie/now_playing", query).await
    }

    /// Fetches one page of the provider's popularity chart for `kind`.
    pub async fn popular(
        &self,
        kind: MediaKind,
        query: &PageQuery,
    ) -> Result<PagedResults<CatalogItem>, Error> {
        self.get(format!("/{}/popular", kind).as_str(), query).await
    }

    /// Fetches one page of `/search/{scope}`.
    pub async fn search(&self, query: &SearchQuery) -> Result<PagedResults<CatalogItem>, Error> {
        self.get(format!("/search/{}", query.scope).as_str(), query)
            .await
    }

    /// Fetches the full detail record of a movie or series, verbatim.
    pub async fn details(&self, kind: MediaKind, id: ItemID, query: &PageQuery) -> Result<Value, Error> {
        self.get(format!("/{}/{}", kind, id).as_str(), query).await
    }

    /// Fetches cast and crew of a movie or series, verbatim.
    pub async fn credits(&self, kind: MediaKind, id: ItemID, query: &PageQuery) -> Result<Value, Error> {
        self.get(format!("/{}/{}/credits", kind, id).as_str(), query)
            .await
    }

    /// Fetches one page of recommendations for a movie or series.
    pub async fn recommendations(
        &self,
        kind: MediaKind,
        id: ItemID,
        query: &PageQuery,
    ) -> Result<PagedResults<Value>, Error> {
        self.get(format!("/{}/{}/recommendations", kind, id).as_str(), query)
            .await
    }

    /// Fetches one page of user reviews for a movie or series.
    pub async fn reviews(
        &self,
        kind: MediaKind,
        id: ItemID,
        query: &PageQuery,
    ) -> Result<PagedResults<Value>, Error> {
        self.get(format!("/{}/{}/reviews", kind, id).as_str(), query)
            .await
    }

    /// Fetches a person's biography record, verbatim.
    pub async fn person(&self, id: ItemID, query: &PageQuery) -> Result<Value, Error> {
        self.get(format!("/person/{}", id).as_str(), query).await
    }

    /// Fetches a person's `movie_credits` or `tv_credits`, verbatim.
    pub async fn person_credits(
        &self,
        id: ItemID,
        kind: MediaKind,
        query: &PageQuery,
    ) -> Result<Value, Error> {
        self.get(format!("/person/{}/{}_credits", id, kind).as_str(), query)
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
