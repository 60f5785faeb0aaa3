//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`PageQuery`].

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination and response language.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = Some(page);
        self
    }

    /// Overrides the client's default response language (e.g. `en-US`).
    fn with_language(mut self, language: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().language = Some(language.to_string());
        self
    }
}

/// Fields shared by all query types.
#[derive(Clone, Debug, Default)]
pub struct QueryCommon {
    /// Page number (1-indexed). `None` leaves the parameter out.
    pub page: Option<u32>,
    /// Response language. `None` uses the client default.
    pub language: Option<String>,
}

impl QueryCommon {
    /// Appends the common pagination and language parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(language) = &self.language {
            url.query_pairs_mut().append_pair("language", language);
        }
        if let Some(page) = self.page {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }
        url
    }
}

/// Query carrying only the common fields. Used by list endpoints such as
/// `/movie/now_playing` and by detail lookups.
#[derive(Clone, Debug, Default)]
pub struct PageQuery {
    pub common: QueryCommon,
}

impl Query for PageQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}
