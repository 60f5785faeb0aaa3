use url::Url;

use crate::types::SearchScope;

use super::{common::QueryCommon, Query};

/// Query for `/search/{multi,movie,tv,person}`.
#[derive(Clone, Debug)]
pub struct SearchQuery {
    pub common: QueryCommon,
    pub scope: SearchScope,
    pub text: String,
}

impl SearchQuery {
    pub fn new(scope: SearchScope, text: &str) -> Self {
        Self {
            common: QueryCommon {
                page: Some(1),
                language: None,
            },
            scope,
            text: text.to_string(),
        }
    }
}

impl Query for SearchQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut().append_pair("query", &self.text);
        url
    }
}
