//! Catalog entries returned by listing, discover and search endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric TMDB identifier. Unique within a media kind.
pub type ItemID = i64;

/// A movie, series or person entry as the provider sent it.
///
/// Only `id` is interpreted. Every other field is kept in `fields` and
/// serialized back exactly as received, so responses relay the provider's
/// payload without loss.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: ItemID,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CatalogItem {
    pub fn new(id: ItemID) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Adds or replaces a pass-through field.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Movies carry `title`, series and people carry `name`.
    pub fn title(&self) -> Option<&str> {
        self.str_field("title").or_else(|| self.str_field("name"))
    }

    /// `release_date` for movies, `first_air_date` for series.
    pub fn release_date(&self) -> Option<&str> {
        self.str_field("release_date")
            .or_else(|| self.str_field("first_air_date"))
            .filter(|d| !d.is_empty())
    }

    pub fn popularity(&self) -> Option<f64> {
        self.fields.get("popularity").and_then(Value::as_f64)
    }

    pub fn vote_average(&self) -> Option<f64> {
        self.fields.get("vote_average").and_then(Value::as_f64)
    }

    /// Present on multi-search results: `movie`, `tv` or `person`.
    pub fn media_type(&self) -> Option<&str> {
        self.str_field("media_type")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let json = r#"{"id":550,"title":"Fight Club","adult":false,"genre_ids":[18,53]}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 550);
        assert_eq!(item.title(), Some("Fight Club"));

        let back: Value = serde_json::to_value(&item).unwrap();
        assert_eq!(back["genre_ids"], serde_json::json!([18, 53]));
        assert_eq!(back["adult"], Value::Bool(false));
    }

    #[test]
    fn series_title_falls_back_to_name() {
        let item = CatalogItem::new(1399)
            .with_field("name", "Game of Thrones")
            .with_field("first_air_date", "2011-04-17");
        assert_eq!(item.title(), Some("Game of Thrones"));
        assert_eq!(item.release_date(), Some("2011-04-17"));
    }

    #[test]
    fn empty_release_date_is_none() {
        let item = CatalogItem::new(1).with_field("release_date", "");
        assert_eq!(item.release_date(), None);
    }
}
