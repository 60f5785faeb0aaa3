//! Environment-driven runtime configuration.

use crate::aggregate::AggregateSettings;
use crate::error::CatalogError;
use crate::remap::{RemapSettings, DEFAULT_TOTAL_ITEMS_CEILING};
use crate::validation::DEFAULT_MAX_LIMIT;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["https://movela.vercel.app", "http://localhost:5173"];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    /// Synthetic catalog size behind `totalPages`.
    pub total_items_ceiling: u64,
    pub max_limit: u32,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Defaults for everything except the API key.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: tmdb_api::DEFAULT_LANGUAGE.to_string(),
            total_items_ceiling: DEFAULT_TOTAL_ITEMS_CEILING,
            max_limit: DEFAULT_MAX_LIMIT,
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, CatalogError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable numbers fall back to
    /// their defaults; a missing or blank `TMDB_API_KEY` is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CatalogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("TMDB_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| CatalogError::Config("TMDB_API_KEY is not set".to_string()))?;

        let mut config = Self::new(&api_key);
        if let Some(base_url) = lookup("TMDB_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(language) = lookup("TMDB_LANGUAGE").filter(|v| !v.trim().is_empty()) {
            config.language = language.trim().to_string();
        }
        config.total_items_ceiling =
            parse_or(&lookup, "MOVELA_TOTAL_ITEMS_CEILING", config.total_items_ceiling);
        config.max_limit = parse_or(&lookup, "MOVELA_MAX_LIMIT", config.max_limit).max(1);
        if let Some(host) = lookup("HOST").filter(|v| !v.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        config.port = parse_or(&lookup, "PORT", config.port);
        if let Some(origins) = lookup("MOVELA_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(config)
    }

    pub fn remap_settings(&self) -> RemapSettings {
        RemapSettings {
            total_items_ceiling: self.total_items_ceiling,
            ..RemapSettings::default()
        }
    }

    pub fn aggregate_settings(&self) -> AggregateSettings {
        AggregateSettings::default()
    }

    /// Builds the provider client this config points at.
    pub fn client(&self) -> Result<tmdb_api::Client, CatalogError> {
        Ok(tmdb_api::Client::with_base_url(&self.base_url, &self.api_key)?
            .with_language(&self.language))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));

        let err = Config::from_lookup(lookup(&[("TMDB_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[("TMDB_API_KEY", "k")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.language, "fr-FR");
        assert_eq!(config.total_items_ceiling, 10_000);
        assert_eq!(config.max_limit, 100);
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            ("TMDB_API_KEY", "k"),
            ("TMDB_LANGUAGE", "en-US"),
            ("MOVELA_TOTAL_ITEMS_CEILING", "480"),
            ("PORT", "8080"),
            ("MOVELA_CORS_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();
        assert_eq!(config.language, "en-US");
        assert_eq!(config.remap_settings().total_items_ceiling, 480);
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("TMDB_API_KEY", "k"),
            ("PORT", "http"),
            ("MOVELA_MAX_LIMIT", "0"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_limit, 1);
    }
}
