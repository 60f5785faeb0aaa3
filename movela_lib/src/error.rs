//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer.
///
/// Every provider failure surfaces as [`CatalogError::Upstream`] with the
/// client's error kept intact. Listing and browsing operations never return a
/// partial result alongside it.
#[derive(Debug)]
pub enum CatalogError {
    /// A required provider fetch failed (network, non-success status, or bad payload).
    Upstream(tmdb_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Required configuration is missing or unusable.
    Config(String),
}

impl CatalogError {
    /// Diagnostic payload suitable for an API error body.
    pub fn details(&self) -> String {
        match self {
            Self::Upstream(e) => e.details(),
            Self::InvalidInput(msg) | Self::Config(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream(e) => write!(f, "Upstream fetch failed: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tmdb_api::Error> for CatalogError {
    fn from(e: tmdb_api::Error) -> Self {
        Self::Upstream(e)
    }
}
