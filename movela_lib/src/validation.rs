use tmdb_api::types::ItemID;

use crate::error::CatalogError;
use crate::remap::{PageWindow, DEFAULT_LIMIT};

/// Upper bound on search text, in bytes. Far above any title or name typed
/// into the search box.
pub const MAX_SEARCH_LENGTH: usize = 500;

/// Searches shorter than this return nothing without querying the provider.
pub const MIN_SEARCH_LENGTH: usize = 2;

/// Default upper bound on `limit`, five provider pages.
pub const DEFAULT_MAX_LIMIT: u32 = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, CatalogError> {
    if input.len() > max_len {
        return Err(CatalogError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string())
}

/// Validate a search string. Returns `None` when the text is too short to search.
pub fn validate_search(input: &str) -> Result<Option<String>, CatalogError> {
    let sanitized = sanitize_text(input, MAX_SEARCH_LENGTH)?;
    if sanitized.chars().count() < MIN_SEARCH_LENGTH {
        return Ok(None);
    }
    Ok(Some(sanitized))
}

/// Coerce a raw `page`/`limit` parameter. Missing, non-numeric, zero and
/// negative values all yield `default`.
pub fn coerce_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(default)
}

/// Build the listing window from raw query parameters. `limit` is clamped to
/// `max_limit` so one request cannot fan out into an unbounded number of
/// provider pages.
pub fn page_window(page: Option<&str>, limit: Option<&str>, max_limit: u32) -> PageWindow {
    PageWindow::new(
        coerce_positive(page, 1),
        coerce_positive(limit, DEFAULT_LIMIT).min(max_limit.max(1)),
    )
}

/// Validate a provider id taken from a path segment.
pub fn validate_item_id(input: &str) -> Result<ItemID, CatalogError> {
    match input.trim().parse::<ItemID>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CatalogError::InvalidInput(format!(
            "'{}' is not a valid id (expected a positive integer)",
            input
        ))),
    }
}
