//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or bad URL).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl Error {
    /// Upstream payload worth relaying to a caller, if any.
    pub fn details(&self) -> String {
        match self {
            Error::RequestFailed => self.to_string(),
            Error::HttpStatus { body, .. } => body.clone(),
            Error::Parse(msg) => msg.clone(),
        }
    }
}
