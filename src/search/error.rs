use thiserror::Error;

/// Errors from the job search API.
#[derive(Error, Debug)]
pub enum SearchError {
    /// API key or host missing, or still the placeholder value.
    #[error("Search API is not configured: {0}")]
    NotConfigured(String),

    /// The request did not finish within the configured timeout.
    #[error("Search request timed out after {0}s")]
    Timeout(u64),

    /// The API host could not be reached.
    #[error("Cannot connect to search API at {0}")]
    Connect(String),

    /// Any other transport failure.
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Search API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("Failed to decode search response: {0}")]
    Decode(String),
}
