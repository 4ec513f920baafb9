//! Client error types.

/// Errors that can occur when retrieving line status.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    /// HTTP request failed (connection, DNS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not a JSON array of line reports
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
