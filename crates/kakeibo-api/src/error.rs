//! # API Error Types
//!
//! Errors at the HTTP boundary. Everything here is recoverable from the
//! user's point of view: the workflow reports the message, keeps the
//! draft intact, and releases the submit guard so retry is possible.

use thiserror::Error;

/// Outbound API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client could not be constructed from its configuration.
    #[error("Invalid API configuration: {0}")]
    Config(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("Request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("Submission rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
