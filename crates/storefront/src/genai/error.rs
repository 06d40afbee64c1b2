//! Error types for the text-generation client.

use thiserror::Error;

/// Errors that can occur when calling the text-generation API.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error body.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status string from the API (e.g., `INVALID_ARGUMENT`).
        status: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse the response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model's output did not match the flow's response shape.
    #[error("schema error: {0}")]
    Schema(String),

    /// The model returned no text.
    #[error("empty response")]
    EmptyResponse,

    /// Text generation is not available.
    #[error("text generation not configured: {0}")]
    NotConfigured(String),

    /// The caller's input was rejected before calling out.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Error body returned by the API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
