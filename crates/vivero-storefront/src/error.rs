//! Storefront client error types.

use thiserror::Error;

/// Errors that can occur when calling the backend.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-2xx response.
    #[error("HTTP {status} for {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    /// Failed to send the request.
    #[error("Request failed: {0}")]
    Request(String),

    /// Header name or value not representable in HTTP.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Deserialization(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Request(e.to_string())
    }
}

/// Errors resolving the request locale.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocaleError {
    /// Resolution was attempted outside a request scope.
    #[error("no request locale in scope")]
    OutOfScope,

    #[error("locale resolution failed: {0}")]
    Resolution(String),
}
