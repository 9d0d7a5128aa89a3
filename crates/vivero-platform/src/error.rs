//! Platform error types.

use crate::platform::PlatformOp;

/// Error type for platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("HTTP error: {status} for {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Request error: {0}")]
    Request(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{op} rejected: {reason}")]
    Rejected { op: PlatformOp, reason: String },

    #[error("{op} returned no records")]
    EmptyResult { op: PlatformOp },

    #[error("Injected failure in {0}")]
    Injected(PlatformOp),
}

impl PlatformError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn rejected(op: PlatformOp, reason: impl Into<String>) -> Self {
        Self::Rejected {
            op,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for PlatformError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            PlatformError::Deserialization(e.to_string())
        } else {
            PlatformError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(e: serde_json::Error) -> Self {
        PlatformError::Deserialization(e.to_string())
    }
}
