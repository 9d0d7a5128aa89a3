//! Backend responses.

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// A response returned by the transport.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Error body the backend returns on failures.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Shorthand for a 200 response with a JSON body.
    pub fn json_ok(value: &serde_json::Value) -> Self {
        Self::new(StatusCode::OK, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone()).map_err(|e| FetchError::Deserialization(e.to_string()))
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Deserialization(e.to_string()))
    }

    /// Turn non-2xx responses into [`FetchError::Http`].
    pub fn error_for_status(self, url: &str) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = match serde_json::from_slice::<ErrorBody>(&self.body) {
            Ok(body) => body.message,
            Err(_) => self
                .text()
                .ok()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| self.status.canonical_reason().unwrap_or("Unknown error").to_string()),
        };
        Err(FetchError::Http {
            status: self.status.as_u16(),
            url: url.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status_uses_backend_message() {
        let response = Response::new(
            StatusCode::BAD_REQUEST,
            r#"{"type":"invalid_data","message":"Publishable key is required"}"#,
        );
        let err = response.error_for_status("http://localhost:9000/store/products").unwrap_err();
        match err {
            FetchError::Http { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Publishable key is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_for_status_empty_body() {
        let err = Response::new(StatusCode::NOT_FOUND, Vec::new())
            .error_for_status("/store/products/missing")
            .unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_success_passes_through() {
        let response = Response::json_ok(&serde_json::json!({ "count": 0 }));
        let response = response.error_for_status("/store/products").unwrap();
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["count"], 0);
    }
}
