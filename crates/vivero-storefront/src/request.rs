//! Outbound requests.

use http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use http::Method;
use serde::Serialize;

use crate::error::FetchError;

/// A request on its way to the transport.
///
/// Interceptors receive it mutably before it is sent.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            method,
            url: url.into(),
            headers,
            body: None,
        }
    }

    /// Set a header, replacing any previous value.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, FetchError> {
        self.set_header(name, value)?;
        Ok(self)
    }

    pub(crate) fn set_header(&mut self, name: &str, value: &str) -> Result<(), FetchError> {
        let invalid = |reason: String| FetchError::InvalidHeader {
            name: name.to_string(),
            reason,
        };
        let header_name = HeaderName::try_from(name).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::try_from(value).map_err(|e| invalid(e.to_string()))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    /// Get a header value as a string.
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Whether the header is set, whatever its value.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive() {
        let request = Request::new(Method::GET, "http://localhost:9000/store/products")
            .header("X-Medusa-Locale", "es")
            .unwrap();
        assert_eq!(request.header_str("x-medusa-locale"), Some("es"));
        assert_eq!(request.header_str("accept"), Some("application/json"));
    }

    #[test]
    fn test_invalid_header_value() {
        let err = Request::new(Method::GET, "/")
            .header("x-medusa-locale", "es\n")
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidHeader { .. }));
    }

    #[test]
    fn test_json_body() {
        let request = Request::new(Method::POST, "/store/carts")
            .json(&serde_json::json!({ "region_id": "reg_01" }))
            .unwrap();
        assert_eq!(request.header_str("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(br#"{"region_id":"reg_01"}"#.as_slice()));
    }
}
