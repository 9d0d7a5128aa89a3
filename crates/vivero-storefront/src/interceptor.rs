//! Request interceptors.
//!
//! Interceptors are registered when the client is built and run in
//! registration order on every request, before the transport sees it.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::request::Request;

#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Adjust the request. An error aborts the request.
    async fn before_send(&self, request: &mut Request) -> Result<(), FetchError>;
}

/// Sets fixed headers on every request unless the caller already set them.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: Vec<(String, String)>,
}

impl DefaultHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[async_trait]
impl Interceptor for DefaultHeaders {
    async fn before_send(&self, request: &mut Request) -> Result<(), FetchError> {
        for (name, value) in &self.headers {
            if !request.has_header(name) {
                request.set_header(name, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, Method};

    #[tokio::test]
    async fn test_default_headers_do_not_override() {
        let defaults = DefaultHeaders::new()
            .header("x-publishable-api-key", "pk_default")
            .header("x-client", "vivero");
        let mut request = Request::new(Method::GET, "/store/regions")
            .header("x-publishable-api-key", "pk_caller")
            .unwrap();

        defaults.before_send(&mut request).await.unwrap();

        assert_eq!(request.header_str("x-publishable-api-key"), Some("pk_caller"));
        assert_eq!(request.header_str("x-client"), Some("vivero"));
    }

    #[tokio::test]
    async fn test_default_headers_keep_non_utf8_caller_value() {
        let defaults = DefaultHeaders::new().header("x-client", "vivero");
        let mut request = Request::new(Method::GET, "/store/regions");
        request
            .headers
            .insert("x-client", HeaderValue::from_bytes(b"caf\xe9").unwrap());

        defaults.before_send(&mut request).await.unwrap();

        assert_eq!(request.headers["x-client"].as_bytes(), b"caf\xe9");
    }
}
