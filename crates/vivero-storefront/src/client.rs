//! The storefront's backend client.
//!
//! Built once at startup and shared by reference. Interceptors are fixed at
//! build time; there is no way to patch the client afterwards.

use std::sync::Arc;

use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::BackendConfig;
use crate::error::FetchError;
use crate::interceptor::Interceptor;
use crate::locale::LocaleInterceptor;
use crate::request::Request;
use crate::response::Response;
use crate::transport::{ReqwestTransport, Transport};

/// Header authenticating storefront requests.
pub const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

/// Client for the backend's store API.
pub struct StorefrontClient {
    config: BackendConfig,
    transport: Arc<dyn Transport>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl std::fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("base_url", &self.config.base_url)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

/// Builder for [`StorefrontClient`].
pub struct StorefrontClientBuilder {
    config: BackendConfig,
    transport: Option<Arc<dyn Transport>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl StorefrontClientBuilder {
    /// Use a specific transport instead of the default `reqwest` one.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Register an interceptor. Interceptors run in registration order.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Register the task-local locale interceptor.
    pub fn with_locale(self) -> Self {
        self.interceptor(LocaleInterceptor::new())
    }

    pub fn build(self) -> Result<StorefrontClient, FetchError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        Ok(StorefrontClient {
            config: self.config,
            transport,
            interceptors: self.interceptors,
        })
    }
}

impl StorefrontClient {
    pub fn builder(config: BackendConfig) -> StorefrontClientBuilder {
        StorefrontClientBuilder {
            config,
            transport: None,
            interceptors: Vec::new(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Full URL for a path relative to the backend.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
        }
    }

    /// Start a request carrying the publishable key, if one is configured.
    pub fn request(&self, method: Method, path: &str) -> Result<Request, FetchError> {
        let request = Request::new(method, self.url(path));
        match self.config.publishable_key.as_deref() {
            Some(key) => request.header(PUBLISHABLE_KEY_HEADER, key),
            None => Ok(request),
        }
    }

    /// Run interceptors and send. The status is not checked.
    pub async fn fetch(&self, mut request: Request) -> Result<Response, FetchError> {
        for interceptor in &self.interceptors {
            interceptor.before_send(&mut request).await?;
        }

        if self.config.debug {
            debug!(method = %request.method, url = %request.url, headers = ?request.headers, "backend request");
        }
        let response = self.transport.send(request).await?;
        if self.config.debug {
            debug!(status = response.status.as_u16(), "backend response");
        }
        Ok(response)
    }

    /// Send and decode a JSON response, failing on non-2xx statuses.
    pub async fn send_json<T: DeserializeOwned>(&self, request: Request) -> Result<T, FetchError> {
        let url = request.url.clone();
        self.fetch(request).await?.error_for_status(&url)?.json()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let request = self.request(Method::GET, path)?;
        self.send_json(request).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body)?;
        self.send_json(request).await
    }
}
