//! Locale decoration of outbound requests.
//!
//! The locale of the request being served is held in a task-local set by
//! [`RequestLocale::scope`]. [`LocaleInterceptor`] resolves it before each
//! backend call and adds `x-medusa-locale` when the caller has not set it.
//! Resolution failures never block the request.

use std::collections::BTreeMap;
use std::future::Future;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{FetchError, LocaleError};
use crate::interceptor::Interceptor;
use crate::request::Request;

/// Header carrying the storefront locale to the backend.
pub const LOCALE_HEADER: &str = "x-medusa-locale";

/// Resolved locale headers. A `None` value means "no value" and is dropped.
pub type LocaleHeaders = BTreeMap<String, Option<String>>;

tokio::task_local! {
    static REQUEST_LOCALE: Option<String>;
}

/// Request-scoped locale context.
pub struct RequestLocale;

impl RequestLocale {
    /// Run `f` with `locale` as the current request locale.
    pub async fn scope<F: Future>(locale: Option<String>, f: F) -> F::Output {
        REQUEST_LOCALE.scope(locale, f).await
    }

    /// The locale of the current request.
    pub fn current() -> Result<Option<String>, LocaleError> {
        REQUEST_LOCALE
            .try_with(|locale| locale.clone())
            .map_err(|_| LocaleError::OutOfScope)
    }
}

/// Produces the locale headers for the current request.
#[async_trait]
pub trait LocaleResolver: Send + Sync {
    async fn locale_headers(&self) -> Result<LocaleHeaders, LocaleError>;
}

/// Resolves from [`RequestLocale`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskLocaleResolver;

#[async_trait]
impl LocaleResolver for TaskLocaleResolver {
    async fn locale_headers(&self) -> Result<LocaleHeaders, LocaleError> {
        let locale = RequestLocale::current()?;
        Ok(BTreeMap::from([(LOCALE_HEADER.to_string(), locale)]))
    }
}

/// Adds resolved locale headers underneath the caller's headers.
#[derive(Debug, Clone, Default)]
pub struct LocaleInterceptor<R = TaskLocaleResolver> {
    resolver: R,
}

impl LocaleInterceptor<TaskLocaleResolver> {
    /// Resolve from the task-local request locale.
    pub fn new() -> Self {
        Self {
            resolver: TaskLocaleResolver,
        }
    }
}

impl<R: LocaleResolver> LocaleInterceptor<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl<R: LocaleResolver> Interceptor for LocaleInterceptor<R> {
    async fn before_send(&self, request: &mut Request) -> Result<(), FetchError> {
        let headers = match self.resolver.locale_headers().await {
            Ok(headers) => headers,
            Err(e) => {
                warn!(error = %e, url = %request.url, "locale resolution failed, sending without locale");
                return Ok(());
            }
        };

        for (name, value) in headers {
            let Some(value) = value else { continue };
            if request.has_header(&name) {
                continue;
            }
            // A value that is not a valid header is treated like a failed resolution.
            if let Err(e) = request.set_header(&name, &value) {
                warn!(error = %e, "dropping locale header");
                continue;
            }
            debug!(header = %name, %value, "added locale header");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, Method};

    fn request() -> Request {
        Request::new(Method::GET, "http://localhost:9000/store/products")
    }

    #[tokio::test]
    async fn test_current_outside_scope() {
        assert_eq!(RequestLocale::current(), Err(LocaleError::OutOfScope));
    }

    #[tokio::test]
    async fn test_scope_sets_locale() {
        let locale = RequestLocale::scope(Some("es".to_string()), async {
            RequestLocale::current()
        })
        .await;
        assert_eq!(locale, Ok(Some("es".to_string())));
    }

    #[tokio::test]
    async fn test_interceptor_adds_scoped_locale() {
        let interceptor = LocaleInterceptor::new();
        let mut request = request();
        RequestLocale::scope(Some("es".to_string()), interceptor.before_send(&mut request))
            .await
            .unwrap();
        assert_eq!(request.header_str(LOCALE_HEADER), Some("es"));
    }

    #[tokio::test]
    async fn test_interceptor_keeps_non_utf8_caller_locale() {
        let interceptor = LocaleInterceptor::new();
        let mut request = request();
        request
            .headers
            .insert(LOCALE_HEADER, HeaderValue::from_bytes(b"es-\xfa").unwrap());

        RequestLocale::scope(Some("en".to_string()), interceptor.before_send(&mut request))
            .await
            .unwrap();

        assert_eq!(request.headers[LOCALE_HEADER].as_bytes(), b"es-\xfa");
        assert_eq!(request.headers.get_all(LOCALE_HEADER).iter().count(), 1);
    }

    #[tokio::test]
    async fn test_null_locale_is_dropped() {
        let interceptor = LocaleInterceptor::new();
        let mut request = request();
        RequestLocale::scope(None, interceptor.before_send(&mut request))
            .await
            .unwrap();
        assert_eq!(request.header_str(LOCALE_HEADER), None);
    }

    #[tokio::test]
    async fn test_out_of_scope_is_swallowed() {
        let interceptor = LocaleInterceptor::new();
        let mut request = request();
        interceptor.before_send(&mut request).await.unwrap();
        assert_eq!(request.header_str(LOCALE_HEADER), None);
    }
}
