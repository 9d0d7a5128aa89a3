//! Storefront glue for the Vivero backend.
//!
//! - [`StorefrontClient`]: store API client, built once with its interceptors
//! - [`LocaleInterceptor`]: adds `x-medusa-locale` from the request scope
//! - [`BackendConfig`]: base URL and publishable key from the environment
//! - [`render_hero`]: landing page hero markup
//!
//! # Example
//!
//! ```rust,no_run
//! use vivero_storefront::{BackendConfig, RequestLocale, RuntimeContext, StorefrontClient};
//!
//! # async fn run() -> Result<(), vivero_storefront::FetchError> {
//! let client = StorefrontClient::builder(BackendConfig::from_env(RuntimeContext::Server))
//!     .with_locale()
//!     .build()?;
//!
//! let page = RequestLocale::scope(Some("es".to_string()), client.list_products(20)).await?;
//! println!("{} products", page.count);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod hero;
mod interceptor;
mod locale;
mod products;
mod request;
mod response;
mod transport;

pub use client::{StorefrontClient, StorefrontClientBuilder, PUBLISHABLE_KEY_HEADER};
pub use config::{BackendConfig, RuntimeContext, DEFAULT_BACKEND_URL};
pub use error::{FetchError, LocaleError};
pub use hero::{render_hero, HeroContent};
pub use interceptor::{DefaultHeaders, Interceptor};
pub use locale::{
    LocaleHeaders, LocaleInterceptor, LocaleResolver, RequestLocale, TaskLocaleResolver,
    LOCALE_HEADER,
};
pub use products::{ProductPage, StoreProduct, StoreVariant};
pub use request::Request;
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// Re-exported so callers can build requests without depending on `http`.
pub use http::Method;
