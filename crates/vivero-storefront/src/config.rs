//! Backend configuration from the environment.

use serde::Serialize;

/// Used when no backend URL variable is set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:9000";

/// Where the code talking to the backend runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeContext {
    /// Server-side rendering; may use an internal network address.
    Server,
    /// Code shipped to the browser; only public addresses work.
    Browser,
}

impl RuntimeContext {
    /// Variables consulted for the base URL, in priority order.
    pub fn url_variables(&self) -> &'static [&'static str] {
        match self {
            RuntimeContext::Server => &["MEDUSA_BACKEND_URL_INTERNAL", "MEDUSA_BACKEND_URL"],
            RuntimeContext::Browser => &["NEXT_PUBLIC_MEDUSA_BACKEND_URL", "MEDUSA_BACKEND_URL"],
        }
    }
}

/// Settings the storefront client is built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendConfig {
    pub base_url: String,
    /// Sent as `x-publishable-api-key` on every request.
    pub publishable_key: Option<String>,
    /// Log every request and response status.
    pub debug: bool,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            publishable_key: None,
            debug: false,
        }
    }

    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = Some(key.into());
        self
    }

    /// Read the process environment.
    pub fn from_env(context: RuntimeContext) -> Self {
        Self::from_lookup(context, |name| std::env::var(name).ok())
    }

    /// Resolve from any variable source. Empty values count as unset.
    pub fn from_lookup(
        context: RuntimeContext,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = context
            .url_variables()
            .iter()
            .find_map(|name| get(name))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        Self {
            base_url,
            publishable_key: get("NEXT_PUBLIC_MEDUSA_PUBLISHABLE_KEY"),
            debug: get("NODE_ENV").is_some_and(|env| env == "development"),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BackendConfig::from_lookup(RuntimeContext::Server, lookup(&[]));
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.publishable_key, None);
        assert!(!config.debug);
    }

    #[test]
    fn test_server_prefers_internal_url() {
        let vars = [
            ("MEDUSA_BACKEND_URL_INTERNAL", "http://medusa:9000"),
            ("MEDUSA_BACKEND_URL", "https://api.vivero.test"),
            ("NEXT_PUBLIC_MEDUSA_BACKEND_URL", "https://public.vivero.test"),
        ];
        let server = BackendConfig::from_lookup(RuntimeContext::Server, lookup(&vars));
        let browser = BackendConfig::from_lookup(RuntimeContext::Browser, lookup(&vars));

        assert_eq!(server.base_url, "http://medusa:9000");
        assert_eq!(browser.base_url, "https://public.vivero.test");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let vars = [
            ("MEDUSA_BACKEND_URL_INTERNAL", ""),
            ("MEDUSA_BACKEND_URL", "https://api.vivero.test"),
            ("NEXT_PUBLIC_MEDUSA_PUBLISHABLE_KEY", ""),
        ];
        let config = BackendConfig::from_lookup(RuntimeContext::Server, lookup(&vars));
        assert_eq!(config.base_url, "https://api.vivero.test");
        assert_eq!(config.publishable_key, None);
    }

    #[test]
    fn test_key_and_debug() {
        let vars = [
            ("NEXT_PUBLIC_MEDUSA_PUBLISHABLE_KEY", "pk_01"),
            ("NODE_ENV", "development"),
        ];
        let config = BackendConfig::from_lookup(RuntimeContext::Browser, lookup(&vars));
        assert_eq!(config.publishable_key.as_deref(), Some("pk_01"));
        assert!(config.debug);

        let prod = BackendConfig::from_lookup(RuntimeContext::Browser, lookup(&[("NODE_ENV", "production")]));
        assert!(!prod.debug);
    }
}
