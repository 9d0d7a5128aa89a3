//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vivero_platform::AdminCredentials;
use vivero_storefront::{BackendConfig, RuntimeContext, DEFAULT_BACKEND_URL};

const REDACTED: &str = "***";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub backend: BackendSection,

    /// Admin API credentials used by `vivero seed`.
    #[serde(default)]
    pub admin: AdminSection,

    /// Seeding options.
    #[serde(default)]
    pub seed: SeedSection,

    /// Storefront options.
    #[serde(default)]
    pub storefront: StorefrontSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendSection {
    /// Backend base URL (default: http://localhost:9000).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Publishable API key sent by the storefront client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishable_key: Option<String>,

    /// Log every storefront request.
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminSection {
    /// Secret API key. Takes precedence over email and password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedSection {
    /// Dataset to seed instead of the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,

    /// Where the publishable key token is written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontSection {
    /// Locale sent as `x-medusa-locale` by `vivero catalog`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_lookup(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable source. Set, non-empty variables win
    /// over file values.
    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = RuntimeContext::Server
            .url_variables()
            .iter()
            .find_map(|name| get(name))
        {
            self.backend.url = Some(url);
        }
        if let Some(key) = get("NEXT_PUBLIC_MEDUSA_PUBLISHABLE_KEY") {
            self.backend.publishable_key = Some(key);
        }
        if get("NODE_ENV").is_some_and(|env| env == "development") {
            self.backend.debug = true;
        }
        if let Some(token) = get("MEDUSA_ADMIN_TOKEN") {
            self.admin.token = Some(token);
        }
        if let Some(email) = get("MEDUSA_ADMIN_EMAIL") {
            self.admin.email = Some(email);
        }
        if let Some(password) = get("MEDUSA_ADMIN_PASSWORD") {
            self.admin.password = Some(password);
        }
        if let Some(path) = get("PUBLISHABLE_KEY_FILE") {
            self.seed.key_file = Some(path);
        }

        self
    }

    /// Base URL requests go to.
    pub fn backend_url(&self) -> &str {
        self.backend.url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    /// Storefront client settings.
    pub fn backend(&self) -> BackendConfig {
        let mut config = BackendConfig::new(self.backend_url());
        config.publishable_key = self.backend.publishable_key.clone();
        config.debug = self.backend.debug;
        config
    }

    /// Admin credentials, if enough are configured. A token wins over
    /// email and password.
    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        if let Some(token) = &self.admin.token {
            return Some(AdminCredentials::SecretKey(token.clone()));
        }
        match (&self.admin.email, &self.admin.password) {
            (Some(email), Some(password)) => Some(AdminCredentials::EmailPassword {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        let mask = |value: &mut Option<String>| {
            if value.is_some() {
                *value = Some(REDACTED.to_string());
            }
        };
        mask(&mut config.admin.token);
        mask(&mut config.admin.password);
        config
    }
}

/// Generate a default vivero.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Vivero demo store configuration

[backend]
url = "{url}"
# publishable_key = "pk_..."
debug = false

[admin]
# Either a secret API key...
# token = "sk_..."
# ...or an admin user.
# email = "admin@example.com"
# password = "supersecret"

[seed]
# data_file = "data/vivero.toml"
key_file = "storefront/.publishable_key"

[storefront]
locale = "es"
"#,
        url = DEFAULT_BACKEND_URL
    )
}
