//! Store settings, sales channels and publishable API keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ApiKeyId, SalesChannelId, StockLocationId, StoreId};
use crate::money::Currency;

/// A currency the store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedCurrency {
    /// Currency code.
    pub currency_code: Currency,
    /// Whether this is the store's default currency.
    #[serde(default)]
    pub is_default: bool,
}

impl SupportedCurrency {
    /// The store's default currency.
    pub fn default_currency(currency_code: Currency) -> Self {
        Self {
            currency_code,
            is_default: true,
        }
    }
}

/// The store singleton of a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// Supported currencies, in display order.
    #[serde(default)]
    pub supported_currencies: Vec<SupportedCurrency>,
    pub default_sales_channel_id: Option<SalesChannelId>,
    pub default_location_id: Option<StockLocationId>,
}

impl Store {
    /// Create a store with no currencies and no defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StoreId::generate(),
            name: name.into(),
            supported_currencies: Vec::new(),
            default_sales_channel_id: None,
            default_location_id: None,
        }
    }

    /// The currency marked as default, if any.
    pub fn default_currency(&self) -> Option<Currency> {
        self.supported_currencies
            .iter()
            .find(|c| c.is_default)
            .map(|c| c.currency_code)
    }

    /// Check whether the store accepts a currency.
    pub fn supports(&self, currency: Currency) -> bool {
        self.supported_currencies
            .iter()
            .any(|c| c.currency_code == currency)
    }
}

/// A named context through which products and prices are exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesChannel {
    pub id: SalesChannelId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
}

impl SalesChannel {
    /// Create an enabled sales channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SalesChannelId::generate(),
            name: name.into(),
            description: None,
            is_disabled: false,
        }
    }
}

/// API key kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyType {
    /// Client-safe key scoped to sales channels.
    #[default]
    Publishable,
    /// Server-side admin key.
    Secret,
}

impl ApiKeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyType::Publishable => "publishable",
            ApiKeyType::Secret => "secret",
        }
    }
}

/// An API key issued by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: ApiKeyId,
    pub title: String,
    #[serde(rename = "type")]
    pub key_type: ApiKeyType,
    /// Token value; the platform may withhold it.
    pub token: Option<String>,
    pub created_by: Option<String>,
    /// Sales channels the key is scoped to.
    #[serde(default)]
    pub sales_channel_ids: Vec<SalesChannelId>,
    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    /// The value a storefront should be configured with.
    ///
    /// Falls back to the key ID when no token was returned.
    pub fn export_token(&self) -> &str {
        match self.token.as_deref() {
            Some(token) => token,
            None => self.id.as_str(),
        }
    }

    /// Check whether the key is scoped to a sales channel.
    pub fn is_linked_to(&self, channel: &SalesChannelId) -> bool {
        self.sales_channel_ids.contains(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(token: Option<&str>) -> ApiKey {
        ApiKey {
            id: ApiKeyId::new("apk_01"),
            title: "Plantas Storefront".to_string(),
            key_type: ApiKeyType::Publishable,
            token: token.map(String::from),
            created_by: Some("seed-script".to_string()),
            sales_channel_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_token_prefers_token() {
        assert_eq!(key(Some("pk_abc")).export_token(), "pk_abc");
    }

    #[test]
    fn test_export_token_falls_back_to_id() {
        assert_eq!(key(None).export_token(), "apk_01");
    }

    #[test]
    fn test_default_currency() {
        let mut store = Store::new("Vivero");
        assert_eq!(store.default_currency(), None);

        store.supported_currencies = vec![
            SupportedCurrency {
                currency_code: Currency::EUR,
                is_default: false,
            },
            SupportedCurrency::default_currency(Currency::USD),
        ];
        assert_eq!(store.default_currency(), Some(Currency::USD));
        assert!(store.supports(Currency::EUR));
        assert!(!store.supports(Currency::GBP));
    }

    #[test]
    fn test_store_with_unlisted_currency_decodes() {
        let store: Store = serde_json::from_value(serde_json::json!({
            "id": "store_01",
            "name": "Vivero AR",
            "supported_currencies": [
                { "currency_code": "ars", "is_default": true },
                { "currency_code": "usd", "is_default": false }
            ],
            "default_sales_channel_id": null,
            "default_location_id": null
        }))
        .unwrap();

        let ars = Currency::from_code("ars").unwrap();
        assert_eq!(store.default_currency(), Some(ars));
        assert!(store.supports(Currency::USD));
        assert_eq!(serde_json::to_value(ars).unwrap(), serde_json::json!("ars"));
    }
}
