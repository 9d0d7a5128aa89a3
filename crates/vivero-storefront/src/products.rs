//! Store product listing.

use serde::{Deserialize, Serialize};

use crate::client::StorefrontClient;
use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreVariant {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
}

/// A product as the store API exposes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProduct {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub variants: Vec<StoreVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<StoreProduct>,
    #[serde(default)]
    pub count: usize,
}

impl StorefrontClient {
    /// List products visible through the publishable key's sales channels.
    pub async fn list_products(&self, limit: usize) -> Result<ProductPage, FetchError> {
        self.get_json(&format!("/store/products?limit={}", limit)).await
    }
}
