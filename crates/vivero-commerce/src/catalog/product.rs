//! Product and variant types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{
    CategoryId, InventoryItemId, ProductId, SalesChannelId, ShippingProfileId, VariantId,
};
use crate::money::{Currency, Money};

/// Product status in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Product is in draft mode, not visible to customers.
    #[default]
    Draft,
    /// Awaiting review.
    Proposed,
    /// Product is live and visible.
    Published,
    /// Rejected in review.
    Rejected,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Proposed => "proposed",
            ProductStatus::Published => "published",
            ProductStatus::Rejected => "rejected",
        }
    }
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub url: String,
}

/// An option axis of a product (e.g. "Formato") with its allowed values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductOption {
    pub title: String,
    pub values: Vec<String>,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductVariant {
    pub id: VariantId,
    pub title: String,
    pub sku: Option<String>,
    /// Option title to option value.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// One price per currency.
    #[serde(default)]
    pub prices: Vec<Money>,
    /// Whether the platform tracks stock for this variant.
    #[serde(default = "default_true")]
    pub manage_inventory: bool,
    /// Inventory item backing this variant, once created.
    pub inventory_item_id: Option<InventoryItemId>,
}

fn default_true() -> bool {
    true
}

impl ProductVariant {
    /// Price in a currency, if set.
    pub fn price_in(&self, currency: Currency) -> Option<Money> {
        self.prices.iter().copied().find(|p| p.currency == currency)
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    pub title: String,
    /// URL-friendly handle, unique per store.
    pub handle: String,
    pub description: Option<String>,
    /// Weight in grams.
    pub weight: Option<i64>,
    pub status: ProductStatus,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    pub shipping_profile_id: Option<ShippingProfileId>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub sales_channel_ids: Vec<SalesChannelId>,
}

impl Product {
    /// Check if the product is visible in the storefront.
    pub fn is_published(&self) -> bool {
        self.status == ProductStatus::Published
    }

    /// Find a variant by SKU.
    pub fn variant_by_sku(&self, sku: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.sku.as_deref() == Some(sku))
    }

    /// Lowest variant price in a currency.
    pub fn from_price(&self, currency: Currency) -> Option<Money> {
        self.variants
            .iter()
            .filter_map(|v| v.price_in(currency))
            .min_by_key(|m| m.amount)
    }

    /// Check the handle and that every variant only uses declared option values.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !is_valid_handle(&self.handle) {
            return Err(CommerceError::InvalidHandle(self.handle.clone()));
        }

        for variant in &self.variants {
            for (option, value) in &variant.options {
                let declared = self
                    .options
                    .iter()
                    .find(|o| &o.title == option)
                    .is_some_and(|o| o.values.contains(value));
                if !declared {
                    return Err(CommerceError::UndeclaredOptionValue {
                        sku: variant.sku.clone().unwrap_or_else(|| variant.title.clone()),
                        option: option.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Handles are lowercase ASCII words joined by single hyphens.
pub fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && !handle.starts_with('-')
        && !handle.ends_with('-')
        && !handle.contains("--")
        && handle
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
