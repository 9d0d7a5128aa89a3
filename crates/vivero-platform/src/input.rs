//! Creation inputs and lookup filters.
//!
//! Field names follow the platform's admin API so most inputs serialize
//! straight into request bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vivero_commerce::prelude::*;

/// Partial store update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_currencies: Option<Vec<SupportedCurrency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sales_channel_id: Option<SalesChannelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_location_id: Option<StockLocationId>,
}

impl StoreUpdate {
    pub fn supported_currencies(currencies: Vec<SupportedCurrency>) -> Self {
        Self {
            supported_currencies: Some(currencies),
            ..Default::default()
        }
    }

    pub fn default_sales_channel(id: SalesChannelId) -> Self {
        Self {
            default_sales_channel_id: Some(id),
            ..Default::default()
        }
    }

    pub fn default_location(id: StockLocationId) -> Self {
        Self {
            default_location_id: Some(id),
            ..Default::default()
        }
    }
}

/// Sales channel lookup filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesChannelFilter {
    pub name: Option<String>,
}

impl SalesChannelFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn matches(&self, channel: &SalesChannel) -> bool {
        self.name.as_ref().map_or(true, |n| &channel.name == n)
    }
}

/// Shipping profile lookup filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShippingProfileFilter {
    pub profile_type: Option<String>,
}

impl ShippingProfileFilter {
    pub fn by_type(profile_type: impl Into<String>) -> Self {
        Self {
            profile_type: Some(profile_type.into()),
        }
    }

    pub fn matches(&self, profile: &ShippingProfile) -> bool {
        self.profile_type
            .as_ref()
            .map_or(true, |t| &profile.profile_type == t)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSalesChannel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRegion {
    pub name: String,
    pub currency_code: Currency,
    pub countries: Vec<String>,
    #[serde(default)]
    pub payment_providers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTaxRegion {
    pub country_code: String,
    pub provider_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStockLocation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateShippingProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub profile_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateServiceZone {
    pub name: String,
    pub geo_zones: Vec<GeoZone>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateFulfillmentSet {
    pub name: String,
    #[serde(rename = "type")]
    pub set_type: FulfillmentSetType,
    pub service_zones: Vec<CreateServiceZone>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateShippingOption {
    pub name: String,
    pub price_type: ShippingPriceType,
    pub provider_id: String,
    pub service_zone_id: ServiceZoneId,
    pub shipping_profile_id: ShippingProfileId,
    #[serde(rename = "type")]
    pub option_type: ShippingOptionType,
    pub prices: Vec<ShippingPrice>,
    pub rules: Vec<ShippingRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateApiKey {
    pub title: String,
    #[serde(rename = "type")]
    pub key_type: ApiKeyType,
    /// Recorded by the platform from the caller's identity; not sent over the wire.
    #[serde(skip)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProductCategory {
    pub name: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProductVariant {
    pub title: String,
    pub sku: Option<String>,
    pub options: BTreeMap<String, String>,
    pub prices: Vec<Money>,
    pub manage_inventory: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProduct {
    pub title: String,
    pub handle: String,
    pub description: Option<String>,
    pub weight: Option<i64>,
    pub status: ProductStatus,
    pub category_ids: Vec<CategoryId>,
    pub shipping_profile_id: Option<ShippingProfileId>,
    pub images: Vec<ProductImage>,
    pub options: Vec<ProductOption>,
    pub variants: Vec<CreateProductVariant>,
    pub sales_channel_ids: Vec<SalesChannelId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateInventoryLevel {
    pub inventory_item_id: InventoryItemId,
    pub location_id: StockLocationId,
    pub stocked_quantity: i64,
}
