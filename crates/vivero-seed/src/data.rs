//! Seed dataset.
//!
//! The demo records live in a TOML file rather than in code. The built-in
//! dataset is compiled in from `data/vivero.toml`; any file with the same
//! shape can replace it.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use vivero_commerce::catalog::is_valid_handle;
use vivero_commerce::prelude::*;
use vivero_platform::CreateRegion;

use crate::error::SeedError;

const BUILTIN: &str = include_str!("../data/vivero.toml");

/// Everything the seeder creates, minus platform-assigned identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    /// Countries served by tax regions and the fulfillment service zone.
    pub countries: Vec<String>,
    pub store: StoreSeed,
    pub regions: Vec<CreateRegion>,
    pub tax: TaxSeed,
    pub stock_location: LocationSeed,
    pub shipping_profile: ProfileSeed,
    pub fulfillment_set: FulfillmentSetSeed,
    pub shipping_options: Vec<ShippingOptionSeed>,
    pub api_key: ApiKeySeed,
    pub categories: Vec<CategorySeed>,
    pub products: Vec<ProductSeed>,
    pub inventory: InventorySeed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSeed {
    /// Name of the default sales channel, reused when it already exists.
    pub sales_channel: String,
    pub supported_currencies: Vec<SupportedCurrency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSeed {
    pub provider_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSeed {
    pub name: String,
    pub address: Address,
    pub fulfillment_provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSeed {
    pub name: String,
    /// Profiles of this type are reused when present.
    #[serde(rename = "type")]
    pub profile_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentSetSeed {
    pub name: String,
    #[serde(rename = "type")]
    pub set_type: FulfillmentSetType,
    /// Name of the single service zone.
    pub zone: String,
}

/// A flat-rate shipping option. The amount applies to the currency and,
/// as an override, to every seeded region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOptionSeed {
    pub name: String,
    pub provider_id: String,
    pub currency_code: Currency,
    pub amount: i64,
    #[serde(rename = "type")]
    pub option_type: ShippingOptionType,
    #[serde(default)]
    pub rules: Vec<ShippingRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeySeed {
    pub title: String,
    #[serde(rename = "type", default)]
    pub key_type: ApiKeyType,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeed {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSeed {
    pub title: String,
    pub handle: String,
    /// Category name, resolved against the categories created in the same run.
    pub category: String,
    pub description: Option<String>,
    /// Weight in grams.
    pub weight: Option<i64>,
    #[serde(default = "default_status")]
    pub status: ProductStatus,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    pub variants: Vec<VariantSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSeed {
    pub title: String,
    pub sku: Option<String>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    pub prices: Vec<Money>,
    #[serde(default = "default_true")]
    pub manage_inventory: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySeed {
    pub stocked_quantity: i64,
}

fn default_true() -> bool {
    true
}

fn default_status() -> ProductStatus {
    ProductStatus::Published
}

impl SeedData {
    /// The dataset shipped with the crate.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_toml(BUILTIN)
    }

    /// Parse a dataset from TOML.
    pub fn from_toml(content: &str) -> Result<Self, SeedError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a dataset file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::ReadData {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| SeedError::InvalidData(e.to_string()))
        } else {
            Self::from_toml(&content)
        }
    }

    /// Check the dataset for problems detectable before contacting the platform.
    ///
    /// Category references are not checked here; they are resolved against
    /// the categories actually created during the run.
    pub fn validate(&self) -> Result<(), SeedError> {
        let defaults = self
            .store
            .supported_currencies
            .iter()
            .filter(|c| c.is_default)
            .count();
        if defaults != 1 {
            return invalid(format!(
                "exactly one default currency is required, found {}",
                defaults
            ));
        }
        if self.store.sales_channel.trim().is_empty() {
            return invalid("sales channel name is empty");
        }
        if self.countries.is_empty() {
            return invalid("no countries configured");
        }
        for region in &self.regions {
            if region.countries.is_empty() {
                return invalid(format!("region {} has no countries", region.name));
            }
        }
        if self.inventory.stocked_quantity < 0 {
            return invalid("stocked quantity cannot be negative");
        }

        for option in &self.shipping_options {
            if option.amount < 0 {
                return invalid(format!("shipping option {} has a negative amount", option.name));
            }
        }

        let mut handles = HashSet::new();
        let mut skus = HashSet::new();
        for product in &self.products {
            if !is_valid_handle(&product.handle) {
                return invalid(format!("invalid product handle: {}", product.handle));
            }
            if !handles.insert(product.handle.as_str()) {
                return invalid(format!("duplicate product handle: {}", product.handle));
            }
            if product.variants.is_empty() {
                return invalid(format!("product {} has no variants", product.handle));
            }
            for variant in &product.variants {
                if let Some(ref sku) = variant.sku {
                    if !skus.insert(sku.as_str()) {
                        return invalid(format!("duplicate SKU: {}", sku));
                    }
                }
                for (option, value) in &variant.options {
                    let declared = product
                        .options
                        .iter()
                        .any(|o| &o.title == option && o.values.contains(value));
                    if !declared {
                        return Err(CommerceError::UndeclaredOptionValue {
                            sku: variant.sku.clone().unwrap_or_else(|| variant.title.clone()),
                            option: option.clone(),
                            value: value.clone(),
                        }
                        .into());
                    }
                }
            }
        }

        Ok(())
    }

    /// The store's default currency.
    pub fn default_currency(&self) -> Option<Currency> {
        self.store
            .supported_currencies
            .iter()
            .find(|c| c.is_default)
            .map(|c| c.currency_code)
    }

    /// Number of variants with managed inventory.
    pub fn managed_variant_count(&self) -> usize {
        self.products
            .iter()
            .flat_map(|p| &p.variants)
            .filter(|v| v.manage_inventory)
            .count()
    }
}

fn invalid<T>(reason: impl Into<String>) -> Result<T, SeedError> {
    Err(SeedError::InvalidData(reason.into()))
}
