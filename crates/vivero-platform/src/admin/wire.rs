//! Admin API wire shapes.
//!
//! Responses are decoded leniently (missing collections default to empty)
//! and mapped into domain records. Request bodies that differ from the
//! creation inputs are built here too.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vivero_commerce::prelude::*;

use crate::input::{CreateProduct, CreateRegion};

// ---- envelopes ----

#[derive(Deserialize)]
pub(crate) struct StoreList {
    #[serde(default)]
    pub stores: Vec<Store>,
}

#[derive(Deserialize)]
pub(crate) struct StoreEnvelope {
    pub store: Store,
}

#[derive(Deserialize)]
pub(crate) struct SalesChannelList {
    #[serde(default)]
    pub sales_channels: Vec<SalesChannel>,
}

#[derive(Deserialize)]
pub(crate) struct SalesChannelEnvelope {
    pub sales_channel: SalesChannel,
}

#[derive(Deserialize)]
pub(crate) struct RegionEnvelope {
    pub region: WireRegion,
}

#[derive(Deserialize)]
pub(crate) struct TaxRegionEnvelope {
    pub tax_region: TaxRegion,
}

#[derive(Deserialize)]
pub(crate) struct StockLocationEnvelope {
    pub stock_location: WireStockLocation,
}

#[derive(Deserialize)]
pub(crate) struct ShippingProfileList {
    #[serde(default)]
    pub shipping_profiles: Vec<ShippingProfile>,
}

#[derive(Deserialize)]
pub(crate) struct ShippingProfileEnvelope {
    pub shipping_profile: ShippingProfile,
}

#[derive(Deserialize)]
pub(crate) struct FulfillmentSetEnvelope {
    pub fulfillment_set: FulfillmentSet,
}

#[derive(Deserialize)]
pub(crate) struct ShippingOptionEnvelope {
    pub shipping_option: WireShippingOption,
}

#[derive(Deserialize)]
pub(crate) struct ApiKeyEnvelope {
    pub api_key: WireApiKey,
}

#[derive(Deserialize)]
pub(crate) struct CategoryEnvelope {
    pub product_category: ProductCategory,
}

#[derive(Deserialize)]
pub(crate) struct ProductEnvelope {
    pub product: WireProduct,
}

#[derive(Deserialize)]
pub(crate) struct InventoryItemPage {
    #[serde(default)]
    pub inventory_items: Vec<InventoryItem>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Deserialize)]
pub(crate) struct LevelBatchResult {
    #[serde(default)]
    pub created: Vec<InventoryLevel>,
}

/// Error body returned on non-2xx responses.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

// ---- link bodies ----

/// `{ "add": [...] }` body of the link endpoints.
#[derive(Serialize)]
pub(crate) struct AddLinks<'a, T: Serialize> {
    pub add: &'a [T],
}

#[derive(Serialize)]
pub(crate) struct CreateFulfillmentSetBody<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub set_type: FulfillmentSetType,
}

#[derive(Serialize)]
pub(crate) struct CreateServiceZoneBody<'a> {
    pub name: &'a str,
    pub geo_zones: &'a [GeoZone],
}

#[derive(Serialize)]
pub(crate) struct LevelBatchBody<'a, T: Serialize> {
    pub create: &'a [T],
}

// ---- regions ----

#[derive(Serialize)]
pub(crate) struct CreateRegionBody<'a> {
    pub name: &'a str,
    pub currency_code: Currency,
    pub countries: &'a [String],
    pub payment_providers: &'a [String],
}

impl<'a> From<&'a CreateRegion> for CreateRegionBody<'a> {
    fn from(input: &'a CreateRegion) -> Self {
        Self {
            name: &input.name,
            currency_code: input.currency_code,
            countries: &input.countries,
            payment_providers: &input.payment_providers,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct WireCountry {
    pub iso_2: String,
}

#[derive(Deserialize)]
pub(crate) struct WireProvider {
    pub id: String,
}

#[derive(Deserialize)]
pub(crate) struct WireRegion {
    pub id: RegionId,
    pub name: String,
    pub currency_code: Currency,
    #[serde(default)]
    pub countries: Vec<WireCountry>,
    #[serde(default)]
    pub payment_providers: Vec<WireProvider>,
}

impl From<WireRegion> for Region {
    fn from(wire: WireRegion) -> Self {
        Region {
            id: wire.id,
            name: wire.name,
            currency_code: wire.currency_code,
            countries: wire.countries.into_iter().map(|c| c.iso_2).collect(),
            payment_providers: wire.payment_providers.into_iter().map(|p| p.id).collect(),
        }
    }
}

// ---- stock locations ----

#[derive(Deserialize)]
pub(crate) struct WireLinkedId<T> {
    pub id: T,
}

#[derive(Deserialize)]
pub(crate) struct WireStockLocation {
    pub id: StockLocationId,
    pub name: String,
    pub address: Option<Address>,
    #[serde(default)]
    pub fulfillment_providers: Vec<WireLinkedId<String>>,
    #[serde(default)]
    pub fulfillment_sets: Vec<FulfillmentSet>,
    #[serde(default)]
    pub sales_channels: Vec<WireLinkedId<SalesChannelId>>,
}

impl From<WireStockLocation> for StockLocation {
    fn from(wire: WireStockLocation) -> Self {
        StockLocation {
            id: wire.id,
            name: wire.name,
            address: wire.address,
            fulfillment_provider_ids: wire.fulfillment_providers.into_iter().map(|p| p.id).collect(),
            fulfillment_set_ids: wire.fulfillment_sets.into_iter().map(|s| s.id).collect(),
            sales_channel_ids: wire.sales_channels.into_iter().map(|c| c.id).collect(),
        }
    }
}

// ---- shipping options ----

#[derive(Deserialize)]
pub(crate) struct WirePriceRule {
    pub attribute: String,
    pub value: String,
}

#[derive(Deserialize)]
pub(crate) struct WireShippingPrice {
    pub currency_code: Currency,
    pub amount: i64,
    #[serde(default)]
    pub price_rules: Vec<WirePriceRule>,
}

impl From<WireShippingPrice> for ShippingPrice {
    fn from(wire: WireShippingPrice) -> Self {
        let region = wire
            .price_rules
            .into_iter()
            .find(|r| r.attribute == "region_id")
            .map(|r| RegionId::new(r.value));
        match region {
            Some(region_id) => ShippingPrice::for_region(region_id, wire.amount),
            None => ShippingPrice::for_currency(wire.currency_code, wire.amount),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct WireShippingOption {
    pub id: ShippingOptionId,
    pub name: String,
    pub price_type: ShippingPriceType,
    pub provider_id: Option<String>,
    pub service_zone_id: Option<ServiceZoneId>,
    pub shipping_profile_id: Option<ShippingProfileId>,
    #[serde(rename = "type")]
    pub option_type: ShippingOptionType,
    #[serde(default)]
    pub prices: Vec<WireShippingPrice>,
    #[serde(default)]
    pub rules: Vec<ShippingRule>,
}

impl From<WireShippingOption> for ShippingOption {
    fn from(wire: WireShippingOption) -> Self {
        ShippingOption {
            id: wire.id,
            name: wire.name,
            price_type: wire.price_type,
            provider_id: wire.provider_id,
            service_zone_id: wire.service_zone_id,
            shipping_profile_id: wire.shipping_profile_id,
            option_type: wire.option_type,
            prices: wire.prices.into_iter().map(ShippingPrice::from).collect(),
            rules: wire.rules,
        }
    }
}

// ---- api keys ----

#[derive(Deserialize)]
pub(crate) struct WireApiKey {
    pub id: ApiKeyId,
    pub title: String,
    #[serde(rename = "type")]
    pub key_type: ApiKeyType,
    pub token: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<WireApiKey> for ApiKey {
    fn from(wire: WireApiKey) -> Self {
        ApiKey {
            id: wire.id,
            title: wire.title,
            key_type: wire.key_type,
            token: wire.token.filter(|t| !t.is_empty()),
            created_by: wire.created_by,
            sales_channel_ids: Vec::new(),
            created_at: wire.created_at.unwrap_or_else(Utc::now),
        }
    }
}

// ---- products ----

#[derive(Serialize)]
pub(crate) struct CreateProductBody<'a> {
    pub title: &'a str,
    pub handle: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    pub status: ProductStatus,
    pub categories: Vec<IdRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_profile_id: Option<&'a ShippingProfileId>,
    pub images: &'a [ProductImage],
    pub options: &'a [ProductOption],
    pub variants: Vec<CreateVariantBody<'a>>,
    pub sales_channels: Vec<IdRef<'a>>,
}

#[derive(Serialize)]
pub(crate) struct IdRef<'a> {
    pub id: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CreateVariantBody<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<&'a str>,
    pub options: &'a BTreeMap<String, String>,
    pub prices: &'a [Money],
    pub manage_inventory: bool,
}

impl<'a> From<&'a CreateProduct> for CreateProductBody<'a> {
    fn from(input: &'a CreateProduct) -> Self {
        Self {
            title: &input.title,
            handle: &input.handle,
            description: input.description.as_deref(),
            weight: input.weight,
            status: input.status,
            categories: input
                .category_ids
                .iter()
                .map(|id| IdRef { id: id.as_str() })
                .collect(),
            shipping_profile_id: input.shipping_profile_id.as_ref(),
            images: &input.images,
            options: &input.options,
            variants: input
                .variants
                .iter()
                .map(|v| CreateVariantBody {
                    title: &v.title,
                    sku: v.sku.as_deref(),
                    options: &v.options,
                    prices: &v.prices,
                    manage_inventory: v.manage_inventory,
                })
                .collect(),
            sales_channels: input
                .sales_channel_ids
                .iter()
                .map(|id| IdRef { id: id.as_str() })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct WireOptionRef {
    pub title: String,
}

#[derive(Deserialize)]
pub(crate) struct WireVariantOption {
    pub value: String,
    pub option: Option<WireOptionRef>,
}

#[derive(Deserialize)]
pub(crate) struct WireInventoryLink {
    pub inventory_item_id: InventoryItemId,
}

#[derive(Deserialize)]
pub(crate) struct WireVariant {
    pub id: VariantId,
    pub title: String,
    pub sku: Option<String>,
    #[serde(default)]
    pub options: Vec<WireVariantOption>,
    #[serde(default)]
    pub prices: Vec<Money>,
    #[serde(default)]
    pub manage_inventory: bool,
    #[serde(default)]
    pub inventory_items: Vec<WireInventoryLink>,
}

impl From<WireVariant> for ProductVariant {
    fn from(wire: WireVariant) -> Self {
        ProductVariant {
            id: wire.id,
            title: wire.title,
            sku: wire.sku,
            options: wire
                .options
                .into_iter()
                .filter_map(|o| o.option.map(|opt| (opt.title, o.value)))
                .collect(),
            prices: wire.prices,
            manage_inventory: wire.manage_inventory,
            inventory_item_id: wire.inventory_items.into_iter().next().map(|l| l.inventory_item_id),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct WireOptionValue {
    pub value: String,
}

#[derive(Deserialize)]
pub(crate) struct WireProductOption {
    pub title: String,
    #[serde(default)]
    pub values: Vec<WireOptionValue>,
}

#[derive(Deserialize)]
pub(crate) struct WireProduct {
    pub id: ProductId,
    pub title: String,
    pub handle: String,
    pub description: Option<String>,
    pub weight: Option<i64>,
    pub status: ProductStatus,
    #[serde(default)]
    pub categories: Vec<WireLinkedId<CategoryId>>,
    pub shipping_profile_id: Option<ShippingProfileId>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub options: Vec<WireProductOption>,
    #[serde(default)]
    pub variants: Vec<WireVariant>,
    #[serde(default)]
    pub sales_channels: Vec<WireLinkedId<SalesChannelId>>,
}

impl From<WireProduct> for Product {
    fn from(wire: WireProduct) -> Self {
        Product {
            id: wire.id,
            title: wire.title,
            handle: wire.handle,
            description: wire.description,
            weight: wire.weight,
            status: wire.status,
            category_ids: wire.categories.into_iter().map(|c| c.id).collect(),
            shipping_profile_id: wire.shipping_profile_id,
            images: wire.images,
            options: wire
                .options
                .into_iter()
                .map(|o| ProductOption {
                    title: o.title,
                    values: o.values.into_iter().map(|v| v.value).collect(),
                })
                .collect(),
            variants: wire.variants.into_iter().map(ProductVariant::from).collect(),
            sales_channel_ids: wire.sales_channels.into_iter().map(|c| c.id).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_price_rule_maps_to_region_target() {
        let wire: WireShippingPrice = serde_json::from_str(
            r#"{"currency_code":"usd","amount":900,"price_rules":[{"attribute":"region_id","value":"reg_01"}]}"#,
        )
        .unwrap();
        let price = ShippingPrice::from(wire);
        assert_eq!(price, ShippingPrice::for_region(RegionId::new("reg_01"), 900));
    }

    #[test]
    fn test_region_countries_flatten() {
        let wire: RegionEnvelope = serde_json::from_str(
            r#"{"region":{"id":"reg_01","name":"United States","currency_code":"usd",
                "countries":[{"iso_2":"us","display_name":"United States"}],
                "payment_providers":[{"id":"pp_system_default"}]}}"#,
        )
        .unwrap();
        let region = Region::from(wire.region);
        assert_eq!(region.countries, vec!["us"]);
        assert_eq!(region.payment_providers, vec!["pp_system_default"]);
    }

    #[test]
    fn test_product_body_links_by_id() {
        let input = CreateProduct {
            title: "Lavanda".to_string(),
            handle: "lavanda".to_string(),
            description: None,
            weight: Some(900),
            status: ProductStatus::Published,
            category_ids: vec![CategoryId::new("pcat_ext")],
            shipping_profile_id: None,
            images: Vec::new(),
            options: Vec::new(),
            variants: Vec::new(),
            sales_channel_ids: vec![SalesChannelId::new("sc_default")],
        };
        let body = serde_json::to_value(CreateProductBody::from(&input)).unwrap();
        assert_eq!(body["categories"][0]["id"], "pcat_ext");
        assert_eq!(body["sales_channels"][0]["id"], "sc_default");
        assert_eq!(body["status"], "published");
        assert!(body.get("description").is_none());
    }

    #[test]
    fn test_variant_options_keyed_by_title() {
        let wire: WireVariant = serde_json::from_str(
            r#"{"id":"variant_01","title":"Maceta 12 cm","sku":"PLANT-LAVANDA-12",
                "options":[{"value":"Maceta 12 cm","option":{"title":"Formato"}}],
                "inventory_items":[{"inventory_item_id":"iitem_01"}]}"#,
        )
        .unwrap();
        let variant = ProductVariant::from(wire);
        assert_eq!(variant.options.get("Formato").map(String::as_str), Some("Maceta 12 cm"));
        assert_eq!(variant.inventory_item_id, Some(InventoryItemId::new("iitem_01")));
    }
}
