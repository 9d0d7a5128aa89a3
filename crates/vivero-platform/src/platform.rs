//! The commerce platform seam.

use async_trait::async_trait;
use serde::Serialize;
use vivero_commerce::prelude::*;

use crate::error::PlatformError;
use crate::input::*;

/// Every call the seeder makes against the platform.
///
/// Used for logging, fault injection and the in-memory call journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformOp {
    ListStores,
    UpdateStore,
    ListSalesChannels,
    CreateSalesChannels,
    CreateRegions,
    CreateTaxRegions,
    CreateStockLocations,
    LinkFulfillmentProvider,
    ListShippingProfiles,
    CreateShippingProfiles,
    CreateFulfillmentSet,
    CreateShippingOptions,
    LinkSalesChannelsToLocation,
    CreateApiKeys,
    LinkSalesChannelsToApiKey,
    CreateProductCategories,
    CreateProducts,
    ListInventoryItems,
    CreateInventoryLevels,
}

impl PlatformOp {
    /// Get the name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListStores => "list_stores",
            Self::UpdateStore => "update_store",
            Self::ListSalesChannels => "list_sales_channels",
            Self::CreateSalesChannels => "create_sales_channels",
            Self::CreateRegions => "create_regions",
            Self::CreateTaxRegions => "create_tax_regions",
            Self::CreateStockLocations => "create_stock_locations",
            Self::LinkFulfillmentProvider => "link_fulfillment_provider",
            Self::ListShippingProfiles => "list_shipping_profiles",
            Self::CreateShippingProfiles => "create_shipping_profiles",
            Self::CreateFulfillmentSet => "create_fulfillment_set",
            Self::CreateShippingOptions => "create_shipping_options",
            Self::LinkSalesChannelsToLocation => "link_sales_channels_to_location",
            Self::CreateApiKeys => "create_api_keys",
            Self::LinkSalesChannelsToApiKey => "link_sales_channels_to_api_key",
            Self::CreateProductCategories => "create_product_categories",
            Self::CreateProducts => "create_products",
            Self::ListInventoryItems => "list_inventory_items",
            Self::CreateInventoryLevels => "create_inventory_levels",
        }
    }
}

impl std::fmt::Display for PlatformOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Creation, lookup and link operations offered by the commerce platform.
///
/// Implementations are opaque to callers: a call either succeeds with the
/// records the platform now holds, or fails and leaves whatever partial
/// state the platform chose to keep.
#[async_trait]
pub trait CommercePlatform: Send + Sync {
    /// List stores. A deployment normally has exactly one.
    async fn list_stores(&self) -> Result<Vec<Store>, PlatformError>;

    /// Apply a partial update to a store.
    async fn update_store(&self, id: &StoreId, update: StoreUpdate) -> Result<Store, PlatformError>;

    async fn list_sales_channels(
        &self,
        filter: &SalesChannelFilter,
    ) -> Result<Vec<SalesChannel>, PlatformError>;

    async fn create_sales_channels(
        &self,
        channels: Vec<CreateSalesChannel>,
    ) -> Result<Vec<SalesChannel>, PlatformError>;

    async fn create_regions(&self, regions: Vec<CreateRegion>) -> Result<Vec<Region>, PlatformError>;

    async fn create_tax_regions(
        &self,
        tax_regions: Vec<CreateTaxRegion>,
    ) -> Result<Vec<TaxRegion>, PlatformError>;

    async fn create_stock_locations(
        &self,
        locations: Vec<CreateStockLocation>,
    ) -> Result<Vec<StockLocation>, PlatformError>;

    /// Enable a fulfillment provider at a stock location.
    async fn link_fulfillment_provider(
        &self,
        location: &StockLocationId,
        provider_id: &str,
    ) -> Result<(), PlatformError>;

    async fn list_shipping_profiles(
        &self,
        filter: &ShippingProfileFilter,
    ) -> Result<Vec<ShippingProfile>, PlatformError>;

    async fn create_shipping_profiles(
        &self,
        profiles: Vec<CreateShippingProfile>,
    ) -> Result<Vec<ShippingProfile>, PlatformError>;

    /// Create a fulfillment set with its service zones and attach it to a location.
    async fn create_fulfillment_set(
        &self,
        location: &StockLocationId,
        set: CreateFulfillmentSet,
    ) -> Result<FulfillmentSet, PlatformError>;

    async fn create_shipping_options(
        &self,
        options: Vec<CreateShippingOption>,
    ) -> Result<Vec<ShippingOption>, PlatformError>;

    async fn link_sales_channels_to_location(
        &self,
        location: &StockLocationId,
        channels: &[SalesChannelId],
    ) -> Result<(), PlatformError>;

    async fn create_api_keys(&self, keys: Vec<CreateApiKey>) -> Result<Vec<ApiKey>, PlatformError>;

    async fn link_sales_channels_to_api_key(
        &self,
        key: &ApiKeyId,
        channels: &[SalesChannelId],
    ) -> Result<(), PlatformError>;

    async fn create_product_categories(
        &self,
        categories: Vec<CreateProductCategory>,
    ) -> Result<Vec<ProductCategory>, PlatformError>;

    async fn create_products(
        &self,
        products: Vec<CreateProduct>,
    ) -> Result<Vec<Product>, PlatformError>;

    /// List every inventory item the platform knows about.
    async fn list_inventory_items(&self) -> Result<Vec<InventoryItem>, PlatformError>;

    async fn create_inventory_levels(
        &self,
        levels: Vec<CreateInventoryLevel>,
    ) -> Result<Vec<InventoryLevel>, PlatformError>;
}
