//! In-memory commerce platform.
//!
//! Models the platform behaviors the seeder depends on: a pre-existing
//! store, name/type filtered listings, inventory items created alongside
//! managed variants, and generated publishable tokens. Uniqueness of
//! regions, handles and categories is not enforced, matching what a rerun
//! of the seeder observes.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;
use vivero_commerce::prelude::*;

use crate::error::PlatformError;
use crate::input::*;
use crate::platform::{CommercePlatform, PlatformOp};

/// Everything the in-memory platform holds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlatformSnapshot {
    pub stores: Vec<Store>,
    pub sales_channels: Vec<SalesChannel>,
    pub regions: Vec<Region>,
    pub tax_regions: Vec<TaxRegion>,
    pub stock_locations: Vec<StockLocation>,
    pub shipping_profiles: Vec<ShippingProfile>,
    pub fulfillment_sets: Vec<FulfillmentSet>,
    pub shipping_options: Vec<ShippingOption>,
    pub api_keys: Vec<ApiKey>,
    pub product_categories: Vec<ProductCategory>,
    pub products: Vec<Product>,
    pub inventory_items: Vec<InventoryItem>,
    pub inventory_levels: Vec<InventoryLevel>,
}

impl PlatformSnapshot {
    fn location_mut(&mut self, id: &StockLocationId) -> Result<&mut StockLocation, PlatformError> {
        self.stock_locations
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| PlatformError::not_found("Stock location", id))
    }

    fn check_channels(&self, channels: &[SalesChannelId]) -> Result<(), PlatformError> {
        for channel in channels {
            if !self.sales_channels.iter().any(|c| &c.id == channel) {
                return Err(PlatformError::not_found("Sales channel", channel));
            }
        }
        Ok(())
    }

    fn has_service_zone(&self, id: &ServiceZoneId) -> bool {
        self.fulfillment_sets
            .iter()
            .flat_map(|s| &s.service_zones)
            .any(|z| &z.id == id)
    }
}

/// What the `token` field of a newly created API key holds.
#[derive(Clone, Copy)]
enum TokenIssue {
    Generated,
    Withheld,
    Empty,
}

impl TokenIssue {
    fn issue(self) -> Option<String> {
        match self {
            TokenIssue::Generated => Some(generate_token()),
            TokenIssue::Withheld => None,
            TokenIssue::Empty => Some(String::new()),
        }
    }
}

struct State {
    data: PlatformSnapshot,
    journal: Vec<PlatformOp>,
    fail_on: Option<PlatformOp>,
    tokens: TokenIssue,
}

/// A commerce platform held entirely in process memory.
pub struct InMemoryPlatform {
    state: Mutex<State>,
}

impl Default for InMemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlatform {
    /// A platform with one unconfigured store, like a fresh installation.
    pub fn new() -> Self {
        let mut platform = Self::empty();
        platform
            .state
            .get_mut()
            .data
            .stores
            .push(Store::new("Medusa Store"));
        platform
    }

    /// A platform with no store at all.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State {
                data: PlatformSnapshot::default(),
                journal: Vec::new(),
                fail_on: None,
                tokens: TokenIssue::Generated,
            }),
        }
    }

    /// Fail every call of `op` with [`PlatformError::Injected`].
    pub fn fail_on(mut self, op: PlatformOp) -> Self {
        self.state.get_mut().fail_on = Some(op);
        self
    }

    /// Create API keys without tokens, as when the platform withholds them.
    pub fn without_tokens(mut self) -> Self {
        self.state.get_mut().tokens = TokenIssue::Withheld;
        self
    }

    /// Create API keys whose token is an empty string.
    pub fn with_empty_tokens(mut self) -> Self {
        self.state.get_mut().tokens = TokenIssue::Empty;
        self
    }

    /// Copy of all records.
    pub async fn snapshot(&self) -> PlatformSnapshot {
        self.state.lock().await.data.clone()
    }

    /// Operations received so far, in order.
    pub async fn journal(&self) -> Vec<PlatformOp> {
        self.state.lock().await.journal.clone()
    }

    /// Record the call and apply fault injection.
    async fn begin(&self, op: PlatformOp) -> Result<MutexGuard<'_, State>, PlatformError> {
        let mut state = self.state.lock().await;
        state.journal.push(op);
        debug!(op = %op, "in-memory platform call");
        if state.fail_on == Some(op) {
            return Err(PlatformError::Injected(op));
        }
        Ok(state)
    }
}

fn generate_token() -> String {
    let id = ApiKeyId::generate();
    format!("pk_{}", id.as_str().trim_start_matches("apk_").to_lowercase())
}

#[async_trait]
impl CommercePlatform for InMemoryPlatform {
    async fn list_stores(&self) -> Result<Vec<Store>, PlatformError> {
        let state = self.begin(PlatformOp::ListStores).await?;
        Ok(state.data.stores.clone())
    }

    async fn update_store(&self, id: &StoreId, update: StoreUpdate) -> Result<Store, PlatformError> {
        let mut state = self.begin(PlatformOp::UpdateStore).await?;
        let data = &mut state.data;

        if let Some(ref channel) = update.default_sales_channel_id {
            data.check_channels(std::slice::from_ref(channel))?;
        }
        if let Some(ref location) = update.default_location_id {
            data.location_mut(location)?;
        }
        if let Some(ref currencies) = update.supported_currencies {
            if currencies.iter().filter(|c| c.is_default).count() > 1 {
                return Err(PlatformError::rejected(
                    PlatformOp::UpdateStore,
                    "only one default currency is allowed",
                ));
            }
        }

        let store = data
            .stores
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| PlatformError::not_found("Store", id))?;

        if let Some(currencies) = update.supported_currencies {
            store.supported_currencies = currencies;
        }
        if let Some(channel) = update.default_sales_channel_id {
            store.default_sales_channel_id = Some(channel);
        }
        if let Some(location) = update.default_location_id {
            store.default_location_id = Some(location);
        }
        Ok(store.clone())
    }

    async fn list_sales_channels(
        &self,
        filter: &SalesChannelFilter,
    ) -> Result<Vec<SalesChannel>, PlatformError> {
        let state = self.begin(PlatformOp::ListSalesChannels).await?;
        Ok(state
            .data
            .sales_channels
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn create_sales_channels(
        &self,
        channels: Vec<CreateSalesChannel>,
    ) -> Result<Vec<SalesChannel>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateSalesChannels).await?;
        let created: Vec<SalesChannel> = channels
            .into_iter()
            .map(|input| SalesChannel {
                description: input.description,
                ..SalesChannel::new(input.name)
            })
            .collect();
        state.data.sales_channels.extend(created.iter().cloned());
        Ok(created)
    }

    async fn create_regions(&self, regions: Vec<CreateRegion>) -> Result<Vec<Region>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateRegions).await?;
        let created: Vec<Region> = regions
            .into_iter()
            .map(|input| Region {
                id: RegionId::generate(),
                name: input.name,
                currency_code: input.currency_code,
                countries: input.countries.iter().map(|c| c.to_lowercase()).collect(),
                payment_providers: input.payment_providers,
            })
            .collect();
        state.data.regions.extend(created.iter().cloned());
        Ok(created)
    }

    async fn create_tax_regions(
        &self,
        tax_regions: Vec<CreateTaxRegion>,
    ) -> Result<Vec<TaxRegion>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateTaxRegions).await?;
        let created: Vec<TaxRegion> = tax_regions
            .into_iter()
            .map(|input| TaxRegion {
                id: TaxRegionId::generate(),
                country_code: input.country_code.to_lowercase(),
                provider_id: input.provider_id,
            })
            .collect();
        state.data.tax_regions.extend(created.iter().cloned());
        Ok(created)
    }

    async fn create_stock_locations(
        &self,
        locations: Vec<CreateStockLocation>,
    ) -> Result<Vec<StockLocation>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateStockLocations).await?;
        let created: Vec<StockLocation> = locations
            .into_iter()
            .map(|input| StockLocation::new(input.name, input.address))
            .collect();
        state.data.stock_locations.extend(created.iter().cloned());
        Ok(created)
    }

    async fn link_fulfillment_provider(
        &self,
        location: &StockLocationId,
        provider_id: &str,
    ) -> Result<(), PlatformError> {
        let mut state = self.begin(PlatformOp::LinkFulfillmentProvider).await?;
        let location = state.data.location_mut(location)?;
        if !location.fulfillment_provider_ids.iter().any(|p| p == provider_id) {
            location.fulfillment_provider_ids.push(provider_id.to_string());
        }
        Ok(())
    }

    async fn list_shipping_profiles(
        &self,
        filter: &ShippingProfileFilter,
    ) -> Result<Vec<ShippingProfile>, PlatformError> {
        let state = self.begin(PlatformOp::ListShippingProfiles).await?;
        Ok(state
            .data
            .shipping_profiles
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn create_shipping_profiles(
        &self,
        profiles: Vec<CreateShippingProfile>,
    ) -> Result<Vec<ShippingProfile>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateShippingProfiles).await?;
        let created: Vec<ShippingProfile> = profiles
            .into_iter()
            .map(|input| ShippingProfile {
                id: ShippingProfileId::generate(),
                name: input.name,
                profile_type: input.profile_type,
            })
            .collect();
        state.data.shipping_profiles.extend(created.iter().cloned());
        Ok(created)
    }

    async fn create_fulfillment_set(
        &self,
        location: &StockLocationId,
        set: CreateFulfillmentSet,
    ) -> Result<FulfillmentSet, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateFulfillmentSet).await?;

        let created = FulfillmentSet {
            id: FulfillmentSetId::generate(),
            name: set.name,
            set_type: set.set_type,
            service_zones: set
                .service_zones
                .into_iter()
                .map(|zone| ServiceZone {
                    id: ServiceZoneId::generate(),
                    name: zone.name,
                    geo_zones: zone.geo_zones,
                })
                .collect(),
        };

        state
            .data
            .location_mut(location)?
            .fulfillment_set_ids
            .push(created.id.clone());
        state.data.fulfillment_sets.push(created.clone());
        Ok(created)
    }

    async fn create_shipping_options(
        &self,
        options: Vec<CreateShippingOption>,
    ) -> Result<Vec<ShippingOption>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateShippingOptions).await?;
        let data = &mut state.data;

        for input in &options {
            if !data.has_service_zone(&input.service_zone_id) {
                return Err(PlatformError::not_found("Service zone", &input.service_zone_id));
            }
            if !data
                .shipping_profiles
                .iter()
                .any(|p| p.id == input.shipping_profile_id)
            {
                return Err(PlatformError::not_found(
                    "Shipping profile",
                    &input.shipping_profile_id,
                ));
            }
            for price in &input.prices {
                if let PriceTarget::Region { region_id } = &price.target {
                    if !data.regions.iter().any(|r| &r.id == region_id) {
                        return Err(PlatformError::not_found("Region", region_id));
                    }
                }
            }
        }

        let created: Vec<ShippingOption> = options
            .into_iter()
            .map(|input| ShippingOption {
                id: ShippingOptionId::generate(),
                name: input.name,
                price_type: input.price_type,
                provider_id: Some(input.provider_id),
                service_zone_id: Some(input.service_zone_id),
                shipping_profile_id: Some(input.shipping_profile_id),
                option_type: input.option_type,
                prices: input.prices,
                rules: input.rules,
            })
            .collect();
        data.shipping_options.extend(created.iter().cloned());
        Ok(created)
    }

    async fn link_sales_channels_to_location(
        &self,
        location: &StockLocationId,
        channels: &[SalesChannelId],
    ) -> Result<(), PlatformError> {
        let mut state = self.begin(PlatformOp::LinkSalesChannelsToLocation).await?;
        state.data.check_channels(channels)?;
        let location = state.data.location_mut(location)?;
        for channel in channels {
            if !location.sales_channel_ids.contains(channel) {
                location.sales_channel_ids.push(channel.clone());
            }
        }
        Ok(())
    }

    async fn create_api_keys(&self, keys: Vec<CreateApiKey>) -> Result<Vec<ApiKey>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateApiKeys).await?;
        let tokens = state.tokens;
        let created: Vec<ApiKey> = keys
            .into_iter()
            .map(|input| ApiKey {
                id: ApiKeyId::generate(),
                title: input.title,
                key_type: input.key_type,
                token: tokens.issue(),
                created_by: input.created_by,
                sales_channel_ids: Vec::new(),
                created_at: chrono::Utc::now(),
            })
            .collect();
        state.data.api_keys.extend(created.iter().cloned());
        Ok(created)
    }

    async fn link_sales_channels_to_api_key(
        &self,
        key: &ApiKeyId,
        channels: &[SalesChannelId],
    ) -> Result<(), PlatformError> {
        let mut state = self.begin(PlatformOp::LinkSalesChannelsToApiKey).await?;
        state.data.check_channels(channels)?;
        let key = state
            .data
            .api_keys
            .iter_mut()
            .find(|k| &k.id == key)
            .ok_or_else(|| PlatformError::not_found("API key", key))?;
        if key.key_type != ApiKeyType::Publishable {
            return Err(PlatformError::rejected(
                PlatformOp::LinkSalesChannelsToApiKey,
                "sales channels can only be linked to publishable keys",
            ));
        }
        for channel in channels {
            if !key.sales_channel_ids.contains(channel) {
                key.sales_channel_ids.push(channel.clone());
            }
        }
        Ok(())
    }

    async fn create_product_categories(
        &self,
        categories: Vec<CreateProductCategory>,
    ) -> Result<Vec<ProductCategory>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateProductCategories).await?;
        let created: Vec<ProductCategory> = categories
            .into_iter()
            .map(|input| {
                let mut category = ProductCategory::new_root(input.name, input.is_active);
                if let Some(handle) = input.handle {
                    category.handle = handle;
                }
                category
            })
            .collect();
        state.data.product_categories.extend(created.iter().cloned());
        Ok(created)
    }

    async fn create_products(
        &self,
        products: Vec<CreateProduct>,
    ) -> Result<Vec<Product>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateProducts).await?;
        let data = &mut state.data;

        let mut created = Vec::with_capacity(products.len());
        for input in products {
            for category in &input.category_ids {
                if !data.product_categories.iter().any(|c| &c.id == category) {
                    return Err(PlatformError::not_found("Product category", category));
                }
            }
            if let Some(ref profile) = input.shipping_profile_id {
                if !data.shipping_profiles.iter().any(|p| &p.id == profile) {
                    return Err(PlatformError::not_found("Shipping profile", profile));
                }
            }
            data.check_channels(&input.sales_channel_ids)?;

            let product = Product {
                id: ProductId::generate(),
                title: input.title,
                handle: input.handle,
                description: input.description,
                weight: input.weight,
                status: input.status,
                category_ids: input.category_ids,
                shipping_profile_id: input.shipping_profile_id,
                images: input.images,
                options: input.options,
                variants: input
                    .variants
                    .into_iter()
                    .map(|v| ProductVariant {
                        id: VariantId::generate(),
                        title: v.title,
                        sku: v.sku,
                        options: v.options,
                        prices: v.prices,
                        manage_inventory: v.manage_inventory,
                        inventory_item_id: None,
                    })
                    .collect(),
                sales_channel_ids: input.sales_channel_ids,
            };
            product
                .validate()
                .map_err(|e| PlatformError::rejected(PlatformOp::CreateProducts, e.to_string()))?;
            created.push(product);
        }

        for product in &mut created {
            for variant in product.variants.iter_mut().filter(|v| v.manage_inventory) {
                let item = InventoryItem {
                    id: InventoryItemId::generate(),
                    sku: variant.sku.clone(),
                };
                variant.inventory_item_id = Some(item.id.clone());
                data.inventory_items.push(item);
            }
        }

        data.products.extend(created.iter().cloned());
        Ok(created)
    }

    async fn list_inventory_items(&self) -> Result<Vec<InventoryItem>, PlatformError> {
        let state = self.begin(PlatformOp::ListInventoryItems).await?;
        Ok(state.data.inventory_items.clone())
    }

    async fn create_inventory_levels(
        &self,
        levels: Vec<CreateInventoryLevel>,
    ) -> Result<Vec<InventoryLevel>, PlatformError> {
        let mut state = self.begin(PlatformOp::CreateInventoryLevels).await?;
        let data = &mut state.data;

        for input in &levels {
            if !data.inventory_items.iter().any(|i| i.id == input.inventory_item_id) {
                return Err(PlatformError::not_found("Inventory item", &input.inventory_item_id));
            }
            data.location_mut(&input.location_id)?;
            let duplicate = data.inventory_levels.iter().any(|l| {
                l.inventory_item_id == input.inventory_item_id && l.location_id == input.location_id
            });
            if duplicate {
                return Err(PlatformError::rejected(
                    PlatformOp::CreateInventoryLevels,
                    format!(
                        "item {} already stocked at {}",
                        input.inventory_item_id, input.location_id
                    ),
                ));
            }
        }

        let created: Vec<InventoryLevel> = levels
            .into_iter()
            .map(|input| {
                InventoryLevel::new(
                    input.inventory_item_id,
                    input.location_id,
                    input.stocked_quantity,
                )
            })
            .collect();
        data.inventory_levels.extend(created.iter().cloned());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_platform_has_one_store() {
        let platform = InMemoryPlatform::new();
        let stores = platform.list_stores().await.unwrap();
        assert_eq!(stores.len(), 1);
        assert!(stores[0].supported_currencies.is_empty());
        assert_eq!(platform.journal().await, vec![PlatformOp::ListStores]);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let platform = InMemoryPlatform::new().fail_on(PlatformOp::CreateRegions);
        let err = platform
            .create_regions(vec![CreateRegion {
                name: "United States".to_string(),
                currency_code: Currency::USD,
                countries: vec!["us".to_string()],
                payment_providers: Vec::new(),
            }])
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::Injected(PlatformOp::CreateRegions)));
        assert!(platform.snapshot().await.regions.is_empty());
    }

    #[tokio::test]
    async fn test_link_to_unknown_location_fails() {
        let platform = InMemoryPlatform::new();
        let err = platform
            .link_fulfillment_provider(&StockLocationId::new("sloc_missing"), "manual_manual")
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::NotFound { entity: "Stock location", .. }));
    }

    #[tokio::test]
    async fn test_products_create_inventory_items() {
        let platform = InMemoryPlatform::new();
        let products = platform
            .create_products(vec![CreateProduct {
                title: "Lavanda".to_string(),
                handle: "lavanda".to_string(),
                description: None,
                weight: Some(900),
                status: ProductStatus::Published,
                category_ids: Vec::new(),
                shipping_profile_id: None,
                images: Vec::new(),
                options: vec![ProductOption {
                    title: "Formato".to_string(),
                    values: vec!["Maceta 12 cm".to_string()],
                }],
                variants: vec![CreateProductVariant {
                    title: "Maceta 12 cm".to_string(),
                    sku: Some("PLANT-LAVANDA-12".to_string()),
                    options: [("Formato".to_string(), "Maceta 12 cm".to_string())].into(),
                    prices: vec![Money::new(1599, Currency::USD)],
                    manage_inventory: true,
                }],
                sales_channel_ids: Vec::new(),
            }])
            .await
            .unwrap();

        let items = platform.list_inventory_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku.as_deref(), Some("PLANT-LAVANDA-12"));
        assert_eq!(
            products[0].variants[0].inventory_item_id.as_ref(),
            Some(&items[0].id)
        );
    }
}
