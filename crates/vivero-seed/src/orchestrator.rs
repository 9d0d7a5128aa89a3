//! Seed orchestration.
//!
//! Fourteen steps run strictly in order, each consuming identifiers produced
//! by earlier ones. The first failure aborts the run; nothing is rolled back.
//! The default sales channel and shipping profile are looked up before they
//! are created, everything else is created unconditionally.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
use vivero_commerce::prelude::*;
use vivero_platform::{
    ensure_sales_channel, ensure_shipping_profile, CommercePlatform, CreateApiKey,
    CreateFulfillmentSet, CreateInventoryLevel, CreateProduct, CreateProductCategory,
    CreateProductVariant, CreateServiceZone, CreateShippingOption, CreateStockLocation,
    CreateTaxRegion, PlatformError, PlatformOp, StoreUpdate,
};

use crate::data::SeedData;
use crate::error::SeedError;
use crate::export::export_publishable_key;
use crate::report::SeedReport;

/// The steps of a seed run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStep {
    SalesChannel,
    StoreSettings,
    Regions,
    TaxRegions,
    StockLocation,
    ShippingProfile,
    FulfillmentSet,
    ShippingOptions,
    LocationSalesChannel,
    PublishableKey,
    KeyExport,
    Categories,
    Products,
    InventoryLevels,
}

impl SeedStep {
    pub const ALL: [SeedStep; 14] = [
        SeedStep::SalesChannel,
        SeedStep::StoreSettings,
        SeedStep::Regions,
        SeedStep::TaxRegions,
        SeedStep::StockLocation,
        SeedStep::ShippingProfile,
        SeedStep::FulfillmentSet,
        SeedStep::ShippingOptions,
        SeedStep::LocationSalesChannel,
        SeedStep::PublishableKey,
        SeedStep::KeyExport,
        SeedStep::Categories,
        SeedStep::Products,
        SeedStep::InventoryLevels,
    ];

    /// One-based position in the run.
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map_or(0, |i| i + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeedStep::SalesChannel => "default sales channel",
            SeedStep::StoreSettings => "store currencies and sales channel",
            SeedStep::Regions => "regions",
            SeedStep::TaxRegions => "tax regions",
            SeedStep::StockLocation => "stock location",
            SeedStep::ShippingProfile => "shipping profile",
            SeedStep::FulfillmentSet => "fulfillment set",
            SeedStep::ShippingOptions => "shipping options",
            SeedStep::LocationSalesChannel => "stock location sales channel",
            SeedStep::PublishableKey => "publishable API key",
            SeedStep::KeyExport => "publishable key export",
            SeedStep::Categories => "product categories",
            SeedStep::Products => "products",
            SeedStep::InventoryLevels => "inventory levels",
        }
    }
}

impl std::fmt::Display for SeedStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives step progress. Both methods default to doing nothing.
pub trait SeedObserver: Send + Sync {
    fn step_started(&self, _step: SeedStep) {}

    fn step_finished(&self, _step: SeedStep) {}
}

struct Silent;

impl SeedObserver for Silent {}

/// Runs the seed sequence against a platform.
pub struct Seeder<'a> {
    platform: &'a dyn CommercePlatform,
    data: SeedData,
    key_file: Option<PathBuf>,
    observer: &'a dyn SeedObserver,
}

impl<'a> Seeder<'a> {
    pub fn new(platform: &'a dyn CommercePlatform, data: SeedData) -> Self {
        Self {
            platform,
            data,
            key_file: None,
            observer: &Silent,
        }
    }

    /// Write the publishable key token to this path after it is created.
    pub fn key_file(mut self, path: Option<PathBuf>) -> Self {
        self.key_file = path;
        self
    }

    pub fn observer(mut self, observer: &'a dyn SeedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn data(&self) -> &SeedData {
        &self.data
    }

    fn begin(&self, step: SeedStep) {
        debug!(step = step.number(), label = step.label(), "step started");
        self.observer.step_started(step);
    }

    fn finish(&self, step: SeedStep) {
        self.observer.step_finished(step);
    }

    /// Execute every step in order.
    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        let started_at = Utc::now();
        let data = &self.data;
        let platform = self.platform;
        data.validate()?;

        info!("Seeding store data...");
        let store = platform
            .list_stores()
            .await?
            .into_iter()
            .next()
            .ok_or(SeedError::NoStore)?;

        // 1
        let step = SeedStep::SalesChannel;
        self.begin(step);
        let channel = ensure_sales_channel(platform, &data.store.sales_channel)
            .await
            .map_err(|e| SeedError::at(step, e))?;
        let sales_channel_reused = !channel.created;
        let channel = channel.into_inner();
        self.finish(step);

        // 2
        let step = SeedStep::StoreSettings;
        self.begin(step);
        platform
            .update_store(
                &store.id,
                StoreUpdate::supported_currencies(data.store.supported_currencies.clone()),
            )
            .await
            .map_err(|e| SeedError::at(step, e))?;
        platform
            .update_store(&store.id, StoreUpdate::default_sales_channel(channel.id.clone()))
            .await
            .map_err(|e| SeedError::at(step, e))?;
        self.finish(step);

        // 3
        let step = SeedStep::Regions;
        self.begin(step);
        info!("Seeding region data...");
        let regions = platform
            .create_regions(data.regions.clone())
            .await
            .map_err(|e| SeedError::at(step, e))?;
        info!("Finished seeding regions.");
        self.finish(step);

        // 4
        let step = SeedStep::TaxRegions;
        self.begin(step);
        info!("Seeding tax regions...");
        let tax_regions = platform
            .create_tax_regions(
                data.countries
                    .iter()
                    .map(|country| CreateTaxRegion {
                        country_code: country.clone(),
                        provider_id: data.tax.provider_id.clone(),
                    })
                    .collect(),
            )
            .await
            .map_err(|e| SeedError::at(step, e))?;
        info!("Finished seeding tax regions.");
        self.finish(step);

        // 5
        let step = SeedStep::StockLocation;
        self.begin(step);
        info!("Seeding stock location data...");
        let location = self
            .stock_location()
            .await
            .map_err(|e| SeedError::at(step, e))?;
        platform
            .update_store(&store.id, StoreUpdate::default_location(location.id.clone()))
            .await
            .map_err(|e| SeedError::at(step, e))?;
        platform
            .link_fulfillment_provider(&location.id, &data.stock_location.fulfillment_provider)
            .await
            .map_err(|e| SeedError::at(step, e))?;
        self.finish(step);

        // 6
        let step = SeedStep::ShippingProfile;
        self.begin(step);
        info!("Seeding fulfillment data...");
        let profile = ensure_shipping_profile(
            platform,
            &data.shipping_profile.name,
            &data.shipping_profile.profile_type,
        )
        .await
        .map_err(|e| SeedError::at(step, e))?;
        let shipping_profile_reused = !profile.created;
        let profile = profile.into_inner();
        self.finish(step);

        // 7
        let step = SeedStep::FulfillmentSet;
        self.begin(step);
        let fulfillment_set = platform
            .create_fulfillment_set(
                &location.id,
                CreateFulfillmentSet {
                    name: data.fulfillment_set.name.clone(),
                    set_type: data.fulfillment_set.set_type,
                    service_zones: vec![CreateServiceZone {
                        name: data.fulfillment_set.zone.clone(),
                        geo_zones: data.countries.iter().map(GeoZone::country).collect(),
                    }],
                },
            )
            .await
            .map_err(|e| SeedError::at(step, e))?;
        let zone = fulfillment_set
            .primary_zone()
            .cloned()
            .ok_or_else(|| {
                SeedError::at(
                    step,
                    PlatformError::EmptyResult {
                        op: PlatformOp::CreateFulfillmentSet,
                    },
                )
            })?;
        self.finish(step);

        // 8
        let step = SeedStep::ShippingOptions;
        self.begin(step);
        let options = platform
            .create_shipping_options(self.shipping_options(&zone.id, &profile.id, &regions))
            .await
            .map_err(|e| SeedError::at(step, e))?;
        info!("Finished seeding fulfillment data.");
        self.finish(step);

        // 9
        let step = SeedStep::LocationSalesChannel;
        self.begin(step);
        platform
            .link_sales_channels_to_location(&location.id, std::slice::from_ref(&channel.id))
            .await
            .map_err(|e| SeedError::at(step, e))?;
        info!("Finished seeding stock location data.");
        self.finish(step);

        // 10
        let step = SeedStep::PublishableKey;
        self.begin(step);
        info!("Seeding publishable API key data...");
        let key = self
            .publishable_key(&channel.id)
            .await
            .map_err(|e| SeedError::at(step, e))?;
        self.finish(step);

        // 11
        let step = SeedStep::KeyExport;
        self.begin(step);
        let token = key.export_token().to_string();
        let key_file = match self.key_file.as_deref() {
            Some(path) if !token.is_empty() => {
                export_publishable_key(&token, path)
                    .await
                    .map_err(|e| SeedError::at(step, e))?;
                info!("Publishable API key written to {}", path.display());
                Some(path.to_path_buf())
            }
            _ => None,
        };
        info!("Finished seeding publishable API key data.");
        self.finish(step);

        // 12
        let step = SeedStep::Categories;
        self.begin(step);
        info!("Seeding product data...");
        let categories = platform
            .create_product_categories(
                data.categories
                    .iter()
                    .map(|c| CreateProductCategory {
                        name: c.name.clone(),
                        is_active: c.is_active,
                        handle: None,
                    })
                    .collect(),
            )
            .await
            .map_err(|e| SeedError::at(step, e))?;
        self.finish(step);

        // 13
        let step = SeedStep::Products;
        self.begin(step);
        let products = self
            .create_products(&categories, &profile.id, &channel.id)
            .await
            .map_err(|e| SeedError::at(step, e))?;
        info!("Finished seeding product data.");
        self.finish(step);

        // 14
        let step = SeedStep::InventoryLevels;
        self.begin(step);
        info!("Seeding inventory levels.");
        let levels = self
            .inventory_levels(&location.id)
            .await
            .map_err(|e| SeedError::at(step, e))?;
        info!("Finished seeding inventory levels data.");
        self.finish(step);

        Ok(SeedReport {
            store_id: store.id,
            sales_channel_id: channel.id,
            sales_channel_reused,
            region_ids: regions.into_iter().map(|r| r.id).collect(),
            tax_region_ids: tax_regions.into_iter().map(|t| t.id).collect(),
            stock_location_id: location.id,
            shipping_profile_id: profile.id,
            shipping_profile_reused,
            fulfillment_set_id: fulfillment_set.id,
            service_zone_id: zone.id,
            shipping_option_ids: options.into_iter().map(|o| o.id).collect(),
            publishable_key_id: key.id,
            publishable_key_token: token,
            key_file,
            category_ids: categories.into_iter().map(|c| c.id).collect(),
            product_ids: products.into_iter().map(|p| p.id).collect(),
            inventory_levels: levels,
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn stock_location(&self) -> Result<StockLocation, SeedError> {
        let seed = &self.data.stock_location;
        self.platform
            .create_stock_locations(vec![CreateStockLocation {
                name: seed.name.clone(),
                address: Some(seed.address.clone()),
            }])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PlatformError::EmptyResult {
                    op: PlatformOp::CreateStockLocations,
                }
                .into()
            })
    }

    fn shipping_options(
        &self,
        zone: &ServiceZoneId,
        profile: &ShippingProfileId,
        regions: &[Region],
    ) -> Vec<CreateShippingOption> {
        self.data
            .shipping_options
            .iter()
            .map(|option| {
                let mut prices = vec![ShippingPrice::for_currency(option.currency_code, option.amount)];
                prices.extend(
                    regions
                        .iter()
                        .map(|r| ShippingPrice::for_region(r.id.clone(), option.amount)),
                );
                CreateShippingOption {
                    name: option.name.clone(),
                    price_type: ShippingPriceType::Flat,
                    provider_id: option.provider_id.clone(),
                    service_zone_id: zone.clone(),
                    shipping_profile_id: profile.clone(),
                    option_type: option.option_type.clone(),
                    prices,
                    rules: option.rules.clone(),
                }
            })
            .collect()
    }

    async fn publishable_key(&self, channel: &SalesChannelId) -> Result<ApiKey, SeedError> {
        let seed = &self.data.api_key;
        let key = self
            .platform
            .create_api_keys(vec![CreateApiKey {
                title: seed.title.clone(),
                key_type: seed.key_type,
                created_by: seed.created_by.clone(),
            }])
            .await?
            .into_iter()
            .next()
            .ok_or(PlatformError::EmptyResult {
                op: PlatformOp::CreateApiKeys,
            })?;

        self.platform
            .link_sales_channels_to_api_key(&key.id, std::slice::from_ref(channel))
            .await?;
        Ok(key)
    }

    async fn create_products(
        &self,
        categories: &[ProductCategory],
        profile: &ShippingProfileId,
        channel: &SalesChannelId,
    ) -> Result<Vec<Product>, SeedError> {
        let mut inputs = Vec::with_capacity(self.data.products.len());
        for product in &self.data.products {
            let category = find_category(categories, &product.category)?;
            inputs.push(CreateProduct {
                title: product.title.clone(),
                handle: product.handle.clone(),
                description: product.description.clone(),
                weight: product.weight,
                status: product.status,
                category_ids: vec![category.id.clone()],
                shipping_profile_id: Some(profile.clone()),
                images: product
                    .images
                    .iter()
                    .map(|url| ProductImage { url: url.clone() })
                    .collect(),
                options: product.options.clone(),
                variants: product
                    .variants
                    .iter()
                    .map(|v| CreateProductVariant {
                        title: v.title.clone(),
                        sku: v.sku.clone(),
                        options: v.options.clone(),
                        prices: v.prices.clone(),
                        manage_inventory: v.manage_inventory,
                    })
                    .collect(),
                sales_channel_ids: vec![channel.clone()],
            });
        }

        Ok(self.platform.create_products(inputs).await?)
    }

    /// Stock every inventory item the platform knows about at `location`.
    async fn inventory_levels(&self, location: &StockLocationId) -> Result<usize, SeedError> {
        let items = self.platform.list_inventory_items().await?;
        let levels: Vec<CreateInventoryLevel> = items
            .into_iter()
            .map(|item| CreateInventoryLevel {
                inventory_item_id: item.id,
                location_id: location.clone(),
                stocked_quantity: self.data.inventory.stocked_quantity,
            })
            .collect();

        let created = self.platform.create_inventory_levels(levels).await?;
        Ok(created.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers() {
        assert_eq!(SeedStep::SalesChannel.number(), 1);
        assert_eq!(SeedStep::KeyExport.number(), 11);
        assert_eq!(SeedStep::InventoryLevels.number(), 14);
    }

    #[test]
    fn test_step_error_message() {
        let err = SeedError::at(
            SeedStep::Products,
            CommerceError::CategoryNotFound("Plantas de interior".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Step 13 (products) failed: Category not found: Plantas de interior"
        );
        assert_eq!(err.step(), Some(SeedStep::Products));
    }
}
