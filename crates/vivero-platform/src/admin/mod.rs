//! Commerce platform over the admin REST API.
//!
//! Creation endpoints take one record per request, so batch inputs are sent
//! sequentially and the first failure aborts the batch.

mod auth;
mod wire;

use async_trait::async_trait;
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use vivero_commerce::prelude::*;

use crate::error::PlatformError;
use crate::input::*;
use crate::platform::{CommercePlatform, PlatformOp};

pub use auth::AdminCredentials;
use auth::Authorization;
use wire::*;

/// Page size used when listing inventory items.
const PAGE_SIZE: usize = 100;

/// A commerce platform reached through its admin API.
pub struct AdminPlatform {
    client: reqwest::Client,
    base_url: String,
    auth: Authorization,
}

impl AdminPlatform {
    /// Authenticate against `base_url` and return a ready platform.
    pub async fn connect(
        base_url: impl Into<String>,
        credentials: AdminCredentials,
    ) -> Result<Self, PlatformError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .user_agent(concat!("vivero/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let auth = auth::authorize(&client, &base_url, credentials).await?;
        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B, T>(
        &self,
        op: PlatformOp,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, PlatformError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(op = %op, method = %method, %url, "admin request");

        let mut request = self.client.request(method, &url).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.auth.apply(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.message)
                .unwrap_or(text);
            return Err(PlatformError::Http {
                status: status.as_u16(),
                url,
                message,
            });
        }

        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        op: PlatformOp,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlatformError> {
        self.send::<(), T>(op, Method::GET, path, query, None).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        op: PlatformOp,
        path: &str,
        body: &B,
    ) -> Result<T, PlatformError> {
        self.send(op, Method::POST, path, &[], Some(body)).await
    }

    /// POST to a link endpoint; the response body is not needed.
    async fn link<T: Serialize>(
        &self,
        op: PlatformOp,
        path: &str,
        ids: &[T],
    ) -> Result<(), PlatformError> {
        self.post::<_, serde_json::Value>(op, path, &AddLinks { add: ids })
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl CommercePlatform for AdminPlatform {
    async fn list_stores(&self) -> Result<Vec<Store>, PlatformError> {
        let page: StoreList = self.get(PlatformOp::ListStores, "/admin/stores", &[]).await?;
        Ok(page.stores)
    }

    async fn update_store(&self, id: &StoreId, update: StoreUpdate) -> Result<Store, PlatformError> {
        let envelope: StoreEnvelope = self
            .post(PlatformOp::UpdateStore, &format!("/admin/stores/{}", id), &update)
            .await?;
        Ok(envelope.store)
    }

    async fn list_sales_channels(
        &self,
        filter: &SalesChannelFilter,
    ) -> Result<Vec<SalesChannel>, PlatformError> {
        let mut query = Vec::new();
        if let Some(ref name) = filter.name {
            query.push(("name", name.clone()));
        }
        let page: SalesChannelList = self
            .get(PlatformOp::ListSalesChannels, "/admin/sales-channels", &query)
            .await?;
        // The name filter is a search on some versions; keep exact matches only.
        Ok(page
            .sales_channels
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect())
    }

    async fn create_sales_channels(
        &self,
        channels: Vec<CreateSalesChannel>,
    ) -> Result<Vec<SalesChannel>, PlatformError> {
        let mut created = Vec::with_capacity(channels.len());
        for channel in &channels {
            let envelope: SalesChannelEnvelope = self
                .post(PlatformOp::CreateSalesChannels, "/admin/sales-channels", channel)
                .await?;
            created.push(envelope.sales_channel);
        }
        Ok(created)
    }

    async fn create_regions(&self, regions: Vec<CreateRegion>) -> Result<Vec<Region>, PlatformError> {
        let mut created = Vec::with_capacity(regions.len());
        for region in &regions {
            let envelope: RegionEnvelope = self
                .post(
                    PlatformOp::CreateRegions,
                    "/admin/regions",
                    &CreateRegionBody::from(region),
                )
                .await?;
            created.push(Region::from(envelope.region));
        }
        Ok(created)
    }

    async fn create_tax_regions(
        &self,
        tax_regions: Vec<CreateTaxRegion>,
    ) -> Result<Vec<TaxRegion>, PlatformError> {
        let mut created = Vec::with_capacity(tax_regions.len());
        for tax_region in &tax_regions {
            let envelope: TaxRegionEnvelope = self
                .post(PlatformOp::CreateTaxRegions, "/admin/tax-regions", tax_region)
                .await?;
            created.push(envelope.tax_region);
        }
        Ok(created)
    }

    async fn create_stock_locations(
        &self,
        locations: Vec<CreateStockLocation>,
    ) -> Result<Vec<StockLocation>, PlatformError> {
        let mut created = Vec::with_capacity(locations.len());
        for location in &locations {
            let envelope: StockLocationEnvelope = self
                .post(PlatformOp::CreateStockLocations, "/admin/stock-locations", location)
                .await?;
            created.push(StockLocation::from(envelope.stock_location));
        }
        Ok(created)
    }

    async fn link_fulfillment_provider(
        &self,
        location: &StockLocationId,
        provider_id: &str,
    ) -> Result<(), PlatformError> {
        self.link(
            PlatformOp::LinkFulfillmentProvider,
            &format!("/admin/stock-locations/{}/fulfillment-providers", location),
            &[provider_id],
        )
        .await
    }

    async fn list_shipping_profiles(
        &self,
        filter: &ShippingProfileFilter,
    ) -> Result<Vec<ShippingProfile>, PlatformError> {
        let mut query = Vec::new();
        if let Some(ref profile_type) = filter.profile_type {
            query.push(("type", profile_type.clone()));
        }
        let page: ShippingProfileList = self
            .get(PlatformOp::ListShippingProfiles, "/admin/shipping-profiles", &query)
            .await?;
        Ok(page
            .shipping_profiles
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect())
    }

    async fn create_shipping_profiles(
        &self,
        profiles: Vec<CreateShippingProfile>,
    ) -> Result<Vec<ShippingProfile>, PlatformError> {
        let mut created = Vec::with_capacity(profiles.len());
        for profile in &profiles {
            let envelope: ShippingProfileEnvelope = self
                .post(PlatformOp::CreateShippingProfiles, "/admin/shipping-profiles", profile)
                .await?;
            created.push(envelope.shipping_profile);
        }
        Ok(created)
    }

    async fn create_fulfillment_set(
        &self,
        location: &StockLocationId,
        set: CreateFulfillmentSet,
    ) -> Result<FulfillmentSet, PlatformError> {
        let op = PlatformOp::CreateFulfillmentSet;
        let path = format!("/admin/stock-locations/{}/fulfillment-sets", location);
        let envelope: StockLocationEnvelope = self
            .send(
                op,
                Method::POST,
                &path,
                &[("fields", "*fulfillment_sets".to_string())],
                Some(&CreateFulfillmentSetBody {
                    name: &set.name,
                    set_type: set.set_type,
                }),
            )
            .await?;

        // Set names are unique per location, so the newest match is ours.
        let mut fulfillment_set = envelope
            .stock_location
            .fulfillment_sets
            .into_iter()
            .rev()
            .find(|s| s.name == set.name)
            .ok_or(PlatformError::EmptyResult { op })?;

        for zone in &set.service_zones {
            let envelope: FulfillmentSetEnvelope = self
                .post(
                    op,
                    &format!("/admin/fulfillment-sets/{}/service-zones", fulfillment_set.id),
                    &CreateServiceZoneBody {
                        name: &zone.name,
                        geo_zones: &zone.geo_zones,
                    },
                )
                .await?;
            fulfillment_set = envelope.fulfillment_set;
        }

        Ok(fulfillment_set)
    }

    async fn create_shipping_options(
        &self,
        options: Vec<CreateShippingOption>,
    ) -> Result<Vec<ShippingOption>, PlatformError> {
        let mut created = Vec::with_capacity(options.len());
        for option in &options {
            let envelope: ShippingOptionEnvelope = self
                .post(PlatformOp::CreateShippingOptions, "/admin/shipping-options", option)
                .await?;
            created.push(ShippingOption::from(envelope.shipping_option));
        }
        Ok(created)
    }

    async fn link_sales_channels_to_location(
        &self,
        location: &StockLocationId,
        channels: &[SalesChannelId],
    ) -> Result<(), PlatformError> {
        self.link(
            PlatformOp::LinkSalesChannelsToLocation,
            &format!("/admin/stock-locations/{}/sales-channels", location),
            channels,
        )
        .await
    }

    async fn create_api_keys(&self, keys: Vec<CreateApiKey>) -> Result<Vec<ApiKey>, PlatformError> {
        let mut created = Vec::with_capacity(keys.len());
        for key in &keys {
            let envelope: ApiKeyEnvelope = self
                .post(PlatformOp::CreateApiKeys, "/admin/api-keys", key)
                .await?;
            created.push(ApiKey::from(envelope.api_key));
        }
        Ok(created)
    }

    async fn link_sales_channels_to_api_key(
        &self,
        key: &ApiKeyId,
        channels: &[SalesChannelId],
    ) -> Result<(), PlatformError> {
        self.link(
            PlatformOp::LinkSalesChannelsToApiKey,
            &format!("/admin/api-keys/{}/sales-channels", key),
            channels,
        )
        .await
    }

    async fn create_product_categories(
        &self,
        categories: Vec<CreateProductCategory>,
    ) -> Result<Vec<ProductCategory>, PlatformError> {
        let mut created = Vec::with_capacity(categories.len());
        for category in &categories {
            let envelope: CategoryEnvelope = self
                .post(
                    PlatformOp::CreateProductCategories,
                    "/admin/product-categories",
                    category,
                )
                .await?;
            created.push(envelope.product_category);
        }
        Ok(created)
    }

    async fn create_products(
        &self,
        products: Vec<CreateProduct>,
    ) -> Result<Vec<Product>, PlatformError> {
        let mut created = Vec::with_capacity(products.len());
        for product in &products {
            let envelope: ProductEnvelope = self
                .post(
                    PlatformOp::CreateProducts,
                    "/admin/products",
                    &CreateProductBody::from(product),
                )
                .await?;
            created.push(Product::from(envelope.product));
        }
        Ok(created)
    }

    async fn list_inventory_items(&self) -> Result<Vec<InventoryItem>, PlatformError> {
        let mut items = Vec::new();
        loop {
            let query = [
                ("limit", PAGE_SIZE.to_string()),
                ("offset", items.len().to_string()),
            ];
            let page: InventoryItemPage = self
                .get(PlatformOp::ListInventoryItems, "/admin/inventory-items", &query)
                .await?;
            let fetched = page.inventory_items.len();
            items.extend(page.inventory_items);
            if fetched == 0 || items.len() >= page.count {
                break;
            }
        }
        Ok(items)
    }

    async fn create_inventory_levels(
        &self,
        levels: Vec<CreateInventoryLevel>,
    ) -> Result<Vec<InventoryLevel>, PlatformError> {
        if levels.is_empty() {
            return Ok(Vec::new());
        }
        let result: LevelBatchResult = self
            .post(
                PlatformOp::CreateInventoryLevels,
                "/admin/inventory-items/location-levels/batch",
                &LevelBatchBody { create: &levels },
            )
            .await?;
        Ok(result.created)
    }
}
