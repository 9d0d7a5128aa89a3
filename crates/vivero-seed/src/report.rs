//! Seed run report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vivero_commerce::prelude::*;

/// Identifiers of everything a run created or reused.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub store_id: StoreId,
    pub sales_channel_id: SalesChannelId,
    /// True when the default sales channel already existed.
    pub sales_channel_reused: bool,
    pub region_ids: Vec<RegionId>,
    pub tax_region_ids: Vec<TaxRegionId>,
    pub stock_location_id: StockLocationId,
    pub shipping_profile_id: ShippingProfileId,
    /// True when a profile of the configured type already existed.
    pub shipping_profile_reused: bool,
    pub fulfillment_set_id: FulfillmentSetId,
    pub service_zone_id: ServiceZoneId,
    pub shipping_option_ids: Vec<ShippingOptionId>,
    pub publishable_key_id: ApiKeyId,
    /// Token, or the key id when the platform returned none.
    pub publishable_key_token: String,
    /// Where the token was written, if it was.
    pub key_file: Option<PathBuf>,
    pub category_ids: Vec<CategoryId>,
    pub product_ids: Vec<ProductId>,
    pub inventory_levels: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SeedReport {
    /// Wall-clock duration of the run.
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// One-line summary of created record counts.
    pub fn summary(&self) -> String {
        format!(
            "{} region(s), {} shipping option(s), {} categor{}, {} product(s), {} inventory level(s)",
            self.region_ids.len(),
            self.shipping_option_ids.len(),
            self.category_ids.len(),
            if self.category_ids.len() == 1 { "y" } else { "ies" },
            self.product_ids.len(),
            self.inventory_levels,
        )
    }
}
