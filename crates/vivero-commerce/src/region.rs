//! Regions and tax regions.

use serde::{Deserialize, Serialize};

use crate::ids::{RegionId, TaxRegionId};
use crate::money::Currency;

/// A selling region: one currency over a set of countries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub currency_code: Currency,
    /// Lowercase ISO 3166-1 alpha-2 codes.
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub payment_providers: Vec<String>,
}

impl Region {
    /// Check whether a country belongs to this region.
    pub fn covers(&self, country_code: &str) -> bool {
        self.countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country_code))
    }
}

/// Tax configuration for a single country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRegion {
    pub id: TaxRegionId,
    pub country_code: String,
    pub provider_id: String,
}
