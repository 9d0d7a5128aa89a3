//! Fulfillment sets, service zones and geo zones.

use serde::{Deserialize, Serialize};

use crate::ids::{FulfillmentSetId, ServiceZoneId};

/// Kind of fulfillment a set provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentSetType {
    #[default]
    Shipping,
    Pickup,
}

impl FulfillmentSetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentSetType::Shipping => "shipping",
            FulfillmentSetType::Pickup => "pickup",
        }
    }
}

/// Granularity of a geo zone matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeoZoneType {
    #[default]
    Country,
    Province,
    City,
    Zip,
}

/// A geographic matcher inside a service zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoZone {
    #[serde(rename = "type")]
    pub zone_type: GeoZoneType,
    pub country_code: String,
}

impl GeoZone {
    /// Match a whole country.
    pub fn country(country_code: impl Into<String>) -> Self {
        Self {
            zone_type: GeoZoneType::Country,
            country_code: country_code.into(),
        }
    }
}

/// A delivery area, made of geo zones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceZone {
    pub id: ServiceZoneId,
    pub name: String,
    #[serde(default)]
    pub geo_zones: Vec<GeoZone>,
}

impl ServiceZone {
    /// Check whether any geo zone covers a country.
    pub fn covers_country(&self, country_code: &str) -> bool {
        self.geo_zones
            .iter()
            .any(|z| z.country_code.eq_ignore_ascii_case(country_code))
    }
}

/// Delivery capability grouped by geography.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FulfillmentSet {
    pub id: FulfillmentSetId,
    pub name: String,
    #[serde(rename = "type")]
    pub set_type: FulfillmentSetType,
    /// Service zones in creation order.
    #[serde(default)]
    pub service_zones: Vec<ServiceZone>,
}

impl FulfillmentSet {
    /// First service zone, where shipping options are attached.
    pub fn primary_zone(&self) -> Option<&ServiceZone> {
        self.service_zones.first()
    }

    /// Find the zone serving a country.
    pub fn zone_for_country(&self, country_code: &str) -> Option<&ServiceZone> {
        self.service_zones
            .iter()
            .find(|z| z.covers_country(country_code))
    }
}
