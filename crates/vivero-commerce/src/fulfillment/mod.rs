//! Fulfillment module.
//!
//! Stock locations, fulfillment sets with their service zones, shipping
//! profiles and shipping options.

mod location;
mod shipping;
mod zone;

pub use location::{Address, StockLocation};
pub use shipping::{
    PriceContext, PriceTarget, RuleOperator, ShippingOption, ShippingOptionType, ShippingPrice,
    ShippingPriceType, ShippingProfile, ShippingRule,
};
pub use zone::{FulfillmentSet, FulfillmentSetType, GeoZone, GeoZoneType, ServiceZone};
