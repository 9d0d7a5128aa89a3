//! Commerce domain types for the Vivero storefront and seeder.
//!
//! These are the records owned by the commerce platform. The seeder only
//! references them, so the types carry identity and the handful of rules
//! the storefront relies on:
//!
//! - **Store**: store settings, sales channels, publishable API keys
//! - **Regions**: regions and tax regions
//! - **Fulfillment**: stock locations, fulfillment sets, shipping profiles and options
//! - **Catalog**: categories, products, variants, inventory
//!
//! # Example
//!
//! ```rust
//! use vivero_commerce::prelude::*;
//!
//! let ctx = PriceContext::new(Currency::USD);
//! let option = ShippingOption::flat(
//!     "Envio estandar",
//!     ShippingOptionType::new("Estandar", "standard"),
//!     vec![ShippingPrice::for_currency(Currency::USD, 900)],
//! );
//! assert_eq!(option.price_for(&ctx).map(|m| m.amount), Some(900));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod fulfillment;
pub mod region;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Store
    pub use crate::store::{ApiKey, ApiKeyType, SalesChannel, Store, SupportedCurrency};

    // Regions
    pub use crate::region::{Region, TaxRegion};

    // Fulfillment
    pub use crate::fulfillment::{
        Address, FulfillmentSet, FulfillmentSetType, GeoZone, GeoZoneType, PriceContext,
        PriceTarget, RuleOperator, ServiceZone, ShippingOption, ShippingOptionType,
        ShippingPrice, ShippingPriceType, ShippingProfile, ShippingRule, StockLocation,
    };

    // Catalog
    pub use crate::catalog::{
        find_category, InventoryItem, InventoryLevel, Product, ProductCategory, ProductImage,
        ProductOption, ProductStatus, ProductVariant,
    };
}
