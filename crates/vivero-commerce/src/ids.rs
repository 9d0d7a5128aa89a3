//! Newtype IDs for type-safe identifiers.
//!
//! Every record kind gets its own ID type so a region ID can never be passed
//! where a sales channel ID is expected. Generated IDs carry the same
//! prefixes the platform uses (`sc_`, `reg_`, `prod_`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used for generated IDs.
            pub const PREFIX: &'static str = $prefix;

            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, generate_suffix()))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(StoreId, "store");
define_id!(SalesChannelId, "sc");
define_id!(RegionId, "reg");
define_id!(TaxRegionId, "txreg");
define_id!(StockLocationId, "sloc");
define_id!(FulfillmentSetId, "fuset");
define_id!(ServiceZoneId, "serzo");
define_id!(ShippingProfileId, "sp");
define_id!(ShippingOptionId, "so");
define_id!(ApiKeyId, "apk");
define_id!(CategoryId, "pcat");
define_id!(ProductId, "prod");
define_id!(VariantId, "variant");
define_id!(InventoryItemId, "iitem");
define_id!(InventoryLevelId, "ilev");

/// Generate a unique ID suffix from the clock and a process-wide counter.
fn generate_suffix() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

    format!("{:012X}{:08X}", timestamp, counter)
}
