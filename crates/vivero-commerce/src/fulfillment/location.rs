//! Stock locations.

use serde::{Deserialize, Serialize};

use crate::ids::{FulfillmentSetId, SalesChannelId, StockLocationId};

/// A postal address of a stock location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    /// Address line 1.
    pub address_1: String,
    /// Address line 2 (suite, unit, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,
    /// City.
    pub city: String,
    /// Country code (e.g., "US").
    pub country_code: String,
    /// Postal/ZIP code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address_1.clone()];
        if let Some(ref line2) = self.address_2 {
            parts.push(line2.clone());
        }
        parts.push(self.city.clone());
        if let Some(ref postal) = self.postal_code {
            parts.push(postal.clone());
        }
        parts.push(self.country_code.to_uppercase());
        parts.join(", ")
    }
}

/// A place inventory is stocked and shipped from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockLocation {
    pub id: StockLocationId,
    pub name: String,
    pub address: Option<Address>,
    /// Fulfillment providers enabled at this location.
    #[serde(default)]
    pub fulfillment_provider_ids: Vec<String>,
    #[serde(default)]
    pub fulfillment_set_ids: Vec<FulfillmentSetId>,
    #[serde(default)]
    pub sales_channel_ids: Vec<SalesChannelId>,
}

impl StockLocation {
    /// Create an unlinked location.
    pub fn new(name: impl Into<String>, address: Option<Address>) -> Self {
        Self {
            id: StockLocationId::generate(),
            name: name.into(),
            address,
            fulfillment_provider_ids: Vec::new(),
            fulfillment_set_ids: Vec::new(),
            sales_channel_ids: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_one_line() {
        let address = Address {
            address_1: "1200 Greenhouse Ave".to_string(),
            city: "Miami".to_string(),
            country_code: "us".to_string(),
            ..Default::default()
        };
        assert_eq!(address.one_line(), "1200 Greenhouse Ave, Miami, US");
    }
}
