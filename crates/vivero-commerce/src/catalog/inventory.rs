//! Inventory tracking types.

use serde::{Deserialize, Serialize};

use crate::ids::{InventoryItemId, InventoryLevelId, StockLocationId};

/// A stock-keeping unit tracked by the inventory system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub sku: Option<String>,
}

/// Quantity of one inventory item at one stock location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryLevel {
    pub id: InventoryLevelId,
    pub inventory_item_id: InventoryItemId,
    pub location_id: StockLocationId,
    /// Total quantity in stock.
    pub stocked_quantity: i64,
    /// Quantity reserved for pending orders.
    #[serde(default)]
    pub reserved_quantity: i64,
    /// Quantity on its way to the location.
    #[serde(default)]
    pub incoming_quantity: i64,
}

impl InventoryLevel {
    /// Create a level with nothing reserved or incoming.
    pub fn new(
        inventory_item_id: InventoryItemId,
        location_id: StockLocationId,
        stocked_quantity: i64,
    ) -> Self {
        Self {
            id: InventoryLevelId::generate(),
            inventory_item_id,
            location_id,
            stocked_quantity,
            reserved_quantity: 0,
            incoming_quantity: 0,
        }
    }

    /// Get available quantity (stocked minus reserved).
    pub fn available(&self) -> i64 {
        (self.stocked_quantity - self.reserved_quantity).max(0)
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.available() == 0
    }
}
