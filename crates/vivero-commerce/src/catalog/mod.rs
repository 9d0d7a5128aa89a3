//! Product catalog module.
//!
//! Contains types for products, variants, categories, and inventory.

mod category;
mod inventory;
mod product;

pub use category::{find_category, ProductCategory};
pub use inventory::{InventoryItem, InventoryLevel};
pub use product::{
    is_valid_handle, Product, ProductImage, ProductOption, ProductStatus, ProductVariant,
};
