//! Access to the commerce platform.
//!
//! This crate provides:
//! - `CommercePlatform` - the async seam every seeding call goes through
//! - `AdminPlatform` - implementation over the platform's admin REST API
//! - `InMemoryPlatform` - implementation backed by process memory, for tests and dry runs
//! - `ensure_sales_channel` / `ensure_shipping_profile` - get-or-create by natural key

pub mod admin;
mod error;
mod input;
mod memory;
mod platform;
mod upsert;

pub use admin::{AdminCredentials, AdminPlatform};
pub use error::*;
pub use input::*;
pub use memory::*;
pub use platform::*;
pub use upsert::*;
