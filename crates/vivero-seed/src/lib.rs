//! Demo store seeding.
//!
//! Brings a fresh or partially configured store to a demo-ready state:
//! store currencies, a region with tax settings, a stock location with
//! shipping, a publishable API key, categories, products and stock.
//!
//! # Example
//!
//! ```rust,no_run
//! use vivero_platform::InMemoryPlatform;
//! use vivero_seed::{SeedData, Seeder};
//!
//! # async fn run() -> Result<(), vivero_seed::SeedError> {
//! let platform = InMemoryPlatform::new();
//! let report = Seeder::new(&platform, SeedData::builtin()?)
//!     .key_file(Some("storefront/.publishable_key".into()))
//!     .run()
//!     .await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

mod data;
mod error;
mod export;
mod orchestrator;
mod report;

pub use data::*;
pub use error::SeedError;
pub use export::export_publishable_key;
pub use orchestrator::{SeedObserver, SeedStep, Seeder};
pub use report::SeedReport;
