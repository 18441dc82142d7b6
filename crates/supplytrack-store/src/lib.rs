//! SupplyTrack Store - SQLite persistence for orders and parts
//!
//! Provides:
//! - Connection management and store configuration
//! - Embedded migrations tracked in a `schema_version` ledger
//! - Repository SQL for the `orders` and `order_parts` tables
//! - `OrderStore`, the operation contract used by every front end

pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod store;

// Re-export key types
pub use config::{StoreConfig, StoreLocation};
pub use errors::Result;
pub use store::OrderStore;
