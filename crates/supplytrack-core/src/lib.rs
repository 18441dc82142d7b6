//! SupplyTrack Core - Domain model and rules for order delivery tracking
//!
//! This crate provides the storage-independent half of SupplyTrack:
//! - Order and Part models, delivery status and report rows
//! - The delivery deviation rule
//! - Boundary parsing and caller-side validation helpers
//! - The structured error facility and logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, SupplyError};
pub use model::{
    DeliveryStatus, NewOrder, NewPart, OrderDeviation, OrderId, OrderRecord, PartDeviation,
    PartId, PartRecord, PartUpdate,
};
pub use rules::deviation::delivery_deviation;
