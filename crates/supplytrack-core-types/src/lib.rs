//! Core types shared across SupplyTrack facilities
//!
//! This crate provides the canonical field keys and event names used by both
//! the error facility and the logging facility.

pub mod schema;
