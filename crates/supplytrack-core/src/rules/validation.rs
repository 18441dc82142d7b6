//! Boundary parsing and caller-side validation
//!
//! The store does not reject empty names; front ends call these helpers
//! before invoking add/update operations.

use chrono::NaiveDate;

use crate::errors::{Result, SupplyError};
use crate::model::{NewOrder, NewPart, PartUpdate};

/// Date format exchanged with callers and stored in the database
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required `yyyy-MM-dd` date
///
/// # Errors
/// Returns `InvalidDate` for empty or malformed text.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| SupplyError::InvalidDate {
        value: text.to_string(),
    })
}

/// Parse an optional `yyyy-MM-dd` date
///
/// Empty or whitespace-only text yields `None`.
///
/// # Errors
/// Returns `InvalidDate` for non-empty malformed text.
pub fn parse_optional_date(text: &str) -> Result<Option<NaiveDate>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_date(text).map(Some)
}

/// Format a date the way it is stored
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse an optional order amount
///
/// Empty text yields `None`.
///
/// # Errors
/// Returns `InvalidAmount` when the text is not a finite decimal.
pub fn parse_amount(text: &str) -> Result<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(SupplyError::InvalidAmount {
            value: text.to_string(),
        }),
    }
}

/// Validate order input before it is handed to the store
///
/// # Errors
/// Returns `InvalidOrderName` when the name is blank.
pub fn validate_new_order(order: &NewOrder) -> Result<()> {
    if order.name.trim().is_empty() {
        return Err(SupplyError::InvalidOrderName {
            reason: "order name cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Validate part input before it is handed to the store
///
/// # Errors
/// Returns `InvalidPartName` when the name is blank.
pub fn validate_new_part(part: &NewPart) -> Result<()> {
    validate_part_name(&part.name)
}

/// Validate a part update before it is handed to the store
///
/// # Errors
/// Returns `InvalidPartName` when the name is blank.
pub fn validate_part_update(update: &PartUpdate) -> Result<()> {
    validate_part_name(&update.name)
}

fn validate_part_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SupplyError::InvalidPartName {
            reason: "part name cannot be empty".to_string(),
        });
    }
    Ok(())
}
