//! Delivery deviation rule
//!
//! Deviation expresses lateness in 30-day blocks. Early and on-time delivery
//! both count as zero.

use chrono::NaiveDate;

/// Number of days in one deviation unit
pub const DAYS_PER_DEVIATION_UNIT: f64 = 30.0;

/// Compute the delivery deviation of a part
///
/// Returns 0.0 when either date is missing. Otherwise returns
/// `(actual - planned)` in whole days divided by 30, clamped at 0.0.
pub fn delivery_deviation(planned: Option<NaiveDate>, actual: Option<NaiveDate>) -> f64 {
    match (planned, actual) {
        (Some(planned), Some(actual)) => {
            let days = actual.signed_duration_since(planned).num_days();
            (days as f64 / DAYS_PER_DEVIATION_UNIT).max(0.0)
        }
        _ => 0.0,
    }
}
