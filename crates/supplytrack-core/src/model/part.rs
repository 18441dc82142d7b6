use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::order::OrderId;

/// Store-assigned part identifier
pub type PartId = i64;

/// Delivery status of a part
///
/// Stored as text. Values other than the two canonical ones are kept verbatim
/// so rows written by older front ends survive a read/update cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DeliveryStatus {
    Delivered,
    NotDelivered,
    Other(String),
}

impl DeliveryStatus {
    pub const DELIVERED: &'static str = "delivered";
    pub const NOT_DELIVERED: &'static str = "not delivered";

    /// Parse stored or user-supplied status text
    ///
    /// Accepts the canonical English labels (case-insensitive) and the
    /// `交货` / `未交货` labels used by the desktop front end.
    ///
    /// Any other text, surrounding whitespace included, is kept as `Other`.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            Self::DELIVERED | "交货" => DeliveryStatus::Delivered,
            Self::NOT_DELIVERED | "not_delivered" | "未交货" => DeliveryStatus::NotDelivered,
            _ => DeliveryStatus::Other(text.to_string()),
        }
    }

    /// Text written to the `delivery_status` column
    pub fn as_str(&self) -> &str {
        match self {
            DeliveryStatus::Delivered => Self::DELIVERED,
            DeliveryStatus::NotDelivered => Self::NOT_DELIVERED,
            DeliveryStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for DeliveryStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Part - a component delivered against an order
///
/// `deviation` is derived from the planned and actual dates every time either
/// is written; it is never taken from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    pub id: PartId,

    /// Owning order
    pub order_id: OrderId,

    pub name: String,

    pub supplier: String,

    pub planned_date: NaiveDate,

    /// Absent while the part has not been delivered
    pub actual_date: Option<NaiveDate>,

    pub status: DeliveryStatus,

    /// Months late, in 30-day units, never negative
    pub deviation: f64,
}

/// Input for creating a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPart {
    pub order_id: OrderId,
    pub name: String,
    pub supplier: String,
    pub planned_date: NaiveDate,
    pub actual_date: Option<NaiveDate>,
    pub status: DeliveryStatus,
}

impl NewPart {
    /// Create part input that is not yet delivered
    pub fn new(
        order_id: OrderId,
        name: impl Into<String>,
        supplier: impl Into<String>,
        planned_date: NaiveDate,
    ) -> Self {
        Self {
            order_id,
            name: name.into(),
            supplier: supplier.into(),
            planned_date,
            actual_date: None,
            status: DeliveryStatus::NotDelivered,
        }
    }

    /// Set the actual delivery date
    pub fn with_actual_date(mut self, actual_date: NaiveDate) -> Self {
        self.actual_date = Some(actual_date);
        self
    }

    /// Set the delivery status
    pub fn with_status(mut self, status: DeliveryStatus) -> Self {
        self.status = status;
        self
    }
}

/// Input for updating a part
///
/// A `None` date means "leave the stored date unchanged", not "clear it".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartUpdate {
    pub name: String,
    pub supplier: String,
    pub planned_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub status: DeliveryStatus,
}

impl PartUpdate {
    /// Resolve the dates to persist against the currently stored ones
    pub fn merge_dates(
        &self,
        stored_planned: NaiveDate,
        stored_actual: Option<NaiveDate>,
    ) -> (NaiveDate, Option<NaiveDate>) {
        (
            self.planned_date.unwrap_or(stored_planned),
            self.actual_date.or(stored_actual),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_parse_canonical_and_legacy_labels() {
        assert_eq!(DeliveryStatus::parse("delivered"), DeliveryStatus::Delivered);
        assert_eq!(DeliveryStatus::parse(" Delivered "), DeliveryStatus::Delivered);
        assert_eq!(DeliveryStatus::parse("交货"), DeliveryStatus::Delivered);
        assert_eq!(
            DeliveryStatus::parse("not delivered"),
            DeliveryStatus::NotDelivered
        );
        assert_eq!(DeliveryStatus::parse("未交货"), DeliveryStatus::NotDelivered);
        assert_eq!(
            DeliveryStatus::parse("partially shipped"),
            DeliveryStatus::Other("partially shipped".to_string())
        );
    }

    #[test]
    fn test_other_status_round_trips_verbatim() {
        let stored = DeliveryStatus::Other(" on hold ".to_string());
        assert_eq!(DeliveryStatus::parse(stored.as_str()), stored);
        assert_eq!(DeliveryStatus::from(String::from(stored.clone())), stored);
    }

    #[test]
    fn test_status_text_is_stable() {
        assert_eq!(DeliveryStatus::Delivered.as_str(), "delivered");
        assert_eq!(DeliveryStatus::NotDelivered.to_string(), "not delivered");
        assert_eq!(DeliveryStatus::Other("x".into()).as_str(), "x");
    }

    #[test]
    fn test_merge_dates_keeps_stored_values_when_absent() {
        let update = PartUpdate {
            name: "P1".into(),
            supplier: "Sup1".into(),
            planned_date: None,
            actual_date: None,
            status: DeliveryStatus::Delivered,
        };
        let merged = update.merge_dates(date(2024, 1, 1), Some(date(2024, 1, 31)));
        assert_eq!(merged, (date(2024, 1, 1), Some(date(2024, 1, 31))));
    }

    #[test]
    fn test_merge_dates_prefers_supplied_values() {
        let update = PartUpdate {
            name: "P1".into(),
            supplier: "Sup1".into(),
            planned_date: Some(date(2024, 2, 1)),
            actual_date: Some(date(2024, 2, 16)),
            status: DeliveryStatus::Delivered,
        };
        let merged = update.merge_dates(date(2024, 1, 1), None);
        assert_eq!(merged, (date(2024, 2, 1), Some(date(2024, 2, 16))));
    }
}
