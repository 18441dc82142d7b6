use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned order identifier
pub type OrderId = i64;

/// Order - a purchase record with one delivery commitment
///
/// Orders are created and deleted but never edited in place. Deleting an
/// order removes every part that belongs to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Identifier assigned by the store on creation
    pub id: OrderId,

    /// Order name shown to users; expected to be non-empty
    pub name: String,

    pub customer: String,

    /// Committed delivery date towards the customer
    pub delivery_date: NaiveDate,

    pub salesperson: String,

    /// Order amount, absent when it was never entered
    pub amount: Option<f64>,
}

/// Input for creating an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub name: String,
    pub customer: String,
    pub delivery_date: NaiveDate,
    pub salesperson: String,
    pub amount: Option<f64>,
}

impl NewOrder {
    /// Create order input without an amount
    pub fn new(
        name: impl Into<String>,
        customer: impl Into<String>,
        delivery_date: NaiveDate,
        salesperson: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            customer: customer.into(),
            delivery_date,
            salesperson: salesperson.into(),
            amount: None,
        }
    }

    /// Set the order amount
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}
