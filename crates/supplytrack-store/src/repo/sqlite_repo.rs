//! SQLite repository implementation
//!
//! Row-level SQL for the `orders` and `order_parts` tables. Functions take a
//! `&Connection`, so they run unchanged inside a `Transaction`.

use crate::errors::{from_rusqlite, Result};
use rusqlite::types::Value;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use supplytrack_core::errors::{ExError, SupplyError};
use supplytrack_core::rules::deviation::delivery_deviation;
use supplytrack_core::rules::validation::{
    format_date, parse_amount, parse_date, parse_optional_date,
};
use supplytrack_core::{
    DeliveryStatus, NewOrder, NewPart, OrderId, OrderRecord, PartId, PartRecord,
};

const ORDER_COLUMNS: &str =
    "order_id, order_name, customer_name, delivery_date, salesperson, order_amount";

const PART_COLUMNS: &str = "part_id, order_id, part_name, supplier, planned_delivery_date, \
     actual_delivery_date, delivery_status, delivery_deviation";

/// Text the desktop front end wrote for an actual date that was never set
const LEGACY_ABSENT_DATE: &str = "None";

const QUALIFIED_PART_COLUMNS: &str = "p.part_id, p.order_id, p.part_name, p.supplier, \
     p.planned_delivery_date, p.actual_delivery_date, p.delivery_status, p.delivery_deviation";

/// Order row as stored, before date and amount decoding
struct OrderRow {
    id: OrderId,
    name: String,
    customer: String,
    delivery_date: String,
    salesperson: String,
    amount: Value,
}

impl OrderRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            customer: row.get(2)?,
            delivery_date: row.get(3)?,
            salesperson: row.get(4)?,
            amount: row.get(5)?,
        })
    }

    fn decode(self) -> Result<OrderRecord> {
        let delivery_date = parse_date(&self.delivery_date)
            .map_err(|_| corrupt("delivery_date", &self.delivery_date))?;
        Ok(OrderRecord {
            id: self.id,
            name: self.name,
            customer: self.customer,
            delivery_date,
            salesperson: self.salesperson,
            amount: decode_amount(self.id, self.amount),
        })
    }
}

/// Part row as stored, before date and status decoding
struct PartRow {
    id: PartId,
    order_id: OrderId,
    name: String,
    supplier: String,
    planned_date: String,
    actual_date: Option<String>,
    status: String,
    deviation: Option<f64>,
}

impl PartRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            order_id: row.get(1)?,
            name: row.get(2)?,
            supplier: row.get(3)?,
            planned_date: row.get(4)?,
            actual_date: row.get(5)?,
            status: row.get(6)?,
            deviation: row.get(7)?,
        })
    }

    fn decode(self) -> Result<PartRecord> {
        let planned_date = parse_date(&self.planned_date)
            .map_err(|_| corrupt("planned_delivery_date", &self.planned_date))?;
        let actual_date = decode_actual_date(self.actual_date.as_deref())?;
        let deviation = self
            .deviation
            .unwrap_or_else(|| delivery_deviation(Some(planned_date), actual_date));

        Ok(PartRecord {
            id: self.id,
            order_id: self.order_id,
            name: self.name,
            supplier: self.supplier,
            planned_date,
            actual_date,
            status: DeliveryStatus::parse(&self.status),
            deviation,
        })
    }
}

impl PartRow {
    /// Deviation for reporting; a row missing it is recomputed when its
    /// dates are readable and counts as 0.0 otherwise
    fn report_deviation(&self) -> f64 {
        if let Some(deviation) = self.deviation {
            return deviation;
        }
        let planned = parse_date(&self.planned_date).ok();
        match decode_actual_date(self.actual_date.as_deref()) {
            Ok(actual) if planned.is_some() => delivery_deviation(planned, actual),
            _ => {
                tracing::warn!(
                    part_id = self.id,
                    "unreadable dates on part without stored deviation, reporting 0"
                );
                0.0
            }
        }
    }
}

/// Older front ends wrote '' or "None" for "not delivered yet".
fn decode_actual_date(text: Option<&str>) -> Result<Option<NaiveDate>> {
    let text = text.unwrap_or_default();
    if text.trim() == LEGACY_ABSENT_DATE {
        return Ok(None);
    }
    parse_optional_date(text).map_err(|_| corrupt("actual_delivery_date", text))
}

fn corrupt(field: &str, value: &str) -> ExError {
    SupplyError::CorruptRow {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

/// Amounts were historically written as free text such as `1,000`.
///
/// Text that still does not read as a number is treated as an absent amount
/// for that order alone; the stored value is left untouched.
fn decode_amount(order_id: OrderId, value: Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i as f64),
        Value::Real(r) => Some(r),
        Value::Text(text) => {
            let digits: String = text.chars().filter(|c| *c != ',').collect();
            parse_amount(&digits).unwrap_or_else(|_| {
                tracing::warn!(order_id, value = %text, "unreadable order amount ignored");
                None
            })
        }
        Value::Blob(_) => {
            tracing::warn!(order_id, "binary order amount ignored");
            None
        }
    }
}

/// SQLite repository for orders and parts
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert an order and return its assigned id
    pub fn insert_order(conn: &Connection, order: &NewOrder) -> Result<OrderId> {
        conn.execute(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson, order_amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                order.name,
                order.customer,
                format_date(order.delivery_date),
                order.salesperson,
                order.amount,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(conn.last_insert_rowid())
    }

    /// Check whether an order exists
    pub fn order_exists(conn: &Connection, order_id: OrderId) -> Result<bool> {
        conn.query_row(
            "SELECT 1 FROM orders WHERE order_id = ?1",
            [order_id],
            |_| Ok(()),
        )
        .optional()
        .map(|found| found.is_some())
        .map_err(from_rusqlite)
    }

    /// Get an order by id
    pub fn get_order(conn: &Connection, order_id: OrderId) -> Result<Option<OrderRecord>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM orders WHERE order_id = ?1", ORDER_COLUMNS),
                [order_id],
                OrderRow::read,
            )
            .optional()
            .map_err(from_rusqlite)?;

        row.map(OrderRow::decode).transpose()
    }

    /// List all orders ordered by id
    pub fn list_orders(conn: &Connection) -> Result<Vec<OrderRecord>> {
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM orders ORDER BY order_id", ORDER_COLUMNS))
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], OrderRow::read)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter().map(OrderRow::decode).collect()
    }

    /// Map of order id to order name
    pub fn list_order_names(conn: &Connection) -> Result<BTreeMap<OrderId, String>> {
        let mut stmt = conn
            .prepare("SELECT order_id, order_name FROM orders")
            .map_err(from_rusqlite)?;
        let names = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<BTreeMap<OrderId, String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(names)
    }

    /// Lowest order id carrying the given name
    pub fn find_order_id_by_name(conn: &Connection, name: &str) -> Result<Option<OrderId>> {
        conn.query_row(
            "SELECT MIN(order_id) FROM orders WHERE order_name = ?1",
            [name],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }

    /// Delete an order row; returns the number of rows removed
    pub fn delete_order(conn: &Connection, order_id: OrderId) -> Result<usize> {
        conn.execute("DELETE FROM orders WHERE order_id = ?1", [order_id])
            .map_err(from_rusqlite)
    }

    /// Delete every part of an order; returns the number of rows removed
    pub fn delete_parts_for_order(conn: &Connection, order_id: OrderId) -> Result<usize> {
        conn.execute("DELETE FROM order_parts WHERE order_id = ?1", [order_id])
            .map_err(from_rusqlite)
    }

    /// Insert a part with its precomputed deviation and return its id
    pub fn insert_part(conn: &Connection, part: &NewPart, deviation: f64) -> Result<PartId> {
        conn.execute(
            "INSERT INTO order_parts (order_id, part_name, supplier, planned_delivery_date,
                                      actual_delivery_date, delivery_status, delivery_deviation)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                part.order_id,
                part.name,
                part.supplier,
                format_date(part.planned_date),
                part.actual_date.map(format_date),
                part.status.as_str(),
                deviation,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a part by id
    pub fn get_part(conn: &Connection, part_id: PartId) -> Result<Option<PartRecord>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM order_parts WHERE part_id = ?1", PART_COLUMNS),
                [part_id],
                PartRow::read,
            )
            .optional()
            .map_err(from_rusqlite)?;

        row.map(PartRow::decode).transpose()
    }

    /// List the parts of an order ordered by part id
    pub fn list_parts(conn: &Connection, order_id: OrderId) -> Result<Vec<PartRecord>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM order_parts WHERE order_id = ?1 ORDER BY part_id",
                PART_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([order_id], PartRow::read)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter().map(PartRow::decode).collect()
    }

    /// Overwrite the mutable columns of a part; returns the number of rows changed
    pub fn write_part(conn: &Connection, part: &PartRecord) -> Result<usize> {
        conn.execute(
            "UPDATE order_parts
             SET part_name = ?1, supplier = ?2, planned_delivery_date = ?3,
                 actual_delivery_date = ?4, delivery_status = ?5, delivery_deviation = ?6
             WHERE part_id = ?7",
            rusqlite::params![
                part.name,
                part.supplier,
                format_date(part.planned_date),
                part.actual_date.map(format_date),
                part.status.as_str(),
                part.deviation,
                part.id,
            ],
        )
        .map_err(from_rusqlite)
    }

    /// Delete a part; returns the number of rows removed
    pub fn delete_part(conn: &Connection, part_id: PartId) -> Result<usize> {
        conn.execute("DELETE FROM order_parts WHERE part_id = ?1", [part_id])
            .map_err(from_rusqlite)
    }

    /// `(order_name, part_name, deviation)` for every part that has an order
    ///
    /// Rows come ordered by order id, then part id.
    pub fn deviation_rows(conn: &Connection) -> Result<Vec<(String, String, f64)>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {}, o.order_name
                 FROM order_parts p
                 JOIN orders o ON o.order_id = p.order_id
                 ORDER BY p.order_id, p.part_id",
                QUALIFIED_PART_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(8)?, PartRow::read(row)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(rows
            .into_iter()
            .map(|(order_name, row)| {
                let deviation = row.report_deviation();
                (order_name, row.name, deviation)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_insert_and_get_order() {
        let conn = setup();
        let id = SqliteRepo::insert_order(
            &conn,
            &NewOrder::new("O1", "CustA", date(2024, 1, 10), "Sales1").with_amount(1000.0),
        )
        .unwrap();

        let order = SqliteRepo::get_order(&conn, id).unwrap().unwrap();
        assert_eq!(order.name, "O1");
        assert_eq!(order.delivery_date, date(2024, 1, 10));
        assert_eq!(order.amount, Some(1000.0));
    }

    #[test]
    fn test_text_amount_decoded() {
        let conn = setup();
        conn.execute(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson, order_amount)
             VALUES ('O1', 'C', '2024-01-10', 'S', '')",
            [],
        )
        .unwrap();

        let orders = SqliteRepo::list_orders(&conn).unwrap();
        assert_eq!(orders[0].amount, None);
    }

    #[test]
    fn test_blank_actual_date_decoded_as_absent() {
        let conn = setup();
        conn.execute_batch(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson)
             VALUES ('O1', 'C', '2024-01-10', 'S');
             INSERT INTO order_parts (order_id, part_name, supplier, planned_delivery_date,
                                      actual_delivery_date, delivery_status, delivery_deviation)
             VALUES (1, 'P1', 'Sup1', '2024-01-01', '', '未交货', NULL);",
        )
        .unwrap();

        let parts = SqliteRepo::list_parts(&conn, 1).unwrap();
        assert_eq!(parts[0].actual_date, None);
        assert_eq!(parts[0].status, DeliveryStatus::NotDelivered);
        assert_eq!(parts[0].deviation, 0.0);
    }

    #[test]
    fn test_malformed_stored_date_is_serialization_error() {
        let conn = setup();
        conn.execute(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson)
             VALUES ('O1', 'C', 'soon', 'S')",
            [],
        )
        .unwrap();

        let err = SqliteRepo::get_order(&conn, 1).unwrap_err();
        assert_eq!(err.code(), "ERR_SERIALIZATION");
    }

    #[test]
    fn test_find_order_id_by_name_prefers_lowest_id() {
        let conn = setup();
        let dup = NewOrder::new("Dup", "C", date(2024, 1, 1), "S");
        let first = SqliteRepo::insert_order(&conn, &dup).unwrap();
        SqliteRepo::insert_order(&conn, &dup).unwrap();

        assert_eq!(
            SqliteRepo::find_order_id_by_name(&conn, "Dup").unwrap(),
            Some(first)
        );
        assert_eq!(SqliteRepo::find_order_id_by_name(&conn, "Nope").unwrap(), None);
    }

    #[test]
    fn test_deviation_rows_recompute_missing_deviation() {
        let conn = setup();
        conn.execute_batch(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson)
             VALUES ('O1', 'C', '2024-01-10', 'S');
             INSERT INTO order_parts (order_id, part_name, supplier, planned_delivery_date,
                                      actual_delivery_date, delivery_status, delivery_deviation)
             VALUES (1, 'P1', 'Sup1', '2024-01-01', '2024-01-31', '交货', NULL);",
        )
        .unwrap();

        let rows = SqliteRepo::deviation_rows(&conn).unwrap();
        assert_eq!(rows, vec![("O1".to_string(), "P1".to_string(), 1.0)]);
    }

    #[test]
    fn test_legacy_none_actual_date_decoded_as_absent() {
        let conn = setup();
        conn.execute_batch(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson)
             VALUES ('O1', 'C', '2024-01-10', 'S');
             INSERT INTO order_parts (order_id, part_name, supplier, planned_delivery_date,
                                      actual_delivery_date, delivery_status, delivery_deviation)
             VALUES (1, 'P1', 'Sup1', '2024-01-01', 'None', '未交货', 0.0);",
        )
        .unwrap();

        let part = SqliteRepo::get_part(&conn, 1).unwrap().unwrap();
        assert_eq!(part.actual_date, None);
        assert_eq!(part.deviation, 0.0);
    }

    #[test]
    fn test_grouped_text_amount_decoded() {
        let conn = setup();
        conn.execute(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson, order_amount)
             VALUES ('O1', 'C', '2024-01-10', 'S', '1,000')",
            [],
        )
        .unwrap();

        assert_eq!(SqliteRepo::get_order(&conn, 1).unwrap().unwrap().amount, Some(1000.0));
    }

    #[test]
    fn test_unreadable_amount_only_affects_its_order() {
        let conn = setup();
        conn.execute_batch(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson, order_amount)
             VALUES ('O1', 'C', '2024-01-10', 'S', 'about a grand');
             INSERT INTO orders (order_name, customer_name, delivery_date, salesperson, order_amount)
             VALUES ('O2', 'C', '2024-01-10', 'S', 250.0);",
        )
        .unwrap();

        let orders = SqliteRepo::list_orders(&conn).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].amount, None);
        assert_eq!(orders[1].amount, Some(250.0));
    }

    #[test]
    fn test_deviation_rows_use_stored_deviation_despite_bad_dates() {
        let conn = setup();
        conn.execute_batch(
            "INSERT INTO orders (order_name, customer_name, delivery_date, salesperson)
             VALUES ('O1', 'C', '2024-01-10', 'S');
             INSERT INTO order_parts (order_id, part_name, supplier, planned_delivery_date,
                                      actual_delivery_date, delivery_status, delivery_deviation)
             VALUES (1, 'P1', 'Sup1', '2024-01-01', 'last week', '交货', 1.5);
             INSERT INTO order_parts (order_id, part_name, supplier, planned_delivery_date,
                                      actual_delivery_date, delivery_status, delivery_deviation)
             VALUES (1, 'P2', 'Sup1', 'soon', NULL, '未交货', NULL);",
        )
        .unwrap();

        let rows = SqliteRepo::deviation_rows(&conn).unwrap();
        assert_eq!(
            rows,
            vec![
                ("O1".to_string(), "P1".to_string(), 1.5),
                ("O1".to_string(), "P2".to_string(), 0.0),
            ]
        );
    }
}
