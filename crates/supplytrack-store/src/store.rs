//! Order store
//!
//! `OrderStore` owns one SQLite connection and exposes the order and part
//! operations every front end goes through. Opening a store applies pending
//! migrations; closing it releases the connection.

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;
use crate::repo::SqliteRepo;
use rusqlite::Connection;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Instant;
use supplytrack_core::errors::{ExError, SupplyError};
use supplytrack_core::rules::deviation::delivery_deviation;
use supplytrack_core::{
    log_op_end, log_op_error, log_op_start, NewOrder, NewPart, OrderDeviation, OrderId,
    OrderRecord, PartDeviation, PartId, PartRecord, PartUpdate,
};

/// Persistent store for orders and their parts
pub struct OrderStore {
    conn: Connection,
}

impl OrderStore {
    /// Open (or create) a store backed by a database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(&StoreConfig::file(path))
    }

    /// Open a private in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Self::open_with(&StoreConfig::in_memory())
    }

    /// Open a store with explicit configuration
    pub fn open_with(config: &StoreConfig) -> Result<Self> {
        let mut conn = db::open_with(config)?;
        apply_migrations(&mut conn)?;
        tracing::debug!(location = ?config.location, "order store opened");
        Ok(Self { conn })
    }

    /// Close the underlying connection
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| from_rusqlite(e))
    }

    // ===== Orders =====

    /// Map of every order id to its name
    pub fn list_orders(&self) -> Result<BTreeMap<OrderId, String>> {
        SqliteRepo::list_order_names(&self.conn)
    }

    /// Every order with all attributes, ordered by id
    pub fn list_order_records(&self) -> Result<Vec<OrderRecord>> {
        SqliteRepo::list_orders(&self.conn)
    }

    /// Get an order by id
    pub fn get_order(&self, order_id: OrderId) -> Result<Option<OrderRecord>> {
        SqliteRepo::get_order(&self.conn, order_id)
    }

    /// Resolve an order name to its id; the lowest id wins when names repeat
    pub fn find_order_id(&self, name: &str) -> Result<Option<OrderId>> {
        SqliteRepo::find_order_id_by_name(&self.conn, name)
    }

    /// Create an order and return its new id
    ///
    /// The name is stored as given; use
    /// `supplytrack_core::rules::validation::validate_new_order` first to
    /// reject blank names.
    pub fn add_order(&mut self, order: &NewOrder) -> Result<OrderId> {
        let start = Instant::now();
        log_op_start!("add_order");

        let result = SqliteRepo::insert_order(&self.conn, order);
        if let Ok(order_id) = &result {
            tracing::debug!(order_id = *order_id, "order inserted");
        }
        finish("add_order", start, result)
    }

    /// Delete an order together with all of its parts
    ///
    /// Both deletions commit together or not at all. Deleting a missing
    /// order succeeds without effect.
    pub fn delete_order(&mut self, order_id: OrderId) -> Result<()> {
        let start = Instant::now();
        log_op_start!("delete_order", order_id = order_id);

        let result = (|| -> Result<usize> {
            let tx = self.conn.transaction().map_err(from_rusqlite)?;
            let parts_removed = SqliteRepo::delete_parts_for_order(&tx, order_id)?;
            SqliteRepo::delete_order(&tx, order_id)?;
            tx.commit().map_err(from_rusqlite)?;
            Ok(parts_removed)
        })();

        if let Ok(parts_removed) = &result {
            tracing::debug!(order_id, part_count = *parts_removed, "order deleted");
        }
        finish("delete_order", start, result.map(|_| ()))
    }

    // ===== Parts =====

    /// Parts of an order ordered by id; empty for an unknown order
    pub fn list_parts(&self, order_id: OrderId) -> Result<Vec<PartRecord>> {
        SqliteRepo::list_parts(&self.conn, order_id)
    }

    /// Get a part by id
    pub fn get_part(&self, part_id: PartId) -> Result<Option<PartRecord>> {
        SqliteRepo::get_part(&self.conn, part_id)
    }

    /// Create a part and return its new id
    ///
    /// The deviation is computed from the supplied dates.
    ///
    /// # Errors
    /// Returns `NotFound` when the owning order does not exist.
    pub fn add_part(&mut self, part: &NewPart) -> Result<PartId> {
        let start = Instant::now();
        log_op_start!("add_part", order_id = part.order_id);

        let result = (|| -> Result<PartId> {
            let tx = self.conn.transaction().map_err(from_rusqlite)?;
            if !SqliteRepo::order_exists(&tx, part.order_id)? {
                return Err(ExError::from(SupplyError::OrderNotFound {
                    order_id: part.order_id,
                })
                .with_op("add_part"));
            }
            let deviation = delivery_deviation(Some(part.planned_date), part.actual_date);
            let part_id = SqliteRepo::insert_part(&tx, part, deviation)?;
            tx.commit().map_err(from_rusqlite)?;
            Ok(part_id)
        })();

        finish("add_part", start, result)
    }

    /// Update a part
    ///
    /// A `None` planned or actual date keeps the stored date. The deviation is
    /// recomputed from the resulting dates.
    ///
    /// # Errors
    /// Returns `NotFound` when the part does not exist.
    pub fn update_part(&mut self, part_id: PartId, update: &PartUpdate) -> Result<()> {
        let start = Instant::now();
        log_op_start!("update_part", part_id = part_id);

        let result = (|| -> Result<()> {
            let tx = self.conn.transaction().map_err(from_rusqlite)?;
            let stored = SqliteRepo::get_part(&tx, part_id)?.ok_or_else(|| {
                ExError::from(SupplyError::PartNotFound { part_id }).with_op("update_part")
            })?;

            let (planned_date, actual_date) =
                update.merge_dates(stored.planned_date, stored.actual_date);
            let merged = PartRecord {
                name: update.name.clone(),
                supplier: update.supplier.clone(),
                planned_date,
                actual_date,
                status: update.status.clone(),
                deviation: delivery_deviation(Some(planned_date), actual_date),
                ..stored
            };

            SqliteRepo::write_part(&tx, &merged)?;
            tx.commit().map_err(from_rusqlite)
        })();

        finish("update_part", start, result)
    }

    /// Delete a part; deleting a missing part succeeds without effect
    pub fn delete_part(&mut self, part_id: PartId) -> Result<()> {
        let start = Instant::now();
        log_op_start!("delete_part", part_id = part_id);

        let result = SqliteRepo::delete_part(&self.conn, part_id).map(|_| ());
        finish("delete_part", start, result)
    }

    // ===== Reporting =====

    /// Part deviations grouped by order name
    ///
    /// Orders without parts are left out. Groups appear in order of their
    /// lowest order id; parts keep their id order within a group.
    pub fn deviation_report(&self) -> Result<Vec<OrderDeviation>> {
        let rows = SqliteRepo::deviation_rows(&self.conn)?;

        let mut groups: Vec<OrderDeviation> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (order_name, part_name, deviation) in rows {
            let slot = *index.entry(order_name.clone()).or_insert_with(|| {
                groups.push(OrderDeviation {
                    order_name,
                    parts: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].parts.push(PartDeviation {
                part_name,
                deviation,
            });
        }

        tracing::debug!(group_count = groups.len(), "deviation report built");
        Ok(groups)
    }
}

/// Log the outcome of a mutating operation and hand the result back
fn finish<T>(op: &'static str, start: Instant, result: Result<T>) -> Result<T> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = duration_ms);
        }
    }
    result
}
