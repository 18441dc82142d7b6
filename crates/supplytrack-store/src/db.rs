//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use crate::config::{StoreConfig, StoreLocation};
use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
///
/// Missing parent directories are created.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
    }
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open the database described by `config` and apply its connection settings
pub fn open_with(config: &StoreConfig) -> Result<Connection> {
    let conn = match &config.location {
        StoreLocation::File(path) => open(path)?,
        StoreLocation::InMemory => open_in_memory()?,
    };
    configure(&conn, config)?;
    Ok(conn)
}

/// Configure a connection according to `config`
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.enforce_foreign_keys)
        .map_err(from_rusqlite)?;

    if config.wal && config.location != StoreLocation::InMemory {
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(from_rusqlite)?;
        tracing::debug!(journal_mode = %mode, "journal mode configured");
    }

    Ok(())
}
