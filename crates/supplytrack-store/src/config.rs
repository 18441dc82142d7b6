//! Store configuration

use std::path::{Path, PathBuf};

/// Database file used when no path is configured
pub const DEFAULT_DB_FILE: &str = "supply_progress.db";

/// Where the store keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// SQLite database file, created on first open
    File(PathBuf),
    /// Private in-memory database, discarded on close
    InMemory,
}

/// Options applied when a store is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,

    /// Turn on SQLite foreign key enforcement for the connection
    pub enforce_foreign_keys: bool,

    /// Use write-ahead logging; ignored for in-memory stores
    pub wal: bool,
}

impl StoreConfig {
    /// Configuration for a database file
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::File(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
            ..Self::default()
        }
    }

    pub fn with_wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    pub fn with_foreign_keys(mut self, enforce: bool) -> Self {
        self.enforce_foreign_keys = enforce;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: StoreLocation::File(PathBuf::from(DEFAULT_DB_FILE)),
            enforce_foreign_keys: true,
            wal: true,
        }
    }
}
