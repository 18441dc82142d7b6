//! Repository layer for persisting orders and parts to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
