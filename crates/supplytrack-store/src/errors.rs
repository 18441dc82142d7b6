//! Error handling for supplytrack-store
//!
//! Wraps supplytrack-core ExError with store-specific helpers

use supplytrack_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error wrapping the SQLite failure that caused it
pub fn migration_error(migration_id: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Migration)
        .with_op("migration")
        .with_entity_id(migration_id)
        .with_message(format!("Migration {} failed", migration_id))
        .with_source(from_rusqlite(err))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Migration)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
///
/// SQLite constraint failures map to `ConstraintViolation`, everything else
/// to `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match err.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation) => ExErrorKind::ConstraintViolation,
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
