//! Migration runner
//!
//! Applies embedded migrations once each, recording them with checksums in
//! the `schema_version` table

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{get_migrations, Migration, MigrationStep};
use rusqlite::{Connection, OptionalExtension};

/// Apply all pending migrations to the database
///
/// Safe to call on every open: applied migrations are skipped after their
/// recorded checksum is verified.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    for migration in get_migrations() {
        apply_migration(conn, &migration)?;
    }

    Ok(())
}

/// List applied migration ids in application order
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT migration_id FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(ids)
}

/// Check whether `table` has a column named `column`
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    Ok(count > 0)
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply a single migration if not already applied
fn apply_migration(conn: &mut Connection, migration: &Migration) -> Result<()> {
    let sql = migration.step.sql();
    let checksum = compute_checksum(&sql);

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        match recorded {
            Some(recorded) if recorded != checksum => {
                return Err(checksum_mismatch(migration.id, &recorded, &checksum));
            }
            _ => return Ok(()),
        }
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;

    match &migration.step {
        MigrationStep::Sql(batch) => {
            tx.execute_batch(batch)
                .map_err(|e| migration_error(migration.id, e))?;
        }
        MigrationStep::AddColumn { table, column, .. } => {
            if column_exists(&tx, table, column)? {
                tracing::debug!(
                    migration_id = migration.id,
                    table = *table,
                    column = *column,
                    "column already present, recording migration only"
                );
            } else {
                tx.execute_batch(&sql)
                    .map_err(|e| migration_error(migration.id, e))?;
            }
        }
    }

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration.id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(migration_id = migration.id, "migration applied");

    Ok(())
}
