//! Embedded migrations
//!
//! SQL migrations are embedded at compile time using include_str!

use std::borrow::Cow;

/// What a migration does when it runs
pub enum MigrationStep {
    /// Execute a batch of SQL statements
    Sql(&'static str),
    /// Add a nullable column unless the table already has it
    AddColumn {
        table: &'static str,
        column: &'static str,
        definition: &'static str,
    },
}

impl MigrationStep {
    /// SQL executed by this step, also the checksum input
    pub fn sql(&self) -> Cow<'static, str> {
        match self {
            MigrationStep::Sql(sql) => Cow::Borrowed(sql),
            MigrationStep::AddColumn {
                table,
                column,
                definition,
            } => Cow::Owned(format!(
                "ALTER TABLE {} ADD COLUMN {} {}",
                table, column, definition
            )),
        }
    }
}

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub step: MigrationStep,
}

/// Get all embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_orders_schema",
            step: MigrationStep::Sql(include_str!("../../migrations/001_orders_schema.sql")),
        },
        // Order tables created before amounts were tracked lack this column.
        Migration {
            id: "002_order_amount",
            step: MigrationStep::AddColumn {
                table: "orders",
                column: "order_amount",
                definition: "REAL",
            },
        },
        Migration {
            id: "003_order_parts_order_index",
            step: MigrationStep::Sql(include_str!(
                "../../migrations/003_order_parts_order_index.sql"
            )),
        },
    ]
}
