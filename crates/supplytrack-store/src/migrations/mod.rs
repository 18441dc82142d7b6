//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums and idempotent application
//! - Embedded migrations, either raw SQL or checked column additions

mod checksums;
mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration, MigrationStep};
pub use runner::{applied_migrations, apply_migrations, column_exists};
