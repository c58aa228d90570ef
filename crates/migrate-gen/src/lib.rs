//! Reversible SQL migrations from JSON schema snapshots.
//!
//! `migrate-gen` compares two snapshots of a database schema and produces
//! a migration script for a target dialect:
//!
//! - **Loader** - Reads and validates schema JSON files
//! - **Autodetector** - Diffs schemas into an ordered list of operations
//! - **Policy** - Refuses destructive operations unless explicitly allowed
//! - **Dialect** - Renders operations as up and down SQL (PostgreSQL, SQLite)
//! - **Report** - Assembles the migration document or a dry-run summary
//!
//! Diffing is deterministic: tables and columns are visited in
//! lexicographic order, so identical inputs give byte-identical output.
//!
//! # Example
//!
//! ```rust
//! use migrate_gen::prelude::*;
//!
//! let from = Schema::new();
//! let to = Schema::new().table(
//!     "posts",
//!     TableSchema::new().column("id", ColumnSchema::new("INTEGER").primary_key()),
//! );
//!
//! let sql = migrate_gen::generate(&from, &to, &Settings::new(Dialect::Postgres)).unwrap();
//! assert!(sql.contains("CREATE TABLE \"posts\""));
//! assert!(sql.contains("DROP TABLE \"posts\";"));
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! migrate-gen --from-file v1.json --to-file v2.json --dialect postgres
//! migrate-gen --from-file v1.json --to-file v2.json --dialect sqlite --dry-run
//! migrate-gen --from-file v1.json --to-file v2.json --dialect postgres \
//!     --allow-destructive --out migrations/0002.sql
//! ```

pub mod autodetector;
pub mod column;
pub mod config;
pub mod dialect;
pub mod error;
pub mod loader;
pub mod operations;
pub mod policy;
pub mod report;
pub mod schema;

use tracing::info;

use crate::autodetector::Autodetector;
use crate::config::Settings;
use crate::schema::Schema;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::autodetector::{Autodetector, AutodetectorOptions, diff};
    pub use crate::config::{Config, Overrides, Settings};
    pub use crate::dialect::{Dialect, MigrationDialect, PostgresDialect, SqliteDialect};
    pub use crate::error::{MigrateError, Result};
    pub use crate::loader::{load_schema, parse_schema};
    pub use crate::operations::{Operation, OperationKind, SchemaChange};
    pub use crate::policy::DestructivePolicy;
    pub use crate::report::{MigrationSummary, RenderMode};
    pub use crate::schema::{ColumnSchema, DefaultValue, Schema, TableSchema};
}

/// Runs the whole pipeline: diff, policy check, then rendering.
///
/// Nothing is rendered when the policy rejects the diff.
pub fn generate(source: &Schema, target: &Schema, settings: &Settings) -> error::Result<String> {
    let operations =
        Autodetector::with_options(settings.autodetector_options()).diff(source, target);
    info!(
        operations = operations.len(),
        dialect = %settings.dialect,
        "schema diff complete"
    );

    settings.policy().check(&operations)?;

    Ok(report::assemble(
        &operations,
        settings.dialect,
        settings.mode,
        &settings.header,
    ))
}
