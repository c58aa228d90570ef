//! SQLite dialect for migrations.
//!
//! SQLite's ALTER TABLE surface is narrow. Column drops and column
//! alterations would need the table recreation strategy (create a new
//! table, copy rows, drop, rename), which depends on data this generator
//! never sees, so they are emitted as manual-action comments.

use super::{Dialect, MigrationDialect, qualified};
use crate::operations::OperationKind;
use crate::schema::ColumnSchema;

/// SQLite migration dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn manual_action(&self, kind: OperationKind, table: &str, column: &str) -> Vec<String> {
        vec![format!(
            "-- manual action required in sqlite: {} on {}",
            kind,
            qualified(table, column)
        )]
    }

    fn manual_rollback(&self, kind: OperationKind, table: &str, column: &str) -> Vec<String> {
        vec![format!(
            "-- manual rollback required in sqlite: {} on {}",
            kind,
            qualified(table, column)
        )]
    }
}

impl MigrationDialect for SqliteDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn drop_column(&self, table: &str, column: &str) -> Vec<String> {
        self.manual_action(OperationKind::DropColumn, table, column)
    }

    fn alter_column(&self, table: &str, column: &str, _to: &ColumnSchema) -> Vec<String> {
        self.manual_action(OperationKind::AlterColumn, table, column)
    }

    fn revert_add_column(&self, table: &str, column: &str) -> Vec<String> {
        vec![format!(
            "-- manual rollback required in sqlite: drop column {}",
            qualified(table, column)
        )]
    }

    fn revert_drop_column(&self, table: &str, column: &str) -> Vec<String> {
        self.manual_rollback(OperationKind::DropColumn, table, column)
    }

    fn revert_alter_column(&self, table: &str, column: &str, _from: &ColumnSchema) -> Vec<String> {
        self.manual_rollback(OperationKind::AlterColumn, table, column)
    }
}
