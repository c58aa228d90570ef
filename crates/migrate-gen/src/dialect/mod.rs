//! Database dialect implementations.
//!
//! Each dialect knows how to turn an [`Operation`] into forward ("up") and
//! reverse ("down") SQL. Changes a dialect cannot express safely become
//! `--` comment lines asking for manual action instead of SQL that would
//! be silently wrong.

mod postgres;
mod sqlite;

use std::fmt;

use serde::Deserialize;

pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::column::{quote_identifier, render_column};
use crate::operations::{Operation, OperationKind, SchemaChange};
use crate::schema::{ColumnSchema, TableSchema};

static POSTGRES: PostgresDialect = PostgresDialect;
static SQLITE: SqliteDialect = SqliteDialect;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL.
    Postgres,
    /// SQLite.
    Sqlite,
}

impl Dialect {
    /// Returns the dialect name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Returns the emitter for this dialect.
    #[must_use]
    pub fn emitter(self) -> &'static dyn MigrationDialect {
        match self {
            Self::Postgres => &POSTGRES,
            Self::Sqlite => &SQLITE,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for database-specific SQL generation.
///
/// `up` and `down` dispatch to one method per operation kind. Methods whose
/// SQL is the same everywhere have shared defaults; the rest default to
/// [`MigrationDialect::unsupported`] so an emitter never fails, it only
/// degrades to a comment.
pub trait MigrationDialect: Send + Sync {
    /// Returns the dialect this emitter implements.
    fn dialect(&self) -> Dialect;

    /// Generates forward SQL for an operation.
    fn up(&self, operation: &Operation) -> Vec<String> {
        match operation.change() {
            SchemaChange::CreateTable { table, definition } => self.create_table(table, definition),
            SchemaChange::DropTable { table } => self.drop_table(table),
            SchemaChange::AddColumn {
                table,
                column,
                definition,
            } => self.add_column(table, column, definition),
            SchemaChange::DropColumn { table, column } => self.drop_column(table, column),
            SchemaChange::AlterColumn {
                table, column, to, ..
            } => self.alter_column(table, column, to),
        }
    }

    /// Generates reverse SQL for an operation.
    fn down(&self, operation: &Operation) -> Vec<String> {
        match operation.change() {
            SchemaChange::CreateTable { table, .. } => self.revert_create_table(table),
            SchemaChange::DropTable { table } => self.revert_drop_table(table),
            SchemaChange::AddColumn { table, column, .. } => self.revert_add_column(table, column),
            SchemaChange::DropColumn { table, column } => self.revert_drop_column(table, column),
            SchemaChange::AlterColumn {
                table,
                column,
                from,
                ..
            } => self.revert_alter_column(table, column, from),
        }
    }

    /// Placeholder emitted for an operation this dialect cannot render.
    fn unsupported(&self, kind: OperationKind) -> Vec<String> {
        vec![format!("-- unsupported operation: {}", kind)]
    }

    /// Generates `CREATE TABLE` with columns sorted by name.
    fn create_table(&self, table: &str, definition: &TableSchema) -> Vec<String> {
        let columns: Vec<String> = definition
            .columns
            .iter()
            .map(|(name, column)| render_column(name, column, self.dialect()))
            .collect();
        vec![format!(
            "CREATE TABLE {} (\n  {}\n);",
            quote_identifier(table),
            columns.join(",\n  ")
        )]
    }

    /// Generates `DROP TABLE`.
    fn drop_table(&self, table: &str) -> Vec<String> {
        vec![format!("DROP TABLE {};", quote_identifier(table))]
    }

    /// Generates `ALTER TABLE ... ADD COLUMN`.
    fn add_column(&self, table: &str, column: &str, definition: &ColumnSchema) -> Vec<String> {
        vec![format!(
            "ALTER TABLE {} ADD COLUMN {};",
            quote_identifier(table),
            render_column(column, definition, self.dialect())
        )]
    }

    /// Generates SQL removing a column.
    fn drop_column(&self, _table: &str, _column: &str) -> Vec<String> {
        self.unsupported(OperationKind::DropColumn)
    }

    /// Generates SQL moving a column to its target definition.
    fn alter_column(&self, _table: &str, _column: &str, _to: &ColumnSchema) -> Vec<String> {
        self.unsupported(OperationKind::AlterColumn)
    }

    /// Reverses `create_table`.
    fn revert_create_table(&self, table: &str) -> Vec<String> {
        self.drop_table(table)
    }

    /// Reverses `drop_table`. The table body is gone, so this is manual.
    fn revert_drop_table(&self, table: &str) -> Vec<String> {
        vec![format!(
            "-- manual rollback required: recreate dropped table {}",
            quote_identifier(table)
        )]
    }

    /// Reverses `add_column`.
    fn revert_add_column(&self, _table: &str, _column: &str) -> Vec<String> {
        self.unsupported(OperationKind::AddColumn)
    }

    /// Reverses `drop_column`.
    fn revert_drop_column(&self, _table: &str, _column: &str) -> Vec<String> {
        self.unsupported(OperationKind::DropColumn)
    }

    /// Reverses `alter_column` by restoring the source definition.
    fn revert_alter_column(&self, _table: &str, _column: &str, _from: &ColumnSchema) -> Vec<String> {
        self.unsupported(OperationKind::AlterColumn)
    }
}

/// Quotes `table.column` as one identifier for comment lines.
pub(crate) fn qualified(table: &str, column: &str) -> String {
    quote_identifier(&format!("{}.{}", table, column))
}
