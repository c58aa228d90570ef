//! PostgreSQL dialect for migrations.

use super::{Dialect, MigrationDialect, qualified};
use crate::column::{default_literal, quote_identifier};
use crate::schema::ColumnSchema;

/// PostgreSQL migration dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Moves a column to `definition` with one statement per sub-clause:
    /// type, nullability, then default.
    fn alter_column_to(&self, table: &str, column: &str, definition: &ColumnSchema) -> Vec<String> {
        let prefix = format!(
            "ALTER TABLE {} ALTER COLUMN {}",
            quote_identifier(table),
            quote_identifier(column)
        );

        let nullability = if definition.nullable {
            "DROP NOT NULL"
        } else {
            "SET NOT NULL"
        };

        let default = match definition.default {
            Some(ref value) => format!("SET DEFAULT {}", default_literal(value)),
            None => "DROP DEFAULT".to_string(),
        };

        vec![
            format!("{} TYPE {};", prefix, definition.sql_type),
            format!("{} {};", prefix, nullability),
            format!("{} {};", prefix, default),
        ]
    }
}

impl MigrationDialect for PostgresDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn drop_column(&self, table: &str, column: &str) -> Vec<String> {
        vec![format!(
            "ALTER TABLE {} DROP COLUMN {};",
            quote_identifier(table),
            quote_identifier(column)
        )]
    }

    fn alter_column(&self, table: &str, column: &str, to: &ColumnSchema) -> Vec<String> {
        self.alter_column_to(table, column, to)
    }

    fn revert_add_column(&self, table: &str, column: &str) -> Vec<String> {
        self.drop_column(table, column)
    }

    fn revert_drop_column(&self, table: &str, column: &str) -> Vec<String> {
        vec![format!(
            "-- manual rollback required: re-add dropped column {}",
            qualified(table, column)
        )]
    }

    fn revert_alter_column(&self, table: &str, column: &str, from: &ColumnSchema) -> Vec<String> {
        self.alter_column_to(table, column, from)
    }
}
