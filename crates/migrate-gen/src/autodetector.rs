//! Autodetector for generating migrations from schema changes.
//!
//! This module compares two schemas and produces the ordered list of
//! operations needed to transform one into the other.
//!
//! Output order is part of the contract: all `create_table` operations,
//! then all `drop_table` operations, then one block per table present in
//! both schemas holding its `add_column`, `drop_column` and `alter_column`
//! operations. Every group is sorted by name.

use tracing::debug;

use crate::operations::Operation;
use crate::schema::{ColumnSchema, Schema, TableSchema};

/// Options for the autodetector.
#[derive(Debug, Clone, Default)]
pub struct AutodetectorOptions {
    /// Treat a change of the `primary_key` flag as destructive.
    pub primary_key_change_destructive: bool,
}

impl AutodetectorOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies primary key changes as destructive.
    #[must_use]
    pub fn with_primary_key_change_destructive(mut self, enabled: bool) -> Self {
        self.primary_key_change_destructive = enabled;
        self
    }
}

/// Detects schema changes and generates migration operations.
#[derive(Debug, Default)]
pub struct Autodetector {
    options: AutodetectorOptions,
}

impl Autodetector {
    /// Creates a new autodetector with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new autodetector with custom options.
    #[must_use]
    pub fn with_options(options: AutodetectorOptions) -> Self {
        Self { options }
    }

    /// Compares two schemas and returns the operations needed to transform
    /// `source` into `target`.
    #[must_use]
    pub fn diff(&self, source: &Schema, target: &Schema) -> Vec<Operation> {
        let mut operations = Vec::new();

        for (name, table) in &target.tables {
            if !source.tables.contains_key(name) {
                record(&mut operations, Operation::create_table(name, table.clone()));
            }
        }

        for name in source.tables.keys() {
            if !target.tables.contains_key(name) {
                record(&mut operations, Operation::drop_table(name));
            }
        }

        for (name, from_table) in &source.tables {
            if let Some(to_table) = target.tables.get(name) {
                operations.extend(self.diff_table(name, from_table, to_table));
            }
        }

        operations
    }

    /// Compares two versions of one table.
    fn diff_table(&self, table: &str, from: &TableSchema, to: &TableSchema) -> Vec<Operation> {
        let mut operations = Vec::new();

        for (name, column) in &to.columns {
            if !from.columns.contains_key(name) {
                record(
                    &mut operations,
                    Operation::add_column(table, name, column.clone()),
                );
            }
        }

        for name in from.columns.keys() {
            if !to.columns.contains_key(name) {
                record(&mut operations, Operation::drop_column(table, name));
            }
        }

        for (name, from_col) in &from.columns {
            let Some(to_col) = to.columns.get(name) else {
                continue;
            };
            if from_col != to_col {
                let destructive = self.is_destructive_alter(from_col, to_col);
                record(
                    &mut operations,
                    Operation::alter_column(
                        table,
                        name,
                        from_col.clone(),
                        to_col.clone(),
                        destructive,
                    ),
                );
            }
        }

        operations
    }

    /// Nullability tightening and type changes may reject or truncate
    /// existing rows; everything else is additive unless configured.
    fn is_destructive_alter(&self, from: &ColumnSchema, to: &ColumnSchema) -> bool {
        if from.nullable && !to.nullable {
            return true;
        }
        if from.sql_type != to.sql_type {
            return true;
        }
        self.options.primary_key_change_destructive && from.primary_key != to.primary_key
    }
}

fn record(operations: &mut Vec<Operation>, op: Operation) {
    debug!(
        change = %op.description(),
        destructive = op.is_destructive(),
        "detected change"
    );
    operations.push(op);
}

/// Diffs two schemas with default options.
#[must_use]
pub fn diff(source: &Schema, target: &Schema) -> Vec<Operation> {
    Autodetector::new().diff(source, target)
}
