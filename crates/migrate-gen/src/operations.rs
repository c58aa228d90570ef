//! Migration operations.
//!
//! An [`Operation`] is one structural change between two schema versions.
//! Operations are produced by the [`Autodetector`](crate::autodetector::Autodetector)
//! and consumed by the dialect emitters; they are never mutated in between.

use std::fmt;

use crate::schema::{ColumnSchema, TableSchema};

/// The kind of an operation, used for reporting and policy messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationKind {
    /// A column was added to an existing table.
    AddColumn,
    /// A column definition changed.
    AlterColumn,
    /// A new table was created.
    CreateTable,
    /// A column was removed.
    DropColumn,
    /// A table was removed.
    DropTable,
}

impl OperationKind {
    /// Returns the snake_case name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddColumn => "add_column",
            Self::AlterColumn => "alter_column",
            Self::CreateTable => "create_table",
            Self::DropColumn => "drop_column",
            Self::DropTable => "drop_table",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structural change carried by an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaChange {
    /// Create a new table.
    CreateTable {
        /// Table name.
        table: String,
        /// Full target definition.
        definition: TableSchema,
    },

    /// Drop a table.
    DropTable {
        /// Table name.
        table: String,
    },

    /// Add a column to a table.
    AddColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Column definition.
        definition: ColumnSchema,
    },

    /// Drop a column from a table.
    DropColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// Alter a column's definition.
    AlterColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Definition in the source schema.
        from: ColumnSchema,
        /// Definition in the target schema.
        to: ColumnSchema,
    },
}

/// A single migration operation together with its destructiveness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    change: SchemaChange,
    destructive: bool,
}

impl Operation {
    pub(crate) fn create_table(table: impl Into<String>, definition: TableSchema) -> Self {
        Self {
            change: SchemaChange::CreateTable {
                table: table.into(),
                definition,
            },
            destructive: false,
        }
    }

    pub(crate) fn drop_table(table: impl Into<String>) -> Self {
        Self {
            change: SchemaChange::DropTable {
                table: table.into(),
            },
            destructive: true,
        }
    }

    pub(crate) fn add_column(
        table: impl Into<String>,
        column: impl Into<String>,
        definition: ColumnSchema,
    ) -> Self {
        Self {
            change: SchemaChange::AddColumn {
                table: table.into(),
                column: column.into(),
                definition,
            },
            destructive: false,
        }
    }

    pub(crate) fn drop_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            change: SchemaChange::DropColumn {
                table: table.into(),
                column: column.into(),
            },
            destructive: true,
        }
    }

    pub(crate) fn alter_column(
        table: impl Into<String>,
        column: impl Into<String>,
        from: ColumnSchema,
        to: ColumnSchema,
        destructive: bool,
    ) -> Self {
        Self {
            change: SchemaChange::AlterColumn {
                table: table.into(),
                column: column.into(),
                from,
                to,
            },
            destructive,
        }
    }

    /// Returns the structural change.
    #[must_use]
    pub fn change(&self) -> &SchemaChange {
        &self.change
    }

    /// Returns true if applying this operation may lose data or reject rows.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.destructive
    }

    /// Returns the operation kind.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self.change {
            SchemaChange::CreateTable { .. } => OperationKind::CreateTable,
            SchemaChange::DropTable { .. } => OperationKind::DropTable,
            SchemaChange::AddColumn { .. } => OperationKind::AddColumn,
            SchemaChange::DropColumn { .. } => OperationKind::DropColumn,
            SchemaChange::AlterColumn { .. } => OperationKind::AlterColumn,
        }
    }

    /// Returns the affected table.
    #[must_use]
    pub fn table(&self) -> &str {
        match &self.change {
            SchemaChange::CreateTable { table, .. }
            | SchemaChange::DropTable { table }
            | SchemaChange::AddColumn { table, .. }
            | SchemaChange::DropColumn { table, .. }
            | SchemaChange::AlterColumn { table, .. } => table,
        }
    }

    /// Returns the affected column, for column-level operations.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match &self.change {
            SchemaChange::CreateTable { .. } | SchemaChange::DropTable { .. } => None,
            SchemaChange::AddColumn { column, .. }
            | SchemaChange::DropColumn { column, .. }
            | SchemaChange::AlterColumn { column, .. } => Some(column),
        }
    }

    /// Returns `table` or `table.column`.
    #[must_use]
    pub fn target(&self) -> String {
        match self.column() {
            Some(column) => format!("{}.{}", self.table(), column),
            None => self.table().to_string(),
        }
    }

    /// Returns a human-readable description of this operation.
    #[must_use]
    pub fn description(&self) -> String {
        match &self.change {
            SchemaChange::CreateTable { table, definition } => format!(
                "Create table '{}' with {} column(s)",
                table,
                definition.columns.len()
            ),
            SchemaChange::DropTable { table } => format!("Drop table '{}'", table),
            SchemaChange::AddColumn { table, column, .. } => {
                format!("Add column '{}' to table '{}'", column, table)
            }
            SchemaChange::DropColumn { table, column } => {
                format!("Drop column '{}' from table '{}'", column, table)
            }
            SchemaChange::AlterColumn { table, column, .. } => {
                format!("Alter column '{}' in table '{}'", column, table)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_are_destructive() {
        assert!(Operation::drop_table("users").is_destructive());
        assert!(Operation::drop_column("users", "email").is_destructive());
        assert!(!Operation::create_table("users", TableSchema::new()).is_destructive());
        assert!(!Operation::add_column("users", "email", ColumnSchema::new("TEXT")).is_destructive());
    }

    #[test]
    fn test_display_names_kind_and_target() {
        let op = Operation::alter_column(
            "users",
            "email",
            ColumnSchema::new("TEXT"),
            ColumnSchema::new("TEXT").not_null(),
            true,
        );
        assert_eq!(op.to_string(), "alter_column: users.email");
        assert_eq!(Operation::drop_table("legacy").to_string(), "drop_table: legacy");
    }

    #[test]
    fn test_accessors() {
        let op = Operation::add_column("posts", "title", ColumnSchema::new("TEXT"));
        assert_eq!(op.kind(), OperationKind::AddColumn);
        assert_eq!(op.table(), "posts");
        assert_eq!(op.column(), Some("title"));
        assert_eq!(op.description(), "Add column 'title' to table 'posts'");

        let op = Operation::create_table("posts", TableSchema::new());
        assert_eq!(op.column(), None);
        assert_eq!(op.target(), "posts");
    }

    #[test]
    fn test_kinds_sort_by_name() {
        let mut kinds = vec![
            OperationKind::DropTable,
            OperationKind::CreateTable,
            OperationKind::AlterColumn,
            OperationKind::DropColumn,
            OperationKind::AddColumn,
        ];
        kinds.sort();
        let names: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
