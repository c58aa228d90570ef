//! Destructive-change policy.
//!
//! The diff engine only classifies operations. Whether destructive ones
//! may proceed is decided here, before any SQL is rendered.

use tracing::warn;

use crate::error::{MigrateError, Result};
use crate::operations::Operation;

/// Policy applied to a diff before rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct DestructivePolicy {
    /// Let destructive operations through.
    pub allow_destructive: bool,
}

impl DestructivePolicy {
    /// Creates a policy.
    #[must_use]
    pub fn new(allow_destructive: bool) -> Self {
        Self { allow_destructive }
    }

    /// Fails with every destructive operation listed unless allowed.
    pub fn check(&self, operations: &[Operation]) -> Result<()> {
        let offending: Vec<&Operation> = operations
            .iter()
            .filter(|op| op.is_destructive())
            .collect();

        if offending.is_empty() {
            return Ok(());
        }

        if self.allow_destructive {
            for op in &offending {
                warn!(operation = %op, "allowing destructive change: {}", op.description());
            }
            return Ok(());
        }

        Err(MigrateError::DestructiveChanges(
            offending.iter().map(ToString::to_string).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autodetector::diff;
    use crate::schema::{ColumnSchema, Schema, TableSchema};

    fn email_tightened() -> Vec<Operation> {
        let from = Schema::new()
            .table(
                "users",
                TableSchema::new().column("email", ColumnSchema::new("TEXT")),
            )
            .table(
                "sessions",
                TableSchema::new().column("id", ColumnSchema::new("INTEGER")),
            );
        let to = Schema::new().table(
            "users",
            TableSchema::new().column("email", ColumnSchema::new("TEXT").not_null()),
        );
        diff(&from, &to)
    }

    #[test]
    fn test_blocks_and_lists_offenders() {
        let err = DestructivePolicy::default()
            .check(&email_tightened())
            .unwrap_err();

        match err {
            MigrateError::DestructiveChanges(ops) => {
                assert_eq!(
                    ops,
                    vec!["drop_table: sessions", "alter_column: users.email"]
                );
            }
            other => panic!("Expected DestructiveChanges, got {other:?}"),
        }
    }

    #[test]
    fn test_allow_override() {
        assert!(DestructivePolicy::new(true).check(&email_tightened()).is_ok());
    }

    #[test]
    fn test_safe_changes_pass() {
        let from = Schema::new();
        let to = Schema::new().table(
            "posts",
            TableSchema::new().column("id", ColumnSchema::new("INTEGER")),
        );
        assert!(DestructivePolicy::default().check(&diff(&from, &to)).is_ok());
    }
}
