//! Migration document and dry-run summary assembly.

use std::collections::BTreeMap;

use tracing::debug;

use crate::dialect::Dialect;
use crate::operations::{Operation, OperationKind};

/// First line of every generated migration.
pub const DEFAULT_HEADER: &str = "-- Generated by migrate-gen";

/// What [`assemble`] produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Full up/down SQL migration.
    #[default]
    Full,
    /// Operation statistics only; no SQL is rendered.
    DryRun,
}

/// Statistics over an operation list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Number of operations.
    pub total_operations: usize,
    /// Operation count per kind, ordered by kind name.
    pub by_kind: BTreeMap<OperationKind, usize>,
    /// Number of destructive operations.
    pub destructive_operations: usize,
}

impl MigrationSummary {
    /// Tallies an operation list.
    #[must_use]
    pub fn from_operations(operations: &[Operation]) -> Self {
        let mut summary = Self {
            total_operations: operations.len(),
            ..Self::default()
        };
        for op in operations {
            *summary.by_kind.entry(op.kind()).or_insert(0) += 1;
            if op.is_destructive() {
                summary.destructive_operations += 1;
            }
        }
        summary
    }
}

/// Renders the dry-run summary.
#[must_use]
pub fn dry_run_summary(operations: &[Operation]) -> String {
    let summary = MigrationSummary::from_operations(operations);

    let mut out = String::from("Dry-run summary:\n");
    out.push_str(&format!("  total_operations: {}\n", summary.total_operations));
    for (kind, count) in &summary.by_kind {
        out.push_str(&format!("  {}: {}\n", kind, count));
    }
    out.push_str(&format!(
        "  destructive_operations: {}\n",
        summary.destructive_operations
    ));
    out
}

/// Renders the full migration with the default header.
#[must_use]
pub fn render_sql(operations: &[Operation], dialect: Dialect) -> String {
    render_sql_with_header(operations, dialect, DEFAULT_HEADER)
}

/// Renders the full migration.
///
/// Header lines that are not already `--` comments are turned into
/// comments. Down blocks are emitted in reverse operation order so that
/// the last forward change is the first one undone. Statements inside one
/// block keep their forward order.
#[must_use]
pub fn render_sql_with_header(operations: &[Operation], dialect: Dialect, header: &str) -> String {
    let emitter = dialect.emitter();

    let mut up = Vec::new();
    let mut down = Vec::with_capacity(operations.len());
    for op in operations {
        debug!(operation = %op, dialect = %dialect, "rendering operation");
        up.extend(emitter.up(op));
        down.push(emitter.down(op));
    }

    let mut out = String::new();
    for line in header.lines() {
        out.push_str(&header_comment(line));
        out.push('\n');
    }
    out.push_str("-- UP\n");
    for statement in &up {
        out.push_str(statement);
        out.push('\n');
    }
    out.push('\n');
    out.push_str("-- DOWN\n");
    for statement in down.iter().rev().flatten() {
        out.push_str(statement);
        out.push('\n');
    }
    out
}

fn header_comment(line: &str) -> String {
    let line = line.trim_end();
    if line.starts_with("--") {
        line.to_string()
    } else if line.is_empty() {
        "--".to_string()
    } else {
        format!("-- {}", line)
    }
}

/// Renders operations in the requested mode.
///
/// `header` only applies to [`RenderMode::Full`].
#[must_use]
pub fn assemble(
    operations: &[Operation],
    dialect: Dialect,
    mode: RenderMode,
    header: &str,
) -> String {
    match mode {
        RenderMode::Full => render_sql_with_header(operations, dialect, header),
        RenderMode::DryRun => dry_run_summary(operations),
    }
}
