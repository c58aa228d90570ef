//! Column definition rendering.
//!
//! Every place that writes a column fragment or a default value goes
//! through this module, so the quoting rules cannot drift between
//! dialects or between `CREATE TABLE`, `ADD COLUMN` and `SET DEFAULT`.

use crate::dialect::Dialect;
use crate::schema::{ColumnSchema, DefaultValue};

/// Prefix marking a string default as an SQL keyword expression.
const KEYWORD_DEFAULT_PREFIX: &str = "CURRENT_";

/// Quotes an identifier (table or column name).
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Returns the SQL literal for a default value.
///
/// Strings are single-quoted unless they start (case-insensitively) with
/// `CURRENT_`, which marks keyword defaults such as `CURRENT_TIMESTAMP`.
#[must_use]
pub fn default_literal(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        DefaultValue::Number(n) => n.to_string(),
        DefaultValue::String(s) if is_keyword_default(s) => s.clone(),
        DefaultValue::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

fn is_keyword_default(s: &str) -> bool {
    s.get(..KEYWORD_DEFAULT_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(KEYWORD_DEFAULT_PREFIX))
}

/// Renders a column definition fragment.
///
/// Order: quoted name, type, `PRIMARY KEY`, `NOT NULL`, `DEFAULT`, and
/// `AUTOINCREMENT` (SQLite only).
#[must_use]
pub fn render_column(name: &str, column: &ColumnSchema, dialect: Dialect) -> String {
    let mut parts = vec![quote_identifier(name), column.sql_type.clone()];

    if column.primary_key {
        parts.push("PRIMARY KEY".to_string());
    }

    if !column.nullable {
        parts.push("NOT NULL".to_string());
    }

    if let Some(ref default) = column.default {
        parts.push(format!("DEFAULT {}", default_literal(default)));
    }

    if column.autoincrement && dialect == Dialect::Sqlite {
        parts.push("AUTOINCREMENT".to_string());
    }

    parts.join(" ")
}
