//! Schema representation types.
//!
//! A [`Schema`] is a snapshot of a database's structure at one point in
//! time: tables mapped to columns mapped to column attributes. Maps are
//! ordered so that every traversal is lexicographic and the diff engine
//! produces the same operations on every run.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Default value for a column.
///
/// JSON `null` (or an absent key) means "no default" and is represented by
/// `Option::None` on [`ColumnSchema::default`], not by a variant here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean default.
    Bool(bool),
    /// Numeric default, kept in its original textual form.
    Number(serde_json::Number),
    /// String default. Keyword defaults such as `CURRENT_TIMESTAMP` are
    /// strings too; see [`crate::column::default_literal`].
    String(String),
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

fn default_true() -> bool {
    true
}

/// Schema definition for a column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnSchema {
    /// Type expression, passed through to SQL verbatim.
    #[serde(rename = "type")]
    pub sql_type: String,
    /// Whether this column is the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Whether the column allows NULL values. Absent means nullable.
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Default value.
    #[serde(default)]
    pub default: Option<DefaultValue>,
    /// Whether this column auto-increments (SQLite only).
    #[serde(default)]
    pub autoincrement: bool,
}

impl ColumnSchema {
    /// Creates a new nullable column with no default.
    #[must_use]
    pub fn new(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: sql_type.into(),
            primary_key: false,
            nullable: true,
            default: None,
            autoincrement: false,
        }
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the column as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets the column to auto-increment.
    #[must_use]
    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }
}

/// Schema definition for a table.
///
/// Table-level metadata in the input (comments, options) is accepted and
/// dropped; only columns take part in diffing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableSchema {
    /// Column definitions keyed by column name.
    pub columns: BTreeMap<String, ColumnSchema>,
}

impl TableSchema {
    /// Creates an empty table schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column to the table.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, column: ColumnSchema) -> Self {
        self.columns.insert(name.into(), column);
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.get(name)
    }
}

/// The complete database schema (all tables).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Schema {
    /// Tables keyed by table name.
    pub tables: BTreeMap<String, TableSchema>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table to the schema.
    #[must_use]
    pub fn table(mut self, name: impl Into<String>, table: TableSchema) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// Gets a table by name.
    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_schema_builder() {
        let col = ColumnSchema::new("INTEGER").primary_key().autoincrement();

        assert_eq!(col.sql_type, "INTEGER");
        assert!(col.primary_key);
        assert!(col.autoincrement);
        assert!(col.nullable);
        assert_eq!(col.default, None);
    }

    #[test]
    fn test_column_defaults_when_absent() {
        let col: ColumnSchema = serde_json::from_str(r#"{"type": "TEXT"}"#).unwrap();
        assert_eq!(col, ColumnSchema::new("TEXT"));
    }

    #[test]
    fn test_null_default_means_no_default() {
        let col: ColumnSchema =
            serde_json::from_str(r#"{"type": "TEXT", "default": null}"#).unwrap();
        assert_eq!(col.default, None);
    }

    #[test]
    fn test_default_value_variants() {
        let col: ColumnSchema =
            serde_json::from_str(r#"{"type": "REAL", "default": 1.0}"#).unwrap();
        match col.default {
            Some(DefaultValue::Number(n)) => assert_eq!(n.to_string(), "1.0"),
            other => panic!("Expected Number, got {other:?}"),
        }

        let col: ColumnSchema =
            serde_json::from_str(r#"{"type": "BOOLEAN", "default": false}"#).unwrap();
        assert_eq!(col.default, Some(DefaultValue::Bool(false)));

        let col: ColumnSchema =
            serde_json::from_str(r#"{"type": "TEXT", "default": "draft"}"#).unwrap();
        assert_eq!(col.default, Some(DefaultValue::from("draft")));
    }

    #[test]
    fn test_table_metadata_is_ignored() {
        let table: TableSchema = serde_json::from_str(
            r#"{"comment": "people", "columns": {"id": {"type": "INTEGER"}}}"#,
        )
        .unwrap();
        assert_eq!(
            table,
            TableSchema::new().column("id", ColumnSchema::new("INTEGER"))
        );
    }
}
