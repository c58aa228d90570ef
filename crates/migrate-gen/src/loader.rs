//! Schema file loading and validation.
//!
//! The JSON document must look like
//! `{"tables": {"<table>": {"columns": {"<column>": {"type": "..."}}}}}`.
//! Structural problems are reported with the offending table and column
//! before the document is converted into a [`Schema`].

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{MigrateError, Result};
use crate::schema::Schema;

/// Reads and validates a schema file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MigrateError::SchemaNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&text).map_err(|source| MigrateError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = schema_from_value(raw, &path.display().to_string())?;
    debug!(
        path = %path.display(),
        tables = schema.tables.len(),
        "loaded schema"
    );
    Ok(schema)
}

/// Parses and validates a schema from a JSON string.
pub fn parse_schema(json: &str) -> Result<Schema> {
    let raw: Value = serde_json::from_str(json).map_err(|source| MigrateError::InvalidJson {
        path: "<input>".into(),
        source,
    })?;
    schema_from_value(raw, "<input>")
}

fn schema_from_value(raw: Value, origin: &str) -> Result<Schema> {
    validate(&raw, origin)?;
    serde_json::from_value(raw)
        .map_err(|e| MigrateError::InvalidSchema(format!("invalid schema: {}", e)))
}

fn validate(raw: &Value, origin: &str) -> Result<()> {
    let invalid = |message: String| Err(MigrateError::InvalidSchema(message));

    let Some(tables) = raw.get("tables").and_then(Value::as_object) else {
        return invalid(format!("{} must contain object key 'tables'", origin));
    };

    for (table_name, table_def) in tables {
        let Some(table_def) = table_def.as_object() else {
            return invalid(format!("table '{}' must be an object", table_name));
        };
        let Some(columns) = table_def.get("columns").and_then(Value::as_object) else {
            return invalid(format!(
                "table '{}' must contain object key 'columns'",
                table_name
            ));
        };
        for (col_name, col_def) in columns {
            let Some(col_def) = col_def.as_object() else {
                return invalid(format!(
                    "column '{}.{}' must be an object",
                    table_name, col_name
                ));
            };
            match col_def.get("type") {
                Some(Value::String(_)) => {}
                Some(_) => {
                    return invalid(format!(
                        "column '{}.{}' 'type' must be a string",
                        table_name, col_name
                    ));
                }
                None => {
                    return invalid(format!("column '{}.{}' missing 'type'", table_name, col_name));
                }
            }
        }
    }

    Ok(())
}
