#![allow(dead_code)]

use std::path::PathBuf;

use migrate_gen::prelude::*;
use tempfile::TempDir;

/// Writes `json` to `name` inside `dir` and returns the path.
pub fn write_schema(dir: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, json)
        .unwrap_or_else(|e| panic!("Failed to write {}: {e}", path.display()));
    path
}

/// Writes and loads a schema in one go.
pub fn load(dir: &TempDir, name: &str, json: &str) -> Schema {
    let path = write_schema(dir, name, json);
    load_schema(&path).unwrap_or_else(|e| panic!("Failed to load {name}: {e}"))
}

/// Extracts the statements between `-- UP` and the blank separator line.
pub fn up_section(sql: &str) -> Vec<&str> {
    sql.split("-- UP\n")
        .nth(1)
        .and_then(|rest| rest.split("\n-- DOWN\n").next())
        .unwrap_or_else(|| panic!("Missing UP section in:\n{sql}"))
        .lines()
        .filter(|line| !line.is_empty())
        .collect()
}

/// Extracts the lines after `-- DOWN`.
pub fn down_section(sql: &str) -> Vec<&str> {
    sql.split("-- DOWN\n")
        .nth(1)
        .unwrap_or_else(|| panic!("Missing DOWN section in:\n{sql}"))
        .lines()
        .collect()
}

pub const USERS_V1: &str = r#"{
  "tables": {
    "users": {
      "columns": {
        "id": {"type": "INTEGER", "primary_key": true},
        "email": {"type": "TEXT", "nullable": true}
      }
    }
  }
}"#;
