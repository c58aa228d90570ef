//! Error types for the migration generator.

use std::path::PathBuf;

/// Errors that can occur while loading schemas or enforcing policy.
///
/// Diffing and rendering are total over a validated [`Schema`](crate::schema::Schema),
/// so every variant here belongs to the boundary: the loader, the
/// configuration layer, or the destructive-change policy.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The schema file does not exist.
    #[error("schema file not found: {}", .0.display())]
    SchemaNotFound(PathBuf),

    /// The schema file is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is well-formed but does not describe a schema.
    #[error("{0}")]
    InvalidSchema(String),

    /// One or more operations are destructive and the policy forbids them.
    #[error(
        "destructive operations detected. Re-run with --allow-destructive.\n{}",
        .0.iter().map(|op| format!("  - {}", op)).collect::<Vec<_>>().join("\n")
    )]
    DestructiveChanges(Vec<String>),

    /// The configuration file could not be parsed.
    #[error("invalid config file {}: {source}", path.display())]
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// No dialect was given on the command line or in the config file.
    #[error("--dialect is required (or set `dialect` in the config file)")]
    MissingDialect,

    /// IO error (reading schemas or config, writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MigrateError {
    /// Process exit code the CLI reports for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DestructiveChanges(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for migration generator operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
