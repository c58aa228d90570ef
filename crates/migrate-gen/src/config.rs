//! Configuration file (`migrate-gen.toml`).
//!
//! ```toml
//! dialect = "postgres"
//!
//! [policy]
//! allow_destructive = false
//! primary_key_change_destructive = true
//!
//! [output]
//! header = "-- Generated by migrate-gen for billing"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::autodetector::AutodetectorOptions;
use crate::dialect::Dialect;
use crate::error::{MigrateError, Result};
use crate::policy::DestructivePolicy;
use crate::report::{DEFAULT_HEADER, RenderMode};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target dialect when `--dialect` is not given.
    pub dialect: Option<Dialect>,
    /// Destructive-change policy.
    pub policy: PolicyConfig,
    /// Output formatting.
    pub output: OutputConfig,
}

/// `[policy]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Let destructive operations through without `--allow-destructive`.
    pub allow_destructive: bool,
    /// Treat primary key flag changes as destructive.
    pub primary_key_change_destructive: bool,
}

/// `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Replaces the first line(s) of a rendered migration.
    pub header: Option<String>,
}

impl Config {
    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents).map_err(|source| MigrateError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| MigrateError::Config {
            path: "<input>".into(),
            source,
        })
    }
}

/// Values given on the command line. Unset flags defer to the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--dialect`.
    pub dialect: Option<Dialect>,
    /// `--dry-run`.
    pub dry_run: bool,
    /// `--allow-destructive`.
    pub allow_destructive: bool,
    /// `--primary-key-destructive`.
    pub primary_key_change_destructive: bool,
}

/// Fully resolved settings for one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Target dialect.
    pub dialect: Dialect,
    /// Full migration or dry-run summary.
    pub mode: RenderMode,
    /// Let destructive operations through.
    pub allow_destructive: bool,
    /// Treat primary key flag changes as destructive.
    pub primary_key_change_destructive: bool,
    /// Header placed above `-- UP`.
    pub header: String,
}

impl Settings {
    /// Settings with defaults for everything but the dialect.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            mode: RenderMode::Full,
            allow_destructive: false,
            primary_key_change_destructive: false,
            header: DEFAULT_HEADER.to_string(),
        }
    }

    /// Merges command-line overrides over a config file.
    ///
    /// `--dialect` wins over the file's `dialect`; one of them must be set.
    /// Boolean flags can only switch a policy on, never off.
    pub fn resolve(config: &Config, overrides: &Overrides) -> Result<Self> {
        let dialect = overrides
            .dialect
            .or(config.dialect)
            .ok_or(MigrateError::MissingDialect)?;

        let mode = if overrides.dry_run {
            RenderMode::DryRun
        } else {
            RenderMode::Full
        };

        let mut settings = Self::new(dialect)
            .mode(mode)
            .allow_destructive(config.policy.allow_destructive || overrides.allow_destructive)
            .primary_key_change_destructive(
                config.policy.primary_key_change_destructive
                    || overrides.primary_key_change_destructive,
            );
        if let Some(header) = &config.output.header {
            settings.header.clone_from(header);
        }
        Ok(settings)
    }

    /// Sets the render mode.
    #[must_use]
    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Lets destructive operations through.
    #[must_use]
    pub fn allow_destructive(mut self, allow: bool) -> Self {
        self.allow_destructive = allow;
        self
    }

    /// Classifies primary key flag changes as destructive.
    #[must_use]
    pub fn primary_key_change_destructive(mut self, destructive: bool) -> Self {
        self.primary_key_change_destructive = destructive;
        self
    }

    /// Replaces the migration header.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Diff options derived from these settings.
    #[must_use]
    pub fn autodetector_options(&self) -> AutodetectorOptions {
        AutodetectorOptions::new()
            .with_primary_key_change_destructive(self.primary_key_change_destructive)
    }

    /// Policy derived from these settings.
    #[must_use]
    pub fn policy(&self) -> DestructivePolicy {
        DestructivePolicy::new(self.allow_destructive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.dialect, None);
        assert!(!config.policy.allow_destructive);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            dialect = "sqlite"

            [policy]
            allow_destructive = true
            primary_key_change_destructive = true

            [output]
            header = "-- billing"
            "#,
        )
        .unwrap();

        assert_eq!(config.dialect, Some(Dialect::Sqlite));
        assert!(config.policy.allow_destructive);
        assert!(config.policy.primary_key_change_destructive);
        assert_eq!(config.output.header.as_deref(), Some("-- billing"));
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        let err = Config::from_toml(r#"dialect = "mysql""#).unwrap_err();
        assert!(matches!(err, MigrateError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/migrate-gen.toml").unwrap_err();
        assert!(matches!(err, MigrateError::Io(_)));
    }

    fn postgres() -> Overrides {
        Overrides {
            dialect: Some(Dialect::Postgres),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_resolve_from_config() {
        let config = Config::from_toml(
            r#"
            [policy]
            primary_key_change_destructive = true
            "#,
        )
        .unwrap();

        let settings = Settings::resolve(&config, &postgres()).unwrap();
        assert_eq!(settings.dialect, Dialect::Postgres);
        assert_eq!(settings.mode, RenderMode::Full);
        assert_eq!(settings.header, DEFAULT_HEADER);
        assert!(settings.autodetector_options().primary_key_change_destructive);
        assert!(!settings.policy().allow_destructive);
    }

    #[test]
    fn test_resolve_flag_dialect_wins() {
        let config = Config::from_toml(r#"dialect = "sqlite""#).unwrap();

        let settings = Settings::resolve(&config, &postgres()).unwrap();
        assert_eq!(settings.dialect, Dialect::Postgres);

        let settings = Settings::resolve(&config, &Overrides::default()).unwrap();
        assert_eq!(settings.dialect, Dialect::Sqlite);
    }

    #[test]
    fn test_resolve_requires_dialect() {
        let err = Settings::resolve(&Config::default(), &Overrides::default()).unwrap_err();
        assert!(matches!(err, MigrateError::MissingDialect));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_resolve_flags_switch_policy_on() {
        let overrides = Overrides {
            dry_run: true,
            allow_destructive: true,
            primary_key_change_destructive: true,
            ..postgres()
        };

        let settings = Settings::resolve(&Config::default(), &overrides).unwrap();
        assert_eq!(settings.mode, RenderMode::DryRun);
        assert!(settings.allow_destructive);
        assert!(settings.primary_key_change_destructive);
    }

    #[test]
    fn test_resolve_config_policy_survives_unset_flags() {
        let config = Config::from_toml(
            r#"
            [policy]
            allow_destructive = true

            [output]
            header = "-- billing"
            "#,
        )
        .unwrap();

        let settings = Settings::resolve(&config, &postgres()).unwrap();
        assert!(settings.allow_destructive);
        assert_eq!(settings.header, "-- billing");
    }

    #[test]
    fn test_builder_overrides() {
        let settings = Settings::new(Dialect::Sqlite)
            .mode(RenderMode::DryRun)
            .allow_destructive(true)
            .header("-- custom");

        assert_eq!(settings.mode, RenderMode::DryRun);
        assert!(settings.allow_destructive);
        assert_eq!(settings.header, "-- custom");
    }
}
