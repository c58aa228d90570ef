//! migrate-gen CLI
//!
//! Diffs two schema snapshots and prints an up/down SQL migration.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use migrate_gen::prelude::*;

/// Generate reversible SQL migrations from JSON schema snapshots.
#[derive(Parser)]
#[command(name = "migrate-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the source schema JSON.
    #[arg(long)]
    from_file: PathBuf,

    /// Path to the target schema JSON.
    #[arg(long)]
    to_file: PathBuf,

    /// Target SQL dialect (falls back to the config file).
    #[arg(long, value_enum)]
    dialect: Option<Dialect>,

    /// Output path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print an operation summary instead of SQL.
    #[arg(long)]
    dry_run: bool,

    /// Allow destructive operations.
    #[arg(long)]
    allow_destructive: bool,

    /// Treat primary key changes as destructive.
    #[arg(long)]
    primary_key_destructive: bool,

    /// Configuration file.
    #[arg(long, env = "MIGRATE_GEN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            dialect: self.dialect,
            dry_run: self.dry_run,
            allow_destructive: self.allow_destructive,
            primary_key_change_destructive: self.primary_key_destructive,
        }
    }

    fn settings(&self) -> migrate_gen::error::Result<Settings> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        Settings::resolve(&config, &self.overrides())
    }
}

/// Exit code for a failed run: the library's code, or 1 for anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<MigrateError>()
        .map_or(1, MigrateError::exit_code)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = cli.settings()?;
    debug!(?settings, "resolved settings");

    let source = load_schema(&cli.from_file)?;
    let target = load_schema(&cli.to_file)?;

    let output = migrate_gen::generate(&source, &target, &settings)?;

    let output = format!("{}\n", output.trim_end_matches('\n'));
    match &cli.out {
        Some(path) => {
            std::fs::write(path, output)?;
            info!("Wrote migration to {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the migration.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
