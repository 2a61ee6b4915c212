//! `quire` — command-line shell for the paper catalogue.
//!
//! Reads `quire.toml` (or the path specified with `--config`), opens the
//! SQLite store, and runs one subcommand. Configuration keys can also be
//! supplied as `QUIRE_DB_PATH` / `QUIRE_BACKUP_DIR` environment variables.

mod commands;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use quire_store_sqlite::{SqliteStore, StoreConfig};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use commands::Command;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "quire", version, about = "Local catalogue for academic papers")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "quire.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file; unset keys fall back to the
/// store defaults (`data/papers.db`, `data/backups`).
#[derive(Deserialize, Default)]
struct FileConfig {
  db_path:    Option<PathBuf>,
  backup_dir: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("QUIRE"))
    .build()
    .context("failed to read configuration")?;

  let file_cfg: FileConfig = settings
    .try_deserialize()
    .context("failed to deserialise configuration")?;

  let defaults = StoreConfig::default();
  let store_cfg = StoreConfig {
    db_path:    file_cfg.db_path.unwrap_or(defaults.db_path),
    backup_dir: file_cfg.backup_dir.unwrap_or(defaults.backup_dir),
  };

  let store = SqliteStore::open(store_cfg.clone())
    .await
    .with_context(|| format!("failed to open store at {:?}", store_cfg.db_path))?;

  commands::run(&store, cli.command).await
}
