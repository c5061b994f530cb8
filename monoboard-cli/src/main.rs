//! MonoBoard CLI - task boards for small projects.
//!
//! Commands:
//! - `monoboard project list|new|select|rename|delete|notes|export|import`
//! - `monoboard column list|add|rename|toggle|delete`
//! - `monoboard task add|show|edit|move|reorder|delete|tag|untag|check`
//! - `monoboard board [--tag T] [--priority P] [--sort KEY] [--order asc|desc]`
//! - `monoboard tags`
//!
//! Environment variables:
//! - MONOBOARD_DATA_DIR: Directory holding `monoboard-data.json`
//! - MONOBOARD_EXPORT_DIR: Default directory for `project export`
//! - MONOBOARD_LOG_LEVEL: Default log filter when RUST_LOG is unset
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

mod cli;
mod commands;
mod config;
mod table;

use clap::Parser;
use monoboard::{FileBackend, ProjectStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::CliConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let (config, config_error) = CliConfig::load(cli.data_dir.clone());

    // Initialize tracing with appropriate level
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = config_error {
        warn!(error = %e, "invalid configuration, using defaults");
    }

    if let Err(e) = run(cli, &config).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    info!(data_dir = %config.data_dir.display(), "opening store");
    let today = chrono::Local::now().date_naive();
    let backend = FileBackend::new(&config.data_dir);
    let mut store = ProjectStore::open_or_seed(backend, today).await;

    // Persist whatever succeeded, even when the command itself failed
    let result = commands::run(cli.command, &mut store, config, today).await;
    store.save().await?;
    result
}
