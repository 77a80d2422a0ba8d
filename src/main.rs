//! Ichimoku signal engine CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use kumo_config::load_config;
use kumo_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Command-line flags win over the [logging] section; a config that
    // fails to load is reported by the command itself.
    let logging = load_config(&cli.config)
        .map(|config| config.logging)
        .unwrap_or_default();
    let log_level = cli
        .log_level
        .map_or(logging.level.as_str(), |level| level.as_str());
    let json = cli.json_logs || logging.format == "json";
    let log_dir = cli.log_dir.as_deref().or(logging.file.as_deref());
    let _log_guard = setup_logging(log_level, json, log_dir);

    // Execute command
    match cli.command {
        Commands::Backtest(args) => cli::commands::backtest::run(args, &cli.config).await,
        Commands::Scan(args) => cli::commands::scan::run(args, &cli.config).await,
        Commands::Kinds => cli::commands::kinds::run().await,
        Commands::ValidateConfig(args) => cli::commands::validate::run(args, &cli.config).await,
    }
}
