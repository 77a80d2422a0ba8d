//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use kumo_core::Timeframe;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kumo")]
#[command(author, version, about = "Ichimoku crossover and cloud breakout signal engine")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "KUMO_CONFIG")]
    pub config: PathBuf,

    /// Log level (defaults to the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Also write daily rolling log files to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay historical bars and report every signal
    Backtest(BacktestArgs),
    /// Evaluate the newest bar of each pair and log any signals
    Scan(ScanArgs),
    /// List signal kinds
    Kinds,
    /// Validate configuration
    ValidateConfig(ValidateArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Data file or directory of `{SYMBOL}_{TF}.csv` files
    #[arg(long, default_value = "./data")]
    pub data: PathBuf,

    /// Only this symbol (with --timeframe: this pair alone, all signal kinds)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Only this timeframe (e.g. H1, 4h)
    #[arg(short, long)]
    pub timeframe: Option<Timeframe>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Don't write the signals CSV
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Data file or directory of `{SYMBOL}_{TF}.csv` files
    #[arg(long, default_value = "./data")]
    pub data: PathBuf,

    /// Only this symbol
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Only this timeframe
    #[arg(short, long)]
    pub timeframe: Option<Timeframe>,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub show: bool,
}
