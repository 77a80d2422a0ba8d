//! CLI command implementations.

pub mod backtest;
pub mod kinds;
pub mod scan;
pub mod validate;

use anyhow::{Context, Result};
use kumo_config::{load_config, AppConfig};
use kumo_core::Validate;
use std::path::Path;

/// Load and validate the configuration file.
pub(crate) fn load_validated(config_path: &Path) -> Result<AppConfig> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
