//! Configuration management.
//!
//! Settings come from a TOML file, overridden by `KUMO__`-prefixed
//! environment variables (`KUMO__SIGNALS__COOLDOWN_MINUTES=15`).

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, LoggingConfig, PairConfig};

use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("KUMO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Parse configuration from TOML text, without environment overrides.
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(contents, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
