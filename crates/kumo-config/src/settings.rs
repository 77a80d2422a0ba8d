//! Configuration structures.

use chrono::NaiveDate;
use kumo_backtest::BacktestConfig;
use kumo_core::{ConfigError, SignalKind, Timeframe, Validate};
use kumo_indicators::IchimokuConfig;
use kumo_signals::SignalConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ichimoku: IchimokuConfig,
    #[serde(default)]
    pub signals: SignalConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub pairs: Vec<PairConfig>,
}

impl AppConfig {
    /// Replay settings assembled from the indicator, signal and backtest
    /// sections.
    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            ichimoku: self.ichimoku,
            signals: self.signals.clone(),
            warmup_bars: self.backtest.warmup_bars,
            window_capacity: self.backtest.window_capacity,
        }
    }

    /// Pairs to replay, after command-line overrides.
    ///
    /// A symbol together with a timeframe replaces the configured pairs with
    /// that single pair and every signal kind. A symbol alone keeps only the
    /// configured entries for that symbol.
    pub fn select_pairs(&self, symbol: Option<&str>, timeframe: Option<Timeframe>) -> Vec<PairConfig> {
        match (symbol, timeframe) {
            (Some(symbol), Some(timeframe)) => vec![PairConfig {
                symbol: symbol.to_string(),
                timeframes: vec![timeframe],
                enabled_signals: SignalKind::ALL.to_vec(),
            }],
            (Some(symbol), None) => self
                .pairs
                .iter()
                .filter(|p| p.symbol == symbol)
                .cloned()
                .collect(),
            (None, Some(timeframe)) => self
                .pairs
                .iter()
                .filter(|p| p.timeframes.contains(&timeframe))
                .map(|p| PairConfig {
                    timeframes: vec![timeframe],
                    ..p.clone()
                })
                .collect(),
            (None, None) => self.pairs.clone(),
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.backtest_config().validate()?;

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        if let (Some(from), Some(to)) = (self.backtest.from_date, self.backtest.to_date) {
            if from > to {
                return Err(ConfigError::Invalid(format!(
                    "backtest.from_date ({from}) is after backtest.to_date ({to})"
                )));
            }
        }

        for pair in &self.pairs {
            pair.validate()?;
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "kumo".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory for daily rolling log files
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Backtest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub warmup_bars: usize,
    pub window_capacity: usize,
    /// Where signal CSV files are written
    pub output_dir: PathBuf,
    /// Inclusive first day of the replay range
    pub from_date: Option<NaiveDate>,
    /// Inclusive last day of the replay range
    pub to_date: Option<NaiveDate>,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        let defaults = BacktestConfig::default();
        Self {
            warmup_bars: defaults.warmup_bars,
            window_capacity: defaults.window_capacity,
            output_dir: PathBuf::from("./backtest_results"),
            from_date: None,
            to_date: None,
        }
    }
}

/// One instrument and the timeframes it is monitored on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairConfig {
    pub symbol: String,
    pub timeframes: Vec<Timeframe>,
    /// Empty means the kinds enabled in `[signals]`.
    #[serde(default)]
    pub enabled_signals: Vec<SignalKind>,
}

impl PairConfig {
    /// Per-pair kind override, if any.
    pub fn enabled_kinds(&self) -> Option<Vec<SignalKind>> {
        if self.enabled_signals.is_empty() {
            None
        } else {
            Some(self.enabled_signals.clone())
        }
    }
}

impl Validate for PairConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("pair symbol must not be empty".into()));
        }
        if self.timeframes.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "pair {} has no timeframes",
                self.symbol
            )));
        }
        Ok(())
    }
}
