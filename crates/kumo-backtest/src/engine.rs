//! Replay driver.

use kumo_core::{
    Bar, ConfigError, DataError, KumoResult, SignalEvent, SignalKind, Timeframe, Validate,
};
use kumo_indicators::IchimokuConfig;
use kumo_signals::{SignalConfig, SignalPipeline};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Replay progress is logged every this many bars.
const PROGRESS_INTERVAL: usize = 500;

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Indicator periods
    pub ichimoku: IchimokuConfig,
    /// Rule and cooldown settings
    pub signals: SignalConfig,
    /// Bars used to seed the window before any evaluation
    pub warmup_bars: usize,
    /// Rolling window capacity
    pub window_capacity: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            ichimoku: IchimokuConfig::default(),
            signals: SignalConfig::default(),
            warmup_bars: 100,
            window_capacity: 300,
        }
    }
}

impl Validate for BacktestConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.warmup_bars == 0 {
            return Err(ConfigError::InvalidWarmup(
                "warmup_bars must be greater than 0".into(),
            ));
        }
        self.ichimoku.validate()?;
        self.signals.validate()?;
        let required = self.ichimoku.minimum_history();
        if self.window_capacity < required {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.window_capacity,
                required,
            });
        }
        Ok(())
    }
}

/// Single instrument, single timeframe replay engine.
///
/// Each bar is appended to the window before evaluation, and the window
/// never sees a bar later than the one being evaluated.
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Replay `bars` (oldest first) and collect every event that fires.
    ///
    /// `enabled` overrides the configured kinds for this run. Every run
    /// builds a fresh pipeline, so runs never share cooldown state.
    pub fn run(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        bars: &[Bar],
        enabled: Option<&[SignalKind]>,
    ) -> KumoResult<Vec<SignalEvent>> {
        let total = bars.len();
        let warmup = self.config.warmup_bars;
        if total <= warmup {
            return Err(DataError::InsufficientBars {
                required: warmup + 1,
                available: total,
            }
            .into());
        }

        let signals = match enabled {
            Some(kinds) => self.config.signals.clone().with_enabled(kinds.iter().copied()),
            None => self.config.signals.clone(),
        };
        let mut pipeline = SignalPipeline::new(
            instrument,
            timeframe,
            self.config.ichimoku,
            signals,
            self.config.window_capacity,
        )?;

        info!(
            instrument,
            %timeframe,
            bars = total,
            warmup,
            "Starting backtest"
        );

        pipeline.seed(bars[..warmup].iter().copied());

        let replay = &bars[warmup..];
        let mut events = Vec::new();
        for (i, bar) in replay.iter().enumerate() {
            events.extend(pipeline.on_bars([*bar])?);

            let done = i + 1;
            if done % PROGRESS_INTERVAL == 0 {
                info!(
                    instrument,
                    %timeframe,
                    replayed = done,
                    total = replay.len(),
                    signals = events.len(),
                    "Replay progress"
                );
            }
        }

        info!(
            instrument,
            %timeframe,
            signals = events.len(),
            "Backtest complete"
        );
        Ok(events)
    }
}
