//! Per-(instrument, timeframe) signal context.

use kumo_core::{Bar, ConfigError, KumoResult, RollingWindow, SignalEvent, Timeframe};
use kumo_indicators::{Ichimoku, IchimokuConfig, IchimokuSnapshot};
use tracing::debug;

use crate::engine::{SignalConfig, SignalEngine};

/// Owns the window, indicator and engine for one instrument/timeframe.
///
/// Calls must be serialized per pipeline; nothing here is shared.
#[derive(Debug, Clone)]
pub struct SignalPipeline {
    instrument: String,
    timeframe: Timeframe,
    window: RollingWindow,
    ichimoku: Ichimoku,
    engine: SignalEngine,
}

impl SignalPipeline {
    /// Build a pipeline whose window holds up to `capacity` bars.
    ///
    /// Fails if any period is zero or `capacity` is below the Ichimoku
    /// minimum history.
    pub fn new(
        instrument: impl Into<String>,
        timeframe: Timeframe,
        ichimoku: IchimokuConfig,
        signals: SignalConfig,
        capacity: usize,
    ) -> Result<Self, ConfigError> {
        let ichimoku = Ichimoku::new(ichimoku)?;
        let window = RollingWindow::new(capacity, ichimoku.minimum_history())?;
        let engine = SignalEngine::new(signals)?;
        Ok(Self {
            instrument: instrument.into(),
            timeframe,
            window,
            ichimoku,
            engine,
        })
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    /// Load history without evaluating anything.
    pub fn seed(&mut self, bars: impl IntoIterator<Item = Bar>) {
        self.window.seed(bars);
    }

    /// Merge newly delivered bars and evaluate once.
    ///
    /// Evaluation only happens when the newest bar changed, so a late bar
    /// slotted behind it never re-evaluates an already seen bar. Nothing is
    /// evaluated while the window is not ready. Firings are stamped with the
    /// newest bar's time.
    pub fn on_bars(&mut self, bars: impl IntoIterator<Item = Bar>) -> KumoResult<Vec<SignalEvent>> {
        let previous_newest = self.window.latest_timestamp();
        let added = self.window.append(bars)?;
        if added == 0 {
            return Ok(Vec::new());
        }
        if self.window.latest_timestamp() == previous_newest {
            debug!(
                instrument = %self.instrument,
                timeframe = %self.timeframe,
                added,
                "Only older bars arrived, newest bar already evaluated"
            );
            return Ok(Vec::new());
        }
        if !self.window.is_ready() {
            debug!(
                instrument = %self.instrument,
                timeframe = %self.timeframe,
                len = self.window.len(),
                required = self.window.minimum_history(),
                "Window not ready"
            );
            return Ok(Vec::new());
        }

        let snapshot = self.snapshot()?;
        let Some(now) = self.window.latest_timestamp() else {
            return Ok(Vec::new());
        };
        Ok(self
            .engine
            .evaluate(&snapshot, &self.instrument, self.timeframe, now))
    }

    /// Indicator values for the current window.
    pub fn snapshot(&self) -> KumoResult<IchimokuSnapshot> {
        Ok(self.ichimoku.snapshot(self.window.snapshot()?))
    }

    /// Clear cooldowns, keeping the window.
    pub fn reset(&mut self) {
        self.engine.reset();
    }
}
