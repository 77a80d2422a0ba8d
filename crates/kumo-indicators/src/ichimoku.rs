//! Ichimoku Kinko Hyo.
//!
//! All lines are aligned with the input bars. Senkou A/B are already shifted
//! forward by `displacement`, and Chikou is shifted back by `chikou_shift`,
//! so index `t` holds exactly what a chart shows at bar `t`.

use kumo_core::{Bar, BarIndicator, ConfigError, Validate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::midpoint::Midpoint;

/// Ichimoku periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IchimokuConfig {
    pub tenkan_period: usize,
    pub kijun_period: usize,
    pub senkou_b_period: usize,
    /// Forward shift of the two senkou lines
    pub displacement: usize,
    /// Backward shift of the close-derived chikou line
    pub chikou_shift: usize,
}

impl Default for IchimokuConfig {
    fn default() -> Self {
        Self {
            tenkan_period: 9,
            kijun_period: 26,
            senkou_b_period: 52,
            displacement: 26,
            chikou_shift: 26,
        }
    }
}

impl IchimokuConfig {
    /// Bars needed before the cloud is defined at the newest position.
    pub fn minimum_history(&self) -> usize {
        self.senkou_b_period + self.displacement
    }
}

impl Validate for IchimokuConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("tenkan_period", self.tenkan_period),
            ("kijun_period", self.kijun_period),
            ("senkou_b_period", self.senkou_b_period),
            ("displacement", self.displacement),
            ("chikou_shift", self.chikou_shift),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(ConfigError::InvalidPeriod { name, value });
            }
        }
        Ok(())
    }
}

/// Full line series, one entry per input bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IchimokuLines {
    pub tenkan: Vec<Option<f64>>,
    pub kijun: Vec<Option<f64>>,
    pub senkou_a: Vec<Option<f64>>,
    pub senkou_b: Vec<Option<f64>>,
    pub chikou: Vec<Option<f64>>,
    pub close: Vec<f64>,
}

impl IchimokuLines {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Values at `index`, or all undefined when out of range.
    pub fn at(&self, index: usize) -> LineValues {
        if index >= self.len() {
            return LineValues::default();
        }
        let senkou_a = self.senkou_a[index];
        let senkou_b = self.senkou_b[index];
        LineValues {
            tenkan: self.tenkan[index],
            kijun: self.kijun[index],
            senkou_a,
            senkou_b,
            chikou: self.chikou[index],
            close: Some(self.close[index]),
            cloud_top: senkou_a.zip(senkou_b).map(|(a, b)| a.max(b)),
            cloud_bottom: senkou_a.zip(senkou_b).map(|(a, b)| a.min(b)),
        }
    }

    /// Number of positions where every line is defined.
    pub fn fully_defined(&self) -> usize {
        (0..self.len())
            .filter(|&i| {
                self.tenkan[i].is_some()
                    && self.kijun[i].is_some()
                    && self.senkou_a[i].is_some()
                    && self.senkou_b[i].is_some()
                    && self.chikou[i].is_some()
            })
            .count()
    }
}

/// Line values at one bar position. `None` means not enough history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LineValues {
    pub tenkan: Option<f64>,
    pub kijun: Option<f64>,
    pub senkou_a: Option<f64>,
    pub senkou_b: Option<f64>,
    pub chikou: Option<f64>,
    pub close: Option<f64>,
    pub cloud_top: Option<f64>,
    pub cloud_bottom: Option<f64>,
}

/// Values at the newest bar and the bar before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IchimokuSnapshot {
    pub current: LineValues,
    pub previous: LineValues,
}

impl IchimokuSnapshot {
    /// Snapshot with every value undefined.
    pub fn undefined() -> Self {
        Self::default()
    }
}

/// Ichimoku calculator.
#[derive(Debug, Clone)]
pub struct Ichimoku {
    config: IchimokuConfig,
    tenkan: Midpoint,
    kijun: Midpoint,
    senkou_b: Midpoint,
}

impl Ichimoku {
    /// Create a calculator, rejecting zero periods.
    pub fn new(config: IchimokuConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            tenkan: Midpoint::new("tenkan_period", config.tenkan_period)?,
            kijun: Midpoint::new("kijun_period", config.kijun_period)?,
            senkou_b: Midpoint::new("senkou_b_period", config.senkou_b_period)?,
        })
    }

    pub fn config(&self) -> &IchimokuConfig {
        &self.config
    }

    pub fn minimum_history(&self) -> usize {
        self.config.minimum_history()
    }

    /// Compute all five lines over `bars` (oldest first).
    pub fn calculate(&self, bars: &[Bar]) -> IchimokuLines {
        let tenkan = self.tenkan.calculate(bars);
        let kijun = self.kijun.calculate(bars);

        let base_a: Vec<Option<f64>> = tenkan
            .iter()
            .zip(&kijun)
            .map(|(t, k)| t.zip(*k).map(|(t, k)| (t + k) / 2.0))
            .collect();
        let senkou_a = shift_forward(&base_a, self.config.displacement);
        let senkou_b = shift_forward(&self.senkou_b.calculate(bars), self.config.displacement);

        let close: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let shift = self.config.chikou_shift;
        let chikou = (0..close.len())
            .map(|t| close.get(t + shift).copied())
            .collect();

        IchimokuLines {
            tenkan,
            kijun,
            senkou_a,
            senkou_b,
            chikou,
            close,
        }
    }

    /// Current and previous values for the newest two bars.
    ///
    /// Fewer than two bars gives an all-undefined snapshot.
    pub fn snapshot(&self, bars: &[Bar]) -> IchimokuSnapshot {
        if bars.len() < 2 {
            debug!(bars = bars.len(), "Not enough bars for a snapshot");
            return IchimokuSnapshot::undefined();
        }

        let lines = self.calculate(bars);
        let last = lines.len() - 1;
        IchimokuSnapshot {
            current: lines.at(last),
            previous: lines.at(last - 1),
        }
    }
}

/// Report the value computed at `t` at position `t + periods`.
fn shift_forward(series: &[Option<f64>], periods: usize) -> Vec<Option<f64>> {
    (0..series.len())
        .map(|t| t.checked_sub(periods).and_then(|src| series[src]))
        .collect()
}
