//! Signal kinds and emitted signal events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::Timeframe;

/// Indicator values that justified a firing, keyed by line name.
pub type Evidence = BTreeMap<String, f64>;

/// Advisory trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six crossover/breakout rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Tenkan crosses above Kijun
    TkCrossUp,
    /// Tenkan crosses below Kijun
    TkCrossDown,
    /// Close breaks above the cloud top
    KumoBreakoutUp,
    /// Close breaks below the cloud bottom
    KumoBreakoutDown,
    /// Lagging line crosses above the previous close
    ChikouCrossUp,
    /// Lagging line crosses below the previous close
    ChikouCrossDown,
}

impl SignalKind {
    /// All kinds, in evaluation order.
    pub const ALL: [SignalKind; 6] = [
        SignalKind::TkCrossUp,
        SignalKind::TkCrossDown,
        SignalKind::KumoBreakoutUp,
        SignalKind::KumoBreakoutDown,
        SignalKind::ChikouCrossUp,
        SignalKind::ChikouCrossDown,
    ];

    /// Direction implied by the kind.
    pub fn direction(&self) -> Direction {
        match self {
            SignalKind::TkCrossUp | SignalKind::KumoBreakoutUp | SignalKind::ChikouCrossUp => {
                Direction::Buy
            }
            SignalKind::TkCrossDown
            | SignalKind::KumoBreakoutDown
            | SignalKind::ChikouCrossDown => Direction::Sell,
        }
    }

    /// Stable snake-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::TkCrossUp => "tk_cross_up",
            SignalKind::TkCrossDown => "tk_cross_down",
            SignalKind::KumoBreakoutUp => "kumo_breakout_up",
            SignalKind::KumoBreakoutDown => "kumo_breakout_down",
            SignalKind::ChikouCrossUp => "chikou_cross_up",
            SignalKind::ChikouCrossDown => "chikou_cross_down",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::TkCrossUp => "TK Cross ↑",
            SignalKind::TkCrossDown => "TK Cross ↓",
            SignalKind::KumoBreakoutUp => "Kumo Breakout ↑",
            SignalKind::KumoBreakoutDown => "Kumo Breakout ↓",
            SignalKind::ChikouCrossUp => "Chikou Cross ↑",
            SignalKind::ChikouCrossDown => "Chikou Cross ↓",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SignalKind::TkCrossUp => "Tenkan crosses above Kijun (optionally price above the cloud)",
            SignalKind::TkCrossDown => {
                "Tenkan crosses below Kijun (optionally price below the cloud)"
            }
            SignalKind::KumoBreakoutUp => "Close moves above the cloud top",
            SignalKind::KumoBreakoutDown => "Close moves below the cloud bottom",
            SignalKind::ChikouCrossUp => "Lagging line crosses above the previous close",
            SignalKind::ChikouCrossDown => "Lagging line crosses below the previous close",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown signal kind: {}", s))
    }
}

/// An emitted, immutable signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub instrument: String,
    pub timeframe: Timeframe,
    pub kind: SignalKind,
    pub direction: Direction,
    /// Time of the bar that triggered the signal
    pub timestamp: DateTime<Utc>,
    /// Close of the triggering bar
    pub price: f64,
    pub evidence: Evidence,
}

impl SignalEvent {
    pub fn new(
        instrument: impl Into<String>,
        timeframe: Timeframe,
        kind: SignalKind,
        timestamp: DateTime<Utc>,
        price: f64,
        evidence: Evidence,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            timeframe,
            kind,
            direction: kind.direction(),
            timestamp,
            price,
            evidence,
        }
    }
}

impl fmt::Display for SignalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {} {} | price={:.5} | {}",
            self.direction,
            self.kind.as_str().to_uppercase(),
            self.instrument,
            self.timeframe,
            self.price,
            self.timestamp.format("%Y-%m-%d %H:%M UTC")
        )
    }
}
