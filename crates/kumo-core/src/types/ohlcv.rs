//! OHLC (Open, High, Low, Close) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One OHLC observation for an instrument/timeframe.
///
/// Uses f64 for fast indicator calculations. The timestamp is the bar's
/// unique key inside a [`RollingWindow`](super::RollingWindow).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
}

impl Bar {
    /// Create a new bar without validation.
    ///
    /// Use [`Bar::try_new`] for data that has not crossed the ingestion
    /// boundary yet.
    pub fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Create a new bar, rejecting non-finite prices and inverted ranges.
    pub fn try_new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, DataError> {
        let bar = Self::new(timestamp, open, high, low, close);
        bar.validate()?;
        Ok(bar)
    }

    /// Check the bar's invariants: finite prices and `high >= low`.
    pub fn validate(&self) -> Result<(), DataError> {
        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Err(DataError::InvalidBar(format!(
                    "{} is not finite ({}) at {}",
                    name, value, self.timestamp
                )));
            }
        }
        if self.high < self.low {
            return Err(DataError::InvalidBar(format!(
                "high ({}) < low ({}) at {}",
                self.high, self.low, self.timestamp
            )));
        }
        Ok(())
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Raw bar record as delivered by a data collaborator.
///
/// Every field is optional so that incomplete records can be rejected with a
/// precise [`DataError::MissingField`] instead of a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarRecord {
    #[serde(default, alias = "time")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
}

impl TryFrom<BarRecord> for Bar {
    type Error = DataError;

    fn try_from(record: BarRecord) -> Result<Self, Self::Error> {
        let timestamp = record
            .timestamp
            .ok_or(DataError::MissingField("timestamp"))?;
        let open = record.open.ok_or(DataError::MissingField("open"))?;
        let high = record.high.ok_or(DataError::MissingField("high"))?;
        let low = record.low.ok_or(DataError::MissingField("low"))?;
        let close = record.close.ok_or(DataError::MissingField("close"))?;

        Bar::try_new(timestamp, open, high, low, close)
    }
}

impl From<Bar> for BarRecord {
    fn from(bar: Bar) -> Self {
        Self {
            timestamp: Some(bar.timestamp),
            open: Some(bar.open),
            high: Some(bar.high),
            low: Some(bar.low),
            close: Some(bar.close),
        }
    }
}
