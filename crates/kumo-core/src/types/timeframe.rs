//! Timeframe definitions for market data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timeframe for bars/candles.
///
/// Displayed with broker codes (`M1`, `H1`, `D1`, ...); short aliases such
/// as `1h` are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1 minute bars
    #[serde(rename = "M1", alias = "1m")]
    Minute1,
    /// 5 minute bars
    #[serde(rename = "M5", alias = "5m")]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "M15", alias = "15m")]
    Minute15,
    /// 30 minute bars
    #[serde(rename = "M30", alias = "30m")]
    Minute30,
    /// 1 hour bars
    #[serde(rename = "H1", alias = "1h")]
    #[default]
    Hour1,
    /// 4 hour bars
    #[serde(rename = "H4", alias = "4h")]
    Hour4,
    /// Daily bars
    #[serde(rename = "D1", alias = "1d")]
    Daily,
    /// Weekly bars
    #[serde(rename = "W1", alias = "1w")]
    Weekly,
    /// Monthly bars
    #[serde(rename = "MN1", alias = "1M")]
    Monthly,
}

impl Timeframe {
    /// Get the duration of the timeframe in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::Minute1 => 60,
            Timeframe::Minute5 => 300,
            Timeframe::Minute15 => 900,
            Timeframe::Minute30 => 1800,
            Timeframe::Hour1 => 3600,
            Timeframe::Hour4 => 14400,
            Timeframe::Daily => 86400,
            Timeframe::Weekly => 604800,
            Timeframe::Monthly => 2592000, // Approximate (30 days)
        }
    }

    /// Broker code for the timeframe.
    pub fn code(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "M1",
            Timeframe::Minute5 => "M5",
            Timeframe::Minute15 => "M15",
            Timeframe::Minute30 => "M30",
            Timeframe::Hour1 => "H1",
            Timeframe::Hour4 => "H4",
            Timeframe::Daily => "D1",
            Timeframe::Weekly => "W1",
            Timeframe::Monthly => "MN1",
        }
    }

    /// Get all available timeframes.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Minute1,
            Timeframe::Minute5,
            Timeframe::Minute15,
            Timeframe::Minute30,
            Timeframe::Hour1,
            Timeframe::Hour4,
            Timeframe::Daily,
            Timeframe::Weekly,
            Timeframe::Monthly,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // "1M" is a month, "1m" a minute: check before case folding.
        if s == "1M" {
            return Ok(Timeframe::Monthly);
        }
        if let Some(tf) = Timeframe::all()
            .iter()
            .find(|tf| tf.code().eq_ignore_ascii_case(s))
        {
            return Ok(*tf);
        }
        match s.to_lowercase().as_str() {
            "1m" | "1min" | "minute" => Ok(Timeframe::Minute1),
            "5m" | "5min" => Ok(Timeframe::Minute5),
            "15m" | "15min" => Ok(Timeframe::Minute15),
            "30m" | "30min" => Ok(Timeframe::Minute30),
            "1h" | "1hour" | "hour" => Ok(Timeframe::Hour1),
            "4h" | "4hour" => Ok(Timeframe::Hour4),
            "1d" | "day" | "daily" => Ok(Timeframe::Daily),
            "1w" | "week" | "weekly" => Ok(Timeframe::Weekly),
            "mn" | "month" | "monthly" => Ok(Timeframe::Monthly),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}
