//! Rolling high/low midpoint.

use kumo_core::{Bar, BarIndicator, ConfigError};

/// `(highest high + lowest low) / 2` over the trailing `period` bars.
///
/// The window is inclusive of the bar being computed, so the first defined
/// value sits at index `period - 1`.
#[derive(Debug, Clone)]
pub struct Midpoint {
    period: usize,
    name: &'static str,
}

impl Midpoint {
    /// Create a midpoint line named `name` over `period` bars.
    pub fn new(name: &'static str, period: usize) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::InvalidPeriod {
                name,
                value: period,
            });
        }
        Ok(Self { period, name })
    }
}

impl BarIndicator for Midpoint {
    type Output = f64;

    fn calculate(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let mut result = vec![None; bars.len()];
        if bars.len() < self.period {
            return result;
        }

        for (offset, window) in bars.windows(self.period).enumerate() {
            let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            result[offset + self.period - 1] = Some((highest + lowest) / 2.0);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bars(highs_lows: &[(f64, f64)]) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        highs_lows
            .iter()
            .enumerate()
            .map(|(i, &(h, l))| {
                let mid = (h + l) / 2.0;
                Bar::new(start + Duration::hours(i as i64), mid, h, l, mid)
            })
            .collect()
    }

    #[test]
    fn test_midpoint() {
        let mid = Midpoint::new("tenkan", 3).unwrap();
        let data = bars(&[(2.0, 1.0), (5.0, 3.0), (4.0, 0.5), (3.0, 2.0)]);
        let result = mid.calculate(&data);

        assert_eq!(result.len(), 4);
        assert!(result[0].is_none() && result[1].is_none());
        assert_eq!(result[2], Some((5.0 + 0.5) / 2.0));
        assert_eq!(result[3], Some((5.0 + 0.5) / 2.0));
    }

    #[test]
    fn test_midpoint_insufficient_data() {
        let mid = Midpoint::new("kijun", 5).unwrap();
        let result = mid.calculate(&bars(&[(2.0, 1.0), (3.0, 2.0)]));

        assert_eq!(result, vec![None, None]);
        assert!(!mid.has_enough_data(&bars(&[(2.0, 1.0)])));
    }

    #[test]
    fn test_zero_period_rejected() {
        assert_eq!(
            Midpoint::new("senkou_b", 0).unwrap_err(),
            ConfigError::InvalidPeriod {
                name: "senkou_b",
                value: 0
            }
        );
    }
}
