//! Indicator trait definitions.

use crate::types::Bar;

/// Technical indicator computed over a full bar sequence.
///
/// Output is aligned with the input: one entry per bar, `None` where the
/// bar has too little history for the value to exist.
pub trait BarIndicator: Send + Sync {
    /// The per-bar output type of the indicator.
    type Output;

    /// Calculate indicator values for bars ordered oldest first.
    fn calculate(&self, bars: &[Bar]) -> Vec<Option<Self::Output>>;

    /// Minimum number of bars before the first defined value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Check if there's enough data for at least one defined value.
    fn has_enough_data(&self, bars: &[Bar]) -> bool {
        bars.len() >= self.period()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    struct RangeIndicator {
        period: usize,
    }

    impl BarIndicator for RangeIndicator {
        type Output = f64;

        fn calculate(&self, bars: &[Bar]) -> Vec<Option<f64>> {
            (0..bars.len())
                .map(|i| {
                    if i + 1 < self.period {
                        return None;
                    }
                    Some(bars[i + 1 - self.period..=i].iter().map(Bar::range).sum())
                })
                .collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "range"
        }
    }

    fn bars(n: usize) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| Bar::new(start + Duration::hours(i as i64), 1.0, 2.0, 1.0, 1.5))
            .collect()
    }

    #[test]
    fn test_indicator_alignment() {
        let indicator = RangeIndicator { period: 3 };
        let result = indicator.calculate(&bars(5));

        assert_eq!(result.len(), 5);
        assert!(result[0].is_none() && result[1].is_none());
        assert_eq!(result[2], Some(3.0));
        assert!(!indicator.has_enough_data(&bars(2)));
        assert!(indicator.has_enough_data(&bars(3)));
    }
}
