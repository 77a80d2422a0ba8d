//! Bounded, deduplicating rolling window of bars.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::Bar;
use crate::error::{ConfigError, StateError};

/// Time-ordered, duplicate-free window of bars bounded to a capacity.
///
/// After every mutation the bars are sorted ascending by timestamp, contain
/// no two bars with the same timestamp, and number at most `capacity`; the
/// most recent bars are the ones retained.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    minimum_history: usize,
    /// `None` until the first `seed`
    bars: Option<Vec<Bar>>,
}

impl RollingWindow {
    /// Create an empty window.
    ///
    /// Fails if `capacity` cannot hold `minimum_history` bars.
    pub fn new(capacity: usize, minimum_history: usize) -> Result<Self, ConfigError> {
        if capacity < minimum_history {
            return Err(ConfigError::CapacityTooSmall {
                capacity,
                required: minimum_history,
            });
        }
        Ok(Self {
            capacity,
            minimum_history,
            bars: None,
        })
    }

    /// Replace all content with `bars`, sorted, deduplicated and trimmed to
    /// the most recent `capacity` entries.
    pub fn seed(&mut self, bars: impl IntoIterator<Item = Bar>) {
        let mut seeded: Vec<Bar> = bars.into_iter().collect();
        // Stable sort keeps the first delivered bar for a repeated timestamp.
        seeded.sort_by_key(|b| b.timestamp);
        seeded.dedup_by_key(|b| b.timestamp);
        Self::trim(&mut seeded, self.capacity);

        info!(
            bars = seeded.len(),
            capacity = self.capacity,
            minimum_history = self.minimum_history,
            "Window seeded"
        );
        self.bars = Some(seeded);
    }

    /// Merge newer bars into the window.
    ///
    /// Bars whose timestamp is already present are dropped, so re-delivery
    /// is safe. Returns the number of new bars still in the window after
    /// trimming; zero means the window content did not change.
    pub fn append(&mut self, bars: impl IntoIterator<Item = Bar>) -> Result<usize, StateError> {
        let capacity = self.capacity;
        let window = self.bars.as_mut().ok_or(StateError::NotSeeded)?;

        let mut inserted = Vec::new();
        for bar in bars {
            // Sorted insert; an `Ok` hit means the timestamp is already held.
            if let Err(index) = window.binary_search_by_key(&bar.timestamp, |b| b.timestamp) {
                window.insert(index, bar);
                inserted.push(bar.timestamp);
            }
        }
        Self::trim(window, capacity);

        let added = match window.first() {
            Some(oldest) => inserted.iter().filter(|ts| **ts >= oldest.timestamp).count(),
            None => 0,
        };
        if added == 0 {
            debug!("append(): all bars already in window, nothing added");
        } else {
            debug!(added, len = window.len(), "Window updated");
        }
        Ok(added)
    }

    /// Current ordered bars (oldest first).
    pub fn snapshot(&self) -> Result<&[Bar], StateError> {
        self.bars.as_deref().ok_or(StateError::NotSeeded)
    }

    /// True once the window holds at least `minimum_history` bars.
    pub fn is_ready(&self) -> bool {
        self.len() >= self.minimum_history
    }

    /// Timestamp of the newest bar, if any.
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.as_ref()?.last().map(|b| b.timestamp)
    }

    /// Number of bars currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.as_ref().map_or(0, Vec::len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `seed` has been called.
    pub fn is_seeded(&self) -> bool {
        self.bars.is_some()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn minimum_history(&self) -> usize {
        self.minimum_history
    }

    fn trim(bars: &mut Vec<Bar>, capacity: usize) {
        if bars.len() > capacity {
            let excess = bars.len() - capacity;
            bars.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn bar_at(hour: i64, close: f64) -> Bar {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour);
        Bar::new(ts, close, close + 0.5, close - 0.5, close)
    }

    fn bars(range: std::ops::Range<i64>) -> Vec<Bar> {
        range.map(|i| bar_at(i, 100.0 + i as f64)).collect()
    }

    #[test]
    fn test_capacity_below_minimum_is_rejected() {
        let err = RollingWindow::new(50, 78).unwrap_err();
        assert_eq!(
            err,
            ConfigError::CapacityTooSmall {
                capacity: 50,
                required: 78
            }
        );
        assert!(RollingWindow::new(78, 78).is_ok());
    }

    #[test]
    fn test_operations_before_seed() {
        let mut window = RollingWindow::new(10, 5).unwrap();
        assert_eq!(window.append(bars(0..1)), Err(StateError::NotSeeded));
        assert_eq!(window.snapshot().unwrap_err(), StateError::NotSeeded);
        assert!(!window.is_ready());
        assert!(window.latest_timestamp().is_none());
    }

    #[test]
    fn test_seed_sorts_dedups_and_trims() {
        let mut window = RollingWindow::new(5, 3).unwrap();
        let mut input = bars(0..8);
        input.reverse();
        input.push(bar_at(7, 999.0));
        window.seed(input);

        let snapshot = window.snapshot().unwrap();
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot[0].timestamp, bar_at(3, 0.0).timestamp);
        assert_eq!(snapshot[4].timestamp, bar_at(7, 0.0).timestamp);
        // The first delivery of a duplicated timestamp wins.
        assert_eq!(snapshot[4].close, 107.0);
    }

    #[test]
    fn test_append_same_bar_twice() {
        let mut window = RollingWindow::new(300, 78).unwrap();
        window.seed(bars(0..100));

        let next = bar_at(100, 200.0);
        assert_eq!(window.append([next]), Ok(1));
        assert_eq!(window.append([next]), Ok(0));
        assert_eq!(window.len(), 101);
        assert_eq!(window.latest_timestamp(), Some(next.timestamp));
    }

    #[test]
    fn test_append_drops_existing_and_keeps_newest() {
        let mut window = RollingWindow::new(5, 2).unwrap();
        window.seed(bars(0..5));

        // Two known bars, one new bar.
        let added = window.append(bars(3..6)).unwrap();
        assert_eq!(added, 1);
        let snapshot = window.snapshot().unwrap();
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot[0].timestamp, bar_at(1, 0.0).timestamp);
        assert_eq!(snapshot[4].timestamp, bar_at(5, 0.0).timestamp);
    }

    #[test]
    fn test_append_older_than_full_window_is_trimmed() {
        let mut window = RollingWindow::new(5, 2).unwrap();
        window.seed(bars(10..15));
        let before = window.snapshot().unwrap().to_vec();

        assert_eq!(window.append([bar_at(2, 1.0)]), Ok(0));
        assert_eq!(window.snapshot().unwrap(), before.as_slice());
    }

    #[test]
    fn test_append_out_of_order_is_resorted() {
        let mut window = RollingWindow::new(10, 2).unwrap();
        window.seed([bar_at(0, 1.0), bar_at(4, 1.0)]);
        window.append([bar_at(6, 1.0), bar_at(2, 1.0)]).unwrap();

        let hours: Vec<_> = window
            .snapshot()
            .unwrap()
            .iter()
            .map(|b| b.timestamp)
            .collect();
        let expected: Vec<_> = [0, 2, 4, 6].iter().map(|&h| bar_at(h, 0.0).timestamp).collect();
        assert_eq!(hours, expected);
    }

    #[test]
    fn test_readiness() {
        let mut window = RollingWindow::new(6, 4).unwrap();
        window.seed(bars(0..2));
        assert!(!window.is_ready());
        window.append(bars(2..3)).unwrap();
        assert!(!window.is_ready());
        window.append(bars(3..4)).unwrap();
        assert!(window.is_ready());
        window.append(bars(4..20)).unwrap();
        assert!(window.is_ready());
        assert_eq!(window.len(), 6);
    }
}
