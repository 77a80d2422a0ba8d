//! Property tests for rolling window invariants.
//!
//! Uses proptest to verify:
//! 1. Ordering: bars are strictly increasing by timestamp after any appends
//! 2. Bound: the window never exceeds its capacity
//! 3. Idempotence: re-appending the same bars changes nothing
//! 4. Readiness monotonicity: once ready, always ready

use chrono::{DateTime, Duration, TimeZone, Utc};
use kumo_core::{Bar, RollingWindow};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn bar_at(hour: u16) -> Bar {
    let close = 1.1 + f64::from(hour) * 0.0001;
    Bar::new(
        base_time() + Duration::hours(i64::from(hour)),
        close,
        close + 0.0005,
        close - 0.0005,
        close,
    )
}

/// Batches of bar hours; overlapping and out-of-order on purpose.
fn arb_batches() -> impl Strategy<Value = Vec<Vec<u16>>> {
    prop::collection::vec(prop::collection::vec(0u16..400, 1..8), 1..40)
}

fn arb_seed() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..400, 0..60)
}

fn timestamps(window: &RollingWindow) -> Vec<DateTime<Utc>> {
    window
        .snapshot()
        .unwrap()
        .iter()
        .map(|b| b.timestamp)
        .collect()
}

// ── 1 & 2. Ordering and bound ────────────────────────────────────────

proptest! {
    #[test]
    fn window_stays_sorted_unique_and_bounded(
        seed in arb_seed(),
        batches in arb_batches(),
        capacity in 20usize..80,
    ) {
        let mut window = RollingWindow::new(capacity, 10).unwrap();
        window.seed(seed.into_iter().map(bar_at));

        for batch in batches {
            window.append(batch.into_iter().map(bar_at)).unwrap();

            let ts = timestamps(&window);
            prop_assert!(ts.len() <= capacity);
            prop_assert!(ts.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// When everything fits, the window holds exactly the distinct bars seen.
    #[test]
    fn window_keeps_every_distinct_bar_below_capacity(
        seed in arb_seed(),
        batches in arb_batches(),
    ) {
        let mut window = RollingWindow::new(1000, 0).unwrap();
        let mut expected: Vec<u16> = seed.clone();
        window.seed(seed.into_iter().map(bar_at));
        for batch in batches {
            expected.extend(batch.iter().copied());
            window.append(batch.into_iter().map(bar_at)).unwrap();
        }
        expected.sort_unstable();
        expected.dedup();

        let expected_ts: Vec<_> = expected.into_iter().map(|h| bar_at(h).timestamp).collect();
        prop_assert_eq!(timestamps(&window), expected_ts);
    }
}

// ── 3. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn appending_twice_equals_appending_once(
        seed in arb_seed(),
        batch in prop::collection::vec(0u16..400, 1..20),
        capacity in 20usize..80,
    ) {
        let mut once = RollingWindow::new(capacity, 10).unwrap();
        once.seed(seed.iter().copied().map(bar_at));
        once.append(batch.iter().copied().map(bar_at)).unwrap();

        let mut twice = once.clone();
        let added = twice.append(batch.iter().copied().map(bar_at)).unwrap();

        prop_assert_eq!(added, 0);
        prop_assert_eq!(once.snapshot().unwrap(), twice.snapshot().unwrap());
    }
}

// ── 4. Readiness monotonicity ────────────────────────────────────────

proptest! {
    #[test]
    fn readiness_never_reverts(
        batches in prop::collection::vec(prop::collection::vec(0u16..400, 1..4), 1..60),
        minimum in 5usize..30,
    ) {
        let mut window = RollingWindow::new(minimum + 10, minimum).unwrap();
        window.seed(std::iter::empty::<Bar>());
        let mut was_ready = false;

        for batch in batches {
            window.append(batch.into_iter().map(bar_at)).unwrap();
            prop_assert_eq!(window.is_ready(), window.len() >= minimum);
            if was_ready {
                prop_assert!(window.is_ready());
            }
            was_ready = window.is_ready();
        }
    }
}
