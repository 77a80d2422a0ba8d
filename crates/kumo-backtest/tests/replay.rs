//! Replay integration tests over synthetic bar series.

use chrono::{Duration, TimeZone, Utc};
use kumo_backtest::{BacktestConfig, BacktestEngine};
use kumo_core::{Bar, DataError, Direction, KumoError, SignalKind, Timeframe};
use kumo_signals::SignalConfig;

const STEP: f64 = 0.0001;

/// Hourly bars from a close series, five pips either side.
fn bars_from(closes: impl IntoIterator<Item = f64>) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .into_iter()
        .enumerate()
        .map(|(i, close)| {
            let close = (close * 1e5).round() / 1e5;
            Bar::new(
                start + Duration::hours(i as i64),
                close,
                close + 0.0005,
                close - 0.0005,
                close,
            )
        })
        .collect()
}

fn linear(n: usize) -> Vec<Bar> {
    bars_from((0..n).map(|i| 1.1 + i as f64 * STEP))
}

/// Declines for `turn` bars, then rises at the same pace.
fn v_shape(n: usize, turn: usize) -> Vec<Bar> {
    bars_from((0..n).map(|i| {
        let bottom = 1.2 - turn as f64 * STEP;
        if i < turn {
            1.2 - i as f64 * STEP
        } else {
            bottom + (i - turn) as f64 * STEP
        }
    }))
}

/// No cooldown and no cloud filter, for maximum signal generation.
fn fast_engine() -> BacktestEngine {
    BacktestEngine::new(BacktestConfig {
        signals: SignalConfig {
            cooldown_minutes: 0,
            cloud_filter: false,
            ..Default::default()
        },
        warmup_bars: 100,
        window_capacity: 300,
        ..Default::default()
    })
    .unwrap()
}

const NON_LAGGING: [SignalKind; 4] = [
    SignalKind::TkCrossUp,
    SignalKind::TkCrossDown,
    SignalKind::KumoBreakoutUp,
    SignalKind::KumoBreakoutDown,
];

#[test]
fn test_linear_uptrend_never_signals_down() {
    let bars = linear(300);
    let events = fast_engine()
        .run("EURUSD", Timeframe::Hour1, &bars, Some(&NON_LAGGING))
        .unwrap();

    assert!(events.iter().all(|e| e.direction == Direction::Buy));
    // Close stays above the cloud and tenkan above kijun the whole time.
    assert!(events.is_empty());
}

#[test]
fn test_v_shape_breaks_out_above_cloud() {
    let bars = v_shape(300, 150);
    let events = fast_engine()
        .run("EURUSD", Timeframe::Hour1, &bars, Some(&NON_LAGGING))
        .unwrap();

    let breakouts: Vec<_> = events
        .iter()
        .filter(|e| e.kind == SignalKind::KumoBreakoutUp)
        .collect();
    assert!(!breakouts.is_empty());
    assert!(breakouts.iter().all(|e| e.timestamp > bars[150].timestamp));
    assert!(events.iter().all(|e| e.kind != SignalKind::KumoBreakoutDown));
}

#[test]
fn test_default_kinds_skip_on_undefined_lagging_line() {
    // The chikou line is never defined at the newest bar, so with the
    // lagging-line rules enabled every evaluation is skipped.
    let bars = v_shape(300, 150);
    let events = fast_engine()
        .run("EURUSD", Timeframe::Hour1, &bars, None)
        .unwrap();
    assert!(events.is_empty());
}

#[test]
fn test_no_signals_before_warmup() {
    let bars = v_shape(300, 150);
    let engine = fast_engine();
    let events = engine
        .run("EURUSD", Timeframe::Hour1, &bars, Some(&NON_LAGGING))
        .unwrap();

    let first_evaluated = bars[engine.config().warmup_bars].timestamp;
    assert!(events.iter().all(|e| e.timestamp >= first_evaluated));
}

#[test]
fn test_truncated_history_gives_event_prefix() {
    // Events up to bar k do not depend on bars after k.
    let bars = v_shape(300, 150);
    let engine = fast_engine();
    let full = engine
        .run("EURUSD", Timeframe::Hour1, &bars, Some(&NON_LAGGING))
        .unwrap();

    for cut in [120, 180, 200, 240] {
        let partial = engine
            .run("EURUSD", Timeframe::Hour1, &bars[..cut], Some(&NON_LAGGING))
            .unwrap();
        let expected: Vec<_> = full
            .iter()
            .filter(|e| e.timestamp < bars[cut].timestamp)
            .cloned()
            .collect();
        assert_eq!(partial, expected, "cut at {}", cut);
    }
}

#[test]
fn test_two_runs_are_independent() {
    let bars = v_shape(300, 150);
    let engine = BacktestEngine::new(BacktestConfig {
        signals: SignalConfig {
            cooldown_minutes: 24 * 60,
            cloud_filter: false,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();

    let first = engine
        .run("EURUSD", Timeframe::Hour1, &bars, Some(&NON_LAGGING))
        .unwrap();
    let second = engine
        .run("EURUSD", Timeframe::Hour1, &bars, Some(&NON_LAGGING))
        .unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_raises_when_not_enough_bars() {
    let err = fast_engine()
        .run("EURUSD", Timeframe::Hour1, &linear(100), None)
        .unwrap_err();
    assert!(matches!(
        err,
        KumoError::Data(DataError::InsufficientBars {
            required: 101,
            available: 100
        })
    ));
}

#[test]
fn test_run_with_minimum_viable_bars() {
    let events = fast_engine()
        .run("EURUSD", Timeframe::Hour1, &linear(101), Some(&NON_LAGGING))
        .unwrap();
    assert!(events.is_empty());
}

#[test]
fn test_signals_have_correct_pair_and_timeframe() {
    let bars = v_shape(300, 150);
    let events = fast_engine()
        .run("GBPJPY", Timeframe::Hour4, &bars, Some(&NON_LAGGING))
        .unwrap();

    assert!(!events.is_empty());
    for event in &events {
        assert_eq!(event.instrument, "GBPJPY");
        assert_eq!(event.timeframe, Timeframe::Hour4);
        assert_eq!(event.direction, event.kind.direction());
    }
}

#[test]
fn test_enabled_kinds_filter_respected() {
    let bars = v_shape(300, 150);
    let events = fast_engine()
        .run(
            "EURUSD",
            Timeframe::Hour1,
            &bars,
            Some(&[SignalKind::KumoBreakoutUp]),
        )
        .unwrap();

    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.kind == SignalKind::KumoBreakoutUp));
}
