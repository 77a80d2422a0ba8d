//! Per-key cooldown tracking.

use chrono::{DateTime, Duration, Utc};
use kumo_core::{SignalKind, Timeframe};
use std::collections::HashMap;

type CooldownKey = (String, Timeframe, SignalKind);

/// Last firing time per (instrument, timeframe, kind).
///
/// A key is cooling while less than `cooldown` has elapsed since its last
/// recorded firing; at exactly `cooldown` it may fire again. Keys are
/// independent, so firing one kind never blocks another.
#[derive(Debug, Clone)]
pub struct CooldownRegistry {
    cooldown: Duration,
    last_fired: HashMap<CooldownKey, DateTime<Utc>>,
}

impl CooldownRegistry {
    /// Create an empty registry.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fired: HashMap::new(),
        }
    }

    /// Create an empty registry with a cooldown in minutes.
    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(Duration::minutes(i64::from(minutes)))
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Check whether `kind` fired for this pair less than `cooldown` before `now`.
    pub fn is_cooling(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        kind: SignalKind,
        now: DateTime<Utc>,
    ) -> bool {
        let key = (instrument.to_string(), timeframe, kind);
        match self.last_fired.get(&key) {
            Some(last) => now - *last < self.cooldown,
            None => false,
        }
    }

    /// Record a firing at `now`.
    pub fn record(
        &mut self,
        instrument: &str,
        timeframe: Timeframe,
        kind: SignalKind,
        now: DateTime<Utc>,
    ) {
        self.last_fired
            .insert((instrument.to_string(), timeframe, kind), now);
    }

    /// Last recorded firing, if any.
    pub fn last_fired(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        kind: SignalKind,
    ) -> Option<DateTime<Utc>> {
        self.last_fired
            .get(&(instrument.to_string(), timeframe, kind))
            .copied()
    }

    /// Forget every recorded firing.
    pub fn clear(&mut self) {
        self.last_fired.clear();
    }

    pub fn len(&self) -> usize {
        self.last_fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_fired.is_empty()
    }
}
