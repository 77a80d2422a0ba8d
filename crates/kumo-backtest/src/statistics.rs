//! Signal statistics.

use chrono::{DateTime, Utc};
use kumo_core::{Direction, SignalEvent, SignalKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts over a set of signal events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    /// Total number of events
    pub total: usize,
    /// BUY events
    pub buys: usize,
    /// SELL events
    pub sells: usize,
    /// Events per kind
    pub by_kind: BTreeMap<SignalKind, usize>,
    /// Earliest event time
    pub first: Option<DateTime<Utc>>,
    /// Latest event time
    pub last: Option<DateTime<Utc>>,
}

impl SignalStats {
    /// Compute statistics over `events`.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a SignalEvent>) -> Self {
        let mut stats = Self::default();
        for event in events {
            stats.add(event);
        }
        stats
    }

    /// Add one event.
    pub fn add(&mut self, event: &SignalEvent) {
        self.total += 1;
        match event.direction {
            Direction::Buy => self.buys += 1,
            Direction::Sell => self.sells += 1,
        }
        *self.by_kind.entry(event.kind).or_insert(0) += 1;

        self.first = Some(self.first.map_or(event.timestamp, |t| t.min(event.timestamp)));
        self.last = Some(self.last.map_or(event.timestamp, |t| t.max(event.timestamp)));
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count for a single kind.
    pub fn count(&self, kind: SignalKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}
