//! Signal delivery to the log.

use kumo_core::{KumoResult, SignalEvent, SignalSink};
use tracing::info;

/// Sink that writes every delivered event to the log at info level.
///
/// Useful as the default delivery channel for replays and dry runs.
#[derive(Debug, Default)]
pub struct LogSink {
    delivered: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events delivered so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl SignalSink for LogSink {
    fn deliver(&mut self, event: &SignalEvent) -> KumoResult<()> {
        info!(
            instrument = %event.instrument,
            timeframe = %event.timeframe,
            kind = %event.kind,
            direction = %event.kind.direction(),
            price = event.price,
            at = %event.timestamp.format("%Y-%m-%d %H:%M UTC"),
            "{}",
            event.kind.label()
        );
        self.delivered += 1;
        Ok(())
    }
}
