//! Signal sink trait definitions.

use crate::error::KumoResult;
use crate::types::SignalEvent;

/// Receiver of emitted signals, one at a time, in emission order.
///
/// Delivery guarantees (retries, rate limits) belong to the sink.
pub trait SignalSink {
    /// Deliver a single event.
    fn deliver(&mut self, event: &SignalEvent) -> KumoResult<()>;

    /// Deliver events in order, stopping at the first failure.
    fn deliver_all(&mut self, events: &[SignalEvent]) -> KumoResult<()> {
        for event in events {
            self.deliver(event)?;
        }
        Ok(())
    }
}
