//! Data source trait definitions.

use crate::error::DataError;
use crate::types::{Bar, Timeframe};
use async_trait::async_trait;

/// Supplier of validated bars for one or more instruments.
///
/// Implementations own connection and retry handling; the engine only sees
/// bars that already passed the ingestion boundary.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch the most recent `count` completed bars, oldest first.
    ///
    /// Used to seed a rolling window.
    async fn historical_bars(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, DataError>;

    /// Fetch the newest `count` bars for a tick.
    ///
    /// May include bars that were already delivered; the window drops them.
    async fn latest_bars(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, DataError> {
        self.historical_bars(instrument, timeframe, count).await
    }

    /// Get the data source name.
    fn name(&self) -> &str;
}
