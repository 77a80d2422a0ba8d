//! Bar sources for the signal engine.

mod csv_source;

pub use csv_source::{parse_timestamp, CsvBarSource};

use kumo_core::{Bar, DataError, Timeframe};
use std::path::Path;

/// Load every bar for `instrument` from a CSV file or directory.
pub fn load_csv(
    path: impl AsRef<Path>,
    instrument: &str,
    timeframe: Timeframe,
) -> Result<Vec<Bar>, DataError> {
    CsvBarSource::new(path)?.load(instrument, timeframe)
}
