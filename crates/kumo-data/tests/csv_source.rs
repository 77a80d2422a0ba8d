//! `CsvBarSource` through the `BarSource` trait.

use std::io::Write;
use std::path::Path;

use kumo_core::{BarSource, DataError, Timeframe};
use kumo_data::{load_csv, CsvBarSource};

fn write_hourly(path: &Path, n: usize) {
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "time,open,high,low,close,tick_volume").unwrap();
    for i in 0..n {
        let close = 1.1 + i as f64 * 0.0001;
        writeln!(
            file,
            "2024-01-{:02} {:02}:00:00,{:.5},{:.5},{:.5},{:.5},10",
            1 + i / 24,
            i % 24,
            close,
            close + 0.0005,
            close - 0.0005,
            close
        )
        .unwrap();
    }
}

#[tokio::test]
async fn test_historical_bars_returns_most_recent() {
    let dir = tempfile::tempdir().unwrap();
    write_hourly(&dir.path().join("EURUSD_H1.csv"), 48);

    let source = CsvBarSource::new(dir.path()).unwrap();
    let bars = source
        .historical_bars("EURUSD", Timeframe::Hour1, 10)
        .await
        .unwrap();

    assert_eq!(bars.len(), 10);
    assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    let all = load_csv(dir.path(), "EURUSD", Timeframe::Hour1).unwrap();
    assert_eq!(bars.last(), all.last());
}

#[tokio::test]
async fn test_latest_bars_with_large_count() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bars.csv");
    write_hourly(&file, 5);

    let source = CsvBarSource::new(&file).unwrap();
    let bars = source.latest_bars("ANY", Timeframe::Hour1, 300).await.unwrap();
    assert_eq!(bars.len(), 5);
    assert_eq!(source.name(), "csv");
}

#[tokio::test]
async fn test_empty_file_has_no_data() {
    let dir = tempfile::tempdir().unwrap();
    write_hourly(&dir.path().join("EURUSD.csv"), 0);

    let source = CsvBarSource::new(dir.path()).unwrap();
    assert_eq!(
        source.historical_bars("EURUSD", Timeframe::Daily, 10).await,
        Err(DataError::NoDataAvailable)
    );
}
