//! CSV bar source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use csv::ReaderBuilder;
use kumo_core::{Bar, BarRecord, BarSource, DataError, Timeframe};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV record format. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        default,
        alias = "Time",
        alias = "timestamp",
        alias = "Timestamp",
        alias = "date",
        alias = "Date",
        alias = "datetime"
    )]
    time: Option<String>,
    #[serde(default, alias = "Open")]
    open: Option<f64>,
    #[serde(default, alias = "High")]
    high: Option<f64>,
    #[serde(default, alias = "Low")]
    low: Option<f64>,
    #[serde(default, alias = "Close")]
    close: Option<f64>,
}

impl CsvRecord {
    fn into_bar(self) -> Result<Bar, DataError> {
        let timestamp = match self.time.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(parse_timestamp(s)?),
            _ => None,
        };
        Bar::try_from(BarRecord {
            timestamp,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        })
    }
}

/// Historical bars from CSV files.
///
/// `path` is either a single file, used for every instrument, or a directory
/// holding `{INSTRUMENT}_{TIMEFRAME}.csv` or `{INSTRUMENT}.csv` files.
#[derive(Debug, Clone)]
pub struct CsvBarSource {
    path: PathBuf,
}

impl CsvBarSource {
    /// Create a new CSV bar source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// File that holds bars for this instrument and timeframe.
    pub fn resolve(&self, instrument: &str, timeframe: Timeframe) -> Result<PathBuf, DataError> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }

        let candidates = [
            format!("{}_{}.csv", instrument, timeframe),
            format!("{}.csv", instrument),
        ];
        candidates
            .iter()
            .map(|name| self.path.join(name))
            .find(|p| p.is_file())
            .ok_or(DataError::NoDataAvailable)
    }

    /// Load all bars, sorted oldest first.
    pub fn load(&self, instrument: &str, timeframe: Timeframe) -> Result<Vec<Bar>, DataError> {
        let path = self.resolve(instrument, timeframe)?;
        let reader = std::fs::File::open(&path)
            .map_err(|e| DataError::ParseError(format!("{}: {}", path.display(), e)))?;
        let bars = read_bars(reader)?;

        debug!(
            instrument,
            %timeframe,
            path = %path.display(),
            bars = bars.len(),
            "Loaded CSV bars"
        );
        Ok(bars)
    }
}

#[async_trait]
impl BarSource for CsvBarSource {
    async fn historical_bars(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, DataError> {
        let mut bars = self.load(instrument, timeframe)?;
        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        let start = bars.len().saturating_sub(count);
        Ok(bars.split_off(start))
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Read and validate bars from CSV, sorted by timestamp.
fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let bar = record.into_bar().map_err(|e| match e {
            DataError::MissingField(_) | DataError::InvalidBar(_) => {
                DataError::InvalidBar(format!("row {}: {}", line + 1, e))
            }
            other => other,
        })?;
        bars.push(bar);
    }

    bars.sort_by_key(|b| b.timestamp);
    Ok(bars)
}

/// Parse a UTC timestamp in any of the common export formats.
///
/// Plain integers are unix seconds, or milliseconds when larger than 10^10.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y.%m.%d %H:%M:%S",
        "%Y.%m.%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.and_utc());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return Ok(d.and_time(chrono::NaiveTime::MIN).and_utc());
        }
    }

    if let Ok(ts) = s.parse::<i64>() {
        let parsed = if ts > 10_000_000_000 {
            Utc.timestamp_millis_opt(ts).single()
        } else {
            Utc.timestamp_opt(ts, 0).single()
        };
        return parsed.ok_or_else(|| DataError::ParseError(format!("Timestamp out of range: {}", s)));
    }

    Err(DataError::ParseError(format!("Could not parse date: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-15 10:30:00"), Ok(expected));
        assert_eq!(parse_timestamp("2024-01-15T10:30:00Z"), Ok(expected));
        assert_eq!(parse_timestamp("2024.01.15 10:30"), Ok(expected));
        assert_eq!(parse_timestamp("1705314600"), Ok(expected));
        assert_eq!(parse_timestamp("1705314600000"), Ok(expected));
        assert_eq!(
            parse_timestamp("2024-01-15"),
            Ok(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
        );
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_read_bars_sorted_with_header_variants() {
        let data = "Date,Open,High,Low,Close,Volume\n\
                    2024-01-01 02:00:00,1.1,1.2,1.0,1.15,100\n\
                    2024-01-01 00:00:00,1.0,1.1,0.9,1.05,100\n";
        let bars = read_bars(data.as_bytes()).unwrap();

        assert_eq!(bars.len(), 2);
        assert!(bars[0].timestamp < bars[1].timestamp);
        assert_eq!(bars[0].close, 1.05);
    }

    #[test]
    fn test_missing_column_rejected() {
        let data = "time,open,high,close\n2024-01-01 00:00:00,1.0,1.1,1.05\n";
        let err = read_bars(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::InvalidBar(ref msg) if msg.contains("low")));
    }

    #[test]
    fn test_high_below_low_rejected() {
        let data = "time,open,high,low,close\n2024-01-01 00:00:00,1.0,0.9,1.1,1.05\n";
        assert!(matches!(read_bars(data.as_bytes()), Err(DataError::InvalidBar(_))));
    }

    #[test]
    fn test_resolve_directory_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("EURUSD_H1.csv")).unwrap();
        writeln!(file, "time,open,high,low,close").unwrap();
        std::fs::File::create(dir.path().join("GBPUSD.csv")).unwrap();

        let source = CsvBarSource::new(dir.path()).unwrap();
        assert!(source
            .resolve("EURUSD", Timeframe::Hour1)
            .unwrap()
            .ends_with("EURUSD_H1.csv"));
        assert!(source
            .resolve("GBPUSD", Timeframe::Hour4)
            .unwrap()
            .ends_with("GBPUSD.csv"));
        assert_eq!(
            source.resolve("USDJPY", Timeframe::Hour1),
            Err(DataError::NoDataAvailable)
        );
    }

    #[test]
    fn test_missing_path() {
        assert_eq!(
            CsvBarSource::new("/nonexistent/bars.csv").unwrap_err(),
            DataError::NoDataAvailable
        );
    }
}
