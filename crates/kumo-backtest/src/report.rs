//! Signal report: aggregation, CSV export and summaries.

use kumo_core::{KumoResult, SignalEvent, Timeframe};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use crate::SignalStats;

const BASE_COLUMNS: [&str; 6] = ["timestamp", "instrument", "timeframe", "direction", "kind", "price"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Events collected from one or more replay runs, keyed by pair.
#[derive(Debug, Clone, Default)]
pub struct SignalReport {
    results: BTreeMap<(String, Timeframe), Vec<SignalEvent>>,
}

#[derive(Serialize)]
struct PairSummary<'a> {
    instrument: &'a str,
    timeframe: Timeframe,
    stats: SignalStats,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    stats: SignalStats,
    pairs: Vec<PairSummary<'a>>,
    signals: Vec<&'a SignalEvent>,
}

impl SignalReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the events of one run; repeated calls for a pair accumulate.
    pub fn add_results(&mut self, instrument: &str, timeframe: Timeframe, events: Vec<SignalEvent>) {
        info!(
            instrument,
            %timeframe,
            signals = events.len(),
            "Report: added results"
        );
        self.results
            .entry((instrument.to_string(), timeframe))
            .or_default()
            .extend(events);
    }

    /// Events registered for one pair.
    pub fn results(&self, instrument: &str, timeframe: Timeframe) -> &[SignalEvent] {
        self.results
            .get(&(instrument.to_string(), timeframe))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every event, sorted by timestamp. Ties keep registration order.
    pub fn all_signals(&self) -> Vec<&SignalEvent> {
        let mut all: Vec<&SignalEvent> = self.results.values().flatten().collect();
        all.sort_by_key(|e| e.timestamp);
        all
    }

    pub fn len(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Statistics over every event.
    pub fn stats(&self) -> SignalStats {
        SignalStats::from_events(self.results.values().flatten())
    }

    /// Write every event as CSV rows, returning the number of rows.
    ///
    /// Columns are the fixed event fields followed by the sorted union of
    /// evidence keys; a row without a key leaves that cell empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> KumoResult<usize> {
        let signals = self.all_signals();
        let evidence_keys: BTreeSet<&str> = signals
            .iter()
            .flat_map(|e| e.evidence.keys().map(String::as_str))
            .collect();

        let mut csv = csv::Writer::from_writer(writer);
        let header = BASE_COLUMNS.iter().copied().chain(evidence_keys.iter().copied());
        csv.write_record(header).map_err(std::io::Error::from)?;

        for event in &signals {
            let mut row = vec![
                event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                event.instrument.clone(),
                event.timeframe.to_string(),
                event.direction.to_string(),
                event.kind.to_string(),
                event.price.to_string(),
            ];
            row.extend(
                evidence_keys
                    .iter()
                    .map(|key| event.evidence.get(*key).map(f64::to_string).unwrap_or_default()),
            );
            csv.write_record(&row).map_err(std::io::Error::from)?;
        }
        csv.flush()?;

        Ok(signals.len())
    }

    /// Save every event to `path`, creating parent directories.
    ///
    /// Nothing is written when the report is empty.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> KumoResult<usize> {
        let path = path.as_ref();
        if self.is_empty() {
            warn!("No signals to export");
            return Ok(0);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let rows = self.write_csv(File::create(path)?)?;
        info!(path = %path.display(), rows, "Signals CSV saved");
        Ok(rows)
    }

    /// Generate a text summary, broken down by pair and kind.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                 ICHIMOKU BACKTEST REPORT                  \n");
        s.push_str("═══════════════════════════════════════════════════════════\n");

        let stats = self.stats();
        let (Some(first), Some(last)) = (stats.first, stats.last) else {
            s.push_str("\n  No signals were generated.\n\n");
            return s;
        };

        s.push_str(&format!(
            "  Period:   {} -> {}\n",
            first.date_naive(),
            last.date_naive()
        ));
        s.push_str(&format!(
            "  Signals:  {} (BUY: {}, SELL: {})\n",
            stats.total, stats.buys, stats.sells
        ));

        for ((instrument, timeframe), events) in &self.results {
            if events.is_empty() {
                continue;
            }
            let pair = SignalStats::from_events(events);

            s.push('\n');
            s.push_str(&format!("  {}  {}\n", instrument, timeframe));
            s.push_str("───────────────────────────────────────────────────────────\n");
            s.push_str(&format!(
                "  Total: {:>4}  (BUY: {}, SELL: {})\n",
                pair.total, pair.buys, pair.sells
            ));
            for (kind, count) in &pair.by_kind {
                s.push_str(&format!(
                    "    {:<4}  {:<25} : {:>4}\n",
                    kind.direction().as_str(),
                    kind.label(),
                    count
                ));
            }
        }
        s.push('\n');
        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export statistics and events to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let pairs = self
            .results
            .iter()
            .map(|((instrument, timeframe), events)| PairSummary {
                instrument,
                timeframe: *timeframe,
                stats: SignalStats::from_events(events),
            })
            .collect();
        serde_json::to_string_pretty(&ReportJson {
            stats: self.stats(),
            pairs,
            signals: self.all_signals(),
        })
    }
}
