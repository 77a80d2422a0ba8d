//! Backtest command implementation.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use kumo_backtest::{BacktestEngine, SignalReport};
use kumo_core::Bar;
use kumo_data::CsvBarSource;
use std::path::Path;
use tracing::{error, info, warn};

use super::load_validated;
use crate::cli::{BacktestArgs, OutputFormat};

/// Pairs with fewer bars than this in range are skipped.
const MIN_REPLAY_BARS: usize = 150;

pub async fn run(args: BacktestArgs, config_path: &Path) -> Result<()> {
    let config = load_validated(config_path)?;

    let pairs = config.select_pairs(args.symbol.as_deref(), args.timeframe);
    if pairs.is_empty() {
        anyhow::bail!(
            "No pairs configured or matched. Check the [[pairs]] section of {}",
            config_path.display()
        );
    }

    let from = args.from.or(config.backtest.from_date);
    let to = args.to.or(config.backtest.to_date);
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            anyhow::bail!("--from ({from}) is after --to ({to})");
        }
    }

    if !args.data.exists() {
        anyhow::bail!(
            "Data path '{}' does not exist. Provide a CSV file or directory containing CSV files (e.g. --data ./data)",
            args.data.display()
        );
    }
    let source = CsvBarSource::new(&args.data)?;
    let engine = BacktestEngine::new(config.backtest_config()).context("Invalid backtest settings")?;
    let mut report = SignalReport::new();
    let required = required_bars(config.backtest.warmup_bars);

    info!(pairs = pairs.len(), ?from, ?to, "Starting backtest");

    for pair in &pairs {
        let enabled = pair.enabled_kinds();
        for &timeframe in &pair.timeframes {
            let bars = match source.load(&pair.symbol, timeframe) {
                Ok(bars) => within_range(bars, from, to),
                Err(e) => {
                    error!(symbol = %pair.symbol, %timeframe, "Failed to load bars: {}", e);
                    continue;
                }
            };

            if bars.len() < required {
                warn!(
                    symbol = %pair.symbol,
                    %timeframe,
                    bars = bars.len(),
                    "Skipping, need at least {} bars",
                    required
                );
                continue;
            }

            let events = engine.run(&pair.symbol, timeframe, &bars, enabled.as_deref())?;
            report.add_results(&pair.symbol, timeframe, events);
        }
    }

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if args.dry_run {
        info!("Dry run, signals CSV not written");
        return Ok(());
    }

    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = config.backtest.output_dir.join(format!("signals_{stamp}.csv"));
    let rows = report.save_csv(&path)?;
    if rows > 0 {
        info!(path = %path.display(), rows, "Results saved");
    }

    Ok(())
}

/// Bars a pair needs to be replayed: the fixed floor, or the warmup plus
/// one evaluated bar when that is larger.
fn required_bars(warmup_bars: usize) -> usize {
    MIN_REPLAY_BARS.max(warmup_bars + 1)
}

/// Keep bars whose UTC date lies in the inclusive `[from, to]` range.
fn within_range(bars: Vec<Bar>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<Bar> {
    bars.into_iter()
        .filter(|bar| {
            let day = bar.timestamp.date_naive();
            from.map_or(true, |from| day >= from) && to.map_or(true, |to| day <= to)
        })
        .collect()
}
