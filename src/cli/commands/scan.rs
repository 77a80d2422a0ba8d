//! Scan command: one tick on the newest bar of each pair.

use anyhow::{Context, Result};
use kumo_core::{BarSource, SignalSink};
use kumo_data::CsvBarSource;
use kumo_monitor::LogSink;
use kumo_signals::SignalPipeline;
use std::path::Path;
use tracing::{error, info, warn};

use super::load_validated;
use crate::cli::ScanArgs;

pub async fn run(args: ScanArgs, config_path: &Path) -> Result<()> {
    let config = load_validated(config_path)?;

    let pairs = config.select_pairs(args.symbol.as_deref(), args.timeframe);
    if pairs.is_empty() {
        anyhow::bail!(
            "No pairs configured or matched. Check the [[pairs]] section of {}",
            config_path.display()
        );
    }

    let source = CsvBarSource::new(&args.data)?;
    let capacity = config.backtest.window_capacity;
    let mut sink = LogSink::new();

    for pair in &pairs {
        let signals = match pair.enabled_kinds() {
            Some(kinds) => config.signals.clone().with_enabled(kinds),
            None => config.signals.clone(),
        };

        for &timeframe in &pair.timeframes {
            // History plus the bar being evaluated.
            let mut bars = match source.historical_bars(&pair.symbol, timeframe, capacity + 1).await {
                Ok(bars) => bars,
                Err(e) => {
                    error!(symbol = %pair.symbol, %timeframe, "Failed to load bars: {}", e);
                    continue;
                }
            };
            let Some(newest) = bars.pop() else {
                continue;
            };

            let mut pipeline = SignalPipeline::new(
                pair.symbol.as_str(),
                timeframe,
                config.ichimoku,
                signals.clone(),
                capacity,
            )
            .context("Invalid pipeline settings")?;
            pipeline.seed(bars);

            if !pipeline.window().is_ready() {
                warn!(
                    symbol = %pair.symbol,
                    %timeframe,
                    bars = pipeline.window().len(),
                    required = pipeline.window().minimum_history(),
                    "Not enough history to evaluate"
                );
                continue;
            }

            let events = pipeline.on_bars([newest])?;
            info!(
                symbol = %pair.symbol,
                %timeframe,
                bar = %newest.timestamp,
                signals = events.len(),
                "Tick complete"
            );
            sink.deliver_all(&events)?;
        }
    }

    info!(delivered = sink.delivered(), "Scan complete");
    Ok(())
}
