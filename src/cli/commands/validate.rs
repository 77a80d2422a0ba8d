//! Validate configuration command.

use anyhow::Result;
use kumo_config::load_config;
use kumo_core::Validate;
use std::path::Path;

use crate::cli::ValidateArgs;

pub async fn run(args: ValidateArgs, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    let ichimoku = &config.ichimoku;
    println!(
        "Ichimoku: {}/{}/{} displacement {} chikou shift {}",
        ichimoku.tenkan_period,
        ichimoku.kijun_period,
        ichimoku.senkou_b_period,
        ichimoku.displacement,
        ichimoku.chikou_shift
    );
    println!("Cooldown: {} min", config.signals.cooldown_minutes);
    println!("Cloud filter: {}", config.signals.cloud_filter);
    println!(
        "Warmup bars: {} (window capacity {})",
        config.backtest.warmup_bars, config.backtest.window_capacity
    );
    for pair in &config.pairs {
        let timeframes: Vec<String> = pair.timeframes.iter().map(|tf| tf.to_string()).collect();
        let kinds = match pair.enabled_kinds() {
            Some(kinds) => kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", "),
            None => "default".to_string(),
        };
        println!("Pair {}: [{}] signals: {}", pair.symbol, timeframes.join(", "), kinds);
    }

    if args.show {
        println!();
        println!("{}", config.to_toml()?);
    }

    Ok(())
}
