//! Signal replay over historical bars.

mod engine;
mod report;
mod statistics;

pub use engine::{BacktestConfig, BacktestEngine};
pub use report::SignalReport;
pub use statistics::SignalStats;
