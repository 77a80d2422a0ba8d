//! Core traits for the signal engine.

mod config;
mod data_source;
mod indicator;
mod sink;

pub use config::Validate;
pub use data_source::BarSource;
pub use indicator::BarIndicator;
pub use sink::SignalSink;
