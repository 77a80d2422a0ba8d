//! Logging setup and log-based signal delivery.

mod logging;
mod sink;

pub use logging::setup_logging;
pub use sink::LogSink;
