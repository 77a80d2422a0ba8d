//! Core data types for the signal engine.

mod ohlcv;
mod signal;
mod timeframe;
mod window;

pub use ohlcv::{Bar, BarRecord};
pub use signal::{Direction, Evidence, SignalEvent, SignalKind};
pub use timeframe::Timeframe;
pub use window::RollingWindow;
