//! Ichimoku Kinko Hyo indicator engine.
//!
//! This crate computes the five Ichimoku lines over an ordered bar window:
//! - Tenkan / Kijun (short and medium period midpoints)
//! - Senkou A / Senkou B (cloud lines, shifted forward by the displacement)
//! - Chikou (close shifted backward)
//!
//! Positions without enough history are reported as `None` rather than NaN,
//! so comparisons against undefined values cannot happen by accident.

pub mod ichimoku;
pub mod midpoint;

pub use ichimoku::{Ichimoku, IchimokuConfig, IchimokuLines, IchimokuSnapshot, LineValues};
pub use midpoint::Midpoint;
