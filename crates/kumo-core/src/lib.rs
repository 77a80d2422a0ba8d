//! Core types and traits for the Ichimoku signal engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarRecord, RollingWindow)
//! - Signal kinds and emitted signal events
//! - The error taxonomy shared by every crate
//! - Collaborator traits for indicators, bar sources and signal sinks

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ConfigError, DataError, KumoError, KumoResult, StateError};
pub use traits::*;
pub use types::*;
