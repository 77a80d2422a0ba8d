//! Error types for the signal engine.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum KumoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Invalid construction-time configuration.
///
/// These indicate a wiring mistake and are surfaced immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be greater than 0, got {value}")]
    InvalidPeriod { name: &'static str, value: usize },

    #[error("window capacity ({capacity}) must be >= minimum history ({required})")]
    CapacityTooSmall { capacity: usize, required: usize },

    #[error("Invalid warmup: {0}")]
    InvalidWarmup(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Operation invoked out of order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("window has not been seeded, call seed() first")]
    NotSeeded,
}

/// Malformed or missing market data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Bar record is missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid bar: {0}")]
    InvalidBar(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientBars { required: usize, available: usize },
}

/// Result type alias for engine operations.
pub type KumoResult<T> = Result<T, KumoError>;
