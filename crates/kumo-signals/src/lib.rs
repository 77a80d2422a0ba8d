//! Ichimoku signal detection.
//!
//! This crate turns indicator snapshots into signal events:
//! - A fixed table of six crossover/breakout rules
//! - A cooldown registry keyed by (instrument, timeframe, kind)
//! - `SignalEngine`, which applies the enabled rules and cooldowns
//! - `SignalPipeline`, the per-(instrument, timeframe) context that owns a
//!   window, an indicator and an engine

mod cooldown;
mod engine;
mod pipeline;
pub mod rules;

pub use cooldown::CooldownRegistry;
pub use engine::{SignalConfig, SignalEngine};
pub use pipeline::SignalPipeline;
pub use rules::{Evaluation, Rule, RULES};
