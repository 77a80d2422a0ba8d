//! Signal engine: enabled rules plus cooldown gating.

use chrono::{DateTime, Utc};
use kumo_core::{ConfigError, SignalEvent, SignalKind, Timeframe, Validate};
use kumo_indicators::IchimokuSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cooldown::CooldownRegistry;
use crate::rules::{Evaluation, Rule, RULES};

/// Configuration for the signal engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Minimum minutes between two firings of the same kind for the same pair
    pub cooldown_minutes: u32,
    /// Only let TK crosses fire when close is on the matching side of the cloud
    pub cloud_filter: bool,
    /// Kinds to evaluate; evaluation order is always the table order
    pub enabled_kinds: Vec<SignalKind>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            cooldown_minutes: 30,
            cloud_filter: true,
            enabled_kinds: SignalKind::ALL.to_vec(),
        }
    }
}

impl SignalConfig {
    /// Same config with a different set of enabled kinds.
    pub fn with_enabled(mut self, kinds: impl IntoIterator<Item = SignalKind>) -> Self {
        self.enabled_kinds = kinds.into_iter().collect();
        self
    }

    pub fn is_enabled(&self, kind: SignalKind) -> bool {
        self.enabled_kinds.contains(&kind)
    }
}

impl Validate for SignalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one signal kind must be enabled".into(),
            ));
        }
        Ok(())
    }
}

/// Evaluates the enabled rules against a snapshot and gates firings
/// through a cooldown registry.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: SignalConfig,
    rules: Vec<&'static Rule>,
    cooldowns: CooldownRegistry,
}

impl SignalEngine {
    /// Create an engine with an empty cooldown registry.
    pub fn new(config: SignalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = RULES.iter().filter(|r| config.is_enabled(r.kind)).collect();
        let cooldowns = CooldownRegistry::from_minutes(config.cooldown_minutes);
        Ok(Self {
            config,
            rules,
            cooldowns,
        })
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn cooldowns(&self) -> &CooldownRegistry {
        &self.cooldowns
    }

    /// Enabled kinds in evaluation order.
    pub fn enabled_kinds(&self) -> impl Iterator<Item = SignalKind> + '_ {
        self.rules.iter().map(|r| r.kind)
    }

    /// Evaluate every enabled rule for one tick.
    ///
    /// Returns no events when any value an enabled rule needs is undefined.
    /// Otherwise returns the fired, non-cooling events in table order and
    /// records each one in the cooldown registry at `now`.
    pub fn evaluate(
        &mut self,
        snapshot: &IchimokuSnapshot,
        instrument: &str,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Vec<SignalEvent> {
        let Some(price) = snapshot.current.close else {
            debug!(instrument, %timeframe, "Skipping evaluation: no current close");
            return Vec::new();
        };

        let mut fired = Vec::new();
        for rule in &self.rules {
            match (rule.evaluate)(snapshot, self.config.cloud_filter) {
                Some(Evaluation::Fired(evidence)) => fired.push((rule.kind, evidence)),
                Some(Evaluation::Quiet) => {}
                None => {
                    debug!(
                        instrument,
                        %timeframe,
                        kind = %rule.kind,
                        "Skipping evaluation: indicator values undefined"
                    );
                    return Vec::new();
                }
            }
        }

        let mut events = Vec::with_capacity(fired.len());
        for (kind, evidence) in fired {
            if self.cooldowns.is_cooling(instrument, timeframe, kind, now) {
                debug!(instrument, %timeframe, %kind, "Cooldown active");
                continue;
            }

            let event = SignalEvent::new(instrument, timeframe, kind, now, price, evidence);
            self.cooldowns.record(instrument, timeframe, kind, now);
            info!(%event, "Signal fired");
            events.push(event);
        }

        events
    }

    /// Clear the cooldown registry.
    pub fn reset(&mut self) {
        self.cooldowns.clear();
    }
}
