//! Configuration trait definitions.

use crate::error::ConfigError;

/// Configuration that can be checked before anything is built from it.
///
/// Engines call `validate` in their constructors so that a bad configuration
/// fails at construction time rather than mid-run.
pub trait Validate {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestConfig {
        period: usize,
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), ConfigError> {
            if self.period == 0 {
                return Err(ConfigError::InvalidPeriod {
                    name: "period",
                    value: self.period,
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_validate() {
        assert!(TestConfig { period: 9 }.validate().is_ok());
        assert_eq!(
            TestConfig { period: 0 }.validate(),
            Err(ConfigError::InvalidPeriod {
                name: "period",
                value: 0
            })
        );
    }
}
