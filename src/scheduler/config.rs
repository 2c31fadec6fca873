/*!
 * Scheduling Configuration
 *
 * Per-policy priority ranges used to build the process-wide range table
 */

use super::types::{PriorityRange, SchedPolicy};
use crate::core::errors::ConfigError;
use crate::core::limits::{CONFIG_ENV_VAR, THR_DEFAULT_PRIORITY, THR_MAX_PRIORITY, THR_MIN_PRIORITY};
use serde::{Deserialize, Serialize};

/// Scheduling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedConfig {
    pub fifo: PriorityRange,
    pub other: PriorityRange,
    pub round_robin: PriorityRange,
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self::uniform(PriorityRange::new(
            THR_MIN_PRIORITY,
            THR_MAX_PRIORITY,
            THR_DEFAULT_PRIORITY,
        ))
    }
}

impl SchedConfig {
    /// Same range for every policy
    pub const fn uniform(range: PriorityRange) -> Self {
        Self {
            fifo: range,
            other: range,
            round_robin: range,
        }
    }

    /// Range configured for `policy`
    #[inline]
    pub const fn range(&self, policy: SchedPolicy) -> PriorityRange {
        match policy {
            SchedPolicy::Fifo => self.fifo,
            SchedPolicy::Other => self.other,
            SchedPolicy::RoundRobin => self.round_robin,
        }
    }

    /// Parse from a JSON document; missing policies keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `THR_SCHED_CONFIG`, falling back to defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(json) => Self::from_json(&json),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Every range must satisfy min <= default <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        for policy in SchedPolicy::ALL {
            let range = self.range(policy);
            if !range.is_well_formed() {
                return Err(ConfigError::InvalidRange {
                    policy: policy.as_str(),
                    min: range.min,
                    default: range.default,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SchedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.range(SchedPolicy::Fifo).max, THR_MAX_PRIORITY);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            SchedConfig::from_json(r#"{"round_robin": {"min": 1, "max": 99, "default": 50}}"#)
                .unwrap();
        assert_eq!(config.round_robin, PriorityRange::new(1, 99, 50));
        assert_eq!(config.fifo, PriorityRange::default());
    }

    #[test]
    fn test_from_json_rejects_inverted_range() {
        let err = SchedConfig::from_json(r#"{"fifo": {"min": 10, "max": 0, "default": 5}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { policy: "fifo", .. }));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SchedConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
