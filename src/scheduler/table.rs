/*!
 * Priority Range Table
 *
 * Process-wide, read-only mapping of scheduling policy to valid priorities.
 * Installed once before any scheduling call; lock-free reads afterwards.
 */

use super::config::SchedConfig;
use super::types::{PriorityRange, SchedPolicy, Validation};
use crate::core::errors::{ConfigError, SchedError};
use crate::core::limits::POLICY_COUNT;
use crate::core::types::{Priority, RawPolicy, SchedResult};
use std::sync::OnceLock;
use tracing::info;

static GLOBAL_TABLE: OnceLock<PriorityRangeTable> = OnceLock::new();

/// Immutable policy -> priority range mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityRangeTable {
    ranges: [PriorityRange; POLICY_COUNT],
}

impl PriorityRangeTable {
    /// Build a table from a validated configuration
    pub fn from_config(config: &SchedConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ranges: SchedPolicy::ALL.map(|policy| config.range(policy)),
        })
    }

    /// Install as the process-wide table
    ///
    /// Fails if a table was already installed, including the lazily
    /// installed default from an earlier `global()` call.
    pub fn install(self) -> Result<&'static Self, ConfigError> {
        let mut installed = false;
        let table = GLOBAL_TABLE.get_or_init(|| {
            installed = true;
            self
        });

        if !installed {
            return Err(ConfigError::AlreadyInstalled);
        }

        info!(table = ?table.ranges, "Priority range table installed");
        Ok(table)
    }

    /// The process-wide table, installing defaults on first use
    pub fn global() -> &'static Self {
        GLOBAL_TABLE.get_or_init(Self::default)
    }

    /// Range for a policy
    #[inline(always)]
    pub fn range(&self, policy: SchedPolicy) -> PriorityRange {
        self.ranges[policy.index()]
    }

    /// Pure validation of a raw `(policy, priority)` pair
    #[inline]
    pub fn validate(&self, policy: RawPolicy, priority: Priority) -> Validation {
        match SchedPolicy::from_raw(policy) {
            None => Validation::InvalidPolicy,
            Some(policy) => {
                let range = self.range(policy);
                if range.contains(priority) {
                    Validation::Valid(policy)
                } else {
                    Validation::OutOfRange(range)
                }
            }
        }
    }

    /// Validate caller arguments into a policy, mapping failures to errors
    ///
    /// A missing priority or unknown policy is `InvalidArgument`; a priority
    /// outside the policy's range is `Unsupported`.
    pub fn check(
        &self,
        policy: RawPolicy,
        priority: Option<Priority>,
    ) -> SchedResult<(SchedPolicy, Priority)> {
        let Some(priority) = priority else {
            return Err(SchedError::missing_priority());
        };

        match self.validate(policy, priority) {
            Validation::Valid(policy) => Ok((policy, priority)),
            Validation::InvalidPolicy => Err(SchedError::invalid_policy(policy)),
            Validation::OutOfRange(range) => Err(SchedError::Unsupported {
                policy,
                priority,
                min: range.min,
                max: range.max,
            }),
        }
    }

    /// Minimum priority for a raw policy
    pub fn priority_min(&self, policy: RawPolicy) -> SchedResult<Priority> {
        SchedPolicy::from_raw(policy)
            .map(|p| self.range(p).min)
            .ok_or_else(|| SchedError::invalid_policy(policy))
    }

    /// Maximum priority for a raw policy
    pub fn priority_max(&self, policy: RawPolicy) -> SchedResult<Priority> {
        SchedPolicy::from_raw(policy)
            .map(|p| self.range(p).max)
            .ok_or_else(|| SchedError::invalid_policy(policy))
    }
}

impl Default for PriorityRangeTable {
    fn default() -> Self {
        let config = SchedConfig::default();
        Self {
            ranges: SchedPolicy::ALL.map(|policy| config.range(policy)),
        }
    }
}
