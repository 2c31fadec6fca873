/*!
 * Scheduler Types
 * Domain types for scheduling policies and priority ranges
 */

use crate::core::limits::{
    SCHED_FIFO, SCHED_OTHER, SCHED_RR, THR_DEFAULT_PRIORITY, THR_MAX_PRIORITY, THR_MIN_PRIORITY,
};
use crate::core::types::{Priority, RawPolicy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Thread scheduling policy
///
/// Discriminants match the raw values accepted at the runtime API.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedPolicy {
    /// Run until blocked or preempted by a higher priority
    Fifo = SCHED_FIFO,
    /// Time-sharing
    Other = SCHED_OTHER,
    /// FIFO with a time quantum among equal priorities
    RoundRobin = SCHED_RR,
}

impl SchedPolicy {
    /// All supported policies in raw-value order
    pub const ALL: [SchedPolicy; 3] = [Self::Fifo, Self::Other, Self::RoundRobin];

    /// Resolve a raw policy value
    #[inline]
    pub const fn from_raw(raw: RawPolicy) -> Option<Self> {
        match raw {
            SCHED_FIFO => Some(Self::Fifo),
            SCHED_OTHER => Some(Self::Other),
            SCHED_RR => Some(Self::RoundRobin),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn as_raw(self) -> RawPolicy {
        self as RawPolicy
    }

    /// Slot of this policy in the priority range table
    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        (self as RawPolicy - SCHED_FIFO) as usize
    }

    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fifo" | "sched_fifo" => Ok(Self::Fifo),
            "other" | "sched_other" => Ok(Self::Other),
            "round_robin" | "roundrobin" | "rr" | "sched_rr" => Ok(Self::RoundRobin),
            _ => Err(format!(
                "Invalid policy '{}'. Valid: fifo, other, round_robin",
                s
            )),
        }
    }

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Other => "other",
            Self::RoundRobin => "round_robin",
        }
    }
}

impl TryFrom<RawPolicy> for SchedPolicy {
    type Error = RawPolicy;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(raw)
    }
}

impl std::fmt::Display for SchedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Inclusive priority bounds of one policy, plus its default priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRange {
    pub min: Priority,
    pub max: Priority,
    pub default: Priority,
}

impl PriorityRange {
    #[inline]
    pub const fn new(min: Priority, max: Priority, default: Priority) -> Self {
        Self { min, max, default }
    }

    #[inline(always)]
    pub const fn contains(&self, priority: Priority) -> bool {
        priority >= self.min && priority <= self.max
    }

    /// Check min <= default <= max
    #[inline]
    pub const fn is_well_formed(&self) -> bool {
        self.min <= self.default && self.default <= self.max
    }
}

impl Default for PriorityRange {
    fn default() -> Self {
        Self::new(THR_MIN_PRIORITY, THR_MAX_PRIORITY, THR_DEFAULT_PRIORITY)
    }
}

/// Outcome of validating a `(policy, priority)` pair against the range table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid(SchedPolicy),
    InvalidPolicy,
    OutOfRange(PriorityRange),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_raw_values() {
        assert_eq!(SchedPolicy::from_raw(1), Some(SchedPolicy::Fifo));
        assert_eq!(SchedPolicy::from_raw(2), Some(SchedPolicy::Other));
        assert_eq!(SchedPolicy::from_raw(3), Some(SchedPolicy::RoundRobin));
        assert_eq!(SchedPolicy::from_raw(0), None);
        assert_eq!(SchedPolicy::from_raw(4), None);
        assert_eq!(SchedPolicy::try_from(42), Err(42));

        for policy in SchedPolicy::ALL {
            assert_eq!(SchedPolicy::from_raw(policy.as_raw()), Some(policy));
        }
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(SchedPolicy::from_str("fifo").unwrap(), SchedPolicy::Fifo);
        assert_eq!(SchedPolicy::from_str("RR").unwrap(), SchedPolicy::RoundRobin);
        assert_eq!(SchedPolicy::from_str("other").unwrap(), SchedPolicy::Other);
        assert!(SchedPolicy::from_str("fair").is_err());
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&SchedPolicy::RoundRobin).unwrap();
        assert_eq!(json, "\"round_robin\"");
        let policy: SchedPolicy = serde_json::from_str("\"fifo\"").unwrap();
        assert_eq!(policy, SchedPolicy::Fifo);
    }

    #[test]
    fn test_range_contains() {
        let range = PriorityRange::new(0, 31, 15);
        assert!(range.contains(0));
        assert!(range.contains(31));
        assert!(!range.contains(-1));
        assert!(!range.contains(32));
        assert!(range.is_well_formed());
        assert!(!PriorityRange::new(10, 5, 7).is_well_formed());
    }
}
