/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::{Priority, RawPolicy, Tid};
use miette::Diagnostic;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduling-parameter errors surfaced to callers
///
/// Every variant is detected synchronously and leaves no partial effect behind.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(sched::invalid_argument),
        help("Supply a priority and one of the FIFO (1), OTHER (2) or RR (3) policies.")
    )]
    InvalidArgument(String),

    #[error("Priority {priority} unsupported for policy {policy} (valid range {min}..={max})")]
    #[diagnostic(
        code(sched::unsupported),
        help("Query get_priority_min/get_priority_max for the policy's valid range.")
    )]
    Unsupported {
        policy: RawPolicy,
        priority: Priority,
        min: Priority,
        max: Priority,
    },

    #[error("No such thread: {0}")]
    #[diagnostic(
        code(sched::no_such_thread),
        help("The thread has terminated or never existed. Treat it as gone.")
    )]
    NoSuchThread(Tid),
}

impl SchedError {
    /// Build an `InvalidArgument` for an unrecognised raw policy value
    #[inline]
    pub fn invalid_policy(policy: RawPolicy) -> Self {
        Self::InvalidArgument(format!("unsupported scheduling policy {}", policy))
    }

    /// Build an `InvalidArgument` for a call that omitted its priority
    #[inline]
    pub fn missing_priority() -> Self {
        Self::InvalidArgument("scheduling parameter is missing".to_string())
    }

    /// POSIX errno equivalent of this error
    pub fn errno(&self) -> Errno {
        match self {
            Self::InvalidArgument(_) => Errno::EINVAL,
            Self::Unsupported { .. } => Errno::ENOTSUP,
            Self::NoSuchThread(_) => Errno::ESRCH,
        }
    }

    /// Stable snake_case name of the error kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Unsupported { .. } => "unsupported",
            Self::NoSuchThread(_) => "no_such_thread",
        }
    }
}

/// Configuration errors raised while building the priority range table
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid priority range for {policy}: min {min}, default {default}, max {max}")]
    #[diagnostic(
        code(config::invalid_range),
        help("Each policy needs min <= default <= max.")
    )]
    InvalidRange {
        policy: &'static str,
        min: Priority,
        default: Priority,
        max: Priority,
    },

    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(
        code(config::parse_failed),
        help("THR_SCHED_CONFIG must hold a JSON object with fifo, other and round_robin ranges.")
    )]
    Parse(String),

    #[error("Priority range table already installed")]
    #[diagnostic(
        code(config::already_installed),
        help("The process-wide table is installed once, before any scheduling call.")
    )]
    AlreadyInstalled,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Serializable error representation for API responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SerializableError {
    pub error_type: String,
    pub message: String,
    pub errno: i32,
}

impl From<SchedError> for SerializableError {
    fn from(err: SchedError) -> Self {
        Self {
            error_type: err.kind().to_string(),
            errno: err.errno() as i32,
            message: err.to_string(),
        }
    }
}
