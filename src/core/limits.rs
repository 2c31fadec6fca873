/*!
 * Scheduling Limits and Constants
 *
 * Centralized location for policy numbers and priority bounds.
 * Values follow the POSIX/BSD user-level threading conventions.
 */

use crate::core::types::{Priority, RawPolicy};

// =============================================================================
// POLICY VALUES
// =============================================================================

/// First-in first-out real-time policy [POSIX-COMPAT]
pub const SCHED_FIFO: RawPolicy = 1;

/// Default time-sharing policy [POSIX-COMPAT]
pub const SCHED_OTHER: RawPolicy = 2;

/// Round-robin real-time policy [POSIX-COMPAT]
pub const SCHED_RR: RawPolicy = 3;

/// Number of supported policies (raw values are contiguous from `SCHED_FIFO`)
pub const POLICY_COUNT: usize = 3;

// =============================================================================
// PRIORITY BOUNDS
// =============================================================================

/// Lowest user thread priority
pub const THR_MIN_PRIORITY: Priority = 0;

/// Highest user thread priority
pub const THR_MAX_PRIORITY: Priority = 31;

/// Priority assigned to threads that do not request one
pub const THR_DEFAULT_PRIORITY: Priority = 15;

/// Inherited priority of a thread that holds no boosting lock
pub const NO_INHERITED_PRIORITY: Priority = THR_MIN_PRIORITY;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Environment variable holding a JSON `SchedConfig`
pub const CONFIG_ENV_VAR: &str = "THR_SCHED_CONFIG";

/// Environment variable enabling JSON trace output
pub const TRACE_JSON_ENV_VAR: &str = "THR_SCHED_TRACE_JSON";
