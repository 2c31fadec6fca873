/*!
 * thr-sched
 * Scheduling-parameter core of a user-level threading runtime: thread handle
 * references, per-thread scheduling locks and priority recomputation
 */

pub mod core;
pub mod monitoring;
pub mod scheduler;
pub mod thread;

// Re-exports
pub use crate::core::errors::{ConfigError, SchedError, SerializableError};
pub use crate::core::types::{Priority, RawPolicy, SchedResult, Tid};
pub use monitoring::init_tracing;
pub use scheduler::{
    PriorityBounds, PriorityRange, PriorityRangeTable, SchedConfig, SchedParamControl,
    SchedPolicy, SchedStats, ThreadSchedOps, ThreadScheduler, ThreadSuspension,
};
pub use thread::{SchedGuard, SchedParams, ThreadRef, ThreadRegistry, ThreadState};
