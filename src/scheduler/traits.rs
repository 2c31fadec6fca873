/*!
 * Scheduling Traits
 * Interface definitions for per-thread scheduling operations
 */

use super::types::SchedPolicy;
use crate::core::types::{Priority, RawPolicy, SchedResult, Tid};

/// Scheduling parameter operations
pub trait SchedParamControl: Send + Sync {
    /// Set a thread's policy and base priority
    ///
    /// `policy` is the raw policy value; `priority` of `None` is a missing
    /// parameter and is rejected before the thread is looked up.
    fn set_schedparam(
        &self,
        tid: Tid,
        policy: RawPolicy,
        priority: Option<Priority>,
    ) -> SchedResult<()>;

    /// Get a thread's policy and base priority
    fn get_schedparam(&self, tid: Tid) -> SchedResult<(SchedPolicy, Priority)>;

    /// Change only the base priority, keeping the current policy
    fn set_priority(&self, tid: Tid, priority: Priority) -> SchedResult<()>;
}

/// Priority range queries
pub trait PriorityBounds: Send + Sync {
    fn get_priority_min(&self, policy: RawPolicy) -> SchedResult<Priority>;

    fn get_priority_max(&self, policy: RawPolicy) -> SchedResult<Priority>;
}

/// Suspension control
pub trait ThreadSuspension: Send + Sync {
    /// ACTIVE -> SUSPENDED; already suspended is a no-op
    fn suspend(&self, tid: Tid) -> SchedResult<()>;

    /// SUSPENDED -> ACTIVE; already active is a no-op
    fn resume(&self, tid: Tid) -> SchedResult<()>;
}

/// Combined scheduling interface
pub trait ThreadSchedOps: SchedParamControl + PriorityBounds + ThreadSuspension {}

// Blanket implementation for any type that implements all component traits
impl<T> ThreadSchedOps for T where T: SchedParamControl + PriorityBounds + ThreadSuspension {}
