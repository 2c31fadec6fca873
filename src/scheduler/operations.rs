/*!
 * Scheduling Operations
 * setschedparam and its sibling operations on the thread reference protocol
 */

use super::traits::{PriorityBounds, SchedParamControl, ThreadSuspension};
use super::types::SchedPolicy;
use super::ThreadScheduler;
use crate::core::types::{Priority, RawPolicy, SchedResult, Tid};
use crate::monitoring::span_operation;
use crate::thread::{SchedParams, ThreadState};
use tracing::{debug, instrument};

impl ThreadScheduler {
    fn apply_schedparam(
        &self,
        tid: Tid,
        policy: RawPolicy,
        priority: Option<Priority>,
    ) -> SchedResult<()> {
        // Reject bad arguments before the target's reference count is touched
        let (policy, priority) = self.table.check(policy, priority)?;

        let recomputed = self.with_live_thread(tid, |sched| {
            sched.set_policy(policy);
            sched.set_base_priority(priority)
        })?;

        if recomputed {
            self.stats.inc_recomputed();
        } else {
            self.stats.inc_recompute_skipped();
        }
        Ok(())
    }

    /// Copy of a live thread's scheduling fields, read under its lock
    pub fn snapshot(&self, tid: Tid) -> SchedResult<SchedParams> {
        self.with_live_thread(tid, |sched| **sched)
    }

    fn transition(
        &self,
        operation: &'static str,
        tid: Tid,
        from: ThreadState,
        to: ThreadState,
    ) -> SchedResult<()> {
        let _span = span_operation(operation, tid).entered();

        let changed = self.with_live_thread(tid, |sched| {
            sched.state() == from && sched.set_state(to)
        })?;

        debug!(tid, ?to, changed, "Thread state transition");
        Ok(())
    }
}

impl SchedParamControl for ThreadScheduler {
    #[instrument(level = "debug", skip(self), err(level = "debug"))]
    fn set_schedparam(
        &self,
        tid: Tid,
        policy: RawPolicy,
        priority: Option<Priority>,
    ) -> SchedResult<()> {
        let result = self.apply_schedparam(tid, policy, priority);
        self.stats.record(&result);
        result
    }

    fn get_schedparam(&self, tid: Tid) -> SchedResult<(SchedPolicy, Priority)> {
        let _span = span_operation("get_schedparam", tid).entered();
        self.with_live_thread(tid, |sched| (sched.policy(), sched.base_priority()))
    }

    fn set_priority(&self, tid: Tid, priority: Priority) -> SchedResult<()> {
        let (policy, _) = self.get_schedparam(tid)?;
        self.set_schedparam(tid, policy.as_raw(), Some(priority))
    }
}

impl PriorityBounds for ThreadScheduler {
    fn get_priority_min(&self, policy: RawPolicy) -> SchedResult<Priority> {
        self.table.priority_min(policy)
    }

    fn get_priority_max(&self, policy: RawPolicy) -> SchedResult<Priority> {
        self.table.priority_max(policy)
    }
}

impl ThreadSuspension for ThreadScheduler {
    fn suspend(&self, tid: Tid) -> SchedResult<()> {
        self.transition("suspend", tid, ThreadState::Active, ThreadState::Suspended)
    }

    fn resume(&self, tid: Tid) -> SchedResult<()> {
        self.transition("resume", tid, ThreadState::Suspended, ThreadState::Active)
    }
}
