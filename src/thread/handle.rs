/*!
 * Thread Handle
 * Runtime representation of one schedulable thread
 */

use crate::core::limits::NO_INHERITED_PRIORITY;
use crate::core::types::{Priority, Tid};
use crate::scheduler::SchedPolicy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Thread lifecycle state
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadState {
    /// Runnable or running
    Active = 0,
    /// Held off the run queue until resumed
    Suspended = 1,
    /// Terminated; waiting for the last reference to go away
    Dead = 2,
}

impl ThreadState {
    #[inline(always)]
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Active,
            1 => Self::Suspended,
            _ => Self::Dead,
        }
    }
}

/// Scheduling fields guarded by the per-thread scheduling lock
///
/// `active_priority` always equals `max(base_priority, inherited_priority)`
/// once a mutation completes; the setters keep it that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedParams {
    policy: SchedPolicy,
    base_priority: Priority,
    inherited_priority: Priority,
    active_priority: Priority,
}

impl SchedParams {
    pub(crate) fn new(policy: SchedPolicy, base_priority: Priority) -> Self {
        Self {
            policy,
            base_priority,
            inherited_priority: NO_INHERITED_PRIORITY,
            active_priority: base_priority.max(NO_INHERITED_PRIORITY),
        }
    }

    #[inline]
    pub fn policy(&self) -> SchedPolicy {
        self.policy
    }

    #[inline]
    pub fn base_priority(&self) -> Priority {
        self.base_priority
    }

    #[inline]
    pub fn inherited_priority(&self) -> Priority {
        self.inherited_priority
    }

    #[inline]
    pub fn active_priority(&self) -> Priority {
        self.active_priority
    }

    #[inline]
    pub(crate) fn set_policy(&mut self, policy: SchedPolicy) {
        self.policy = policy;
    }

    /// Returns false when `priority` already is the base priority and
    /// nothing was recomputed.
    pub(crate) fn set_base_priority(&mut self, priority: Priority) -> bool {
        if priority == self.base_priority {
            return false;
        }
        self.base_priority = priority;
        self.recompute();
        true
    }

    pub(crate) fn set_inherited_priority(&mut self, priority: Priority) {
        self.inherited_priority = priority;
        self.recompute();
    }

    #[inline(always)]
    fn recompute(&mut self) {
        self.active_priority = self.base_priority.max(self.inherited_priority);
    }
}

/// One schedulable thread
///
/// Shared between the thread itself and every holder of a `ThreadRef`.
/// `state` is written only under the scheduling lock but may be read
/// without it; a lock-free read is a hint that must be re-checked under
/// the lock before mutating.
#[derive(Debug)]
pub struct ThreadHandle {
    tid: Tid,
    state: AtomicU8,
    refcount: AtomicUsize,
    sched: Mutex<SchedParams>,
}

impl ThreadHandle {
    pub(crate) fn new(tid: Tid, policy: SchedPolicy, priority: Priority) -> Self {
        Self {
            tid,
            state: AtomicU8::new(ThreadState::Active as u8),
            refcount: AtomicUsize::new(0),
            sched: Mutex::new(SchedParams::new(policy, priority)),
        }
    }

    #[inline]
    pub fn tid(&self) -> Tid {
        self.tid
    }

    #[inline]
    pub fn state(&self) -> ThreadState {
        ThreadState::from_u8(self.state.load(Ordering::Acquire))
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state() == ThreadState::Dead
    }

    #[inline]
    pub fn ref_count(&self) -> usize {
        self.refcount.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn inc_ref(&self) -> usize {
        self.refcount.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Decrement and return the remaining count
    #[inline]
    pub(crate) fn dec_ref(&self) -> usize {
        let prev = self.refcount.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "thread {} reference count underflow", self.tid);
        prev - 1
    }

    #[inline]
    pub(crate) fn sched(&self) -> &Mutex<SchedParams> {
        &self.sched
    }

    /// Callers must hold the guard returned by `sched().lock()`
    #[inline]
    pub(crate) fn store_state(&self, state: ThreadState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_params_derive_active() {
        let params = SchedParams::new(SchedPolicy::Fifo, 10);
        assert_eq!(params.base_priority(), 10);
        assert_eq!(params.inherited_priority(), NO_INHERITED_PRIORITY);
        assert_eq!(params.active_priority(), 10);
    }

    #[test]
    fn test_set_base_priority_recomputes() {
        let mut params = SchedParams::new(SchedPolicy::Fifo, 10);
        params.set_inherited_priority(25);
        assert_eq!(params.active_priority(), 25);

        assert!(params.set_base_priority(30));
        assert_eq!(params.active_priority(), 30);

        assert!(params.set_base_priority(5));
        assert_eq!(params.active_priority(), 25);

        assert!(!params.set_base_priority(5));
        assert_eq!(params.active_priority(), 25);
    }

    #[test]
    fn test_refcount_roundtrip() {
        let handle = ThreadHandle::new(1, SchedPolicy::Other, 15);
        assert_eq!(handle.inc_ref(), 1);
        assert_eq!(handle.inc_ref(), 2);
        assert_eq!(handle.dec_ref(), 1);
        assert_eq!(handle.dec_ref(), 0);
        assert_eq!(handle.ref_count(), 0);
    }

    #[test]
    fn test_state_store() {
        let handle = ThreadHandle::new(1, SchedPolicy::Other, 15);
        assert_eq!(handle.state(), ThreadState::Active);
        let _guard = handle.sched().lock();
        handle.store_state(ThreadState::Dead);
        assert!(handle.is_dead());
    }
}
