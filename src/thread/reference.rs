/*!
 * Thread References and Scheduling Lock Guards
 *
 * `ThreadRef` is a counted reference on a thread handle. While one exists
 * the handle cannot be reclaimed, though the thread may still die.
 * `SchedGuard` is the scheduling lock; it borrows a `ThreadRef`, so the lock
 * can only be taken while a reference is held and is always released first.
 */

use super::handle::{SchedParams, ThreadHandle, ThreadState};
use super::registry::ThreadRegistry;
use crate::core::guard::{
    Guard, GuardDrop, GuardError, GuardMetadata, GuardRef, GuardResult, Observable,
};
use crate::core::types::{Priority, Tid};
use crate::scheduler::SchedPolicy;
use parking_lot::MutexGuard;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{trace, warn};

/// Counted reference on a thread handle
///
/// Obtained from [`ThreadRegistry::acquire`]. Dropping it (or calling
/// [`Guard::release`]) gives the reference back; the last release of a
/// dead thread reclaims it.
pub struct ThreadRef {
    handle: Arc<ThreadHandle>,
    registry: Arc<ThreadRegistry>,
    metadata: GuardMetadata,
    active: bool,
}

impl ThreadRef {
    /// Wrap a handle whose reference count was already incremented
    pub(super) fn new(handle: Arc<ThreadHandle>, registry: Arc<ThreadRegistry>) -> Self {
        let guard = Self {
            metadata: GuardMetadata::new("thread_ref").with_tid(handle.tid()),
            handle,
            registry,
            active: true,
        };
        guard.emit_created();
        guard
    }

    #[inline]
    pub fn tid(&self) -> Tid {
        self.handle.tid()
    }

    /// Lock-free state read; re-check under `lock_sched` before acting on it
    #[inline]
    pub fn state(&self) -> ThreadState {
        self.handle.state()
    }

    /// Take the thread's scheduling lock
    ///
    /// Blocks only for the bounded critical section of another holder.
    pub fn lock_sched(&self) -> GuardResult<SchedGuard<'_>> {
        if !self.active {
            let err = GuardError::AlreadyReleased;
            self.emit_error(&err);
            return Err(err);
        }

        Ok(SchedGuard {
            handle: &self.handle,
            params: self.handle.sched().lock(),
        })
    }
}

impl Guard for ThreadRef {
    fn resource_type(&self) -> &'static str {
        self.metadata.resource_type
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) -> GuardResult<()> {
        if !self.active {
            return Err(GuardError::AlreadyReleased);
        }
        self.active = false;
        self.registry.release(&self.handle);
        Ok(())
    }
}

impl GuardDrop for ThreadRef {
    fn on_drop(&mut self) {
        if self.active {
            self.active = false;
            self.registry.release(&self.handle);
        }
        self.emit_dropped();
    }
}

impl Observable for ThreadRef {
    fn emit_created(&self) {
        trace!(
            tid = self.tid(),
            refs = self.handle.ref_count(),
            "Thread reference acquired"
        );
    }

    fn emit_dropped(&self) {
        trace!(
            tid = self.tid(),
            held_micros = self.metadata.lifetime_micros(),
            "Thread reference dropped"
        );
    }

    fn emit_error(&self, error: &GuardError) {
        warn!(tid = self.tid(), error = %error, "Thread reference misuse");
    }
}

/// Cloning takes an additional reference on the same handle
impl Clone for ThreadRef {
    fn clone(&self) -> Self {
        if self.active {
            self.handle.inc_ref();
        }
        Self {
            handle: Arc::clone(&self.handle),
            registry: Arc::clone(&self.registry),
            metadata: GuardMetadata::new("thread_ref").with_tid(self.tid()),
            active: self.active,
        }
    }
}

impl GuardRef for ThreadRef {
    fn ref_count(&self) -> usize {
        self.handle.ref_count()
    }
}

impl Drop for ThreadRef {
    fn drop(&mut self) {
        self.on_drop();
    }
}

impl std::fmt::Debug for ThreadRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadRef")
            .field("tid", &self.tid())
            .field("active", &self.active)
            .finish()
    }
}

/// Held scheduling lock of one thread
///
/// Derefs to the protected [`SchedParams`]; all mutation goes through the
/// guard so it can only happen with the lock held.
pub struct SchedGuard<'a> {
    handle: &'a ThreadHandle,
    params: MutexGuard<'a, SchedParams>,
}

impl<'a> SchedGuard<'a> {
    /// Thread state; stable while the guard is held
    #[inline]
    pub fn state(&self) -> ThreadState {
        self.handle.state()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.handle.is_dead()
    }

    #[inline]
    pub fn set_policy(&mut self, policy: SchedPolicy) {
        self.params.set_policy(policy);
    }

    /// Set the base priority and recompute the active priority
    ///
    /// Returns false if the priority was unchanged and nothing was recomputed.
    #[inline]
    pub fn set_base_priority(&mut self, priority: Priority) -> bool {
        self.params.set_base_priority(priority)
    }

    /// Priority-inheritance hook: record the boost granted through held locks
    pub fn set_inherited_priority(&mut self, priority: Priority) {
        self.params.set_inherited_priority(priority);
        trace!(
            tid = self.handle.tid(),
            inherited = priority,
            active = self.params.active_priority(),
            "Inherited priority updated"
        );
    }

    /// Lifecycle hook: the thread has terminated
    pub fn mark_dead(&mut self) {
        self.handle.store_state(ThreadState::Dead);
    }

    /// Move between non-terminal states; a dead thread stays dead
    pub(crate) fn set_state(&mut self, state: ThreadState) -> bool {
        if self.is_dead() {
            return false;
        }
        self.handle.store_state(state);
        true
    }
}

impl Deref for SchedGuard<'_> {
    type Target = SchedParams;

    fn deref(&self) -> &Self::Target {
        &self.params
    }
}
