/*!
 * Thread Registry
 *
 * Resolves opaque thread ids to live handles and owns the reclamation decision.
 *
 * ## Reference Protocol
 *
 * - `acquire` increments the reference count while holding the registry
 *   shard's read lock, so it cannot interleave with reclamation
 * - reclamation removes the handle under the shard's write lock and only if
 *   the thread is dead and unreferenced at that instant
 * - whoever drops the count to zero on a dead thread (or kills an
 *   unreferenced thread) attempts reclamation
 */

use super::handle::ThreadHandle;
use super::reference::ThreadRef;
use crate::core::errors::SchedError;
use crate::core::guard::GuardRef;
use crate::core::types::{Priority, SchedResult, Tid};
use crate::scheduler::{PriorityRangeTable, SchedPolicy};
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Live thread handle registry
pub struct ThreadRegistry {
    threads: DashMap<Tid, Arc<ThreadHandle>, RandomState>,
    next_tid: AtomicU64,
    reclaimed: AtomicU64,
    table: &'static PriorityRangeTable,
}

impl ThreadRegistry {
    /// Registry validated against the process-wide range table
    pub fn new() -> Arc<Self> {
        Self::with_table(PriorityRangeTable::global())
    }

    /// Registry validated against a specific range table
    pub fn with_table(table: &'static PriorityRangeTable) -> Arc<Self> {
        info!("Thread registry initialized");
        Arc::new(Self {
            threads: DashMap::with_hasher(RandomState::new()),
            next_tid: AtomicU64::new(1),
            reclaimed: AtomicU64::new(0),
            table,
        })
    }

    #[inline]
    pub fn table(&self) -> &'static PriorityRangeTable {
        self.table
    }

    /// Thread-creation hook: publish a new ACTIVE handle
    ///
    /// A missing priority takes the policy's default.
    pub fn register(&self, policy: SchedPolicy, priority: Option<Priority>) -> SchedResult<Tid> {
        let priority = priority.unwrap_or_else(|| self.table.range(policy).default);
        let (policy, priority) = self.table.check(policy.as_raw(), Some(priority))?;

        let tid = self.next_tid.fetch_add(1, Ordering::Relaxed);
        self.threads
            .insert(tid, Arc::new(ThreadHandle::new(tid, policy, priority)));

        debug!(tid, policy = %policy, priority, "Thread registered");
        Ok(tid)
    }

    /// Resolve `tid` and take a reference on it
    ///
    /// Fails with `NoSuchThread` if the id is unknown, or if the thread is
    /// already dead and `include_dead` is false.
    pub fn acquire(self: &Arc<Self>, tid: Tid, include_dead: bool) -> SchedResult<ThreadRef> {
        let handle = {
            let entry = self.threads.get(&tid).ok_or(SchedError::NoSuchThread(tid))?;
            if !include_dead && entry.is_dead() {
                return Err(SchedError::NoSuchThread(tid));
            }
            entry.inc_ref();
            Arc::clone(entry.value())
        };

        Ok(ThreadRef::new(handle, Arc::clone(self)))
    }

    /// Give back one reference; the last one on a dead thread reclaims it
    pub(super) fn release(&self, handle: &ThreadHandle) {
        if handle.dec_ref() == 0 && handle.is_dead() {
            self.try_reclaim(handle.tid());
        }
    }

    /// Thread-teardown hook: mark the thread dead under its scheduling lock
    ///
    /// The handle is reclaimed as soon as no references remain, which may be
    /// immediately.
    pub fn mark_dead(self: &Arc<Self>, tid: Tid) -> SchedResult<()> {
        let thread = self.acquire(tid, false)?;
        {
            let mut sched = thread.lock_sched().map_err(|_| SchedError::NoSuchThread(tid))?;
            if sched.is_dead() {
                return Err(SchedError::NoSuchThread(tid));
            }
            sched.mark_dead();
        }
        debug!(tid, refs = thread.ref_count(), "Thread marked dead");
        Ok(())
    }

    fn try_reclaim(&self, tid: Tid) -> bool {
        let removed = self
            .threads
            .remove_if(&tid, |_, handle| handle.is_dead() && handle.ref_count() == 0)
            .is_some();

        if removed {
            self.reclaimed.fetch_add(1, Ordering::Relaxed);
            debug!(tid, "Thread handle reclaimed");
        }
        removed
    }

    #[inline]
    pub fn contains(&self, tid: Tid) -> bool {
        self.threads.contains_key(&tid)
    }

    /// Current reference count of a registered handle
    pub fn ref_count(&self, tid: Tid) -> Option<usize> {
        self.threads.get(&tid).map(|entry| entry.ref_count())
    }

    /// Number of registered handles, dead-but-referenced ones included
    #[inline]
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    #[inline]
    pub fn reclaimed_count(&self) -> u64 {
        self.reclaimed.load(Ordering::Relaxed)
    }
}
