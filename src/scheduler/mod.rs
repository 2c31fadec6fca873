/*!
 * Scheduler Module
 * Scheduling policies, priority ranges and per-thread scheduling operations
 */

mod config;
mod operations;
mod stats;
mod table;
mod traits;
mod types;

pub use config::SchedConfig;
pub use stats::{AtomicSchedStats, SchedStats};
pub use table::PriorityRangeTable;
pub use traits::{PriorityBounds, SchedParamControl, ThreadSchedOps, ThreadSuspension};
pub use types::{PriorityRange, SchedPolicy, Validation};

use crate::core::errors::SchedError;
use crate::core::types::{SchedResult, Tid};
use crate::thread::{SchedGuard, ThreadRegistry};
use std::sync::Arc;
use tracing::{debug, info};

/// Scheduling-parameter front end over a thread registry
///
/// Cheap to clone; clones share the registry and statistics.
#[derive(Clone)]
pub struct ThreadScheduler {
    registry: Arc<ThreadRegistry>,
    table: &'static PriorityRangeTable,
    stats: Arc<AtomicSchedStats>,
}

impl ThreadScheduler {
    /// Create a scheduler validating against the registry's range table
    pub fn new(registry: Arc<ThreadRegistry>) -> Self {
        info!("Thread scheduler initialized");
        Self {
            table: registry.table(),
            registry,
            stats: Arc::new(AtomicSchedStats::new()),
        }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<ThreadRegistry> {
        &self.registry
    }

    #[inline]
    pub fn table(&self) -> &'static PriorityRangeTable {
        self.table
    }

    /// Statistics snapshot
    pub fn stats(&self) -> SchedStats {
        self.stats
            .snapshot(self.registry.len(), self.registry.reclaimed_count())
    }

    /// Run `f` under the scheduling lock of a live thread
    ///
    /// Takes a reference (rejecting threads already dead), takes the lock,
    /// and re-checks liveness under it since the thread may have died in
    /// between. Lock and reference are released on every path, lock first.
    pub(crate) fn with_live_thread<R>(
        &self,
        tid: Tid,
        f: impl FnOnce(&mut SchedGuard<'_>) -> R,
    ) -> SchedResult<R> {
        let thread = self.registry.acquire(tid, false)?;
        let mut sched = thread
            .lock_sched()
            .map_err(|_| SchedError::NoSuchThread(tid))?;

        if sched.is_dead() {
            debug!(tid, "Thread died before its scheduling lock was taken");
            return Err(SchedError::NoSuchThread(tid));
        }

        Ok(f(&mut sched))
    }
}
