/*!
 * Lock-Free Scheduling Statistics
 * Atomic counters updated on every scheduling-parameter call
 */

use crate::core::errors::SchedError;
use crate::core::types::SchedResult;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic statistics for lock-free updates
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Relaxed ordering; counters are independent of each other
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct AtomicSchedStats {
    calls: AtomicU64,
    succeeded: AtomicU64,
    invalid_argument: AtomicU64,
    unsupported: AtomicU64,
    no_such_thread: AtomicU64,
    recomputed: AtomicU64,
    recompute_skipped: AtomicU64,
}

impl AtomicSchedStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one call and its outcome
    #[inline]
    pub fn record<T>(&self, result: &SchedResult<T>) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let counter = match result {
            Ok(_) => &self.succeeded,
            Err(SchedError::InvalidArgument(_)) => &self.invalid_argument,
            Err(SchedError::Unsupported { .. }) => &self.unsupported,
            Err(SchedError::NoSuchThread(_)) => &self.no_such_thread,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_recomputed(&self) {
        self.recomputed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_recompute_skipped(&self) {
        self.recompute_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy; counters may advance while it is taken
    pub fn snapshot(&self, live_threads: usize, reclaimed: u64) -> SchedStats {
        SchedStats {
            calls: self.calls.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            invalid_argument: self.invalid_argument.load(Ordering::Relaxed),
            unsupported: self.unsupported.load(Ordering::Relaxed),
            no_such_thread: self.no_such_thread.load(Ordering::Relaxed),
            recomputed: self.recomputed.load(Ordering::Relaxed),
            recompute_skipped: self.recompute_skipped.load(Ordering::Relaxed),
            live_threads,
            reclaimed,
        }
    }
}

/// Scheduling statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedStats {
    pub calls: u64,
    pub succeeded: u64,
    pub invalid_argument: u64,
    pub unsupported: u64,
    pub no_such_thread: u64,
    pub recomputed: u64,
    pub recompute_skipped: u64,
    pub live_threads: usize,
    pub reclaimed: u64,
}

impl SchedStats {
    #[inline]
    pub fn failed(&self) -> u64 {
        self.invalid_argument + self.unsupported + self.no_such_thread
    }
}
