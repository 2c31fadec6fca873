/*!
 * RAII Resource Guards
 *
 * Scoped ownership of runtime resources with automatic cleanup.
 *
 * ## Design Principles
 *
 * 1. **Balanced**: Every acquisition is released exactly once, on every exit path
 * 2. **Observable**: Guards emit tracing events for their lifecycle
 * 3. **Ordered**: Guards that depend on another guard borrow it, so the
 *    dependency is enforced by the borrow checker
 *
 * ## Guard Types
 *
 * - **ThreadRef**: Counted reference on a thread handle (defers reclamation)
 * - **SchedGuard**: Scheduling lock on a referenced thread handle
 *
 * ## Example
 *
 * ```rust,ignore
 * let thread = registry.acquire(tid, false)?;   // reference held
 * let mut sched = thread.lock_sched();           // lock held
 * sched.set_base_priority(20);
 * // lock released, then reference released, on drop
 * ```
 */

mod traits;

pub use traits::{Guard, GuardDrop, GuardRef, Observable};

use crate::core::types::Tid;

/// Result type for guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur during guard operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum GuardError {
    #[error("Resource already released")]
    AlreadyReleased,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Guard metadata for observability
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub creation_time: std::time::Instant,
    pub tid: Option<Tid>,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            creation_time: std::time::Instant::now(),
            tid: None,
        }
    }

    #[inline]
    pub fn with_tid(mut self, tid: Tid) -> Self {
        self.tid = Some(tid);
        self
    }

    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}
