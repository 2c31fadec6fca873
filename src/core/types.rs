/*!
 * Core Types
 * Common types used across the threading runtime
 */

/// Opaque thread identifier handed out to callers
pub type Tid = u64;

/// Scheduling priority (higher is more important)
///
/// Signed so that out-of-range requests below zero can be represented and rejected.
pub type Priority = i32;

/// Raw scheduling policy value as passed across the runtime API
pub type RawPolicy = i32;

/// Common result type for scheduling operations
pub type SchedResult<T> = Result<T, super::errors::SchedError>;
