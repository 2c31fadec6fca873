/*!
 * Core Module
 * Fundamental runtime types, limits, guards and error handling
 */

pub mod errors;
pub mod guard;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use guard::{Guard, GuardDrop, GuardError, GuardMetadata, GuardRef, GuardResult, Observable};
pub use types::*;
