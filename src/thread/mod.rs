/*!
 * Thread Module
 * Thread handles, the handle registry and the reference protocol
 */

mod handle;
mod reference;
mod registry;

pub use handle::{SchedParams, ThreadHandle, ThreadState};
pub use reference::{SchedGuard, ThreadRef};
pub use registry::ThreadRegistry;
