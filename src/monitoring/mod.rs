/*!
 * Monitoring
 * Structured tracing setup and span helpers
 */

mod tracer;

pub use tracer::{init_tracing, span_operation};
