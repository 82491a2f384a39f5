/*!
 * Monitoring
 * Simulation statistics and structured tracing
 */

mod stats;
mod tracer;

pub use stats::{compute_stats, Stats};
pub use tracer::{init_tracing, RunSpan};
