/*!
 * Scheduler Module
 * Scheduling algorithms, policy decisions and the rotation queue
 */

pub mod policy;
pub mod queue;
pub mod traits;
pub mod types;

// Re-export public API
pub use policy::{mlfq_demote, mlfq_quantum, policy_for, select_next, should_preempt};
pub use queue::RotationQueue;
pub use traits::{SchedulingPolicy, SelectionKey};
pub use types::{Algorithm, AlgorithmInfo};
