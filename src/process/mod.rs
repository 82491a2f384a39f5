/*!
 * Process Module
 * Process records, the five-state model and the process arena
 */

pub mod record;
pub mod table;
pub mod types;

// Re-export for convenience
pub use record::Process;
pub use table::ProcessTable;
pub use types::{IoBurst, ProcessSpec, ProcessState, ProcessType};
