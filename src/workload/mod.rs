/*!
 * Workload Module
 * Process sources: JSON workload files and the random generator
 */

mod file;
mod random;

pub use file::Workload;
pub use random::RandomWorkload;
