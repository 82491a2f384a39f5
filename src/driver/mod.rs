/*!
 * Driver Module
 * Paced, controllable stepping of a simulator and snapshot rendering
 */

mod render;
mod runner;
mod traits;

pub use render::ConsoleRenderer;
pub use runner::{DriverCommand, DriverHandle, SimulationDriver};
pub use traits::{SnapshotSink, StopReason};
