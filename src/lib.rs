/*!
 * CPU Scheduling Simulator Library
 * Discrete-tick engine for eight classic scheduling algorithms
 */

pub mod core;
pub mod driver;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod workload;

// Re-exports
pub use crate::core::{
    DriverConfig, Pid, Priority, SimulatorConfig, SimulatorError, SimulatorResult, Tick,
};
pub use driver::{
    ConsoleRenderer, DriverCommand, DriverHandle, SimulationDriver, SnapshotSink, StopReason,
};
pub use monitoring::{compute_stats, init_tracing, RunSpan, Stats};
pub use process::{IoBurst, Process, ProcessSpec, ProcessState, ProcessType};
pub use scheduler::{Algorithm, AlgorithmInfo, SchedulingPolicy};
pub use simulation::{
    ExecutionInterval, IntervalKind, LogEntry, Severity, SimulationCounters, Simulator, Snapshot,
};
pub use workload::{RandomWorkload, Workload};
