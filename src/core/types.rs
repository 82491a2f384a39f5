/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (sequential, never reused within one simulator)
pub type Pid = u32;

/// Logical clock value
pub type Tick = u64;

/// Priority level (1 and up, lower is more important)
pub type Priority = u32;

/// Common result type for simulator operations
pub type SimulatorResult<T> = Result<T, super::errors::SimulatorError>;
