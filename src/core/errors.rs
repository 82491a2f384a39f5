/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulator errors with serialization support
///
/// Construction and configuration errors are returned synchronously and never
/// leave the simulator partially mutated. `tick()` has no error path.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimulatorError {
    #[error("Invalid parameter: {0}")]
    #[diagnostic(
        code(simulator::invalid_parameter),
        help("Burst time and priority must be at least 1, I/O duration at least 1, and EDF deadlines no earlier than arrival + burst.")
    )]
    InvalidParameter(String),

    #[error("Invalid operation: {0}")]
    #[diagnostic(
        code(simulator::invalid_operation),
        help("Reset the simulation before changing the algorithm or removing a dispatched process.")
    )]
    InvalidOperation(String),

    #[error("Process {0} not found")]
    #[diagnostic(
        code(simulator::process_not_found),
        help("The process may have been removed or never existed. Check PID validity.")
    )]
    ProcessNotFound(Pid),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(simulator::configuration_error),
        help("Invalid configuration. Review the SCHED_* environment variables.")
    )]
    Configuration(String),

    #[error("Workload error: {0}")]
    #[diagnostic(
        code(simulator::workload_error),
        help("The workload file could not be read or is not valid JSON.")
    )]
    Workload(String),
}

impl From<std::io::Error> for SimulatorError {
    fn from(err: std::io::Error) -> Self {
        SimulatorError::Workload(err.to_string())
    }
}

impl From<serde_json::Error> for SimulatorError {
    fn from(err: serde_json::Error) -> Self {
        SimulatorError::Workload(err.to_string())
    }
}
