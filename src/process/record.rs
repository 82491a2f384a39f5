/*!
 * Process Record
 * Immutable descriptor fields plus mutable runtime state of one simulated process
 */

use super::types::{IoBurst, ProcessSpec, ProcessState, ProcessType};
use crate::core::types::{Pid, Priority, SimulatorResult, Tick};
use crate::core::SimulatorError;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Simulated process
///
/// Descriptor fields never change after creation. Runtime fields are written
/// only by the simulator's stepper.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub pid: Pid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProcessType,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub priority: Priority,
    pub deadline: Option<Tick>,
    pub io: Option<IoBurst>,

    pub state: ProcessState,
    pub remaining_time: Tick,
    pub remaining_io_time: Tick,
    pub total_io_time_consumed: Tick,
    pub io_consumed: bool,
    pub queue_level: u8,
    pub waiting_time_accumulated: Tick,
    pub start_time: Option<Tick>,
    pub completion_time: Option<Tick>,
    pub response_time: Option<Tick>,
    pub turnaround_time: Option<Tick>,
    pub waiting_time: Option<Tick>,
}

impl Process {
    #[must_use]
    pub fn from_spec(pid: Pid, spec: ProcessSpec) -> Self {
        let name = if spec.name.trim().is_empty() {
            format!("P{}", pid)
        } else {
            spec.name.trim().to_string()
        };

        Self {
            pid,
            name,
            kind: spec.kind,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            deadline: spec.deadline,
            io: spec.io,
            state: ProcessState::New,
            remaining_time: spec.burst_time,
            remaining_io_time: 0,
            total_io_time_consumed: 0,
            io_consumed: false,
            queue_level: 0,
            waiting_time_accumulated: 0,
            start_time: None,
            completion_time: None,
            response_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    /// Move along one edge of the process model
    pub fn transition(&mut self, next: ProcessState) -> SimulatorResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(SimulatorError::InvalidOperation(format!(
                "process {} cannot move from {} to {}",
                self.pid,
                self.state.as_str(),
                next.as_str()
            )));
        }
        self.state = next;
        Ok(())
    }

    /// CPU ticks executed so far
    #[inline(always)]
    pub const fn executed_time(&self) -> Tick {
        self.burst_time - self.remaining_time
    }

    /// The I/O burst is pending and its offset has been reached
    #[inline]
    pub fn is_io_due(&self) -> bool {
        match self.io {
            Some(io) => !self.io_consumed && self.executed_time() >= io.start_offset,
            None => false,
        }
    }

    /// Deadline for EDF ordering, unset sorts last
    #[inline(always)]
    pub fn effective_deadline(&self) -> Tick {
        self.deadline.unwrap_or(Tick::MAX)
    }

    #[inline(always)]
    pub const fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    #[inline(always)]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    #[inline(always)]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, ProcessState::Ready)
    }

    #[inline(always)]
    pub const fn is_waiting(&self) -> bool {
        matches!(self.state, ProcessState::Waiting)
    }

    #[inline(always)]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    /// Return to the freshly-created state, keeping the descriptor
    pub fn reset(&mut self) {
        self.state = ProcessState::New;
        self.remaining_time = self.burst_time;
        self.remaining_io_time = 0;
        self.total_io_time_consumed = 0;
        self.io_consumed = false;
        self.queue_level = 0;
        self.waiting_time_accumulated = 0;
        self.start_time = None;
        self.completion_time = None;
        self.response_time = None;
        self.turnaround_time = None;
        self.waiting_time = None;
    }
}
