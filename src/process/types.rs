/*!
 * Process Types
 * Five-state process model, process classes and creation requests
 */

use crate::core::limits::{MIN_BURST_TIME, MIN_IO_DURATION, MIN_PRIORITY};
use crate::core::types::{Priority, SimulatorResult, Tick};
use crate::core::SimulatorError;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created, not yet arrived
    New,
    /// Arrived and eligible for dispatch
    Ready,
    /// Holding the CPU
    Running,
    /// Blocked on its I/O burst
    Waiting,
    /// Finished; no outgoing edges
    Terminated,
}

impl ProcessState {
    /// Whether `self -> next` is an edge of the process model
    #[inline]
    #[must_use]
    pub const fn can_transition_to(self, next: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (self, next),
            (New, Ready)
                | (Ready, Running)
                | (Running, Ready)
                | (Running, Waiting)
                | (Running, Terminated)
                | (Waiting, Ready)
        )
    }

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Waiting => "waiting",
            Self::Terminated => "terminated",
        }
    }
}

/// Process class, used by MLQ and for cosmetic defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    System,
    Interactive,
    #[default]
    User,
    Batch,
}

impl ProcessType {
    pub const ALL: [ProcessType; 4] = [
        ProcessType::System,
        ProcessType::Interactive,
        ProcessType::User,
        ProcessType::Batch,
    ];

    /// MLQ queue index (0 is served first)
    #[inline(always)]
    pub const fn mlq_queue(&self) -> u8 {
        match self {
            Self::System => 0,
            Self::Interactive => 1,
            Self::User => 2,
            Self::Batch => 3,
        }
    }

    pub const fn default_burst(&self) -> Tick {
        match self {
            Self::System => 3,
            Self::Interactive => 2,
            Self::User => 5,
            Self::Batch => 8,
        }
    }

    pub const fn default_priority(&self) -> Priority {
        match self {
            Self::System => 1,
            Self::Interactive => 2,
            Self::User => 3,
            Self::Batch => 5,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Interactive => "Interactive",
            Self::User => "User",
            Self::Batch => "Batch",
        }
    }
}

/// One I/O burst: block for `duration` ticks once `start_offset` CPU ticks have run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoBurst {
    pub start_offset: Tick,
    pub duration: Tick,
}

/// Process creation request
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arrival_time: Tick,
    pub burst_time: Tick,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default, rename = "type")]
    pub kind: ProcessType,
    pub io: Option<IoBurst>,
    pub deadline: Option<Tick>,
}

fn default_priority() -> Priority {
    MIN_PRIORITY
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival_time: Tick, burst_time: Tick) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            priority: MIN_PRIORITY,
            kind: ProcessType::default(),
            io: None,
            deadline: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_type(mut self, kind: ProcessType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_io(mut self, start_offset: Tick, duration: Tick) -> Self {
        self.io = Some(IoBurst {
            start_offset,
            duration,
        });
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Tick) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Validate creation arguments
    ///
    /// `require_deadline_slack` enables the EDF feasibility check
    /// (`deadline >= arrival + burst`).
    pub fn validate(&self, require_deadline_slack: bool) -> SimulatorResult<()> {
        if self.burst_time < MIN_BURST_TIME {
            return Err(SimulatorError::InvalidParameter(format!(
                "burst time must be >= {}, got {}",
                MIN_BURST_TIME, self.burst_time
            )));
        }
        if self.priority < MIN_PRIORITY {
            return Err(SimulatorError::InvalidParameter(format!(
                "priority must be >= {}, got {}",
                MIN_PRIORITY, self.priority
            )));
        }
        if let Some(io) = self.io {
            if io.duration < MIN_IO_DURATION {
                return Err(SimulatorError::InvalidParameter(format!(
                    "I/O duration must be >= {}, got {}",
                    MIN_IO_DURATION, io.duration
                )));
            }
        }
        if require_deadline_slack {
            if let Some(deadline) = self.deadline {
                let earliest = self
                    .arrival_time
                    .checked_add(self.burst_time)
                    .ok_or_else(|| {
                        SimulatorError::InvalidParameter(format!(
                            "arrival {} + burst {} overflows the clock",
                            self.arrival_time, self.burst_time
                        ))
                    })?;
                if deadline < earliest {
                    return Err(SimulatorError::InvalidParameter(format!(
                        "deadline {} is before arrival + burst ({})",
                        deadline, earliest
                    )));
                }
            }
        }
        Ok(())
    }
}
