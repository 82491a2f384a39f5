/*!
 * Simulation Snapshot
 * Consistent read-only copy of engine state handed to renderers after each tick
 */

use super::decisions::LogEntry;
use super::timeline::ExecutionInterval;
use crate::core::types::{Pid, Tick};
use crate::monitoring::Stats;
use crate::process::Process;
use crate::scheduler::Algorithm;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheduler activity counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationCounters {
    pub dispatches: u64,
    pub preemptions: u64,
    /// CPU hand-offs: preemption, I/O start, or termination with work left
    pub context_switches: u64,
}

/// Engine state after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub run_id: Uuid,
    pub algorithm: Algorithm,
    pub current_tick: Tick,
    pub running: Option<Pid>,
    pub processes: Vec<Process>,
    pub log: Vec<LogEntry>,
    pub intervals: Vec<ExecutionInterval>,
    pub stats: Stats,
    pub counters: SimulationCounters,
}

impl Snapshot {
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub fn is_complete(&self) -> bool {
        !self.processes.is_empty() && self.processes.iter().all(|p| p.is_terminated())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
