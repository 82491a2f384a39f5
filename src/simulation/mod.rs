/*!
 * Simulation Engine
 * Owns the process table and advances it one logical tick at a time
 */

use crate::core::types::{Pid, SimulatorResult, Tick};
use crate::core::SimulatorConfig;
use crate::monitoring::{compute_stats, Stats};
use crate::process::{Process, ProcessTable};
use crate::scheduler::{policy_for, Algorithm, RotationQueue};
use log::info;
use uuid::Uuid;

mod decisions;
mod operations;
mod snapshot;
mod stepper;
mod timeline;

pub use decisions::{DecisionLog, LogEntry, Severity};
pub use snapshot::{SimulationCounters, Snapshot};
pub use timeline::{ExecutionInterval, IntervalKind, Timeline};

/// Discrete-time CPU scheduling simulator
///
/// The simulator is the sole writer of its process table, rotation queue, log
/// and timeline. Collaborators mutate it only through the operations in this
/// module and read it through borrowed views or [`Snapshot`]s between ticks.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    table: ProcessTable,
    queue: RotationQueue,
    next_pid: Pid,
    current_tick: Tick,
    // Ticks the running process has held the CPU since its last dispatch
    quantum_used: Tick,
    // Context-switch ticks still to be spent before the next dispatch
    pending_switch: Tick,
    counters: SimulationCounters,
    log: DecisionLog,
    timeline: Timeline,
    run_id: Uuid,
}

impl Simulator {
    /// Create a simulator with a validated configuration
    pub fn new(config: SimulatorConfig) -> SimulatorResult<Self> {
        config.validate()?;
        info!(
            "Simulator initialized: algorithm={}, quantum={}, context_switch={}",
            config.algorithm, config.time_quantum, config.context_switch_duration
        );

        Ok(Self::with_config(config))
    }

    /// Simulator with default settings and the given algorithm
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self::with_config(SimulatorConfig {
            algorithm,
            ..SimulatorConfig::default()
        })
    }

    fn with_config(config: SimulatorConfig) -> Self {
        Self {
            config,
            table: ProcessTable::new(),
            queue: RotationQueue::new(),
            next_pid: 1,
            current_tick: 0,
            quantum_used: 0,
            pending_switch: 0,
            counters: SimulationCounters::default(),
            log: DecisionLog::new(),
            timeline: Timeline::new(),
            run_id: Uuid::new_v4(),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn processes(&self) -> &[Process] {
        self.table.as_slice()
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.table.get(pid)
    }

    /// Process currently holding the CPU
    pub fn running(&self) -> Option<&Process> {
        self.table.iter().find(|p| p.is_running())
    }

    pub fn log(&self) -> &[LogEntry] {
        self.log.entries()
    }

    pub fn intervals(&self) -> &[ExecutionInterval] {
        self.timeline.intervals()
    }

    pub fn counters(&self) -> SimulationCounters {
        self.counters
    }

    /// Pids waiting in the rotation queue, head first
    pub fn rotation_queue(&self) -> Vec<Pid> {
        self.queue.iter().collect()
    }

    /// Any process dispatched since the last reset
    pub fn has_started(&self) -> bool {
        self.table.iter().any(|p| p.has_started())
    }

    /// Every process has terminated (false when there are none)
    pub fn is_complete(&self) -> bool {
        !self.table.is_empty() && self.table.all_terminated()
    }

    pub fn stats(&self) -> Stats {
        compute_stats(self.table.as_slice(), self.current_tick)
    }

    /// Ready processes in the order the active policy would dispatch them
    pub fn ready_order(&self) -> Vec<Pid> {
        let policy = policy_for(self.config.algorithm);
        let mut ready = self.ready_set(self.current_tick);
        ready.sort_by_key(|p| policy.selection_key(p, &self.queue));
        ready.into_iter().map(|p| p.pid).collect()
    }

    /// Consistent copy of the full engine state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            run_id: self.run_id,
            algorithm: self.config.algorithm,
            current_tick: self.current_tick,
            running: self.table.running(),
            processes: self.table.as_slice().to_vec(),
            log: self.log.entries().to_vec(),
            intervals: self.timeline.intervals().to_vec(),
            stats: self.stats(),
            counters: self.counters,
        }
    }

    pub(crate) fn ready_set(&self, tick: Tick) -> Vec<&Process> {
        self.table
            .iter()
            .filter(|p| p.is_ready() && p.arrival_time <= tick)
            .collect()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::with_config(SimulatorConfig::default())
    }
}
