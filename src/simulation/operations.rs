/*!
 * Simulator Operations
 * Process creation/removal, configuration changes and reset
 */

use super::{SimulationCounters, Simulator};
use crate::core::limits::MIN_TIME_QUANTUM;
use crate::core::types::{Pid, SimulatorResult, Tick};
use crate::core::SimulatorError;
use crate::process::{Process, ProcessSpec};
use crate::scheduler::{policy_for, Algorithm};
use log::info;
use uuid::Uuid;

impl Simulator {
    /// Add a process in state `new`; returns its pid
    ///
    /// Deadlines are checked against `arrival + burst` when EDF is active.
    pub fn add_process(&mut self, spec: ProcessSpec) -> SimulatorResult<Pid> {
        spec.validate(self.config.algorithm == Algorithm::Edf)?;

        let pid = self.next_pid;
        self.next_pid += 1;

        let process = Process::from_spec(pid, spec);
        info!(
            "Process {} ({}) added: arrival={}, burst={}, priority={}",
            pid, process.name, process.arrival_time, process.burst_time, process.priority
        );
        self.table.insert(process);
        Ok(pid)
    }

    /// Remove a process that has never been dispatched
    pub fn remove_process(&mut self, pid: Pid) -> SimulatorResult<Process> {
        let process = self
            .table
            .get(pid)
            .ok_or(SimulatorError::ProcessNotFound(pid))?;

        if process.has_started() {
            return Err(SimulatorError::InvalidOperation(format!(
                "process {} ({}) has already been dispatched",
                pid, process.name
            )));
        }

        self.queue.remove(pid);
        let removed = self
            .table
            .remove(pid)
            .ok_or(SimulatorError::ProcessNotFound(pid))?;
        info!("Process {} removed from simulation", pid);
        Ok(removed)
    }

    /// Change the algorithm; rejected once any process has been dispatched
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> SimulatorResult<()> {
        if algorithm == self.config.algorithm {
            return Ok(());
        }
        if self.has_started() {
            return Err(SimulatorError::InvalidOperation(format!(
                "cannot switch from {} to {} mid-run; reset first",
                self.config.algorithm, algorithm
            )));
        }
        if algorithm == Algorithm::Edf {
            for p in self.table.iter() {
                if let Some(deadline) = p.deadline {
                    let earliest = p.arrival_time.checked_add(p.burst_time).ok_or_else(|| {
                        SimulatorError::InvalidParameter(format!(
                            "process {} arrival + burst overflows the clock",
                            p.pid
                        ))
                    })?;
                    if deadline < earliest {
                        return Err(SimulatorError::InvalidParameter(format!(
                            "process {} deadline {} is before arrival + burst ({})",
                            p.pid, deadline, earliest
                        )));
                    }
                }
            }
        }

        info!(
            "Changing algorithm from {} to {}",
            self.config.algorithm, algorithm
        );
        self.config.algorithm = algorithm;
        self.rebuild_rotation_queue();
        Ok(())
    }

    pub fn set_time_quantum(&mut self, quantum: Tick) -> SimulatorResult<()> {
        if quantum < MIN_TIME_QUANTUM {
            return Err(SimulatorError::InvalidParameter(format!(
                "time quantum must be >= {}, got {}",
                MIN_TIME_QUANTUM, quantum
            )));
        }
        self.config.time_quantum = quantum;
        info!("Time quantum updated to {}", quantum);
        Ok(())
    }

    pub fn set_context_switch_duration(&mut self, duration: Tick) {
        self.config.context_switch_duration = duration;
        info!("Context switch duration updated to {}", duration);
    }

    /// Return every process to `new` and clear clock, log, timeline and queues
    ///
    /// Idempotent: a second reset leaves the state untouched.
    pub fn reset(&mut self) {
        let was_fresh = self.current_tick == 0 && !self.has_started();

        for p in self.table.iter_mut() {
            p.reset();
        }
        self.queue.clear();
        self.current_tick = 0;
        self.quantum_used = 0;
        self.pending_switch = 0;
        self.counters = SimulationCounters::default();
        self.log.clear();
        self.timeline.clear();

        if !was_fresh {
            self.run_id = Uuid::new_v4();
            info!("Simulation reset (run {})", self.run_id);
        }
    }

    // Ready processes enter the queue in pid order when the new policy rotates.
    fn rebuild_rotation_queue(&mut self) {
        self.queue.clear();
        if policy_for(self.config.algorithm).uses_rotation_queue() {
            for p in self.table.iter().filter(|p| p.is_ready()) {
                self.queue.push(p.pid);
            }
        }
    }
}
