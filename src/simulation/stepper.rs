/*!
 * Simulation Stepper
 * One logical tick: arrivals, I/O, quantum, preemption, dispatch, execution, accounting
 */

use super::{DecisionLog, IntervalKind, Severity, Simulator, Snapshot};
use crate::core::types::{Pid, Tick};
use crate::process::{Process, ProcessState};
use crate::scheduler::{mlfq_demote, policy_for, Algorithm, SchedulingPolicy};
use log::error;

/// Move a process along one edge; the stepper only requests legal edges
fn move_to(log: &mut DecisionLog, t: Tick, process: &mut Process, next: ProcessState) {
    if let Err(err) = process.transition(next) {
        error!("{}", err);
        log.push(t, Severity::Error, err.to_string());
        debug_assert!(false, "{}", err);
    }
}

impl Simulator {
    /// Advance one tick and return the resulting snapshot
    pub fn tick(&mut self) -> Snapshot {
        self.advance();
        self.snapshot()
    }

    /// Advance one tick without building a snapshot
    ///
    /// Never fails: with no processes, or once every process has terminated,
    /// the tick only moves the clock.
    pub fn advance(&mut self) {
        let t = self.current_tick;

        if self.table.is_empty() || self.table.all_terminated() {
            self.current_tick = t + 1;
            return;
        }

        let policy = policy_for(self.config.algorithm);

        self.admit_arrivals(t, policy);
        self.advance_io(t, policy);
        self.expire_quantum(t, policy);
        self.start_due_io(t);
        if policy.is_preemptive() {
            self.check_preemption(t, policy);
        }
        self.dispatch_or_idle(t, policy);
        self.execute(t);
        self.accrue_waiting();

        self.current_tick = t + 1;
    }

    /// Step 1: `new -> ready` for every arrived process
    fn admit_arrivals(&mut self, t: Tick, policy: &dyn SchedulingPolicy) {
        let rotates = policy.uses_rotation_queue();
        for p in self.table.iter_mut() {
            if p.state == ProcessState::New && p.arrival_time <= t {
                move_to(&mut self.log, t, p, ProcessState::Ready);
                if rotates {
                    self.queue.push(p.pid);
                }
                self.log.info(t, format!("{} arrived", p.name));
            }
        }
    }

    /// Step 2: count down I/O, `waiting -> ready` on completion
    fn advance_io(&mut self, t: Tick, policy: &dyn SchedulingPolicy) {
        let rotates = policy.uses_rotation_queue();
        for p in self.table.iter_mut().filter(|p| p.is_waiting()) {
            p.remaining_io_time = p.remaining_io_time.saturating_sub(1);
            p.total_io_time_consumed += 1;

            if p.remaining_io_time == 0 {
                move_to(&mut self.log, t, p, ProcessState::Ready);
                if rotates {
                    self.queue.push(p.pid);
                }
                self.log.info(t, format!("{} I/O complete", p.name));
            }
        }
    }

    /// Step 3: quantum accounting for RR and the bounded MLFQ rungs
    fn expire_quantum(&mut self, t: Tick, policy: &dyn SchedulingPolicy) {
        let Some(pid) = self.table.running() else {
            return;
        };
        let configured = self.config.time_quantum;
        let Some(p) = self.table.get_mut(pid) else {
            return;
        };
        let Some(quantum) = policy.quantum_for(p, configured) else {
            return;
        };

        self.quantum_used += 1;
        if self.quantum_used < quantum {
            return;
        }

        move_to(&mut self.log, t, p, ProcessState::Ready);
        let mut message = format!("{} quantum expired after {} ticks", p.name, quantum);
        if policy.algorithm() == Algorithm::Mlfq {
            let from = p.queue_level;
            p.queue_level = mlfq_demote(from);
            if p.queue_level != from {
                message.push_str(&format!(", demoted to level {}", p.queue_level));
            }
        }
        if policy.uses_rotation_queue() {
            self.queue.push(pid);
        }
        self.log.warning(t, message);

        self.counters.preemptions += 1;
        self.quantum_used = 0;
        self.hand_off();
    }

    /// Step 4: the running process blocks once its I/O offset is reached
    fn start_due_io(&mut self, t: Tick) {
        let Some(pid) = self.table.running() else {
            return;
        };
        if self.table.get(pid).is_some_and(|p| p.is_io_due()) {
            self.start_io(t, pid);
            self.hand_off();
        }
    }

    /// Step 5: a strictly better ready candidate takes the CPU
    fn check_preemption(&mut self, t: Tick, policy: &dyn SchedulingPolicy) {
        let Some(running_pid) = self.table.running() else {
            return;
        };

        let (running_name, candidate_name) = {
            let ready = self.ready_set(t);
            let Some(best) = policy.select_next(&ready, &self.queue) else {
                return;
            };
            let (Some(running), Some(candidate)) = (self.table.get(running_pid), self.table.get(best))
            else {
                return;
            };
            if !policy.should_preempt(running, candidate) {
                return;
            }
            (running.name.clone(), candidate.name.clone())
        };

        if let Some(p) = self.table.get_mut(running_pid) {
            move_to(&mut self.log, t, p, ProcessState::Ready);
        }
        if policy.uses_rotation_queue() {
            self.queue.push(running_pid);
        }
        self.log.warning(
            t,
            format!("{} preempted by {}", running_name, candidate_name),
        );

        self.counters.preemptions += 1;
        self.quantum_used = 0;
        self.hand_off();
    }

    /// Step 6: spend context-switch overhead, or dispatch, or record idle time
    fn dispatch_or_idle(&mut self, t: Tick, policy: &dyn SchedulingPolicy) {
        if self.spend_switch_tick(t) {
            return;
        }

        if let Some(pid) = self.table.running() {
            self.timeline.record(t, IntervalKind::Process, Some(pid));
            return;
        }

        loop {
            let next = {
                let ready = self.ready_set(t);
                policy.select_next(&ready, &self.queue)
            };
            let Some(pid) = next else {
                break;
            };

            self.dispatch(t, pid);

            // Offset already reached while the process sat in the ready set;
            // the CPU changes hands again, so the overhead starts this tick.
            if self.table.get(pid).is_some_and(|p| p.is_io_due()) {
                self.start_io(t, pid);
                self.hand_off();
                if self.spend_switch_tick(t) {
                    return;
                }
                continue;
            }

            self.timeline.record(t, IntervalKind::Process, Some(pid));
            return;
        }

        let kind = if self.table.any_in_state(ProcessState::Waiting) {
            IntervalKind::IoWait
        } else {
            IntervalKind::Idle
        };
        self.timeline.record(t, kind, None);
    }

    /// Step 7: run the CPU for one tick
    fn execute(&mut self, t: Tick) {
        let Some(pid) = self.table.running() else {
            return;
        };
        let Some(p) = self.table.get_mut(pid) else {
            return;
        };

        p.remaining_time = p.remaining_time.saturating_sub(1);
        if p.remaining_time > 0 {
            return;
        }

        move_to(&mut self.log, t, p, ProcessState::Terminated);
        let completion = t + 1;
        let turnaround = completion - p.arrival_time;
        let waiting = turnaround
            .saturating_sub(p.burst_time)
            .saturating_sub(p.total_io_time_consumed);
        p.completion_time = Some(completion);
        p.turnaround_time = Some(turnaround);
        p.waiting_time = Some(waiting);

        self.log.success(
            t,
            format!(
                "{} completed (turnaround {}, waiting {})",
                p.name, turnaround, waiting
            ),
        );

        self.quantum_used = 0;
        if !self.table.all_terminated() {
            self.hand_off();
        }
    }

    /// Step 8: ready processes accrue waiting time
    fn accrue_waiting(&mut self) {
        for p in self.table.iter_mut().filter(|p| p.is_ready()) {
            p.waiting_time_accumulated += 1;
        }
    }

    fn dispatch(&mut self, t: Tick, pid: Pid) {
        self.queue.remove(pid);
        let Some(p) = self.table.get_mut(pid) else {
            return;
        };

        move_to(&mut self.log, t, p, ProcessState::Running);
        if p.start_time.is_none() {
            p.start_time = Some(t);
            p.response_time = Some(t - p.arrival_time);
        }
        let message = if self.config.algorithm == Algorithm::Mlfq {
            format!("{} dispatched from level {}", p.name, p.queue_level)
        } else {
            format!("{} dispatched", p.name)
        };
        self.log.info(t, message);

        self.quantum_used = 0;
        self.counters.dispatches += 1;
    }

    fn start_io(&mut self, t: Tick, pid: Pid) {
        let Some(p) = self.table.get_mut(pid) else {
            return;
        };
        let Some(io) = p.io else {
            return;
        };

        move_to(&mut self.log, t, p, ProcessState::Waiting);
        p.remaining_io_time = io.duration;
        p.io_consumed = true;
        self.log.info(
            t,
            format!("{} I/O start ({} ticks)", p.name, io.duration),
        );
        self.quantum_used = 0;
    }

    /// Burn one pending context-switch tick, if any
    fn spend_switch_tick(&mut self, t: Tick) -> bool {
        if self.pending_switch == 0 {
            return false;
        }
        self.pending_switch -= 1;
        self.timeline.record(t, IntervalKind::ContextSwitch, None);
        true
    }

    /// The CPU changed hands; arm the configured context-switch overhead
    fn hand_off(&mut self) {
        self.counters.context_switches += 1;
        self.pending_switch = self.config.context_switch_duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessSpec;

    fn run(sim: &mut Simulator, ticks: usize) {
        for _ in 0..ticks {
            sim.advance();
        }
    }

    #[test]
    fn test_empty_tick_advances_clock_only() {
        let mut sim = Simulator::default();
        let snapshot = sim.tick();
        assert_eq!(snapshot.current_tick, 1);
        assert!(snapshot.intervals.is_empty());
        assert!(snapshot.log.is_empty());
    }

    #[test]
    fn test_finished_simulation_ticks_are_no_ops() {
        let mut sim = Simulator::default();
        sim.add_process(ProcessSpec::new("a", 0, 2)).unwrap();
        run(&mut sim, 2);
        assert!(sim.is_complete());

        let log_len = sim.log().len();
        let intervals = sim.intervals().to_vec();
        run(&mut sim, 3);

        assert_eq!(sim.current_tick(), 5);
        assert_eq!(sim.log().len(), log_len);
        assert_eq!(sim.intervals(), intervals.as_slice());
    }

    #[test]
    fn test_idle_until_first_arrival() {
        let mut sim = Simulator::default();
        sim.add_process(ProcessSpec::new("late", 3, 1)).unwrap();
        run(&mut sim, 4);

        let intervals = sim.intervals();
        assert_eq!(intervals[0].kind, IntervalKind::Idle);
        assert_eq!((intervals[0].start, intervals[0].end), (0, 3));
        assert_eq!(intervals[1].owner, Some(1));
        assert_eq!(sim.process(1).unwrap().response_time, Some(0));
    }

    #[test]
    fn test_io_offset_zero_blocks_before_running() {
        let mut sim = Simulator::default();
        sim.add_process(ProcessSpec::new("io", 0, 2).with_io(0, 2)).unwrap();

        sim.advance();
        let p = sim.process(1).unwrap();
        assert_eq!(p.state, ProcessState::Waiting);
        assert_eq!(p.remaining_time, 2);
        assert_eq!(p.start_time, Some(0));
        assert_eq!(sim.intervals()[0].kind, IntervalKind::IoWait);

        run(&mut sim, 10);
        let p = sim.process(1).unwrap();
        assert_eq!(p.completion_time, Some(4));
        assert_eq!(p.total_io_time_consumed, 2);
        assert_eq!(p.waiting_time, Some(0));
    }

    #[test]
    fn test_context_switch_occupies_cpu() {
        let mut sim = Simulator::default();
        sim.set_context_switch_duration(1);
        sim.add_process(ProcessSpec::new("a", 0, 2)).unwrap();
        sim.add_process(ProcessSpec::new("b", 0, 2)).unwrap();
        run(&mut sim, 10);

        let kinds: Vec<(IntervalKind, Tick, Tick)> = sim
            .intervals()
            .iter()
            .map(|i| (i.kind, i.start, i.end))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (IntervalKind::Process, 0, 2),
                (IntervalKind::ContextSwitch, 2, 3),
                (IntervalKind::Process, 3, 5),
            ]
        );
        let b = sim.process(2).unwrap();
        assert_eq!(b.waiting_time, Some(3));
        assert_eq!(b.waiting_time_accumulated, 3);
        assert_eq!(sim.counters().context_switches, 1);
    }

    #[test]
    fn test_io_at_dispatch_charges_context_switch() {
        let mut sim = Simulator::default();
        sim.set_context_switch_duration(2);
        sim.add_process(ProcessSpec::new("io", 0, 3).with_io(0, 5)).unwrap();
        sim.add_process(ProcessSpec::new("cpu", 0, 2)).unwrap();
        run(&mut sim, 20);

        let spans: Vec<(IntervalKind, Option<Pid>, Tick, Tick)> = sim
            .intervals()
            .iter()
            .map(|i| (i.kind, i.owner, i.start, i.end))
            .collect();
        assert_eq!(
            spans,
            vec![
                (IntervalKind::ContextSwitch, None, 0, 2),
                (IntervalKind::Process, Some(2), 2, 4),
                (IntervalKind::ContextSwitch, None, 4, 6),
                (IntervalKind::Process, Some(1), 6, 9),
            ]
        );
        assert_eq!(sim.counters().context_switches, 2);

        let cpu = sim.process(2).unwrap();
        assert_eq!(cpu.start_time, Some(2));
        assert_eq!(cpu.waiting_time, Some(2));

        let io = sim.process(1).unwrap();
        assert_eq!(io.completion_time, Some(9));
        assert_eq!(io.total_io_time_consumed, 5);
        assert_eq!(io.waiting_time, Some(1));
    }

    #[test]
    fn test_single_process_round_robin_rotates_onto_itself() {
        let mut sim = Simulator::with_algorithm(Algorithm::RoundRobin);
        sim.add_process(ProcessSpec::new("solo", 0, 5)).unwrap();
        run(&mut sim, 5);

        assert!(sim.is_complete());
        assert_eq!(sim.intervals().len(), 1);
        assert_eq!(sim.counters().dispatches, 3);
        assert_eq!(sim.counters().preemptions, 2);
    }
}
