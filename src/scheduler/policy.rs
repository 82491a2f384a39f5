/*!
 * Scheduling Policies
 * Selection keys, tie-breaks and preemption rules for the eight algorithms
 */

use super::queue::RotationQueue;
use super::traits::{SchedulingPolicy, SelectionKey};
use super::types::Algorithm;
use crate::core::limits::{MLFQ_BOTTOM_LEVEL, MLFQ_LEVEL_QUANTA};
use crate::core::types::{Pid, Tick};
use crate::process::Process;

/// First come, first served
pub struct Fcfs;

/// Shortest job first, keyed on total burst
pub struct Sjf;

/// Shortest remaining time first
pub struct Srtf;

/// Preemptive priority
pub struct PriorityPolicy;

/// Round robin over the rotation queue
pub struct RoundRobin;

/// Earliest deadline first
pub struct Edf;

/// Multilevel queue by process type
pub struct Mlq;

/// Multilevel feedback queue
pub struct Mlfq;

/// Policy implementation for an algorithm
pub fn policy_for(algorithm: Algorithm) -> &'static dyn SchedulingPolicy {
    match algorithm {
        Algorithm::Fcfs => &Fcfs,
        Algorithm::Sjf => &Sjf,
        Algorithm::Srtf => &Srtf,
        Algorithm::Priority => &PriorityPolicy,
        Algorithm::RoundRobin => &RoundRobin,
        Algorithm::Edf => &Edf,
        Algorithm::Mlq => &Mlq,
        Algorithm::Mlfq => &Mlfq,
    }
}

/// Pick the next process under `algorithm`
pub fn select_next(
    algorithm: Algorithm,
    ready: &[&Process],
    queue: &RotationQueue,
) -> Option<Pid> {
    policy_for(algorithm).select_next(ready, queue)
}

/// Whether `candidate` should take the CPU from `running` under `algorithm`
pub fn should_preempt(algorithm: Algorithm, running: &Process, candidate: &Process) -> bool {
    let policy = policy_for(algorithm);
    policy.is_preemptive() && policy.should_preempt(running, candidate)
}

/// Quantum of an MLFQ rung, `None` for the bottom FCFS rung
#[inline]
pub fn mlfq_quantum(level: u8) -> Option<Tick> {
    let level = level.min(MLFQ_BOTTOM_LEVEL) as usize;
    MLFQ_LEVEL_QUANTA[level]
}

/// Rung after a quantum expiry
#[inline]
pub fn mlfq_demote(level: u8) -> u8 {
    (level + 1).min(MLFQ_BOTTOM_LEVEL)
}

#[inline(always)]
fn queue_rank(queue: &RotationQueue, pid: Pid) -> u64 {
    queue.position(pid).map_or(u64::MAX, |pos| pos as u64)
}

impl SchedulingPolicy for Fcfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn selection_key(&self, p: &Process, _queue: &RotationQueue) -> SelectionKey {
        (p.arrival_time, 0, p.pid as u64)
    }
}

impl SchedulingPolicy for Sjf {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    fn selection_key(&self, p: &Process, _queue: &RotationQueue) -> SelectionKey {
        (p.burst_time, p.arrival_time, p.pid as u64)
    }
}

impl SchedulingPolicy for Srtf {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Srtf
    }

    fn selection_key(&self, p: &Process, _queue: &RotationQueue) -> SelectionKey {
        (p.remaining_time, p.arrival_time, p.pid as u64)
    }

    fn preemption_key(&self, p: &Process) -> Option<u64> {
        Some(p.remaining_time)
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}

impl SchedulingPolicy for PriorityPolicy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }

    fn selection_key(&self, p: &Process, _queue: &RotationQueue) -> SelectionKey {
        (p.priority as u64, p.arrival_time, p.pid as u64)
    }

    fn preemption_key(&self, p: &Process) -> Option<u64> {
        Some(p.priority as u64)
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}

impl SchedulingPolicy for RoundRobin {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn selection_key(&self, p: &Process, queue: &RotationQueue) -> SelectionKey {
        (queue_rank(queue, p.pid), 0, p.pid as u64)
    }

    /// Head of the rotation queue that is actually ready
    fn select_next(&self, ready: &[&Process], queue: &RotationQueue) -> Option<Pid> {
        queue
            .iter()
            .find(|pid| ready.iter().any(|p| p.pid == *pid))
    }

    fn quantum_for(&self, _p: &Process, configured: Tick) -> Option<Tick> {
        Some(configured)
    }

    fn uses_rotation_queue(&self) -> bool {
        true
    }
}

impl SchedulingPolicy for Edf {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Edf
    }

    fn selection_key(&self, p: &Process, _queue: &RotationQueue) -> SelectionKey {
        (p.effective_deadline(), p.arrival_time, p.pid as u64)
    }

    fn preemption_key(&self, p: &Process) -> Option<u64> {
        Some(p.effective_deadline())
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}

impl SchedulingPolicy for Mlq {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Mlq
    }

    fn selection_key(&self, p: &Process, _queue: &RotationQueue) -> SelectionKey {
        (p.kind.mlq_queue() as u64, p.arrival_time, p.pid as u64)
    }

    fn preemption_key(&self, p: &Process) -> Option<u64> {
        Some(p.kind.mlq_queue() as u64)
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}

impl SchedulingPolicy for Mlfq {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Mlfq
    }

    // Rotation position only breaks ties between equal level and arrival.
    fn selection_key(&self, p: &Process, queue: &RotationQueue) -> SelectionKey {
        (p.queue_level as u64, p.arrival_time, queue_rank(queue, p.pid))
    }

    fn preemption_key(&self, p: &Process) -> Option<u64> {
        Some(p.queue_level as u64)
    }

    fn quantum_for(&self, p: &Process, _configured: Tick) -> Option<Tick> {
        mlfq_quantum(p.queue_level)
    }

    fn uses_rotation_queue(&self) -> bool {
        true
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}
