/*!
 * Scheduling Policy Trait
 * Interface every algorithm implements: selection, preemption and quantum
 */

use super::queue::RotationQueue;
use super::types::Algorithm;
use crate::core::types::{Pid, Tick};
use crate::process::Process;

/// Dispatch ordering key, compared lexicographically (smallest runs first)
pub type SelectionKey = (u64, u64, u64);

/// Pure decision functions for one algorithm
///
/// Implementations hold no state; rotation order lives in the stepper's
/// [`RotationQueue`] and is passed in.
pub trait SchedulingPolicy: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    /// Ordering key for a ready process
    fn selection_key(&self, process: &Process, queue: &RotationQueue) -> SelectionKey;

    /// Pick the next process to dispatch from the ready set
    fn select_next(&self, ready: &[&Process], queue: &RotationQueue) -> Option<Pid> {
        ready
            .iter()
            .min_by_key(|p| self.selection_key(p, queue))
            .map(|p| p.pid)
    }

    /// Key compared by the per-tick preemption check, `None` if not preemptive
    fn preemption_key(&self, _process: &Process) -> Option<u64> {
        None
    }

    /// Strict improvement only; equal keys never preempt
    fn should_preempt(&self, running: &Process, candidate: &Process) -> bool {
        match (
            self.preemption_key(running),
            self.preemption_key(candidate),
        ) {
            (Some(current), Some(challenger)) => challenger < current,
            _ => false,
        }
    }

    /// Quantum for the running process, `None` when unbounded
    fn quantum_for(&self, _process: &Process, _configured: Tick) -> Option<Tick> {
        None
    }

    /// Whether ready processes are tracked in the rotation queue
    fn uses_rotation_queue(&self) -> bool {
        false
    }

    /// Whether the per-tick preemption check runs
    fn is_preemptive(&self) -> bool {
        false
    }
}
