/*!
 * Statistics Aggregator
 * Utilization, waiting, turnaround, response and throughput over finished processes
 */

use crate::core::types::Tick;
use crate::process::Process;
use serde::{Deserialize, Serialize};

/// Aggregate CPU statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Stats {
    /// Percent of elapsed ticks spent on finished bursts, capped at 100
    pub cpu_utilization: f64,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    /// Finished processes per tick
    pub throughput: f64,
    pub completed: usize,
    pub current_tick: Tick,
}

/// Compute statistics over the terminated subset of `processes`
///
/// All metrics are zero until at least one process has terminated.
pub fn compute_stats(processes: &[Process], current_tick: Tick) -> Stats {
    let completed: Vec<&Process> = processes.iter().filter(|p| p.is_terminated()).collect();

    if completed.is_empty() {
        return Stats {
            current_tick,
            ..Stats::default()
        };
    }

    let count = completed.len() as f64;
    let mean = |f: fn(&Process) -> Option<Tick>| {
        completed.iter().map(|p| f(*p).unwrap_or(0) as f64).sum::<f64>() / count
    };

    let total_burst: Tick = completed.iter().map(|p| p.burst_time).sum();
    let (cpu_utilization, throughput) = if current_tick > 0 {
        (
            (100.0 * total_burst as f64 / current_tick as f64).min(100.0),
            count / current_tick as f64,
        )
    } else {
        (0.0, 0.0)
    };

    Stats {
        cpu_utilization,
        avg_waiting_time: mean(|p| p.waiting_time),
        avg_turnaround_time: mean(|p| p.turnaround_time),
        avg_response_time: mean(|p| p.response_time),
        throughput,
        completed: completed.len(),
        current_tick,
    }
}
