/*!
 * Statistics Tests
 * Aggregates computed from real simulation runs
 */

use cpu_sched_sim::{compute_stats, Algorithm, ProcessSpec, Simulator};
use pretty_assertions::assert_eq;

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_fcfs_run_statistics() {
    let mut sim = Simulator::with_algorithm(Algorithm::Fcfs);
    sim.add_process(ProcessSpec::new("P1", 0, 5)).unwrap();
    sim.add_process(ProcessSpec::new("P2", 1, 3)).unwrap();
    while !sim.is_complete() {
        sim.advance();
    }

    let stats = sim.stats();
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.current_tick, 8);
    approx(stats.avg_waiting_time, 2.0);
    approx(stats.avg_turnaround_time, 6.0);
    approx(stats.avg_response_time, 2.0);
    approx(stats.cpu_utilization, 100.0);
    approx(stats.throughput, 0.25);
}

#[test]
fn test_partial_run_counts_finished_only() {
    let mut sim = Simulator::with_algorithm(Algorithm::Fcfs);
    sim.add_process(ProcessSpec::new("P1", 0, 5)).unwrap();
    sim.add_process(ProcessSpec::new("P2", 1, 3)).unwrap();
    for _ in 0..6 {
        sim.advance();
    }

    let stats = sim.stats();
    assert_eq!(stats.completed, 1);
    approx(stats.avg_turnaround_time, 5.0);
    approx(stats.cpu_utilization, 100.0 * 5.0 / 6.0);
    approx(stats.throughput, 1.0 / 6.0);
}

#[test]
fn test_io_lowers_utilization() {
    let mut sim = Simulator::with_algorithm(Algorithm::Fcfs);
    sim.add_process(ProcessSpec::new("P", 0, 6).with_io(2, 3))
        .unwrap();
    while !sim.is_complete() {
        sim.advance();
    }

    let stats = sim.stats();
    approx(stats.cpu_utilization, 100.0 * 6.0 / 9.0);
    approx(stats.avg_waiting_time, 0.0);
    approx(stats.avg_turnaround_time, 9.0);
}

#[test]
fn test_snapshot_stats_match_free_function() {
    let mut sim = Simulator::with_algorithm(Algorithm::RoundRobin);
    sim.add_process(ProcessSpec::new("a", 0, 3)).unwrap();
    sim.add_process(ProcessSpec::new("b", 2, 2)).unwrap();
    let mut snapshot = sim.tick();
    while !snapshot.is_complete() {
        snapshot = sim.tick();
    }

    assert_eq!(
        snapshot.stats,
        compute_stats(&snapshot.processes, snapshot.current_tick)
    );
    assert_eq!(snapshot.stats.completed, 2);
}
