/*!
 * Simulation Tests
 * End-to-end tick behavior for every algorithm, I/O and context switching
 */

use cpu_sched_sim::{
    Algorithm, IntervalKind, Pid, ProcessSpec, ProcessState, ProcessType, Severity, Simulator,
    Tick,
};
use pretty_assertions::assert_eq;

type Span = (IntervalKind, Option<Pid>, Tick, Tick);

fn run_to_completion(sim: &mut Simulator) {
    for _ in 0..1_000 {
        if sim.is_complete() {
            return;
        }
        sim.advance();
    }
    panic!("simulation did not complete within 1000 ticks");
}

fn spans(sim: &Simulator) -> Vec<Span> {
    sim.intervals()
        .iter()
        .map(|i| (i.kind, i.owner, i.start, i.end))
        .collect()
}

fn ran(pid: Pid, start: Tick, end: Tick) -> Span {
    (IntervalKind::Process, Some(pid), start, end)
}

#[test]
fn test_fcfs_scenario() {
    let mut sim = Simulator::with_algorithm(Algorithm::Fcfs);
    let p1 = sim.add_process(ProcessSpec::new("P1", 0, 5)).unwrap();
    let p2 = sim.add_process(ProcessSpec::new("P2", 1, 3)).unwrap();
    run_to_completion(&mut sim);

    assert_eq!(spans(&sim), vec![ran(p1, 0, 5), ran(p2, 5, 8)]);
    assert_eq!(sim.process(p1).unwrap().waiting_time, Some(0));
    assert_eq!(sim.process(p2).unwrap().waiting_time, Some(4));
    assert_eq!(sim.process(p2).unwrap().response_time, Some(4));
}

#[test]
fn test_sjf_is_non_preemptive() {
    let mut sim = Simulator::with_algorithm(Algorithm::Sjf);
    let p1 = sim.add_process(ProcessSpec::new("P1", 0, 6)).unwrap();
    let p2 = sim.add_process(ProcessSpec::new("P2", 1, 2)).unwrap();
    run_to_completion(&mut sim);

    assert_eq!(spans(&sim), vec![ran(p1, 0, 6), ran(p2, 6, 8)]);
    assert_eq!(sim.process(p1).unwrap().completion_time, Some(6));
    assert_eq!(sim.counters().preemptions, 0);
}

#[test]
fn test_round_robin_scenario() {
    let mut sim = Simulator::with_algorithm(Algorithm::RoundRobin);
    let p1 = sim.add_process(ProcessSpec::new("P1", 0, 4)).unwrap();
    let p2 = sim.add_process(ProcessSpec::new("P2", 0, 4)).unwrap();
    run_to_completion(&mut sim);

    assert_eq!(
        spans(&sim),
        vec![ran(p1, 0, 2), ran(p2, 2, 4), ran(p1, 4, 6), ran(p2, 6, 8)]
    );
    let expiries = sim
        .log()
        .iter()
        .filter(|e| e.severity == Severity::Warning && e.message.contains("quantum expired"))
        .count();
    assert_eq!(expiries, 2);
}

#[test]
fn test_io_scenario() {
    let mut sim = Simulator::with_algorithm(Algorithm::Fcfs);
    let p = sim
        .add_process(ProcessSpec::new("P", 0, 6).with_io(2, 3))
        .unwrap();
    run_to_completion(&mut sim);

    assert_eq!(
        spans(&sim),
        vec![
            ran(p, 0, 2),
            (IntervalKind::IoWait, None, 2, 5),
            ran(p, 5, 9)
        ]
    );
    let record = sim.process(p).unwrap();
    assert_eq!(record.total_io_time_consumed, 3);
    assert_eq!(record.completion_time, Some(9));
    assert_eq!(record.waiting_time, Some(0));
    assert!(sim.log().iter().any(|e| e.message == "P I/O complete"));
}

#[test]
fn test_round_robin_burst_five_needs_three_dispatches() {
    let mut sim = Simulator::with_algorithm(Algorithm::RoundRobin);
    let p1 = sim.add_process(ProcessSpec::new("P1", 0, 5)).unwrap();
    sim.add_process(ProcessSpec::new("P2", 0, 5)).unwrap();
    run_to_completion(&mut sim);

    let p1_runs: Vec<Span> = spans(&sim)
        .into_iter()
        .filter(|s| s.1 == Some(p1))
        .collect();
    assert_eq!(p1_runs, vec![ran(p1, 0, 2), ran(p1, 4, 6), ran(p1, 8, 9)]);
}

#[test]
fn test_round_robin_with_io_rotation() {
    let mut sim = Simulator::with_algorithm(Algorithm::RoundRobin);
    let p1 = sim
        .add_process(ProcessSpec::new("P1", 0, 4).with_io(1, 2))
        .unwrap();
    let p2 = sim.add_process(ProcessSpec::new("P2", 0, 3)).unwrap();
    run_to_completion(&mut sim);

    assert_eq!(
        spans(&sim),
        vec![
            ran(p1, 0, 1),
            ran(p2, 1, 3),
            ran(p1, 3, 5),
            ran(p2, 5, 6),
            ran(p1, 6, 7)
        ]
    );
    assert_eq!(sim.process(p1).unwrap().waiting_time, Some(1));
    assert_eq!(sim.process(p2).unwrap().waiting_time, Some(3));
}

#[test]
fn test_mlfq_demotes_after_full_quantum() {
    let mut sim = Simulator::with_algorithm(Algorithm::Mlfq);
    let a = sim.add_process(ProcessSpec::new("A", 0, 10)).unwrap();
    let b = sim.add_process(ProcessSpec::new("B", 0, 10)).unwrap();

    for _ in 0..5 {
        sim.advance();
    }

    let a_rec = sim.process(a).unwrap();
    assert_eq!(a_rec.queue_level, 1);
    assert_eq!(a_rec.state, ProcessState::Ready);
    assert_eq!(a_rec.remaining_time, 6);

    let b_rec = sim.process(b).unwrap();
    assert_eq!(b_rec.queue_level, 0);
    assert_eq!(b_rec.state, ProcessState::Running);
    assert!(sim
        .log()
        .iter()
        .any(|e| e.message.contains("demoted to level 1")));
}

#[test]
fn test_mlfq_keeps_level_across_io() {
    let mut sim = Simulator::with_algorithm(Algorithm::Mlfq);
    let p = sim
        .add_process(ProcessSpec::new("io", 0, 6).with_io(2, 1))
        .unwrap();
    for _ in 0..3 {
        sim.advance();
    }
    assert_eq!(sim.process(p).unwrap().state, ProcessState::Waiting);
    assert_eq!(sim.process(p).unwrap().queue_level, 0);

    run_to_completion(&mut sim);
    assert_eq!(sim.process(p).unwrap().queue_level, 0);
}

#[test]
fn test_mlfq_bottom_level_runs_to_completion() {
    let mut sim = Simulator::with_algorithm(Algorithm::Mlfq);
    let p = sim.add_process(ProcessSpec::new("long", 0, 30)).unwrap();
    run_to_completion(&mut sim);

    assert_eq!(sim.process(p).unwrap().queue_level, 2);
    assert_eq!(sim.process(p).unwrap().completion_time, Some(30));
    // Expiries at level 0 and level 1 only
    assert_eq!(sim.counters().preemptions, 2);
}

#[test]
fn test_srtf_preempts_within_one_tick() {
    let mut sim = Simulator::with_algorithm(Algorithm::Srtf);
    let long = sim.add_process(ProcessSpec::new("long", 0, 8)).unwrap();
    let short = sim.add_process(ProcessSpec::new("short", 2, 2)).unwrap();

    for _ in 0..3 {
        sim.advance();
    }
    assert_eq!(sim.running().map(|p| p.pid), Some(short));
    assert_eq!(sim.process(long).unwrap().state, ProcessState::Ready);
    assert!(sim
        .log()
        .iter()
        .any(|e| e.message == "long preempted by short"));

    run_to_completion(&mut sim);
    assert_eq!(
        spans(&sim),
        vec![ran(long, 0, 2), ran(short, 2, 4), ran(long, 4, 10)]
    );
    assert_eq!(sim.process(long).unwrap().waiting_time, Some(2));
}

#[test]
fn test_priority_preempts_on_strictly_better() {
    let mut sim = Simulator::with_algorithm(Algorithm::Priority);
    let low = sim
        .add_process(ProcessSpec::new("low", 0, 5).with_priority(3))
        .unwrap();
    let high = sim
        .add_process(ProcessSpec::new("high", 1, 2).with_priority(1))
        .unwrap();
    run_to_completion(&mut sim);

    assert_eq!(
        spans(&sim),
        vec![ran(low, 0, 1), ran(high, 1, 3), ran(low, 3, 7)]
    );
}

#[test]
fn test_priority_equal_does_not_preempt() {
    let mut sim = Simulator::with_algorithm(Algorithm::Priority);
    let a = sim
        .add_process(ProcessSpec::new("a", 0, 3).with_priority(2))
        .unwrap();
    let b = sim
        .add_process(ProcessSpec::new("b", 1, 3).with_priority(2))
        .unwrap();
    run_to_completion(&mut sim);

    assert_eq!(spans(&sim), vec![ran(a, 0, 3), ran(b, 3, 6)]);
    assert_eq!(sim.counters().preemptions, 0);
}

#[test]
fn test_edf_preempts_for_earlier_deadline() {
    let mut sim = Simulator::with_algorithm(Algorithm::Edf);
    let relaxed = sim
        .add_process(ProcessSpec::new("relaxed", 0, 6).with_deadline(20))
        .unwrap();
    let urgent = sim
        .add_process(ProcessSpec::new("urgent", 1, 2).with_deadline(5))
        .unwrap();
    run_to_completion(&mut sim);

    assert_eq!(
        spans(&sim),
        vec![ran(relaxed, 0, 1), ran(urgent, 1, 3), ran(relaxed, 3, 8)]
    );
}

#[test]
fn test_mlq_preempts_by_queue_index() {
    let mut sim = Simulator::with_algorithm(Algorithm::Mlq);
    let batch = sim
        .add_process(ProcessSpec::new("batch", 0, 4).with_type(ProcessType::Batch))
        .unwrap();
    let system = sim
        .add_process(ProcessSpec::new("system", 2, 2).with_type(ProcessType::System))
        .unwrap();
    run_to_completion(&mut sim);

    assert_eq!(
        spans(&sim),
        vec![ran(batch, 0, 2), ran(system, 2, 4), ran(batch, 4, 6)]
    );
}

#[test]
fn test_fcfs_completion_follows_arrival() {
    let mut sim = Simulator::with_algorithm(Algorithm::Fcfs);
    for (arrival, burst) in [(3, 2), (0, 4), (5, 1), (1, 3)] {
        sim.add_process(ProcessSpec::new("", arrival, burst)).unwrap();
    }
    run_to_completion(&mut sim);

    let mut finished: Vec<_> = sim.processes().iter().collect();
    finished.sort_by_key(|p| p.completion_time);
    let arrivals: Vec<Tick> = finished.iter().map(|p| p.arrival_time).collect();
    assert_eq!(arrivals, vec![0, 1, 3, 5]);
    assert_eq!(finished[0].name, "P2");
}

#[test]
fn test_context_switch_round_robin() {
    let mut sim = Simulator::with_algorithm(Algorithm::RoundRobin);
    sim.set_context_switch_duration(1);
    let p1 = sim.add_process(ProcessSpec::new("P1", 0, 3)).unwrap();
    let p2 = sim.add_process(ProcessSpec::new("P2", 0, 3)).unwrap();
    run_to_completion(&mut sim);

    let switch = |start: Tick| (IntervalKind::ContextSwitch, None, start, start + 1);
    assert_eq!(
        spans(&sim),
        vec![
            ran(p1, 0, 2),
            switch(2),
            ran(p2, 3, 5),
            switch(5),
            ran(p1, 6, 7),
            switch(7),
            ran(p2, 8, 9)
        ]
    );
    assert_eq!(sim.counters().context_switches, 3);
    assert_eq!(sim.process(p1).unwrap().waiting_time, Some(4));
    assert_eq!(sim.process(p2).unwrap().waiting_time, Some(6));
}

#[test]
fn test_zero_processes_only_advance_clock() {
    let mut sim = Simulator::default();
    for _ in 0..3 {
        sim.advance();
    }
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.current_tick, 3);
    assert!(snapshot.intervals.is_empty());
    assert!(snapshot.log.is_empty());
    assert_eq!(snapshot.stats.completed, 0);
    assert!(!snapshot.is_complete());
}

#[test]
fn test_reset_replays_identically() {
    let mut sim = Simulator::with_algorithm(Algorithm::RoundRobin);
    sim.add_process(ProcessSpec::new("a", 0, 5).with_io(2, 2)).unwrap();
    sim.add_process(ProcessSpec::new("b", 1, 3)).unwrap();
    sim.add_process(ProcessSpec::new("c", 2, 4)).unwrap();
    run_to_completion(&mut sim);
    let first = (spans(&sim), sim.processes().to_vec(), sim.log().to_vec());

    sim.reset();
    sim.reset();
    run_to_completion(&mut sim);
    let second = (spans(&sim), sim.processes().to_vec(), sim.log().to_vec());

    assert_eq!(first, second);
}

#[test]
fn test_snapshot_json_shape() {
    let mut sim = Simulator::with_algorithm(Algorithm::RoundRobin);
    sim.add_process(ProcessSpec::new("a", 0, 2)).unwrap();
    let snapshot = sim.tick();

    let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(value["algorithm"], "round_robin");
    assert_eq!(value["current_tick"], 1);
    assert_eq!(value["running"], 1);
    assert_eq!(value["processes"][0]["state"], "running");
    assert_eq!(value["intervals"][0]["kind"], "process");
    assert_eq!(value["log"][0]["severity"], "info");
}
