/*!
 * Console Renderer
 * Plain-text presentation of snapshots: one line per tick, summary at the end
 */

use super::traits::{SnapshotSink, StopReason};
use crate::process::ProcessState;
use crate::simulation::{IntervalKind, Severity, Snapshot};
use std::io::{self, Stdout, Write};

/// Writes a tick-by-tick trace and a final report
///
/// Only log entries added since the previous snapshot are printed, so the
/// renderer keeps a cursor into the log and rewinds it when a reset empties it.
pub struct ConsoleRenderer<W: Write + Send = Stdout> {
    out: W,
    log_cursor: usize,
    verbose: bool,
}

impl ConsoleRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            log_cursor: 0,
            verbose: true,
        }
    }

    /// Suppress per-tick lines; only the final report is written
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.verbose = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_tick(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        if snapshot.log.len() < self.log_cursor {
            self.log_cursor = 0;
        }

        let running = snapshot
            .running
            .and_then(|pid| snapshot.process(pid))
            .map_or_else(|| "-".to_string(), |p| p.name.clone());
        let ready = names_in(snapshot, ProcessState::Ready);
        let waiting = names_in(snapshot, ProcessState::Waiting);

        writeln!(
            self.out,
            "[t={:>4}] cpu: {:<12} ready: [{}] io: [{}]",
            snapshot.current_tick, running, ready, waiting
        )?;

        for entry in &snapshot.log[self.log_cursor..] {
            writeln!(
                self.out,
                "         {:<7} @{:<4} {}",
                severity_tag(entry.severity),
                entry.tick,
                entry.message
            )?;
        }
        self.log_cursor = snapshot.log.len();
        Ok(())
    }

    fn write_report(&mut self, snapshot: &Snapshot, reason: StopReason) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "== {} finished at t={} ({:?}) ==",
            snapshot.algorithm.info().name,
            snapshot.current_tick,
            reason
        )?;

        writeln!(self.out, "timeline:")?;
        for interval in &snapshot.intervals {
            let label = match interval.kind {
                IntervalKind::Process => interval
                    .owner
                    .and_then(|pid| snapshot.process(pid))
                    .map_or_else(|| "?".to_string(), |p| p.name.clone()),
                IntervalKind::Idle => "idle".to_string(),
                IntervalKind::IoWait => "io-wait".to_string(),
                IntervalKind::ContextSwitch => "switch".to_string(),
            };
            writeln!(
                self.out,
                "  [{:>4}, {:>4})  {}",
                interval.start, interval.end, label
            )?;
        }

        writeln!(
            self.out,
            "{:<16} {:>7} {:>5} {:>8} {:>10} {:>7} {:>8}",
            "process", "arrival", "burst", "response", "turnaround", "waiting", "state"
        )?;
        for p in &snapshot.processes {
            writeln!(
                self.out,
                "{:<16} {:>7} {:>5} {:>8} {:>10} {:>7} {:>8}",
                p.name,
                p.arrival_time,
                p.burst_time,
                opt(p.response_time),
                opt(p.turnaround_time),
                opt(p.waiting_time),
                p.state.as_str()
            )?;
        }

        let stats = &snapshot.stats;
        writeln!(
            self.out,
            "cpu {:.1}%  avg waiting {:.2}  avg turnaround {:.2}  avg response {:.2}  throughput {:.3}/tick",
            stats.cpu_utilization,
            stats.avg_waiting_time,
            stats.avg_turnaround_time,
            stats.avg_response_time,
            stats.throughput
        )?;
        writeln!(
            self.out,
            "dispatches {}  preemptions {}  context switches {}",
            snapshot.counters.dispatches,
            snapshot.counters.preemptions,
            snapshot.counters.context_switches
        )?;
        self.out.flush()
    }
}

impl<W: Write + Send> SnapshotSink for ConsoleRenderer<W> {
    fn on_tick(&mut self, snapshot: &Snapshot) {
        if !self.verbose {
            return;
        }
        if let Err(e) = self.write_tick(snapshot) {
            log::warn!("Failed to render tick {}: {}", snapshot.current_tick, e);
        }
    }

    fn on_finish(&mut self, snapshot: &Snapshot, reason: StopReason) {
        if let Err(e) = self.write_report(snapshot, reason) {
            log::warn!("Failed to render final report: {}", e);
        }
    }
}

fn names_in(snapshot: &Snapshot, state: ProcessState) -> String {
    snapshot
        .processes
        .iter()
        .filter(|p| p.state == state)
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Success => "done",
        Severity::Warning => "warn",
        Severity::Error => "error",
    }
}

fn opt(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
