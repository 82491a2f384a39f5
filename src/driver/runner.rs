/*!
 * Simulation Driver
 *
 * Paces the engine from outside: a tokio interval fires one tick per period
 * while a command channel pauses, single-steps, resets or re-times the run.
 * The engine itself stays synchronous; the driver only ever holds the lock
 * for the duration of one tick.
 */

use super::traits::{SnapshotSink, StopReason};
use crate::core::limits::MAX_TICKS_PER_SECOND;
use crate::core::types::SimulatorResult;
use crate::core::DriverConfig;
use crate::monitoring::RunSpan;
use crate::simulation::{Simulator, Snapshot};
use log::{info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::Instrument;

/// Control messages for a running driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// Stop firing ticks
    Pause,
    /// Fire ticks again
    Resume,
    /// Advance exactly one tick, paused or not
    Step,
    /// Reset the simulator and keep driving
    Reset,
    /// Change the tick rate
    SetSpeed(u32),
    /// End the run
    Stop,
}

/// Cloneable sender side of a driver's command channel
#[derive(Debug, Clone)]
pub struct DriverHandle {
    command_tx: mpsc::UnboundedSender<DriverCommand>,
}

impl DriverHandle {
    pub fn pause(&self) {
        let _ = self.command_tx.send(DriverCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.command_tx.send(DriverCommand::Resume);
    }

    pub fn step(&self) {
        let _ = self.command_tx.send(DriverCommand::Step);
    }

    pub fn reset(&self) {
        let _ = self.command_tx.send(DriverCommand::Reset);
    }

    pub fn set_speed(&self, ticks_per_second: u32) {
        let _ = self.command_tx.send(DriverCommand::SetSpeed(ticks_per_second));
    }

    pub fn stop(&self) {
        let _ = self.command_tx.send(DriverCommand::Stop);
    }

    pub fn send(&self, command: DriverCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }
}

/// External stepping loop around a shared [`Simulator`]
pub struct SimulationDriver {
    simulator: Arc<Mutex<Simulator>>,
    config: DriverConfig,
    command_tx: mpsc::UnboundedSender<DriverCommand>,
    command_rx: mpsc::UnboundedReceiver<DriverCommand>,
}

impl SimulationDriver {
    pub fn new(simulator: Simulator, config: DriverConfig) -> SimulatorResult<Self> {
        Self::with_shared(Arc::new(Mutex::new(simulator)), config)
    }

    /// Drive a simulator that other components also read
    pub fn with_shared(
        simulator: Arc<Mutex<Simulator>>,
        config: DriverConfig,
    ) -> SimulatorResult<Self> {
        config.validate()?;
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        Ok(Self {
            simulator,
            config,
            command_tx,
            command_rx,
        })
    }

    pub fn simulator(&self) -> Arc<Mutex<Simulator>> {
        Arc::clone(&self.simulator)
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn handle(&self) -> DriverHandle {
        DriverHandle {
            command_tx: self.command_tx.clone(),
        }
    }

    /// Advance one tick outside the run loop
    pub fn step(&self) -> Snapshot {
        self.simulator.lock().tick()
    }

    /// Reason the loop should exit now, if any
    pub fn stop_reason(&self) -> Option<StopReason> {
        finished(&self.simulator, &self.config)
    }

    /// Drive the simulator until completion, the tick limit, or a stop command
    pub async fn run<S: SnapshotSink + ?Sized>(self, sink: &mut S) -> StopReason {
        let Self {
            simulator,
            mut config,
            // Held so the receiver never observes a closed channel.
            command_tx: _command_tx,
            mut command_rx,
        } = self;

        let (run_id, algorithm) = {
            let sim = simulator.lock();
            (sim.run_id(), sim.algorithm())
        };
        let span = RunSpan::new(run_id, algorithm);

        info!(
            "Driver started: {} at {} ticks/s, limit {:?}",
            algorithm, config.ticks_per_second, config.max_ticks
        );

        let reason = drive(&simulator, &mut config, &mut command_rx, sink)
            .instrument(span.span().clone())
            .await;

        let snapshot = simulator.lock().snapshot();
        span.record_outcome(snapshot.current_tick, snapshot.is_complete());
        info!(
            "Driver finished after {} ticks: {:?}",
            snapshot.current_tick, reason
        );
        sink.on_finish(&snapshot, reason);
        reason
    }
}

async fn drive<S: SnapshotSink + ?Sized>(
    simulator: &Mutex<Simulator>,
    config: &mut DriverConfig,
    command_rx: &mut mpsc::UnboundedReceiver<DriverCommand>,
    sink: &mut S,
) -> StopReason {
    let mut interval = tick_interval(config.ticks_per_second);
    let mut paused = false;

    loop {
        if let Some(reason) = finished(simulator, config) {
            return reason;
        }

        // Commands are polled first so a queued pause or stop wins over a due tick.
        tokio::select! {
            biased;

            Some(cmd) = command_rx.recv() => {
                match cmd {
                    DriverCommand::Pause => {
                        info!("Driver paused");
                        paused = true;
                    }

                    DriverCommand::Resume => {
                        info!("Driver resumed");
                        paused = false;
                        interval.reset();
                    }

                    DriverCommand::Step => {
                        let snapshot = simulator.lock().tick();
                        sink.on_tick(&snapshot);
                    }

                    DriverCommand::Reset => {
                        let snapshot = {
                            let mut sim = simulator.lock();
                            sim.reset();
                            sim.snapshot()
                        };
                        info!("Driver reset simulation (run {})", snapshot.run_id);
                        sink.on_tick(&snapshot);
                    }

                    DriverCommand::SetSpeed(requested) => {
                        let clamped = requested.clamp(1, MAX_TICKS_PER_SECOND);
                        if clamped != requested {
                            warn!(
                                "Requested {} ticks/s clamped to {}",
                                requested, clamped
                            );
                        }
                        config.ticks_per_second = clamped;
                        interval = tick_interval(clamped);
                        info!("Driver speed set to {} ticks/s", clamped);
                    }

                    DriverCommand::Stop => {
                        info!("Driver stopping on request");
                        return StopReason::Stopped;
                    }
                }
            }

            _ = interval.tick(), if !paused => {
                let snapshot = simulator.lock().tick();
                sink.on_tick(&snapshot);
            }
        }
    }
}

fn finished(simulator: &Mutex<Simulator>, config: &DriverConfig) -> Option<StopReason> {
    let sim = simulator.lock();
    if sim.is_complete() {
        return Some(StopReason::Completed);
    }
    match config.max_ticks {
        Some(limit) if sim.current_tick() >= limit => Some(StopReason::TickLimit),
        _ => None,
    }
}

fn tick_interval(ticks_per_second: u32) -> Interval {
    let period = Duration::from_secs(1) / ticks_per_second.max(1);
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
