/*!
 * Driver Traits
 * Seam between the stepping loop and whatever presents snapshots
 */

use crate::simulation::Snapshot;
use serde::{Deserialize, Serialize};

/// Why a driven run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every process terminated
    Completed,
    /// `max_ticks` reached first
    TickLimit,
    /// Stop command received
    Stopped,
}

/// Consumer of engine snapshots
///
/// Called with the simulator lock released, so implementations may block on
/// I/O without stalling command handling for longer than their own work.
pub trait SnapshotSink: Send {
    /// After every tick and after a reset
    fn on_tick(&mut self, snapshot: &Snapshot);

    /// Once, when the run loop exits
    fn on_finish(&mut self, snapshot: &Snapshot, reason: StopReason);
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for Box<S> {
    fn on_tick(&mut self, snapshot: &Snapshot) {
        (**self).on_tick(snapshot)
    }

    fn on_finish(&mut self, snapshot: &Snapshot, reason: StopReason) {
        (**self).on_finish(snapshot, reason)
    }
}
