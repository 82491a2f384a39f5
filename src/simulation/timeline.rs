/*!
 * Execution Timeline
 * Contiguous CPU-occupancy intervals built one tick at a time
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// What occupied the CPU during an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    Process,
    Idle,
    IoWait,
    ContextSwitch,
}

/// Half-open interval `[start, end)`
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInterval {
    /// Set only for `IntervalKind::Process`
    pub owner: Option<Pid>,
    pub start: Tick,
    pub end: Tick,
    pub kind: IntervalKind,
}

impl ExecutionInterval {
    #[inline]
    pub const fn len(&self) -> Tick {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    intervals: Vec<ExecutionInterval>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick, extending the last interval when owner and kind match
    pub fn record(&mut self, tick: Tick, kind: IntervalKind, owner: Option<Pid>) {
        if let Some(last) = self.intervals.last_mut() {
            if last.kind == kind && last.owner == owner && last.end == tick {
                last.end = tick + 1;
                return;
            }
        }
        self.intervals.push(ExecutionInterval {
            owner,
            start: tick,
            end: tick + 1,
            kind,
        });
    }

    pub fn intervals(&self) -> &[ExecutionInterval] {
        &self.intervals
    }

    /// Process intervals owned by `pid`
    pub fn for_process(&self, pid: Pid) -> impl Iterator<Item = &ExecutionInterval> {
        self.intervals
            .iter()
            .filter(move |i| i.kind == IntervalKind::Process && i.owner == Some(pid))
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }
}
