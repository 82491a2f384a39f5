/*!
 * Decision Log
 * Append-only trace of scheduling decisions, ordered by tick
 */

use crate::core::types::Tick;
use log::debug;
use serde::{Deserialize, Serialize};

/// Log entry severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One scheduling decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub tick: Tick,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    entries: Vec<LogEntry>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        debug!("t={} [{:?}] {}", tick, severity, message);
        self.entries.push(LogEntry {
            tick,
            message,
            severity,
        });
    }

    pub fn info(&mut self, tick: Tick, message: impl Into<String>) {
        self.push(tick, Severity::Info, message);
    }

    pub fn success(&mut self, tick: Tick, message: impl Into<String>) {
        self.push(tick, Severity::Success, message);
    }

    pub fn warning(&mut self, tick: Tick, message: impl Into<String>) {
        self.push(tick, Severity::Warning, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries recorded at `tick`
    pub fn at(&self, tick: Tick) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.tick == tick)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
