/*!
 * Rotation Queue
 * FIFO of ready pids for Round Robin and MLFQ, kept apart from process state
 */

use crate::core::types::Pid;
use std::collections::VecDeque;

/// Duplicate-free FIFO of pids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationQueue {
    entries: VecDeque<Pid>,
}

impl RotationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue at the tail; returns false if the pid was already queued
    pub fn push(&mut self, pid: Pid) -> bool {
        if self.entries.contains(&pid) {
            return false;
        }
        self.entries.push_back(pid);
        true
    }

    pub fn pop_front(&mut self) -> Option<Pid> {
        self.entries.pop_front()
    }

    pub fn remove(&mut self, pid: Pid) -> bool {
        match self.position(pid) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn position(&self, pid: Pid) -> Option<usize> {
        self.entries.iter().position(|&p| p == pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.contains(&pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.entries.iter().copied()
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
