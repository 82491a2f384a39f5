/*!
 * Process Table
 * Arena of process records with an O(1) pid index
 */

use super::record::Process;
use super::types::ProcessState;
use crate::core::types::Pid;
use ahash::AHashMap;

/// Owned arena of processes, iterated in pid (insertion) order
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    slots: Vec<Process>,
    index: AHashMap<Pid, usize>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, process: Process) {
        self.index.insert(process.pid, self.slots.len());
        self.slots.push(process);
    }

    /// Remove a process, keeping the remaining order intact
    pub fn remove(&mut self, pid: Pid) -> Option<Process> {
        let slot = self.index.remove(&pid)?;
        let removed = self.slots.remove(slot);
        for (i, p) in self.slots.iter().enumerate().skip(slot) {
            self.index.insert(p.pid, i);
        }
        Some(removed)
    }

    #[inline]
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.index.get(&pid).map(|&slot| &self.slots[slot])
    }

    #[inline]
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        match self.index.get(&pid) {
            Some(&slot) => self.slots.get_mut(slot),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.slots.iter_mut()
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pid of the running process, if any
    pub fn running(&self) -> Option<Pid> {
        self.slots.iter().find(|p| p.is_running()).map(|p| p.pid)
    }

    pub fn in_state(&self, state: ProcessState) -> impl Iterator<Item = &Process> {
        self.slots.iter().filter(move |p| p.state == state)
    }

    pub fn any_in_state(&self, state: ProcessState) -> bool {
        self.slots.iter().any(|p| p.state == state)
    }

    pub fn all_terminated(&self) -> bool {
        self.slots.iter().all(|p| p.is_terminated())
    }
}
