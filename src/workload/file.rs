/*!
 * Workload Files
 * JSON process lists with an optional engine configuration
 */

use crate::core::types::{Pid, SimulatorResult};
use crate::core::SimulatorConfig;
use crate::process::ProcessSpec;
use crate::simulation::Simulator;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of a workload file
///
/// ```json
/// {
///   "config": { "algorithm": "round_robin", "time_quantum": 2 },
///   "processes": [
///     { "name": "editor", "arrival_time": 0, "burst_time": 4, "type": "interactive" },
///     { "name": "backup", "arrival_time": 1, "burst_time": 8, "io": { "start_offset": 2, "duration": 3 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Workload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SimulatorConfig>,
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn new(processes: Vec<ProcessSpec>) -> Self {
        Self {
            config: None,
            processes,
        }
    }

    pub fn from_json(raw: &str) -> SimulatorResult<Self> {
        let workload: Workload = serde_json::from_str(raw)?;
        if let Some(config) = &workload.config {
            config.validate()?;
        }
        Ok(workload)
    }

    pub fn load(path: impl AsRef<Path>) -> SimulatorResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let workload = Self::from_json(&raw)?;
        info!(
            "Loaded workload from {}: {} processes",
            path.display(),
            workload.processes.len()
        );
        Ok(workload)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SimulatorResult<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Build a simulator for this workload, `fallback` when the file carries no config
    pub fn into_simulator(self, fallback: SimulatorConfig) -> SimulatorResult<Simulator> {
        let mut sim = Simulator::new(self.config.unwrap_or(fallback))?;
        self.apply(&mut sim)?;
        Ok(sim)
    }

    /// Add every process to `sim`; stops at the first rejected spec
    pub fn apply(&self, sim: &mut Simulator) -> SimulatorResult<Vec<Pid>> {
        self.processes
            .iter()
            .cloned()
            .map(|spec| sim.add_process(spec))
            .collect()
    }
}
