/*!
 * Configuration
 * Simulator and driver settings, loadable from SCHED_* environment variables
 */

use super::errors::SimulatorError;
use super::limits::{
    DEFAULT_CONTEXT_SWITCH, DEFAULT_TICKS_PER_SECOND, DEFAULT_TIME_QUANTUM, MAX_TICKS_PER_SECOND,
    MIN_TIME_QUANTUM,
};
use super::types::{SimulatorResult, Tick};
use crate::scheduler::Algorithm;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_ALGORITHM: &str = "SCHED_ALGORITHM";
pub const ENV_TIME_QUANTUM: &str = "SCHED_TIME_QUANTUM";
pub const ENV_CONTEXT_SWITCH: &str = "SCHED_CONTEXT_SWITCH";
pub const ENV_TICKS_PER_SECOND: &str = "SCHED_TICKS_PER_SECOND";
pub const ENV_MAX_TICKS: &str = "SCHED_MAX_TICKS";

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimulatorConfig {
    pub algorithm: Algorithm,
    pub time_quantum: Tick,
    pub context_switch_duration: Tick,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Fcfs,
            time_quantum: DEFAULT_TIME_QUANTUM,
            context_switch_duration: DEFAULT_CONTEXT_SWITCH,
        }
    }
}

impl SimulatorConfig {
    /// Load from the process environment, falling back to defaults
    pub fn from_env() -> SimulatorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SimulatorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_ALGORITHM) {
            config.algorithm = Algorithm::from_str(&raw).map_err(SimulatorError::Configuration)?;
        }
        if let Some(raw) = lookup(ENV_TIME_QUANTUM) {
            config.time_quantum = parse_number(ENV_TIME_QUANTUM, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CONTEXT_SWITCH) {
            config.context_switch_duration = parse_number(ENV_CONTEXT_SWITCH, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimulatorResult<()> {
        if self.time_quantum < MIN_TIME_QUANTUM {
            return Err(SimulatorError::Configuration(format!(
                "time quantum must be >= {}, got {}",
                MIN_TIME_QUANTUM, self.time_quantum
            )));
        }
        Ok(())
    }
}

/// Driver loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DriverConfig {
    pub ticks_per_second: u32,
    /// Hard stop for runaway loops; `None` runs until completion
    pub max_ticks: Option<Tick>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            max_ticks: None,
        }
    }
}

impl DriverConfig {
    pub fn from_env() -> SimulatorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> SimulatorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TICKS_PER_SECOND) {
            config.ticks_per_second = parse_number(ENV_TICKS_PER_SECOND, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_TICKS) {
            config.max_ticks = Some(parse_number(ENV_MAX_TICKS, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimulatorResult<()> {
        if self.ticks_per_second == 0 || self.ticks_per_second > MAX_TICKS_PER_SECOND {
            return Err(SimulatorError::Configuration(format!(
                "ticks per second must be between 1 and {}, got {}",
                MAX_TICKS_PER_SECOND, self.ticks_per_second
            )));
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> SimulatorResult<T> {
    raw.trim().parse::<T>().map_err(|_| {
        SimulatorError::Configuration(format!("{} must be a non-negative integer, got '{}'", key, raw))
    })
}
