/*!
 * Configuration Tests
 * SCHED_* environment loading; serialized because the environment is global
 */

use cpu_sched_sim::core::config::{
    ENV_ALGORITHM, ENV_CONTEXT_SWITCH, ENV_MAX_TICKS, ENV_TICKS_PER_SECOND, ENV_TIME_QUANTUM,
};
use cpu_sched_sim::{Algorithm, DriverConfig, SimulatorConfig, SimulatorError};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;

const ALL_VARS: [&str; 5] = [
    ENV_ALGORITHM,
    ENV_TIME_QUANTUM,
    ENV_CONTEXT_SWITCH,
    ENV_TICKS_PER_SECOND,
    ENV_MAX_TICKS,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_from_empty_env() {
    clear_env();
    assert_eq!(SimulatorConfig::from_env().unwrap(), SimulatorConfig::default());
    assert_eq!(DriverConfig::from_env().unwrap(), DriverConfig::default());
}

#[test]
#[serial]
fn test_values_from_env() {
    clear_env();
    env::set_var(ENV_ALGORITHM, "mlfq");
    env::set_var(ENV_TIME_QUANTUM, "5");
    env::set_var(ENV_CONTEXT_SWITCH, "1");
    env::set_var(ENV_TICKS_PER_SECOND, "20");
    env::set_var(ENV_MAX_TICKS, "400");

    let engine = SimulatorConfig::from_env().unwrap();
    assert_eq!(engine.algorithm, Algorithm::Mlfq);
    assert_eq!(engine.time_quantum, 5);
    assert_eq!(engine.context_switch_duration, 1);

    let driver = DriverConfig::from_env().unwrap();
    assert_eq!(driver.ticks_per_second, 20);
    assert_eq!(driver.max_ticks, Some(400));
    clear_env();
}

#[test]
#[serial]
fn test_bad_values_are_configuration_errors() {
    clear_env();
    env::set_var(ENV_TIME_QUANTUM, "0");
    assert!(matches!(
        SimulatorConfig::from_env(),
        Err(SimulatorError::Configuration(_))
    ));

    env::set_var(ENV_TIME_QUANTUM, "two");
    assert!(matches!(
        SimulatorConfig::from_env(),
        Err(SimulatorError::Configuration(_))
    ));
    env::remove_var(ENV_TIME_QUANTUM);

    env::set_var(ENV_ALGORITHM, "lottery");
    assert!(SimulatorConfig::from_env().is_err());

    env::set_var(ENV_TICKS_PER_SECOND, "0");
    assert!(DriverConfig::from_env().is_err());
    clear_env();
}
