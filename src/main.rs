/*!
 * CPU Scheduling Simulator - Main Entry Point
 *
 * Usage: simulator [workload.json]
 *
 * Without a workload file a seeded random workload is generated. Engine and
 * pacing settings come from the SCHED_* environment variables; a config block
 * inside the workload file takes precedence over the engine settings.
 */

use cpu_sched_sim::{
    init_tracing, Algorithm, ConsoleRenderer, DriverConfig, RandomWorkload, SimulationDriver,
    SimulatorConfig, Workload,
};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info};

const RANDOM_WORKLOAD_SIZE: usize = 5;
const RANDOM_WORKLOAD_SEED: u64 = 0x5eed;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let engine_config = SimulatorConfig::from_env()?;
    let driver_config = DriverConfig::from_env()?;

    let workload = match std::env::args().nth(1) {
        Some(path) => Workload::load(&path)?,
        None => {
            info!(
                seed = RANDOM_WORKLOAD_SEED,
                count = RANDOM_WORKLOAD_SIZE,
                "No workload file given, generating random processes"
            );
            let specs = RandomWorkload::seeded(RANDOM_WORKLOAD_SEED)
                .with_deadlines(engine_config.algorithm == Algorithm::Edf)
                .generate(RANDOM_WORKLOAD_SIZE);
            Workload::new(specs)
        }
    };

    let simulator = workload.into_simulator(engine_config)?;
    let info = simulator.algorithm().info();
    info!(
        algorithm = %simulator.algorithm(),
        processes = simulator.processes().len(),
        run_id = %simulator.run_id(),
        "{}",
        info.name
    );
    debug!("{}:\n{}", info.concept, info.pseudocode);

    let driver = SimulationDriver::new(simulator, driver_config)?;
    let handle = driver.handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping");
            handle.stop();
        }
    });

    let mut renderer = ConsoleRenderer::stdout();
    let reason = driver.run(&mut renderer).await;
    info!(?reason, "Simulation finished");

    std::io::Write::flush(&mut std::io::stdout()).into_diagnostic()?;
    Ok(())
}
