/*!
 * Lottery Scheduling Simulator - Main Entry Point
 *
 * Runs the randomized workload against the lottery scheduler and prints the
 * process table after every step.
 */

use anyhow::Context;
use lottery_sched::{init_tracing, monitoring::RunSpan, Simulation, SimulationConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SimulationConfig::from_env().context("failed to load simulation config")?;
    info!(?config, "configuration loaded");

    let run = RunSpan::new(config.seed);
    let _entered = run.enter();

    let steps = config.steps;
    let mut sim = Simulation::new(config).context("failed to start simulation")?;
    println!("{}", sim.render());

    for _ in 0..steps {
        let report = sim
            .step()
            .with_context(|| format!("step {} failed", sim.step_count()))?;
        println!("(Step: {})", report.step);
        println!("{}", sim.render());
    }

    run.record_steps(sim.step_count());
    let stats = sim.schedulers().stats();
    info!(
        run_id = run.run_id(),
        dispatched = stats.dispatched,
        idle = stats.idle,
        demoted = stats.demoted,
        "simulation finished"
    );
    Ok(())
}
