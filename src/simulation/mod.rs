/*!
 * Simulation Driver
 * Owns the registries and drives randomized workload steps
 *
 * Each step applies random workload events and then runs the configured
 * number of schedule calls. Everything is owned here and passed down by
 * reference; there is no global state.
 */

mod report;
mod workload;

pub use report::{SimEvent, StepReport};

use crate::config::SimulationConfig;
use crate::core::errors::SimulationResult;
use crate::core::limits::INIT_PID;
use crate::core::types::{Pid, Tickets};
use crate::process::{ProcessRegistry, ProcessState};
use crate::scheduler::{LotteryScheduler, SchedulerRegistry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Simulation state
pub struct Simulation {
    config: SimulationConfig,
    processes: ProcessRegistry,
    schedulers: SchedulerRegistry,
    lottery: LotteryScheduler,
    rng: StdRng,
    step: u64,
}

impl Simulation {
    /// Install the lottery scheduler and create the init process
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let mut seeder = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let lottery = LotteryScheduler::with_seed(seeder.gen());
        let rng = StdRng::seed_from_u64(seeder.gen());

        let mut schedulers = SchedulerRegistry::new();
        lottery.install(&mut schedulers)?;

        let mut sim = Self {
            processes: ProcessRegistry::new(),
            schedulers,
            lottery,
            rng,
            step: 0,
            config,
        };

        let init = sim.create_process(INIT_PID, sim.config.init_tickets)?;
        info!(pid = init, tickets = sim.config.init_tickets, "init process created");
        Ok(sim)
    }

    /// Create a lottery process with `tickets` under `parent` and make it Ready
    pub fn create_process(&mut self, parent: Pid, tickets: Tickets) -> SimulationResult<Pid> {
        let pid = self.processes.create(Some(parent));
        if let Some(process) = self.processes.get_mut(pid) {
            self.lottery.bind(&mut self.schedulers, process, tickets)?;
        }
        self.processes
            .set_status(pid, ProcessState::Ready, &mut self.schedulers)?;
        debug!(pid, tickets, "process created");
        Ok(pid)
    }

    /// Run one step: workload events, then the schedule calls
    pub fn step(&mut self) -> SimulationResult<StepReport> {
        self.step += 1;
        let events = self.random_actions()?;

        let dispatched: Vec<Option<Pid>> = (0..self.config.sched_iterations)
            .map(|_| self.schedulers.schedule(&mut self.processes))
            .collect();

        info!(
            step = self.step,
            events = events.len(),
            dispatched = ?dispatched,
            processes = self.processes.len(),
            "step complete"
        );

        Ok(StepReport {
            step: self.step,
            events,
            dispatched,
        })
    }

    /// Run every configured step
    pub fn run(&mut self) -> SimulationResult<Vec<StepReport>> {
        (0..self.config.steps).map(|_| self.step()).collect()
    }

    /// Process table with each process's ticket balance
    pub fn render(&self) -> String {
        let lottery = &self.lottery;
        let processes = &self.processes;
        processes.render(|p| match lottery.tickets(processes, p.pid()) {
            Some(tickets) => format!("Tickets: {}", tickets),
            None => "Tickets: -".to_string(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn processes(&self) -> &ProcessRegistry {
        &self.processes
    }

    pub fn schedulers(&self) -> &SchedulerRegistry {
        &self.schedulers
    }

    pub fn lottery(&self) -> &LotteryScheduler {
        &self.lottery
    }

    /// Steps completed so far
    pub fn step_count(&self) -> u64 {
        self.step
    }
}
