/*!
 * Simulation Configuration
 * Compiled-in defaults, optional JSON file, environment overrides
 *
 * Environment variables:
 * - LOTTERY_SIM_CONFIG: JSON config file loaded before overrides
 * - LOTTERY_SIM_SEED: seed for ticket draws and workload generation
 * - LOTTERY_SIM_STEPS: number of steps to run
 * - LOTTERY_SIM_ITERATIONS: schedule calls per step
 * - LOTTERY_SIM_CREATE_P / _DESTROY_P / _BLOCK_P / _UNBLOCK_P / _TRANSFER_P:
 *   workload event probabilities
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const ENV_CONFIG_PATH: &str = "LOTTERY_SIM_CONFIG";
pub const ENV_SEED: &str = "LOTTERY_SIM_SEED";
pub const ENV_STEPS: &str = "LOTTERY_SIM_STEPS";
pub const ENV_ITERATIONS: &str = "LOTTERY_SIM_ITERATIONS";
pub const ENV_CREATE_P: &str = "LOTTERY_SIM_CREATE_P";
pub const ENV_DESTROY_P: &str = "LOTTERY_SIM_DESTROY_P";
pub const ENV_BLOCK_P: &str = "LOTTERY_SIM_BLOCK_P";
pub const ENV_UNBLOCK_P: &str = "LOTTERY_SIM_UNBLOCK_P";
pub const ENV_TRANSFER_P: &str = "LOTTERY_SIM_TRANSFER_P";

/// Simulation driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Seed for draws and workload; entropy when unset
    pub seed: Option<u64>,
    pub steps: u64,
    pub sched_iterations: u32,
    pub creation_probability: f64,
    pub destroy_probability: f64,
    pub block_probability: f64,
    pub unblock_probability: f64,
    pub transfer_probability: f64,
    /// Tickets held by the init process
    pub init_tickets: u64,
    /// Generated ticket counts are multiples of this
    pub ticket_quantum: u64,
    /// Largest multiplier applied to `ticket_quantum`
    pub max_ticket_quanta: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            steps: DEFAULT_SIM_STEPS,
            sched_iterations: DEFAULT_SCHED_ITERATIONS,
            creation_probability: PROCESS_CREATION_PROBABILITY,
            destroy_probability: PROCESS_DESTROY_PROBABILITY,
            block_probability: PROCESS_BLOCK_PROBABILITY,
            unblock_probability: PROCESS_UNBLOCK_PROBABILITY,
            transfer_probability: PROCESS_TRANSFER_PROBABILITY,
            init_tickets: INIT_PROCESS_TICKETS,
            ticket_quantum: TICKET_QUANTUM,
            max_ticket_quanta: MAX_TICKET_QUANTA,
        }
    }
}

impl SimulationConfig {
    /// Load a JSON config file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Build the configuration from the environment
    ///
    /// Starts from `LOTTERY_SIM_CONFIG` when set, otherwise from defaults,
    /// then applies the per-field overrides and validates the result.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Some(seed) = env_parse(ENV_SEED)? {
            config.seed = Some(seed);
        }
        if let Some(steps) = env_parse(ENV_STEPS)? {
            config.steps = steps;
        }
        if let Some(iterations) = env_parse(ENV_ITERATIONS)? {
            config.sched_iterations = iterations;
        }
        if let Some(p) = env_parse(ENV_CREATE_P)? {
            config.creation_probability = p;
        }
        if let Some(p) = env_parse(ENV_DESTROY_P)? {
            config.destroy_probability = p;
        }
        if let Some(p) = env_parse(ENV_BLOCK_P)? {
            config.block_probability = p;
        }
        if let Some(p) = env_parse(ENV_UNBLOCK_P)? {
            config.unblock_probability = p;
        }
        if let Some(p) = env_parse(ENV_TRANSFER_P)? {
            config.transfer_probability = p;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    /// Reject probabilities outside [0, 1], empty ticket generation and
    /// ticket counts above the per-process limit
    pub fn validate(&self) -> ConfigResult<()> {
        let probabilities = [
            ("creation_probability", self.creation_probability),
            ("destroy_probability", self.destroy_probability),
            ("block_probability", self.block_probability),
            ("unblock_probability", self.unblock_probability),
            ("transfer_probability", self.transfer_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.ticket_quantum == 0 {
            return Err(ConfigError::Invalid("ticket_quantum must be positive".into()));
        }
        if self.max_ticket_quanta == 0 {
            return Err(ConfigError::Invalid(
                "max_ticket_quanta must be positive".into(),
            ));
        }
        let largest = self.ticket_quantum.checked_mul(self.max_ticket_quanta);
        if largest.map_or(true, |t| t > MAX_PROCESS_TICKETS) {
            return Err(ConfigError::Invalid(format!(
                "ticket_quantum * max_ticket_quanta must not exceed {}",
                MAX_PROCESS_TICKETS
            )));
        }
        if self.init_tickets > MAX_PROCESS_TICKETS {
            return Err(ConfigError::Invalid(format!(
                "init_tickets must not exceed {}",
                MAX_PROCESS_TICKETS
            )));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> ConfigResult<Option<T>> {
    match std::env::var(key) {
        Ok(value) => {
            let parsed = value.trim().parse();
            parsed.map(Some).map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value,
            })
        }
        Err(_) => Ok(None),
    }
}
