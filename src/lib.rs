/*!
 * Lottery Scheduling Simulator Library
 * Process registry, pluggable scheduler framework and lottery scheduling
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use crate::config::SimulationConfig;
pub use crate::core::errors::*;
pub use crate::core::types::{CpuUsage, Pid, Slot, Tickets};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessRegistry, ProcessState};
pub use scheduler::{
    LotteryParams, LotteryScheduler, SchedParams, SchedulerRegistry, SchedulerStats,
    SchedulingAlgorithm,
};
pub use simulation::{SimEvent, Simulation, StepReport};
