/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Slot, Tickets};
use crate::process::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Process-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The process may have been destroyed or never existed. Check PID validity.")
    )]
    NotFound(Pid),

    #[error("Parent process {0} not found")]
    #[diagnostic(
        code(process::parent_not_found),
        help("A parent PID must name a process that currently exists.")
    )]
    ParentNotFound(Pid),

    #[error("Invalid state transition for process {pid}: {from:?} -> {to:?}")]
    #[diagnostic(
        code(process::invalid_transition),
        help("Allowed: Initializing->Ready, Ready->Running, Waiting->Ready, Running->Ready|Waiting.")
    )]
    InvalidTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Scheduler registry full")]
    #[diagnostic(
        code(scheduler::registry_full),
        help("All scheduler slots are occupied. Unregister an algorithm first.")
    )]
    RegistryFull,

    #[error("Scheduler slot {0} out of range")]
    #[diagnostic(code(scheduler::slot_out_of_range))]
    SlotOutOfRange(Slot),

    #[error("Scheduler slot {0} is empty")]
    #[diagnostic(
        code(scheduler::slot_empty),
        help("Register a scheduler into the slot before binding processes to it.")
    )]
    SlotEmpty(Slot),

    #[error("Scheduler in slot {slot} is {actual}, not {expected}")]
    #[diagnostic(
        code(scheduler::name_mismatch),
        help("Unregistering requires the exact name of the installed scheduler.")
    )]
    NameMismatch {
        slot: Slot,
        expected: String,
        actual: String,
    },

    #[error("Scheduler {0} is not registered")]
    #[diagnostic(code(scheduler::not_registered))]
    NotRegistered(String),

    #[error("Process {pid} does not carry {scheduler} parameters")]
    #[diagnostic(
        code(scheduler::params_mismatch),
        help("Only the scheduler that owns a parameter shape may interpret it.")
    )]
    ParamsMismatch { pid: Pid, scheduler: String },

    #[error("Process {0} not found")]
    #[diagnostic(code(scheduler::process_not_found))]
    ProcessNotFound(Pid),

    #[error("Scheduler already installed in slot {0}")]
    #[diagnostic(
        code(scheduler::already_installed),
        help("Unregister the scheduler before installing it again.")
    )]
    AlreadyInstalled(Slot),

    #[error("Process {pid} would hold {tickets} tickets, above the per-process limit")]
    #[diagnostic(
        code(scheduler::ticket_limit),
        help("A single process may hold at most MAX_PROCESS_TICKETS tickets.")
    )]
    TicketLimit { pid: Pid, tickets: Tickets },
}

/// Simulation driver result
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Simulation driver errors
#[derive(Error, Debug, Diagnostic)]
pub enum SimulationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Configuration errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    #[diagnostic(code(config::parse), help("The config file must be a JSON object."))]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    #[diagnostic(code(config::invalid_env))]
    InvalidEnv { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(config::invalid))]
    Invalid(String),
}
