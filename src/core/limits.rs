/*!
 * System Limits and Constants
 *
 * Centralized location for simulator-wide limits and workload defaults.
 */

// =============================================================================
// PROCESS REGISTRY
// =============================================================================

/// First PID handed out by a fresh process registry
pub const FIRST_PID: u32 = 1;

/// PID of the init process created by the simulation driver
/// The workload generator never blocks, destroys or transfers from it
pub const INIT_PID: u32 = 1;

// =============================================================================
// SCHEDULER REGISTRY
// =============================================================================

/// Number of scheduler slots
pub const MAX_SCHEDULER_SLOTS: usize = 4;

/// Slot whose scheduler makes the global pick
pub const PRIMARY_SLOT: usize = 0;

/// Registered name of the lottery scheduler
pub const LOTTERY_SCHEDULER_NAME: &str = "LOTT";

/// Most tickets a single process may hold
/// PIDs are u32, so the sum over every live process stays within u64
pub const MAX_PROCESS_TICKETS: u64 = u32::MAX as u64;

// =============================================================================
// SIMULATION WORKLOAD DEFAULTS
// =============================================================================

/// Steps run by the simulation binary
pub const DEFAULT_SIM_STEPS: u64 = 10;

/// Schedule calls per step
pub const DEFAULT_SCHED_ITERATIONS: u32 = 1;

/// Probability of creating a process in a step
pub const PROCESS_CREATION_PROBABILITY: f64 = 0.3;

/// Probability of destroying a ready process
pub const PROCESS_DESTROY_PROBABILITY: f64 = 0.05;

/// Probability of blocking the running process
pub const PROCESS_BLOCK_PROBABILITY: f64 = 0.6;

/// Probability of unblocking a waiting process
pub const PROCESS_UNBLOCK_PROBABILITY: f64 = 0.4;

/// Probability of a ticket transfer when a process blocks
pub const PROCESS_TRANSFER_PROBABILITY: f64 = 0.1;

/// Tickets held by the init process
pub const INIT_PROCESS_TICKETS: u64 = 1;

/// Tickets are generated in multiples of this quantum
pub const TICKET_QUANTUM: u64 = 100;

/// Upper bound on the multiplier applied to TICKET_QUANTUM
pub const MAX_TICKET_QUANTA: u64 = 100;
