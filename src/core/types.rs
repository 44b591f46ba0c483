/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Scheduler slot index (0..MAX_SCHEDULER_SLOTS)
pub type Slot = usize;

/// Lottery ticket count
pub type Tickets = u64;

/// CPU usage counter (one unit per dispatch)
pub type CpuUsage = u64;
