/*!
 * Scheduler Statistics
 * Dispatch counters kept by the scheduler registry
 */

use serde::{Deserialize, Serialize};

/// Scheduler registry statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    /// Schedule calls that put a process on the CPU
    pub dispatched: u64,
    /// Schedule calls that found nothing to run
    pub idle: u64,
    /// Running processes sent back to Ready at the start of a schedule call
    pub demoted: u64,
}
