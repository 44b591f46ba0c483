/*!
 * Scheduler Module
 * Pluggable scheduling algorithms, the slot registry and lottery scheduling
 */

pub mod lottery;
pub mod params;
pub mod registry;
pub mod stats;
pub mod traits;

// Re-export public API
pub use lottery::{LotteryParams, LotteryScheduler};
pub use params::SchedParams;
pub use registry::SchedulerRegistry;
pub use stats::SchedulerStats;
pub use traits::SchedulingAlgorithm;
