/*!
 * Scheduling Algorithm Trait
 * The capability set every pluggable scheduler provides
 */

use super::params::SchedParams;
use super::registry::SchedulerRegistry;
use crate::core::errors::SchedulerResult;
use crate::core::types::{Pid, Slot};
use crate::process::{Process, ProcessRegistry};

/// A scheduling algorithm installed into a [`SchedulerRegistry`] slot
///
/// Each algorithm owns the shape of the [`SchedParams`] it hands to its
/// processes; no other algorithm interprets them.
#[cfg_attr(test, mockall::automock)]
pub trait SchedulingAlgorithm: Send + Sync {
    /// Short identity, checked on unregistration
    fn name(&self) -> &'static str;

    /// Bind `process` to this algorithm's slot with `params`
    fn init_params(
        &self,
        schedulers: &mut SchedulerRegistry,
        process: &mut Process,
        params: SchedParams,
    ) -> SchedulerResult<Slot>;

    /// Called after a bound process changed status
    fn notify_status_change(&self, process: &mut Process);

    /// Pick the next process to run, if any
    fn schedule(&self, processes: &mut ProcessRegistry) -> Option<Pid>;

    /// Drop the process's parameters, returning the slot it was bound to
    fn release_params(&self, process: &mut Process) -> Option<Slot>;
}
