/*!
 * Registry State Operations
 * Status transitions, parent assignment and CPU accounting
 */

use super::ProcessRegistry;
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::types::{CpuUsage, Pid};
use crate::process::core::types::ProcessState;
use crate::scheduler::SchedulerRegistry;
use log::{debug, warn};

impl ProcessRegistry {
    /// Transition a process to `to`, enforcing the state machine
    ///
    /// On success the bound scheduler is notified with the already-updated
    /// record. Illegal transitions leave the process untouched and notify
    /// nobody.
    pub fn set_status(
        &mut self,
        pid: Pid,
        to: ProcessState,
        schedulers: &mut SchedulerRegistry,
    ) -> ProcessResult<Pid> {
        let process = self.get_mut(pid).ok_or(ProcessError::NotFound(pid))?;
        let from = process.status();

        if !from.can_transition_to(to) {
            warn!("Rejected transition for process {}: {:?} -> {:?}", pid, from, to);
            return Err(ProcessError::InvalidTransition { pid, from, to });
        }

        process.set_state(to);
        debug!("Process {} transitioned {:?} -> {:?}", pid, from, to);

        schedulers.notify_status_change(process);
        Ok(pid)
    }

    /// Set the parent of `pid` to `ppid`, which must exist in this registry
    pub fn set_parent_pid(&mut self, pid: Pid, ppid: Pid) -> ProcessResult<Pid> {
        if !self.contains(ppid) {
            return Err(ProcessError::ParentNotFound(ppid));
        }
        let process = self.get_mut(pid).ok_or(ProcessError::NotFound(pid))?;
        process.set_parent(ppid);
        Ok(pid)
    }

    /// Add `amount` to the CPU usage counter, returning the new total
    pub fn add_cpu_usage(&mut self, pid: Pid, amount: CpuUsage) -> ProcessResult<CpuUsage> {
        let process = self.get_mut(pid).ok_or(ProcessError::NotFound(pid))?;
        Ok(process.add_cpu_usage(amount))
    }
}
