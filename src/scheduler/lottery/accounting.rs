/*!
 * Ticket Accounting
 * Range assignment, full rebuild and draw resolution
 */

use super::{Ledger, LotteryParams};
use crate::core::types::{Pid, Tickets};
use crate::process::{Process, ProcessRegistry};
use crate::scheduler::params::SchedParams;
use log::debug;

impl Ledger {
    /// Append `params` to the running total, giving it `[total, total + tickets)`
    pub(super) fn append(&mut self, params: &mut LotteryParams) {
        self.total = params.assign_range(self.total);
    }

    /// Recount every Ready lottery process in sequence order
    ///
    /// Linear in the number of processes.
    pub(super) fn rebuild(&mut self, processes: &mut ProcessRegistry) {
        self.total = 0;
        if let Some(slot) = self.slot {
            for pid in processes.pids() {
                let Some(process) = processes.get_mut(pid) else {
                    continue;
                };
                if !process.is_ready() || !process.is_bound_to(slot) {
                    continue;
                }
                if let Some(params) = process
                    .scheduler_params_mut()
                    .and_then(SchedParams::as_lottery_mut)
                {
                    self.append(params);
                }
            }
        }
        self.stale = false;
        debug!("Lottery ranges rebuilt: {} tickets in play", self.total);
    }

    /// First Ready lottery process in sequence order whose range holds `draw`
    pub(super) fn resolve(&self, processes: &ProcessRegistry, draw: Tickets) -> Option<Pid> {
        let slot = self.slot?;
        processes
            .iter()
            .filter(|p| p.is_ready() && p.is_bound_to(slot))
            .find(|p| {
                p.scheduler_params()
                    .and_then(SchedParams::as_lottery)
                    .is_some_and(|params| params.contains(draw))
            })
            .map(Process::pid)
    }
}
