/*!
 * Ticket Transfer
 * Move tickets between two lottery processes
 */

use super::{LotteryParams, LotteryScheduler};
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{LOTTERY_SCHEDULER_NAME, MAX_PROCESS_TICKETS};
use crate::core::types::{Pid, Tickets};
use crate::process::ProcessRegistry;
use crate::scheduler::params::SchedParams;
use log::debug;

impl LotteryScheduler {
    /// Move up to `amount` tickets from `src` to `dst`
    ///
    /// Moves `min(amount, src balance)` and returns the amount moved. The
    /// combined balance of both processes is unchanged. A transfer that would
    /// push `dst` past `MAX_PROCESS_TICKETS` fails and moves nothing. Ranges are marked
    /// stale so the next draw sees the new balances.
    pub fn transfer_tickets(
        &self,
        processes: &mut ProcessRegistry,
        src: Pid,
        dst: Pid,
        amount: Tickets,
    ) -> SchedulerResult<Tickets> {
        let available = lottery_params(processes, src)?.tickets();
        let balance = lottery_params(processes, dst)?.tickets();

        let moved = amount.min(available);
        if src != dst {
            let tickets = balance.saturating_add(moved);
            if tickets > MAX_PROCESS_TICKETS {
                return Err(SchedulerError::TicketLimit { pid: dst, tickets });
            }
            lottery_params_mut(processes, src)?.take(moved);
            lottery_params_mut(processes, dst)?.give(moved);
        }

        self.invalidate();
        debug!(
            "Transferred {} of {} requested tickets from {} to {}",
            moved, amount, src, dst
        );
        Ok(moved)
    }
}

fn lottery_params(processes: &ProcessRegistry, pid: Pid) -> SchedulerResult<&LotteryParams> {
    processes
        .get(pid)
        .ok_or(SchedulerError::ProcessNotFound(pid))?
        .scheduler_params()
        .and_then(SchedParams::as_lottery)
        .ok_or_else(|| mismatch(pid))
}

fn lottery_params_mut(
    processes: &mut ProcessRegistry,
    pid: Pid,
) -> SchedulerResult<&mut LotteryParams> {
    processes
        .get_mut(pid)
        .ok_or(SchedulerError::ProcessNotFound(pid))?
        .scheduler_params_mut()
        .and_then(SchedParams::as_lottery_mut)
        .ok_or_else(|| mismatch(pid))
}

fn mismatch(pid: Pid) -> SchedulerError {
    SchedulerError::ParamsMismatch {
        pid,
        scheduler: LOTTERY_SCHEDULER_NAME.to_string(),
    }
}
