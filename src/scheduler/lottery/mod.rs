/*!
 * Lottery Scheduler
 * Probabilistic, ticket-weighted process selection
 *
 * Every Ready process bound to the lottery owns a contiguous range of
 * tickets; a uniform draw over the ticket total picks the process whose range
 * contains it. A process becoming Ready is appended to the total in O(1).
 * Any other status change, a destruction or a ticket transfer marks the
 * ranges stale, and the next schedule call rebuilds them over the whole
 * sequence before drawing.
 */

mod accounting;
mod params;
mod transfer;

pub use params::LotteryParams;

use super::params::SchedParams;
use super::registry::SchedulerRegistry;
use super::traits::SchedulingAlgorithm;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{LOTTERY_SCHEDULER_NAME, MAX_PROCESS_TICKETS};
use crate::core::types::{Pid, Slot, Tickets};
use crate::process::{Process, ProcessRegistry};
use log::{debug, info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Accounting state shared by every handle of one lottery scheduler
#[derive(Debug)]
struct Ledger {
    slot: Option<Slot>,
    total: Tickets,
    stale: bool,
    rng: StdRng,
}

/// Lottery scheduler handle
///
/// Clones share the same ledger, so the harness can keep a handle for
/// [`LotteryScheduler::transfer_tickets`] while another sits in the registry.
/// The accounting pass and the draw run under one lock.
#[derive(Debug, Clone)]
pub struct LotteryScheduler {
    ledger: Arc<Mutex<Ledger>>,
}

impl LotteryScheduler {
    /// Create a lottery scheduler drawing from an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a lottery scheduler with a deterministic draw sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger {
                slot: None,
                total: 0,
                stale: false,
                rng,
            })),
        }
    }

    /// Register this scheduler and remember the slot it landed in
    ///
    /// Fails while the slot from a previous install still holds the lottery.
    /// Reinstalling after an unregister marks the ranges stale.
    pub fn install(&self, schedulers: &mut SchedulerRegistry) -> SchedulerResult<Slot> {
        if let Some(slot) = self.slot() {
            if schedulers.name(slot) == Some(LOTTERY_SCHEDULER_NAME) {
                warn!("Lottery scheduler already installed in slot {}", slot);
                return Err(SchedulerError::AlreadyInstalled(slot));
            }
        }

        let slot = schedulers.register(Box::new(self.clone()))?;
        let mut ledger = self.ledger.lock();
        if ledger.slot.replace(slot).is_some() {
            ledger.stale = true;
        }
        info!("Lottery scheduler installed in slot {}", slot);
        Ok(slot)
    }

    /// Slot this scheduler was installed into
    pub fn slot(&self) -> Option<Slot> {
        self.ledger.lock().slot
    }

    /// Sum of the tickets currently counted into draw ranges
    pub fn total_tickets(&self) -> Tickets {
        self.ledger.lock().total
    }

    /// Whether the next schedule call will rebuild all ranges
    pub fn ranges_stale(&self) -> bool {
        self.ledger.lock().stale
    }

    /// Force a full accounting pass on the next schedule call
    pub fn invalidate(&self) {
        self.ledger.lock().stale = true;
    }

    /// Bind `process` to the lottery with `tickets`
    pub fn bind(
        &self,
        schedulers: &mut SchedulerRegistry,
        process: &mut Process,
        tickets: Tickets,
    ) -> SchedulerResult<Slot> {
        self.init_params(schedulers, process, SchedParams::lottery(tickets))
    }

    /// Ticket balance of `pid`, if it carries lottery parameters
    pub fn tickets(&self, processes: &ProcessRegistry, pid: Pid) -> Option<Tickets> {
        processes
            .get(pid)?
            .scheduler_params()?
            .as_lottery()
            .map(LotteryParams::tickets)
    }

    /// Rebuild stale ranges now
    pub fn refresh(&self, processes: &mut ProcessRegistry) {
        let mut ledger = self.ledger.lock();
        if ledger.stale {
            ledger.rebuild(processes);
        }
    }

    /// Resolve a given draw to a process, rebuilding stale ranges first
    ///
    /// Returns `None` when `draw` is outside `[0, total)`.
    pub fn schedule_with_draw(
        &self,
        processes: &mut ProcessRegistry,
        draw: Tickets,
    ) -> Option<Pid> {
        let mut ledger = self.ledger.lock();
        if ledger.stale {
            ledger.rebuild(processes);
        }
        if draw >= ledger.total {
            return None;
        }
        ledger.resolve(processes, draw)
    }
}

impl Default for LotteryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingAlgorithm for LotteryScheduler {
    fn name(&self) -> &'static str {
        LOTTERY_SCHEDULER_NAME
    }

    fn init_params(
        &self,
        schedulers: &mut SchedulerRegistry,
        process: &mut Process,
        params: SchedParams,
    ) -> SchedulerResult<Slot> {
        let Some(tickets) = params.as_lottery().map(LotteryParams::tickets) else {
            return Err(SchedulerError::ParamsMismatch {
                pid: process.pid(),
                scheduler: LOTTERY_SCHEDULER_NAME.to_string(),
            });
        };
        if tickets > MAX_PROCESS_TICKETS {
            return Err(SchedulerError::TicketLimit {
                pid: process.pid(),
                tickets,
            });
        }
        let slot = self
            .slot()
            .ok_or_else(|| SchedulerError::NotRegistered(LOTTERY_SCHEDULER_NAME.to_string()))?;

        // Binding may release old params through this very scheduler, so the
        // ledger lock must not be held here
        schedulers.bind_process(process, params, slot)?;

        // A process bound while already Ready was never counted
        if process.is_ready() {
            self.invalidate();
        }
        Ok(slot)
    }

    fn notify_status_change(&self, process: &mut Process) {
        let pid = process.pid();
        let mut ledger = self.ledger.lock();
        if process.is_ready() {
            if let Some(params) = process
                .scheduler_params_mut()
                .and_then(SchedParams::as_lottery_mut)
            {
                ledger.append(params);
                debug!(
                    "Process {} ready with tickets {:?} (total {})",
                    pid,
                    params.range(),
                    ledger.total
                );
            }
        } else {
            ledger.stale = true;
        }
    }

    fn schedule(&self, processes: &mut ProcessRegistry) -> Option<Pid> {
        let mut ledger = self.ledger.lock();
        if ledger.stale {
            ledger.rebuild(processes);
        }

        if ledger.total == 0 {
            debug!("Lottery has no tickets in play");
            return None;
        }

        let total = ledger.total;
        let draw = ledger.rng.gen_range(0..total);
        let winner = ledger.resolve(processes, draw);
        debug!("Lottery draw {} of {} -> {:?}", draw, total, winner);
        winner
    }

    fn release_params(&self, process: &mut Process) -> Option<Slot> {
        let (slot, _) = process.unbind()?;
        self.ledger.lock().stale = true;
        Some(slot)
    }
}
