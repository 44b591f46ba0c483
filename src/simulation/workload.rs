/*!
 * Randomized Workload
 * Process creation, destruction, blocking, unblocking and ticket transfers
 */

use super::report::SimEvent;
use super::Simulation;
use crate::core::errors::{SchedulerError, SimulationResult};
use crate::core::limits::INIT_PID;
use crate::core::types::{Pid, Tickets};
use crate::process::{Process, ProcessState};
use rand::Rng;
use tracing::{debug, info};

impl Simulation {
    /// Apply one round of random workload events
    ///
    /// The init process is never destroyed, blocked or unblocked.
    pub(super) fn random_actions(&mut self) -> SimulationResult<Vec<SimEvent>> {
        let mut events = Vec::new();

        if self.rng.gen::<f64>() < self.config.creation_probability {
            let tickets = self.random_tickets();
            let pid = self.create_process(INIT_PID, tickets)?;
            info!(pid, tickets, "created process");
            events.push(SimEvent::Created { pid, tickets });
        }

        for pid in self.processes.pids() {
            if pid == INIT_PID {
                continue;
            }
            let Some(status) = self.processes.get(pid).map(Process::status) else {
                continue;
            };

            let r: f64 = self.rng.gen();
            if status == ProcessState::Ready && r < self.config.destroy_probability {
                self.processes.destroy(pid, &mut self.schedulers);
                info!(pid, "destroyed process");
                events.push(SimEvent::Destroyed { pid });
                continue;
            }

            let r: f64 = self.rng.gen();
            if status == ProcessState::Running && r < self.config.block_probability {
                self.processes
                    .set_status(pid, ProcessState::Waiting, &mut self.schedulers)?;
                if self.rng.gen::<f64>() < self.config.transfer_probability {
                    if let Some(event) = self.random_transfer(pid)? {
                        events.push(event);
                    }
                }
                info!(pid, "blocked process");
                events.push(SimEvent::Blocked { pid });
            } else if status == ProcessState::Waiting && r < self.config.unblock_probability {
                self.processes
                    .set_status(pid, ProcessState::Ready, &mut self.schedulers)?;
                info!(pid, "unblocked process");
                events.push(SimEvent::Unblocked { pid });
            }
        }

        Ok(events)
    }

    /// Transfer a random amount from `src` to a random Ready lottery process
    fn random_transfer(&mut self, src: Pid) -> SimulationResult<Option<SimEvent>> {
        let candidates: Vec<Pid> = self
            .processes
            .iter()
            .filter(|p| p.is_ready() && p.pid() != src)
            .filter(|p| self.lottery.tickets(&self.processes, p.pid()).is_some())
            .map(Process::pid)
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }

        let dst = candidates[self.rng.gen_range(0..candidates.len())];
        let requested = self.random_tickets();
        let moved = match self
            .lottery
            .transfer_tickets(&mut self.processes, src, dst, requested)
        {
            Ok(moved) => moved,
            Err(SchedulerError::TicketLimit { tickets, .. }) => {
                debug!(src, dst, requested, tickets, "transfer skipped: ticket limit");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        info!(src, dst, requested, moved, "transferred tickets");
        Ok(Some(SimEvent::Transferred {
            src,
            dst,
            requested,
            moved,
        }))
    }

    /// A ticket count in `ticket_quantum..=ticket_quantum * max_ticket_quanta`
    fn random_tickets(&mut self) -> Tickets {
        self.rng.gen_range(1..=self.config.max_ticket_quanta) * self.config.ticket_quantum
    }
}
