/*!
 * Lottery Parameters
 * Ticket balance and the draw range assigned during accounting
 */

use crate::core::types::Tickets;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Per-process lottery parameters
///
/// The range `[minor_ticket, greater_ticket)` is only meaningful after the
/// process has been counted into the current ticket total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LotteryParams {
    tickets: Tickets,
    minor_ticket: Tickets,
    greater_ticket: Tickets,
}

impl LotteryParams {
    #[inline]
    #[must_use]
    pub fn new(tickets: Tickets) -> Self {
        Self {
            tickets,
            minor_ticket: 0,
            greater_ticket: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn tickets(&self) -> Tickets {
        self.tickets
    }

    /// Range of draws that select this process
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<Tickets> {
        self.minor_ticket..self.greater_ticket
    }

    /// Whether `draw` falls in this process's range
    #[inline]
    #[must_use]
    pub fn contains(&self, draw: Tickets) -> bool {
        draw >= self.minor_ticket && draw < self.greater_ticket
    }

    /// Place this process's range at `start`, returning the end
    ///
    /// Balances are capped at `MAX_PROCESS_TICKETS`, so the sum cannot
    /// overflow for any number of live processes.
    pub(super) fn assign_range(&mut self, start: Tickets) -> Tickets {
        self.minor_ticket = start;
        self.greater_ticket = start.saturating_add(self.tickets);
        self.greater_ticket
    }

    pub(super) fn take(&mut self, amount: Tickets) {
        self.tickets = self.tickets.saturating_sub(amount);
    }

    pub(super) fn give(&mut self, amount: Tickets) {
        self.tickets = self.tickets.saturating_add(amount);
    }
}
