/*!
 * Scheduler Parameters
 * Per-process parameters tagged by the scheduler that owns them
 */

use super::lottery::LotteryParams;
use serde::{Deserialize, Serialize};

/// Scheduler-specific parameters carried by a bound process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheduler", rename_all = "snake_case")]
pub enum SchedParams {
    Lottery(LotteryParams),
}

impl SchedParams {
    /// Lottery parameters holding `tickets`
    #[inline]
    #[must_use]
    pub fn lottery(tickets: crate::core::types::Tickets) -> Self {
        SchedParams::Lottery(LotteryParams::new(tickets))
    }

    #[inline]
    pub fn as_lottery(&self) -> Option<&LotteryParams> {
        match self {
            SchedParams::Lottery(params) => Some(params),
        }
    }

    #[inline]
    pub fn as_lottery_mut(&mut self) -> Option<&mut LotteryParams> {
        match self {
            SchedParams::Lottery(params) => Some(params),
        }
    }
}
