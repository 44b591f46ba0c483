/*!
 * Step Reports
 * Serializable record of what happened during one simulation step
 */

use crate::core::types::{Pid, Tickets};
use serde::{Deserialize, Serialize};

/// Workload event applied during a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    Created {
        pid: Pid,
        tickets: Tickets,
    },
    Destroyed {
        pid: Pid,
    },
    Blocked {
        pid: Pid,
    },
    Unblocked {
        pid: Pid,
    },
    Transferred {
        src: Pid,
        dst: Pid,
        requested: Tickets,
        moved: Tickets,
    },
}

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StepReport {
    pub step: u64,
    pub events: Vec<SimEvent>,
    /// Result of each schedule call, in order
    pub dispatched: Vec<Option<Pid>>,
}
