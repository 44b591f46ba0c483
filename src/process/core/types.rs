/*!
 * Process Types
 * Process record and lifecycle state machine
 */

use crate::core::types::{CpuUsage, Pid, Slot};
use crate::scheduler::params::SchedParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process record exists but has not been admitted yet
    Initializing,
    /// Process is waiting for I/O or event
    Waiting,
    /// Process is eligible for the CPU
    Ready,
    /// Process currently holds the CPU
    Running,
}

impl ProcessState {
    /// Whether the transition table admits `self -> to`
    ///
    /// Initializing -> Ready, Ready -> Running, Waiting -> Ready,
    /// Running -> Ready | Waiting. Everything else is rejected.
    #[inline]
    #[must_use]
    pub const fn can_transition_to(self, to: ProcessState) -> bool {
        matches!(
            (self, to),
            (ProcessState::Initializing, ProcessState::Ready)
                | (ProcessState::Ready, ProcessState::Running)
                | (ProcessState::Waiting, ProcessState::Ready)
                | (ProcessState::Running, ProcessState::Ready)
                | (ProcessState::Running, ProcessState::Waiting)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::Initializing => "INITIALIZING",
            ProcessState::Waiting => "WAITING",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
        };
        f.write_str(name)
    }
}

/// Process record
///
/// `scheduler_slot` and `scheduler_params` are set and cleared together, so a
/// process either has both or neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pid: Pid,
    ppid: Option<Pid>,
    state: ProcessState,
    cpu_usage: CpuUsage,
    scheduler_slot: Option<Slot>,
    scheduler_params: Option<SchedParams>,
}

impl Process {
    #[inline]
    #[must_use]
    pub(crate) fn new(pid: Pid) -> Self {
        Self {
            pid,
            ppid: None,
            state: ProcessState::Initializing,
            cpu_usage: 0,
            scheduler_slot: None,
            scheduler_params: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    #[must_use]
    pub fn parent_pid(&self) -> Option<Pid> {
        self.ppid
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> ProcessState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn cpu_usage(&self) -> CpuUsage {
        self.cpu_usage
    }

    /// Slot of the scheduler this process is bound to
    #[inline]
    #[must_use]
    pub fn scheduler_slot(&self) -> Option<Slot> {
        self.scheduler_slot
    }

    #[inline]
    #[must_use]
    pub fn scheduler_params(&self) -> Option<&SchedParams> {
        self.scheduler_params.as_ref()
    }

    #[inline]
    pub fn scheduler_params_mut(&mut self) -> Option<&mut SchedParams> {
        self.scheduler_params.as_mut()
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, ProcessState::Ready)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    /// Whether the process is bound to `slot`
    #[inline]
    #[must_use]
    pub fn is_bound_to(&self, slot: Slot) -> bool {
        self.scheduler_slot == Some(slot)
    }

    pub(crate) fn set_parent(&mut self, ppid: Pid) {
        self.ppid = Some(ppid);
    }

    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    pub(crate) fn add_cpu_usage(&mut self, amount: CpuUsage) -> CpuUsage {
        self.cpu_usage += amount;
        self.cpu_usage
    }

    /// Associate the process with a scheduler slot, taking ownership of `params`
    ///
    /// Returns whatever parameters were previously held.
    pub(crate) fn bind(&mut self, slot: Slot, params: SchedParams) -> Option<SchedParams> {
        self.scheduler_slot = Some(slot);
        self.scheduler_params.replace(params)
    }

    /// Detach the process from its scheduler, handing back slot and parameters
    pub fn unbind(&mut self) -> Option<(Slot, SchedParams)> {
        let slot = self.scheduler_slot.take();
        let params = self.scheduler_params.take();
        slot.zip(params)
    }
}
