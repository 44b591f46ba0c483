/*!
 * Scheduler Registry
 * Fixed slot table of scheduling algorithms and top-level dispatch
 *
 * Slot 0 is the primary scheduler: it alone makes the global pick. Other
 * slots only manage parameters and notifications of their own processes.
 */

use super::params::SchedParams;
use super::stats::SchedulerStats;
use super::traits::SchedulingAlgorithm;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{MAX_SCHEDULER_SLOTS, PRIMARY_SLOT};
use crate::core::types::{Pid, Slot};
use crate::process::{Process, ProcessRegistry, ProcessState};
use log::{debug, info, warn};

/// Scheduler slot table
pub struct SchedulerRegistry {
    slots: [Option<Box<dyn SchedulingAlgorithm>>; MAX_SCHEDULER_SLOTS],
    stats: SchedulerStats,
}

impl SchedulerRegistry {
    /// Create a registry with every slot empty
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            stats: SchedulerStats::default(),
        }
    }

    /// Install an algorithm into the first empty slot
    pub fn register(&mut self, algorithm: Box<dyn SchedulingAlgorithm>) -> SchedulerResult<Slot> {
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            warn!("Cannot register scheduler {}: registry full", algorithm.name());
            return Err(SchedulerError::RegistryFull);
        };

        info!("Registered scheduler {} in slot {}", algorithm.name(), slot);
        self.slots[slot] = Some(algorithm);
        Ok(slot)
    }

    /// Clear `slot`, provided it holds an algorithm called `name`
    ///
    /// Every process still bound to the slot has its parameters released
    /// through the departing algorithm and ends up unbound.
    pub fn unregister(
        &mut self,
        slot: Slot,
        name: &str,
        processes: &mut ProcessRegistry,
    ) -> SchedulerResult<Slot> {
        if slot >= MAX_SCHEDULER_SLOTS {
            return Err(SchedulerError::SlotOutOfRange(slot));
        }
        let actual = self.name(slot).ok_or(SchedulerError::SlotEmpty(slot))?;

        if actual != name {
            return Err(SchedulerError::NameMismatch {
                slot,
                expected: name.to_string(),
                actual: actual.to_string(),
            });
        }

        let bound: Vec<Pid> = processes
            .iter()
            .filter(|p| p.is_bound_to(slot))
            .map(Process::pid)
            .collect();
        for &pid in &bound {
            if let Some(process) = processes.get_mut(pid) {
                self.release_params(process);
            }
        }

        self.slots[slot] = None;
        info!(
            "Unregistered scheduler {} from slot {} ({} processes unbound)",
            name,
            slot,
            bound.len()
        );
        Ok(slot)
    }

    /// Algorithm installed in `slot`
    pub fn get(&self, slot: Slot) -> Option<&dyn SchedulingAlgorithm> {
        self.slots.get(slot).and_then(Option::as_deref)
    }

    /// Name of the algorithm installed in `slot`
    pub fn name(&self, slot: Slot) -> Option<&'static str> {
        self.get(slot).map(|alg| alg.name())
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Snapshot of dispatch counters
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Bind `process` to `slot`, transferring ownership of `params` to it
    ///
    /// If the process was already bound, its current scheduler releases the
    /// old parameters first. This holds for a same-slot replace as well, so
    /// the scheduler never keeps accounting for params that are gone.
    pub fn bind_process(
        &mut self,
        process: &mut Process,
        params: SchedParams,
        slot: Slot,
    ) -> SchedulerResult<Slot> {
        if slot >= MAX_SCHEDULER_SLOTS {
            return Err(SchedulerError::SlotOutOfRange(slot));
        }
        if self.slots[slot].is_none() {
            return Err(SchedulerError::SlotEmpty(slot));
        }

        if process.scheduler_slot().is_some() {
            self.release_params(process);
        }

        process.bind(slot, params);
        debug!("Process {} bound to scheduler slot {}", process.pid(), slot);
        Ok(slot)
    }

    /// Forward a status change to the scheduler bound to `process`
    pub fn notify_status_change(&self, process: &mut Process) {
        if let Some(alg) = process.scheduler_slot().and_then(|slot| self.get(slot)) {
            alg.notify_status_change(process);
        }
    }

    /// Have the bound scheduler release the parameters of `process`
    ///
    /// Returns the slot the process was bound to. The process always ends up
    /// unbound, even when its slot has since been emptied.
    pub fn release_params(&self, process: &mut Process) -> Option<Slot> {
        let slot = process.scheduler_slot()?;
        if let Some(alg) = self.get(slot) {
            alg.release_params(process);
        }
        process.unbind();
        Some(slot)
    }

    /// Run one scheduling decision
    ///
    /// Demotes the running process to Ready, lets the primary scheduler pick,
    /// then promotes the pick to Running and charges it one CPU unit.
    pub fn schedule(&mut self, processes: &mut ProcessRegistry) -> Option<Pid> {
        if let Some(running) = processes.find_by_status(ProcessState::Running) {
            match processes.set_status(running, ProcessState::Ready, self) {
                Ok(_) => self.stats.demoted += 1,
                Err(e) => warn!("Failed to demote running process {}: {}", running, e),
            }
        }

        let chosen = match self.get(PRIMARY_SLOT) {
            Some(primary) => primary.schedule(processes),
            None => None,
        };

        let Some(pid) = chosen else {
            self.stats.idle += 1;
            debug!("Nothing to schedule");
            return None;
        };

        if let Err(e) = processes.set_status(pid, ProcessState::Running, self) {
            warn!("Primary scheduler picked unrunnable process {}: {}", pid, e);
            self.stats.idle += 1;
            return None;
        }
        if let Err(e) = processes.add_cpu_usage(pid, 1) {
            warn!("Failed to charge CPU usage to process {}: {}", pid, e);
        }

        self.stats.dispatched += 1;
        debug!("Dispatched process {}", pid);
        Some(pid)
    }
}

impl Default for SchedulerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchedulerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<Option<&'static str>> =
            (0..MAX_SCHEDULER_SLOTS).map(|slot| self.name(slot)).collect();
        f.debug_struct("SchedulerRegistry")
            .field("slots", &names)
            .field("stats", &self.stats)
            .finish()
    }
}
