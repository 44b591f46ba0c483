/*!
 * Process Registry
 * Owns every process record and the order they were created in
 *
 * Records live in a PID-keyed arena. Each node carries the PIDs of its
 * neighbours, so the sequence supports O(1) prepend and O(1) unlink by PID
 * while iteration order stays stable. New processes go to the front.
 */

mod lookup;
mod state;

pub use lookup::Iter;

use super::core::types::Process;
use crate::core::limits::FIRST_PID;
use crate::core::types::Pid;
use crate::scheduler::SchedulerRegistry;
use ahash::RandomState;
use log::{debug, info};
use std::collections::HashMap;

/// Arena node: the record plus its sequence links
#[derive(Debug)]
struct Node {
    process: Process,
    prev: Option<Pid>,
    next: Option<Pid>,
}

/// Process registry
#[derive(Debug)]
pub struct ProcessRegistry {
    nodes: HashMap<Pid, Node, RandomState>,
    head: Option<Pid>,
    tail: Option<Pid>,
    next_pid: Pid,
}

impl ProcessRegistry {
    /// Create an empty registry; PIDs start at 1
    pub fn new() -> Self {
        Self {
            nodes: HashMap::with_hasher(RandomState::new()),
            head: None,
            tail: None,
            next_pid: FIRST_PID,
        }
    }

    /// Create a process at the front of the sequence
    ///
    /// The record starts `Initializing`, unbound, with zero CPU usage. When
    /// `parent` names an existing process (including the new one) it becomes
    /// the parent PID; otherwise the parent stays unset. Always succeeds.
    pub fn create(&mut self, parent: Option<Pid>) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;

        let old_head = self.head;
        self.nodes.insert(
            pid,
            Node {
                process: Process::new(pid),
                prev: None,
                next: old_head,
            },
        );

        match old_head {
            Some(head) => {
                if let Some(node) = self.nodes.get_mut(&head) {
                    node.prev = Some(pid);
                }
            }
            None => self.tail = Some(pid),
        }
        self.head = Some(pid);

        if let Some(ppid) = parent {
            if self.set_parent_pid(pid, ppid).is_err() {
                debug!("Process {} created without parent: {} does not exist", pid, ppid);
            }
        }

        info!("Created process {} (parent: {:?})", pid, parent);
        pid
    }

    /// Destroy a process, releasing its scheduler parameters
    ///
    /// Unknown PIDs are a no-op and return `false`.
    pub fn destroy(&mut self, pid: Pid, schedulers: &mut SchedulerRegistry) -> bool {
        let Some(node) = self.nodes.remove(&pid) else {
            debug!("Destroy ignored: process {} not found", pid);
            return false;
        };

        match node.prev {
            Some(prev) => {
                if let Some(p) = self.nodes.get_mut(&prev) {
                    p.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.nodes.get_mut(&next) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        let mut process = node.process;
        if let Some(slot) = schedulers.release_params(&mut process) {
            debug!("Released scheduler params of process {} (slot {})", pid, slot);
        }

        info!("Destroyed process {}", pid);
        true
    }

    /// Number of live processes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if a process exists
    #[inline]
    pub fn contains(&self, pid: Pid) -> bool {
        self.nodes.contains_key(&pid)
    }

    #[inline]
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.nodes.get(&pid).map(|n| &n.process)
    }

    #[inline]
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.nodes.get_mut(&pid).map(|n| &mut n.process)
    }

    /// First process in the sequence (most recently created survivor)
    #[inline]
    pub fn head(&self) -> Option<Pid> {
        self.head
    }

    /// Last process in the sequence
    #[inline]
    pub fn tail(&self) -> Option<Pid> {
        self.tail
    }

    /// Successor of `pid` in the sequence
    #[inline]
    pub fn next(&self, pid: Pid) -> Option<Pid> {
        self.nodes.get(&pid).and_then(|n| n.next)
    }

    /// Predecessor of `pid`; `None` for the head
    #[inline]
    pub fn prev(&self, pid: Pid) -> Option<Pid> {
        self.nodes.get(&pid).and_then(|n| n.prev)
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
