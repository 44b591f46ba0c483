/*!
 * Registry Lookups
 * Sequence traversal, first-match searches and the display walk
 */

use super::{Node, ProcessRegistry};
use crate::core::types::{Pid, Slot};
use crate::process::core::types::{Process, ProcessState};
use ahash::RandomState;
use std::collections::HashMap;
use std::fmt::Write;

/// Iterator over processes in sequence order
pub struct Iter<'a> {
    nodes: &'a HashMap<Pid, Node, RandomState>,
    cursor: Option<Pid>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Process;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(&self.cursor?)?;
        self.cursor = node.next;
        Some(&node.process)
    }
}

impl ProcessRegistry {
    /// Walk the sequence from the head
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// PIDs in sequence order
    pub fn pids(&self) -> Vec<Pid> {
        self.iter().map(Process::pid).collect()
    }

    /// First process in sequence order with the given state
    pub fn find_by_status(&self, state: ProcessState) -> Option<Pid> {
        self.iter().find(|p| p.status() == state).map(Process::pid)
    }

    /// First process in sequence order bound to `slot`
    pub fn find_by_slot(&self, slot: Slot) -> Option<Pid> {
        self.iter().find(|p| p.is_bound_to(slot)).map(Process::pid)
    }

    /// Render the process table, one line per process in sequence order
    ///
    /// `dump` appends the scheduler-specific part of each line.
    pub fn render<F>(&self, mut dump: F) -> String
    where
        F: FnMut(&Process) -> String,
    {
        let mut out = String::new();
        for p in self.iter() {
            // Writing into a String cannot fail
            let _ = writeln!(
                out,
                "PID: {}; STATUS: {}; CPU: {}; {}",
                p.pid(),
                p.status(),
                p.cpu_usage(),
                dump(p)
            );
        }
        out
    }
}
