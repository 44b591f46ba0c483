/*!
 * Process Module
 * Process records, lifecycle state machine and the process registry
 */

pub mod core;
pub mod registry;

// Re-export for convenience
pub use self::core::{Process, ProcessState};
pub use registry::ProcessRegistry;
