/*!
 * Process Core Types
 * Process record and state machine
 */

pub mod types;

// Re-export everything for convenience
pub use types::*;
