//! Architectural CPU state model primitives.

/// Condition-code state set by `CMP` and read by conditional jumps.
pub mod flags;
/// Architectural register file types and storage model.
pub mod registers;
/// Execution-state machine for the fetch/execute loop.
pub mod run_state;

pub use flags::{Condition, Flags};
pub use registers::{ArchitecturalState, GeneralRegister, GENERAL_REGISTER_COUNT};
pub use run_state::RunState;
