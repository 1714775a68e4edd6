//! Execution core for the LS-8, an 8-bit teaching computer.
//!
//! The core owns 256 bytes of memory, eight general-purpose registers, a
//! program counter and a condition-flags register. Hosts load a byte image,
//! then either [`Machine::step`] or [`Machine::run`] it; printed output goes
//! to a caller-supplied [`OutputSink`] and faults come back as values.

/// Memory array and address validation.
pub mod memory;
pub use memory::{validate_address, validate_program_len, Memory, MEMORY_BYTES};

/// Fault trace snapshot.
pub mod diag;
pub use diag::{TraceSnapshot, TRACE_WINDOW_BYTES};

/// Public host-facing API contract and integration types.
pub mod api;
pub use api::{
    CoreState, MachineConfig, OutputSink, PrintEvent, RunOutcome, StepOutcome, Verbosity,
    DEFAULT_STACK_TOP,
};

/// Architectural CPU state model primitives.
pub mod state;
pub use state::{
    ArchitecturalState, Condition, Flags, GeneralRegister, RunState, GENERAL_REGISTER_COUNT,
};

/// Opcode assignments and the static dispatch table.
pub mod encoding;
pub use encoding::{classify_opcode, instruction_length, Opcode, OPCODE_ENCODING_TABLE};

/// Instruction fetch and decode.
pub mod decoder;
pub use decoder::{DecodedInstruction, DecodedOrFault, Decoder};

/// Fault taxonomy.
pub mod fault;
pub use fault::{FaultClass, FaultCode, MachineFault};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{execute_instruction, step_one, ExecuteOutcome};

/// Owned machine façade.
pub mod machine;
pub use machine::Machine;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use serde_json as _;
