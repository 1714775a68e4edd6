use thiserror::Error;

use crate::diag::TraceSnapshot;

/// Fault classes used for diagnostics aggregation and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Fetched byte has no dispatch entry.
    Decode,
    /// Memory or register access outside valid bounds.
    Memory,
    /// Stack collided with the program image or ran dry.
    Stack,
    /// Arithmetic with no defined result.
    Arithmetic,
}

/// Stable fault taxonomy. Every fault is terminal to the execution loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// Fetched opcode byte is not in the dispatch table.
    #[error("unrecognized opcode")]
    UnrecognizedOpcode = 0x01,
    /// Memory address or register index outside its valid range.
    #[error("address out of range")]
    OutOfRangeAddress = 0x02,
    /// `PUSH`/`CALL` would move the stack pointer into the loaded program.
    #[error("stack overflow")]
    StackOverflow = 0x03,
    /// `POP`/`RET` executed with an empty stack.
    #[error("stack underflow")]
    StackUnderflow = 0x04,
    /// Division or remainder by zero.
    #[error("division by zero")]
    ArithmeticFault = 0x05,
}

impl FaultCode {
    /// Converts a fault code to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable byte value back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::UnrecognizedOpcode),
            0x02 => Some(Self::OutOfRangeAddress),
            0x03 => Some(Self::StackOverflow),
            0x04 => Some(Self::StackUnderflow),
            0x05 => Some(Self::ArithmeticFault),
            _ => None,
        }
    }

    /// Returns the diagnostics fault class for this fault code.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::UnrecognizedOpcode => FaultClass::Decode,
            Self::OutOfRangeAddress => FaultClass::Memory,
            Self::StackOverflow | Self::StackUnderflow => FaultClass::Stack,
            Self::ArithmeticFault => FaultClass::Arithmetic,
        }
    }
}

/// Structured fault surfaced to the embedding host: the fault kind plus the
/// machine state captured at the faulting instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("{code} at pc {pc:#04X}", pc = .snapshot.pc)]
pub struct MachineFault {
    /// Fault kind.
    pub code: FaultCode,
    /// State captured before the faulting instruction committed anything.
    pub snapshot: TraceSnapshot,
}
