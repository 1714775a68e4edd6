//! Instruction fetch and decode.
//!
//! The decoder reads the opcode byte at `PC`, resolves it through the static
//! dispatch table and then reads exactly as many operand bytes as the opcode
//! layout declares.

use std::fmt;

use crate::encoding::{classify_opcode, instruction_length, operand_count, Opcode};
use crate::{FaultCode, Memory};

/// Decoded instruction with its raw operand bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Instruction identity.
    pub opcode: Opcode,
    /// Raw opcode byte as fetched.
    pub raw: u8,
    /// Address the opcode byte was fetched from.
    pub pc: u16,
    /// Operand bytes; entries beyond the operand count are zero.
    pub operands: [u8; 2],
}

impl DecodedInstruction {
    /// First operand byte (register A or the single register operand).
    #[must_use]
    pub const fn operand_a(&self) -> u8 {
        self.operands[0]
    }

    /// Second operand byte (register B, or the literal for `LDI`).
    #[must_use]
    pub const fn operand_b(&self) -> u8 {
        self.operands[1]
    }

    /// Instruction length in bytes.
    #[must_use]
    pub const fn length(&self) -> u8 {
        instruction_length(self.raw)
    }

    /// Address of the instruction that follows this one in memory.
    #[must_use]
    pub fn fall_through(&self) -> u16 {
        self.pc + u16::from(self.length())
    }
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        match (operand_count(self.raw), self.opcode) {
            (0, _) => Ok(()),
            (1, _) => write!(f, " R{}", self.operand_a()),
            (_, Opcode::Ldi) => write!(f, " R{}, {}", self.operand_a(), self.operand_b()),
            _ => write!(f, " R{}, R{}", self.operand_a(), self.operand_b()),
        }
    }
}

/// Result of decoding at a program counter.
///
/// Either contains a valid decoded instruction or the fault that stopped
/// decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedOrFault {
    /// Successfully decoded instruction.
    Instruction(DecodedInstruction),
    /// Decoding failed with a fault.
    Fault(FaultCode),
}

impl DecodedOrFault {
    /// Returns the decoded instruction if present.
    #[must_use]
    pub const fn instruction(self) -> Option<DecodedInstruction> {
        match self {
            Self::Instruction(i) => Some(i),
            Self::Fault(_) => None,
        }
    }

    /// Returns the fault if decoding failed.
    #[must_use]
    pub const fn fault(self) -> Option<FaultCode> {
        match self {
            Self::Instruction(_) => None,
            Self::Fault(f) => Some(f),
        }
    }
}

impl From<DecodedOrFault> for Result<DecodedInstruction, FaultCode> {
    fn from(value: DecodedOrFault) -> Self {
        match value {
            DecodedOrFault::Instruction(i) => Ok(i),
            DecodedOrFault::Fault(code) => Err(code),
        }
    }
}

/// Instruction decoder for the LS-8 ISA.
pub struct Decoder;

impl Decoder {
    /// Decodes the instruction starting at `pc`.
    ///
    /// Faults with [`FaultCode::OutOfRangeAddress`] when the opcode or any of
    /// its operand bytes lies past the end of memory, and with
    /// [`FaultCode::UnrecognizedOpcode`] when the opcode byte is unassigned.
    /// Operand bytes of an unrecognized opcode are never read.
    #[must_use]
    pub fn decode(memory: &Memory, pc: u16) -> DecodedOrFault {
        let base = usize::from(pc);

        let raw = match memory.read(base) {
            Ok(byte) => byte,
            Err(code) => return DecodedOrFault::Fault(code),
        };

        let Some(opcode) = classify_opcode(raw) else {
            return DecodedOrFault::Fault(FaultCode::UnrecognizedOpcode);
        };

        let mut operands = [0; 2];
        let count = usize::from(operand_count(raw));
        for (offset, slot) in operands.iter_mut().enumerate().take(count) {
            match memory.read(base + 1 + offset) {
                Ok(byte) => *slot = byte,
                Err(code) => return DecodedOrFault::Fault(code),
            }
        }

        DecodedOrFault::Instruction(DecodedInstruction {
            opcode,
            raw,
            pc,
            operands,
        })
    }
}
