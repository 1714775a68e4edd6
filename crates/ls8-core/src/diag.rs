//! Fault diagnostics: a formatting-free snapshot of the machine at a fault.

use std::fmt;

use crate::{CoreState, Flags, GENERAL_REGISTER_COUNT};

/// Number of bytes captured starting at `PC`.
pub const TRACE_WINDOW_BYTES: usize = 3;

/// Machine state sufficient for a host to render a trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TraceSnapshot {
    /// Program counter.
    pub pc: u16,
    /// Bytes at `PC`, `PC + 1` and `PC + 2`; `None` past the end of memory.
    pub window: [Option<u8>; TRACE_WINDOW_BYTES],
    /// Registers `R0..R7`.
    pub registers: [u8; GENERAL_REGISTER_COUNT],
    /// Condition flags.
    pub flags: Flags,
}

impl TraceSnapshot {
    /// Captures the current state without modifying it.
    #[must_use]
    pub fn capture(state: &CoreState) -> Self {
        let pc = state.arch.pc();
        let mut window = [None; TRACE_WINDOW_BYTES];
        for (offset, slot) in window.iter_mut().enumerate() {
            *slot = state.memory.read(usize::from(pc) + offset).ok();
        }

        Self {
            pc,
            window,
            registers: state.arch.registers(),
            flags: state.arch.flags(),
        }
    }

    /// Byte at `PC`: the offending opcode for an unrecognized-opcode fault.
    #[must_use]
    pub const fn opcode_byte(&self) -> Option<u8> {
        self.window[0]
    }
}

/// Renders `TRACE: PC | B0 B1 B2 | R0 R1 R2 R3 R4 R5 R6 R7` in hex.
impl fmt::Display for TraceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRACE: {:02X} |", self.pc)?;
        for byte in self.window {
            match byte {
                Some(value) => write!(f, " {value:02X}")?,
                None => f.write_str(" --")?,
            }
        }
        f.write_str(" |")?;
        for value in self.registers {
            write!(f, " {value:02X}")?;
        }
        Ok(())
    }
}
