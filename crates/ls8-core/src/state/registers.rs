use std::fmt;

use crate::state::Flags;

/// Number of architecturally visible general-purpose registers (`R0..R7`).
pub const GENERAL_REGISTER_COUNT: usize = 8;

/// Architecturally visible general-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum GeneralRegister {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl GeneralRegister {
    /// Ordered list of all architectural general-purpose registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
    ];

    /// Interrupt mask register by convention. Reserved, never interpreted.
    pub const IM: Self = Self::R5;
    /// Interrupt status register by convention. Reserved, never interpreted.
    pub const IS: Self = Self::R6;
    /// Stack pointer register.
    pub const SP: Self = Self::R7;

    /// Returns the array index for this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes an operand byte into a register. Bytes above 7 name no register.
    #[must_use]
    pub const fn from_operand(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            4 => Some(Self::R4),
            5 => Some(Self::R5),
            6 => Some(Self::R6),
            7 => Some(Self::R7),
            _ => None,
        }
    }
}

impl fmt::Display for GeneralRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.index())
    }
}

/// Register file, program counter and condition flags.
///
/// `pc` is wider than a byte so that running off the end of memory is caught
/// at the next fetch instead of wrapping silently to address 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ArchitecturalState {
    gpr: [u8; GENERAL_REGISTER_COUNT],
    pc: u16,
    flags: Flags,
}

impl ArchitecturalState {
    /// Power-on state: all registers zero except `SP`, which holds `stack_top`.
    #[must_use]
    pub const fn with_stack_top(stack_top: u8) -> Self {
        let mut gpr = [0; GENERAL_REGISTER_COUNT];
        gpr[GeneralRegister::SP.index()] = stack_top;
        Self {
            gpr,
            pc: 0,
            flags: Flags::None,
        }
    }

    /// Reads a general-purpose register.
    #[must_use]
    pub const fn gpr(&self, reg: GeneralRegister) -> u8 {
        self.gpr[reg.index()]
    }

    /// Writes a general-purpose register.
    pub const fn set_gpr(&mut self, reg: GeneralRegister, value: u8) {
        self.gpr[reg.index()] = value;
    }

    /// Copy of all eight registers in index order.
    #[must_use]
    pub const fn registers(&self) -> [u8; GENERAL_REGISTER_COUNT] {
        self.gpr
    }

    /// Reads the stack pointer (`R7`).
    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.gpr(GeneralRegister::SP)
    }

    /// Writes the stack pointer (`R7`).
    pub const fn set_sp(&mut self, value: u8) {
        self.set_gpr(GeneralRegister::SP, value);
    }

    /// Reads the `PC` register.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the `PC` register.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Reads the `FL` register.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Writes the `FL` register.
    pub const fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }
}

impl fmt::Display for ArchitecturalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PC={:02X} FL={:03b}", self.pc, self.flags.bits())?;
        for reg in GeneralRegister::ALL {
            write!(f, " {reg}={:02X}", self.gpr(reg))?;
        }
        Ok(())
    }
}
