//! LS-8 opcode assignments and instruction layout.
//!
//! Every opcode byte describes its own layout as `AABCDDDD`: `AA` is the
//! number of operand bytes that follow, `B` marks ALU operations, `C` marks
//! instructions that set `PC` themselves and `DDDD` identifies the
//! instruction within its group.

use std::fmt;

/// Decoded instruction identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    Cmp,
    And,
    Not,
    Or,
    Xor,
    Shl,
    Shr,
    Ldi,
    Ld,
    St,
    Prn,
    Pra,
    Push,
    Pop,
    Call,
    Ret,
    Int,
    Iret,
    Jmp,
    Jeq,
    Jne,
    Jgt,
    Jge,
    Jlt,
    Jle,
    Nop,
    Hlt,
}

/// Single source-of-truth opcode table.
///
/// Any byte not present here is an unrecognized opcode by definition.
pub const OPCODE_ENCODING_TABLE: &[(u8, Opcode)] = &[
    (0b1010_0000, Opcode::Add),
    (0b1010_0001, Opcode::Sub),
    (0b1010_0010, Opcode::Mul),
    (0b1010_0011, Opcode::Div),
    (0b1010_0100, Opcode::Mod),
    (0b0110_0101, Opcode::Inc),
    (0b0110_0110, Opcode::Dec),
    (0b1010_0111, Opcode::Cmp),
    (0b1010_1000, Opcode::And),
    (0b0110_1001, Opcode::Not),
    (0b1010_1010, Opcode::Or),
    (0b1010_1011, Opcode::Xor),
    (0b1010_1100, Opcode::Shl),
    (0b1010_1101, Opcode::Shr),
    (0b1000_0010, Opcode::Ldi),
    (0b1000_0011, Opcode::Ld),
    (0b1000_0100, Opcode::St),
    (0b0100_0111, Opcode::Prn),
    (0b0100_1000, Opcode::Pra),
    (0b0100_0101, Opcode::Push),
    (0b0100_0110, Opcode::Pop),
    (0b0101_0000, Opcode::Call),
    (0b0001_0001, Opcode::Ret),
    (0b0101_0010, Opcode::Int),
    (0b0001_0011, Opcode::Iret),
    (0b0101_0100, Opcode::Jmp),
    (0b0101_0101, Opcode::Jeq),
    (0b0101_0110, Opcode::Jne),
    (0b0101_0111, Opcode::Jgt),
    (0b0101_1010, Opcode::Jge),
    (0b0101_1000, Opcode::Jlt),
    (0b0101_1001, Opcode::Jle),
    (0b0000_0000, Opcode::Nop),
    (0b0000_0001, Opcode::Hlt),
];

/// Bit marking instructions that set `PC` themselves (`C`).
pub const SETS_PC_BIT: u8 = 0b0001_0000;

/// Dense byte-indexed view of [`OPCODE_ENCODING_TABLE`], built at compile time.
pub static DISPATCH_TABLE: [Option<Opcode>; 256] = build_dispatch_table();

const fn build_dispatch_table() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < OPCODE_ENCODING_TABLE.len() {
        let (byte, opcode) = OPCODE_ENCODING_TABLE[i];
        table[byte as usize] = Some(opcode);
        i += 1;
    }
    table
}

/// Returns the instruction assigned to `byte`, or `None` when unassigned.
#[must_use]
pub fn classify_opcode(byte: u8) -> Option<Opcode> {
    DISPATCH_TABLE[usize::from(byte)]
}

/// Number of operand bytes following `opcode` (`AA` field).
#[must_use]
pub const fn operand_count(opcode: u8) -> u8 {
    opcode >> 6
}

/// Total instruction length in bytes, opcode included.
#[must_use]
pub const fn instruction_length(opcode: u8) -> u8 {
    operand_count(opcode) + 1
}

/// Returns true when the instruction overwrites `PC` instead of falling through.
#[must_use]
pub const fn sets_pc(opcode: u8) -> bool {
    opcode & SETS_PC_BIT != 0
}

impl Opcode {
    /// Assembly mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::Cmp => "CMP",
            Self::And => "AND",
            Self::Not => "NOT",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::Ldi => "LDI",
            Self::Ld => "LD",
            Self::St => "ST",
            Self::Prn => "PRN",
            Self::Pra => "PRA",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::Int => "INT",
            Self::Iret => "IRET",
            Self::Jmp => "JMP",
            Self::Jeq => "JEQ",
            Self::Jne => "JNE",
            Self::Jgt => "JGT",
            Self::Jge => "JGE",
            Self::Jlt => "JLT",
            Self::Jle => "JLE",
            Self::Nop => "NOP",
            Self::Hlt => "HLT",
        }
    }

    /// Opcode byte assigned to this instruction.
    #[must_use]
    pub fn encoding(self) -> u8 {
        OPCODE_ENCODING_TABLE
            .iter()
            .find_map(|(byte, opcode)| (*opcode == self).then_some(*byte))
            .unwrap_or_default()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
