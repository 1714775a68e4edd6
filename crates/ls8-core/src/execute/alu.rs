//! Arithmetic and logic handlers.
//!
//! Results wrap modulo 256. Shifts by eight or more produce zero.

use super::helpers::{read_register, register_operand};
use super::ExecuteOutcome;
use crate::decoder::DecodedInstruction;
use crate::{CoreState, FaultCode, Flags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UnaryOp {
    Not,
    Inc,
    Dec,
}

pub(super) fn compute(op: AluOp, a: u8, b: u8) -> Result<u8, FaultCode> {
    let result = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Div => a.checked_div(b).ok_or(FaultCode::ArithmeticFault)?,
        AluOp::Mod => a.checked_rem(b).ok_or(FaultCode::ArithmeticFault)?,
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Shl => a.checked_shl(u32::from(b)).unwrap_or(0),
        AluOp::Shr => a.checked_shr(u32::from(b)).unwrap_or(0),
    };
    Ok(result)
}

const fn compute_unary(op: UnaryOp, a: u8) -> u8 {
    match op {
        UnaryOp::Not => !a,
        UnaryOp::Inc => a.wrapping_add(1),
        UnaryOp::Dec => a.wrapping_sub(1),
    }
}

/// `OP regA regB`: `regA = regA OP regB`.
pub(super) fn execute_binary(
    instr: &DecodedInstruction,
    state: &mut CoreState,
    op: AluOp,
) -> Result<ExecuteOutcome, FaultCode> {
    let dest = register_operand(instr.operand_a())?;
    let b = read_register(state, instr.operand_b())?;
    let result = compute(op, state.arch.gpr(dest), b)?;

    state.arch.set_gpr(dest, result);
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}

/// `OP reg`: `reg = OP reg`.
pub(super) fn execute_unary(
    instr: &DecodedInstruction,
    state: &mut CoreState,
    op: UnaryOp,
) -> Result<ExecuteOutcome, FaultCode> {
    let reg = register_operand(instr.operand_a())?;
    let result = compute_unary(op, state.arch.gpr(reg));

    state.arch.set_gpr(reg, result);
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}

/// `CMP regA regB`: sets exactly one flag state; registers are untouched.
pub(super) fn execute_cmp(
    instr: &DecodedInstruction,
    state: &mut CoreState,
) -> Result<ExecuteOutcome, FaultCode> {
    let a = read_register(state, instr.operand_a())?;
    let b = read_register(state, instr.operand_b())?;

    state.arch.set_flags(Flags::compare(a, b));
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}
