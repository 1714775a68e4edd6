//! Stack handlers. The stack grows downward from `stack_top` toward the
//! heap boundary recorded at load time.

use super::helpers::{read_register, register_operand};
use super::ExecuteOutcome;
use crate::decoder::DecodedInstruction;
use crate::{CoreState, FaultCode};

/// Decrements `SP` and stores `value` at the new top.
///
/// The stack may not reach the heap boundary: a push that would move `SP`
/// onto it faults before anything is written.
pub(super) fn push_byte(state: &mut CoreState, value: u8) -> Result<(), FaultCode> {
    let sp = state
        .arch
        .sp()
        .checked_sub(1)
        .ok_or(FaultCode::StackOverflow)?;
    if usize::from(sp) <= state.memory.heap_boundary() {
        return Err(FaultCode::StackOverflow);
    }

    state.memory.write(usize::from(sp), value)?;
    state.arch.set_sp(sp);
    Ok(())
}

/// Reads the top of the stack and increments `SP`.
pub(super) fn pop_byte(state: &mut CoreState, stack_top: u8) -> Result<u8, FaultCode> {
    let sp = state.arch.sp();
    if sp >= stack_top {
        return Err(FaultCode::StackUnderflow);
    }

    let value = state.memory.read(usize::from(sp))?;
    state.arch.set_sp(sp + 1);
    Ok(value)
}

/// `PUSH reg`.
pub(super) fn execute_push(
    instr: &DecodedInstruction,
    state: &mut CoreState,
) -> Result<ExecuteOutcome, FaultCode> {
    let value = read_register(state, instr.operand_a())?;

    push_byte(state, value)?;
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}

/// `POP reg`.
pub(super) fn execute_pop(
    instr: &DecodedInstruction,
    state: &mut CoreState,
    stack_top: u8,
) -> Result<ExecuteOutcome, FaultCode> {
    let reg = register_operand(instr.operand_a())?;
    let value = pop_byte(state, stack_top)?;

    state.arch.set_gpr(reg, value);
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}
