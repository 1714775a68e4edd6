//! Control-flow handlers. None of these fall through implicitly: each one
//! names the next `PC` explicitly.

use super::helpers::{read_register, register_operand};
use super::stack::{pop_byte, push_byte};
use super::ExecuteOutcome;
use crate::decoder::DecodedInstruction;
use crate::{Condition, CoreState, FaultCode};

/// `JMP`/`JEQ`/`JNE`/`JGT`/`JGE`/`JLT`/`JLE reg`.
pub(super) fn execute_jump(
    instr: &DecodedInstruction,
    state: &CoreState,
    condition: Condition,
) -> Result<ExecuteOutcome, FaultCode> {
    let target = read_register(state, instr.operand_a())?;

    let next_pc = if condition.holds(state.arch.flags()) {
        u16::from(target)
    } else {
        instr.fall_through()
    };
    Ok(ExecuteOutcome::Retired { next_pc })
}

/// `CALL reg`: pushes the address after the `CALL`, then jumps.
pub(super) fn execute_call(
    instr: &DecodedInstruction,
    state: &mut CoreState,
) -> Result<ExecuteOutcome, FaultCode> {
    let target_reg = register_operand(instr.operand_a())?;
    let return_address =
        u8::try_from(instr.fall_through()).map_err(|_| FaultCode::OutOfRangeAddress)?;

    push_byte(state, return_address)?;
    Ok(ExecuteOutcome::Retired {
        next_pc: u16::from(state.arch.gpr(target_reg)),
    })
}

/// `RET`: pops the return address into `PC`.
pub(super) fn execute_ret(state: &mut CoreState, stack_top: u8) -> Result<ExecuteOutcome, FaultCode> {
    let return_address = pop_byte(state, stack_top)?;
    Ok(ExecuteOutcome::Retired {
        next_pc: u16::from(return_address),
    })
}

/// `INT`/`IRET`: interrupts are not modelled. Both execute as no-ops that
/// skip their own encoding.
pub(super) fn execute_interrupt_stub(instr: &DecodedInstruction) -> ExecuteOutcome {
    log::warn!(
        "{} at {:02X} is unsupported and executes as a no-op",
        instr.opcode,
        instr.pc
    );
    ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    }
}
