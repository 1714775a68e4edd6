//! Data-movement and output handlers.

use super::helpers::{read_register, register_operand};
use super::ExecuteOutcome;
use crate::decoder::DecodedInstruction;
use crate::{CoreState, FaultCode, MachineConfig, OutputSink, PrintEvent, Verbosity};

/// `LDI reg imm`: loads the literal operand.
pub(super) fn execute_ldi(
    instr: &DecodedInstruction,
    state: &mut CoreState,
) -> Result<ExecuteOutcome, FaultCode> {
    let reg = register_operand(instr.operand_a())?;

    state.arch.set_gpr(reg, instr.operand_b());
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}

/// `LD regA regB`: `regA = memory[regB]`.
pub(super) fn execute_ld(
    instr: &DecodedInstruction,
    state: &mut CoreState,
) -> Result<ExecuteOutcome, FaultCode> {
    let dest = register_operand(instr.operand_a())?;
    let address = read_register(state, instr.operand_b())?;
    let value = state.memory.read(usize::from(address))?;

    state.arch.set_gpr(dest, value);
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}

/// `ST regA regB`: `memory[regA] = regB`.
pub(super) fn execute_st(
    instr: &DecodedInstruction,
    state: &mut CoreState,
) -> Result<ExecuteOutcome, FaultCode> {
    let address = read_register(state, instr.operand_a())?;
    let value = read_register(state, instr.operand_b())?;

    state.memory.write(usize::from(address), value)?;
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}

/// `PRN reg` / `PRA reg`.
pub(super) fn execute_print(
    instr: &DecodedInstruction,
    state: &CoreState,
    out: &mut dyn OutputSink,
    config: &MachineConfig,
    as_char: bool,
) -> Result<ExecuteOutcome, FaultCode> {
    let value = read_register(state, instr.operand_a())?;
    let event = if as_char {
        PrintEvent::Char(char::from(value))
    } else {
        PrintEvent::Decimal(value)
    };

    if config.verbosity >= Verbosity::Trace {
        log::trace!("print {event:?}");
    }
    out.emit(event);
    Ok(ExecuteOutcome::Retired {
        next_pc: instr.fall_through(),
    })
}
