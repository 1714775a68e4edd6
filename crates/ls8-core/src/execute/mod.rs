//! Instruction execution for the LS-8 ISA.
//!
//! Each handler validates its operands, computes its result and performs
//! every check that can fault before it touches registers, memory, flags or
//! the stack. A faulting instruction therefore leaves the machine exactly as
//! it was when the instruction was fetched. `PC` is committed by
//! [`step_one`] only after the handler succeeds.

mod alu;
mod control;
mod data;
mod helpers;
mod stack;

pub use helpers::{read_register, register_operand};

use crate::decoder::{DecodedInstruction, Decoder};
use crate::encoding::sets_pc;
use crate::{
    Condition, CoreState, FaultCode, MachineConfig, Opcode, OutputSink, RunState, StepOutcome,
    Verbosity,
};

use alu::{AluOp, UnaryOp};

/// Outcome of executing a single decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// Instruction retired; execution continues at `next_pc`.
    Retired {
        /// Address of the next instruction.
        next_pc: u16,
    },
    /// `HLT` retired.
    Halted {
        /// Address following the `HLT`.
        next_pc: u16,
    },
}

/// Executes one decoded instruction against `state`.
///
/// `PC` is not written; the caller commits the returned address.
///
/// # Errors
///
/// Returns the fault raised by the instruction. No state has been modified
/// when an error is returned.
pub fn execute_instruction(
    instr: &DecodedInstruction,
    state: &mut CoreState,
    out: &mut dyn OutputSink,
    config: &MachineConfig,
) -> Result<ExecuteOutcome, FaultCode> {
    match instr.opcode {
        Opcode::Add => alu::execute_binary(instr, state, AluOp::Add),
        Opcode::Sub => alu::execute_binary(instr, state, AluOp::Sub),
        Opcode::Mul => alu::execute_binary(instr, state, AluOp::Mul),
        Opcode::Div => alu::execute_binary(instr, state, AluOp::Div),
        Opcode::Mod => alu::execute_binary(instr, state, AluOp::Mod),
        Opcode::And => alu::execute_binary(instr, state, AluOp::And),
        Opcode::Or => alu::execute_binary(instr, state, AluOp::Or),
        Opcode::Xor => alu::execute_binary(instr, state, AluOp::Xor),
        Opcode::Shl => alu::execute_binary(instr, state, AluOp::Shl),
        Opcode::Shr => alu::execute_binary(instr, state, AluOp::Shr),
        Opcode::Not => alu::execute_unary(instr, state, UnaryOp::Not),
        Opcode::Inc => alu::execute_unary(instr, state, UnaryOp::Inc),
        Opcode::Dec => alu::execute_unary(instr, state, UnaryOp::Dec),
        Opcode::Cmp => alu::execute_cmp(instr, state),

        Opcode::Ldi => data::execute_ldi(instr, state),
        Opcode::Ld => data::execute_ld(instr, state),
        Opcode::St => data::execute_st(instr, state),
        Opcode::Prn => data::execute_print(instr, state, out, config, false),
        Opcode::Pra => data::execute_print(instr, state, out, config, true),

        Opcode::Push => stack::execute_push(instr, state),
        Opcode::Pop => stack::execute_pop(instr, state, config.stack_top),

        Opcode::Call => control::execute_call(instr, state),
        Opcode::Ret => control::execute_ret(state, config.stack_top),
        Opcode::Int | Opcode::Iret => Ok(control::execute_interrupt_stub(instr)),
        Opcode::Jmp => control::execute_jump(instr, state, Condition::Always),
        Opcode::Jeq => control::execute_jump(instr, state, Condition::Equal),
        Opcode::Jne => control::execute_jump(instr, state, Condition::NotEqual),
        Opcode::Jgt => control::execute_jump(instr, state, Condition::Greater),
        Opcode::Jge => control::execute_jump(instr, state, Condition::GreaterOrEqual),
        Opcode::Jlt => control::execute_jump(instr, state, Condition::Less),
        Opcode::Jle => control::execute_jump(instr, state, Condition::LessOrEqual),

        Opcode::Nop => Ok(ExecuteOutcome::Retired {
            next_pc: instr.fall_through(),
        }),
        Opcode::Hlt => Ok(ExecuteOutcome::Halted {
            next_pc: instr.fall_through(),
        }),
    }
}

/// Runs one fetch/decode/execute cycle.
///
/// A halted or faulted machine does not advance: the latched state is
/// reported again. A new fault is latched into [`CoreState::run_state`].
pub fn step_one(
    state: &mut CoreState,
    out: &mut dyn OutputSink,
    config: &MachineConfig,
) -> StepOutcome {
    if state.run_state.is_terminal() {
        return state
            .run_state
            .latched_fault()
            .map_or(StepOutcome::Halted, |cause| StepOutcome::Fault { cause });
    }

    let pc = state.arch.pc();
    let decoded: Result<DecodedInstruction, FaultCode> = Decoder::decode(&state.memory, pc).into();
    let result = match decoded {
        Ok(instr) => {
            if config.verbosity >= Verbosity::Debug {
                log::debug!("{pc:02X}: {instr}");
            }
            execute_instruction(&instr, state, out, config).map(|outcome| (instr, outcome))
        }
        Err(cause) => Err(cause),
    };

    match result {
        Ok((instr, outcome)) => {
            state.retired += 1;
            let step = match outcome {
                ExecuteOutcome::Retired { next_pc } => {
                    debug_assert!(
                        sets_pc(instr.raw) || next_pc == instr.fall_through(),
                        "{} moved PC without its PC-setting bit",
                        instr.opcode
                    );
                    state.arch.set_pc(next_pc);
                    StepOutcome::Retired {
                        opcode: instr.opcode,
                    }
                }
                ExecuteOutcome::Halted { next_pc } => {
                    state.arch.set_pc(next_pc);
                    state.run_state = RunState::Halted;
                    StepOutcome::Halted
                }
            };
            if config.verbosity >= Verbosity::Trace {
                log::trace!("{}", state.arch);
            }
            step
        }
        Err(cause) => {
            if config.verbosity >= Verbosity::Debug {
                log::debug!("fault at {pc:02X}: {cause}");
            }
            state.run_state = RunState::Faulted(cause);
            StepOutcome::Fault { cause }
        }
    }
}
