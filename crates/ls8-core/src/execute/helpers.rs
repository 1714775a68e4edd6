//! Operand helpers shared by the instruction handlers.

use crate::{CoreState, FaultCode, GeneralRegister};

/// Resolves an operand byte to a register.
///
/// # Errors
///
/// Returns [`FaultCode::OutOfRangeAddress`] for bytes above 7.
pub fn register_operand(byte: u8) -> Result<GeneralRegister, FaultCode> {
    GeneralRegister::from_operand(byte).ok_or(FaultCode::OutOfRangeAddress)
}

/// Reads the register named by an operand byte.
///
/// # Errors
///
/// Returns [`FaultCode::OutOfRangeAddress`] for bytes above 7.
pub fn read_register(state: &CoreState, byte: u8) -> Result<u8, FaultCode> {
    register_operand(byte).map(|reg| state.arch.gpr(reg))
}
