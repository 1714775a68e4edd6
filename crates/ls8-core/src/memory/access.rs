//! Bounds policy for memory addresses and program images.

use crate::{FaultCode, MEMORY_BYTES};

/// Validates that `address` names a memory cell.
///
/// # Errors
///
/// Returns [`FaultCode::OutOfRangeAddress`] when `address` is outside
/// `0..256`.
pub const fn validate_address(address: usize) -> Result<(), FaultCode> {
    if address < MEMORY_BYTES {
        Ok(())
    } else {
        Err(FaultCode::OutOfRangeAddress)
    }
}

/// Validates that a program image of `len` bytes fits in memory.
///
/// # Errors
///
/// Returns [`FaultCode::OutOfRangeAddress`] when `len > 256`.
pub const fn validate_program_len(len: usize) -> Result<(), FaultCode> {
    if len <= MEMORY_BYTES {
        Ok(())
    } else {
        Err(FaultCode::OutOfRangeAddress)
    }
}

#[cfg(test)]
mod tests {
    use crate::{validate_address, validate_program_len, FaultCode, MEMORY_BYTES};

    #[test]
    fn every_byte_address_is_valid() {
        for address in 0..MEMORY_BYTES {
            assert!(validate_address(address).is_ok());
        }
    }

    #[test]
    fn addresses_past_end_are_rejected() {
        assert_eq!(
            validate_address(MEMORY_BYTES),
            Err(FaultCode::OutOfRangeAddress)
        );
        assert_eq!(
            validate_address(usize::MAX),
            Err(FaultCode::OutOfRangeAddress)
        );
    }

    #[test]
    fn program_length_boundary() {
        assert!(validate_program_len(0).is_ok());
        assert!(validate_program_len(MEMORY_BYTES).is_ok());
        assert_eq!(
            validate_program_len(MEMORY_BYTES + 1),
            Err(FaultCode::OutOfRangeAddress)
        );
    }
}
