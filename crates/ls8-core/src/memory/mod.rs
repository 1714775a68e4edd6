//! Memory model: a fixed 256-cell byte array with bounds-checked access.

/// Address and image-size validation helpers.
pub mod access;

pub use access::{validate_address, validate_program_len};

use crate::FaultCode;

/// Size in bytes of the flat architectural address space.
pub const MEMORY_BYTES: usize = 256;

/// Addressable memory plus the heap boundary recorded at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MemoryImage"))]
pub struct Memory {
    cells: Box<[u8]>,
    heap_boundary: usize,
}

/// Unchecked wire form of [`Memory`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MemoryImage {
    cells: Vec<u8>,
    heap_boundary: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<MemoryImage> for Memory {
    type Error = FaultCode;

    fn try_from(image: MemoryImage) -> Result<Self, Self::Error> {
        if image.cells.len() != MEMORY_BYTES {
            return Err(FaultCode::OutOfRangeAddress);
        }
        validate_program_len(image.heap_boundary)?;
        Ok(Self {
            cells: image.cells.into_boxed_slice(),
            heap_boundary: image.heap_boundary,
        })
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Allocates zeroed memory with no program loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![0; MEMORY_BYTES].into_boxed_slice(),
            heap_boundary: 0,
        }
    }

    /// Reads the byte at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::OutOfRangeAddress`] when `address >= 256`.
    pub fn read(&self, address: usize) -> Result<u8, FaultCode> {
        validate_address(address)?;
        self.cells
            .get(address)
            .copied()
            .ok_or(FaultCode::OutOfRangeAddress)
    }

    /// Writes `value` to `address`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::OutOfRangeAddress`] when `address >= 256`.
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), FaultCode> {
        validate_address(address)?;
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(FaultCode::OutOfRangeAddress)?;
        *cell = value;
        Ok(())
    }

    /// Clears memory, copies `program` to address 0 and records the heap
    /// boundary as `program.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::OutOfRangeAddress`] when the image does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<(), FaultCode> {
        validate_program_len(program.len())?;
        self.cells.fill(0);
        self.cells[..program.len()].copy_from_slice(program);
        self.heap_boundary = program.len();
        Ok(())
    }

    /// First address after the loaded program. The stack must stay above it.
    #[must_use]
    pub const fn heap_boundary(&self) -> usize {
        self.heap_boundary
    }

    /// Raw view of all memory cells.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}
