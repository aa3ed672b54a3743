//! # Program Images
//!
//! Turns a raw machine-code binary into the full 64KB buffer
//! [`Machine::load`](crate::Machine::load) expects: the binary is copied to
//! its load address and the reset vector at 0xFFFE/0xFFFF is pointed at it.

use crate::bits::{high_byte, low_byte};
use crate::{DEFAULT_LOAD_ADDRESS, MEMORY_SIZE, SOFTWARE_INTERRUPT_VECTOR};

/// Errors from [`ProgramImage::build`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    /// The binary would run past the end of the address space.
    #[error("program of {length} bytes does not fit at 0x{load_address:04X}")]
    TooLarge {
        /// Requested load address
        load_address: u16,
        /// Length of the binary in bytes
        length: usize,
    },

    /// The binary contains no bytes.
    #[error("program is empty")]
    Empty,
}

/// Builder for a loadable memory image.
///
/// # Examples
///
/// ```
/// use machine6502::ProgramImage;
///
/// let image = ProgramImage::new(0x8000).build(&[0xEA, 0xEA]).unwrap();
///
/// assert_eq!(image.len(), 0x10000);
/// assert_eq!(&image[0x8000..0x8002], &[0xEA, 0xEA]);
/// assert_eq!(&image[0xFFFE..], &[0x00, 0x80]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramImage {
    load_address: u16,
}

impl ProgramImage {
    pub fn new(load_address: u16) -> Self {
        Self { load_address }
    }

    pub fn load_address(&self) -> u16 {
        self.load_address
    }

    /// Builds the 65,536-byte image for `binary`.
    ///
    /// The reset vector is written after the copy, so it wins over any
    /// binary that reaches 0xFFFE.
    ///
    /// # Errors
    ///
    /// - `ProgramError::Empty` for a zero-length binary
    /// - `ProgramError::TooLarge` if the binary extends past 0xFFFF
    pub fn build(&self, binary: &[u8]) -> Result<Vec<u8>, ProgramError> {
        if binary.is_empty() {
            return Err(ProgramError::Empty);
        }

        let start = self.load_address as usize;
        let end = start + binary.len();
        if end > MEMORY_SIZE {
            return Err(ProgramError::TooLarge {
                load_address: self.load_address,
                length: binary.len(),
            });
        }

        let mut image = vec![0u8; MEMORY_SIZE];
        image[start..end].copy_from_slice(binary);

        let vector = SOFTWARE_INTERRUPT_VECTOR as usize;
        image[vector] = low_byte(self.load_address);
        image[vector + 1] = high_byte(self.load_address);

        Ok(image)
    }
}

impl Default for ProgramImage {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_ADDRESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_load_address() {
        let image = ProgramImage::default().build(&[0xA9, 0x03]).unwrap();

        assert_eq!(image[0x0600], 0xA9);
        assert_eq!(image[0x0601], 0x03);
        assert_eq!(image[0xFFFE], 0x00);
        assert_eq!(image[0xFFFF], 0x06);
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert_eq!(ProgramImage::default().build(&[]), Err(ProgramError::Empty));
        assert_eq!(
            ProgramImage::new(0xFFFF).build(&[0xEA, 0xEA]),
            Err(ProgramError::TooLarge {
                load_address: 0xFFFF,
                length: 2
            })
        );
    }

    #[test]
    fn test_vector_overrides_binary_tail() {
        let image = ProgramImage::new(0xFFFC).build(&[1, 2, 3, 4]).unwrap();

        assert_eq!(&image[0xFFFC..], &[1, 2, 0xFC, 0xFF]);
    }
}
