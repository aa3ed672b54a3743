//! # Opcode Metadata
//!
//! Static information about one opcode byte: its mnemonic, addressing mode,
//! base cycle cost and length. Every instruction unit declares a slice of these
//! for the opcodes it answers to; the decoder indexes them into a 256-entry
//! table once.
//!
//! Page-crossing and branch-taken penalties are not part of the base cost; the
//! instruction adds them while executing.

use crate::addressing::AddressingMode;

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use machine6502::{AddressingMode, Decoder};
///
/// let decoder = Decoder::new();
/// let lda = decoder.metadata(0xA9).unwrap();
///
/// assert_eq!(lda.mnemonic, "LDA");
/// assert_eq!(lda.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda.cycles, 2);
/// assert_eq!(lda.size_bytes, 2);
/// assert!(!lda.illegal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// The opcode byte itself.
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "SLO").
    pub mnemonic: &'static str,

    /// Addressing mode for this opcode.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing and branch penalties).
    pub cycles: u8,

    /// Total instruction size in bytes (opcode + operands), 1-3.
    pub size_bytes: u8,

    /// True for undocumented opcodes.
    pub illegal: bool,
}

impl OpcodeMetadata {
    /// Metadata for a documented opcode; the size follows from the mode.
    pub const fn new(
        opcode: u8,
        mnemonic: &'static str,
        addressing_mode: AddressingMode,
        cycles: u8,
    ) -> Self {
        Self {
            opcode,
            mnemonic,
            addressing_mode,
            cycles,
            size_bytes: addressing_mode.size_bytes(),
            illegal: false,
        }
    }

    /// Metadata for an undocumented opcode.
    pub const fn illegal(
        opcode: u8,
        mnemonic: &'static str,
        addressing_mode: AddressingMode,
        cycles: u8,
    ) -> Self {
        Self {
            illegal: true,
            ..Self::new(opcode, mnemonic, addressing_mode, cycles)
        }
    }
}
