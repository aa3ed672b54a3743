//! # Memory Manager
//!
//! This module provides the `MemoryBus` trait and the flat 64KB `Memory` that
//! backs every machine.
//!
//! ## Addressing Modes
//!
//! `MemoryBus` only requires `read` and `write`. Every 6502 addressing mode is
//! a provided method on top of them, taking the raw operand and, where the mode
//! is indexed, the value of the index register:
//!
//! - Zero page modes wrap the effective address into 0x00-0xFF *after* the
//!   index is added
//! - Absolute indexed and indirect indexed reads report whether the index
//!   carried into the high byte (a page crossing), which costs one cycle
//! - Indirect modes always fetch their pointer from the zero page, wrapping
//!   from 0xFF to 0x00 for the pointer's high byte
//!
//! ## Design Principles
//!
//! - No bus errors - reads/writes always succeed
//! - No aliasing or banking: every address maps to exactly one byte

use crate::bits::{combine, page_crossed};
use crate::MEMORY_SIZE;

/// Error returned when a memory image is rejected.
///
/// A rejected load never touches the existing memory contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// No image was supplied at all.
    #[error("no memory image was supplied")]
    MissingData,

    /// The image is not exactly the size of the address space.
    #[error("memory image must be exactly {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Required length in bytes
        expected: usize,
        /// Length of the rejected image
        actual: usize,
    },
}

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use machine6502::{Memory, MemoryBus};
///
/// let mut mem = Memory::new();
/// mem.write(0x0100, 0x42);
///
/// // $FE,X with X = 2 crosses into page one
/// assert_eq!(mem.read_absolute_indexed(0x00FE, 2), (0x42, true));
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8);

    // ========== Words ==========

    /// Reads a little-endian word at `addr` and `addr + 1` (wrapping at 0xFFFF).
    fn read_word(&self, addr: u16) -> u16 {
        combine(self.read(addr), self.read(addr.wrapping_add(1)))
    }

    /// Reads a little-endian pointer from the zero page, wrapping within it.
    fn read_zero_page_word(&self, zp: u8) -> u16 {
        combine(
            self.read(zp as u16),
            self.read(zp.wrapping_add(1) as u16),
        )
    }

    /// Reads the target of an indirect JMP.
    ///
    /// The NMOS 6502 never carries into the pointer's high byte: JMP ($10FF)
    /// reads $10FF and $1000, not $1100.
    fn read_indirect_word(&self, pointer: u16) -> u16 {
        let high_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
        combine(self.read(pointer), self.read(high_addr))
    }

    // ========== Zero Page ==========

    fn read_zero_page(&self, zp: u8) -> u8 {
        self.read(zp as u16)
    }

    fn write_zero_page(&mut self, zp: u8, value: u8) {
        self.write(zp as u16, value);
    }

    /// Effective address of `zp + index`, wrapped into the zero page.
    fn zero_page_indexed_address(&self, zp: u8, index: u8) -> u16 {
        zp.wrapping_add(index) as u16
    }

    fn read_zero_page_indexed(&self, zp: u8, index: u8) -> u8 {
        self.read(self.zero_page_indexed_address(zp, index))
    }

    fn write_zero_page_indexed(&mut self, zp: u8, index: u8, value: u8) {
        let addr = self.zero_page_indexed_address(zp, index);
        self.write(addr, value);
    }

    // ========== Absolute ==========

    fn read_absolute(&self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn write_absolute(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }

    /// Effective address of `base + index` and whether it left the base page.
    fn absolute_indexed_address(&self, base: u16, index: u8) -> (u16, bool) {
        let addr = base.wrapping_add(index as u16);
        (addr, page_crossed(base, addr))
    }

    fn read_absolute_indexed(&self, base: u16, index: u8) -> (u8, bool) {
        let (addr, crossed) = self.absolute_indexed_address(base, index);
        (self.read(addr), crossed)
    }

    fn write_absolute_indexed(&mut self, base: u16, index: u8, value: u8) {
        let (addr, _) = self.absolute_indexed_address(base, index);
        self.write(addr, value);
    }

    // ========== Indexed Indirect (zp,X) ==========

    /// Pointer fetched from `(zp + x)` and `(zp + x + 1)`, both zero page wrapped.
    fn indexed_indirect_address(&self, zp: u8, x: u8) -> u16 {
        self.read_zero_page_word(zp.wrapping_add(x))
    }

    fn read_indexed_indirect(&self, zp: u8, x: u8) -> u8 {
        self.read(self.indexed_indirect_address(zp, x))
    }

    fn write_indexed_indirect(&mut self, zp: u8, x: u8, value: u8) {
        let addr = self.indexed_indirect_address(zp, x);
        self.write(addr, value);
    }

    // ========== Indirect Indexed (zp),Y ==========

    /// Pointer fetched from the zero page, then offset by `y`.
    ///
    /// The page-crossing check applies to the `+ y`, not to the pointer fetch.
    fn indirect_indexed_address(&self, zp: u8, y: u8) -> (u16, bool) {
        let base = self.read_zero_page_word(zp);
        self.absolute_indexed_address(base, y)
    }

    fn read_indirect_indexed(&self, zp: u8, y: u8) -> (u8, bool) {
        let (addr, crossed) = self.indirect_indexed_address(zp, y);
        (self.read(addr), crossed)
    }

    fn write_indirect_indexed(&mut self, zp: u8, y: u8, value: u8) {
        let (addr, _) = self.indirect_indexed_address(zp, y);
        self.write(addr, value);
    }
}

/// Flat 64KB memory.
///
/// All 65536 addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00.
/// The two interrupt vectors live at 0xFFFA (hardware) and 0xFFFE (software and
/// reset) like any other bytes.
///
/// # Examples
///
/// ```
/// use machine6502::{Memory, MemoryBus};
///
/// let mut memory = Memory::new();
/// memory.write(0xFFFE, 0x00);
/// memory.write(0xFFFF, 0x06);
///
/// assert_eq!(memory.read_word(0xFFFE), 0x0600);
/// assert_eq!(memory.save().len(), 65536);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    /// 64KB contiguous memory array
    data: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Creates a new Memory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Returns an exact copy of all 65536 bytes.
    pub fn save(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    /// Overwrites all of memory with `data`.
    ///
    /// # Errors
    ///
    /// `LoadError::LengthMismatch` unless `data` is exactly 65536 bytes long.
    /// Memory is left untouched on error.
    pub fn load(&mut self, data: &[u8]) -> Result<(), LoadError> {
        if data.len() != MEMORY_SIZE {
            return Err(LoadError::LengthMismatch {
                expected: MEMORY_SIZE,
                actual: data.len(),
            });
        }

        self.data.copy_from_slice(data);
        Ok(())
    }

    /// Borrows the raw memory contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }

    /// Copies `bytes` into memory starting at `start`, wrapping at 0xFFFF.
    pub fn write_slice(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("zero_page", &&self.data[..0x100])
            .field("vectors", &&self.data[0xFFFA..])
            .finish_non_exhaustive()
    }
}

impl MemoryBus for Memory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
