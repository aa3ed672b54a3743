//! # Machine Snapshots
//!
//! A [`Snapshot`] captures everything needed to resume a machine exactly
//! where it stopped: registers, flags, the in-flight cycle budget, the
//! interrupt latches, the cycle counter and all 64KB of memory.
//!
//! ## Binary Format
//!
//! All multi-byte values are little-endian.
//!
//! | Offset | Size  | Field                                   |
//! |--------|-------|-----------------------------------------|
//! | 0      | 4     | Magic `"M65S"`                          |
//! | 4      | 4     | Format version (`u32`)                  |
//! | 8      | 4     | A, X, Y, SP                             |
//! | 12     | 2     | PC                                      |
//! | 14     | 1     | Status byte (NV1BDIZC)                  |
//! | 15     | 4     | Cycles left (`u32`)                     |
//! | 19     | 1     | Executing opcode                        |
//! | 20     | 1     | Latches: bit 0 hardware, bit 1 software |
//! | 21     | 8     | Total cycles (`u64`)                    |
//! | 29     | 65536 | Memory                                  |
//!
//! Bytes past the memory block are ignored.

use crate::memory::Memory;
use crate::registers::{Registers, StatusFlags};
use crate::state::CpuState;
use crate::MEMORY_SIZE;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Magic number at the start of every snapshot ("M65S").
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"M65S";

const HEADER_SIZE: usize = 4 + 4;
const CPU_SIZE: usize = 4 + 2 + 1 + 4 + 1 + 1 + 8;

/// Serialized size of a snapshot in bytes.
pub const SNAPSHOT_SIZE: usize = HEADER_SIZE + CPU_SIZE + MEMORY_SIZE;

const HARDWARE_LATCH: u8 = 0b01;
const SOFTWARE_LATCH: u8 = 0b10;

/// Errors from [`Snapshot::from_bytes`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("not a machine snapshot (bad magic number)")]
    BadMagic,

    #[error("unsupported snapshot version {0}, expected {}", SNAPSHOT_VERSION)]
    UnsupportedVersion(u32),

    #[error("snapshot truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Complete machine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub registers: Registers,
    /// Packed status byte (NV1BDIZC).
    pub flags: u8,
    pub cycles_left: u32,
    pub executing_opcode: u8,
    pub is_hardware_interrupt: bool,
    pub is_software_interrupt: bool,
    pub total_cycles: u64,
    pub memory: Memory,
}

impl Snapshot {
    /// Copies the current state.
    pub fn capture(state: &CpuState) -> Self {
        Self {
            registers: state.registers,
            flags: state.flags.to_byte(),
            cycles_left: state.cycles_left,
            executing_opcode: state.executing_opcode,
            is_hardware_interrupt: state.is_hardware_interrupt,
            is_software_interrupt: state.is_software_interrupt,
            total_cycles: state.total_cycles,
            memory: state.memory.clone(),
        }
    }

    /// Overwrites `state` with the captured values.
    pub fn restore(&self, state: &mut CpuState) {
        state.registers = self.registers;
        state.flags = StatusFlags::from_byte(self.flags);
        state.cycles_left = self.cycles_left;
        state.executing_opcode = self.executing_opcode;
        state.is_hardware_interrupt = self.is_hardware_interrupt;
        state.is_software_interrupt = self.is_software_interrupt;
        state.total_cycles = self.total_cycles;
        state.memory = self.memory.clone();
    }

    /// Serializes to the binary format described in the module docs.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(SNAPSHOT_SIZE);

        // Header
        data.extend_from_slice(&SNAPSHOT_MAGIC);
        data.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());

        // CPU
        let Registers { a, x, y, sp, pc } = self.registers;
        data.extend_from_slice(&[a, x, y, sp]);
        data.extend_from_slice(&pc.to_le_bytes());
        data.push(self.flags);
        data.extend_from_slice(&self.cycles_left.to_le_bytes());
        data.push(self.executing_opcode);

        let mut latches = 0;
        if self.is_hardware_interrupt {
            latches |= HARDWARE_LATCH;
        }
        if self.is_software_interrupt {
            latches |= SOFTWARE_LATCH;
        }
        data.push(latches);
        data.extend_from_slice(&self.total_cycles.to_le_bytes());

        // Memory
        data.extend_from_slice(self.memory.as_slice());

        data
    }

    /// Parses a snapshot produced by [`Snapshot::to_bytes`].
    ///
    /// # Errors
    ///
    /// - `SnapshotError::BadMagic` if the magic number does not match
    /// - `SnapshotError::UnsupportedVersion` for any version but the current one
    /// - `SnapshotError::Truncated` if the data ends early
    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        let mut reader = Reader::new(data);

        if reader.array::<4>()? != SNAPSHOT_MAGIC {
            return Err(SnapshotError::BadMagic);
        }

        let version = u32::from_le_bytes(reader.array()?);
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        let [a, x, y, sp] = reader.array::<4>()?;
        let pc = u16::from_le_bytes(reader.array()?);
        let flags = reader.byte()?;
        let cycles_left = u32::from_le_bytes(reader.array()?);
        let executing_opcode = reader.byte()?;
        let latches = reader.byte()?;
        let total_cycles = u64::from_le_bytes(reader.array()?);

        let mut memory = Memory::new();
        memory.write_slice(0x0000, reader.take(MEMORY_SIZE)?);

        Ok(Self {
            registers: Registers { a, x, y, sp, pc },
            flags,
            cycles_left,
            executing_opcode,
            is_hardware_interrupt: latches & HARDWARE_LATCH != 0,
            is_software_interrupt: latches & SOFTWARE_LATCH != 0,
            total_cycles,
            memory,
        })
    }
}

/// Bounds-checked cursor over snapshot bytes.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], SnapshotError> {
        let end = self.pos + len;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(SnapshotError::Truncated {
                expected: SNAPSHOT_SIZE,
                actual: self.data.len(),
            })?;
        self.pos = end;
        Ok(bytes)
    }

    fn byte(&mut self) -> Result<u8, SnapshotError> {
        Ok(self.take(1)?[0])
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], SnapshotError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}
