//! # 6502 Machine Core
//!
//! A cycle-stepped NMOS 6502 emulator covering the full opcode space, including
//! the undocumented ("illegal") opcodes, against a flat 64KB address space.
//!
//! The crate is split the way the hardware is: a [`CpuState`] aggregate owns the
//! registers, flags and memory; a [`Decoder`] turns the byte at the program
//! counter into a [`DecodedInstruction`]; and the [`Machine`] advances time one
//! cycle at a time, servicing interrupts at instruction boundaries.
//!
//! ## Quick Start
//!
//! ```rust
//! use machine6502::{Machine, MemoryBus, ProgramImage};
//!
//! // LDA #$03; JMP $0608; (padding); STA $0200
//! let program = [0xA9, 0x03, 0x4C, 0x08, 0x06, 0x00, 0x00, 0x00, 0x8D, 0x00, 0x02];
//! let image = ProgramImage::default().build(&program).unwrap();
//!
//! let mut machine = Machine::from_image(&image).unwrap();
//! assert_eq!(machine.state().registers.pc, 0x0600);
//!
//! // Each call advances the machine by exactly one clock cycle
//! for _ in 0..7 {
//!     assert!(machine.cycle());
//! }
//!
//! assert_eq!(machine.state().registers.a, 0x03);
//! assert_eq!(machine.state().memory.read(0x0200), 0x03);
//! ```
//!
//! ## Architecture
//!
//! - **Cycle stepping**: `Machine::cycle()` either drains the in-flight
//!   instruction's remaining cycles or retires a whole new instruction
//! - **Table-Driven Decode**: an opcode to instruction lookup built once
//! - **Explicit Errors**: decode/execute failures are `Result`s that surface at
//!   the machine boundary, never panics
//! - **WebAssembly Portability**: no OS dependencies, deterministic execution
//!
//! ## Modules
//!
//! - `bits` - Pure bit, nibble, BCD and page helpers
//! - `registers` - Register file and status flags
//! - `memory` - MemoryBus trait with all addressing modes, flat 64KB memory
//! - `stack` - Page-one stack manager
//! - `state` - CPU state aggregate
//! - `opcodes` - Per-opcode metadata
//! - `decoder` - Opcode lookup and operand fetch
//! - `machine` - Cycle-stepped execution engine
//! - `program` - Program image builder
//! - `snapshot` - Machine state serialization

pub mod addressing;
pub mod bits;
pub mod decoder;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod program;
pub mod registers;
pub mod snapshot;
pub mod stack;
pub mod state;

// Instruction units are reachable through the decoder and the Instruction trait
pub mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use decoder::{DecodedInstruction, Decoder};
pub use instructions::{Instruction, INSTRUCTION_SET};
pub use machine::{Machine, MachineError};
pub use memory::{LoadError, Memory, MemoryBus};
pub use opcodes::OpcodeMetadata;
pub use program::{ProgramError, ProgramImage};
pub use registers::{Registers, StatusFlags};
pub use snapshot::{Snapshot, SnapshotError};
pub use stack::Stack;
pub use state::CpuState;

/// Total size of the address space in bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// Base address of the stack page (0x0100-0x01FF).
pub const STACK_BASE: u16 = 0x0100;

/// Little-endian vector loaded into PC when a hardware interrupt is serviced.
pub const HARDWARE_INTERRUPT_VECTOR: u16 = 0xFFFA;

/// Little-endian vector used for software interrupts and as the reset vector.
pub const SOFTWARE_INTERRUPT_VECTOR: u16 = 0xFFFE;

/// Program counter value that marks a finished program.
pub const HALT_ADDRESS: u16 = 0xFFFF;

/// Cycles charged for pushing state and jumping through an interrupt vector.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Address a program image is placed at unless the caller asks otherwise.
pub const DEFAULT_LOAD_ADDRESS: u16 = 0x0600;

/// Errors that can occur while decoding or executing an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// No instruction declares this opcode.
    ///
    /// Contains the opcode byte value for debugging purposes.
    #[error("Opcode 0x{0:02X} is not a known instruction")]
    UnknownOpcode(u8),

    /// An instruction was asked to execute with an addressing mode it has no
    /// memory access for.
    #[error("Opcode 0x{opcode:02X} cannot use {mode:?} addressing")]
    InvalidAddressingMode {
        /// Opcode that was executing
        opcode: u8,
        /// Addressing mode declared for that opcode
        mode: AddressingMode,
    },
}
