//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized
//! by category. Each mnemonic family is a stateless unit struct implementing
//! [`Instruction`]: it declares the opcodes it answers to, with per-opcode
//! metadata, and how executing one of them changes the CPU state.
//!
//! An instruction picks its memory access from the addressing mode of
//! `state.executing_opcode`, so one unit serves every addressing mode of its
//! mnemonic.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS
//! - **illegal**: undocumented NMOS opcodes

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod illegal;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::addressing::AddressingMode;
use crate::opcodes::OpcodeMetadata;
use crate::state::CpuState;
use crate::ExecutionError;

/// One instruction family.
///
/// Implementations are stateless and shared; the decoder maps every opcode an
/// instruction declares back to it.
pub trait Instruction: std::fmt::Debug + Sync {
    /// Metadata for every opcode this instruction answers to.
    fn opcodes(&self) -> &'static [OpcodeMetadata];

    /// Applies the instruction to `state`.
    ///
    /// PC already points past the instruction and `executing_opcode` holds
    /// the opcode being retired. `operand` is the raw 0, 8 or 16-bit operand.
    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError>;

    /// Returns true if this instruction declares `opcode`.
    fn has_opcode(&self, opcode: u8) -> bool {
        self.opcodes().iter().any(|meta| meta.opcode == opcode)
    }

    /// Returns the metadata declared for `opcode`.
    ///
    /// # Errors
    ///
    /// `ExecutionError::UnknownOpcode` if this instruction does not declare it.
    fn gather_information(&self, opcode: u8) -> Result<OpcodeMetadata, ExecutionError> {
        self.opcodes()
            .iter()
            .find(|meta| meta.opcode == opcode)
            .copied()
            .ok_or(ExecutionError::UnknownOpcode(opcode))
    }

    /// Addressing mode of the opcode currently executing.
    fn addressing_mode(&self, state: &CpuState) -> Result<AddressingMode, ExecutionError> {
        Ok(self.gather_information(state.executing_opcode)?.addressing_mode)
    }
}

/// Every instruction the machine knows, documented and undocumented.
pub static INSTRUCTION_SET: &[&dyn Instruction] = &[
    // ALU
    &alu::Adc,
    &alu::Sbc,
    &alu::And,
    &alu::Ora,
    &alu::Eor,
    &alu::Cmp,
    &alu::Cpx,
    &alu::Cpy,
    &alu::Bit,
    // Branches
    &branches::Bcc,
    &branches::Bcs,
    &branches::Beq,
    &branches::Bne,
    &branches::Bmi,
    &branches::Bpl,
    &branches::Bvc,
    &branches::Bvs,
    // Shifts
    &shifts::Asl,
    &shifts::Lsr,
    &shifts::Rol,
    &shifts::Ror,
    // Loads and stores
    &load_store::Lda,
    &load_store::Ldx,
    &load_store::Ldy,
    &load_store::Sta,
    &load_store::Stx,
    &load_store::Sty,
    // Increments and decrements
    &inc_dec::Inc,
    &inc_dec::Dec,
    &inc_dec::Inx,
    &inc_dec::Iny,
    &inc_dec::Dex,
    &inc_dec::Dey,
    // Control flow
    &control::Brk,
    &control::Jmp,
    &control::Jsr,
    &control::Rts,
    &control::Rti,
    &control::Nop,
    // Stack
    &stack::Pha,
    &stack::Php,
    &stack::Pla,
    &stack::Plp,
    // Flags
    &flags::Clc,
    &flags::Sec,
    &flags::Cli,
    &flags::Sei,
    &flags::Cld,
    &flags::Sed,
    &flags::Clv,
    // Transfers
    &transfer::Tax,
    &transfer::Tay,
    &transfer::Txa,
    &transfer::Tya,
    &transfer::Tsx,
    &transfer::Txs,
    // Undocumented
    &illegal::Slo,
    &illegal::Rla,
    &illegal::Sre,
    &illegal::Rra,
    &illegal::Dcp,
    &illegal::Isc,
    &illegal::Sax,
    &illegal::Lax,
    &illegal::Anc,
    &illegal::Alr,
    &illegal::Arr,
    &illegal::Ane,
    &illegal::Lxa,
    &illegal::Sbx,
    &illegal::Las,
    &illegal::Sha,
    &illegal::Shx,
    &illegal::Shy,
    &illegal::Tas,
];

/// Reads an operand and charges one cycle if indexing crossed a page.
///
/// Used by every instruction that only reads its operand.
pub(crate) fn read_with_penalty(
    state: &mut CpuState,
    mode: AddressingMode,
    operand: u16,
) -> Result<u8, ExecutionError> {
    let (value, page_crossed) = state.read_operand(mode, operand)?;
    if page_crossed {
        state.increment_cycles(1);
    }
    Ok(value)
}

// ========== Opcode Groups ==========
//
// The regular corners of the opcode matrix share one layout per group; only
// the base opcode differs between mnemonics.

/// The eight addressing modes of ORA/AND/EOR/ADC/LDA/CMP/SBC.
pub(crate) const fn read_group(mnemonic: &'static str, base: u8) -> [OpcodeMetadata; 8] {
    use AddressingMode::*;
    [
        OpcodeMetadata::new(base | 0x09, mnemonic, Immediate, 2),
        OpcodeMetadata::new(base | 0x05, mnemonic, ZeroPage, 3),
        OpcodeMetadata::new(base | 0x15, mnemonic, ZeroPageX, 4),
        OpcodeMetadata::new(base | 0x0D, mnemonic, Absolute, 4),
        OpcodeMetadata::new(base | 0x1D, mnemonic, AbsoluteX, 4),
        OpcodeMetadata::new(base | 0x19, mnemonic, AbsoluteY, 4),
        OpcodeMetadata::new(base | 0x01, mnemonic, IndirectX, 6),
        OpcodeMetadata::new(base | 0x11, mnemonic, IndirectY, 5),
    ]
}

/// The five addressing modes of ASL/ROL/LSR/ROR.
pub(crate) const fn shift_group(mnemonic: &'static str, base: u8) -> [OpcodeMetadata; 5] {
    use AddressingMode::*;
    [
        OpcodeMetadata::new(base | 0x0A, mnemonic, Accumulator, 2),
        OpcodeMetadata::new(base | 0x06, mnemonic, ZeroPage, 5),
        OpcodeMetadata::new(base | 0x16, mnemonic, ZeroPageX, 6),
        OpcodeMetadata::new(base | 0x0E, mnemonic, Absolute, 6),
        OpcodeMetadata::new(base | 0x1E, mnemonic, AbsoluteX, 7),
    ]
}

/// The seven addressing modes of the undocumented read-modify-write combos.
pub(crate) const fn combo_group(mnemonic: &'static str, base: u8) -> [OpcodeMetadata; 7] {
    use AddressingMode::*;
    [
        OpcodeMetadata::illegal(base | 0x07, mnemonic, ZeroPage, 5),
        OpcodeMetadata::illegal(base | 0x17, mnemonic, ZeroPageX, 6),
        OpcodeMetadata::illegal(base | 0x0F, mnemonic, Absolute, 6),
        OpcodeMetadata::illegal(base | 0x1F, mnemonic, AbsoluteX, 7),
        OpcodeMetadata::illegal(base | 0x1B, mnemonic, AbsoluteY, 7),
        OpcodeMetadata::illegal(base | 0x03, mnemonic, IndirectX, 8),
        OpcodeMetadata::illegal(base | 0x13, mnemonic, IndirectY, 8),
    ]
}
