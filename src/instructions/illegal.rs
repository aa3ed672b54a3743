//! # Undocumented Instructions
//!
//! The NMOS 6502 decodes most of the unassigned opcode bytes into stable,
//! if unofficial, combinations of documented operations. Software of the era
//! relied on several of them, so they are implemented here rather than
//! rejected.
//!
//! ## Read-Modify-Write Combos
//!
//! SLO, RLA, SRE, RRA, DCP and ISC run a memory shift/rotate/inc/dec and then
//! feed the written value into an accumulator operation:
//!
//! | Opcode | Memory step | Then   |
//! |--------|-------------|--------|
//! | SLO    | ASL         | ORA    |
//! | RLA    | ROL         | AND    |
//! | SRE    | LSR         | EOR    |
//! | RRA    | ROR         | ADC    |
//! | DCP    | DEC         | CMP    |
//! | ISC    | INC         | SBC    |
//!
//! ## Unstable Stores
//!
//! SHA, SHX, SHY and TAS store a register ANDed with the high byte of the
//! base address plus one. The value stored here follows the commonly
//! documented behaviour; the real chip's output also depends on bus timing.

use super::alu::{add_with_carry, compare, subtract_with_carry};
use super::inc_dec::{decrement, increment};
use super::shifts::{rotate_left, rotate_right, shift_left, shift_right};
use super::{combo_group, read_with_penalty, Instruction};
use crate::addressing::AddressingMode;
use crate::bits::{high_byte, is_bit_set};
use crate::memory::MemoryBus;
use crate::opcodes::OpcodeMetadata;
use crate::state::CpuState;
use crate::ExecutionError;

// ========== Read-Modify-Write Combos ==========

/// SLO - ASL memory, then ORA with the result.
#[derive(Debug)]
pub struct Slo;

static SLO_OPCODES: [OpcodeMetadata; 7] = combo_group("SLO", 0x00);

impl Instruction for Slo {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &SLO_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let shifted = state.modify_operand(mode, operand, shift_left)?;
        state.registers.a |= shifted;
        state.flags.set_zero_negative(state.registers.a);
        Ok(())
    }
}

/// RLA - ROL memory, then AND with the result.
#[derive(Debug)]
pub struct Rla;

static RLA_OPCODES: [OpcodeMetadata; 7] = combo_group("RLA", 0x20);

impl Instruction for Rla {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &RLA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let rotated = state.modify_operand(mode, operand, rotate_left)?;
        state.registers.a &= rotated;
        state.flags.set_zero_negative(state.registers.a);
        Ok(())
    }
}

/// SRE - LSR memory, then EOR with the result.
#[derive(Debug)]
pub struct Sre;

static SRE_OPCODES: [OpcodeMetadata; 7] = combo_group("SRE", 0x40);

impl Instruction for Sre {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &SRE_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let shifted = state.modify_operand(mode, operand, shift_right)?;
        state.registers.a ^= shifted;
        state.flags.set_zero_negative(state.registers.a);
        Ok(())
    }
}

/// RRA - ROR memory, then ADC the result (using the carry ROR produced).
#[derive(Debug)]
pub struct Rra;

static RRA_OPCODES: [OpcodeMetadata; 7] = combo_group("RRA", 0x60);

impl Instruction for Rra {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &RRA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let rotated = state.modify_operand(mode, operand, rotate_right)?;
        add_with_carry(state, rotated);
        Ok(())
    }
}

/// DCP - DEC memory, then CMP with the result.
#[derive(Debug)]
pub struct Dcp;

static DCP_OPCODES: [OpcodeMetadata; 7] = combo_group("DCP", 0xC0);

impl Instruction for Dcp {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &DCP_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let decremented = state.modify_operand(mode, operand, decrement)?;
        compare(&mut state.flags, state.registers.a, decremented);
        Ok(())
    }
}

/// ISC - INC memory, then SBC the result.
#[derive(Debug)]
pub struct Isc;

static ISC_OPCODES: [OpcodeMetadata; 7] = combo_group("ISC", 0xE0);

impl Instruction for Isc {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ISC_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let incremented = state.modify_operand(mode, operand, increment)?;
        subtract_with_carry(state, incremented);
        Ok(())
    }
}

// ========== Loads and Stores ==========

/// SAX - Store A & X. Flags are untouched.
#[derive(Debug)]
pub struct Sax;

static SAX_OPCODES: [OpcodeMetadata; 4] = [
    OpcodeMetadata::illegal(0x87, "SAX", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::illegal(0x97, "SAX", AddressingMode::ZeroPageY, 4),
    OpcodeMetadata::illegal(0x8F, "SAX", AddressingMode::Absolute, 4),
    OpcodeMetadata::illegal(0x83, "SAX", AddressingMode::IndirectX, 6),
];

impl Instruction for Sax {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &SAX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = state.registers.a & state.registers.x;
        state.write_operand(mode, operand, value)
    }
}

/// LAX - Load A and X with the same value.
#[derive(Debug)]
pub struct Lax;

static LAX_OPCODES: [OpcodeMetadata; 6] = [
    OpcodeMetadata::illegal(0xA7, "LAX", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::illegal(0xB7, "LAX", AddressingMode::ZeroPageY, 4),
    OpcodeMetadata::illegal(0xAF, "LAX", AddressingMode::Absolute, 4),
    OpcodeMetadata::illegal(0xBF, "LAX", AddressingMode::AbsoluteY, 4),
    OpcodeMetadata::illegal(0xA3, "LAX", AddressingMode::IndirectX, 6),
    OpcodeMetadata::illegal(0xB3, "LAX", AddressingMode::IndirectY, 5),
];

impl Instruction for Lax {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &LAX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        state.registers.a = value;
        state.registers.x = value;
        state.flags.set_zero_negative(value);
        Ok(())
    }
}

/// LAS - Load A, X and SP with memory AND SP.
#[derive(Debug)]
pub struct Las;

static LAS_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0xBB,
    "LAS",
    AddressingMode::AbsoluteY,
    4,
)];

impl Instruction for Las {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &LAS_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)? & state.registers.sp;
        state.registers.a = value;
        state.registers.x = value;
        state.registers.sp = value;
        state.flags.set_zero_negative(value);
        Ok(())
    }
}

// ========== Immediate Logic ==========

/// ANC - AND immediate, then copy N into C.
#[derive(Debug)]
pub struct Anc;

static ANC_OPCODES: [OpcodeMetadata; 2] = [
    OpcodeMetadata::illegal(0x0B, "ANC", AddressingMode::Immediate, 2),
    OpcodeMetadata::illegal(0x2B, "ANC", AddressingMode::Immediate, 2),
];

impl Instruction for Anc {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ANC_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        state.registers.a &= operand as u8;
        state.flags.set_zero_negative(state.registers.a);
        state.flags.carry = state.flags.negative;
        Ok(())
    }
}

/// ALR - AND immediate, then LSR the accumulator.
#[derive(Debug)]
pub struct Alr;

static ALR_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0x4B,
    "ALR",
    AddressingMode::Immediate,
    2,
)];

impl Instruction for Alr {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ALR_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let masked = state.registers.a & operand as u8;
        state.registers.a = shift_right(&mut state.flags, masked);
        Ok(())
    }
}

/// ARR - AND immediate, then ROR the accumulator.
///
/// Carry and Overflow come from the rotated result: C = bit 6,
/// V = bit 6 XOR bit 5.
#[derive(Debug)]
pub struct Arr;

static ARR_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0x6B,
    "ARR",
    AddressingMode::Immediate,
    2,
)];

impl Instruction for Arr {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ARR_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let masked = state.registers.a & operand as u8;
        let result = (masked >> 1) | ((state.flags.carry as u8) << 7);

        state.registers.a = result;
        state.flags.set_zero_negative(result);
        state.flags.carry = is_bit_set(result, 6);
        state.flags.overflow = is_bit_set(result, 6) != is_bit_set(result, 5);
        Ok(())
    }
}

/// ANE (XAA) - A = A & X & immediate.
#[derive(Debug)]
pub struct Ane;

static ANE_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0x8B,
    "ANE",
    AddressingMode::Immediate,
    2,
)];

impl Instruction for Ane {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ANE_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        state.registers.a = state.registers.a & state.registers.x & operand as u8;
        state.flags.set_zero_negative(state.registers.a);
        Ok(())
    }
}

/// LXA - Load A and X with the immediate.
#[derive(Debug)]
pub struct Lxa;

static LXA_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0xAB,
    "LXA",
    AddressingMode::Immediate,
    2,
)];

impl Instruction for Lxa {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &LXA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let value = operand as u8;
        state.registers.a = value;
        state.registers.x = value;
        state.flags.set_zero_negative(value);
        Ok(())
    }
}

/// SBX - X = (A & X) - immediate, setting flags like CMP.
#[derive(Debug)]
pub struct Sbx;

static SBX_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0xCB,
    "SBX",
    AddressingMode::Immediate,
    2,
)];

impl Instruction for Sbx {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &SBX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let masked = state.registers.a & state.registers.x;
        let value = operand as u8;
        compare(&mut state.flags, masked, value);
        state.registers.x = masked.wrapping_sub(value);
        Ok(())
    }
}

// ========== Unstable Stores ==========

/// Resolves the store address and the `H + 1` mask for SHA/SHX/SHY/TAS.
///
/// H is the high byte of the base address before indexing; for (zp),Y that
/// is the pointer fetched from zero page.
fn unstable_store_target(
    state: &CpuState,
    mode: AddressingMode,
    operand: u16,
) -> Result<(u16, u8), ExecutionError> {
    let base = match mode {
        AddressingMode::IndirectY => state.memory.read_zero_page_word(operand as u8),
        _ => operand,
    };
    let (address, _) = state.effective_address(mode, operand)?;
    Ok((address, high_byte(base).wrapping_add(1)))
}

/// SHA (AHX) - Store A & X & (H + 1).
#[derive(Debug)]
pub struct Sha;

static SHA_OPCODES: [OpcodeMetadata; 2] = [
    OpcodeMetadata::illegal(0x9F, "SHA", AddressingMode::AbsoluteY, 5),
    OpcodeMetadata::illegal(0x93, "SHA", AddressingMode::IndirectY, 6),
];

impl Instruction for Sha {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &SHA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let (address, mask) = unstable_store_target(state, mode, operand)?;
        let value = state.registers.a & state.registers.x & mask;
        state.memory.write(address, value);
        Ok(())
    }
}

/// SHX - Store X & (H + 1).
#[derive(Debug)]
pub struct Shx;

static SHX_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0x9E,
    "SHX",
    AddressingMode::AbsoluteY,
    5,
)];

impl Instruction for Shx {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &SHX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let (address, mask) = unstable_store_target(state, mode, operand)?;
        let value = state.registers.x & mask;
        state.memory.write(address, value);
        Ok(())
    }
}

/// SHY - Store Y & (H + 1).
#[derive(Debug)]
pub struct Shy;

static SHY_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0x9C,
    "SHY",
    AddressingMode::AbsoluteX,
    5,
)];

impl Instruction for Shy {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &SHY_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let (address, mask) = unstable_store_target(state, mode, operand)?;
        let value = state.registers.y & mask;
        state.memory.write(address, value);
        Ok(())
    }
}

/// TAS (SHS) - SP = A & X, then store SP & (H + 1).
#[derive(Debug)]
pub struct Tas;

static TAS_OPCODES: [OpcodeMetadata; 1] = [OpcodeMetadata::illegal(
    0x9B,
    "TAS",
    AddressingMode::AbsoluteY,
    5,
)];

impl Instruction for Tas {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &TAS_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.registers.sp = state.registers.a & state.registers.x;
        let (address, mask) = unstable_store_target(state, mode, operand)?;
        let value = state.registers.sp & mask;
        state.memory.write(address, value);
        Ok(())
    }
}
