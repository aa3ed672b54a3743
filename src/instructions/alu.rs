//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry (including the undocumented 0xEB mirror)
//! - AND, ORA, EOR: Bitwise logic with the accumulator
//! - CMP, CPX, CPY: Compare register with memory
//! - BIT: Test bits against the accumulator
//!
//! `add_with_carry`, `subtract_with_carry` and `compare` are shared with the
//! undocumented opcodes that chain them after a read-modify-write.
//!
//! ## Decimal Mode
//!
//! With the D flag set, ADC and SBC treat both operands as two packed BCD
//! digits. The decimal result decides the accumulator and Carry; Zero,
//! Negative and Overflow still come from the binary computation.

use super::{read_group, read_with_penalty, Instruction};
use crate::addressing::AddressingMode;
use crate::bits::{from_bcd, is_bit_set, to_bcd};
use crate::opcodes::OpcodeMetadata;
use crate::registers::StatusFlags;
use crate::state::CpuState;
use crate::ExecutionError;

/// Adds `value` and the carry to the accumulator.
///
/// Overflow: set when both inputs share a sign the result does not.
/// Formula: V = (A ^ result) & (M ^ result) & 0x80
pub(crate) fn add_with_carry(state: &mut CpuState, value: u8) {
    let a = state.registers.a;
    let carry_in = state.flags.carry as u16;

    let sum = a as u16 + value as u16 + carry_in;
    let binary = sum as u8;

    state.flags.overflow = (a ^ binary) & (value ^ binary) & 0x80 != 0;
    state.flags.set_zero_negative(binary);

    if state.flags.decimal_mode {
        let decimal = from_bcd(a) as u16 + from_bcd(value) as u16 + carry_in;
        state.flags.carry = decimal > 99;
        state.registers.a = to_bcd((decimal % 100) as u8);
    } else {
        state.flags.carry = sum > 0xFF;
        state.registers.a = binary;
    }
}

/// Subtracts `value` and the borrow (inverted carry) from the accumulator.
///
/// Binary mode adds the one's complement of the operand plus the carry, so
/// Carry ends up set when no borrow was needed.
pub(crate) fn subtract_with_carry(state: &mut CpuState, value: u8) {
    let a = state.registers.a;
    let carry_in = state.flags.carry as u16;
    let inverted = !value;

    let sum = a as u16 + inverted as u16 + carry_in;
    let binary = sum as u8;

    state.flags.overflow = (a ^ binary) & (inverted ^ binary) & 0x80 != 0;
    state.flags.set_zero_negative(binary);

    if state.flags.decimal_mode {
        let borrow = 1 - carry_in as i16;
        let decimal = from_bcd(a) as i16 - from_bcd(value) as i16 - borrow;
        state.flags.carry = decimal >= 0;
        state.registers.a = to_bcd(decimal.rem_euclid(100) as u8);
    } else {
        state.flags.carry = sum > 0xFF;
        state.registers.a = binary;
    }
}

/// Compares `register` with `value` as CMP/CPX/CPY do.
///
/// Carry = register >= value; Zero/Negative from the wrapped difference.
pub(crate) fn compare(flags: &mut StatusFlags, register: u8, value: u8) {
    let result = register.wrapping_sub(value);
    flags.carry = register >= value;
    flags.set_zero_negative(result);
}

// ========== ADC / SBC ==========

/// ADC - Add with Carry.
#[derive(Debug)]
pub struct Adc;

static ADC_OPCODES: [OpcodeMetadata; 8] = read_group("ADC", 0x60);

impl Instruction for Adc {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ADC_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        add_with_carry(state, value);
        Ok(())
    }
}

/// SBC - Subtract with Carry.
///
/// Also answers to 0xEB, an undocumented copy of SBC immediate.
#[derive(Debug)]
pub struct Sbc;

static SBC_OPCODES: [OpcodeMetadata; 9] = {
    let group = read_group("SBC", 0xE0);
    [
        group[0],
        group[1],
        group[2],
        group[3],
        group[4],
        group[5],
        group[6],
        group[7],
        OpcodeMetadata::illegal(0xEB, "SBC", AddressingMode::Immediate, 2),
    ]
};

impl Instruction for Sbc {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &SBC_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        subtract_with_carry(state, value);
        Ok(())
    }
}

// ========== Logic ==========

/// AND - Logical AND with the accumulator.
#[derive(Debug)]
pub struct And;

static AND_OPCODES: [OpcodeMetadata; 8] = read_group("AND", 0x20);

impl Instruction for And {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &AND_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        state.registers.a &= value;
        state.flags.set_zero_negative(state.registers.a);
        Ok(())
    }
}

/// ORA - Logical inclusive OR with the accumulator.
#[derive(Debug)]
pub struct Ora;

static ORA_OPCODES: [OpcodeMetadata; 8] = read_group("ORA", 0x00);

impl Instruction for Ora {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ORA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        state.registers.a |= value;
        state.flags.set_zero_negative(state.registers.a);
        Ok(())
    }
}

/// EOR - Exclusive OR with the accumulator.
#[derive(Debug)]
pub struct Eor;

static EOR_OPCODES: [OpcodeMetadata; 8] = read_group("EOR", 0x40);

impl Instruction for Eor {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &EOR_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        state.registers.a ^= value;
        state.flags.set_zero_negative(state.registers.a);
        Ok(())
    }
}

// ========== Compare ==========

/// CMP - Compare accumulator with memory.
#[derive(Debug)]
pub struct Cmp;

static CMP_OPCODES: [OpcodeMetadata; 8] = read_group("CMP", 0xC0);

impl Instruction for Cmp {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &CMP_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        compare(&mut state.flags, state.registers.a, value);
        Ok(())
    }
}

/// CPX - Compare X register with memory.
#[derive(Debug)]
pub struct Cpx;

static CPX_OPCODES: [OpcodeMetadata; 3] = [
    OpcodeMetadata::new(0xE0, "CPX", AddressingMode::Immediate, 2),
    OpcodeMetadata::new(0xE4, "CPX", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::new(0xEC, "CPX", AddressingMode::Absolute, 4),
];

impl Instruction for Cpx {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &CPX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let (value, _) = state.read_operand(mode, operand)?;
        compare(&mut state.flags, state.registers.x, value);
        Ok(())
    }
}

/// CPY - Compare Y register with memory.
#[derive(Debug)]
pub struct Cpy;

static CPY_OPCODES: [OpcodeMetadata; 3] = [
    OpcodeMetadata::new(0xC0, "CPY", AddressingMode::Immediate, 2),
    OpcodeMetadata::new(0xC4, "CPY", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::new(0xCC, "CPY", AddressingMode::Absolute, 4),
];

impl Instruction for Cpy {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &CPY_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let (value, _) = state.read_operand(mode, operand)?;
        compare(&mut state.flags, state.registers.y, value);
        Ok(())
    }
}

/// BIT - Test bits in memory against the accumulator.
///
/// Z = (A & M) == 0, N = M bit 7, V = M bit 6. The accumulator is unchanged.
#[derive(Debug)]
pub struct Bit;

static BIT_OPCODES: [OpcodeMetadata; 2] = [
    OpcodeMetadata::new(0x24, "BIT", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::new(0x2C, "BIT", AddressingMode::Absolute, 4),
];

impl Instruction for Bit {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &BIT_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let (value, _) = state.read_operand(mode, operand)?;
        state.flags.zero = state.registers.a & value == 0;
        state.flags.negative = is_bit_set(value, 7);
        state.flags.overflow = is_bit_set(value, 6);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_equal_zero() {
        let mut flags = StatusFlags::default();
        compare(&mut flags, 0x00, 0x00);
        assert!(flags.zero);
        assert!(!flags.negative);
        assert!(flags.carry);
    }

    #[test]
    fn test_compare_wraps_negative() {
        let mut flags = StatusFlags::default();
        compare(&mut flags, 0x01, 0x80);
        assert!(!flags.carry);
        assert!(flags.negative);
        assert!(!flags.zero);
    }

    #[test]
    fn test_decimal_add_carries_past_99() {
        let mut state = CpuState::default();
        state.flags.decimal_mode = true;
        state.registers.a = 0x58;

        add_with_carry(&mut state, 0x46);

        assert_eq!(state.registers.a, 0x04);
        assert!(state.flags.carry);
    }

    #[test]
    fn test_decimal_subtract_borrows() {
        let mut state = CpuState::default();
        state.flags.decimal_mode = true;
        state.flags.carry = true;
        state.registers.a = 0x12;

        subtract_with_carry(&mut state, 0x21);

        assert_eq!(state.registers.a, 0x91);
        assert!(!state.flags.carry);
    }
}
