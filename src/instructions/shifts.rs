//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! All four operate on the accumulator or read-modify-write a memory
//! location. Indexed forms never take a page-crossing penalty.

use super::{shift_group, Instruction};
use crate::bits;
use crate::opcodes::OpcodeMetadata;
use crate::registers::StatusFlags;
use crate::state::CpuState;
use crate::ExecutionError;

/// Shifts left; bit 7 goes to Carry and bit 0 becomes 0.
pub(crate) fn shift_left(flags: &mut StatusFlags, value: u8) -> u8 {
    let (result, carry) = bits::rotate_left(value, false);
    flags.carry = carry;
    flags.set_zero_negative(result);
    result
}

/// Shifts right; bit 0 goes to Carry and bit 7 becomes 0.
pub(crate) fn shift_right(flags: &mut StatusFlags, value: u8) -> u8 {
    let (result, carry) = bits::rotate_right(value, false);
    flags.carry = carry;
    flags.set_zero_negative(result);
    result
}

/// Rotates left through Carry.
pub(crate) fn rotate_left(flags: &mut StatusFlags, value: u8) -> u8 {
    let (result, carry) = bits::rotate_left(value, flags.carry);
    flags.carry = carry;
    flags.set_zero_negative(result);
    result
}

/// Rotates right through Carry.
pub(crate) fn rotate_right(flags: &mut StatusFlags, value: u8) -> u8 {
    let (result, carry) = bits::rotate_right(value, flags.carry);
    flags.carry = carry;
    flags.set_zero_negative(result);
    result
}

/// ASL - Arithmetic Shift Left.
#[derive(Debug)]
pub struct Asl;

static ASL_OPCODES: [OpcodeMetadata; 5] = shift_group("ASL", 0x00);

impl Instruction for Asl {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ASL_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.modify_operand(mode, operand, shift_left)?;
        Ok(())
    }
}

/// LSR - Logical Shift Right.
///
/// N always ends up clear since bit 7 is filled with 0.
#[derive(Debug)]
pub struct Lsr;

static LSR_OPCODES: [OpcodeMetadata; 5] = shift_group("LSR", 0x40);

impl Instruction for Lsr {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &LSR_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.modify_operand(mode, operand, shift_right)?;
        Ok(())
    }
}

/// ROL - Rotate Left.
#[derive(Debug)]
pub struct Rol;

static ROL_OPCODES: [OpcodeMetadata; 5] = shift_group("ROL", 0x20);

impl Instruction for Rol {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ROL_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.modify_operand(mode, operand, rotate_left)?;
        Ok(())
    }
}

/// ROR - Rotate Right.
#[derive(Debug)]
pub struct Ror;

static ROR_OPCODES: [OpcodeMetadata; 5] = shift_group("ROR", 0x60);

impl Instruction for Ror {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &ROR_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.modify_operand(mode, operand, rotate_right)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_left_sets_carry_from_bit_7() {
        let mut flags = StatusFlags::default();
        assert_eq!(shift_left(&mut flags, 0x81), 0x02);
        assert!(flags.carry);
        assert!(!flags.zero);
        assert!(!flags.negative);
    }

    #[test]
    fn test_shift_right_clears_negative() {
        let mut flags = StatusFlags {
            negative: true,
            ..StatusFlags::default()
        };
        assert_eq!(shift_right(&mut flags, 0x01), 0x00);
        assert!(flags.carry);
        assert!(flags.zero);
        assert!(!flags.negative);
    }

    #[test]
    fn test_rotate_uses_carry_in() {
        let mut flags = StatusFlags {
            carry: true,
            ..StatusFlags::default()
        };
        assert_eq!(rotate_left(&mut flags, 0x40), 0x81);
        assert!(!flags.carry);
        assert!(flags.negative);

        flags.carry = true;
        assert_eq!(rotate_right(&mut flags, 0x02), 0x81);
        assert!(!flags.carry);
    }
}
