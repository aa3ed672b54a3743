//! # Increment and Decrement Instructions
//!
//! INC/DEC read-modify-write memory; INX/INY/DEX/DEY work on the index
//! registers. All wrap modulo 256 and update Z and N; Carry is untouched.

use super::Instruction;
use crate::addressing::AddressingMode;
use crate::opcodes::OpcodeMetadata;
use crate::registers::StatusFlags;
use crate::state::CpuState;
use crate::ExecutionError;

pub(crate) fn increment(flags: &mut StatusFlags, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    flags.set_zero_negative(result);
    result
}

pub(crate) fn decrement(flags: &mut StatusFlags, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    flags.set_zero_negative(result);
    result
}

// ========== Memory ==========

/// INC - Increment Memory.
#[derive(Debug)]
pub struct Inc;

static INC_OPCODES: [OpcodeMetadata; 4] = [
    OpcodeMetadata::new(0xE6, "INC", AddressingMode::ZeroPage, 5),
    OpcodeMetadata::new(0xF6, "INC", AddressingMode::ZeroPageX, 6),
    OpcodeMetadata::new(0xEE, "INC", AddressingMode::Absolute, 6),
    OpcodeMetadata::new(0xFE, "INC", AddressingMode::AbsoluteX, 7),
];

impl Instruction for Inc {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &INC_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.modify_operand(mode, operand, increment)?;
        Ok(())
    }
}

/// DEC - Decrement Memory.
#[derive(Debug)]
pub struct Dec;

static DEC_OPCODES: [OpcodeMetadata; 4] = [
    OpcodeMetadata::new(0xC6, "DEC", AddressingMode::ZeroPage, 5),
    OpcodeMetadata::new(0xD6, "DEC", AddressingMode::ZeroPageX, 6),
    OpcodeMetadata::new(0xCE, "DEC", AddressingMode::Absolute, 6),
    OpcodeMetadata::new(0xDE, "DEC", AddressingMode::AbsoluteX, 7),
];

impl Instruction for Dec {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &DEC_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.modify_operand(mode, operand, decrement)?;
        Ok(())
    }
}

// ========== Registers ==========

/// INX - Increment X.
#[derive(Debug)]
pub struct Inx;

static INX_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0xE8, "INX", AddressingMode::Implicit, 2)];

impl Instruction for Inx {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &INX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        state.registers.x = increment(&mut state.flags, state.registers.x);
        Ok(())
    }
}

/// INY - Increment Y.
#[derive(Debug)]
pub struct Iny;

static INY_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0xC8, "INY", AddressingMode::Implicit, 2)];

impl Instruction for Iny {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &INY_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        state.registers.y = increment(&mut state.flags, state.registers.y);
        Ok(())
    }
}

/// DEX - Decrement X.
#[derive(Debug)]
pub struct Dex;

static DEX_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0xCA, "DEX", AddressingMode::Implicit, 2)];

impl Instruction for Dex {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &DEX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        state.registers.x = decrement(&mut state.flags, state.registers.x);
        Ok(())
    }
}

/// DEY - Decrement Y.
#[derive(Debug)]
pub struct Dey;

static DEY_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x88, "DEY", AddressingMode::Implicit, 2)];

impl Instruction for Dey {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &DEY_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        state.registers.y = decrement(&mut state.flags, state.registers.y);
        Ok(())
    }
}
