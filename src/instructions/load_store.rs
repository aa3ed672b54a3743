//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: Load a register from memory, updating Z and N
//! - STA, STX, STY: Store a register to memory, flags untouched
//!
//! Loads pay one extra cycle when an indexed address crosses a page; stores
//! already include that cycle in their base cost.

use super::{read_group, read_with_penalty, Instruction};
use crate::addressing::AddressingMode;
use crate::opcodes::OpcodeMetadata;
use crate::state::CpuState;
use crate::ExecutionError;

// ========== Loads ==========

/// LDA - Load Accumulator.
#[derive(Debug)]
pub struct Lda;

static LDA_OPCODES: [OpcodeMetadata; 8] = read_group("LDA", 0xA0);

impl Instruction for Lda {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &LDA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        state.registers.a = value;
        state.flags.set_zero_negative(value);
        Ok(())
    }
}

/// LDX - Load X Register.
#[derive(Debug)]
pub struct Ldx;

static LDX_OPCODES: [OpcodeMetadata; 5] = [
    OpcodeMetadata::new(0xA2, "LDX", AddressingMode::Immediate, 2),
    OpcodeMetadata::new(0xA6, "LDX", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::new(0xB6, "LDX", AddressingMode::ZeroPageY, 4),
    OpcodeMetadata::new(0xAE, "LDX", AddressingMode::Absolute, 4),
    OpcodeMetadata::new(0xBE, "LDX", AddressingMode::AbsoluteY, 4),
];

impl Instruction for Ldx {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &LDX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        state.registers.x = value;
        state.flags.set_zero_negative(value);
        Ok(())
    }
}

/// LDY - Load Y Register.
#[derive(Debug)]
pub struct Ldy;

static LDY_OPCODES: [OpcodeMetadata; 5] = [
    OpcodeMetadata::new(0xA0, "LDY", AddressingMode::Immediate, 2),
    OpcodeMetadata::new(0xA4, "LDY", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::new(0xB4, "LDY", AddressingMode::ZeroPageX, 4),
    OpcodeMetadata::new(0xAC, "LDY", AddressingMode::Absolute, 4),
    OpcodeMetadata::new(0xBC, "LDY", AddressingMode::AbsoluteX, 4),
];

impl Instruction for Ldy {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &LDY_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let value = read_with_penalty(state, mode, operand)?;
        state.registers.y = value;
        state.flags.set_zero_negative(value);
        Ok(())
    }
}

// ========== Stores ==========

/// STA - Store Accumulator.
#[derive(Debug)]
pub struct Sta;

static STA_OPCODES: [OpcodeMetadata; 7] = [
    OpcodeMetadata::new(0x85, "STA", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::new(0x95, "STA", AddressingMode::ZeroPageX, 4),
    OpcodeMetadata::new(0x8D, "STA", AddressingMode::Absolute, 4),
    OpcodeMetadata::new(0x9D, "STA", AddressingMode::AbsoluteX, 5),
    OpcodeMetadata::new(0x99, "STA", AddressingMode::AbsoluteY, 5),
    OpcodeMetadata::new(0x81, "STA", AddressingMode::IndirectX, 6),
    OpcodeMetadata::new(0x91, "STA", AddressingMode::IndirectY, 6),
];

impl Instruction for Sta {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &STA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.write_operand(mode, operand, state.registers.a)
    }
}

/// STX - Store X Register.
#[derive(Debug)]
pub struct Stx;

static STX_OPCODES: [OpcodeMetadata; 3] = [
    OpcodeMetadata::new(0x86, "STX", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::new(0x96, "STX", AddressingMode::ZeroPageY, 4),
    OpcodeMetadata::new(0x8E, "STX", AddressingMode::Absolute, 4),
];

impl Instruction for Stx {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &STX_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.write_operand(mode, operand, state.registers.x)
    }
}

/// STY - Store Y Register.
#[derive(Debug)]
pub struct Sty;

static STY_OPCODES: [OpcodeMetadata; 3] = [
    OpcodeMetadata::new(0x84, "STY", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::new(0x94, "STY", AddressingMode::ZeroPageX, 4),
    OpcodeMetadata::new(0x8C, "STY", AddressingMode::Absolute, 4),
];

impl Instruction for Sty {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &STY_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        state.write_operand(mode, operand, state.registers.y)
    }
}
