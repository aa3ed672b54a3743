//! # Stack Instructions
//!
//! - PHA: Push Accumulator
//! - PHP: Push Processor Status (with B and bit 5 set)
//! - PLA: Pull Accumulator
//! - PLP: Pull Processor Status

use super::Instruction;
use crate::addressing::AddressingMode;
use crate::opcodes::OpcodeMetadata;
use crate::registers::StatusFlags;
use crate::state::CpuState;
use crate::ExecutionError;

/// PHA - Push Accumulator.
#[derive(Debug)]
pub struct Pha;

static PHA_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x48, "PHA", AddressingMode::Implicit, 3)];

impl Instruction for Pha {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &PHA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        let a = state.registers.a;
        state.stack().push(a);
        Ok(())
    }
}

/// PHP - Push Processor Status.
#[derive(Debug)]
pub struct Php;

static PHP_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x08, "PHP", AddressingMode::Implicit, 3)];

impl Instruction for Php {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &PHP_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        let status = state.flags.to_byte() | StatusFlags::BREAK_COMMAND | StatusFlags::UNUSED;
        state.stack().push(status);
        Ok(())
    }
}

/// PLA - Pull Accumulator.
#[derive(Debug)]
pub struct Pla;

static PLA_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x68, "PLA", AddressingMode::Implicit, 4)];

impl Instruction for Pla {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &PLA_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        let value = state.stack().pull();
        state.registers.a = value;
        state.flags.set_zero_negative(value);
        Ok(())
    }
}

/// PLP - Pull Processor Status.
#[derive(Debug)]
pub struct Plp;

static PLP_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x28, "PLP", AddressingMode::Implicit, 4)];

impl Instruction for Plp {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &PLP_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        let status = state.stack().pull();
        state.flags = StatusFlags::from_byte(status);
        Ok(())
    }
}
