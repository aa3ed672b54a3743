//! # Control Flow Instructions
//!
//! - BRK: Request a software interrupt
//! - JMP: Jump (absolute or indirect)
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - NOP: No operation, plus the undocumented NOP variants
//!
//! ## BRK
//!
//! BRK does not push anything itself. It sets the B flag and raises the
//! software interrupt latch; the machine services the latch at the next
//! instruction boundary, provided the I flag is clear.
//!
//! ## Interrupt Frames
//!
//! Servicing an interrupt pushes the status byte first and then the return
//! address, high byte first. RTI unwinds that frame in reverse: the return
//! address comes off first, then the status byte.

use super::{read_with_penalty, Instruction};
use crate::addressing::AddressingMode;
use crate::opcodes::OpcodeMetadata;
use crate::registers::StatusFlags;
use crate::state::CpuState;
use crate::ExecutionError;

/// BRK - Force Break.
#[derive(Debug)]
pub struct Brk;

static BRK_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x00, "BRK", AddressingMode::Implicit, 7)];

impl Instruction for Brk {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &BRK_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        log::debug!("BRK at 0x{:04X}", state.registers.pc.wrapping_sub(1));
        state.flags.break_command = true;
        state.is_software_interrupt = true;
        Ok(())
    }
}

/// JMP - Jump.
///
/// The indirect form reproduces the NMOS page-wrap bug: a pointer at
/// `$xxFF` takes its high byte from `$xx00`.
#[derive(Debug)]
pub struct Jmp;

static JMP_OPCODES: [OpcodeMetadata; 2] = [
    OpcodeMetadata::new(0x4C, "JMP", AddressingMode::Absolute, 3),
    OpcodeMetadata::new(0x6C, "JMP", AddressingMode::Indirect, 5),
];

impl Instruction for Jmp {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &JMP_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        let (target, _) = state.effective_address(mode, operand)?;
        state.registers.pc = target;
        Ok(())
    }
}

/// JSR - Jump to Subroutine.
///
/// Pushes the address of the last byte of the JSR (return point minus one).
#[derive(Debug)]
pub struct Jsr;

static JSR_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x20, "JSR", AddressingMode::Absolute, 6)];

impl Instruction for Jsr {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &JSR_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let return_address = state.registers.pc.wrapping_sub(1);
        state.stack().push_word(return_address);
        state.registers.pc = operand;
        Ok(())
    }
}

/// RTS - Return from Subroutine.
#[derive(Debug)]
pub struct Rts;

static RTS_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x60, "RTS", AddressingMode::Implicit, 6)];

impl Instruction for Rts {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &RTS_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        let return_address = state.stack().pull_word();
        state.registers.pc = return_address.wrapping_add(1);
        Ok(())
    }
}

/// RTI - Return from Interrupt.
#[derive(Debug)]
pub struct Rti;

static RTI_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x40, "RTI", AddressingMode::Implicit, 6)];

impl Instruction for Rti {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &RTI_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        let mut stack = state.stack();
        let pc = stack.pull_word();
        let status = stack.pull();

        state.registers.pc = pc;
        state.flags = StatusFlags::from_byte(status);
        Ok(())
    }
}

/// NOP - No Operation.
///
/// Besides the documented 0xEA this covers the undocumented NOPs, which
/// still perform their operand read and pay the page-crossing cycle on
/// absolute,X.
#[derive(Debug)]
pub struct Nop;

static NOP_OPCODES: [OpcodeMetadata; 28] = [
    OpcodeMetadata::new(0xEA, "NOP", AddressingMode::Implicit, 2),
    // Implied
    OpcodeMetadata::illegal(0x1A, "NOP", AddressingMode::Implicit, 2),
    OpcodeMetadata::illegal(0x3A, "NOP", AddressingMode::Implicit, 2),
    OpcodeMetadata::illegal(0x5A, "NOP", AddressingMode::Implicit, 2),
    OpcodeMetadata::illegal(0x7A, "NOP", AddressingMode::Implicit, 2),
    OpcodeMetadata::illegal(0xDA, "NOP", AddressingMode::Implicit, 2),
    OpcodeMetadata::illegal(0xFA, "NOP", AddressingMode::Implicit, 2),
    // Immediate
    OpcodeMetadata::illegal(0x80, "NOP", AddressingMode::Immediate, 2),
    OpcodeMetadata::illegal(0x82, "NOP", AddressingMode::Immediate, 2),
    OpcodeMetadata::illegal(0x89, "NOP", AddressingMode::Immediate, 2),
    OpcodeMetadata::illegal(0xC2, "NOP", AddressingMode::Immediate, 2),
    OpcodeMetadata::illegal(0xE2, "NOP", AddressingMode::Immediate, 2),
    // Zero page
    OpcodeMetadata::illegal(0x04, "NOP", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::illegal(0x44, "NOP", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::illegal(0x64, "NOP", AddressingMode::ZeroPage, 3),
    OpcodeMetadata::illegal(0x14, "NOP", AddressingMode::ZeroPageX, 4),
    OpcodeMetadata::illegal(0x34, "NOP", AddressingMode::ZeroPageX, 4),
    OpcodeMetadata::illegal(0x54, "NOP", AddressingMode::ZeroPageX, 4),
    OpcodeMetadata::illegal(0x74, "NOP", AddressingMode::ZeroPageX, 4),
    OpcodeMetadata::illegal(0xD4, "NOP", AddressingMode::ZeroPageX, 4),
    OpcodeMetadata::illegal(0xF4, "NOP", AddressingMode::ZeroPageX, 4),
    // Absolute
    OpcodeMetadata::illegal(0x0C, "NOP", AddressingMode::Absolute, 4),
    OpcodeMetadata::illegal(0x1C, "NOP", AddressingMode::AbsoluteX, 4),
    OpcodeMetadata::illegal(0x3C, "NOP", AddressingMode::AbsoluteX, 4),
    OpcodeMetadata::illegal(0x5C, "NOP", AddressingMode::AbsoluteX, 4),
    OpcodeMetadata::illegal(0x7C, "NOP", AddressingMode::AbsoluteX, 4),
    OpcodeMetadata::illegal(0xDC, "NOP", AddressingMode::AbsoluteX, 4),
    OpcodeMetadata::illegal(0xFC, "NOP", AddressingMode::AbsoluteX, 4),
];

impl Instruction for Nop {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &NOP_OPCODES
    }

    fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
        let mode = self.addressing_mode(state)?;
        if mode != AddressingMode::Implicit {
            read_with_penalty(state, mode, operand)?;
        }
        Ok(())
    }
}
