//! # Flag Instructions
//!
//! Set or clear a single status flag. All are one byte, two cycles.

use super::Instruction;
use crate::addressing::AddressingMode;
use crate::opcodes::OpcodeMetadata;
use crate::registers::StatusFlags;
use crate::state::CpuState;
use crate::ExecutionError;

macro_rules! flag_instruction {
    ($(#[$doc:meta])* $name:ident, $table:ident, $mnemonic:literal, $opcode:literal, $field:ident = $value:literal) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name;

        static $table: [OpcodeMetadata; 1] =
            [OpcodeMetadata::new($opcode, $mnemonic, AddressingMode::Implicit, 2)];

        impl Instruction for $name {
            fn opcodes(&self) -> &'static [OpcodeMetadata] {
                &$table
            }

            fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
                let flags: &mut StatusFlags = &mut state.flags;
                flags.$field = $value;
                Ok(())
            }
        }
    };
}

flag_instruction!(
    /// CLC - Clear Carry.
    Clc, CLC_OPCODES, "CLC", 0x18, carry = false
);
flag_instruction!(
    /// SEC - Set Carry.
    Sec, SEC_OPCODES, "SEC", 0x38, carry = true
);
flag_instruction!(
    /// CLI - Clear Interrupt Disable.
    Cli, CLI_OPCODES, "CLI", 0x58, interrupt_disable = false
);
flag_instruction!(
    /// SEI - Set Interrupt Disable.
    Sei, SEI_OPCODES, "SEI", 0x78, interrupt_disable = true
);
flag_instruction!(
    /// CLD - Clear Decimal Mode.
    Cld, CLD_OPCODES, "CLD", 0xD8, decimal_mode = false
);
flag_instruction!(
    /// SED - Set Decimal Mode.
    Sed, SED_OPCODES, "SED", 0xF8, decimal_mode = true
);
flag_instruction!(
    /// CLV - Clear Overflow. There is no matching set instruction.
    Clv, CLV_OPCODES, "CLV", 0xB8, overflow = false
);
