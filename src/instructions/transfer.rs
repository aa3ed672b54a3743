//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy one register into another and update
//! Z and N. TXS copies X into SP and leaves the flags alone.

use super::Instruction;
use crate::addressing::AddressingMode;
use crate::opcodes::OpcodeMetadata;
use crate::registers::Registers;
use crate::state::CpuState;
use crate::ExecutionError;

macro_rules! transfer {
    ($(#[$doc:meta])* $name:ident, $table:ident, $mnemonic:literal, $opcode:literal, $from:ident -> $to:ident) => {
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
                let registers: &mut Registers = &mut state.registers;
                registers.$to = registers.$from;
                state.flags.set_zero_negative(state.registers.$to);
                Ok(())
            }
        }
    };
}

transfer!(
    /// TAX - Transfer A to X.
    Tax, TAX_OPCODES, "TAX", 0xAA, a -> x
);
transfer!(
    /// TAY - Transfer A to Y.
    Tay, TAY_OPCODES, "TAY", 0xA8, a -> y
);
transfer!(
    /// TXA - Transfer X to A.
    Txa, TXA_OPCODES, "TXA", 0x8A, x -> a
);
transfer!(
    /// TYA - Transfer Y to A.
    Tya, TYA_OPCODES, "TYA", 0x98, y -> a
);
transfer!(
    /// TSX - Transfer SP to X.
    Tsx, TSX_OPCODES, "TSX", 0xBA, sp -> x
);

/// TXS - Transfer X to SP.
#[derive(Debug)]
pub struct Txs;

static TXS_OPCODES: [OpcodeMetadata; 1] =
    [OpcodeMetadata::new(0x9A, "TXS", AddressingMode::Implicit, 2)];

impl Instruction for Txs {
    fn opcodes(&self) -> &'static [OpcodeMetadata] {
        &TXS_OPCODES
    }

    fn execute(&self, state: &mut CpuState, _operand: u16) -> Result<(), ExecutionError> {
        state.registers.sp = state.registers.x;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_sets_flags() {
        let mut state = CpuState::default();
        state.registers.a = 0x80;

        Tax.execute(&mut state, 0).unwrap();

        assert_eq!(state.registers.x, 0x80);
        assert!(state.flags.negative);
        assert!(!state.flags.zero);
    }

    #[test]
    fn test_txs_leaves_flags() {
        let mut state = CpuState::default();
        state.registers.x = 0x00;

        Txs.execute(&mut state, 0).unwrap();

        assert_eq!(state.registers.sp, 0x00);
        assert!(!state.flags.zero);
    }
}
