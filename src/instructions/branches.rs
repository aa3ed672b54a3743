//! # Branch Instructions
//!
//! Conditional relative branches. Each tests one status flag and, when the
//! condition holds, adds the signed 8-bit offset to PC (which already points
//! at the next instruction).
//!
//! ## Cycle Timing
//!
//! - Not taken: 2 cycles
//! - Taken, same page: 3 cycles
//! - Taken, page crossed: 4 cycles

use super::Instruction;
use crate::addressing::AddressingMode;
use crate::bits::page_crossed;
use crate::opcodes::OpcodeMetadata;
use crate::registers::StatusFlags;
use crate::state::CpuState;
use crate::ExecutionError;

/// Takes the branch if `condition` holds, charging the taken and
/// page-crossing penalties.
fn branch_if(state: &mut CpuState, condition: bool, operand: u16) {
    if !condition {
        return;
    }

    let offset = operand as u8 as i8;
    let origin = state.registers.pc;
    let target = origin.wrapping_add(offset as i16 as u16);

    state.increment_cycles(1);
    if page_crossed(origin, target) {
        state.increment_cycles(1);
    }

    log::trace!("branch taken: 0x{:04X} -> 0x{:04X}", origin, target);
    state.registers.pc = target;
}

macro_rules! branch {
    ($(#[$doc:meta])* $name:ident, $table:ident, $mnemonic:literal, $opcode:literal, $condition:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name;

        static $table: [OpcodeMetadata; 1] =
            [OpcodeMetadata::new($opcode, $mnemonic, AddressingMode::Relative, 2)];

        impl Instruction for $name {
            fn opcodes(&self) -> &'static [OpcodeMetadata] {
                &$table
            }

            fn execute(&self, state: &mut CpuState, operand: u16) -> Result<(), ExecutionError> {
                let condition: fn(&StatusFlags) -> bool = $condition;
                branch_if(state, condition(&state.flags), operand);
                Ok(())
            }
        }
    };
}

branch!(
    /// BCC - Branch if Carry Clear.
    Bcc, BCC_OPCODES, "BCC", 0x90, |flags| !flags.carry
);
branch!(
    /// BCS - Branch if Carry Set.
    Bcs, BCS_OPCODES, "BCS", 0xB0, |flags| flags.carry
);
branch!(
    /// BEQ - Branch if Equal (Z set).
    Beq, BEQ_OPCODES, "BEQ", 0xF0, |flags| flags.zero
);
branch!(
    /// BNE - Branch if Not Equal (Z clear).
    Bne, BNE_OPCODES, "BNE", 0xD0, |flags| !flags.zero
);
branch!(
    /// BMI - Branch if Minus.
    Bmi, BMI_OPCODES, "BMI", 0x30, |flags| flags.negative
);
branch!(
    /// BPL - Branch if Plus.
    Bpl, BPL_OPCODES, "BPL", 0x10, |flags| !flags.negative
);
branch!(
    /// BVC - Branch if Overflow Clear.
    Bvc, BVC_OPCODES, "BVC", 0x50, |flags| !flags.overflow
);
branch!(
    /// BVS - Branch if Overflow Set.
    Bvs, BVS_OPCODES, "BVS", 0x70, |flags| flags.overflow
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_taken_leaves_pc() {
        let mut state = CpuState::default();
        state.registers.pc = 0x0602;
        state.flags.zero = true;

        Bne.execute(&mut state, 0x10).unwrap();

        assert_eq!(state.registers.pc, 0x0602);
        assert_eq!(state.cycles_left, 0);
    }

    #[test]
    fn test_taken_backwards_same_page() {
        let mut state = CpuState::default();
        state.registers.pc = 0x0610;

        Bne.execute(&mut state, 0xFC).unwrap();

        assert_eq!(state.registers.pc, 0x060C);
        assert_eq!(state.cycles_left, 1);
    }

    #[test]
    fn test_taken_across_page() {
        let mut state = CpuState::default();
        state.registers.pc = 0x06F0;
        state.flags.carry = true;

        Bcs.execute(&mut state, 0x20).unwrap();

        assert_eq!(state.registers.pc, 0x0710);
        assert_eq!(state.cycles_left, 2);
    }
}
