//! Property-based tests for addressing mode calculations.
//!
//! These tests verify that the memory bus resolves every addressing mode
//! correctly, including zero-page wraparound, page boundary crossing and the
//! indirect JMP page bug, and that instructions pay the page-crossing cycle
//! exactly when they should.

use machine6502::{Machine, Memory, MemoryBus, ProgramImage};
use proptest::prelude::*;

fn setup_machine(program: &[u8]) -> Machine {
    let image = ProgramImage::default().build(program).unwrap();
    Machine::from_image(&image).unwrap()
}

fn step(machine: &mut Machine) -> u32 {
    assert!(machine.cycle());
    let mut cycles = 1;
    while machine.state().is_mid_instruction() {
        assert!(machine.cycle());
        cycles += 1;
    }
    cycles
}

// ========== Zero Page ==========

proptest! {
    /// Property: Zero page,X wraps within zero page
    #[test]
    fn prop_zero_page_indexed_wraps(base in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let mut memory = Memory::new();
        let effective = base.wrapping_add(x) as u16;
        memory.write(effective, value);

        prop_assert_eq!(memory.zero_page_indexed_address(base, x), effective);
        prop_assert_eq!(memory.read_zero_page_indexed(base, x), value);
    }

    /// Property: Zero page,X reached through LDA never leaves page zero
    #[test]
    fn prop_lda_zero_page_x(base in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let mut machine = setup_machine(&[0xB5, base]);
        machine.state_mut().registers.x = x;
        machine.state_mut().memory.write(base.wrapping_add(x) as u16, value);

        prop_assert_eq!(step(&mut machine), 4);
        prop_assert_eq!(machine.state().registers.a, value);
    }
}

// ========== Absolute Indexed ==========

proptest! {
    /// Property: Absolute,X reports a crossing exactly when the high byte changes
    #[test]
    fn prop_absolute_indexed_page_crossing(base in any::<u16>(), index in any::<u8>()) {
        let memory = Memory::new();
        let (address, crossed) = memory.absolute_indexed_address(base, index);

        prop_assert_eq!(address, base.wrapping_add(index as u16));
        prop_assert_eq!(crossed, (base & 0xFF00) != (address & 0xFF00));
    }

    /// Property: LDA abs,Y costs 4 cycles plus one on a page crossing
    #[test]
    fn prop_lda_absolute_y_cycles(base in 0x1000u16..0x5000, y in any::<u8>()) {
        let [low, high] = base.to_le_bytes();
        let mut machine = setup_machine(&[0xB9, low, high]);
        machine.state_mut().registers.y = y;

        let crossed = (base & 0xFF00) != (base.wrapping_add(y as u16) & 0xFF00);
        prop_assert_eq!(step(&mut machine), 4 + crossed as u32);
    }

    /// Property: STA abs,X always costs 5 cycles
    #[test]
    fn prop_sta_absolute_x_fixed_cycles(base in 0x1000u16..0x5000, x in any::<u8>(), value in any::<u8>()) {
        let [low, high] = base.to_le_bytes();
        let mut machine = setup_machine(&[0x9D, low, high]);
        machine.state_mut().registers.a = value;
        machine.state_mut().registers.x = x;

        prop_assert_eq!(step(&mut machine), 5);
        prop_assert_eq!(machine.state().memory.read(base + x as u16), value);
    }
}

// ========== Indirect ==========

proptest! {
    /// Property: (zp,X) fetches its pointer from zero page, wrapping
    #[test]
    fn prop_indexed_indirect(zp in any::<u8>(), x in any::<u8>(), target in 0x1000u16..0x5000) {
        let mut memory = Memory::new();
        let pointer = zp.wrapping_add(x);
        memory.write(pointer as u16, target as u8);
        memory.write(pointer.wrapping_add(1) as u16, (target >> 8) as u8);

        prop_assert_eq!(memory.indexed_indirect_address(zp, x), target);
    }

    /// Property: (zp),Y adds Y to the pointer and reports crossings
    #[test]
    fn prop_indirect_indexed(zp in any::<u8>(), y in any::<u8>(), pointer in 0x1000u16..0x5000) {
        let mut memory = Memory::new();
        memory.write(zp as u16, pointer as u8);
        memory.write(zp.wrapping_add(1) as u16, (pointer >> 8) as u8);

        let (address, crossed) = memory.indirect_indexed_address(zp, y);

        prop_assert_eq!(address, pointer + y as u16);
        prop_assert_eq!(crossed, (pointer & 0xFF00) != (address & 0xFF00));
    }

    /// Property: JMP ($xxFF) takes its high byte from the start of the same page
    #[test]
    fn prop_jmp_indirect_page_bug(page in 0x10u8..0x50, low in any::<u8>(), high in any::<u8>()) {
        let pointer = (page as u16) << 8 | 0xFF;
        let mut memory = Memory::new();
        memory.write(pointer, low);
        memory.write((page as u16) << 8, high);
        memory.write(pointer + 1, high.wrapping_add(1));

        prop_assert_eq!(memory.read_indirect_word(pointer), u16::from_le_bytes([low, high]));
    }
}

// ========== Branches ==========

proptest! {
    /// Property: a taken branch lands at PC + 2 + offset
    #[test]
    fn prop_branch_target(offset in any::<i8>()) {
        // BCC with carry clear is always taken
        let mut machine = setup_machine(&[0x90, offset as u8]);

        let cycles = step(&mut machine);

        let origin = 0x0602u16;
        let target = origin.wrapping_add(offset as i16 as u16);
        prop_assert_eq!(machine.state().registers.pc, target);
        let crossed = (origin & 0xFF00) != (target & 0xFF00);
        prop_assert_eq!(cycles, 3 + crossed as u32);
    }

    /// Property: a branch that is not taken always costs 2 cycles
    #[test]
    fn prop_branch_not_taken(offset in any::<u8>()) {
        // BCS with carry clear
        let mut machine = setup_machine(&[0xB0, offset]);

        prop_assert_eq!(step(&mut machine), 2);
        prop_assert_eq!(machine.state().registers.pc, 0x0602);
    }
}
