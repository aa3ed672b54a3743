//! Tests for loads, stores, transfers, increments, flag and stack
//! instructions.

use machine6502::{Machine, MemoryBus, ProgramImage};

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

// ========== Loads and Stores ==========

#[test]
fn test_lda_immediate_flags() {
    let mut machine = setup_machine(&[0xA9, 0x00, 0xA9, 0x80]);

    step(&mut machine);
    assert!(machine.state().flags.zero);

    step(&mut machine);
    assert_eq!(machine.state().registers.a, 0x80);
    assert!(machine.state().flags.negative);
    assert!(!machine.state().flags.zero);
}

#[test]
fn test_ldx_zero_page_y_wraps() {
    // LDX $FF,Y with Y = 2 reads 0x0001
    let mut machine = setup_machine(&[0xB6, 0xFF]);
    machine.state_mut().registers.y = 0x02;
    machine.state_mut().memory.write(0x0001, 0x77);

    assert_eq!(step(&mut machine), 4);
    assert_eq!(machine.state().registers.x, 0x77);
}

#[test]
fn test_ldy_absolute_x_no_cross() {
    let mut machine = setup_machine(&[0xBC, 0x00, 0x20]);
    machine.state_mut().registers.x = 0x10;
    machine.state_mut().memory.write(0x2010, 0x09);

    assert_eq!(step(&mut machine), 4);
    assert_eq!(machine.state().registers.y, 0x09);
}

#[test]
fn test_lda_indexed_indirect() {
    // LDA ($20,X) with X = 4: pointer at 0x24
    let mut machine = setup_machine(&[0xA1, 0x20]);
    {
        let state = machine.state_mut();
        state.registers.x = 0x04;
        state.memory.write(0x24, 0x00);
        state.memory.write(0x25, 0x40);
        state.memory.write(0x4000, 0x5A);
    }

    assert_eq!(step(&mut machine), 6);
    assert_eq!(machine.state().registers.a, 0x5A);
}

#[test]
fn test_lda_indirect_indexed_page_cross() {
    // LDA ($20),Y with pointer 0x40F0 and Y = 0x20
    let mut machine = setup_machine(&[0xB1, 0x20]);
    {
        let state = machine.state_mut();
        state.registers.y = 0x20;
        state.memory.write(0x20, 0xF0);
        state.memory.write(0x21, 0x40);
        state.memory.write(0x4110, 0x66);
    }

    assert_eq!(step(&mut machine), 6);
    assert_eq!(machine.state().registers.a, 0x66);
}

#[test]
fn test_store_instructions_leave_flags() {
    // STA $10; STX $11; STY $12
    let mut machine = setup_machine(&[0x85, 0x10, 0x86, 0x11, 0x84, 0x12]);
    {
        let state = machine.state_mut();
        state.registers.a = 0x00;
        state.registers.x = 0x80;
        state.registers.y = 0x7F;
    }

    step(&mut machine);
    step(&mut machine);
    step(&mut machine);

    let state = machine.state();
    assert_eq!(state.memory.read(0x10), 0x00);
    assert_eq!(state.memory.read(0x11), 0x80);
    assert_eq!(state.memory.read(0x12), 0x7F);
    assert!(!state.flags.zero);
    assert!(!state.flags.negative);
}

#[test]
fn test_sta_indirect_indexed_never_pays_penalty() {
    let mut machine = setup_machine(&[0x91, 0x20]);
    {
        let state = machine.state_mut();
        state.registers.a = 0x31;
        state.registers.y = 0x20;
        state.memory.write(0x20, 0xF0);
        state.memory.write(0x21, 0x40);
    }

    assert_eq!(step(&mut machine), 6);
    assert_eq!(machine.state().memory.read(0x4110), 0x31);
}

// ========== Transfers ==========

#[test]
fn test_tax_tay_copy_accumulator() {
    let mut machine = setup_machine(&[0xAA, 0xA8]);
    machine.state_mut().registers.a = 0x90;

    step(&mut machine);
    step(&mut machine);

    let state = machine.state();
    assert_eq!(state.registers.x, 0x90);
    assert_eq!(state.registers.y, 0x90);
    assert!(state.flags.negative);
}

#[test]
fn test_tsx_txs() {
    // TSX; TXS after changing X
    let mut machine = setup_machine(&[0xBA, 0xE8, 0x9A]);

    step(&mut machine);
    assert_eq!(machine.state().registers.x, 0xFF);
    assert!(machine.state().flags.negative);

    // INX wraps to zero, TXS keeps the Zero flag INX produced
    step(&mut machine);
    step(&mut machine);
    assert_eq!(machine.state().registers.sp, 0x00);
    assert!(machine.state().flags.zero);
}

// ========== Increments ==========

#[test]
fn test_inc_dec_memory() {
    // INC $10; DEC $11
    let mut machine = setup_machine(&[0xE6, 0x10, 0xC6, 0x11]);
    machine.state_mut().memory.write(0x10, 0xFF);
    machine.state_mut().memory.write(0x11, 0x00);

    assert_eq!(step(&mut machine), 5);
    assert_eq!(machine.state().memory.read(0x10), 0x00);
    assert!(machine.state().flags.zero);

    step(&mut machine);
    assert_eq!(machine.state().memory.read(0x11), 0xFF);
    assert!(machine.state().flags.negative);
}

#[test]
fn test_register_increments() {
    // INX; INY; DEY; DEY
    let mut machine = setup_machine(&[0xE8, 0xC8, 0x88, 0x88]);

    for _ in 0..4 {
        assert_eq!(step(&mut machine), 2);
    }

    assert_eq!(machine.state().registers.x, 0x01);
    assert_eq!(machine.state().registers.y, 0xFF);
}

// ========== Flags ==========

#[test]
fn test_flag_instructions() {
    // SEC; SED; SEI; CLC; CLD; CLI
    let mut machine = setup_machine(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58]);

    for _ in 0..3 {
        step(&mut machine);
    }
    let flags = machine.state().flags;
    assert!(flags.carry && flags.decimal_mode && flags.interrupt_disable);

    for _ in 0..3 {
        step(&mut machine);
    }
    let flags = machine.state().flags;
    assert!(!flags.carry && !flags.decimal_mode && !flags.interrupt_disable);
}

#[test]
fn test_clv() {
    let mut machine = setup_machine(&[0xB8]);
    machine.state_mut().flags.overflow = true;

    step(&mut machine);

    assert!(!machine.state().flags.overflow);
}

// ========== Stack ==========

#[test]
fn test_pha_pla_round_trip() {
    // PHA; LDA #$00; PLA
    let mut machine = setup_machine(&[0x48, 0xA9, 0x00, 0x68]);
    machine.state_mut().registers.a = 0x84;

    assert_eq!(step(&mut machine), 3);
    assert_eq!(machine.state().registers.sp, 0xFE);
    assert_eq!(machine.state().memory.read(0x01FF), 0x84);

    step(&mut machine);
    assert_eq!(step(&mut machine), 4);

    assert_eq!(machine.state().registers.a, 0x84);
    assert_eq!(machine.state().registers.sp, 0xFF);
    assert!(machine.state().flags.negative);
}

#[test]
fn test_php_plp() {
    // PHP; CLC; PLP
    let mut machine = setup_machine(&[0x08, 0x18, 0x28]);
    machine.state_mut().flags.carry = true;
    machine.state_mut().flags.negative = true;

    step(&mut machine);
    assert_eq!(machine.state().memory.read(0x01FF), 0xB1);

    step(&mut machine);
    assert!(!machine.state().flags.carry);

    step(&mut machine);
    let flags = machine.state().flags;
    assert!(flags.carry);
    assert!(flags.negative);
    assert!(flags.break_command);
}

#[test]
fn test_push_at_bottom_of_stack_wraps() {
    let mut machine = setup_machine(&[0x48]);
    machine.state_mut().registers.sp = 0x00;
    machine.state_mut().registers.a = 0x05;

    step(&mut machine);

    assert_eq!(machine.state().memory.read(0x0100), 0x05);
    assert_eq!(machine.state().registers.sp, 0xFF);
}
