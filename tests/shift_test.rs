//! Tests for ASL, LSR, ROL and ROR on the accumulator and memory.

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

#[test]
fn test_asl_accumulator() {
    let mut machine = setup_machine(&[0x0A]);
    machine.state_mut().registers.a = 0x81;

    assert_eq!(step(&mut machine), 2);

    assert_eq!(machine.state().registers.a, 0x02);
    assert!(machine.state().flags.carry);
    assert!(!machine.state().flags.negative);
    assert_eq!(machine.state().registers.pc, 0x0601);
}

#[test]
fn test_asl_zero_page() {
    let mut machine = setup_machine(&[0x06, 0x10]);
    machine.state_mut().memory.write(0x10, 0x40);

    assert_eq!(step(&mut machine), 5);

    assert_eq!(machine.state().memory.read(0x10), 0x80);
    assert!(machine.state().flags.negative);
    assert!(!machine.state().flags.carry);
}

#[test]
fn test_lsr_to_zero() {
    let mut machine = setup_machine(&[0x4A]);
    machine.state_mut().registers.a = 0x01;

    step(&mut machine);

    assert_eq!(machine.state().registers.a, 0x00);
    assert!(machine.state().flags.carry);
    assert!(machine.state().flags.zero);
}

#[test]
fn test_rol_carry_in_and_out() {
    let mut machine = setup_machine(&[0x2A]);
    machine.state_mut().registers.a = 0x80;
    machine.state_mut().flags.carry = true;

    step(&mut machine);

    assert_eq!(machine.state().registers.a, 0x01);
    assert!(machine.state().flags.carry);
}

#[test]
fn test_ror_accumulator() {
    let mut machine = setup_machine(&[0x6A]);
    machine.state_mut().registers.a = 0x01;
    machine.state_mut().flags.carry = true;

    step(&mut machine);

    assert_eq!(machine.state().registers.a, 0x80);
    assert!(machine.state().flags.carry);
    assert!(machine.state().flags.negative);
}

#[test]
fn test_ror_absolute_x_never_pays_penalty() {
    // ROR $12F0,X crossing into 0x13
    let mut machine = setup_machine(&[0x7E, 0xF0, 0x12]);
    machine.state_mut().registers.x = 0x20;
    machine.state_mut().memory.write(0x1310, 0x02);

    assert_eq!(step(&mut machine), 7);
    assert_eq!(machine.state().memory.read(0x1310), 0x01);
    assert!(!machine.state().flags.carry);
}
