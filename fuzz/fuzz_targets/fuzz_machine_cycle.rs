//! Fuzz target for cycle-stepped execution.
//!
//! Builds an arbitrary register/flag state and memory contents, then runs the
//! machine for a bounded number of cycles looking for panics and broken
//! cycle bookkeeping.

#![no_main]

use arbitrary::Arbitrary;
use machine6502::{Machine, Memory, MemoryBus, StatusFlags};
use libfuzzer_sys::fuzz_target;

/// Arbitrary register and latch state
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Packed NV1BDIZC byte
    status: u8,
    hardware_interrupt: bool,
    software_interrupt: bool,
}

/// Memory regions the fuzzer controls
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Code at the reset target 0x8000
    program: [u8; 64],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Data page at 0x4000 for absolute addressing
    data_page: [u8; 256],
    /// Hardware interrupt vector target
    irq_vector: u16,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    cycles: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = Memory::new();
    memory.write_slice(0x0000, &input.memory.zero_page);
    memory.write_slice(0x0100, &input.memory.stack_page);
    memory.write_slice(0x4000, &input.memory.data_page);
    memory.write_slice(0x8000, &input.memory.program);
    memory.write_slice(0xFFFA, &input.memory.irq_vector.to_le_bytes());

    // Reset/software vector at 0x8000
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x80);

    let mut machine = Machine::with_memory(memory);
    {
        let state = machine.state_mut();
        state.registers.a = input.cpu_state.a;
        state.registers.x = input.cpu_state.x;
        state.registers.y = input.cpu_state.y;
        state.registers.sp = input.cpu_state.sp;
        state.flags = StatusFlags::from_byte(input.cpu_state.status);
        state.is_hardware_interrupt = input.cpu_state.hardware_interrupt;
        state.is_software_interrupt = input.cpu_state.software_interrupt;
    }

    for _ in 0..input.cycles {
        let before = machine.state().total_cycles;
        if !machine.cycle() {
            // A stopped machine must stay stopped and untouched
            let frozen = machine.state().clone();
            assert!(!machine.cycle());
            assert_eq!(machine.state(), &frozen);
            break;
        }
        assert_eq!(machine.state().total_cycles, before + 1);
        // No instruction plus interrupt service can exceed this
        assert!(machine.state().cycles_left <= 16);
    }
});
