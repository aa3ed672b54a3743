//! Tests for opcode decoding and instruction display.

use machine6502::{
    AddressingMode, CpuState, Decoder, ExecutionError, Memory, MemoryBus, INSTRUCTION_SET,
};

/// State with `bytes` at `address` and PC pointing at them
fn state_with(address: u16, bytes: &[u8]) -> CpuState {
    let mut state = CpuState::new(Memory::new());
    for (offset, &byte) in bytes.iter().enumerate() {
        state.memory.write(address.wrapping_add(offset as u16), byte);
    }
    state.registers.pc = address;
    state
}

#[test]
fn test_every_declared_opcode_decodes_to_its_metadata() {
    let decoder = Decoder::new();

    for instruction in INSTRUCTION_SET {
        for meta in instruction.opcodes() {
            let state = state_with(0x0600, &[meta.opcode, 0x34, 0x12]);
            let decoded = decoder.decode(&state).unwrap();

            assert_eq!(decoded.metadata, *meta);
            assert_eq!(decoded.address, 0x0600);

            let expected_operand = match meta.size_bytes {
                1 => 0x0000,
                2 => 0x0034,
                _ => 0x1234,
            };
            assert_eq!(decoded.operand, expected_operand, "{}", meta.mnemonic);
        }
    }
}

#[test]
fn test_decode_does_not_touch_state() {
    let state = state_with(0x0600, &[0xA9, 0x03]);
    let before = state.clone();

    Decoder::new().decode(&state).unwrap();

    assert_eq!(state, before);
}

#[test]
fn test_unknown_opcode() {
    let state = state_with(0x0600, &[0xF2]);

    assert_eq!(
        Decoder::new().decode(&state).map(|decoded| decoded.metadata),
        Err(ExecutionError::UnknownOpcode(0xF2))
    );
    assert!(Decoder::new().metadata(0xF2).is_none());
}

#[test]
fn test_operand_fetch_wraps_at_end_of_memory() {
    // JMP at 0xFFFE: operand bytes at 0xFFFF and 0x0000
    let mut state = state_with(0xFFFE, &[0x4C, 0x34]);
    state.memory.write(0x0000, 0x12);

    let decoded = Decoder::new().decode(&state).unwrap();

    assert_eq!(decoded.operand, 0x1234);
}

#[test]
fn test_display_formats() {
    let decoder = Decoder::new();
    let cases: [(&[u8], &str); 8] = [
        (&[0xEA], "NOP"),
        (&[0x0A], "ASL A"),
        (&[0xB5, 0x10], "LDA $10,X"),
        (&[0xB6, 0x10], "LDX $10,Y"),
        (&[0xBD, 0x00, 0x20], "LDA $2000,X"),
        (&[0xA1, 0x20], "LDA ($20,X)"),
        (&[0xA7, 0x10], "LAX $10"),
        (&[0xF0, 0x00], "BEQ *+$02"),
    ];

    for (bytes, expected) in cases {
        let decoded = decoder.decode(&state_with(0x0600, bytes)).unwrap();
        assert_eq!(decoded.to_string(), expected);
    }
}

#[test]
fn test_undocumented_opcodes_are_flagged() {
    let decoder = Decoder::new();

    assert!(!decoder.metadata(0xA9).unwrap().illegal);
    assert!(decoder.metadata(0xA7).unwrap().illegal);
    assert!(decoder.metadata(0xEB).unwrap().illegal);
    assert_eq!(
        decoder.metadata(0x9B).unwrap().addressing_mode,
        AddressingMode::AbsoluteY
    );
}
