//! # Instruction Decoder
//!
//! Maps the opcode byte at PC to the instruction that implements it and
//! fetches its operand. The 256-entry lookup table is built once from
//! [`INSTRUCTION_SET`] when the decoder is created.
//!
//! Decoding has no side effects: it neither moves PC nor touches the cycle
//! budget. The machine does both after a successful decode.

use std::fmt;

use crate::addressing::AddressingMode;
use crate::bits::combine;
use crate::instructions::{Instruction, INSTRUCTION_SET};
use crate::memory::MemoryBus;
use crate::opcodes::OpcodeMetadata;
use crate::state::CpuState;
use crate::ExecutionError;

/// One fetched instruction, ready to execute.
#[derive(Debug, Clone, Copy)]
pub struct DecodedInstruction {
    /// Address the opcode was fetched from.
    pub address: u16,

    /// Metadata of the fetched opcode.
    pub metadata: OpcodeMetadata,

    /// Raw operand: 0 for one-byte instructions, the byte at PC+1 for
    /// two-byte ones, the little-endian word at PC+1 for three-byte ones.
    pub operand: u16,

    /// The instruction that will execute it.
    pub instruction: &'static dyn Instruction,
}

impl DecodedInstruction {
    /// Runs the instruction against `state`.
    pub fn execute(&self, state: &mut CpuState) -> Result<(), ExecutionError> {
        self.instruction.execute(state, self.operand)
    }
}

impl fmt::Display for DecodedInstruction {
    /// Formats as assembly text, e.g. `LDA #$03` or `STA ($20),Y`.
    ///
    /// Branches show their offset relative to the branch itself
    /// (`BNE *-$04`) since the displayed address is not known to the reader.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AddressingMode::*;

        let mnemonic = self.metadata.mnemonic;
        let byte = self.operand as u8;
        let word = self.operand;

        match self.metadata.addressing_mode {
            Implicit => write!(f, "{}", mnemonic),
            Accumulator => write!(f, "{} A", mnemonic),
            Immediate => write!(f, "{} #${:02X}", mnemonic, byte),
            ZeroPage => write!(f, "{} ${:02X}", mnemonic, byte),
            ZeroPageX => write!(f, "{} ${:02X},X", mnemonic, byte),
            ZeroPageY => write!(f, "{} ${:02X},Y", mnemonic, byte),
            Absolute => write!(f, "{} ${:04X}", mnemonic, word),
            AbsoluteX => write!(f, "{} ${:04X},X", mnemonic, word),
            AbsoluteY => write!(f, "{} ${:04X},Y", mnemonic, word),
            Indirect => write!(f, "{} (${:04X})", mnemonic, word),
            IndirectX => write!(f, "{} (${:02X},X)", mnemonic, byte),
            IndirectY => write!(f, "{} (${:02X}),Y", mnemonic, byte),
            Relative => {
                // Offset counts from the byte after the branch
                let offset = byte as i8 as i16 + 2;
                let sign = if offset < 0 { '-' } else { '+' };
                write!(f, "{} *{}${:02X}", mnemonic, sign, offset.unsigned_abs())
            }
        }
    }
}

/// Opcode lookup table.
///
/// # Examples
///
/// ```
/// use machine6502::{CpuState, Decoder, Memory, MemoryBus};
///
/// let mut memory = Memory::new();
/// memory.write_slice(0x0600, &[0x8D, 0x00, 0x02]);
/// memory.write(0xFFFE, 0x00);
/// memory.write(0xFFFF, 0x06);
///
/// let state = CpuState::new(memory);
/// let decoded = Decoder::new().decode(&state).unwrap();
///
/// assert_eq!(decoded.operand, 0x0200);
/// assert_eq!(decoded.to_string(), "STA $0200");
/// ```
pub struct Decoder {
    table: [Option<&'static dyn Instruction>; 256],
}

impl Decoder {
    /// Indexes every opcode declared in [`INSTRUCTION_SET`].
    pub fn new() -> Self {
        let mut table: [Option<&'static dyn Instruction>; 256] = [None; 256];

        for &instruction in INSTRUCTION_SET {
            for meta in instruction.opcodes() {
                table[meta.opcode as usize] = Some(instruction);
            }
        }

        Self { table }
    }

    /// Returns the instruction that declares `opcode`, if any.
    pub fn instruction(&self, opcode: u8) -> Option<&'static dyn Instruction> {
        self.table[opcode as usize]
    }

    /// Returns the metadata for `opcode`, or `None` for undeclared (JAM)
    /// opcodes.
    pub fn metadata(&self, opcode: u8) -> Option<OpcodeMetadata> {
        self.instruction(opcode)?.gather_information(opcode).ok()
    }

    /// Decodes the instruction at PC.
    ///
    /// # Errors
    ///
    /// `ExecutionError::UnknownOpcode` if no instruction declares the byte at PC.
    pub fn decode(&self, state: &CpuState) -> Result<DecodedInstruction, ExecutionError> {
        let address = state.registers.pc;
        let opcode = state.memory.read(address);

        let instruction = self
            .instruction(opcode)
            .ok_or(ExecutionError::UnknownOpcode(opcode))?;
        let metadata = instruction.gather_information(opcode)?;

        let operand = match metadata.size_bytes {
            0 | 1 => 0,
            2 => state.memory.read(address.wrapping_add(1)) as u16,
            _ => combine(
                state.memory.read(address.wrapping_add(1)),
                state.memory.read(address.wrapping_add(2)),
            ),
        };

        Ok(DecodedInstruction {
            address,
            metadata,
            operand,
            instruction,
        })
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let declared = self.table.iter().filter(|entry| entry.is_some()).count();
        f.debug_struct("Decoder")
            .field("declared_opcodes", &declared)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;

    fn state_with(bytes: &[u8]) -> CpuState {
        let mut memory = Memory::new();
        memory.write_slice(0x0600, bytes);
        let mut state = CpuState::new(memory);
        state.registers.pc = 0x0600;
        state
    }

    #[test]
    fn test_decode_sizes_operand_by_length() {
        let decoder = Decoder::new();

        let implied = decoder.decode(&state_with(&[0xE8, 0xFF, 0xFF])).unwrap();
        assert_eq!(implied.operand, 0);

        let immediate = decoder.decode(&state_with(&[0xA9, 0x03, 0xFF])).unwrap();
        assert_eq!(immediate.operand, 0x03);
        assert_eq!(immediate.metadata.mnemonic, "LDA");

        let absolute = decoder.decode(&state_with(&[0x4C, 0x08, 0x06])).unwrap();
        assert_eq!(absolute.operand, 0x0608);
    }

    #[test]
    fn test_decode_has_no_side_effects() {
        let decoder = Decoder::new();
        let state = state_with(&[0xA9, 0x03]);
        let before = state.clone();

        decoder.decode(&state).unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn test_jam_is_unknown() {
        let decoder = Decoder::new();
        assert_eq!(
            decoder.decode(&state_with(&[0x02])).unwrap_err(),
            ExecutionError::UnknownOpcode(0x02)
        );
        assert!(decoder.metadata(0x02).is_none());
    }

    #[test]
    fn test_operand_fetch_wraps_at_top_of_memory() {
        let decoder = Decoder::new();
        let mut state = CpuState::default();
        state.memory.write(0xFFFF, 0xAD);
        state.memory.write(0x0000, 0x34);
        state.memory.write(0x0001, 0x12);
        state.registers.pc = 0xFFFF;

        let decoded = decoder.decode(&state).unwrap();
        assert_eq!(decoded.operand, 0x1234);
    }

    #[test]
    fn test_display() {
        let decoder = Decoder::new();
        let text = |bytes: &[u8]| decoder.decode(&state_with(bytes)).unwrap().to_string();

        assert_eq!(text(&[0xA9, 0x03]), "LDA #$03");
        assert_eq!(text(&[0x9D, 0x00, 0x02]), "STA $0200,X");
        assert_eq!(text(&[0x6C, 0x34, 0x12]), "JMP ($1234)");
        assert_eq!(text(&[0x0A]), "ASL A");
        assert_eq!(text(&[0xB1, 0x20]), "LDA ($20),Y");
        assert_eq!(text(&[0xD0, 0x03]), "BNE *+$05");
        assert_eq!(text(&[0xD0, 0xFA]), "BNE *-$04");
    }
}
