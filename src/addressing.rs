//! # Addressing Modes
//!
//! The 13 NMOS addressing modes. A mode fixes how many operand bytes the
//! decoder fetches and which `MemoryBus` access the instruction makes.

/// How an instruction locates its operand.
///
/// | Operand bytes | Modes |
/// |---|---|
/// | 0 | `Implicit`, `Accumulator` |
/// | 1 | `Immediate`, `ZeroPage`, `ZeroPageX`, `ZeroPageY`, `Relative`, `IndirectX`, `IndirectY` |
/// | 2 | `Absolute`, `AbsoluteX`, `AbsoluteY`, `Indirect` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// `CLC`, `RTS`: the opcode says everything.
    Implicit,

    /// `ASL A`: the accumulator is both source and destination.
    Accumulator,

    /// `LDA #$10`: the operand byte is the value.
    Immediate,

    /// `LDA $80`
    ZeroPage,

    /// `LDA $80,X`, wrapped to stay inside page zero.
    ZeroPageX,

    /// `LDX $80,Y`, wrapped to stay inside page zero.
    ZeroPageY,

    /// Branch offset, signed, counted from the byte after the branch.
    Relative,

    /// `JMP $1234`
    Absolute,

    /// `LDA $1234,X`. Reads pay a cycle when X carries into the high byte.
    AbsoluteX,

    /// `LDA $1234,Y`. Reads pay a cycle when Y carries into the high byte.
    AbsoluteY,

    /// `JMP ($1234)`, the only user.
    Indirect,

    /// `LDA ($40,X)`: pointer at `$40 + X` in page zero.
    IndirectX,

    /// `LDA ($40),Y`: pointer at `$40`, then `+ Y`, which may cross a page.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Total instruction length in bytes, opcode included.
    pub const fn size_bytes(self) -> u8 {
        self.operand_bytes() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_sizes() {
        assert_eq!(AddressingMode::Implicit.size_bytes(), 1);
        assert_eq!(AddressingMode::Accumulator.size_bytes(), 1);
        assert_eq!(AddressingMode::Relative.size_bytes(), 2);
        assert_eq!(AddressingMode::IndirectY.size_bytes(), 2);
        assert_eq!(AddressingMode::Indirect.size_bytes(), 3);
        assert_eq!(AddressingMode::AbsoluteX.size_bytes(), 3);
    }
}
