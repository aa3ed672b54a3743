//! # Registers and Status Flags
//!
//! The 6502 register file is three 8-bit data registers (A, X, Y), an 8-bit
//! stack pointer and a 16-bit program counter. The status register is kept as
//! seven independent booleans and only packed into a byte when it is pushed,
//! pulled or serialized.

/// The 6502 register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator register
    pub a: u8,

    /// X index register
    pub x: u8,

    /// Y index register
    pub y: u8,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub sp: u8,

    /// Program counter (address of next instruction)
    pub pc: u16,
}

impl Registers {
    /// Register file at power-on: data registers cleared, stack pointer at the
    /// top of page one, PC supplied by the caller (read from the reset vector).
    pub fn power_on(pc: u16) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            sp: 0xFF,
            pc,
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::power_on(0x0000)
    }
}

/// Processor status flags.
///
/// Bit layout when packed (NV-BDIZC):
/// - Bit 7: N (Negative)
/// - Bit 6: V (Overflow)
/// - Bit 5: (unused, always 1)
/// - Bit 4: B (Break)
/// - Bit 3: D (Decimal)
/// - Bit 2: I (Interrupt Disable)
/// - Bit 1: Z (Zero)
/// - Bit 0: C (Carry)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    /// Carry flag (set on unsigned overflow/underflow)
    pub carry: bool,

    /// Zero flag (set if result is zero)
    pub zero: bool,

    /// Interrupt disable flag (blocks software interrupts when set)
    pub interrupt_disable: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub decimal_mode: bool,

    /// Break flag (set when a software interrupt is requested)
    pub break_command: bool,

    /// Overflow flag (set on signed overflow)
    pub overflow: bool,

    /// Negative flag (set if bit 7 of result is 1)
    pub negative: bool,
}

impl StatusFlags {
    pub const CARRY: u8 = 0b0000_0001;
    pub const ZERO: u8 = 0b0000_0010;
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    pub const DECIMAL_MODE: u8 = 0b0000_1000;
    pub const BREAK_COMMAND: u8 = 0b0001_0000;
    pub const UNUSED: u8 = 0b0010_0000;
    pub const OVERFLOW: u8 = 0b0100_0000;
    pub const NEGATIVE: u8 = 0b1000_0000;

    /// Packs the flags into a status byte. Bit 5 is always set.
    ///
    /// # Examples
    ///
    /// ```
    /// use machine6502::StatusFlags;
    ///
    /// let flags = StatusFlags { carry: true, negative: true, ..Default::default() };
    /// assert_eq!(flags.to_byte(), 0b1010_0001);
    /// ```
    pub fn to_byte(&self) -> u8 {
        let mut status = Self::UNUSED;

        if self.negative {
            status |= Self::NEGATIVE;
        }
        if self.overflow {
            status |= Self::OVERFLOW;
        }
        if self.break_command {
            status |= Self::BREAK_COMMAND;
        }
        if self.decimal_mode {
            status |= Self::DECIMAL_MODE;
        }
        if self.interrupt_disable {
            status |= Self::INTERRUPT_DISABLE;
        }
        if self.zero {
            status |= Self::ZERO;
        }
        if self.carry {
            status |= Self::CARRY;
        }

        status
    }

    /// Unpacks all seven flags from a status byte. Bit 5 is ignored.
    pub fn from_byte(status: u8) -> Self {
        Self {
            carry: status & Self::CARRY != 0,
            zero: status & Self::ZERO != 0,
            interrupt_disable: status & Self::INTERRUPT_DISABLE != 0,
            decimal_mode: status & Self::DECIMAL_MODE != 0,
            break_command: status & Self::BREAK_COMMAND != 0,
            overflow: status & Self::OVERFLOW != 0,
            negative: status & Self::NEGATIVE != 0,
        }
    }

    /// Sets Zero and Negative from a result byte.
    pub fn set_zero_negative(&mut self, result: u8) {
        self.zero = result == 0;
        self.negative = result & 0x80 != 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_registers() {
        let regs = Registers::power_on(0x0600);
        assert_eq!(regs.pc, 0x0600);
        assert_eq!(regs.sp, 0xFF);
        assert_eq!((regs.a, regs.x, regs.y), (0, 0, 0));
    }

    #[test]
    fn test_status_byte_round_trip() {
        for byte in 0..=255u8 {
            let packed = StatusFlags::from_byte(byte).to_byte();
            assert_eq!(packed, byte | StatusFlags::UNUSED);
        }
    }

    #[test]
    fn test_empty_flags_pack_to_bit_5() {
        assert_eq!(StatusFlags::default().to_byte(), 0b0010_0000);
    }

    #[test]
    fn test_set_zero_negative() {
        let mut flags = StatusFlags::default();

        flags.set_zero_negative(0x00);
        assert!(flags.zero);
        assert!(!flags.negative);

        flags.set_zero_negative(0x80);
        assert!(!flags.zero);
        assert!(flags.negative);
    }
}
