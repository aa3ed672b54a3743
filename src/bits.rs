//! # Bit Utilities
//!
//! Pure helpers shared by the memory manager and the instruction set: splitting
//! and combining bytes and words, bit tests, single-bit rotations through a
//! carry, packed BCD conversion and page-crossing detection.
//!
//! Nothing in here touches CPU state.

/// Returns the low nibble (bits 0-3) of a byte.
pub fn low_nibble(value: u8) -> u8 {
    value & 0x0F
}

/// Returns the high nibble (bits 4-7) of a byte, shifted down.
pub fn high_nibble(value: u8) -> u8 {
    value >> 4
}

/// Returns the low byte of a word.
pub fn low_byte(value: u16) -> u8 {
    (value & 0xFF) as u8
}

/// Returns the high byte of a word.
pub fn high_byte(value: u16) -> u8 {
    (value >> 8) as u8
}

/// Combines two bytes into a little-endian word.
///
/// # Examples
///
/// ```
/// use machine6502::bits::combine;
///
/// assert_eq!(combine(0x34, 0x12), 0x1234);
/// ```
pub fn combine(low: u8, high: u8) -> u16 {
    u16::from_le_bytes([low, high])
}

/// Returns true if bit `bit` (0-7) of `value` is set.
pub fn is_bit_set(value: u8, bit: u8) -> bool {
    value & (1 << bit) != 0
}

/// Returns `value` with bit `bit` forced to `set`.
pub fn with_bit(value: u8, bit: u8, set: bool) -> u8 {
    if set {
        value | (1 << bit)
    } else {
        value & !(1 << bit)
    }
}

/// Returns true if bit 7 is set.
pub fn is_negative(value: u8) -> bool {
    value & 0x80 != 0
}

/// Shifts left by one, filling bit 0 with `carry_in`.
///
/// Returns the shifted value and the bit shifted out of bit 7.
pub fn rotate_left(value: u8, carry_in: bool) -> (u8, bool) {
    ((value << 1) | carry_in as u8, is_negative(value))
}

/// Shifts right by one, filling bit 7 with `carry_in`.
///
/// Returns the shifted value and the bit shifted out of bit 0.
///
/// # Examples
///
/// ```
/// use machine6502::bits::rotate_right;
///
/// assert_eq!(rotate_right(0b1000_0011, false), (0b0100_0001, true));
/// assert_eq!(rotate_right(0b1000_0010, true), (0b1100_0001, false));
/// ```
pub fn rotate_right(value: u8, carry_in: bool) -> (u8, bool) {
    ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0)
}

/// Decodes a packed BCD byte into its decimal value.
///
/// Digits above 9 are not rejected; `0x1F` decodes as `1 * 10 + 15`.
pub fn from_bcd(value: u8) -> u8 {
    high_nibble(value) * 10 + low_nibble(value)
}

/// Encodes a decimal value (0-99) as a packed BCD byte.
///
/// Values of 100 or more keep only their last two digits.
pub fn to_bcd(value: u8) -> u8 {
    let value = value % 100;
    ((value / 10) << 4) | (value % 10)
}

/// Returns true if `base` and `target` lie on different 256-byte pages.
pub fn page_crossed(base: u16, target: u16) -> bool {
    base & 0xFF00 != target & 0xFF00
}
