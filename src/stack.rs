//! # Stack Manager
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows
//! downward. The stack pointer (SP) is an 8-bit register that serves as an
//! offset into this page; the full stack address is `0x0100 | SP`.
//!
//! Push writes first and then decrements SP; pull increments SP first and then
//! reads. Both wrap modulo 256 with no overflow detection, exactly like the
//! hardware.
//!
//! 16-bit values go on the stack high byte first, so they come back off low
//! byte first.

use crate::bits::{combine, high_byte, low_byte};
use crate::memory::{Memory, MemoryBus};
use crate::STACK_BASE;

/// A stack view borrowing memory and the stack pointer for the duration of
/// one operation.
///
/// # Examples
///
/// ```
/// use machine6502::{Memory, MemoryBus, Stack};
///
/// let mut memory = Memory::new();
/// let mut sp = 0x00;
///
/// Stack::new(&mut memory, &mut sp).push(0x05);
/// assert_eq!(sp, 0xFF);
/// assert_eq!(memory.read(0x0100), 0x05);
///
/// assert_eq!(Stack::new(&mut memory, &mut sp).pull(), 0x05);
/// assert_eq!(sp, 0x00);
/// ```
pub struct Stack<'a> {
    memory: &'a mut Memory,
    sp: &'a mut u8,
}

impl<'a> Stack<'a> {
    pub fn new(memory: &'a mut Memory, sp: &'a mut u8) -> Self {
        Self { memory, sp }
    }

    fn top(&self) -> u16 {
        STACK_BASE | *self.sp as u16
    }

    /// Writes `value` at `0x0100 | SP`, then decrements SP.
    pub fn push(&mut self, value: u8) {
        let addr = self.top();
        self.memory.write(addr, value);
        *self.sp = self.sp.wrapping_sub(1);
    }

    /// Increments SP, then reads from `0x0100 | SP`.
    pub fn pull(&mut self) -> u8 {
        *self.sp = self.sp.wrapping_add(1);
        self.memory.read(self.top())
    }

    /// Pushes the high byte, then the low byte.
    pub fn push_word(&mut self, value: u16) {
        self.push(high_byte(value));
        self.push(low_byte(value));
    }

    /// Pulls the low byte, then the high byte.
    pub fn pull_word(&mut self) -> u16 {
        let low = self.pull();
        let high = self.pull();
        combine(low, high)
    }

    /// Returns the byte the next `pull` would return, leaving SP alone.
    pub fn peek(&self) -> u8 {
        self.memory.read(STACK_BASE | self.sp.wrapping_add(1) as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_wraps_from_zero() {
        let mut memory = Memory::new();
        let mut sp = 0x00;

        Stack::new(&mut memory, &mut sp).push(0x05);

        assert_eq!(memory.read(0x0100), 0x05);
        assert_eq!(sp, 0xFF);

        let value = Stack::new(&mut memory, &mut sp).pull();
        assert_eq!(value, 0x05);
        assert_eq!(sp, 0x00);
    }

    #[test]
    fn test_pull_wraps_from_ff() {
        let mut memory = Memory::new();
        memory.write(0x0100, 0x42);
        let mut sp = 0xFF;

        assert_eq!(Stack::new(&mut memory, &mut sp).pull(), 0x42);
        assert_eq!(sp, 0x00);
    }

    #[test]
    fn test_word_byte_order() {
        let mut memory = Memory::new();
        let mut sp = 0xFF;

        let mut stack = Stack::new(&mut memory, &mut sp);
        stack.push_word(0x1234);
        assert_eq!(stack.peek(), 0x34);
        assert_eq!(stack.pull_word(), 0x1234);

        // High byte went in first, at the higher address
        assert_eq!(memory.read(0x01FF), 0x12);
        assert_eq!(memory.read(0x01FE), 0x34);
        assert_eq!(sp, 0xFF);
    }
}
