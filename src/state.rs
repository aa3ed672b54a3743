//! # CPU State
//!
//! `CpuState` is the single aggregate every instruction mutates: registers,
//! status flags, the 64KB memory, the in-flight cycle budget and the interrupt
//! request latches. The machine owns exactly one and passes it by `&mut` into
//! each instruction's `execute`.
//!
//! ## Cycle Bookkeeping
//!
//! `cycles_left` is the number of cycles the current instruction still has to
//! burn. While it is non-zero no new instruction may be fetched.
//!
//! ## Operand Access
//!
//! `read_operand`, `write_operand` and `effective_address` pick the right
//! `MemoryBus` addressing-mode call for a mode and supply the index register, so
//! instructions never compute addresses themselves.

use crate::addressing::AddressingMode;
use crate::memory::{LoadError, Memory, MemoryBus};
use crate::registers::{Registers, StatusFlags};
use crate::stack::Stack;
use crate::{ExecutionError, HALT_ADDRESS, SOFTWARE_INTERRUPT_VECTOR};

/// Complete processor state.
///
/// # Examples
///
/// ```
/// use machine6502::{CpuState, Memory, MemoryBus};
///
/// let mut memory = Memory::new();
/// memory.write(0xFFFE, 0x00);
/// memory.write(0xFFFF, 0x06);
///
/// let state = CpuState::new(memory);
/// assert_eq!(state.registers.pc, 0x0600);
/// assert_eq!(state.registers.sp, 0xFF);
/// assert!(state.is_running());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuState {
    /// A, X, Y, SP and PC
    pub registers: Registers,

    /// Processor status flags
    pub flags: StatusFlags,

    /// Flat 64KB memory
    pub memory: Memory,

    /// Cycles the in-flight instruction still has to consume
    pub cycles_left: u32,

    /// Opcode byte of the instruction currently retiring
    pub executing_opcode: u8,

    /// Hardware interrupt request latch, cleared once serviced
    pub is_hardware_interrupt: bool,

    /// Software interrupt request latch, cleared once serviced
    pub is_software_interrupt: bool,

    /// Cycles consumed since power-on
    pub total_cycles: u64,
}

impl CpuState {
    /// Creates the power-on state over `memory`.
    ///
    /// PC is loaded from the software/reset vector at 0xFFFE/0xFFFF.
    pub fn new(memory: Memory) -> Self {
        let pc = memory.read_word(SOFTWARE_INTERRUPT_VECTOR);

        Self {
            registers: Registers::power_on(pc),
            flags: StatusFlags::default(),
            memory,
            cycles_left: 0,
            executing_opcode: 0x00,
            is_hardware_interrupt: false,
            is_software_interrupt: false,
            total_cycles: 0,
        }
    }

    /// Returns registers, flags, counters and latches to power-on values and
    /// reloads PC from the reset vector. Memory is kept.
    pub fn power_on(&mut self) {
        let memory = std::mem::take(&mut self.memory);
        *self = Self::new(memory);
    }

    /// False once PC has reached the halt sentinel.
    pub fn is_running(&self) -> bool {
        self.registers.pc != HALT_ADDRESS
    }

    /// True while the current instruction still owns the bus.
    pub fn is_mid_instruction(&self) -> bool {
        self.cycles_left > 0
    }

    /// Adds `cycles` to the in-flight instruction's budget.
    pub fn increment_cycles(&mut self, cycles: u32) {
        self.cycles_left += cycles;
    }

    /// Borrows the page-one stack.
    pub fn stack(&mut self) -> Stack<'_> {
        Stack::new(&mut self.memory, &mut self.registers.sp)
    }

    /// Snapshot of memory, see [`Memory::save`].
    pub fn save(&self) -> Vec<u8> {
        self.memory.save()
    }

    /// Replaces memory wholesale, see [`Memory::load`].
    pub fn load(&mut self, data: &[u8]) -> Result<(), LoadError> {
        self.memory.load(data)
    }

    // ========== Operand Access ==========

    fn invalid_mode(&self, mode: AddressingMode) -> ExecutionError {
        ExecutionError::InvalidAddressingMode {
            opcode: self.executing_opcode,
            mode,
        }
    }

    /// Reads the value an instruction operates on.
    ///
    /// Returns the value and whether an indexed access crossed a page. The
    /// caller decides whether a crossing costs a cycle.
    pub fn read_operand(
        &self,
        mode: AddressingMode,
        operand: u16,
    ) -> Result<(u8, bool), ExecutionError> {
        let regs = &self.registers;
        let zp = operand as u8;

        let read = match mode {
            AddressingMode::Accumulator => (regs.a, false),
            AddressingMode::Immediate => (zp, false),
            AddressingMode::ZeroPage => (self.memory.read_zero_page(zp), false),
            AddressingMode::ZeroPageX => (self.memory.read_zero_page_indexed(zp, regs.x), false),
            AddressingMode::ZeroPageY => (self.memory.read_zero_page_indexed(zp, regs.y), false),
            AddressingMode::Absolute => (self.memory.read_absolute(operand), false),
            AddressingMode::AbsoluteX => self.memory.read_absolute_indexed(operand, regs.x),
            AddressingMode::AbsoluteY => self.memory.read_absolute_indexed(operand, regs.y),
            AddressingMode::IndirectX => (self.memory.read_indexed_indirect(zp, regs.x), false),
            AddressingMode::IndirectY => self.memory.read_indirect_indexed(zp, regs.y),
            AddressingMode::Implicit | AddressingMode::Relative | AddressingMode::Indirect => {
                return Err(self.invalid_mode(mode));
            }
        };

        Ok(read)
    }

    /// Writes the result of an instruction back to its operand location.
    pub fn write_operand(
        &mut self,
        mode: AddressingMode,
        operand: u16,
        value: u8,
    ) -> Result<(), ExecutionError> {
        let Registers { x, y, .. } = self.registers;
        let zp = operand as u8;

        match mode {
            AddressingMode::Accumulator => self.registers.a = value,
            AddressingMode::ZeroPage => self.memory.write_zero_page(zp, value),
            AddressingMode::ZeroPageX => self.memory.write_zero_page_indexed(zp, x, value),
            AddressingMode::ZeroPageY => self.memory.write_zero_page_indexed(zp, y, value),
            AddressingMode::Absolute => self.memory.write_absolute(operand, value),
            AddressingMode::AbsoluteX => self.memory.write_absolute_indexed(operand, x, value),
            AddressingMode::AbsoluteY => self.memory.write_absolute_indexed(operand, y, value),
            AddressingMode::IndirectX => self.memory.write_indexed_indirect(zp, x, value),
            AddressingMode::IndirectY => self.memory.write_indirect_indexed(zp, y, value),
            AddressingMode::Implicit
            | AddressingMode::Immediate
            | AddressingMode::Relative
            | AddressingMode::Indirect => return Err(self.invalid_mode(mode)),
        }

        Ok(())
    }

    /// Resolves the memory address an operand refers to.
    ///
    /// Returns the address and whether indexing crossed a page.
    pub fn effective_address(
        &self,
        mode: AddressingMode,
        operand: u16,
    ) -> Result<(u16, bool), ExecutionError> {
        let regs = &self.registers;
        let zp = operand as u8;

        let resolved = match mode {
            AddressingMode::ZeroPage => (zp as u16, false),
            AddressingMode::ZeroPageX => (self.memory.zero_page_indexed_address(zp, regs.x), false),
            AddressingMode::ZeroPageY => (self.memory.zero_page_indexed_address(zp, regs.y), false),
            AddressingMode::Absolute => (operand, false),
            AddressingMode::AbsoluteX => self.memory.absolute_indexed_address(operand, regs.x),
            AddressingMode::AbsoluteY => self.memory.absolute_indexed_address(operand, regs.y),
            AddressingMode::IndirectX => (self.memory.indexed_indirect_address(zp, regs.x), false),
            AddressingMode::IndirectY => self.memory.indirect_indexed_address(zp, regs.y),
            AddressingMode::Indirect => (self.memory.read_indirect_word(operand), false),
            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Immediate
            | AddressingMode::Relative => return Err(self.invalid_mode(mode)),
        };

        Ok(resolved)
    }

    /// Read-modify-write on an operand location.
    ///
    /// `op` receives the flags and the old value and returns the new value,
    /// which is written back and returned.
    pub fn modify_operand<F>(
        &mut self,
        mode: AddressingMode,
        operand: u16,
        op: F,
    ) -> Result<u8, ExecutionError>
    where
        F: FnOnce(&mut StatusFlags, u8) -> u8,
    {
        let (value, _) = self.read_operand(mode, operand)?;
        let result = op(&mut self.flags, value);
        self.write_operand(mode, operand, result)?;
        Ok(result)
    }
}

impl Default for CpuState {
    fn default() -> Self {
        Self::new(Memory::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_state() -> CpuState {
        let mut memory = Memory::new();
        memory.write(0xFFFE, 0x00);
        memory.write(0xFFFF, 0x06);
        CpuState::new(memory)
    }

    #[test]
    fn test_power_on_state() {
        let state = setup_state();

        assert_eq!(state.registers.pc, 0x0600);
        assert_eq!(state.registers.sp, 0xFF);
        assert_eq!(state.flags, StatusFlags::default());
        assert_eq!(state.cycles_left, 0);
        assert!(!state.is_hardware_interrupt);
        assert!(!state.is_software_interrupt);
        assert!(state.is_running());
    }

    #[test]
    fn test_halt_sentinel() {
        let mut state = setup_state();
        state.registers.pc = HALT_ADDRESS;
        assert!(!state.is_running());
    }

    #[test]
    fn test_power_on_keeps_memory() {
        let mut state = setup_state();
        state.memory.write(0x0200, 0x42);
        state.registers.a = 0x10;
        state.flags.carry = true;
        state.cycles_left = 3;

        state.power_on();

        assert_eq!(state.memory.read(0x0200), 0x42);
        assert_eq!(state.registers.a, 0x00);
        assert!(!state.flags.carry);
        assert_eq!(state.cycles_left, 0);
        assert_eq!(state.registers.pc, 0x0600);
    }

    #[test]
    fn test_read_operand_modes() {
        let mut state = setup_state();
        state.registers.x = 0x02;
        state.registers.y = 0x03;
        state.memory.write(0x0010, 0x11);
        state.memory.write(0x0012, 0x12);
        state.memory.write(0x0100, 0x13);
        state.memory.write(0x0013, 0x14);

        assert_eq!(state.read_operand(AddressingMode::Immediate, 0x7F), Ok((0x7F, false)));
        assert_eq!(state.read_operand(AddressingMode::ZeroPage, 0x10), Ok((0x11, false)));
        assert_eq!(state.read_operand(AddressingMode::ZeroPageX, 0x10), Ok((0x12, false)));
        assert_eq!(state.read_operand(AddressingMode::ZeroPageY, 0x10), Ok((0x14, false)));
        assert_eq!(state.read_operand(AddressingMode::AbsoluteX, 0x00FE), Ok((0x13, true)));
    }

    #[test]
    fn test_invalid_mode_reports_opcode() {
        let mut state = setup_state();
        state.executing_opcode = 0xEA;

        assert_eq!(
            state.read_operand(AddressingMode::Implicit, 0),
            Err(ExecutionError::InvalidAddressingMode {
                opcode: 0xEA,
                mode: AddressingMode::Implicit
            })
        );
        assert!(state.write_operand(AddressingMode::Immediate, 0, 1).is_err());
    }

    #[test]
    fn test_modify_operand_accumulator() {
        let mut state = setup_state();
        state.registers.a = 0x40;

        let result = state
            .modify_operand(AddressingMode::Accumulator, 0, |flags, value| {
                flags.carry = true;
                value << 1
            })
            .unwrap();

        assert_eq!(result, 0x80);
        assert_eq!(state.registers.a, 0x80);
        assert!(state.flags.carry);
    }
}
