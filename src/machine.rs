//! # Machine
//!
//! The cycle-stepped execution engine. A [`Machine`] owns one [`CpuState`]
//! and one [`Decoder`] and advances time one clock cycle per
//! [`Machine::cycle`] call.
//!
//! ## Execution Model
//!
//! Each instruction is retired as a whole on the first cycle it owns; its
//! remaining cycles are then drained by subsequent calls without touching
//! registers or memory:
//!
//! - **Mid-instruction** (`cycles_left > 0`): consume one cycle
//! - **Boundary, running**: service pending interrupts, decode the byte at PC,
//!   advance PC, record the opcode, charge its cycles, execute, consume one
//!   cycle
//! - **Boundary, halted** (PC = 0xFFFF): return `false`, change nothing
//!
//! ## Interrupts
//!
//! Interrupt requests are plain latches checked only at instruction
//! boundaries. A hardware interrupt always fires and wins over a pending
//! software interrupt; a software interrupt (raised by BRK or by the caller)
//! waits while the I flag is set. Servicing pushes the status byte, then PC
//! (high byte first), sets I and jumps through the vector.
//!
//! ## Failures
//!
//! A decode or execute failure is logged, stored, and reported by `cycle()`
//! returning `false`. The machine stays stopped until the caller loads new
//! memory, resets, or clears the error. Effects the failing instruction
//! already applied are not rolled back.

use std::error::Error;

use log::{debug, error, trace, warn};

use crate::decoder::{DecodedInstruction, Decoder};
use crate::memory::{LoadError, Memory, MemoryBus};
use crate::snapshot::Snapshot;
use crate::state::CpuState;
use crate::{
    ExecutionError, HARDWARE_INTERRUPT_VECTOR, INTERRUPT_CYCLES, SOFTWARE_INTERRUPT_VECTOR,
};

/// Errors reported at the machine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    /// Decoding or executing the instruction at `address` failed.
    #[error("Program execution failed at 0x{address:04X}")]
    ProgramExecution {
        /// PC of the instruction that failed
        address: u16,
        /// What went wrong
        #[source]
        source: ExecutionError,
    },

    /// `run_until_halt` used up its cycle allowance before the program halted.
    #[error("Program did not halt within {limit} cycles")]
    CycleLimit {
        /// The allowance that was exhausted
        limit: u64,
    },
}

/// A 6502 machine: CPU state, memory and decoder.
///
/// # Examples
///
/// ```
/// use machine6502::{Machine, MemoryBus, ProgramImage};
///
/// // LDX #$05; loop: DEX; BNE loop
/// let program = [0xA2, 0x05, 0xCA, 0xD0, 0xFD];
/// let image = ProgramImage::default().build(&program).unwrap();
///
/// let mut machine = Machine::from_image(&image).unwrap();
/// machine.run_for_cycles(2);
/// assert_eq!(machine.state().registers.x, 0x05);
///
/// machine.run_for_cycles(5 * 2 + 4 * 3 + 2);
/// assert_eq!(machine.state().registers.x, 0x00);
/// assert!(machine.state().flags.zero);
/// ```
#[derive(Debug)]
pub struct Machine {
    state: CpuState,
    decoder: Decoder,
    current: Option<DecodedInstruction>,
    last_error: Option<MachineError>,
}

impl Machine {
    /// Creates a machine over zeroed memory.
    ///
    /// With zeroed vectors PC starts at 0x0000.
    pub fn new() -> Self {
        Self::with_memory(Memory::new())
    }

    /// Creates a machine over `memory`, with PC taken from its reset vector.
    pub fn with_memory(memory: Memory) -> Self {
        Self {
            state: CpuState::new(memory),
            decoder: Decoder::new(),
            current: None,
            last_error: None,
        }
    }

    /// Creates a machine from a full 64KB memory image.
    ///
    /// # Errors
    ///
    /// `LoadError::LengthMismatch` if `image` is not exactly 65,536 bytes.
    pub fn from_image(image: &[u8]) -> Result<Self, LoadError> {
        let mut machine = Self::new();
        machine.load(Some(image))?;
        Ok(machine)
    }

    // ========== Accessors ==========

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Mutable access for harnesses and debuggers. Changes take effect at the
    /// next cycle.
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// The instruction most recently started, while its cycles drain.
    pub fn current_instruction(&self) -> Option<&DecodedInstruction> {
        self.current.as_ref()
    }

    /// The failure that stopped the machine, if any.
    pub fn last_error(&self) -> Option<&MachineError> {
        self.last_error.as_ref()
    }

    /// Forgets a stored failure so `cycle()` runs again.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ========== Memory ==========

    /// Replaces all of memory with `data` and powers the CPU back on.
    ///
    /// # Errors
    ///
    /// - `LoadError::MissingData` if `data` is `None`
    /// - `LoadError::LengthMismatch` if it is not exactly 65,536 bytes
    ///
    /// A rejected load leaves memory and registers untouched.
    pub fn load(&mut self, data: Option<&[u8]>) -> Result<(), LoadError> {
        let result = match data {
            Some(data) => self.state.load(data),
            None => Err(LoadError::MissingData),
        };

        if let Err(err) = result {
            warn!("load rejected: {}", err);
            return Err(err);
        }

        self.restart();
        debug!("loaded memory image, PC = 0x{:04X}", self.state.registers.pc);
        Ok(())
    }

    /// Copy of the full 64KB of memory.
    pub fn save(&self) -> Vec<u8> {
        self.state.save()
    }

    /// Power-on reset: registers, flags, counters and latches return to their
    /// initial values and PC is reloaded from the reset vector. Memory is kept.
    pub fn reset(&mut self) {
        self.restart();
        debug!("reset, PC = 0x{:04X}", self.state.registers.pc);
    }

    fn restart(&mut self) {
        self.state.power_on();
        self.current = None;
        self.last_error = None;
    }

    // ========== Snapshots ==========

    /// Captures registers, flags, cycle state, latches and memory.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Puts the machine back into a captured state.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        snapshot.restore(&mut self.state);
        self.current = None;
        self.last_error = None;
    }

    // ========== Interrupts ==========

    /// Latches a hardware interrupt request for the next boundary.
    pub fn request_hardware_interrupt(&mut self) {
        self.state.is_hardware_interrupt = true;
    }

    /// Latches a software interrupt request for the next boundary.
    pub fn request_software_interrupt(&mut self) {
        self.state.is_software_interrupt = true;
    }

    /// Services a pending interrupt request, if one may fire.
    ///
    /// Called automatically at every instruction boundary; exposed so
    /// harnesses can force the check.
    pub fn process_interrupts(&mut self) {
        if self.state.is_hardware_interrupt {
            self.service_interrupt(false, HARDWARE_INTERRUPT_VECTOR);
            self.state.is_hardware_interrupt = false;
            self.state.is_software_interrupt = false;
        } else if self.state.is_software_interrupt && !self.state.flags.interrupt_disable {
            self.service_interrupt(true, SOFTWARE_INTERRUPT_VECTOR);
            self.state.is_software_interrupt = false;
        }
    }

    fn service_interrupt(&mut self, software: bool, vector: u16) {
        let state = &mut self.state;
        let return_address = state.registers.pc;

        state.flags.break_command = software;
        let status = state.flags.to_byte();

        let mut stack = state.stack();
        stack.push(status);
        stack.push_word(return_address);

        state.flags.interrupt_disable = true;
        state.registers.pc = state.memory.read_word(vector);
        state.cycles_left = INTERRUPT_CYCLES;

        debug!(
            "{} interrupt: 0x{:04X} -> 0x{:04X}",
            if software { "software" } else { "hardware" },
            return_address,
            state.registers.pc
        );
    }

    // ========== Execution ==========

    /// Advances the machine by one clock cycle.
    ///
    /// Returns `false` when the program has halted or a failure is stored;
    /// see [`Machine::last_error`].
    pub fn cycle(&mut self) -> bool {
        if self.last_error.is_some() {
            return false;
        }

        if self.state.is_mid_instruction() {
            self.consume_cycle();
            return true;
        }

        if !self.state.is_running() {
            return false;
        }

        match self.begin_instruction() {
            Ok(()) => {
                self.consume_cycle();
                true
            }
            Err(err) => {
                match err.source() {
                    Some(source) => error!("{}: {}", err, source),
                    None => error!("{}", err),
                }
                self.last_error = Some(err);
                false
            }
        }
    }

    /// Same as [`Machine::cycle`], then hands the resulting state to
    /// `observer`. The observer runs on halted and failed cycles too, and
    /// then sees the state those left behind.
    pub fn cycle_with<F>(&mut self, observer: F) -> bool
    where
        F: FnOnce(&CpuState),
    {
        let advanced = self.cycle();
        observer(&self.state);
        advanced
    }

    /// Runs up to `budget` cycles, stopping early on halt or failure.
    ///
    /// Returns the number of cycles actually consumed.
    pub fn run_for_cycles(&mut self, budget: u64) -> u64 {
        let mut consumed = 0;
        while consumed < budget && self.cycle() {
            consumed += 1;
        }
        consumed
    }

    /// Runs until the program halts.
    ///
    /// Returns the number of cycles consumed by this call.
    ///
    /// # Errors
    ///
    /// - `MachineError::ProgramExecution` if an instruction fails
    /// - `MachineError::CycleLimit` if the program is still running after
    ///   `limit` cycles
    pub fn run_until_halt(&mut self, limit: u64) -> Result<u64, MachineError> {
        let consumed = self.run_for_cycles(limit);

        if let Some(err) = self.last_error {
            return Err(err);
        }
        if self.state.is_mid_instruction() || self.state.is_running() {
            return Err(MachineError::CycleLimit { limit });
        }
        Ok(consumed)
    }

    fn prepare_cycle(&mut self) {
        self.current = None;
    }

    fn begin_instruction(&mut self) -> Result<(), MachineError> {
        self.prepare_cycle();
        self.process_interrupts();

        // An interrupt vector may point at the halt address
        if !self.state.is_running() {
            return Ok(());
        }

        let address = self.state.registers.pc;
        let failed = |source| MachineError::ProgramExecution { address, source };

        let decoded = self.decoder.decode(&self.state).map_err(failed)?;
        trace!("0x{:04X}  {}", address, decoded);

        self.state.registers.pc = address.wrapping_add(decoded.metadata.size_bytes as u16);
        self.state.executing_opcode = decoded.metadata.opcode;
        self.state.increment_cycles(decoded.metadata.cycles as u32);
        self.current = Some(decoded);

        decoded.execute(&mut self.state).map_err(failed)
    }

    fn consume_cycle(&mut self) {
        self.state.cycles_left = self.state.cycles_left.saturating_sub(1);
        self.state.total_cycles += 1;
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
