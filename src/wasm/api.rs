//! WASM API for the 6502 machine.
//!
//! Provides JavaScript-callable interfaces for loading memory images and
//! programs, stepping the machine cycle by cycle, inspecting registers and
//! flags, raising interrupts and taking snapshots.

use crate::{Machine, MemoryBus, ProgramImage, Snapshot};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// A 6502 machine exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmMachine {
    machine: Machine,
}

#[wasm_bindgen]
impl WasmMachine {
    /// Create a machine with zeroed memory
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        WasmMachine {
            machine: Machine::new(),
        }
    }

    /// Replace all 64KB of memory; `null` is rejected
    pub fn load(&mut self, data: Option<Vec<u8>>) -> Result<(), JsError> {
        self.machine.load(data.as_deref()).map_err(js_error)
    }

    /// Build an image for a raw binary at `load_address` and load it
    pub fn load_program(&mut self, program: &[u8], load_address: u16) -> Result<(), JsError> {
        let image = ProgramImage::new(load_address)
            .build(program)
            .map_err(js_error)?;
        self.machine.load(Some(image.as_slice())).map_err(js_error)
    }

    /// Copy of all 64KB of memory
    pub fn save(&self) -> Vec<u8> {
        self.machine.save()
    }

    /// Advance one clock cycle
    pub fn cycle(&mut self) -> bool {
        self.machine.cycle()
    }

    /// Advance one clock cycle, then call `observer(pc, cycles_left)`
    pub fn cycle_traced(&mut self, observer: &js_sys::Function) -> bool {
        self.machine.cycle_with(|state| {
            // A throwing observer must not stop the machine
            let _ = observer.call2(
                &JsValue::NULL,
                &JsValue::from(state.registers.pc),
                &JsValue::from(state.cycles_left),
            );
        })
    }

    /// Run up to `cycles` cycles and return how many were consumed
    pub fn run_for_cycles(&mut self, cycles: u32) -> u32 {
        self.machine.run_for_cycles(cycles as u64) as u32
    }

    /// Power-on reset, memory kept
    pub fn reset(&mut self) {
        self.machine.reset();
    }

    /// Message of the failure that stopped the machine, if any
    #[wasm_bindgen(getter)]
    pub fn last_error(&self) -> Option<String> {
        self.machine.last_error().map(|err| err.to_string())
    }

    /// Disassembly of the instruction at PC
    pub fn disassemble_current(&self) -> Result<String, JsError> {
        self.machine
            .decoder()
            .decode(self.machine.state())
            .map(|decoded| decoded.to_string())
            .map_err(js_error)
    }

    // Interrupts

    pub fn request_hardware_interrupt(&mut self) {
        self.machine.request_hardware_interrupt();
    }

    pub fn request_software_interrupt(&mut self) {
        self.machine.request_software_interrupt();
    }

    // Snapshots

    /// Serialized machine state
    pub fn snapshot(&self) -> Vec<u8> {
        self.machine.snapshot().to_bytes()
    }

    /// Restore a state produced by `snapshot()`
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), JsError> {
        let snapshot = Snapshot::from_bytes(bytes).map_err(js_error)?;
        self.machine.restore(&snapshot);
        Ok(())
    }

    // Memory access

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.machine.state().memory.read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.machine.state_mut().memory.write(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as usize) << 8;
        self.machine.state().memory.as_slice()[start..start + 0x100].to_vec()
    }

    // Register getters

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.machine.state().registers.a
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.machine.state().registers.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.machine.state().registers.y
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.machine.state().registers.pc
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.machine.state().registers.sp
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.machine.state().flags.to_byte()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles_left(&self) -> u32 {
        self.machine.state().cycles_left
    }

    /// Total cycles as f64 (JavaScript numbers are f64)
    #[wasm_bindgen(getter)]
    pub fn total_cycles(&self) -> f64 {
        self.machine.state().total_cycles as f64
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.machine.state().is_running()
    }

    // Flag getters

    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.machine.state().flags.negative
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.machine.state().flags.overflow
    }

    #[wasm_bindgen(getter)]
    pub fn flag_b(&self) -> bool {
        self.machine.state().flags.break_command
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.machine.state().flags.decimal_mode
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.machine.state().flags.interrupt_disable
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.machine.state().flags.zero
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.machine.state().flags.carry
    }
}

impl Default for WasmMachine {
    fn default() -> Self {
        Self::new()
    }
}
