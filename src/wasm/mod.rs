//! WebAssembly bindings for the 6502 machine.
//!
//! This module provides JavaScript-callable interfaces to the machine,
//! enabling browser-based execution and inspection of 6502 programs.

pub mod api;

pub use api::{JsError, WasmMachine};
