//! NES console core.
//!
//! - 6502 CPU with cycle-accurate instruction timing (official and
//!   undocumented opcodes).
//! - CPU bus with internal RAM mirroring and cartridge routing.
//! - iNES cartridge loading and an NROM mapper behind a registry.
//! - Per-instruction trace records with a pure disassembler.

pub mod bus;
pub mod cartridge;
pub mod console;
pub mod cpu;
pub mod error;
pub mod trace;
