//! Error types for the console core.
//!
//! Everything fatal at this layer is unrecoverable: a bad ROM image, an
//! unimplemented mapper, or an opcode that jams the CPU. There is nothing
//! transient to retry; callers get the error and decide what to do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The ROM image is not a valid iNES file (bad magic, short sections).
    #[error("invalid rom file: {0}")]
    InvalidCartridge(&'static str),

    /// The ROM file could not be read.
    #[error("rom file unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// The cartridge names a mapper id with no registered implementation.
    #[error("mapper {0} not implemented")]
    UnknownMapper(u8),

    /// The CPU fetched an opcode that jams the chip (KIL). Real hardware
    /// locks up here; the core reports it instead of guessing a behavior.
    #[error("illegal opcode {opcode:02X} at {pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },

    /// `Console::step` was called before a CPU was attached.
    #[error("no cpu attached")]
    NoCpu,

    /// `Console::step` was called before a cartridge was attached.
    #[error("no cartridge attached")]
    NoCartridge,
}
