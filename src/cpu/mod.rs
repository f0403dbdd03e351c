pub mod cpu;
pub mod flags;
pub mod instruction;
