//! Per-step trace records and their text rendering.
//!
//! The execution engine hands back one [`StepTrace`] per instruction;
//! everything here is a pure function of that record, so formatting stays
//! out of the engine.

use crate::cpu::instruction::{AddressingMode, Operation};

/// Snapshot of one executed instruction, taken before execution mutates
/// anything. Not retained by the CPU.
#[derive(Clone, Copy, Debug)]
pub struct StepTrace {
    /// Program counter the opcode was fetched from.
    pub pc: u16,
    pub opcode: u8,
    pub op: Operation,
    pub mode: AddressingMode,
    /// Resolved effective address (0 for implied/accumulator operands).
    pub addr: u16,
    /// Raw operand bytes as they appear in the instruction stream.
    pub operand: [u8; 2],
}

impl StepTrace {
    /// The operand bytes actually encoded (0, 1, or 2 of them).
    pub fn operand_bytes(&self) -> &[u8] {
        &self.operand[..(self.mode.size() - 1) as usize]
    }
}

/// Render one instruction in conventional 6502 assembly syntax, e.g.
/// `LDA #$42`, `STA $0200,X`, `JMP ($02FF)`, `BNE *-3`.
pub fn disassemble(trace: &StepTrace) -> String {
    let mnemonic = trace.op.mnemonic();
    let [lo, hi] = trace.operand;
    let operand = match trace.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${lo:02X}"),
        AddressingMode::ZeroPage => format!("${lo:02X}"),
        AddressingMode::ZeroPageX => format!("${lo:02X},X"),
        AddressingMode::ZeroPageY => format!("${lo:02X},Y"),
        AddressingMode::Relative => format!("*{:+}", lo as i8),
        AddressingMode::Absolute => format!("${hi:02X}{lo:02X}"),
        AddressingMode::AbsoluteX => format!("${hi:02X}{lo:02X},X"),
        AddressingMode::AbsoluteY => format!("${hi:02X}{lo:02X},Y"),
        AddressingMode::Indirect => format!("(${hi:02X}{lo:02X})"),
        AddressingMode::IndirectX => format!("(${lo:02X},X)"),
        AddressingMode::IndirectY => format!("(${lo:02X}),Y"),
    };
    if operand.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{mnemonic} {operand}")
    }
}
