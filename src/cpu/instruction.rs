//! 6502 instruction catalogue.
//!
//! One static 256-entry table maps every opcode byte to its operation,
//! addressing mode, base cycle count, and whether a page cross costs an
//! extra cycle. Unofficial opcodes are included; the twelve jam opcodes
//! decode to [`Operation::Kil`], which the execution engine reports as a
//! fatal error.

/// How an instruction locates its operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Accumulator,
    Immediate,
    Implied,
    Indirect,
    /// ($nn,X): zero-page pointer indexed by X before dereference.
    IndirectX,
    /// ($nn),Y: zero-page pointer dereferenced, then indexed by Y.
    IndirectY,
    Relative,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
}

impl AddressingMode {
    /// Encoded instruction length in bytes (opcode + operand).
    pub const fn size(self) -> u16 {
        match self {
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
            AddressingMode::Accumulator | AddressingMode::Implied => 1,
            AddressingMode::Immediate
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY => 2,
        }
    }
}

/// Operation identity: 56 official operations plus the undocumented set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented operations (nesdev undocumented_opcodes.txt naming).
    Aac,
    Aax,
    Arr,
    Asr,
    Atx,
    Axa,
    Axs,
    Dcp,
    Dop,
    Isc,
    Kil,
    Lar,
    Lax,
    Rla,
    Rra,
    Slo,
    Sre,
    Sxa,
    Sya,
    Top,
    Xaa,
    Xas,
}

impl Operation {
    /// Three-letter mnemonic for disassembly and trace output.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Operation::Adc => "ADC",
            Operation::And => "AND",
            Operation::Asl => "ASL",
            Operation::Bcc => "BCC",
            Operation::Bcs => "BCS",
            Operation::Beq => "BEQ",
            Operation::Bit => "BIT",
            Operation::Bmi => "BMI",
            Operation::Bne => "BNE",
            Operation::Bpl => "BPL",
            Operation::Brk => "BRK",
            Operation::Bvc => "BVC",
            Operation::Bvs => "BVS",
            Operation::Clc => "CLC",
            Operation::Cld => "CLD",
            Operation::Cli => "CLI",
            Operation::Clv => "CLV",
            Operation::Cmp => "CMP",
            Operation::Cpx => "CPX",
            Operation::Cpy => "CPY",
            Operation::Dec => "DEC",
            Operation::Dex => "DEX",
            Operation::Dey => "DEY",
            Operation::Eor => "EOR",
            Operation::Inc => "INC",
            Operation::Inx => "INX",
            Operation::Iny => "INY",
            Operation::Jmp => "JMP",
            Operation::Jsr => "JSR",
            Operation::Lda => "LDA",
            Operation::Ldx => "LDX",
            Operation::Ldy => "LDY",
            Operation::Lsr => "LSR",
            Operation::Nop => "NOP",
            Operation::Ora => "ORA",
            Operation::Pha => "PHA",
            Operation::Php => "PHP",
            Operation::Pla => "PLA",
            Operation::Plp => "PLP",
            Operation::Rol => "ROL",
            Operation::Ror => "ROR",
            Operation::Rti => "RTI",
            Operation::Rts => "RTS",
            Operation::Sbc => "SBC",
            Operation::Sec => "SEC",
            Operation::Sed => "SED",
            Operation::Sei => "SEI",
            Operation::Sta => "STA",
            Operation::Stx => "STX",
            Operation::Sty => "STY",
            Operation::Tax => "TAX",
            Operation::Tay => "TAY",
            Operation::Tsx => "TSX",
            Operation::Txa => "TXA",
            Operation::Txs => "TXS",
            Operation::Tya => "TYA",
            Operation::Aac => "AAC",
            Operation::Aax => "AAX",
            Operation::Arr => "ARR",
            Operation::Asr => "ASR",
            Operation::Atx => "ATX",
            Operation::Axa => "AXA",
            Operation::Axs => "AXS",
            Operation::Dcp => "DCP",
            Operation::Dop => "DOP",
            Operation::Isc => "ISC",
            Operation::Kil => "KIL",
            Operation::Lar => "LAR",
            Operation::Lax => "LAX",
            Operation::Rla => "RLA",
            Operation::Rra => "RRA",
            Operation::Slo => "SLO",
            Operation::Sre => "SRE",
            Operation::Sxa => "SXA",
            Operation::Sya => "SYA",
            Operation::Top => "TOP",
            Operation::Xaa => "XAA",
            Operation::Xas => "XAS",
        }
    }
}

/// One catalogue entry.
#[derive(Clone, Copy, Debug)]
pub struct Instruction {
    pub op: Operation,
    pub mode: AddressingMode,
    /// Base cycle cost before page-cross or branch penalties.
    pub cycles: u8,
    /// True when a page cross during operand resolution costs +1 cycle.
    pub page_cycle: bool,
}

impl Instruction {
    /// Encoded length of this instruction, from its addressing mode.
    pub const fn size(&self) -> u16 {
        self.mode.size()
    }
}

const fn ins(op: Operation, mode: AddressingMode, cycles: u8, page_cycle: bool) -> Instruction {
    Instruction {
        op,
        mode,
        cycles,
        page_cycle,
    }
}

/// Decode an opcode byte. The table is total: every byte decodes, and the
/// bytes real hardware jams on come back as [`Operation::Kil`].
pub fn decode(opcode: u8) -> Instruction {
    INSTRUCTIONS[opcode as usize]
}

pub static INSTRUCTIONS: [Instruction; 256] = build_table();

#[rustfmt::skip]
const fn build_table() -> [Instruction; 256] {
    use AddressingMode::*;
    use Operation::*;

    // Every slot starts as a jam; defined opcodes overwrite below, so a
    // hole in the listing surfaces as a decode error, never as a wrong
    // instruction.
    let mut t = [ins(Kil, Implied, 0, false); 256];

    t[0x69] = ins(Adc, Immediate, 2, false);
    t[0x65] = ins(Adc, ZeroPage, 3, false);
    t[0x75] = ins(Adc, ZeroPageX, 4, false);
    t[0x6D] = ins(Adc, Absolute, 4, false);
    t[0x7D] = ins(Adc, AbsoluteX, 4, true);
    t[0x79] = ins(Adc, AbsoluteY, 4, true);
    t[0x61] = ins(Adc, IndirectX, 6, false);
    t[0x71] = ins(Adc, IndirectY, 5, true);
    t[0x29] = ins(And, Immediate, 2, false);
    t[0x25] = ins(And, ZeroPage, 3, false);
    t[0x35] = ins(And, ZeroPageX, 4, false);
    t[0x2D] = ins(And, Absolute, 4, false);
    t[0x3D] = ins(And, AbsoluteX, 4, true);
    t[0x39] = ins(And, AbsoluteY, 4, true);
    t[0x21] = ins(And, IndirectX, 6, false);
    t[0x31] = ins(And, IndirectY, 5, true);
    t[0x0A] = ins(Asl, Accumulator, 2, false);
    t[0x06] = ins(Asl, ZeroPage, 5, false);
    t[0x16] = ins(Asl, ZeroPageX, 6, false);
    t[0x0E] = ins(Asl, Absolute, 6, false);
    t[0x1E] = ins(Asl, AbsoluteX, 7, false);
    t[0x90] = ins(Bcc, Relative, 2, false);
    t[0xB0] = ins(Bcs, Relative, 2, false);
    t[0xF0] = ins(Beq, Relative, 2, false);
    t[0x24] = ins(Bit, ZeroPage, 3, false);
    t[0x2C] = ins(Bit, Absolute, 4, false);
    t[0x30] = ins(Bmi, Relative, 2, false);
    t[0xD0] = ins(Bne, Relative, 2, false);
    t[0x10] = ins(Bpl, Relative, 2, false);
    t[0x00] = ins(Brk, Implied, 7, false);
    t[0x50] = ins(Bvc, Relative, 2, false);
    t[0x70] = ins(Bvs, Relative, 2, false);
    t[0x18] = ins(Clc, Implied, 2, false);
    t[0xD8] = ins(Cld, Implied, 2, false);
    t[0x58] = ins(Cli, Implied, 2, false);
    t[0xB8] = ins(Clv, Implied, 2, false);
    t[0xC9] = ins(Cmp, Immediate, 2, false);
    t[0xC5] = ins(Cmp, ZeroPage, 3, false);
    t[0xD5] = ins(Cmp, ZeroPageX, 4, false);
    t[0xCD] = ins(Cmp, Absolute, 4, false);
    t[0xDD] = ins(Cmp, AbsoluteX, 4, true);
    t[0xD9] = ins(Cmp, AbsoluteY, 4, true);
    t[0xC1] = ins(Cmp, IndirectX, 6, false);
    t[0xD1] = ins(Cmp, IndirectY, 5, true);
    t[0xE0] = ins(Cpx, Immediate, 2, false);
    t[0xE4] = ins(Cpx, ZeroPage, 3, false);
    t[0xEC] = ins(Cpx, Absolute, 4, false);
    t[0xC0] = ins(Cpy, Immediate, 2, false);
    t[0xC4] = ins(Cpy, ZeroPage, 3, false);
    t[0xCC] = ins(Cpy, Absolute, 4, false);
    t[0xC6] = ins(Dec, ZeroPage, 5, false);
    t[0xD6] = ins(Dec, ZeroPageX, 6, false);
    t[0xCE] = ins(Dec, Absolute, 6, false);
    t[0xDE] = ins(Dec, AbsoluteX, 7, false);
    t[0xCA] = ins(Dex, Implied, 2, false);
    t[0x88] = ins(Dey, Implied, 2, false);
    t[0x49] = ins(Eor, Immediate, 2, false);
    t[0x45] = ins(Eor, ZeroPage, 3, false);
    t[0x55] = ins(Eor, ZeroPageX, 4, false);
    t[0x4D] = ins(Eor, Absolute, 4, false);
    t[0x5D] = ins(Eor, AbsoluteX, 4, true);
    t[0x59] = ins(Eor, AbsoluteY, 4, true);
    t[0x41] = ins(Eor, IndirectX, 6, false);
    t[0x51] = ins(Eor, IndirectY, 5, true);
    t[0xE6] = ins(Inc, ZeroPage, 5, false);
    t[0xF6] = ins(Inc, ZeroPageX, 6, false);
    t[0xEE] = ins(Inc, Absolute, 6, false);
    t[0xFE] = ins(Inc, AbsoluteX, 7, false);
    t[0xE8] = ins(Inx, Implied, 2, false);
    t[0xC8] = ins(Iny, Implied, 2, false);
    t[0x4C] = ins(Jmp, Absolute, 3, false);
    t[0x6C] = ins(Jmp, Indirect, 5, false);
    t[0x20] = ins(Jsr, Absolute, 6, false);
    t[0xA9] = ins(Lda, Immediate, 2, false);
    t[0xA5] = ins(Lda, ZeroPage, 3, false);
    t[0xB5] = ins(Lda, ZeroPageX, 4, false);
    t[0xAD] = ins(Lda, Absolute, 4, false);
    t[0xBD] = ins(Lda, AbsoluteX, 4, true);
    t[0xB9] = ins(Lda, AbsoluteY, 4, true);
    t[0xA1] = ins(Lda, IndirectX, 6, false);
    t[0xB1] = ins(Lda, IndirectY, 5, true);
    t[0xA2] = ins(Ldx, Immediate, 2, false);
    t[0xA6] = ins(Ldx, ZeroPage, 3, false);
    t[0xB6] = ins(Ldx, ZeroPageY, 4, false);
    t[0xAE] = ins(Ldx, Absolute, 4, false);
    t[0xBE] = ins(Ldx, AbsoluteY, 4, true);
    t[0xA0] = ins(Ldy, Immediate, 2, false);
    t[0xA4] = ins(Ldy, ZeroPage, 3, false);
    t[0xB4] = ins(Ldy, ZeroPageX, 4, false);
    t[0xAC] = ins(Ldy, Absolute, 4, false);
    t[0xBC] = ins(Ldy, AbsoluteX, 4, true);
    t[0x4A] = ins(Lsr, Accumulator, 2, false);
    t[0x46] = ins(Lsr, ZeroPage, 5, false);
    t[0x56] = ins(Lsr, ZeroPageX, 6, false);
    t[0x4E] = ins(Lsr, Absolute, 6, false);
    t[0x5E] = ins(Lsr, AbsoluteX, 7, false);
    t[0xEA] = ins(Nop, Implied, 2, false);
    t[0x09] = ins(Ora, Immediate, 2, false);
    t[0x05] = ins(Ora, ZeroPage, 3, false);
    t[0x15] = ins(Ora, ZeroPageX, 4, false);
    t[0x0D] = ins(Ora, Absolute, 4, false);
    t[0x1D] = ins(Ora, AbsoluteX, 4, true);
    t[0x19] = ins(Ora, AbsoluteY, 4, true);
    t[0x01] = ins(Ora, IndirectX, 6, false);
    t[0x11] = ins(Ora, IndirectY, 5, true);
    t[0x48] = ins(Pha, Implied, 3, false);
    t[0x08] = ins(Php, Implied, 3, false);
    t[0x68] = ins(Pla, Implied, 4, false);
    t[0x28] = ins(Plp, Implied, 4, false);
    t[0x2A] = ins(Rol, Accumulator, 2, false);
    t[0x26] = ins(Rol, ZeroPage, 5, false);
    t[0x36] = ins(Rol, ZeroPageX, 6, false);
    t[0x2E] = ins(Rol, Absolute, 6, false);
    t[0x3E] = ins(Rol, AbsoluteX, 7, false);
    t[0x6A] = ins(Ror, Accumulator, 2, false);
    t[0x66] = ins(Ror, ZeroPage, 5, false);
    t[0x76] = ins(Ror, ZeroPageX, 6, false);
    t[0x6E] = ins(Ror, Absolute, 6, false);
    t[0x7E] = ins(Ror, AbsoluteX, 7, false);
    t[0x40] = ins(Rti, Implied, 6, false);
    t[0x60] = ins(Rts, Implied, 6, false);
    t[0xE9] = ins(Sbc, Immediate, 2, false);
    t[0xE5] = ins(Sbc, ZeroPage, 3, false);
    t[0xF5] = ins(Sbc, ZeroPageX, 4, false);
    t[0xED] = ins(Sbc, Absolute, 4, false);
    t[0xFD] = ins(Sbc, AbsoluteX, 4, true);
    t[0xF9] = ins(Sbc, AbsoluteY, 4, true);
    t[0xE1] = ins(Sbc, IndirectX, 6, false);
    t[0xF1] = ins(Sbc, IndirectY, 5, true);
    t[0x38] = ins(Sec, Implied, 2, false);
    t[0xF8] = ins(Sed, Implied, 2, false);
    t[0x78] = ins(Sei, Implied, 2, false);
    t[0x85] = ins(Sta, ZeroPage, 3, false);
    t[0x95] = ins(Sta, ZeroPageX, 4, false);
    t[0x8D] = ins(Sta, Absolute, 4, false);
    t[0x9D] = ins(Sta, AbsoluteX, 5, false);
    t[0x99] = ins(Sta, AbsoluteY, 5, false);
    t[0x81] = ins(Sta, IndirectX, 6, false);
    t[0x91] = ins(Sta, IndirectY, 6, false);
    t[0x86] = ins(Stx, ZeroPage, 3, false);
    t[0x96] = ins(Stx, ZeroPageY, 4, false);
    t[0x8E] = ins(Stx, Absolute, 4, false);
    t[0x84] = ins(Sty, ZeroPage, 3, false);
    t[0x94] = ins(Sty, ZeroPageX, 4, false);
    t[0x8C] = ins(Sty, Absolute, 4, false);
    t[0xAA] = ins(Tax, Implied, 2, false);
    t[0xA8] = ins(Tay, Implied, 2, false);
    t[0xBA] = ins(Tsx, Implied, 2, false);
    t[0x8A] = ins(Txa, Implied, 2, false);
    t[0x9A] = ins(Txs, Implied, 2, false);
    t[0x98] = ins(Tya, Implied, 2, false);

    // Undocumented opcodes.
    t[0x0B] = ins(Aac, Immediate, 2, false);
    t[0x2B] = ins(Aac, Immediate, 2, false);
    t[0x87] = ins(Aax, ZeroPage, 3, false);
    t[0x97] = ins(Aax, ZeroPageY, 4, false);
    t[0x83] = ins(Aax, IndirectX, 6, false);
    t[0x8F] = ins(Aax, Absolute, 4, false);
    t[0x6B] = ins(Arr, Immediate, 2, false);
    t[0x4B] = ins(Asr, Immediate, 2, false);
    t[0xAB] = ins(Atx, Immediate, 2, false);
    t[0x9F] = ins(Axa, AbsoluteY, 5, false);
    t[0x93] = ins(Axa, IndirectY, 6, false);
    t[0xCB] = ins(Axs, Immediate, 2, false);
    t[0xC7] = ins(Dcp, ZeroPage, 5, false);
    t[0xD7] = ins(Dcp, ZeroPageX, 6, false);
    t[0xCF] = ins(Dcp, Absolute, 6, false);
    t[0xDF] = ins(Dcp, AbsoluteX, 7, false);
    t[0xDB] = ins(Dcp, AbsoluteY, 7, false);
    t[0xC3] = ins(Dcp, IndirectX, 8, false);
    t[0xD3] = ins(Dcp, IndirectY, 8, false);
    t[0x04] = ins(Dop, ZeroPage, 3, false);
    t[0x14] = ins(Dop, ZeroPageX, 4, false);
    t[0x34] = ins(Dop, ZeroPageX, 4, false);
    t[0x44] = ins(Dop, ZeroPage, 3, false);
    t[0x54] = ins(Dop, ZeroPageX, 4, false);
    t[0x64] = ins(Dop, ZeroPage, 3, false);
    t[0x74] = ins(Dop, ZeroPageX, 4, false);
    t[0x80] = ins(Dop, Immediate, 2, false);
    t[0x82] = ins(Dop, Immediate, 2, false);
    t[0x89] = ins(Dop, Immediate, 2, false);
    t[0xC2] = ins(Dop, Immediate, 2, false);
    t[0xD4] = ins(Dop, ZeroPageX, 4, false);
    t[0xE2] = ins(Dop, Immediate, 2, false);
    t[0xF4] = ins(Dop, ZeroPageX, 4, false);
    t[0xE7] = ins(Isc, ZeroPage, 5, false);
    t[0xF7] = ins(Isc, ZeroPageX, 6, false);
    t[0xEF] = ins(Isc, Absolute, 6, false);
    t[0xFF] = ins(Isc, AbsoluteX, 7, false);
    t[0xFB] = ins(Isc, AbsoluteY, 7, false);
    t[0xE3] = ins(Isc, IndirectX, 8, false);
    t[0xF3] = ins(Isc, IndirectY, 8, false);
    // 0x02/0x12/0x22/0x32/0x42/0x52/0x62/0x72/0x92/0xB2/0xD2/0xF2 stay KIL.
    t[0xBB] = ins(Lar, AbsoluteY, 4, true);
    t[0xA7] = ins(Lax, ZeroPage, 3, false);
    t[0xB7] = ins(Lax, ZeroPageY, 4, false);
    t[0xAF] = ins(Lax, Absolute, 4, false);
    t[0xBF] = ins(Lax, AbsoluteY, 4, true);
    t[0xA3] = ins(Lax, IndirectX, 6, false);
    t[0xB3] = ins(Lax, IndirectY, 5, true);
    t[0x1A] = ins(Nop, Implied, 2, false);
    t[0x3A] = ins(Nop, Implied, 2, false);
    t[0x5A] = ins(Nop, Implied, 2, false);
    t[0x7A] = ins(Nop, Implied, 2, false);
    t[0xDA] = ins(Nop, Implied, 2, false);
    t[0xFA] = ins(Nop, Implied, 2, false);
    t[0x27] = ins(Rla, ZeroPage, 5, false);
    t[0x37] = ins(Rla, ZeroPageX, 6, false);
    t[0x2F] = ins(Rla, Absolute, 6, false);
    t[0x3F] = ins(Rla, AbsoluteX, 7, false);
    t[0x3B] = ins(Rla, AbsoluteY, 7, false);
    t[0x23] = ins(Rla, IndirectX, 8, false);
    t[0x33] = ins(Rla, IndirectY, 8, false);
    t[0x67] = ins(Rra, ZeroPage, 5, false);
    t[0x77] = ins(Rra, ZeroPageX, 6, false);
    t[0x6F] = ins(Rra, Absolute, 6, false);
    t[0x7F] = ins(Rra, AbsoluteX, 7, false);
    t[0x7B] = ins(Rra, AbsoluteY, 7, false);
    t[0x63] = ins(Rra, IndirectX, 8, false);
    t[0x73] = ins(Rra, IndirectY, 8, false);
    t[0xEB] = ins(Sbc, Immediate, 2, false);
    t[0x07] = ins(Slo, ZeroPage, 5, false);
    t[0x17] = ins(Slo, ZeroPageX, 6, false);
    t[0x0F] = ins(Slo, Absolute, 6, false);
    t[0x1F] = ins(Slo, AbsoluteX, 7, false);
    t[0x1B] = ins(Slo, AbsoluteY, 7, false);
    t[0x03] = ins(Slo, IndirectX, 8, false);
    t[0x13] = ins(Slo, IndirectY, 8, false);
    t[0x47] = ins(Sre, ZeroPage, 5, false);
    t[0x57] = ins(Sre, ZeroPageX, 6, false);
    t[0x4F] = ins(Sre, Absolute, 6, false);
    t[0x5F] = ins(Sre, AbsoluteX, 7, false);
    t[0x5B] = ins(Sre, AbsoluteY, 7, false);
    t[0x43] = ins(Sre, IndirectX, 8, false);
    t[0x53] = ins(Sre, IndirectY, 8, false);
    t[0x9E] = ins(Sxa, AbsoluteY, 5, false);
    t[0x9C] = ins(Sya, AbsoluteX, 5, false);
    t[0x0C] = ins(Top, Absolute, 4, false);
    t[0x1C] = ins(Top, AbsoluteX, 4, true);
    t[0x3C] = ins(Top, AbsoluteX, 4, true);
    t[0x5C] = ins(Top, AbsoluteX, 4, true);
    t[0x7C] = ins(Top, AbsoluteX, 4, true);
    t[0xDC] = ins(Top, AbsoluteX, 4, true);
    t[0xFC] = ins(Top, AbsoluteX, 4, true);
    t[0x8B] = ins(Xaa, Immediate, 2, false);
    t[0x9B] = ins(Xas, AbsoluteY, 5, false);

    t
}
