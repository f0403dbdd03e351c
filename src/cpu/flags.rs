//! 6502 processor status register (P) flags.
//!
//! Only six flags are real CPU state. The break pair (bits 4/5) exists in
//! the packed byte alone: bit 5 reads back as 1, bit 4 is forced to 1 by
//! PHP/BRK and left clear by IRQ/NMI stack frames.

/// The six architecturally stored status flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub carry: bool,
    pub zero: bool,
    pub irq_disable: bool,
    pub decimal: bool, // stored only; the 2A03 wires decimal mode off
    pub overflow: bool,
    pub negative: bool,
}

impl Flags {
    /// Unpack a P byte (reset, PLP, RTI). Bits 4 and 5 are discarded.
    pub fn from_byte(value: u8) -> Self {
        Flags {
            carry: value & 0x01 != 0,
            zero: value & 0x02 != 0,
            irq_disable: value & 0x04 != 0,
            decimal: value & 0x08 != 0,
            overflow: value & 0x40 != 0,
            negative: value & 0x80 != 0,
        }
    }

    /// Pack into a P byte. Bit 5 always reads as 1; bit 4 is left clear
    /// (PHP/BRK OR in 0x10 at the push site).
    pub fn to_byte(self) -> u8 {
        let mut value = 0x20;
        if self.carry {
            value |= 0x01;
        }
        if self.zero {
            value |= 0x02;
        }
        if self.irq_disable {
            value |= 0x04;
        }
        if self.decimal {
            value |= 0x08;
        }
        if self.overflow {
            value |= 0x40;
        }
        if self.negative {
            value |= 0x80;
        }
        value
    }

    /// Zero and negative from a result byte; every load-style operation
    /// ends here.
    pub fn set_zn(&mut self, value: u8) {
        self.zero = value == 0;
        self.negative = value & 0x80 != 0;
    }
}
