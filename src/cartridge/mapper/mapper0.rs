//! Mapper 0 (NROM): no bank switching at all.
//!
//! 16 KiB boards see the single PRG bank mirrored at both $8000 and $C000;
//! 32 KiB boards map the two banks straight through. SRAM sits at
//! $6000-$7FFF.

use crate::cartridge::cartridge::{Cartridge, PRG_BANK_SIZE};
use crate::cartridge::mapper::mapper::Mapper;

pub struct Nrom {
    prg_banks: usize,
}

impl Nrom {
    pub fn new() -> Self {
        Nrom { prg_banks: 0 }
    }

    /// Offset into PRG ROM for a CPU address in $8000-$FFFF. The upper
    /// window always shows the last bank, which for a one-bank board is
    /// also the first.
    fn prg_offset(&self, addr: u16) -> usize {
        let offset = addr as usize - 0x8000;
        if offset >= PRG_BANK_SIZE && self.prg_banks == 1 {
            offset - PRG_BANK_SIZE
        } else {
            offset
        }
    }
}

impl Default for Nrom {
    fn default() -> Self {
        Nrom::new()
    }
}

impl Mapper for Nrom {
    fn init(&mut self, cart: &Cartridge) {
        self.prg_banks = cart.prg_banks();
    }

    fn read(&self, cart: &Cartridge, addr: u16) -> u8 {
        match addr {
            0x8000..=0xFFFF => cart.prg[self.prg_offset(addr)],
            0x6000..=0x7FFF => cart.sram[addr as usize - 0x6000],
            // $4020-$5FFF: open bus on this board
            _ => 0,
        }
    }

    fn write(&mut self, cart: &mut Cartridge, addr: u16, data: u8) {
        match addr {
            0x8000..=0xFFFF => {
                let offset = self.prg_offset(addr);
                cart.prg[offset] = data;
            }
            0x6000..=0x7FFF => cart.sram[addr as usize - 0x6000] = data,
            _ => {}
        }
    }
}
