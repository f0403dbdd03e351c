//! CPU memory bus and address decoding.
//!
//! Routes every CPU access to internal RAM, the reserved PPU/APU register
//! windows, or the cartridge mapper. The window boundaries are part of the
//! hardware contract; get one wrong and cartridge access silently breaks.

use crate::cartridge::cartridge::Cartridge;
use crate::cartridge::mapper::mapper::Mapper;

/// Trait for memory-mapped access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

/// Internal CPU RAM size; mirrored four times across $0000-$1FFF.
pub const RAM_SIZE: usize = 2048;

/// Borrowed view over the console's memory map, assembled per call so the
/// console keeps single ownership of RAM, cartridge, and mapper.
pub struct CpuBus<'a> {
    pub ram: &'a mut [u8; RAM_SIZE],
    /// Cartridge and its mapper; `None` until a cartridge is attached, in
    /// which case cartridge space reads 0 and drops writes.
    pub cart: Option<(&'a mut Cartridge, &'a mut dyn Mapper)>,
}

impl Bus for CpuBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // Internal RAM (mirrored 4x in $0000-$1FFF)
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            // PPU register window: external collaborator, not implemented here
            0x2000..=0x3FFF => 0,
            // APU and input register window: same
            0x4000..=0x4017 => 0,
            // Reserved/unused
            0x4018..=0x401F => 0,
            // Cartridge space
            0x4020..=0xFFFF => match &self.cart {
                Some((cart, mapper)) => mapper.read(cart, addr),
                None => 0,
            },
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            // Register windows and reserved space discard writes
            0x2000..=0x401F => {}
            0x4020..=0xFFFF => {
                if let Some((cart, mapper)) = &mut self.cart {
                    mapper.write(cart, addr, data);
                }
            }
        }
    }
}
