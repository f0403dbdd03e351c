//! iNES (.nes) cartridge images.
//!
//! Parses the 16-byte header, skips an optional 512-byte trainer, and slices
//! out PRG ROM and CHR banks. Header geometry is trusted only after the
//! payload length checks out.

use std::fs;
use std::path::Path;

use crate::error::Error;

/// iNES magic number: "NES" followed by an EOF byte.
const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
/// PRG ROM comes in 16 KiB units, CHR in 8 KiB units.
pub const PRG_BANK_SIZE: usize = 16384;
pub const CHR_BANK_SIZE: usize = 8192;
const SRAM_SIZE: usize = 8192;

/// Nametable mirroring requested by the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// A parsed cartridge: ROM contents plus the wiring facts the mapper needs.
pub struct Cartridge {
    /// PRG ROM, a whole number of 16 KiB banks.
    pub prg: Vec<u8>,
    /// CHR ROM, or 8 KiB of CHR RAM when the header declares zero banks.
    pub chr: Vec<u8>,
    /// Battery-backed work RAM at $6000-$7FFF.
    pub sram: Vec<u8>,
    pub mapper_id: u8,
    pub mirroring: Mirroring,
    pub battery: bool,
}

impl Cartridge {
    /// Read and parse a .nes file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let data = fs::read(path)?;
        Cartridge::from_bytes(&data)
    }

    /// Parse an iNES image already in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::InvalidCartridge("truncated header"));
        }
        if data[0..4] != INES_MAGIC {
            return Err(Error::InvalidCartridge("bad magic number"));
        }

        let prg_banks = data[4] as usize;
        let chr_banks = data[5] as usize;
        let flag6 = data[6];
        let flag7 = data[7];

        let mapper_id = (flag7 & 0xF0) | (flag6 >> 4);
        let battery = flag6 & 0x02 != 0;
        let trainer = flag6 & 0x04 != 0;
        // Bit 0 picks horizontal/vertical, bit 3 forces four-screen.
        let mirroring = match (flag6 & 0x01) | (flag6 >> 2 & 0x02) {
            0 => Mirroring::Horizontal,
            1 => Mirroring::Vertical,
            _ => Mirroring::FourScreen,
        };

        let mut offset = HEADER_SIZE;
        if trainer {
            offset += TRAINER_SIZE;
        }

        let prg_len = prg_banks * PRG_BANK_SIZE;
        let chr_len = chr_banks * CHR_BANK_SIZE;
        if data.len() < offset + prg_len + chr_len {
            return Err(Error::InvalidCartridge("payload shorter than header claims"));
        }
        if prg_banks == 0 {
            return Err(Error::InvalidCartridge("no PRG ROM banks"));
        }

        let prg = data[offset..offset + prg_len].to_vec();
        offset += prg_len;
        // Zero CHR banks means the board carries CHR RAM instead.
        let chr = if chr_banks == 0 {
            vec![0; CHR_BANK_SIZE]
        } else {
            data[offset..offset + chr_len].to_vec()
        };

        Ok(Cartridge {
            prg,
            chr,
            sram: vec![0; SRAM_SIZE],
            mapper_id,
            mirroring,
            battery,
        })
    }

    pub fn prg_banks(&self) -> usize {
        self.prg.len() / PRG_BANK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal valid image with recognizable PRG/CHR fill bytes.
    fn build_rom(prg_banks: u8, chr_banks: u8, flag6: u8, flag7: u8) -> Vec<u8> {
        let mut rom = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, chr_banks, flag6, flag7];
        rom.resize(HEADER_SIZE, 0);
        rom.extend(std::iter::repeat_n(0xA1, prg_banks as usize * PRG_BANK_SIZE));
        rom.extend(std::iter::repeat_n(0xB2, chr_banks as usize * CHR_BANK_SIZE));
        rom
    }

    #[test]
    fn parses_a_minimal_nrom_image() {
        let cart = Cartridge::from_bytes(&build_rom(2, 1, 0x01, 0x00)).unwrap();
        assert_eq!(cart.prg.len(), 2 * PRG_BANK_SIZE);
        assert_eq!(cart.chr.len(), CHR_BANK_SIZE);
        assert_eq!(cart.mapper_id, 0);
        assert_eq!(cart.mirroring, Mirroring::Vertical);
        assert!(!cart.battery);
        assert!(cart.prg.iter().all(|&b| b == 0xA1));
        assert!(cart.chr.iter().all(|&b| b == 0xB2));
    }

    #[test]
    fn mapper_id_combines_both_header_nibbles() {
        let cart = Cartridge::from_bytes(&build_rom(1, 1, 0x40, 0x20)).unwrap();
        assert_eq!(cart.mapper_id, 0x24);
    }

    #[test]
    fn mirroring_decodes_from_flag_6() {
        let horizontal = Cartridge::from_bytes(&build_rom(1, 1, 0x00, 0)).unwrap();
        assert_eq!(horizontal.mirroring, Mirroring::Horizontal);
        let vertical = Cartridge::from_bytes(&build_rom(1, 1, 0x01, 0)).unwrap();
        assert_eq!(vertical.mirroring, Mirroring::Vertical);
        let four = Cartridge::from_bytes(&build_rom(1, 1, 0x08, 0)).unwrap();
        assert_eq!(four.mirroring, Mirroring::FourScreen);
        let four_with_bit0 = Cartridge::from_bytes(&build_rom(1, 1, 0x09, 0)).unwrap();
        assert_eq!(four_with_bit0.mirroring, Mirroring::FourScreen);
    }

    #[test]
    fn battery_bit_is_flag_6_bit_1() {
        let cart = Cartridge::from_bytes(&build_rom(1, 1, 0x02, 0)).unwrap();
        assert!(cart.battery);
    }

    #[test]
    fn trainer_block_is_skipped() {
        let mut rom = vec![0x4E, 0x45, 0x53, 0x1A, 1, 0, 0x04, 0x00];
        rom.resize(HEADER_SIZE, 0);
        rom.extend(std::iter::repeat_n(0xEE, TRAINER_SIZE));
        rom.extend(std::iter::repeat_n(0xA1, PRG_BANK_SIZE));
        let cart = Cartridge::from_bytes(&rom).unwrap();
        assert!(cart.prg.iter().all(|&b| b == 0xA1));
    }

    #[test]
    fn zero_chr_banks_allocates_chr_ram() {
        let cart = Cartridge::from_bytes(&build_rom(1, 0, 0x00, 0x00)).unwrap();
        assert_eq!(cart.chr.len(), CHR_BANK_SIZE);
        assert!(cart.chr.iter().all(|&b| b == 0));
    }

    #[test]
    fn rejects_bad_magic_and_truncation() {
        assert!(matches!(
            Cartridge::from_bytes(&[0x4E, 0x45]),
            Err(Error::InvalidCartridge("truncated header"))
        ));

        let mut rom = build_rom(1, 1, 0, 0);
        rom[0] = 0x00;
        assert!(matches!(
            Cartridge::from_bytes(&rom),
            Err(Error::InvalidCartridge("bad magic number"))
        ));

        let rom = build_rom(1, 1, 0, 0);
        assert!(matches!(
            Cartridge::from_bytes(&rom[..rom.len() - 1]),
            Err(Error::InvalidCartridge(_))
        ));
    }
}
