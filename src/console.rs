//! Console assembly: CPU, internal RAM, cartridge, and mapper under one
//! owner.
//!
//! Components attach through two named operations instead of a generic
//! connect; the console builds a borrowed bus view per access so ownership
//! never leaves it.

use crate::bus::{Bus, CpuBus, RAM_SIZE};
use crate::cartridge::cartridge::Cartridge;
use crate::cartridge::mapper::mapper::{Mapper, MapperRegistry};
use crate::cpu::cpu::Cpu;
use crate::error::Error;
use crate::trace::StepTrace;

pub struct Console {
    cpu: Option<Cpu>,
    ram: [u8; RAM_SIZE],
    cart: Option<Cartridge>,
    mapper: Option<Box<dyn Mapper>>,
    registry: MapperRegistry,
}

impl Console {
    /// A console with the built-in mapper set and nothing attached.
    pub fn new() -> Self {
        Console::with_registry(MapperRegistry::default())
    }

    pub fn with_registry(registry: MapperRegistry) -> Self {
        Console {
            cpu: None,
            ram: [0; RAM_SIZE],
            cart: None,
            mapper: None,
            registry,
        }
    }

    /// Insert a cartridge: looks up its mapper in the registry, initializes
    /// it, and installs both. Replaces any cartridge already present.
    pub fn attach_cartridge(&mut self, cart: Cartridge) -> Result<(), Error> {
        let mut mapper = self.registry.create(cart.mapper_id)?;
        mapper.init(&cart);
        self.cart = Some(cart);
        self.mapper = Some(mapper);
        Ok(())
    }

    /// Install a CPU and power-on reset it against the bus. Works before or
    /// after the cartridge is attached.
    pub fn attach_cpu(&mut self, cpu: Cpu) {
        self.cpu = Some(cpu);
        let Console {
            cpu,
            ram,
            cart,
            mapper,
            ..
        } = self;
        let mut bus = CpuBus {
            ram,
            cart: cart
                .as_mut()
                .zip(mapper.as_mut())
                .map(|(c, m)| (c, m.as_mut() as &mut dyn Mapper)),
        };
        if let Some(cpu) = cpu.as_mut() {
            cpu.reset(&mut bus);
        }
    }

    /// Run one CPU instruction. Needs both a CPU and a cartridge.
    pub fn step(&mut self) -> Result<StepTrace, Error> {
        let Console {
            cpu,
            ram,
            cart,
            mapper,
            ..
        } = self;
        let cpu = cpu.as_mut().ok_or(Error::NoCpu)?;
        let cart = cart.as_mut().ok_or(Error::NoCartridge)?;
        let mapper = mapper.as_mut().ok_or(Error::NoCartridge)?;
        let mut bus = CpuBus {
            ram,
            cart: Some((cart, mapper.as_mut())),
        };
        cpu.step(&mut bus)
    }

    pub fn cpu(&self) -> Option<&Cpu> {
        self.cpu.as_ref()
    }

    pub fn cpu_mut(&mut self) -> Option<&mut Cpu> {
        self.cpu.as_mut()
    }

    /// Raw bus read at any address, for drivers and tests.
    pub fn read(&mut self, addr: u16) -> u8 {
        let Console {
            ram, cart, mapper, ..
        } = self;
        let mut bus = CpuBus {
            ram,
            cart: cart
                .as_mut()
                .zip(mapper.as_mut())
                .map(|(c, m)| (c, m.as_mut() as &mut dyn Mapper)),
        };
        bus.read(addr)
    }
}

impl Default for Console {
    fn default() -> Self {
        Console::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::cartridge::PRG_BANK_SIZE;

    /// One-bank NROM image with the program at the start of PRG, visible at
    /// both $8000 and $C000.
    fn test_cartridge(program: &[u8]) -> Cartridge {
        let mut rom = vec![0x4E, 0x45, 0x53, 0x1A, 1, 1, 0, 0];
        rom.resize(16, 0);
        let mut prg = vec![0xEA; PRG_BANK_SIZE];
        prg[..program.len()].copy_from_slice(program);
        rom.extend(&prg);
        rom.extend(std::iter::repeat_n(0u8, 8192));
        Cartridge::from_bytes(&rom).unwrap()
    }

    fn ready_console(program: &[u8]) -> Console {
        let mut console = Console::new();
        console.attach_cartridge(test_cartridge(program)).unwrap();
        console.attach_cpu(Cpu::new());
        console.cpu_mut().unwrap().pc = 0x8000;
        console
    }

    #[test]
    fn step_without_cpu_or_cartridge_reports_what_is_missing() {
        let mut console = Console::new();
        assert!(matches!(console.step(), Err(Error::NoCpu)));

        console.attach_cpu(Cpu::new());
        assert!(matches!(console.step(), Err(Error::NoCartridge)));
    }

    #[test]
    fn attach_cartridge_rejects_unknown_mapper_ids() {
        let mut cart = test_cartridge(&[]);
        cart.mapper_id = 4;
        let mut console = Console::new();
        assert!(matches!(
            console.attach_cartridge(cart),
            Err(Error::UnknownMapper(4))
        ));
        // Nothing was installed.
        assert_eq!(console.read(0x8000), 0);
    }

    #[test]
    fn attach_cpu_applies_power_on_state() {
        let mut console = Console::new();
        console.attach_cartridge(test_cartridge(&[])).unwrap();
        console.attach_cpu(Cpu::new());

        let cpu = console.cpu().unwrap();
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cpu.flags.to_byte(), 0x24);
        assert_eq!((cpu.a, cpu.x, cpu.y), (0, 0, 0));
    }

    #[test]
    fn attach_order_does_not_matter() {
        let mut console = Console::new();
        console.attach_cpu(Cpu::new());
        console.attach_cartridge(test_cartridge(&[0xA9, 0x01])).unwrap();
        console.cpu_mut().unwrap().pc = 0x8000;
        console.step().unwrap();
        assert_eq!(console.cpu().unwrap().a, 0x01);
    }

    #[test]
    fn lda_immediate_end_to_end() {
        // LDA #$42; STA $0200
        let mut console = ready_console(&[0xA9, 0x42, 0x8D, 0x00, 0x02]);
        let cycles = console.cpu().unwrap().cycles;

        console.step().unwrap();
        let cpu = console.cpu().unwrap();
        assert_eq!(cpu.a, 0x42);
        assert!(!cpu.flags.zero && !cpu.flags.negative);
        assert_eq!(cpu.pc, 0x8002);
        assert_eq!(cpu.cycles - cycles, 2);
        console.step().unwrap();
        assert_eq!(console.read(0x0200), 0x42);
        assert_eq!(console.cpu().unwrap().pc, 0x8005);
    }

    #[test]
    fn program_is_visible_in_both_nrom_windows() {
        let mut console = ready_console(&[0xA9, 0x42]);
        assert_eq!(console.read(0x8000), 0xA9);
        assert_eq!(console.read(0xC000), 0xA9);
    }

    #[test]
    fn jsr_rts_round_trip_through_the_console() {
        // JSR $C010 (mirror of $8010); subroutine: LDX #$07; RTS
        let mut program = vec![0x20, 0x10, 0xC0];
        program.resize(0x10, 0xEA);
        program.extend([0xA2, 0x07, 0x60]);
        let mut console = ready_console(&program);

        console.step().unwrap();
        assert_eq!(console.cpu().unwrap().pc, 0xC010);
        console.step().unwrap();
        console.step().unwrap();
        let cpu = console.cpu().unwrap();
        assert_eq!(cpu.x, 0x07);
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn step_surfaces_an_illegal_opcode() {
        let mut console = ready_console(&[0x02]);
        assert!(matches!(
            console.step(),
            Err(Error::IllegalOpcode { opcode: 0x02, pc: 0x8000 })
        ));
    }
}
