//! Mapper contract and the mapper registry.
//!
//! A mapper owns the bank-switching state for one board type; the console
//! owns the cartridge and passes it in at every call, so mappers stay free
//! of back-references.

use crate::cartridge::cartridge::Cartridge;
use crate::error::Error;

/// Board-specific address translation for cartridge space (>= $4020).
pub trait Mapper {
    /// One-time setup after the cartridge is attached (bank counts etc.).
    fn init(&mut self, cart: &Cartridge);
    fn read(&self, cart: &Cartridge, addr: u16) -> u8;
    fn write(&mut self, cart: &mut Cartridge, addr: u16, data: u8);
}

type MapperBuilder = fn() -> Box<dyn Mapper>;

/// Explicit id-to-constructor table. Built once at startup; nothing global.
pub struct MapperRegistry {
    builders: Vec<(u8, MapperBuilder)>,
}

impl MapperRegistry {
    /// An empty registry, for drivers that wire their own board set.
    pub fn empty() -> Self {
        MapperRegistry {
            builders: Vec::new(),
        }
    }

    /// Register a constructor for a mapper id, replacing any previous one.
    pub fn register(&mut self, id: u8, builder: MapperBuilder) {
        self.builders.retain(|(existing, _)| *existing != id);
        self.builders.push((id, builder));
    }

    /// Instantiate the mapper for an id.
    pub fn create(&self, id: u8) -> Result<Box<dyn Mapper>, Error> {
        self.builders
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, builder)| builder())
            .ok_or(Error::UnknownMapper(id))
    }
}

impl Default for MapperRegistry {
    /// The built-in board set: NROM as mapper 0.
    fn default() -> Self {
        let mut registry = MapperRegistry::empty();
        registry.register(0, || Box::new(super::mapper0::Nrom::new()));
        registry
    }
}
