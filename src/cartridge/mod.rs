pub mod cartridge;
pub mod mapper;
