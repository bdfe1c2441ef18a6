//! Cartridge program ROM.
//!
//! No mapper: the ROM image is laid out linearly from $4020, so CPU address `a`
//! reads `prg_rom[a - $4020]`.

/// First CPU address decoded to the cartridge.
pub const CARTRIDGE_START: u16 = 0x4020;

/// Value read from cartridge space that the ROM image does not cover.
pub const OPEN_BUS: u8 = 0x00;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cartridge {
    prg_rom: Vec<u8>,
}

impl Cartridge {
    pub fn new(prg_rom: Vec<u8>) -> Self {
        Self { prg_rom }
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    /// Read the ROM byte behind CPU address `addr` ($4020-$FFFF).
    pub fn read(&self, addr: u16) -> u8 {
        addr.checked_sub(CARTRIDGE_START)
            .and_then(|offset| self.prg_rom.get(offset as usize))
            .copied()
            .unwrap_or(OPEN_BUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_offset_from_cartridge_start() {
        let cart = Cartridge::new(vec![0xA9, 0x42, 0x00]);

        assert_eq!(cart.read(0x4020), 0xA9);
        assert_eq!(cart.read(0x4021), 0x42);
        assert_eq!(cart.read(0x4022), 0x00);
        assert_eq!(cart.prg_rom(), &[0xA9, 0x42, 0x00]);
    }

    #[test]
    fn reads_past_the_image_see_open_bus() {
        let cart = Cartridge::new(vec![0xEA; 4]);

        assert_eq!(cart.read(0x4024), OPEN_BUS);
        assert_eq!(cart.read(0xFFFF), OPEN_BUS);
    }
}
