//! Memory bus and address decoding for the 2A03.
//!
//! Maps CPU addresses to internal RAM, the peripheral registers, and the cartridge
//! ([CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map)):
//!
//! | Range         | Target                                    |
//! |---------------|-------------------------------------------|
//! | $0000-$1FFF   | 2 KiB RAM, mirrored four times            |
//! | $2000-$3FFF   | PPU registers, mirrored every 8 bytes     |
//! | $4000-$4017   | APU and I/O registers                     |
//! | $4018-$401F   | CPU test-mode registers                   |
//! | $4020-$FFFF   | cartridge ROM                             |

use crate::{
    cartridge::Cartridge,
    config::Config,
    error::{Error, Result},
};

pub const RAM_SIZE: usize = 0x0800;

/// Trait for memory-mapped I/O and bus access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> Result<u8>;
    fn write(&mut self, addr: u16, data: u8) -> Result<()>;

    /// Read without side effects. `None` where reading would disturb a peripheral.
    fn peek(&self, _addr: u16) -> Option<u8> {
        None
    }

    /// Little-endian 16-bit read: low byte at `addr`, high byte at `addr + 1`.
    /// The high address wraps, so a word at $FFFF takes its high byte from $0000.
    fn read_word(&mut self, addr: u16) -> Result<u16> {
        let lo = self.read(addr)?;
        let hi = self.read(addr.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}

/// Memory-mapped register file of a chip on the bus (PPU, APU, I/O).
///
/// The bus forwards addresses unchanged apart from the PPU's 8-byte mirroring;
/// addresses the store does not decode fail with [`Error::UnknownRegister`].
pub trait RegisterStore {
    fn read(&mut self, addr: u16) -> Result<u8>;
    fn write(&mut self, addr: u16, data: u8) -> Result<()>;
}

/// Where a CPU address lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Index into the 2 KiB internal RAM.
    Ram(usize),
    /// PPU register address after mirroring, $2000-$2007.
    PpuRegister(u16),
    /// APU / I/O register, $4000-$4017.
    IoRegister(u16),
    /// CPU test-mode register, $4018-$401F.
    TestMode(u16),
    /// Cartridge address, $4020-$FFFF.
    Cartridge(u16),
}

impl Region {
    pub fn decode(address: u32) -> Result<Self> {
        let addr = u16::try_from(address).map_err(|_| Error::AddressOutOfRange { address })?;
        Ok(match addr {
            0x0000..=0x1FFF => Region::Ram(usize::from(addr) % RAM_SIZE),
            0x2000..=0x3FFF => Region::PpuRegister(0x2000 | (addr & 0x0007)),
            0x4000..=0x4017 => Region::IoRegister(addr),
            0x4018..=0x401F => Region::TestMode(addr),
            0x4020..=0xFFFF => Region::Cartridge(addr),
        })
    }
}

/// Main NES bus: RAM, cartridge, and the peripheral register store.
pub struct NesBus<P> {
    pub ram: [u8; RAM_SIZE],
    pub cart: Cartridge,
    pub peripherals: P,
    test_mode: bool,
}

impl<P: RegisterStore> NesBus<P> {
    /// Create a bus with test mode off.
    pub fn new(cart: Cartridge, peripherals: P) -> Self {
        Self::with_config(cart, peripherals, &Config::default())
    }

    pub fn with_config(cart: Cartridge, peripherals: P, config: &Config) -> Self {
        Self {
            ram: [0; RAM_SIZE],
            cart,
            peripherals,
            test_mode: config.test_mode,
        }
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }
}

impl<P: RegisterStore> Bus for NesBus<P> {
    fn read(&mut self, addr: u16) -> Result<u8> {
        match Region::decode(u32::from(addr))? {
            Region::Ram(index) => Ok(self.ram[index]),
            Region::PpuRegister(reg) | Region::IoRegister(reg) => self.peripherals.read(reg),
            Region::TestMode(reg) if self.test_mode => self.peripherals.read(reg),
            Region::TestMode(address) => Err(Error::UnaddressableMemory { address }),
            Region::Cartridge(addr) => Ok(self.cart.read(addr)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        match Region::decode(u32::from(addr))? {
            Region::Ram(index) => {
                self.ram[index] = data;
                Ok(())
            }
            Region::PpuRegister(reg) | Region::IoRegister(reg) => {
                self.peripherals.write(reg, data)
            }
            Region::TestMode(reg) if self.test_mode => self.peripherals.write(reg, data),
            Region::TestMode(address) => Err(Error::UnaddressableMemory { address }),
            Region::Cartridge(address) => Err(Error::ReadOnlyMemory { address }),
        }
    }

    fn peek(&self, addr: u16) -> Option<u8> {
        match Region::decode(u32::from(addr)).ok()? {
            Region::Ram(index) => Some(self.ram[index]),
            Region::Cartridge(addr) => Some(self.cart.read(addr)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every forwarded access; decodes everything.
    #[derive(Default)]
    struct Recorder {
        reads: Vec<u16>,
        writes: Vec<(u16, u8)>,
    }

    impl RegisterStore for Recorder {
        fn read(&mut self, addr: u16) -> Result<u8> {
            self.reads.push(addr);
            Ok(0x5A)
        }

        fn write(&mut self, addr: u16, data: u8) -> Result<()> {
            self.writes.push((addr, data));
            Ok(())
        }
    }

    fn bus_with(rom: Vec<u8>) -> NesBus<Recorder> {
        NesBus::new(Cartridge::new(rom), Recorder::default())
    }

    #[test]
    fn ram_is_mirrored_four_times() {
        let mut bus = bus_with(vec![]);
        bus.write(0x0801, 0x77).unwrap();

        for alias in [0x0001, 0x0801, 0x1001, 0x1801] {
            assert_eq!(bus.read(alias).unwrap(), 0x77);
        }
    }

    #[test]
    fn ppu_registers_mirror_every_eight_bytes() {
        let mut bus = bus_with(vec![]);

        bus.write(0x3456, 0x12).unwrap(); // $3456 & 7 = 6 -> PPUADDR
        bus.read(0x200A).unwrap(); // -> PPUSTATUS

        assert_eq!(bus.peripherals.writes, vec![(0x2006, 0x12)]);
        assert_eq!(bus.peripherals.reads, vec![0x2002]);
    }

    #[test]
    fn io_registers_are_forwarded_verbatim() {
        let mut bus = bus_with(vec![]);

        bus.write(0x4014, 0x02).unwrap();
        assert_eq!(bus.read(0x4016).unwrap(), 0x5A);

        assert_eq!(bus.peripherals.writes, vec![(0x4014, 0x02)]);
        assert_eq!(bus.peripherals.reads, vec![0x4016]);
    }

    #[test]
    fn test_mode_range_fails_outside_test_mode() {
        let mut bus = bus_with(vec![]);

        assert_eq!(
            bus.read(0x4018),
            Err(Error::UnaddressableMemory { address: 0x4018 })
        );
        assert_eq!(
            bus.write(0x401F, 0),
            Err(Error::UnaddressableMemory { address: 0x401F })
        );
        assert!(bus.peripherals.reads.is_empty());
    }

    #[test]
    fn test_mode_range_is_forwarded_in_test_mode() {
        let config = Config::default().with_test_mode(true);
        let mut bus = NesBus::with_config(Cartridge::default(), Recorder::default(), &config);

        assert_eq!(bus.read(0x401A).unwrap(), 0x5A);
        bus.write(0x401B, 9).unwrap();

        assert_eq!(bus.peripherals.reads, vec![0x401A]);
        assert_eq!(bus.peripherals.writes, vec![(0x401B, 9)]);
    }

    #[test]
    fn cartridge_is_read_only() {
        let mut bus = bus_with(vec![0xA9, 0x01]);

        assert_eq!(bus.read(0x4021).unwrap(), 0x01);
        assert_eq!(
            bus.write(0x4021, 0xFF),
            Err(Error::ReadOnlyMemory { address: 0x4021 })
        );
        assert_eq!(bus.read(0x4021).unwrap(), 0x01);
    }

    #[test]
    fn decode_rejects_addresses_past_sixteen_bits() {
        assert_eq!(
            Region::decode(0x1_0000),
            Err(Error::AddressOutOfRange { address: 0x1_0000 })
        );
        assert_eq!(Region::decode(0xFFFF), Ok(Region::Cartridge(0xFFFF)));
    }

    #[test]
    fn read_word_is_little_endian() {
        let mut bus = bus_with(vec![]);
        bus.write(0x0010, 0x34).unwrap();
        bus.write(0x0011, 0x12).unwrap();

        assert_eq!(bus.read_word(0x0010).unwrap(), 0x1234);
    }

    #[test]
    fn read_word_wraps_past_ffff() {
        let mut rom = vec![0; 0x10000 - 0x4020];
        rom[0xFFFF - 0x4020] = 0x34;
        let mut bus = bus_with(rom);
        bus.write(0x0000, 0x12).unwrap();

        assert_eq!(bus.read_word(0xFFFF), Ok(0x1234));
    }

    #[test]
    fn peek_skips_peripherals() {
        let mut bus = bus_with(vec![0xEA]);
        bus.write(0x0002, 0x99).unwrap();

        assert_eq!(bus.peek(0x0802), Some(0x99));
        assert_eq!(bus.peek(0x4020), Some(0xEA));
        assert_eq!(bus.peek(0x2002), None);
        assert_eq!(bus.peek(0x4018), None);
        assert!(bus.peripherals.reads.is_empty());
    }
}
