//! PPU register file as seen from the CPU bus.
//!
//! Registers: $2000-$2007 (the bus applies the 8-byte mirroring) and OAMDMA at $4014.
//! Rendering and dot timing live outside this crate; the renderer drives PPUSTATUS
//! through [`PpuRegisters::set_vblank`] and friends.

use crate::{
    bus::RegisterStore,
    error::{Error, Result},
};

/// OAM (Object Attribute Memory): 64 sprites × 4 bytes. Each entry: Y, tile, attr, X.
pub const OAM_LEN: usize = 256;

/// PPU address space: pattern tables, nametables, palettes ($0000-$3FFF).
pub const VRAM_LEN: usize = 0x4000;

const STATUS_VBLANK: u8 = 0x80;
const STATUS_SPRITE_0_HIT: u8 = 0x40;
const STATUS_SPRITE_OVERFLOW: u8 = 0x20;

/// PPUCTRL bit 2: VRAM address increment per PPUDATA access (0: +1, 1: +32).
const CTRL_INCREMENT_32: u8 = 0x04;

/// CPU-visible PPU registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpuRegister {
    Ctrl,
    Mask,
    Status,
    OamAddr,
    OamData,
    Scroll,
    Addr,
    Data,
    OamDma,
}

impl PpuRegister {
    pub const fn address(self) -> u16 {
        match self {
            PpuRegister::Ctrl => 0x2000,
            PpuRegister::Mask => 0x2001,
            PpuRegister::Status => 0x2002,
            PpuRegister::OamAddr => 0x2003,
            PpuRegister::OamData => 0x2004,
            PpuRegister::Scroll => 0x2005,
            PpuRegister::Addr => 0x2006,
            PpuRegister::Data => 0x2007,
            PpuRegister::OamDma => 0x4014,
        }
    }
}

impl TryFrom<u16> for PpuRegister {
    type Error = Error;

    fn try_from(address: u16) -> Result<Self> {
        Ok(match address {
            0x2000 => PpuRegister::Ctrl,
            0x2001 => PpuRegister::Mask,
            0x2002 => PpuRegister::Status,
            0x2003 => PpuRegister::OamAddr,
            0x2004 => PpuRegister::OamData,
            0x2005 => PpuRegister::Scroll,
            0x2006 => PpuRegister::Addr,
            0x2007 => PpuRegister::Data,
            0x4014 => PpuRegister::OamDma,
            _ => return Err(Error::UnknownRegister { address }),
        })
    }
}

/// Register state plus the memories the registers give access to.
pub struct PpuRegisters {
    pub ctrl: u8,
    pub mask: u8,
    /// Status flags in PPUSTATUS layout (bits 7-5).
    pub status: u8,
    pub oam_addr: u8,
    pub oam: [u8; OAM_LEN],
    /// Last bytes written to PPUSCROLL: (X, Y).
    pub scroll: (u8, u8),
    /// Current VRAM address (15 bits used, wrapped to $3FFF on access).
    pub addr: u16,
    /// Shared first/second write toggle for PPUSCROLL and PPUADDR; cleared by reading PPUSTATUS.
    pub write_latch: bool,
    /// Page last written to OAMDMA.
    pub oam_dma: u8,
    pub vram: Box<[u8; VRAM_LEN]>,
    /// Last byte written to any register, returned by the write-only ones.
    last_write: u8,
}

impl PpuRegisters {
    pub fn new() -> Self {
        Self {
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            oam: [0; OAM_LEN],
            scroll: (0, 0),
            addr: 0,
            write_latch: false,
            oam_dma: 0,
            vram: Box::new([0; VRAM_LEN]),
            last_write: 0,
        }
    }

    pub fn set_vblank(&mut self, on: bool) {
        self.set_status_bit(STATUS_VBLANK, on);
    }

    pub fn set_sprite_0_hit(&mut self, on: bool) {
        self.set_status_bit(STATUS_SPRITE_0_HIT, on);
    }

    pub fn set_sprite_overflow(&mut self, on: bool) {
        self.set_status_bit(STATUS_SPRITE_OVERFLOW, on);
    }

    fn set_status_bit(&mut self, bit: u8, on: bool) {
        if on {
            self.status |= bit;
        } else {
            self.status &= !bit;
        }
    }

    /// Read PPUSTATUS ($2002): returns status, then clears vblank and the write toggle.
    fn read_status(&mut self) -> u8 {
        let status = self.status;
        self.status &= !STATUS_VBLANK;
        self.write_latch = false;
        status
    }

    /// Write OAMDATA ($2004); writes OAM and increments OAMADDR.
    fn write_oam_data(&mut self, data: u8) {
        self.oam[self.oam_addr as usize] = data;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    /// Write PPUSCROLL ($2005): first write = X, second write = Y.
    fn write_scroll(&mut self, data: u8) {
        if !self.write_latch {
            self.scroll.0 = data;
        } else {
            self.scroll.1 = data;
        }
        self.write_latch = !self.write_latch;
    }

    /// Write PPUADDR ($2006): two-byte write for 16-bit VRAM address (high then low).
    fn write_addr(&mut self, data: u8) {
        if !self.write_latch {
            self.addr = u16::from(data) << 8;
        } else {
            self.addr |= u16::from(data);
        }
        self.write_latch = !self.write_latch;
    }

    /// Read PPUDATA ($2007); auto-increments VRAM address.
    fn read_data(&mut self) -> u8 {
        let data = self.vram[self.vram_index()];
        self.increment_addr();
        data
    }

    /// Write PPUDATA ($2007): writes VRAM at current address, then increments.
    fn write_data(&mut self, data: u8) {
        let index = self.vram_index();
        self.vram[index] = data;
        self.increment_addr();
    }

    fn vram_index(&self) -> usize {
        usize::from(self.addr & 0x3FFF)
    }

    // Increment by 32 if PPUCTRL bit 2 set, else 1
    fn increment_addr(&mut self) {
        let inc = if self.ctrl & CTRL_INCREMENT_32 != 0 { 32 } else { 1 };
        self.addr = self.addr.wrapping_add(inc) & 0x3FFF;
    }
}

impl Default for PpuRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterStore for PpuRegisters {
    fn read(&mut self, addr: u16) -> Result<u8> {
        Ok(match PpuRegister::try_from(addr)? {
            PpuRegister::Status => self.read_status(),
            PpuRegister::OamData => self.oam[self.oam_addr as usize],
            PpuRegister::Data => self.read_data(),
            PpuRegister::Ctrl => self.ctrl,
            PpuRegister::Mask => self.mask,
            PpuRegister::OamAddr => self.oam_addr,
            PpuRegister::Scroll | PpuRegister::Addr => self.last_write,
            PpuRegister::OamDma => self.oam_dma,
        })
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        match PpuRegister::try_from(addr)? {
            PpuRegister::Ctrl => self.ctrl = data,
            PpuRegister::Mask => self.mask = data,
            // PPUSTATUS is read-only; the write only lands on the data bus.
            PpuRegister::Status => {}
            PpuRegister::OamAddr => self.oam_addr = data,
            PpuRegister::OamData => self.write_oam_data(data),
            PpuRegister::Scroll => self.write_scroll(data),
            PpuRegister::Addr => self.write_addr(data),
            PpuRegister::Data => self.write_data(data),
            PpuRegister::OamDma => self.oam_dma = data,
        }
        self.last_write = data;
        Ok(())
    }
}
