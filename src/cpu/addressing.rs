//! Addressing modes and effective-address resolution.
//!
//! Resolution consumes the operand bytes after the opcode and yields an [`Operand`].
//! Immediate operands resolve to the address of the immediate byte, so every memory
//! operand is read through the bus the same way.

use crate::{bus::Bus, cpu::cpu::CPU, error::Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand (CLC, RTS, ...).
    Implied,
    /// Operates on A (ASL A, ROR A, ...).
    Accumulator,
    /// `#$nn`
    Immediate,
    /// `$nn`
    ZeroPage,
    /// `$nn,X`, wrapping inside the zero page.
    ZeroPageX,
    /// `$nn,Y`, wrapping inside the zero page.
    ZeroPageY,
    /// Signed offset from the PC after the operand (branches).
    Relative,
    /// `$nnnn`
    Absolute,
    /// `$nnnn,X` with 16-bit wrap.
    AbsoluteX,
    /// `$nnnn,Y` with 16-bit wrap.
    AbsoluteY,
    /// `($nnnn)`, JMP only.
    Indirect,
    /// `($nn,X)`
    IndirectX,
    /// `($nn),Y`
    IndirectY,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> usize {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Resolved operand of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The accumulator. Implied-mode instructions also get this and ignore it.
    Accumulator,
    /// Effective address (for branches: the branch target).
    Address(u16),
}

/// Zero-page base plus index; never leaves page 0.
pub fn zero_page_indexed(base: u8, index: u8) -> u16 {
    u16::from(base.wrapping_add(index))
}

impl<B: Bus> CPU<B> {
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Result<Operand> {
        let addr = match mode {
            AddressingMode::Implied | AddressingMode::Accumulator => {
                return Ok(Operand::Accumulator);
            }
            AddressingMode::Immediate => {
                let addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                addr
            }
            AddressingMode::ZeroPage => u16::from(self.fetch_byte()?),
            AddressingMode::ZeroPageX => zero_page_indexed(self.fetch_byte()?, self.regs.x),
            AddressingMode::ZeroPageY => zero_page_indexed(self.fetch_byte()?, self.regs.y),
            AddressingMode::Relative => {
                let offset = self.fetch_byte()? as i8;
                self.regs.pc.wrapping_add_signed(i16::from(offset))
            }
            AddressingMode::Absolute => self.fetch_word()?,
            AddressingMode::AbsoluteX => self.fetch_word()?.wrapping_add(u16::from(self.regs.x)),
            AddressingMode::AbsoluteY => self.fetch_word()?.wrapping_add(u16::from(self.regs.y)),
            AddressingMode::Indirect => {
                let ptr = self.fetch_word()?;
                // The high byte comes from the same page: JMP ($10FF) reads $10FF and $1000.
                let hi_ptr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let lo = self.bus.read(ptr)?;
                let hi = self.bus.read(hi_ptr)?;
                u16::from_le_bytes([lo, hi])
            }
            AddressingMode::IndirectX => {
                let zp = self.fetch_byte()?.wrapping_add(self.regs.x);
                self.read_zero_page_word(zp)?
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte()?;
                self.read_zero_page_word(zp)?
                    .wrapping_add(u16::from(self.regs.y))
            }
        };
        Ok(Operand::Address(addr))
    }

    /// Pointer stored in the zero page; the high byte wraps to $00 after $FF.
    fn read_zero_page_word(&mut self, zp: u8) -> Result<u16> {
        let lo = self.bus.read(u16::from(zp))?;
        let hi = self.bus.read(u16::from(zp.wrapping_add(1)))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}
