//! Nestest-style instruction trace.
//!
//! ```text
//! 4020  6D 00 02  ADC  A:00 X:00 Y:00 P:24 SP:FF
//! ```
//!
//! Operand bytes come from [`Bus::peek`]; ones behind a peripheral register print as `??`.
//! `P` is shown with bit 5 set, as the chip pushes it.

use std::fmt;

use ansi_term::{Colour::Green, Style};

use crate::{
    bus::Bus,
    cpu::{cpu::Registers, flags::Status, opcodes::Opcode},
};

/// One executed instruction and the register state before it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub opcode: Opcode,
    /// Opcode byte followed by its operand bytes.
    pub bytes: Vec<Option<u8>>,
    pub regs: Registers,
}

impl TraceLine {
    /// `regs.pc` must point at the opcode byte.
    pub fn capture<B: Bus>(bus: &B, regs: Registers, byte: u8, opcode: Opcode) -> Self {
        let operands = (1..opcode.size()).map(|i| bus.peek(regs.pc.wrapping_add(i as u16)));
        let bytes = std::iter::once(Some(byte)).chain(operands).collect();
        Self { opcode, bytes, regs }
    }

    fn hex_bytes(&self) -> String {
        self.bytes
            .iter()
            .map(|b| b.map_or_else(|| "??".to_string(), |b| format!("{b:02X}")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn registers(&self) -> String {
        let r = &self.regs;
        format!(
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            r.a,
            r.x,
            r.y,
            (r.status | Status::UNUSED).bits(),
            r.sp
        )
    }

    /// The same line with ANSI colours for a terminal.
    pub fn painted(&self) -> String {
        format!(
            "{}  {:<8}  {}  {}",
            Green.paint(format!("{:04X}", self.regs.pc)),
            self.hex_bytes(),
            Style::new().bold().paint(self.opcode.mnemonic.name()),
            Style::new().dimmed().paint(self.registers()),
        )
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04X}  {:<8}  {}  {}",
            self.regs.pc,
            self.hex_bytes(),
            self.opcode.mnemonic.name(),
            self.registers()
        )
    }
}
