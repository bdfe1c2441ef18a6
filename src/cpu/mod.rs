//! 6502 CPU emulation for the NES.
//!
//! All 151 documented opcodes, decoded through a 256-entry table into an addressing
//! mode and an operation. Memory and I/O go through the [`Bus`](crate::bus::Bus) trait.

pub mod addressing;
pub mod cpu;
pub mod flags;
mod instructions;
pub mod opcodes;
