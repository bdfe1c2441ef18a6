//! PPU (Picture Processing Unit) register interface for the NES.
//!
//! See [PPU registers](https://www.nesdev.org/wiki/PPU_registers). Only the CPU-facing
//! register file is modelled here; rendering is the host's job.

pub mod registers;
