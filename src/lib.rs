//! Nescore: the NES CPU core and its memory bus.
//!
//! Implements the CPU side of the Ricoh 2A03 as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide).
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): mirrored RAM, PPU
//!   and I/O registers, test-mode range, cartridge
//! - **cartridge** – flat program ROM from $4020
//! - **config** – test mode and trace options
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU): registers, [status flags](https://www.nesdev.org/wiki/Status_flags),
//!   addressing modes, documented opcodes
//! - **error** – bus and decode errors
//! - **ppu** – [PPU registers](https://www.nesdev.org/wiki/PPU_registers) as seen by the CPU
//! - **trace** – nestest-style instruction log
//!
//! ```
//! use nescore::{CPU, CpuState, ppu::registers::PpuRegisters};
//!
//! // LDA #$FF; ADC #$01; BRK
//! let mut cpu = CPU::new(vec![0xA9, 0xFF, 0x69, 0x01, 0x00], PpuRegisters::new());
//! assert_eq!(cpu.run(10), Ok(CpuState::Halted));
//! assert_eq!(cpu.regs.a, 0x00);
//! assert!(cpu.regs.status.carry());
//! ```

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;
pub mod ppu;
pub mod trace;

pub use bus::{Bus, NesBus, RegisterStore};
pub use config::{Config, TraceStyle};
pub use cpu::cpu::{CPU, CpuState, Registers};
pub use cpu::flags::Status;
pub use error::{Error, Result};
