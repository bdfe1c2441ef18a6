//! Errors raised by the memory map, the peripheral registers, and the CPU decoder.
//!
//! Every variant aborts the instruction that caused it; none are retried.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The address does not fit in the 16-bit CPU address space.
    #[error("address ${address:X} is outside the 16-bit address space")]
    AddressOutOfRange { address: u32 },

    /// $4018-$401F is only decoded when the CPU is in test mode.
    #[error("address ${address:04X} is not addressable outside test mode")]
    UnaddressableMemory { address: u16 },

    /// Cartridge space is read-only from the CPU side.
    #[error("write to read-only cartridge address ${address:04X}")]
    ReadOnlyMemory { address: u16 },

    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },

    /// The peripheral register store does not decode this address.
    #[error("no peripheral register at ${address:04X}")]
    UnknownRegister { address: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
