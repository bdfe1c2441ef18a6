//! 6502 processor status register (P) flag bits.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        const CARRY = 1 << 0;
        const ZERO = 1 << 1;
        const INTERRUPT_DISABLE = 1 << 2;
        const DECIMAL = 1 << 3;  // Stored, but the 2A03 ALU ignores it
        const BREAK = 1 << 4;
        /// Not a flag: always 1 in the byte pushed to the stack.
        const UNUSED = 1 << 5;
        const OVERFLOW = 1 << 6;
        const NEGATIVE = 1 << 7;
    }
}

impl Status {
    /// Power-up state: interrupts disabled, everything else clear.
    pub const RESET: Status = Status::INTERRUPT_DISABLE;

    pub fn carry(self) -> bool {
        self.contains(Status::CARRY)
    }

    pub fn zero(self) -> bool {
        self.contains(Status::ZERO)
    }

    pub fn interrupt_disable(self) -> bool {
        self.contains(Status::INTERRUPT_DISABLE)
    }

    pub fn decimal(self) -> bool {
        self.contains(Status::DECIMAL)
    }

    pub fn break_flag(self) -> bool {
        self.contains(Status::BREAK)
    }

    pub fn overflow(self) -> bool {
        self.contains(Status::OVERFLOW)
    }

    pub fn negative(self) -> bool {
        self.contains(Status::NEGATIVE)
    }

    /// Replace Z and N with the ones derived from `value`.
    pub fn set_zero_and_negative(&mut self, value: u8) {
        self.remove(Status::ZERO | Status::NEGATIVE);
        self.insert(derive_flags(value));
    }

    /// Byte pushed by PHP: B and bit 5 set.
    pub fn to_pushed_byte(self) -> u8 {
        (self | Status::BREAK | Status::UNUSED).bits()
    }

    /// Status after PLP/RTI pull `byte`: B is not a real latch, so it keeps its value;
    /// bit 5 is dropped.
    pub fn pulled(self, byte: u8) -> Status {
        let mut pulled = Status::from_bits_truncate(byte) - Status::BREAK - Status::UNUSED;
        pulled.set(Status::BREAK, self.break_flag());
        pulled
    }
}

/// Z and N as set by any instruction producing `value`.
pub fn derive_flags(value: u8) -> Status {
    let mut flags = Status::empty();
    flags.set(Status::ZERO, value == 0);
    flags.set(Status::NEGATIVE, value & 0x80 != 0);
    flags
}

/// Signed overflow of `a + operand = result`: both inputs share a sign the result lacks.
/// SBC goes through here with the operand already complemented.
pub fn add_overflows(a: u8, operand: u8, result: u8) -> bool {
    (!(a ^ operand) & (a ^ result) & 0x80) != 0
}
