//! Instruction semantics, one small method per operation.
//!
//! Z/N always come from [`Status::set_zero_and_negative`]; signed overflow from
//! [`add_overflows`]. Instructions that write memory do so last, so a failed write
//! leaves memory untouched.

use crate::{
    bus::Bus,
    cpu::{
        addressing::Operand,
        cpu::CPU,
        flags::{Status, add_overflows},
        opcodes::Mnemonic,
    },
    error::Result,
};

impl<B: Bus> CPU<B> {
    pub(crate) fn execute(&mut self, mnemonic: Mnemonic, operand: Operand) -> Result<()> {
        use Mnemonic::*;

        match mnemonic {
            Lda => {
                let value = self.load(operand)?;
                self.regs.a = self.set_zn(value);
            }
            Ldx => {
                let value = self.load(operand)?;
                self.regs.x = self.set_zn(value);
            }
            Ldy => {
                let value = self.load(operand)?;
                self.regs.y = self.set_zn(value);
            }
            Sta => self.store(operand, self.regs.a)?,
            Stx => self.store(operand, self.regs.x)?,
            Sty => self.store(operand, self.regs.y)?,

            Adc => {
                let value = self.load(operand)?;
                self.add_with_carry(value);
            }
            // Binary mode only: A - M - !C == A + !M + C
            Sbc => {
                let value = self.load(operand)?;
                self.add_with_carry(!value);
            }
            And => {
                let value = self.load(operand)?;
                self.regs.a = self.set_zn(self.regs.a & value);
            }
            Ora => {
                let value = self.load(operand)?;
                self.regs.a = self.set_zn(self.regs.a | value);
            }
            Eor => {
                let value = self.load(operand)?;
                self.regs.a = self.set_zn(self.regs.a ^ value);
            }
            Cmp => self.compare(self.regs.a, operand)?,
            Cpx => self.compare(self.regs.x, operand)?,
            Cpy => self.compare(self.regs.y, operand)?,
            Bit => {
                let value = self.load(operand)?;
                let status = &mut self.regs.status;
                status.set(Status::ZERO, self.regs.a & value == 0);
                status.set(Status::NEGATIVE, value & 0x80 != 0);
                status.set(Status::OVERFLOW, value & 0x40 != 0);
            }

            Inc => self.modify(operand, |_, value| value.wrapping_add(1))?,
            Dec => self.modify(operand, |_, value| value.wrapping_sub(1))?,
            Inx => self.regs.x = self.set_zn(self.regs.x.wrapping_add(1)),
            Iny => self.regs.y = self.set_zn(self.regs.y.wrapping_add(1)),
            Dex => self.regs.x = self.set_zn(self.regs.x.wrapping_sub(1)),
            Dey => self.regs.y = self.set_zn(self.regs.y.wrapping_sub(1)),

            Asl => self.modify(operand, |status, value| {
                status.set(Status::CARRY, value & 0x80 != 0);
                value << 1
            })?,
            Lsr => self.modify(operand, |status, value| {
                status.set(Status::CARRY, value & 0x01 != 0);
                value >> 1
            })?,
            Rol => self.modify(operand, |status, value| {
                let carry_in = u8::from(status.carry());
                status.set(Status::CARRY, value & 0x80 != 0);
                (value << 1) | carry_in
            })?,
            Ror => self.modify(operand, |status, value| {
                let carry_in = u8::from(status.carry());
                status.set(Status::CARRY, value & 0x01 != 0);
                (value >> 1) | (carry_in << 7)
            })?,

            Bcc => self.branch(!self.regs.status.carry(), operand),
            Bcs => self.branch(self.regs.status.carry(), operand),
            Bne => self.branch(!self.regs.status.zero(), operand),
            Beq => self.branch(self.regs.status.zero(), operand),
            Bpl => self.branch(!self.regs.status.negative(), operand),
            Bmi => self.branch(self.regs.status.negative(), operand),
            Bvc => self.branch(!self.regs.status.overflow(), operand),
            Bvs => self.branch(self.regs.status.overflow(), operand),

            Jmp => self.regs.pc = operand_address(operand),
            Jsr => {
                // PC is past the operand; push the address of its last byte.
                let return_addr = self.regs.pc.wrapping_sub(1);
                self.push_word(return_addr)?;
                self.regs.pc = operand_address(operand);
            }
            Rts => self.regs.pc = self.pop_word()?.wrapping_add(1),
            Rti => {
                let status = self.pop_byte()?;
                self.regs.status = self.regs.status.pulled(status);
                self.regs.pc = self.pop_word()?;
            }

            Pha => self.push_byte(self.regs.a)?,
            Php => self.push_byte(self.regs.status.to_pushed_byte())?,
            Pla => {
                let value = self.pop_byte()?;
                self.regs.a = self.set_zn(value);
            }
            Plp => {
                let value = self.pop_byte()?;
                self.regs.status = self.regs.status.pulled(value);
            }

            Tax => self.regs.x = self.set_zn(self.regs.a),
            Tay => self.regs.y = self.set_zn(self.regs.a),
            Txa => self.regs.a = self.set_zn(self.regs.x),
            Tya => self.regs.a = self.set_zn(self.regs.y),
            Tsx => self.regs.x = self.set_zn(self.regs.sp),
            Txs => self.regs.sp = self.regs.x,

            Clc => self.regs.status.remove(Status::CARRY),
            Sec => self.regs.status.insert(Status::CARRY),
            Cli => self.regs.status.remove(Status::INTERRUPT_DISABLE),
            Sei => self.regs.status.insert(Status::INTERRUPT_DISABLE),
            Cld => self.regs.status.remove(Status::DECIMAL),
            Sed => self.regs.status.insert(Status::DECIMAL),
            Clv => self.regs.status.remove(Status::OVERFLOW),

            Nop => {}
            Brk => self.halt(),
        }
        Ok(())
    }

    /// A + M + C. Sets C, V, Z, N.
    fn add_with_carry(&mut self, value: u8) {
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(value) + u16::from(self.regs.status.carry());
        let result = (sum & 0xFF) as u8;

        self.regs.status.set(Status::CARRY, sum > 0xFF);
        self.regs
            .status
            .set(Status::OVERFLOW, add_overflows(a, value, result));
        self.regs.a = self.set_zn(result);
    }

    /// C = register >= M; Z/N from the difference.
    fn compare(&mut self, register: u8, operand: Operand) -> Result<()> {
        let value = self.load(operand)?;
        self.regs.status.set(Status::CARRY, register >= value);
        self.set_zn(register.wrapping_sub(value));
        Ok(())
    }

    fn branch(&mut self, condition: bool, operand: Operand) {
        if condition {
            self.regs.pc = operand_address(operand);
        }
    }

    fn load(&mut self, operand: Operand) -> Result<u8> {
        match operand {
            Operand::Accumulator => Ok(self.regs.a),
            Operand::Address(addr) => self.bus.read(addr),
        }
    }

    fn store(&mut self, operand: Operand, value: u8) -> Result<()> {
        match operand {
            Operand::Accumulator => {
                self.regs.a = value;
                Ok(())
            }
            Operand::Address(addr) => self.bus.write(addr, value),
        }
    }

    /// Read-modify-write on A or memory; Z/N follow the new value.
    fn modify(&mut self, operand: Operand, op: impl FnOnce(&mut Status, u8) -> u8) -> Result<()> {
        let value = self.load(operand)?;
        let result = op(&mut self.regs.status, value);
        self.set_zn(result);
        self.store(operand, result)
    }

    fn set_zn(&mut self, value: u8) -> u8 {
        self.regs.status.set_zero_and_negative(value);
        value
    }
}

/// Jump and branch targets. The opcode table gives these mnemonics only
/// address-producing modes.
fn operand_address(operand: Operand) -> u16 {
    match operand {
        Operand::Address(addr) => addr,
        Operand::Accumulator => unreachable!("jump target resolved to the accumulator"),
    }
}
