use crate::{
    bus::{Bus, NesBus, RegisterStore},
    cartridge::Cartridge,
    config::{Config, TraceStyle},
    cpu::{flags::Status, opcodes},
    error::{Error, Result},
    trace::TraceLine,
};

/// PC at power-up: the first cartridge-mapped address.
pub const RESET_PC: u16 = 0x4020;
/// SP at power-up; the first push lands on $01FF.
pub const RESET_SP: u8 = 0xFF;
/// The stack lives in RAM page 1.
pub const STACK_PAGE: u16 = 0x0100;

/// Architectural register state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: Status,
}

impl Registers {
    pub const RESET: Registers = Registers {
        a: 0,
        x: 0,
        y: 0,
        sp: RESET_SP,
        pc: RESET_PC,
        status: Status::RESET,
    };
}

impl Default for Registers {
    fn default() -> Self {
        Self::RESET
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    Running,
    /// Reached through BRK. Terminal: build a new CPU to run again.
    Halted,
}

pub struct CPU<B: Bus> {
    pub regs: Registers,
    pub bus: B,
    state: CpuState,
    trace_style: Option<TraceStyle>,
}

impl<P: RegisterStore> CPU<NesBus<P>> {
    /// CPU wired to a NES bus holding `prg_rom` and `peripherals`.
    pub fn new(prg_rom: Vec<u8>, peripherals: P) -> Self {
        Self::with_config(prg_rom, peripherals, Config::default())
    }

    pub fn with_config(prg_rom: Vec<u8>, peripherals: P, config: Config) -> Self {
        let bus = NesBus::with_config(Cartridge::new(prg_rom), peripherals, &config);
        Self::with_bus(bus, config)
    }
}

impl<B: Bus> CPU<B> {
    pub fn with_bus(bus: B, config: Config) -> Self {
        Self {
            regs: Registers::RESET,
            bus,
            state: CpuState::Running,
            trace_style: config.trace,
        }
    }

    pub fn state(&self) -> CpuState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// Execute one instruction.
    ///
    /// On error the registers are rolled back to their values before the opcode fetch
    /// and the error is returned; the CPU stays `Running`. A halted CPU does nothing.
    pub fn step(&mut self) -> Result<CpuState> {
        if self.is_halted() {
            return Ok(CpuState::Halted);
        }

        let saved = self.regs;
        match self.execute_next() {
            Ok(()) => Ok(self.state),
            Err(err) => {
                self.regs = saved;
                tracing::warn!(pc = saved.pc, %err, "instruction aborted");
                Err(err)
            }
        }
    }

    /// Step until the CPU halts or `max_instructions` have run.
    pub fn run(&mut self, max_instructions: usize) -> Result<CpuState> {
        for _ in 0..max_instructions {
            if self.step()? == CpuState::Halted {
                break;
            }
        }
        Ok(self.state)
    }

    pub(crate) fn halt(&mut self) {
        tracing::debug!(pc = self.regs.pc, "cpu halted");
        self.state = CpuState::Halted;
    }

    fn execute_next(&mut self) -> Result<()> {
        let pc = self.regs.pc;
        let byte = self.fetch_byte()?;
        let opcode = opcodes::decode(byte).ok_or(Error::IllegalOpcode { opcode: byte, pc })?;

        if let Some(style) = self.trace_style {
            self.trace(pc, byte, opcode, style);
        }

        let operand = self.resolve(opcode.mode)?;
        self.execute(opcode.mnemonic, operand)
    }

    pub(crate) fn fetch_byte(&mut self) -> Result<u8> {
        let byte = self.bus.read(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(byte)
    }

    pub(crate) fn fetch_word(&mut self) -> Result<u16> {
        let word = self.bus.read_word(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(2);
        Ok(word)
    }

    fn trace(&self, pc: u16, byte: u8, opcode: opcodes::Opcode, style: TraceStyle) {
        let line = TraceLine::capture(&self.bus, Registers { pc, ..self.regs }, byte, opcode);
        match style {
            TraceStyle::Plain => tracing::trace!(target: "nescore::trace", "{line}"),
            TraceStyle::Colored => {
                tracing::trace!(target: "nescore::trace", "{}", line.painted())
            }
        }
    }

    pub fn push_byte(&mut self, value: u8) -> Result<()> {
        self.bus.write(STACK_PAGE | u16::from(self.regs.sp), value)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        Ok(())
    }

    pub fn pop_byte(&mut self) -> Result<u8> {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.bus.read(STACK_PAGE | u16::from(self.regs.sp))
    }

    /// High byte first, so the low byte sits at the lower address.
    pub fn push_word(&mut self, value: u16) -> Result<()> {
        let [lo, hi] = value.to_le_bytes();
        self.push_byte(hi)?;
        self.push_byte(lo)
    }

    pub fn pop_word(&mut self) -> Result<u16> {
        let lo = self.pop_byte()?;
        let hi = self.pop_byte()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}
