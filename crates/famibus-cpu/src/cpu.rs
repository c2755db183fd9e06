//! Instruction-stepped MOS 6502 core.
//!
//! The CPU owns only its register file and cycle counter; all memory
//! traffic goes through the [`Memory`] capability handed into each
//! call. One call to [`Cpu::run_next_instruction`] performs a full
//! fetch/decode/execute and returns the authentic cycle count,
//! including page-cross and branch penalties. Interrupt entry is
//! driven externally: the stepper decides when to call
//! [`Cpu::trigger_nmi`] or [`Cpu::oam_dma_pause`].

use famibus_support::bits::{bit_is_set, set_low_byte, word};
use famibus_support::Memory;

use crate::addressing::AddrMode;
use crate::opcodes::{Legality, Mnemonic, OPCODES};
use crate::status::Status;
use crate::{vectors, CpuError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much of the unofficial opcode space is allowed to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndocumentedLevel {
    /// Official opcodes only.
    Forbid,
    /// Official plus the deterministic unofficial opcodes.
    Stable,
    /// Everything except the bus-jamming opcodes.
    #[default]
    Full,
}

impl UndocumentedLevel {
    fn permits(self, legality: Legality) -> bool {
        match legality {
            Legality::Official => true,
            Legality::Stable => !matches!(self, Self::Forbid),
            Legality::Unstable => matches!(self, Self::Full),
            Legality::Jam => false,
        }
    }
}

/// CPU behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuConfig {
    /// Unofficial-opcode support level.
    pub undocumented_support_level: UndocumentedLevel,
    /// Treat a pull from an empty stack as an error instead of
    /// letting the stack pointer wrap.
    pub stack_underflow_causes_exception: bool,
}

/// Register-file snapshot for save states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpuState {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer.
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Status flags.
    pub status: u8,
    /// Total cycles executed.
    pub cycles: u64,
}

/// The 6502 CPU.
pub struct Cpu {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: Status,
    cycles: u64,
    config: CpuConfig,
}

/// Base of the hardware stack page.
const STACK_BASE: u16 = 0x0100;

fn page_crossed(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

impl Cpu {
    /// Create a CPU with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    /// Create a CPU with explicit behavior knobs.
    #[must_use]
    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: Status::power_on(),
            cycles: 0,
            config,
        }
    }

    /// Power-on / reset sequence.
    ///
    /// Loads PC from the reset vector and returns the 7 cycles the
    /// sequence consumes.
    pub fn reset(&mut self, mem: &mut impl Memory) -> u32 {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = Status::power_on();
        self.pc = self.read_word(mem, vectors::RESET);
        log::debug!("CPU reset, PC = ${:04X}", self.pc);
        self.cycles += 7;
        7
    }

    /// Fetch, decode, and execute one instruction.
    ///
    /// Returns the cycle count including page-cross and branch
    /// penalties.
    ///
    /// # Errors
    ///
    /// [`CpuError::UnsupportedOpcode`] when the opcode is not allowed
    /// at the configured support level, [`CpuError::StackUnderflow`]
    /// when a pull wraps an empty stack and the underflow knob is set.
    #[allow(clippy::too_many_lines)] // one arm per mnemonic
    pub fn run_next_instruction(&mut self, mem: &mut impl Memory) -> Result<u32, CpuError> {
        let opcode_addr = self.pc;
        let opcode = self.fetch_byte(mem);
        let entry = OPCODES[opcode as usize];

        if !self
            .config
            .undocumented_support_level
            .permits(entry.legality)
        {
            return Err(CpuError::UnsupportedOpcode {
                opcode,
                addr: opcode_addr,
            });
        }

        let mut cycles = u32::from(entry.cycles);
        let mode = entry.mode;

        match entry.mnemonic {
            // Loads and stores
            Mnemonic::Lda => {
                let (value, crossed) = self.load(mem, mode);
                self.a = value;
                self.status.set_zn(value);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Ldx => {
                let (value, crossed) = self.load(mem, mode);
                self.x = value;
                self.status.set_zn(value);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Ldy => {
                let (value, crossed) = self.load(mem, mode);
                self.y = value;
                self.status.set_zn(value);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Sta => {
                let (addr, _) = self.operand_addr(mem, mode);
                mem.write(addr, self.a);
            }
            Mnemonic::Stx => {
                let (addr, _) = self.operand_addr(mem, mode);
                mem.write(addr, self.x);
            }
            Mnemonic::Sty => {
                let (addr, _) = self.operand_addr(mem, mode);
                mem.write(addr, self.y);
            }

            // Transfers
            Mnemonic::Tax => {
                self.x = self.a;
                self.status.set_zn(self.x);
            }
            Mnemonic::Tay => {
                self.y = self.a;
                self.status.set_zn(self.y);
            }
            Mnemonic::Tsx => {
                self.x = self.sp;
                self.status.set_zn(self.x);
            }
            Mnemonic::Txa => {
                self.a = self.x;
                self.status.set_zn(self.a);
            }
            Mnemonic::Txs => self.sp = self.x,
            Mnemonic::Tya => {
                self.a = self.y;
                self.status.set_zn(self.a);
            }

            // Arithmetic
            Mnemonic::Adc => {
                let (value, crossed) = self.load(mem, mode);
                self.adc(value);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Sbc => {
                let (value, crossed) = self.load(mem, mode);
                self.sbc(value);
                cycles += penalty(entry.page_penalty, crossed);
            }

            // Compares
            Mnemonic::Cmp => {
                let (value, crossed) = self.load(mem, mode);
                self.compare(self.a, value);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Cpx => {
                let (value, _) = self.load(mem, mode);
                self.compare(self.x, value);
            }
            Mnemonic::Cpy => {
                let (value, _) = self.load(mem, mode);
                self.compare(self.y, value);
            }

            // Logic
            Mnemonic::And => {
                let (value, crossed) = self.load(mem, mode);
                self.a &= value;
                self.status.set_zn(self.a);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Eor => {
                let (value, crossed) = self.load(mem, mode);
                self.a ^= value;
                self.status.set_zn(self.a);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Ora => {
                let (value, crossed) = self.load(mem, mode);
                self.a |= value;
                self.status.set_zn(self.a);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Bit => {
                let (value, _) = self.load(mem, mode);
                self.status.set(Status::Z, self.a & value == 0);
                self.status.set(Status::N, bit_is_set(value, 7));
                self.status.set(Status::V, bit_is_set(value, 6));
            }

            // Shifts and rotates
            Mnemonic::Asl => self.modify(mem, mode, Self::asl_value),
            Mnemonic::Lsr => self.modify(mem, mode, Self::lsr_value),
            Mnemonic::Rol => self.modify(mem, mode, Self::rol_value),
            Mnemonic::Ror => self.modify(mem, mode, Self::ror_value),

            // Increments and decrements
            Mnemonic::Inc => self.modify(mem, mode, Self::inc_value),
            Mnemonic::Dec => self.modify(mem, mode, Self::dec_value),
            Mnemonic::Inx => {
                self.x = self.x.wrapping_add(1);
                self.status.set_zn(self.x);
            }
            Mnemonic::Iny => {
                self.y = self.y.wrapping_add(1);
                self.status.set_zn(self.y);
            }
            Mnemonic::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.status.set_zn(self.x);
            }
            Mnemonic::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.status.set_zn(self.y);
            }

            // Jumps and subroutines
            Mnemonic::Jmp => {
                let (addr, _) = self.operand_addr(mem, mode);
                self.pc = addr;
            }
            Mnemonic::Jsr => {
                let target = self.fetch_word(mem);
                self.push_word(mem, self.pc.wrapping_sub(1));
                self.pc = target;
            }
            Mnemonic::Rts => {
                self.pc = self.pull_word(mem)?.wrapping_add(1);
            }
            Mnemonic::Rti => {
                let bits = self.pull(mem)?;
                self.status = (Status::from_bits_truncate(bits) - Status::B) | Status::U;
                self.pc = self.pull_word(mem)?;
            }
            Mnemonic::Brk => {
                // BRK skips a padding byte before pushing the return address
                self.pc = self.pc.wrapping_add(1);
                self.push_word(mem, self.pc);
                self.push(mem, (self.status | Status::B | Status::U).bits());
                self.status.insert(Status::I);
                self.pc = self.read_word(mem, vectors::IRQ);
            }

            // Branches
            Mnemonic::Bcc => cycles += self.branch(mem, !self.status.contains(Status::C)),
            Mnemonic::Bcs => cycles += self.branch(mem, self.status.contains(Status::C)),
            Mnemonic::Bne => cycles += self.branch(mem, !self.status.contains(Status::Z)),
            Mnemonic::Beq => cycles += self.branch(mem, self.status.contains(Status::Z)),
            Mnemonic::Bpl => cycles += self.branch(mem, !self.status.contains(Status::N)),
            Mnemonic::Bmi => cycles += self.branch(mem, self.status.contains(Status::N)),
            Mnemonic::Bvc => cycles += self.branch(mem, !self.status.contains(Status::V)),
            Mnemonic::Bvs => cycles += self.branch(mem, self.status.contains(Status::V)),

            // Stack
            Mnemonic::Pha => self.push(mem, self.a),
            Mnemonic::Php => self.push(mem, (self.status | Status::B | Status::U).bits()),
            Mnemonic::Pla => {
                self.a = self.pull(mem)?;
                self.status.set_zn(self.a);
            }
            Mnemonic::Plp => {
                let bits = self.pull(mem)?;
                self.status = (Status::from_bits_truncate(bits) - Status::B) | Status::U;
            }

            // Flags
            Mnemonic::Clc => self.status.remove(Status::C),
            Mnemonic::Cld => self.status.remove(Status::D),
            Mnemonic::Cli => self.status.remove(Status::I),
            Mnemonic::Clv => self.status.remove(Status::V),
            Mnemonic::Sec => self.status.insert(Status::C),
            Mnemonic::Sed => self.status.insert(Status::D),
            Mnemonic::Sei => self.status.insert(Status::I),

            Mnemonic::Nop => {
                // Multi-byte NOP variants still perform the operand read
                if mode != AddrMode::Implied {
                    let (_, crossed) = self.load(mem, mode);
                    cycles += penalty(entry.page_penalty, crossed);
                }
            }

            // Unofficial, stable
            Mnemonic::Lax => {
                let (value, crossed) = self.load(mem, mode);
                self.a = value;
                self.x = value;
                self.status.set_zn(value);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Sax => {
                let (addr, _) = self.operand_addr(mem, mode);
                mem.write(addr, self.a & self.x);
            }
            Mnemonic::Dcp => {
                let value = self.rmw(mem, mode, |v| v.wrapping_sub(1));
                self.compare(self.a, value);
            }
            Mnemonic::Isc => {
                let value = self.rmw(mem, mode, |v| v.wrapping_add(1));
                self.sbc(value);
            }
            Mnemonic::Slo => {
                let (addr, _) = self.operand_addr(mem, mode);
                let shifted = self.asl_value(mem.read(addr));
                mem.write(addr, shifted);
                self.a |= shifted;
                self.status.set_zn(self.a);
            }
            Mnemonic::Rla => {
                let (addr, _) = self.operand_addr(mem, mode);
                let rotated = self.rol_value(mem.read(addr));
                mem.write(addr, rotated);
                self.a &= rotated;
                self.status.set_zn(self.a);
            }
            Mnemonic::Sre => {
                let (addr, _) = self.operand_addr(mem, mode);
                let shifted = self.lsr_value(mem.read(addr));
                mem.write(addr, shifted);
                self.a ^= shifted;
                self.status.set_zn(self.a);
            }
            Mnemonic::Rra => {
                let (addr, _) = self.operand_addr(mem, mode);
                let rotated = self.ror_value(mem.read(addr));
                mem.write(addr, rotated);
                self.adc(rotated);
            }

            // Unofficial, unstable
            Mnemonic::Anc => {
                let (value, _) = self.load(mem, mode);
                self.a &= value;
                self.status.set_zn(self.a);
                self.status.set(Status::C, bit_is_set(self.a, 7));
            }
            Mnemonic::Alr => {
                let (value, _) = self.load(mem, mode);
                let masked = self.a & value;
                self.a = self.lsr_value(masked);
            }
            Mnemonic::Arr => {
                let (value, _) = self.load(mem, mode);
                let carry_in = u8::from(self.status.contains(Status::C)) << 7;
                self.a = ((self.a & value) >> 1) | carry_in;
                self.status.set_zn(self.a);
                self.status.set(Status::C, bit_is_set(self.a, 6));
                self.status
                    .set(Status::V, bit_is_set(self.a, 6) != bit_is_set(self.a, 5));
            }
            Mnemonic::Sbx => {
                let (value, _) = self.load(mem, mode);
                let masked = self.a & self.x;
                self.status.set(Status::C, masked >= value);
                self.x = masked.wrapping_sub(value);
                self.status.set_zn(self.x);
            }
            Mnemonic::Las => {
                let (value, crossed) = self.load(mem, mode);
                let result = value & self.sp;
                self.a = result;
                self.x = result;
                self.sp = result;
                self.status.set_zn(result);
                cycles += penalty(entry.page_penalty, crossed);
            }
            Mnemonic::Sha => {
                let (addr, _) = self.operand_addr(mem, mode);
                mem.write(addr, self.a & self.x & high_plus_one(addr));
            }
            Mnemonic::Shx => {
                let (addr, _) = self.operand_addr(mem, mode);
                mem.write(addr, self.x & high_plus_one(addr));
            }
            Mnemonic::Shy => {
                let (addr, _) = self.operand_addr(mem, mode);
                mem.write(addr, self.y & high_plus_one(addr));
            }
            Mnemonic::Tas => {
                let (addr, _) = self.operand_addr(mem, mode);
                self.sp = self.a & self.x;
                mem.write(addr, self.sp & high_plus_one(addr));
            }
            Mnemonic::Ane => {
                let (value, _) = self.load(mem, mode);
                // Magic constant for the analog bus interaction
                self.a = (self.a | 0xEE) & self.x & value;
                self.status.set_zn(self.a);
            }
            Mnemonic::Lxa => {
                let (value, _) = self.load(mem, mode);
                self.a = (self.a | 0xEE) & value;
                self.x = self.a;
                self.status.set_zn(self.a);
            }

            // Never reached: Jam fails the support check above
            Mnemonic::Jam => unreachable!("jam opcodes are rejected before dispatch"),
        }

        self.cycles += u64::from(cycles);
        Ok(cycles)
    }

    /// Enter the NMI handler.
    ///
    /// Pushes PC and status (B clear), sets I, loads the NMI vector,
    /// and returns the 7 cycles interrupt entry takes.
    pub fn trigger_nmi(&mut self, mem: &mut impl Memory) -> u32 {
        self.push_word(mem, self.pc);
        self.push(mem, ((self.status | Status::U) - Status::B).bits());
        self.status.insert(Status::I);
        self.pc = self.read_word(mem, vectors::NMI);
        self.cycles += 7;
        7
    }

    /// Account for the CPU stall after an OAM DMA transfer.
    ///
    /// No register state changes. Returns 513 cycles, or 514 when the
    /// stall begins on an odd CPU cycle.
    pub fn oam_dma_pause(&mut self) -> u32 {
        let stall = 513 + u32::from(self.cycles & 1 == 1);
        self.cycles += u64::from(stall);
        stall
    }

    // --- operand handling -------------------------------------------------

    fn fetch_byte(&mut self, mem: &mut impl Memory) -> u8 {
        let byte = mem.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    fn fetch_word(&mut self, mem: &mut impl Memory) -> u16 {
        let low = self.fetch_byte(mem);
        let high = self.fetch_byte(mem);
        word(low, high)
    }

    fn read_word(&self, mem: &mut impl Memory, addr: u16) -> u16 {
        word(mem.read(addr), mem.read(addr.wrapping_add(1)))
    }

    /// Read a pointer from page zero, wrapping within the page.
    fn read_word_zp(&self, mem: &mut impl Memory, zp: u8) -> u16 {
        word(
            mem.read(u16::from(zp)),
            mem.read(u16::from(zp.wrapping_add(1))),
        )
    }

    /// Resolve the effective address for a memory-operand mode.
    ///
    /// Returns the address and whether indexing crossed a page.
    fn operand_addr(&mut self, mem: &mut impl Memory, mode: AddrMode) -> (u16, bool) {
        match mode {
            AddrMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }
            AddrMode::ZeroPage => (u16::from(self.fetch_byte(mem)), false),
            AddrMode::ZeroPageX => (u16::from(self.fetch_byte(mem).wrapping_add(self.x)), false),
            AddrMode::ZeroPageY => (u16::from(self.fetch_byte(mem).wrapping_add(self.y)), false),
            AddrMode::Absolute => (self.fetch_word(mem), false),
            AddrMode::AbsoluteX => {
                let base = self.fetch_word(mem);
                let addr = base.wrapping_add(u16::from(self.x));
                (addr, page_crossed(base, addr))
            }
            AddrMode::AbsoluteY => {
                let base = self.fetch_word(mem);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, page_crossed(base, addr))
            }
            AddrMode::Indirect => {
                // The 6502 pointer-fetch bug: the high byte is read from
                // the same page as the low byte
                let ptr = self.fetch_word(mem);
                let low = mem.read(ptr);
                let high = mem.read(set_low_byte(ptr, (ptr as u8).wrapping_add(1)));
                (word(low, high), false)
            }
            AddrMode::IndirectX => {
                let zp = self.fetch_byte(mem).wrapping_add(self.x);
                (self.read_word_zp(mem, zp), false)
            }
            AddrMode::IndirectY => {
                let zp = self.fetch_byte(mem);
                let base = self.read_word_zp(mem, zp);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, page_crossed(base, addr))
            }
            AddrMode::Implied | AddrMode::Accumulator | AddrMode::Relative => {
                unreachable!("mode {mode:?} carries no memory operand")
            }
        }
    }

    fn load(&mut self, mem: &mut impl Memory, mode: AddrMode) -> (u8, bool) {
        let (addr, crossed) = self.operand_addr(mem, mode);
        (mem.read(addr), crossed)
    }

    /// Read-modify-write through a flag-free transform.
    fn rmw(&mut self, mem: &mut impl Memory, mode: AddrMode, f: impl Fn(u8) -> u8) -> u8 {
        let (addr, _) = self.operand_addr(mem, mode);
        let value = f(mem.read(addr));
        mem.write(addr, value);
        value
    }

    /// Read-modify-write (or accumulator) through a flag-setting transform.
    fn modify(&mut self, mem: &mut impl Memory, mode: AddrMode, f: fn(&mut Self, u8) -> u8) {
        if mode == AddrMode::Accumulator {
            let value = self.a;
            self.a = f(self, value);
        } else {
            let (addr, _) = self.operand_addr(mem, mode);
            let value = mem.read(addr);
            let result = f(self, value);
            mem.write(addr, result);
        }
    }

    // --- ALU helpers ------------------------------------------------------

    fn adc(&mut self, value: u8) {
        let carry = u16::from(self.status.contains(Status::C));
        let sum = u16::from(self.a) + u16::from(value) + carry;
        let result = sum as u8;
        self.status.set(Status::C, sum > 0xFF);
        self.status
            .set(Status::V, (self.a ^ result) & (value ^ result) & 0x80 != 0);
        self.a = result;
        self.status.set_zn(result);
    }

    // The 2A03 ignores the decimal flag, so SBC is pure binary
    fn sbc(&mut self, value: u8) {
        self.adc(!value);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.status.set(Status::C, register >= value);
        self.status.set_zn(register.wrapping_sub(value));
    }

    fn asl_value(&mut self, value: u8) -> u8 {
        self.status.set(Status::C, bit_is_set(value, 7));
        let result = value << 1;
        self.status.set_zn(result);
        result
    }

    fn lsr_value(&mut self, value: u8) -> u8 {
        self.status.set(Status::C, bit_is_set(value, 0));
        let result = value >> 1;
        self.status.set_zn(result);
        result
    }

    fn rol_value(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.status.contains(Status::C));
        self.status.set(Status::C, bit_is_set(value, 7));
        let result = (value << 1) | carry_in;
        self.status.set_zn(result);
        result
    }

    fn ror_value(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.status.contains(Status::C)) << 7;
        self.status.set(Status::C, bit_is_set(value, 0));
        let result = (value >> 1) | carry_in;
        self.status.set_zn(result);
        result
    }

    fn inc_value(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.status.set_zn(result);
        result
    }

    fn dec_value(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.status.set_zn(result);
        result
    }

    fn branch(&mut self, mem: &mut impl Memory, taken: bool) -> u32 {
        let offset = self.fetch_byte(mem) as i8;
        if !taken {
            return 0;
        }
        let target = self.pc.wrapping_add(offset as u16);
        let crossed = page_crossed(self.pc, target);
        self.pc = target;
        1 + u32::from(crossed)
    }

    // --- stack ------------------------------------------------------------

    fn push(&mut self, mem: &mut impl Memory, value: u8) {
        mem.write(STACK_BASE | u16::from(self.sp), value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn push_word(&mut self, mem: &mut impl Memory, value: u16) {
        self.push(mem, (value >> 8) as u8);
        self.push(mem, value as u8);
    }

    fn pull(&mut self, mem: &mut impl Memory) -> Result<u8, CpuError> {
        if self.sp == 0xFF && self.config.stack_underflow_causes_exception {
            return Err(CpuError::StackUnderflow { addr: self.pc });
        }
        self.sp = self.sp.wrapping_add(1);
        Ok(mem.read(STACK_BASE | u16::from(self.sp)))
    }

    fn pull_word(&mut self, mem: &mut impl Memory) -> Result<u16, CpuError> {
        let low = self.pull(mem)?;
        let high = self.pull(mem)?;
        Ok(word(low, high))
    }

    // --- accessors --------------------------------------------------------

    /// Accumulator.
    #[must_use]
    pub const fn a(&self) -> u8 {
        self.a
    }

    /// X index register.
    #[must_use]
    pub const fn x(&self) -> u8 {
        self.x
    }

    /// Y index register.
    #[must_use]
    pub const fn y(&self) -> u8 {
        self.y
    }

    /// Stack pointer.
    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.sp
    }

    /// Program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Status flags.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Total cycles executed since power-on.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Configured behavior knobs.
    #[must_use]
    pub const fn config(&self) -> CpuConfig {
        self.config
    }

    /// Snapshot the register file.
    #[must_use]
    pub const fn state(&self) -> CpuState {
        CpuState {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            status: self.status.bits(),
            cycles: self.cycles,
        }
    }

    /// Restore a register-file snapshot.
    pub fn load_state(&mut self, state: CpuState) {
        self.a = state.a;
        self.x = state.x;
        self.y = state.y;
        self.sp = state.sp;
        self.pc = state.pc;
        self.status = Status::from_bits_truncate(state.status) | Status::U;
        self.cycles = state.cycles;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

fn penalty(page_penalty: bool, crossed: bool) -> u32 {
    u32::from(page_penalty && crossed)
}

/// High byte of an address plus one, for the `$9x` store family.
fn high_plus_one(addr: u16) -> u8 {
    ((addr >> 8) as u8).wrapping_add(1)
}
