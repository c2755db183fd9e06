//! Instruction-stepped MOS 6502 CPU for the famibus NES core.
//!
//! The CPU is deliberately bus-agnostic: every memory access goes
//! through the [`famibus_support::Memory`] capability, so the same
//! core runs against the full NES bus, a bare
//! [`famibus_support::FlatRam`], or anything else that can serve bytes.
//!
//! Execution is instruction-stepped rather than cycle-stepped: one
//! call runs one whole opcode and reports how many cycles it took,
//! which is exactly the granularity the console stepper needs to keep
//! the 3:1 PPU ratio.
//!
//! # Example
//!
//! ```
//! use famibus_cpu::Cpu;
//! use famibus_support::{FlatRam, Memory};
//!
//! let mut ram = FlatRam::new();
//! ram.load(0x8000, &[0xA9, 0x42]); // LDA #$42
//! ram.load(0xFFFC, &[0x00, 0x80]); // reset vector -> $8000
//!
//! let mut cpu = Cpu::new();
//! cpu.reset(&mut ram);
//! cpu.run_next_instruction(&mut ram).unwrap();
//! assert_eq!(cpu.a(), 0x42);
//! ```

mod addressing;
mod cpu;
mod opcodes;
mod status;

pub use addressing::AddrMode;
pub use cpu::{Cpu, CpuConfig, CpuState, UndocumentedLevel};
pub use opcodes::{Legality, Mnemonic, OPCODES, Opcode};
pub use status::Status;

/// CPU error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CpuError {
    /// Opcode not allowed at the configured undocumented-support level.
    #[error("unsupported opcode ${opcode:02X} at ${addr:04X}")]
    UnsupportedOpcode {
        /// The offending opcode byte.
        opcode: u8,
        /// Address the opcode was fetched from.
        addr: u16,
    },

    /// A pull wrapped an empty stack with the underflow knob set.
    #[error("stack underflow at ${addr:04X}")]
    StackUnderflow {
        /// Program counter at the time of the pull.
        addr: u16,
    },
}

/// Interrupt vector addresses.
pub mod vectors {
    /// NMI (Non-Maskable Interrupt) vector address.
    pub const NMI: u16 = 0xFFFA;
    /// Reset vector address.
    pub const RESET: u16 = 0xFFFC;
    /// IRQ/BRK vector address.
    pub const IRQ: u16 = 0xFFFE;
}
