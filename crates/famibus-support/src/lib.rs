//! Shared primitives for the famibus emulation workspace.
//!
//! This crate sits below every other famibus crate and provides the
//! pieces they all lean on:
//!
//! - [`bits`]: byte/word/bit helpers used throughout the CPU and buses
//! - [`Memory`]: the capability every bus participant implements
//!   (read a byte, write a byte), plus [`FlatRam`] as the simplest
//!   implementation
//! - [`InterruptBus`]: the pending-signal flags (NMI, IRQ, OAM-DMA
//!   stall) shared between the CPU bus, the PPU, and the stepper

pub mod bits;
mod interrupts;
mod memory;

pub use interrupts::InterruptBus;
pub use memory::{FlatRam, Memory};
