//! famibus core - the bus-coupled NES execution substrate.
//!
//! This crate wires the famibus components into a whole console:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        Console                            │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │                      CpuBus                         │  │
//! │  │  ┌─────┐ ┌─────┐ ┌───────────┐ ┌──────┐ ┌────────┐ │  │
//! │  │  │ RAM │ │ PPU │ │ Cartridge │ │ Pads │ │ Intr   │ │  │
//! │  │  │ 2KB │ │     │ │ (mapper0) │ │      │ │ flags  │ │  │
//! │  │  └─────┘ └─────┘ └───────────┘ └──────┘ └────────┘ │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! │                          ▲                                │
//! │                     ┌────┴────┐                           │
//! │                     │  6502   │                           │
//! │                     └─────────┘                           │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The stepper keeps the two clocks coupled: each [`Console::step`]
//! services at most one pending signal (NMI, then IRQ, then the
//! OAM-DMA stall) or runs one CPU instruction, and always advances
//! the PPU by three dots per CPU cycle. Signals the PPU raises while
//! running are seen at the next step boundary.
//!
//! # Usage
//!
//! ```
//! use famibus_core::{Button, Cartridge, Console, MirrorPattern};
//!
//! // An external loader supplies the PRG/CHR images
//! let mut prg = vec![0xEA; 32 * 1024]; // NOP slide
//! prg[0x7FFC] = 0x00; // reset vector -> $8000
//! prg[0x7FFD] = 0x80;
//! let cart = Cartridge::new(prg, None, MirrorPattern::HORIZONTAL).unwrap();
//!
//! let mut console = Console::new(cart);
//! console.set_buttons_1(Button::Start as u8);
//! console.run_frame().unwrap();
//! assert_eq!(console.frame_count(), 1);
//! ```

mod bus;
mod console;
pub mod input;
mod save_state;

pub use bus::{CpuBus, RAM_SIZE};
pub use console::{Console, StepError, timing};
pub use input::{Button, Controller, PortState, StandardController};
pub use save_state::{ConsoleState, SaveStateError};

// Re-export the component crates' surface
pub use famibus_cpu::{Cpu, CpuConfig, CpuError, CpuState, UndocumentedLevel};
pub use famibus_mappers::{Cartridge, CartridgeState, ConfigError, MirrorPattern};
pub use famibus_ppu::{Ppu, PpuError, PpuState};
pub use famibus_support::{FlatRam, InterruptBus, Memory};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// NES screen dimensions.
pub mod screen {
    /// Screen width in pixels.
    pub const WIDTH: u32 = 256;
    /// Screen height in pixels.
    pub const HEIGHT: u32 = 240;
    /// Total pixels per frame.
    pub const PIXELS: u32 = WIDTH * HEIGHT;
}
