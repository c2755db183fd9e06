//! Register-accurate 2C02 PPU front end for the famibus NES core.
//!
//! This crate owns everything game software can observe through the
//! PPU register file: the control/mask/status registers, the internal
//! address registers, OAM, the 14-bit VRAM address space (pattern
//! tables through the cartridge, mirrored nametables, palette RAM),
//! and frame timing with vblank/NMI generation.
//!
//! Scanline pixel composition is an external concern. A renderer
//! reads [`Ppu::vram`], [`Ppu::oam`], and the palette, and fills the
//! framebuffer surface exposed by [`Ppu::frame_buffer_mut`].

mod oam;
mod ppu;
mod registers;
mod scroll;
mod timing;
mod vram;

pub use oam::Oam;
pub use ppu::{FRAME_HEIGHT, FRAME_SIZE, FRAME_WIDTH, Ppu};
pub use registers::{PpuCtrl, PpuMask, PpuStatus};
pub use scroll::Scroll;
pub use timing::{
    DOTS_PER_SCANLINE, PRE_RENDER_SCANLINE, SCANLINES_PER_FRAME, Timing, VBLANK_SCANLINE,
};
pub use vram::Vram;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PPU error types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PpuError {
    /// A restored state buffer does not match the PPU's layout.
    #[error("PPU state size mismatch for {field}: expected {expected} bytes, got {actual}")]
    StateSizeMismatch {
        /// Which buffer mismatched.
        field: &'static str,
        /// Length this PPU was built with.
        expected: usize,
        /// Length found in the state.
        actual: usize,
    },
}

/// Everything software can observe about the PPU, as a plain value
/// tree for save states.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PpuState {
    /// PPUCTRL bits.
    pub ctrl: u8,
    /// PPUMASK bits.
    pub mask: u8,
    /// PPUSTATUS bits.
    pub status: u8,
    /// Internal v/t/x/w registers.
    pub scroll: Scroll,
    /// OAMADDR pointer.
    pub oam_addr: u8,
    /// Sprite memory (256 bytes).
    pub oam: Vec<u8>,
    /// Physical nametable pages.
    pub nametables: Vec<u8>,
    /// Palette RAM (32 bytes).
    pub palette: Vec<u8>,
    /// PPUDATA read buffer.
    pub read_buffer: u8,
    /// Register-bus latch.
    pub io_latch: u8,
    /// Current dot.
    pub dot: u16,
    /// Current scanline.
    pub scanline: u16,
    /// Frame parity.
    pub odd_frame: bool,
}
