//! Dot and scanline counters.
//!
//! An NTSC frame is 262 scanlines of 341 dots. Scanlines 0-239 are
//! visible, 240 is idle, vblank runs from scanline 241 dot 1 until the
//! pre-render scanline 261 dot 1. On odd frames with rendering enabled
//! the pre-render line loses its last dot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dots per scanline.
pub const DOTS_PER_SCANLINE: u16 = 341;
/// Scanlines per frame, pre-render line included.
pub const SCANLINES_PER_FRAME: u16 = 262;
/// Scanline on which vblank begins.
pub const VBLANK_SCANLINE: u16 = 241;
/// The pre-render scanline, where vblank ends.
pub const PRE_RENDER_SCANLINE: u16 = 261;

/// Frame position counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    dot: u16,
    scanline: u16,
    odd_frame: bool,
}

impl Timing {
    /// Counters at the top-left of an even frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dot: 0,
            scanline: 0,
            odd_frame: false,
        }
    }

    /// Current dot within the scanline (0-340).
    #[must_use]
    pub const fn dot(&self) -> u16 {
        self.dot
    }

    /// Current scanline (0-261).
    #[must_use]
    pub const fn scanline(&self) -> u16 {
        self.scanline
    }

    /// Whether the current frame is odd.
    #[must_use]
    pub const fn odd_frame(&self) -> bool {
        self.odd_frame
    }

    /// Advance one dot.
    pub fn tick(&mut self, rendering_enabled: bool) {
        self.dot += 1;

        // Odd frames with rendering drop the pre-render line's last dot
        let line_end = if rendering_enabled && self.odd_frame && self.scanline == PRE_RENDER_SCANLINE
        {
            DOTS_PER_SCANLINE - 1
        } else {
            DOTS_PER_SCANLINE
        };

        if self.dot >= line_end {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline == SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.odd_frame = !self.odd_frame;
            }
        }
    }

    /// True exactly at the dot where the vblank flag is raised.
    #[must_use]
    pub const fn at_vblank_start(&self) -> bool {
        self.scanline == VBLANK_SCANLINE && self.dot == 1
    }

    /// True exactly at the dot where the vblank flag is cleared.
    #[must_use]
    pub const fn at_vblank_clear(&self) -> bool {
        self.scanline == PRE_RENDER_SCANLINE && self.dot == 1
    }

    /// Restore counters from a snapshot.
    pub fn set(&mut self, dot: u16, scanline: u16, odd_frame: bool) {
        self.dot = dot % DOTS_PER_SCANLINE;
        self.scanline = scanline % SCANLINES_PER_FRAME;
        self.odd_frame = odd_frame;
    }
}
