//! PPU register files (PPUCTRL, PPUMASK, PPUSTATUS).

use bitflags::bitflags;

bitflags! {
    /// PPUCTRL ($2000) - write only.
    ///
    /// ```text
    /// 7  bit  0
    /// ---- ----
    /// VPHB SINN
    /// |||| ||||
    /// |||| ||++- Base nametable select
    /// |||| |+--- VRAM increment (0: +1, 1: +32)
    /// |||| +---- Sprite pattern table (8x8 mode)
    /// |||+------ Background pattern table
    /// ||+------- Sprite size (0: 8x8, 1: 8x16)
    /// |+-------- Master/slave select (unused on NES)
    /// +--------- Generate NMI at vblank start
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuCtrl: u8 {
        /// Nametable select, low bit.
        const NAMETABLE_X = 0b0000_0001;
        /// Nametable select, high bit.
        const NAMETABLE_Y = 0b0000_0010;
        /// VRAM address increment per PPUDATA access.
        const VRAM_INCREMENT = 0b0000_0100;
        /// Sprite pattern table base.
        const SPRITE_TABLE = 0b0000_1000;
        /// Background pattern table base.
        const BG_TABLE = 0b0001_0000;
        /// Sprite size select.
        const SPRITE_SIZE = 0b0010_0000;
        /// Master/slave select.
        const MASTER_SLAVE = 0b0100_0000;
        /// NMI at vblank.
        const NMI_ENABLE = 0b1000_0000;
    }
}

impl PpuCtrl {
    /// VRAM address increment applied by PPUDATA (1 across, 32 down).
    #[inline]
    #[must_use]
    pub fn vram_increment(self) -> u16 {
        if self.contains(Self::VRAM_INCREMENT) { 32 } else { 1 }
    }

    /// Whether vblank entry should raise NMI.
    #[inline]
    #[must_use]
    pub fn nmi_enabled(self) -> bool {
        self.contains(Self::NMI_ENABLE)
    }
}

bitflags! {
    /// PPUMASK ($2001) - write only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuMask: u8 {
        /// Greyscale mode.
        const GREYSCALE = 0b0000_0001;
        /// Show background in the leftmost 8 pixels.
        const SHOW_BG_LEFT = 0b0000_0010;
        /// Show sprites in the leftmost 8 pixels.
        const SHOW_SPRITES_LEFT = 0b0000_0100;
        /// Background rendering enable.
        const SHOW_BG = 0b0000_1000;
        /// Sprite rendering enable.
        const SHOW_SPRITES = 0b0001_0000;
        /// Red emphasis.
        const EMPHASIZE_RED = 0b0010_0000;
        /// Green emphasis.
        const EMPHASIZE_GREEN = 0b0100_0000;
        /// Blue emphasis.
        const EMPHASIZE_BLUE = 0b1000_0000;
    }
}

impl PpuMask {
    /// Whether any rendering is enabled (affects frame timing).
    #[inline]
    #[must_use]
    pub fn rendering_enabled(self) -> bool {
        self.intersects(Self::SHOW_BG | Self::SHOW_SPRITES)
    }
}

bitflags! {
    /// PPUSTATUS ($2002) - read only. Bits 4-0 are open bus.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuStatus: u8 {
        /// More than 8 sprites on a scanline.
        const SPRITE_OVERFLOW = 0b0010_0000;
        /// Sprite 0 overlapped the background.
        const SPRITE_ZERO_HIT = 0b0100_0000;
        /// Currently in vertical blank.
        const VBLANK = 0b1000_0000;
    }
}

impl PpuStatus {
    /// Check the vblank flag.
    #[inline]
    #[must_use]
    pub fn in_vblank(self) -> bool {
        self.contains(Self::VBLANK)
    }

    /// Set the vblank flag.
    #[inline]
    pub fn set_vblank(&mut self) {
        self.insert(Self::VBLANK);
    }

    /// Clear the vblank flag.
    #[inline]
    pub fn clear_vblank(&mut self) {
        self.remove(Self::VBLANK);
    }

    /// Clear sprite 0 hit and sprite overflow.
    #[inline]
    pub fn clear_sprite_flags(&mut self) {
        self.remove(Self::SPRITE_ZERO_HIT | Self::SPRITE_OVERFLOW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vram_increment() {
        assert_eq!(PpuCtrl::empty().vram_increment(), 1);
        assert_eq!(PpuCtrl::VRAM_INCREMENT.vram_increment(), 32);
    }

    #[test]
    fn test_rendering_enabled() {
        assert!(!PpuMask::empty().rendering_enabled());
        assert!(PpuMask::SHOW_BG.rendering_enabled());
        assert!(PpuMask::SHOW_SPRITES.rendering_enabled());
    }

    #[test]
    fn test_status_flags() {
        let mut status = PpuStatus::empty();
        status.set_vblank();
        assert!(status.in_vblank());
        status.clear_vblank();
        assert!(!status.in_vblank());
    }
}
