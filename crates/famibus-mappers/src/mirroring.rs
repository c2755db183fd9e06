//! Nametable mirroring patterns.
//!
//! The PPU address space has four logical 1 KiB nametables at
//! $2000-$2FFF, but a cartridge wires fewer physical pages behind
//! them. The wiring is a 4-tuple: entry `i` names the physical page
//! that backs logical nametable `i`.
//!
//! ```text
//! Horizontal (0,0,1,1):   [ A ][ A ]      Vertical (0,1,0,1):   [ A ][ B ]
//!                         [ B ][ B ]                            [ A ][ B ]
//! ```
//!
//! Four-screen boards wire four independent pages, `(0,1,2,3)`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which physical nametable page backs each of the four logical slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MirrorPattern([u8; 4]);

impl MirrorPattern {
    /// Horizontal mirroring: $2000/$2400 share a page, $2800/$2C00 the other.
    pub const HORIZONTAL: Self = Self([0, 0, 1, 1]);

    /// Vertical mirroring: $2000/$2800 share a page, $2400/$2C00 the other.
    pub const VERTICAL: Self = Self([0, 1, 0, 1]);

    /// Four independent pages (cartridge carries the extra RAM).
    pub const FOUR_SCREEN: Self = Self([0, 1, 2, 3]);

    /// Bytes per nametable page.
    pub const PAGE_SIZE: usize = 0x400;

    /// Build a pattern from an explicit page tuple.
    ///
    /// Entries larger than 1 index into an extended nametable buffer;
    /// [`MirrorPattern::page_count`] reports how many pages the buffer
    /// needs.
    #[must_use]
    pub const fn new(pattern: [u8; 4]) -> Self {
        Self(pattern)
    }

    /// Physical page behind logical nametable `logical` (0-3).
    #[must_use]
    pub const fn physical_page(self, logical: usize) -> usize {
        self.0[logical & 0x3] as usize
    }

    /// Number of physical pages the pattern addresses.
    #[must_use]
    pub fn page_count(self) -> usize {
        let max = self.0.iter().copied().max().unwrap_or(0);
        max as usize + 1
    }

    /// Resolve a nametable-region address to an offset in the physical
    /// nametable buffer.
    ///
    /// The address is taken modulo the 4 KiB logical region, so both
    /// $2000-$2FFF and its $3000-$3EFF mirror resolve identically.
    #[must_use]
    pub fn resolve(self, addr: u16) -> usize {
        let offset = (addr as usize) % 0x1000;
        let logical = offset / Self::PAGE_SIZE;
        let within = offset % Self::PAGE_SIZE;
        self.physical_page(logical) * Self::PAGE_SIZE + within
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_pages() {
        let m = MirrorPattern::HORIZONTAL;
        assert_eq!(m.physical_page(0), 0);
        assert_eq!(m.physical_page(1), 0);
        assert_eq!(m.physical_page(2), 1);
        assert_eq!(m.physical_page(3), 1);
        assert_eq!(m.page_count(), 2);
    }

    #[test]
    fn test_vertical_pages() {
        let m = MirrorPattern::VERTICAL;
        assert_eq!(m.physical_page(0), 0);
        assert_eq!(m.physical_page(1), 1);
        assert_eq!(m.physical_page(2), 0);
        assert_eq!(m.physical_page(3), 1);
        assert_eq!(m.page_count(), 2);
    }

    #[test]
    fn test_four_screen_pages() {
        let m = MirrorPattern::FOUR_SCREEN;
        assert_eq!(m.page_count(), 4);
        for logical in 0..4 {
            assert_eq!(m.physical_page(logical), logical);
        }
    }

    #[test]
    fn test_resolve_horizontal() {
        let m = MirrorPattern::HORIZONTAL;
        // $2000 and $2400 land on the same byte
        assert_eq!(m.resolve(0x2000), m.resolve(0x2400));
        // $2800 lands on the second page
        assert_eq!(m.resolve(0x2800), 0x400);
        assert_eq!(m.resolve(0x2C12), 0x412);
    }

    #[test]
    fn test_resolve_vertical() {
        let m = MirrorPattern::VERTICAL;
        assert_eq!(m.resolve(0x2000), m.resolve(0x2800));
        assert_eq!(m.resolve(0x2400), m.resolve(0x2C00));
        assert_ne!(m.resolve(0x2000), m.resolve(0x2400));
    }

    #[test]
    fn test_resolve_handles_3000_mirror() {
        let m = MirrorPattern::VERTICAL;
        assert_eq!(m.resolve(0x3000), m.resolve(0x2000));
        assert_eq!(m.resolve(0x3455), m.resolve(0x2455));
    }

    #[test]
    fn test_custom_pattern() {
        // Single-screen wiring: every slot on page 0
        let m = MirrorPattern::new([0, 0, 0, 0]);
        assert_eq!(m.page_count(), 1);
        assert_eq!(m.resolve(0x2C00), 0);
    }
}
