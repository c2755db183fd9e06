//! Mapper 0 cartridge.
//!
//! The simplest NES board: no bank switching, everything fixed at
//! construction.
//!
//! # Memory map
//!
//! ```text
//! CPU side:
//! $4020-$7FFF: work RAM, mirrored modulo its size
//! $8000-$FFFF: PRG ROM (16 KiB images mirrored across the window)
//!
//! PPU side:
//! $0000-$1FFF: 8 KiB CHR ROM, or CHR RAM when no image was supplied
//! ```
//!
//! The CPU bus only routes addresses at or above $4020 here, so the
//! work-RAM window covers $4020-$5FFF as well as the nominal
//! $6000-$7FFF range. Every legal work-RAM size divides $6000, so the
//! modular window lines up with the hardware view of $6000 as offset
//! zero.

use famibus_support::Memory;

use crate::{ConfigError, MirrorPattern};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-wiring (mapper 0) cartridge.
pub struct Cartridge {
    /// PRG ROM image, 16 or 32 KiB.
    prg_rom: Vec<u8>,

    /// Work RAM, 2/4/8 KiB, CPU-visible below the PRG window.
    prg_ram: Vec<u8>,

    /// CHR memory, always 8 KiB.
    chr_mem: Vec<u8>,

    /// True when `chr_mem` is RAM (no CHR image supplied).
    chr_writable: bool,

    /// CPU address where the PRG window begins.
    prg_rom_start: u16,

    /// Nametable wiring, consumed by the PPU bus.
    mirror: MirrorPattern,
}

/// Default CPU address of the PRG ROM window.
pub const PRG_ROM_START: u16 = 0x8000;

/// Size of the CHR address window in bytes.
const CHR_SIZE: usize = 8 * 1024;

impl Cartridge {
    /// Build a cartridge with the common layout: 8 KiB work RAM and
    /// PRG mapped at $8000.
    ///
    /// Pass `None` for `chr_rom` to get writable CHR RAM instead of
    /// CHR ROM.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the PRG image is not 16 or 32 KiB,
    /// or a supplied CHR image is not 8 KiB.
    pub fn new(
        prg_rom: Vec<u8>,
        chr_rom: Option<Vec<u8>>,
        mirror: MirrorPattern,
    ) -> Result<Self, ConfigError> {
        Self::with_layout(prg_rom, chr_rom, mirror, 8, None)
    }

    /// Build a cartridge with an explicit work-RAM size (in KiB) and
    /// an optional PRG base-address override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on any size violation: PRG not 16 or
    /// 32 KiB, CHR not 8 KiB, work RAM not 2, 4, or 8 KiB.
    pub fn with_layout(
        prg_rom: Vec<u8>,
        chr_rom: Option<Vec<u8>>,
        mirror: MirrorPattern,
        wram_kib: usize,
        prg_rom_start: Option<u16>,
    ) -> Result<Self, ConfigError> {
        if prg_rom.len() != 16 * 1024 && prg_rom.len() != 32 * 1024 {
            return Err(ConfigError::PrgRomSize(prg_rom.len()));
        }
        if !matches!(wram_kib, 2 | 4 | 8) {
            return Err(ConfigError::WorkRamSize(wram_kib));
        }

        let (chr_mem, chr_writable) = match chr_rom {
            Some(image) => {
                if image.len() != CHR_SIZE {
                    return Err(ConfigError::ChrRomSize(image.len()));
                }
                (image, false)
            }
            None => (vec![0; CHR_SIZE], true),
        };

        Ok(Self {
            prg_rom,
            prg_ram: vec![0; wram_kib * 1024],
            chr_mem,
            chr_writable,
            prg_rom_start: prg_rom_start.unwrap_or(PRG_ROM_START),
            mirror,
        })
    }

    /// CPU-side read.
    ///
    /// Addresses below the PRG window read work RAM through the
    /// modular window; the rest read PRG ROM, wrapped so a 16 KiB
    /// image mirrors across the 32 KiB window.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        if addr < self.prg_rom_start {
            self.prg_ram[addr as usize % self.prg_ram.len()]
        } else {
            let offset = (addr - self.prg_rom_start) as usize;
            self.prg_rom[offset % self.prg_rom.len()]
        }
    }

    /// CPU-side write.
    ///
    /// Work RAM accepts the write; the PRG window drops it with a
    /// diagnostic, since software occasionally probes ROM addresses.
    pub fn write(&mut self, addr: u16, value: u8) {
        if addr < self.prg_rom_start {
            let len = self.prg_ram.len();
            self.prg_ram[addr as usize % len] = value;
        } else {
            log::warn!("write of ${value:02X} to PRG ROM at ${addr:04X} ignored");
        }
    }

    /// PPU-side read of CHR memory.
    #[must_use]
    pub fn read_ppu(&self, addr: u16) -> u8 {
        self.chr_mem[addr as usize % CHR_SIZE]
    }

    /// PPU-side write to CHR memory.
    ///
    /// CHR RAM accepts the write. CHR ROM drops it with a diagnostic,
    /// matching the PRG side; emulation continues either way.
    pub fn write_ppu(&mut self, addr: u16, value: u8) {
        if self.chr_writable {
            self.chr_mem[addr as usize % CHR_SIZE] = value;
        } else {
            log::warn!("write of ${value:02X} to CHR ROM at ${addr:04X} ignored");
        }
    }

    /// Nametable wiring for the PPU bus.
    #[must_use]
    pub const fn mirror_pattern(&self) -> MirrorPattern {
        self.mirror
    }

    /// CPU address where the PRG window begins.
    #[must_use]
    pub const fn prg_rom_start(&self) -> u16 {
        self.prg_rom_start
    }

    /// True when CHR is RAM rather than ROM.
    #[must_use]
    pub const fn chr_writable(&self) -> bool {
        self.chr_writable
    }

    /// Work RAM size in bytes.
    #[must_use]
    pub fn wram_len(&self) -> usize {
        self.prg_ram.len()
    }

    /// Snapshot the mutable cartridge state.
    #[must_use]
    pub fn state(&self) -> CartridgeState {
        CartridgeState {
            prg_ram: self.prg_ram.clone(),
            chr_ram: self.chr_writable.then(|| self.chr_mem.clone()),
        }
    }

    /// Check a state against this cartridge's layout without
    /// mutating anything.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StateSizeMismatch`] when a buffer in the
    /// state does not match this cartridge's layout.
    pub fn validate_state(&self, state: &CartridgeState) -> Result<(), ConfigError> {
        if state.prg_ram.len() != self.prg_ram.len() {
            return Err(ConfigError::StateSizeMismatch {
                field: "prg_ram",
                expected: self.prg_ram.len(),
                actual: state.prg_ram.len(),
            });
        }
        if let Some(chr) = &state.chr_ram {
            if !self.chr_writable || chr.len() != CHR_SIZE {
                return Err(ConfigError::StateSizeMismatch {
                    field: "chr_ram",
                    expected: if self.chr_writable { CHR_SIZE } else { 0 },
                    actual: chr.len(),
                });
            }
        }
        Ok(())
    }

    /// Restore mutable cartridge state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StateSizeMismatch`] when a buffer in the
    /// state does not match this cartridge's layout; nothing is
    /// mutated on error.
    pub fn load_state(&mut self, state: &CartridgeState) -> Result<(), ConfigError> {
        self.validate_state(state)?;
        if let Some(chr) = &state.chr_ram {
            self.chr_mem.copy_from_slice(chr);
        }
        self.prg_ram.copy_from_slice(&state.prg_ram);
        Ok(())
    }
}

/// The CPU-visible face of the cartridge is itself a bus participant.
impl Memory for Cartridge {
    fn read(&mut self, addr: u16) -> u8 {
        Cartridge::read(self, addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        Cartridge::write(self, addr, value);
    }
}

/// Mutable cartridge state for save states.
///
/// ROM contents are construction inputs and are not captured; a state
/// is only meaningful against the cartridge it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CartridgeState {
    /// Work RAM contents.
    pub prg_ram: Vec<u8>,
    /// CHR RAM contents, present only for CHR-RAM boards.
    pub chr_ram: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cart(prg_kib: usize) -> Cartridge {
        let mut prg = vec![0; prg_kib * 1024];
        for (i, byte) in prg.iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }
        Cartridge::new(prg, None, MirrorPattern::HORIZONTAL).unwrap()
    }

    #[test]
    fn test_size_validation() {
        assert!(matches!(
            Cartridge::new(vec![0; 8 * 1024], None, MirrorPattern::HORIZONTAL),
            Err(ConfigError::PrgRomSize(8192))
        ));
        assert!(matches!(
            Cartridge::new(
                vec![0; 16 * 1024],
                Some(vec![0; 4 * 1024]),
                MirrorPattern::HORIZONTAL
            ),
            Err(ConfigError::ChrRomSize(4096))
        ));
        assert!(matches!(
            Cartridge::with_layout(
                vec![0; 16 * 1024],
                None,
                MirrorPattern::HORIZONTAL,
                3,
                None
            ),
            Err(ConfigError::WorkRamSize(3))
        ));
    }

    #[test]
    fn test_prg_mirroring_16k() {
        let cart = test_cart(16);
        // A 16 KiB image appears at both halves of the window
        for offset in [0u16, 0x1, 0x1FFF, 0x3FFF] {
            assert_eq!(cart.read(0x8000 + offset), cart.read(0xC000 + offset));
        }
    }

    #[test]
    fn test_prg_32k_no_mirroring() {
        let cart = test_cart(32);
        assert_eq!(cart.read(0x8000), 0);
        assert_eq!(cart.read(0xC000), (0x4000 % 251) as u8);
    }

    #[test]
    fn test_prg_write_ignored() {
        let mut cart = test_cart(16);
        let before = cart.read(0x8000);
        cart.write(0x8000, before.wrapping_add(1));
        assert_eq!(cart.read(0x8000), before);
    }

    #[test]
    fn test_wram_window() {
        let mut cart = test_cart(16);
        cart.write(0x6000, 0x42);
        assert_eq!(cart.read(0x6000), 0x42);

        // The window below $6000 wraps modulo the RAM size, so with
        // 8 KiB of work RAM $4020 aliases $6020
        cart.write(0x4020, 0x77);
        assert_eq!(cart.read(0x4020), 0x77);
        assert_eq!(cart.read(0x6020), 0x77);
        assert_eq!(cart.read(0x6000), 0x42);
    }

    #[test]
    fn test_wram_mirrors_within_size() {
        let mut cart = Cartridge::with_layout(
            vec![0; 16 * 1024],
            None,
            MirrorPattern::HORIZONTAL,
            2,
            None,
        )
        .unwrap();
        // 2 KiB window repeats every $800
        cart.write(0x6000, 0x55);
        assert_eq!(cart.read(0x6800), 0x55);
        assert_eq!(cart.read(0x7800), 0x55);
    }

    #[test]
    fn test_chr_ram_round_trip() {
        let mut cart = test_cart(16);
        assert!(cart.chr_writable());

        cart.write_ppu(0x1FFF, 0xAB);
        assert_eq!(cart.read_ppu(0x1FFF), 0xAB);
    }

    #[test]
    fn test_chr_rom_write_ignored() {
        let mut chr = vec![0; 8 * 1024];
        chr[0x123] = 0x99;
        let mut cart =
            Cartridge::new(vec![0; 16 * 1024], Some(chr), MirrorPattern::VERTICAL).unwrap();
        assert!(!cart.chr_writable());

        cart.write_ppu(0x0123, 0x11);
        assert_eq!(cart.read_ppu(0x0123), 0x99);
    }

    #[test]
    fn test_prg_base_override() {
        let mut prg = vec![0; 16 * 1024];
        prg[0] = 0xEE;
        let mut cart =
            Cartridge::with_layout(prg, None, MirrorPattern::HORIZONTAL, 8, Some(0xC000)).unwrap();

        assert_eq!(cart.prg_rom_start(), 0xC000);
        assert_eq!(cart.read(0xC000), 0xEE);
        // Below the override the work-RAM window applies
        cart.write(0x8000, 0x31);
        assert_eq!(cart.read(0x8000), 0x31);
    }

    #[test]
    fn test_state_round_trip() {
        let mut cart = test_cart(16);
        cart.write(0x6010, 0x42);
        cart.write_ppu(0x0100, 0x24);

        let state = cart.state();
        cart.write(0x6010, 0x00);
        cart.write_ppu(0x0100, 0x00);

        cart.load_state(&state).unwrap();
        assert_eq!(cart.read(0x6010), 0x42);
        assert_eq!(cart.read_ppu(0x0100), 0x24);
    }

    #[test]
    fn test_state_size_mismatch() {
        let mut cart = test_cart(16);
        let state = CartridgeState {
            prg_ram: vec![0; 1024],
            chr_ram: None,
        };
        assert!(matches!(
            cart.load_state(&state),
            Err(ConfigError::StateSizeMismatch { field: "prg_ram", .. })
        ));
    }
}
