//! famibus cartridge model.
//!
//! A cartridge is the one component visible on both buses: the CPU
//! sees work RAM and PRG ROM through [`Cartridge::read`] and
//! [`Cartridge::write`], while the PPU sees CHR memory through
//! [`Cartridge::read_ppu`] and [`Cartridge::write_ppu`] and consults
//! the cartridge's [`MirrorPattern`] to resolve nametable addresses.
//!
//! Only the fixed mapper-0 wiring is modeled: 16 or 32 KiB of PRG ROM,
//! 8 KiB of CHR ROM or RAM, up to 8 KiB of work RAM, and a mirroring
//! pattern fixed at construction. ROM-file parsing is not this crate's
//! job; a loader constructs a [`Cartridge`] from already-separated PRG
//! and CHR images.

mod cartridge;
mod mirroring;

pub use cartridge::{Cartridge, CartridgeState};
pub use mirroring::MirrorPattern;

/// Errors from cartridge construction and state loading.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// PRG ROM image has an unsupported length.
    #[error("PRG ROM for mapper 0 must be 16 or 32 KiB, got {0} bytes")]
    PrgRomSize(usize),

    /// CHR ROM image has an unsupported length.
    #[error("CHR ROM for mapper 0 must be 8 KiB, got {0} bytes")]
    ChrRomSize(usize),

    /// Work RAM size outside the supported range.
    #[error("work RAM for mapper 0 must be 2, 4, or 8 KiB, got {0} KiB")]
    WorkRamSize(usize),

    /// A restored state buffer does not match the cartridge layout.
    #[error("cartridge state size mismatch for {field}: expected {expected} bytes, got {actual}")]
    StateSizeMismatch {
        /// Which buffer mismatched.
        field: &'static str,
        /// Length the cartridge was built with.
        expected: usize,
        /// Length found in the state.
        actual: usize,
    },
}
