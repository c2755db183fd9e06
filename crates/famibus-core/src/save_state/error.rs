//! Save-state error types.

use famibus_mappers::ConfigError;
use famibus_ppu::PpuError;

/// Errors from restoring a console state.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SaveStateError {
    /// Internal RAM buffer has the wrong size.
    #[error("internal RAM size mismatch: expected {expected} bytes, got {actual}")]
    RamSize {
        /// Required size.
        expected: usize,
        /// Size found in the state.
        actual: usize,
    },

    /// The cartridge rejected its buffers.
    #[error(transparent)]
    Cartridge(#[from] ConfigError),

    /// The PPU rejected its buffers.
    #[error(transparent)]
    Ppu(#[from] PpuError),
}
