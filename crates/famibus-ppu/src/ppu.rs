//! The 2C02 front end: register file, OAM, VRAM, and frame timing.
//!
//! # CPU registers (index 0-7, mirrored across $2000-$3FFF)
//!
//! ```text
//! 0: PPUCTRL   1: PPUMASK   2: PPUSTATUS  3: OAMADDR
//! 4: OAMDATA   5: PPUSCROLL 6: PPUADDR    7: PPUDATA
//! ```
//!
//! Pixel rendering is not performed here; an external renderer reads
//! the exposed VRAM/OAM/palette and fills the palette-index
//! framebuffer. What the PPU does own is everything software can
//! observe through the register file: the internal address registers,
//! the PPUDATA read buffer, the I/O latch, vblank timing, and NMI
//! generation.

use famibus_mappers::Cartridge;
use famibus_support::InterruptBus;

use crate::oam::Oam;
use crate::registers::{PpuCtrl, PpuMask, PpuStatus};
use crate::scroll::Scroll;
use crate::timing::Timing;
use crate::vram::Vram;
use crate::{PpuError, PpuState};

/// Frame width in pixels.
pub const FRAME_WIDTH: usize = 256;
/// Frame height in pixels.
pub const FRAME_HEIGHT: usize = 240;
/// Framebuffer size in palette-index bytes.
pub const FRAME_SIZE: usize = FRAME_WIDTH * FRAME_HEIGHT;

/// The picture processing unit.
pub struct Ppu {
    ctrl: PpuCtrl,
    mask: PpuMask,
    status: PpuStatus,
    scroll: Scroll,
    oam: Oam,
    vram: Vram,
    timing: Timing,

    /// PPUDATA buffered-read register.
    read_buffer: u8,
    /// Last value driven on the register bus.
    io_latch: u8,

    /// Palette-index surface for the external renderer.
    frame_buffer: Vec<u8>,
}

impl Ppu {
    /// Create a PPU wired for the cartridge's mirror pattern.
    #[must_use]
    pub fn new(cart: &Cartridge) -> Self {
        Self {
            ctrl: PpuCtrl::empty(),
            mask: PpuMask::empty(),
            status: PpuStatus::empty(),
            scroll: Scroll::new(),
            oam: Oam::new(),
            vram: Vram::new(cart.mirror_pattern()),
            timing: Timing::new(),
            read_buffer: 0,
            io_latch: 0,
            frame_buffer: vec![0; FRAME_SIZE],
        }
    }

    /// Read a register by index (0-7).
    pub fn read_register(&mut self, cart: &Cartridge, index: u8) -> u8 {
        match index & 0x07 {
            // Write-only registers return the latch
            0 | 1 | 3 | 5 | 6 => self.io_latch,

            // PPUSTATUS: flags in bits 7-5, latch in bits 4-0;
            // reading clears vblank and resets the address latch
            2 => {
                let result = (self.status.bits() & 0xE0) | (self.io_latch & 0x1F);
                self.status.clear_vblank();
                self.scroll.reset_latch();
                self.io_latch = result;
                result
            }

            // OAMDATA
            4 => {
                let value = self.oam.read();
                self.io_latch = value;
                value
            }

            // PPUDATA with the buffered-read rule
            7 => {
                let addr = self.scroll.vram_addr() & 0x3FFF;
                let data = self.vram.read(cart, addr);

                let result = if addr >= Vram::PALETTE_START {
                    // Palette reads are immediate; the buffer picks up
                    // the nametable byte underneath
                    self.read_buffer = self.vram.read(cart, addr - 0x1000);
                    (data & 0x3F) | (self.io_latch & 0xC0)
                } else {
                    let buffered = self.read_buffer;
                    self.read_buffer = data;
                    buffered
                };

                self.scroll.increment_vram(self.ctrl.vram_increment());
                self.io_latch = result;
                result
            }

            _ => unreachable!(),
        }
    }

    /// Write a register by index (0-7).
    pub fn write_register(
        &mut self,
        cart: &mut Cartridge,
        interrupts: &mut InterruptBus,
        index: u8,
        value: u8,
    ) {
        self.io_latch = value;

        match index & 0x07 {
            0 => {
                let was_enabled = self.ctrl.nmi_enabled();
                self.ctrl = PpuCtrl::from_bits_truncate(value);
                self.scroll.write_ctrl(value);

                // Enabling NMI mid-vblank raises it immediately
                if !was_enabled && self.ctrl.nmi_enabled() && self.status.in_vblank() {
                    interrupts.raise_nmi();
                }
            }
            1 => self.mask = PpuMask::from_bits_truncate(value),
            2 => {} // PPUSTATUS is read-only
            3 => self.oam.set_addr(value),
            4 => self.oam.write(value),
            5 => self.scroll.write_scroll(value),
            6 => self.scroll.write_addr(value),
            7 => {
                let addr = self.scroll.vram_addr() & 0x3FFF;
                self.vram.write(cart, addr, value);
                self.scroll.increment_vram(self.ctrl.vram_increment());
            }
            _ => unreachable!(),
        }
    }

    /// OAM DMA entry point: copy a full page into sprite memory
    /// starting at the current OAM address.
    pub fn write_oam(&mut self, block: &[u8; Oam::SIZE]) {
        self.oam.write_block(block);
    }

    /// Advance the PPU by `dots` cycles.
    ///
    /// Returns `true` when vblank began within this call. Raises NMI
    /// on the interrupt bus at vblank entry when enabled; the stepper
    /// observes the signal at its next step boundary.
    pub fn run_cycles(&mut self, interrupts: &mut InterruptBus, dots: u32) -> bool {
        let mut vblank_began = false;

        for _ in 0..dots {
            self.timing.tick(self.mask.rendering_enabled());

            if self.timing.at_vblank_start() {
                self.status.set_vblank();
                vblank_began = true;
                if self.ctrl.nmi_enabled() {
                    interrupts.raise_nmi();
                }
                log::trace!("vblank began");
            } else if self.timing.at_vblank_clear() {
                self.status.clear_vblank();
                self.status.clear_sprite_flags();
            }
        }

        vblank_began
    }

    /// Power-on state, keeping the wired mirror pattern.
    pub fn reset(&mut self) {
        self.ctrl = PpuCtrl::empty();
        self.mask = PpuMask::empty();
        self.status = PpuStatus::empty();
        self.scroll = Scroll::new();
        self.timing = Timing::new();
        self.read_buffer = 0;
        self.io_latch = 0;
    }

    /// Whether the vblank flag is currently set.
    #[must_use]
    pub fn in_vblank(&self) -> bool {
        self.status.in_vblank()
    }

    /// Current scanline (0-261).
    #[must_use]
    pub const fn scanline(&self) -> u16 {
        self.timing.scanline()
    }

    /// Current dot within the scanline (0-340).
    #[must_use]
    pub const fn dot(&self) -> u16 {
        self.timing.dot()
    }

    /// VRAM, for the external renderer and diagnostics.
    #[must_use]
    pub const fn vram(&self) -> &Vram {
        &self.vram
    }

    /// Sprite memory, for the external renderer.
    #[must_use]
    pub const fn oam(&self) -> &[u8; Oam::SIZE] {
        self.oam.data()
    }

    /// Palette-index framebuffer (256x240).
    #[must_use]
    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame_buffer
    }

    /// Mutable framebuffer for the external renderer to fill.
    pub fn frame_buffer_mut(&mut self) -> &mut [u8] {
        &mut self.frame_buffer
    }

    /// Snapshot everything software can observe.
    #[must_use]
    pub fn state(&self) -> PpuState {
        PpuState {
            ctrl: self.ctrl.bits(),
            mask: self.mask.bits(),
            status: self.status.bits(),
            scroll: self.scroll,
            oam_addr: self.oam.addr(),
            oam: self.oam.data().to_vec(),
            nametables: self.vram.nametables().to_vec(),
            palette: self.vram.palette().to_vec(),
            read_buffer: self.read_buffer,
            io_latch: self.io_latch,
            dot: self.timing.dot(),
            scanline: self.timing.scanline(),
            odd_frame: self.timing.odd_frame(),
        }
    }

    /// Check a state against this PPU's layout without mutating
    /// anything.
    ///
    /// # Errors
    ///
    /// [`PpuError::StateSizeMismatch`] when a buffer in the state does
    /// not match this PPU's layout.
    pub fn validate_state(&self, state: &PpuState) -> Result<(), PpuError> {
        if state.oam.len() != Oam::SIZE {
            return Err(PpuError::StateSizeMismatch {
                field: "oam",
                expected: Oam::SIZE,
                actual: state.oam.len(),
            });
        }
        if state.nametables.len() != self.vram.nametables().len() {
            return Err(PpuError::StateSizeMismatch {
                field: "nametables",
                expected: self.vram.nametables().len(),
                actual: state.nametables.len(),
            });
        }
        if state.palette.len() != Vram::PALETTE_SIZE {
            return Err(PpuError::StateSizeMismatch {
                field: "palette",
                expected: Vram::PALETTE_SIZE,
                actual: state.palette.len(),
            });
        }
        Ok(())
    }

    /// Restore a snapshot.
    ///
    /// # Errors
    ///
    /// [`PpuError::StateSizeMismatch`] when a buffer in the state does
    /// not match this PPU's layout; nothing is mutated on error.
    pub fn load_state(&mut self, state: &PpuState) -> Result<(), PpuError> {
        self.validate_state(state)?;

        self.ctrl = PpuCtrl::from_bits_truncate(state.ctrl);
        self.mask = PpuMask::from_bits_truncate(state.mask);
        self.status = PpuStatus::from_bits_truncate(state.status);
        self.scroll = state.scroll;
        self.oam.set_addr(state.oam_addr);
        let mut oam = [0u8; Oam::SIZE];
        oam.copy_from_slice(&state.oam);
        self.oam.set_data(oam);
        let mut palette = [0u8; Vram::PALETTE_SIZE];
        palette.copy_from_slice(&state.palette);
        self.vram.restore(&state.nametables, &palette);
        self.read_buffer = state.read_buffer;
        self.io_latch = state.io_latch;
        self.timing.set(state.dot, state.scanline, state.odd_frame);
        Ok(())
    }
}
