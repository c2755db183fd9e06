//! The 16-bit address space the CPU sees.
//!
//! ```text
//! $0000-$1FFF: 2 KiB internal RAM, mirrored four times
//! $2000-$3FFF: 8 PPU registers, mirrored every 8 bytes
//! $4014:       OAM DMA trigger (write only)
//! $4016:       controller 1 data / strobe for both ports
//! $4017:       controller 2 data
//! $4020-$FFFF: cartridge (work RAM window, then PRG ROM)
//! ```
//!
//! The remaining $4000-$401F registers belong to the APU, which this
//! system does not wire up: they read as zero and swallow writes.

use famibus_mappers::Cartridge;
use famibus_ppu::{Oam, Ppu};
use famibus_support::bits::set_high_byte;
use famibus_support::{InterruptBus, Memory};

use crate::input::{Controller, StandardController};

/// Internal RAM size in bytes.
pub const RAM_SIZE: usize = 0x800;

/// End of the mirrored RAM region (exclusive).
const RAM_END: u16 = 0x2000;
/// OAM DMA trigger register.
const OAM_DMA: u16 = 0x4014;
/// Controller 1 data / strobe register.
const CONTROLLER1: u16 = 0x4016;
/// Controller 2 data register.
const CONTROLLER2: u16 = 0x4017;
/// First cartridge-visible address.
const CART_START: u16 = 0x4020;

/// Constant open-bus contribution in controller reads (bits 5-7).
const CONTROLLER_OPEN_BUS: u8 = 0x40;

/// The CPU-side system bus: RAM, PPU registers, controller ports,
/// DMA trigger, and the cartridge.
pub struct CpuBus {
    /// Internal RAM.
    pub ram: [u8; RAM_SIZE],
    /// Picture processing unit.
    pub ppu: Ppu,
    /// Cartridge, shared with the PPU's address space.
    pub cart: Cartridge,
    /// Controller port 1.
    pub controller1: Box<dyn Controller>,
    /// Controller port 2.
    pub controller2: Box<dyn Controller>,
    /// Pending-signal flags shared with the PPU and the stepper.
    pub interrupts: InterruptBus,
}

impl CpuBus {
    /// Build a bus around a cartridge, with a standard controller in
    /// port 1 and port 2 empty.
    #[must_use]
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; RAM_SIZE],
            ppu: Ppu::new(&cart),
            cart,
            controller1: Box::new(StandardController::new()),
            controller2: Box::new(StandardController::unplugged()),
            interrupts: InterruptBus::new(),
        }
    }

    /// Reset RAM, the PPU, and pending signals. Cartridge contents
    /// survive, as they would a console reset.
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.ppu.reset();
        self.interrupts = InterruptBus::new();
    }

    /// Run the PPU for `dots` cycles against this bus's cartridge and
    /// interrupt flags. Returns whether vblank began.
    pub fn run_ppu(&mut self, dots: u32) -> bool {
        let Self {
            ppu, interrupts, ..
        } = self;
        ppu.run_cycles(interrupts, dots)
    }

    /// One-shot OAM DMA: copy the 256-byte page `page << 8` into the
    /// PPU's sprite memory, then request the CPU stall.
    ///
    /// Source reads go through the full bus, so WRAM and ROM pages are
    /// valid sources and device side effects apply.
    fn run_oam_dma(&mut self, page: u8) {
        log::debug!("OAM DMA from page ${page:02X}");

        let base = set_high_byte(0, page);
        let mut block = [0u8; Oam::SIZE];
        self.read_block(base, &mut block);
        self.ppu.write_oam(&block);
        self.interrupts.raise_oam_dma_stall();
    }

    fn read_controller(&mut self, port: u16) -> u8 {
        let controller = if port == CONTROLLER1 {
            &mut self.controller1
        } else {
            &mut self.controller2
        };
        (controller.read_bit() & 0x1F) | CONTROLLER_OPEN_BUS
    }

    /// Side-effect-free read for debuggers: RAM and cartridge only,
    /// device registers read as zero.
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[addr as usize % RAM_SIZE],
            CART_START..=0xFFFF => self.cart.read(addr),
            _ => 0,
        }
    }
}

impl Memory for CpuBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[addr as usize % RAM_SIZE],

            RAM_END..=0x3FFF => {
                let Self { ppu, cart, .. } = self;
                ppu.read_register(cart, (addr % 8) as u8)
            }

            CONTROLLER1 | CONTROLLER2 => self.read_controller(addr),

            CART_START..=0xFFFF => self.cart.read(addr),

            // Unwired APU and test-mode registers
            _ => 0,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[addr as usize % RAM_SIZE] = value,

            RAM_END..=0x3FFF => {
                let Self {
                    ppu,
                    cart,
                    interrupts,
                    ..
                } = self;
                ppu.write_register(cart, interrupts, (addr % 8) as u8, value);
            }

            OAM_DMA => self.run_oam_dma(value),

            // A single strobe write reaches both ports
            CONTROLLER1 => {
                self.controller1.set_strobe(value);
                self.controller2.set_strobe(value);
            }

            CART_START..=0xFFFF => self.cart.write(addr, value),

            // Unwired APU and test-mode registers
            _ => {}
        }
    }
}
