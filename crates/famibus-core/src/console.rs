//! The console aggregate and its stepper.
//!
//! One [`Console::step`] is the unit of emulation: service at most one
//! pending signal or run one CPU instruction, then run the PPU for
//! three dots per CPU cycle. Interrupts raised while the PPU runs are
//! observed at the next step boundary, never mid-instruction.

use famibus_cpu::{Cpu, CpuConfig, CpuError};
use famibus_mappers::Cartridge;
use famibus_ppu::Ppu;

use crate::bus::CpuBus;

/// NES timing constants (NTSC).
pub mod timing {
    /// Master clock frequency.
    pub const MASTER_CLOCK_NTSC: u32 = 21_477_272;
    /// CPU clock frequency.
    pub const CPU_CLOCK_NTSC: u32 = MASTER_CLOCK_NTSC / 12;
    /// PPU clock frequency.
    pub const PPU_CLOCK_NTSC: u32 = MASTER_CLOCK_NTSC / 4;
    /// PPU dots per CPU cycle.
    pub const PPU_CYCLES_PER_CPU_CYCLE: u32 = 3;
    /// CPU cycles per frame, approximately.
    pub const CPU_CYCLES_PER_FRAME: u32 = 29_780;
    /// Frame rate.
    pub const FRAME_RATE_NTSC: f64 = 60.0988;
}

/// Errors surfaced to the frame driver by the stepper.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StepError {
    /// An IRQ was raised; servicing it is not implemented.
    #[error("IRQ raised but IRQ servicing is not implemented")]
    UnsupportedInterrupt,

    /// The CPU rejected an opcode or detected a stack fault.
    #[error(transparent)]
    Cpu(#[from] CpuError),

    /// An access escaped the decoded address space.
    ///
    /// Modular decoding makes this unreachable from the bus itself;
    /// the variant exists so bus extensions have a lane to report it.
    #[error("address ${addr:04X} outside the decoded space")]
    AddressOutOfRange {
        /// The offending address.
        addr: u16,
    },
}

/// The whole console: CPU plus the bus that owns every other part.
pub struct Console {
    cpu: Cpu,
    bus: CpuBus,
    total_cycles: u64,
    frame_count: u64,
}

impl Console {
    /// Build a console around a cartridge and run the power-on reset.
    #[must_use]
    pub fn new(cart: Cartridge) -> Self {
        Self::with_config(cart, CpuConfig::default())
    }

    /// Build a console with explicit CPU behavior knobs.
    #[must_use]
    pub fn with_config(cart: Cartridge, config: CpuConfig) -> Self {
        let mut console = Self {
            cpu: Cpu::with_config(config),
            bus: CpuBus::new(cart),
            total_cycles: 0,
            frame_count: 0,
        };
        console.reset();
        console
    }

    /// Console reset: clear RAM and the PPU, then bring the CPU up
    /// from the cartridge's reset vector.
    pub fn reset(&mut self) {
        self.bus.reset();
        let cycles = self.cpu.reset(&mut self.bus);
        self.total_cycles = u64::from(cycles);
        self.frame_count = 0;
    }

    /// Run one step: exactly one pending signal serviced, or one CPU
    /// instruction executed, followed by the matching PPU cycles.
    ///
    /// Returns whether vblank began during this step.
    ///
    /// # Errors
    ///
    /// [`StepError::UnsupportedInterrupt`] when an IRQ is pending;
    /// CPU faults pass through as [`StepError::Cpu`].
    pub fn step(&mut self) -> Result<bool, StepError> {
        let cpu_cycles = if self.bus.interrupts.any_active() {
            if self.bus.interrupts.nmi_active() {
                let cycles = self.cpu.trigger_nmi(&mut self.bus);
                self.bus.interrupts.reset_nmi();
                cycles
            } else if self.bus.interrupts.irq_active() {
                return Err(StepError::UnsupportedInterrupt);
            } else {
                let cycles = self.cpu.oam_dma_pause();
                self.bus.interrupts.reset_oam_dma_stall();
                cycles
            }
        } else {
            self.cpu.run_next_instruction(&mut self.bus)?
        };

        self.total_cycles += u64::from(cpu_cycles);

        let vblank = self
            .bus
            .run_ppu(cpu_cycles * timing::PPU_CYCLES_PER_CPU_CYCLE);
        if vblank {
            self.frame_count += 1;
        }
        Ok(vblank)
    }

    /// Step until vblank begins, then poll both controllers.
    ///
    /// # Errors
    ///
    /// Propagates the first [`StepError`] from any step.
    pub fn run_frame(&mut self) -> Result<(), StepError> {
        while !self.step()? {}
        self.bus.controller1.update();
        self.bus.controller2.update();
        Ok(())
    }

    /// Total CPU cycles since the last reset.
    #[must_use]
    pub const fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Frames completed since the last reset.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The CPU, for debuggers.
    #[must_use]
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The PPU, for the renderer and debuggers.
    #[must_use]
    pub const fn ppu(&self) -> &Ppu {
        &self.bus.ppu
    }

    /// Mutable PPU access, for the renderer's framebuffer.
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.bus.ppu
    }

    /// The bus, for debuggers.
    #[must_use]
    pub const fn bus(&self) -> &CpuBus {
        &self.bus
    }

    /// Mutable bus access.
    pub fn bus_mut(&mut self) -> &mut CpuBus {
        &mut self.bus
    }

    /// Push button states into controller port 1.
    pub fn set_buttons_1(&mut self, buttons: u8) {
        self.bus.controller1.set_buttons(buttons);
    }

    /// Push button states into controller port 2.
    pub fn set_buttons_2(&mut self, buttons: u8) {
        self.bus.controller2.set_buttons(buttons);
    }

    /// Plug controllers into both ports.
    pub fn set_controllers(
        &mut self,
        port1: Box<dyn crate::input::Controller>,
        port2: Box<dyn crate::input::Controller>,
    ) {
        self.bus.controller1 = port1;
        self.bus.controller2 = port2;
    }

    pub(crate) fn parts(&self) -> (&Cpu, &CpuBus, u64, u64) {
        (&self.cpu, &self.bus, self.total_cycles, self.frame_count)
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Cpu, &mut CpuBus, &mut u64, &mut u64) {
        (
            &mut self.cpu,
            &mut self.bus,
            &mut self.total_cycles,
            &mut self.frame_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famibus_mappers::MirrorPattern;
    use famibus_ppu::PpuCtrl;
    use famibus_support::Memory;

    /// Cartridge whose program is an endless stream of NOPs.
    fn nop_cart() -> Cartridge {
        let mut prg = vec![0xEA; 32 * 1024];
        // Reset vector -> $8000, NMI vector -> $8000
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        prg[0x7FFA] = 0x00;
        prg[0x7FFB] = 0x80;
        Cartridge::new(prg, None, MirrorPattern::VERTICAL).unwrap()
    }

    #[test]
    fn test_step_runs_ppu_three_to_one() {
        let mut console = Console::new(nop_cart());

        let dots_before =
            u32::from(console.ppu().scanline()) * 341 + u32::from(console.ppu().dot());
        let cycles = u32::try_from({
            let before = console.total_cycles();
            console.step().unwrap();
            console.total_cycles() - before
        })
        .unwrap();
        let dots_after =
            u32::from(console.ppu().scanline()) * 341 + u32::from(console.ppu().dot());

        assert_eq!(cycles, 2); // NOP
        assert_eq!(dots_after - dots_before, cycles * 3);
    }

    #[test]
    fn test_nmi_serviced_at_step_boundary() {
        let mut console = Console::new(nop_cart());

        // Enable NMI and run until the PPU raises it
        console.bus_mut().write(0x2000, PpuCtrl::NMI_ENABLE.bits());
        while !console.step().unwrap() {}
        assert!(console.bus().interrupts.nmi_active());

        // The very next step services the NMI instead of an instruction
        let pc_before = console.cpu().pc();
        let cycles_before = console.total_cycles();
        console.step().unwrap();

        assert!(!console.bus().interrupts.nmi_active());
        assert_eq!(console.total_cycles() - cycles_before, 7);
        assert_eq!(console.cpu().pc(), 0x8000); // NMI vector
        assert_ne!(console.cpu().pc(), pc_before.wrapping_add(1));
    }

    #[test]
    fn test_irq_is_unsupported() {
        let mut console = Console::new(nop_cart());
        console.bus_mut().interrupts.raise_irq();

        assert!(matches!(
            console.step(),
            Err(StepError::UnsupportedInterrupt)
        ));
    }

    #[test]
    fn test_nmi_wins_over_dma_stall() {
        let mut console = Console::new(nop_cart());
        console.bus_mut().interrupts.raise_nmi();
        console.bus_mut().interrupts.raise_oam_dma_stall();

        console.step().unwrap();
        // NMI serviced first; the stall waits for the next step
        assert!(!console.bus().interrupts.nmi_active());
        assert!(console.bus().interrupts.oam_dma_stall_active());

        console.step().unwrap();
        assert!(!console.bus().interrupts.oam_dma_stall_active());
    }

    #[test]
    fn test_dma_stall_consumes_a_step() {
        let mut console = Console::new(nop_cart());

        // Trigger DMA directly on the bus
        console.bus_mut().write(0x4014, 0x02);
        assert!(console.bus().interrupts.oam_dma_stall_active());

        let pc_before = console.cpu().pc();
        let cycles_before = console.total_cycles();
        console.step().unwrap();

        // No instruction ran; the stall cycles were accounted
        assert_eq!(console.cpu().pc(), pc_before);
        let stall = console.total_cycles() - cycles_before;
        assert!(stall == 513 || stall == 514);
        assert!(!console.bus().interrupts.oam_dma_stall_active());
    }

    #[test]
    fn test_run_frame_reaches_vblank() {
        let mut console = Console::new(nop_cart());
        console.run_frame().unwrap();

        assert_eq!(console.frame_count(), 1);
        assert!(console.ppu().in_vblank());
        // Vblank entry is about 241 scanlines in: ~27,400 CPU cycles
        let cycles = console.total_cycles();
        assert!(cycles > 27_000 && cycles < 28_000, "cycles = {cycles}");
    }

    #[test]
    fn test_reset_restarts_counters() {
        let mut console = Console::new(nop_cart());
        console.run_frame().unwrap();

        console.reset();
        assert_eq!(console.frame_count(), 0);
        assert_eq!(console.total_cycles(), 7);
        assert_eq!(console.cpu().pc(), 0x8000);
    }
}
