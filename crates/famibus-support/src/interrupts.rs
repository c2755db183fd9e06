//! Pending-interrupt signal bus.
//!
//! Three independent flags connect the asynchronous parts of the
//! console: the PPU raises NMI at vblank entry, the CPU bus raises the
//! OAM-DMA stall after a $4014 write, and the stepper resets each flag
//! once it has been serviced. A flag stays raised until explicitly
//! reset, so raising twice before service is indistinguishable from
//! raising once.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pending-signal flags shared by the CPU bus, PPU, and stepper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterruptBus {
    nmi: bool,
    irq: bool,
    oam_dma_stall: bool,
}

impl InterruptBus {
    /// Create a bus with no signals pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nmi: false,
            irq: false,
            oam_dma_stall: false,
        }
    }

    /// Raise the non-maskable interrupt line.
    pub fn raise_nmi(&mut self) {
        self.nmi = true;
    }

    /// Clear the non-maskable interrupt line after servicing.
    pub fn reset_nmi(&mut self) {
        self.nmi = false;
    }

    /// Check whether an NMI is pending.
    #[must_use]
    pub const fn nmi_active(&self) -> bool {
        self.nmi
    }

    /// Raise the maskable interrupt line.
    ///
    /// Nothing in the core raises this today (the APU and IRQ-capable
    /// mappers would); the stepper reports a raised IRQ as a fatal
    /// error rather than servicing it.
    pub fn raise_irq(&mut self) {
        self.irq = true;
    }

    /// Clear the maskable interrupt line.
    pub fn reset_irq(&mut self) {
        self.irq = false;
    }

    /// Check whether an IRQ is pending.
    #[must_use]
    pub const fn irq_active(&self) -> bool {
        self.irq
    }

    /// Request the post-DMA CPU stall.
    pub fn raise_oam_dma_stall(&mut self) {
        self.oam_dma_stall = true;
    }

    /// Clear the DMA-stall request after servicing.
    pub fn reset_oam_dma_stall(&mut self) {
        self.oam_dma_stall = false;
    }

    /// Check whether a DMA stall is pending.
    #[must_use]
    pub const fn oam_dma_stall_active(&self) -> bool {
        self.oam_dma_stall
    }

    /// Check whether any signal is pending.
    #[must_use]
    pub const fn any_active(&self) -> bool {
        self.nmi || self.irq || self.oam_dma_stall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let bus = InterruptBus::new();
        assert!(!bus.any_active());
        assert!(!bus.nmi_active());
        assert!(!bus.irq_active());
        assert!(!bus.oam_dma_stall_active());
    }

    #[test]
    fn test_nmi_raise_and_reset() {
        let mut bus = InterruptBus::new();

        bus.raise_nmi();
        assert!(bus.nmi_active());
        assert!(bus.any_active());

        bus.reset_nmi();
        assert!(!bus.nmi_active());
        assert!(!bus.any_active());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut bus = InterruptBus::new();

        bus.raise_nmi();
        bus.raise_oam_dma_stall();
        bus.reset_nmi();

        assert!(!bus.nmi_active());
        assert!(bus.oam_dma_stall_active());
        assert!(bus.any_active());
    }

    #[test]
    fn test_double_raise_is_one_signal() {
        let mut bus = InterruptBus::new();

        bus.raise_oam_dma_stall();
        bus.raise_oam_dma_stall();
        bus.reset_oam_dma_stall();

        assert!(!bus.oam_dma_stall_active());
    }

    #[test]
    fn test_irq_raise_path() {
        let mut bus = InterruptBus::new();

        bus.raise_irq();
        assert!(bus.irq_active());
        assert!(bus.any_active());

        bus.reset_irq();
        assert!(!bus.irq_active());
    }
}
