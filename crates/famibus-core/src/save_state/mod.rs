//! Save states as a plain value tree.
//!
//! [`ConsoleState`] captures every mutable buffer and register in the
//! console: internal RAM, cartridge work/CHR RAM, the PPU's observable
//! state, the CPU register file, both controller ports, the interrupt
//! flags, and the cycle/frame counters. No host resources (windows,
//! file handles) appear anywhere in the tree, so any serializer can
//! persist it; the optional `serde` feature derives the plumbing.
//!
//! A state is only meaningful against a console built from the same
//! cartridge: ROM contents are construction inputs and are not
//! captured. Restoring validates every buffer size and rejects
//! mismatches instead of truncating.

mod error;

pub use error::SaveStateError;

use famibus_cpu::CpuState;
use famibus_mappers::CartridgeState;
use famibus_ppu::PpuState;
use famibus_support::InterruptBus;

use crate::bus::RAM_SIZE;
use crate::input::PortState;
use crate::Console;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The whole console as a value tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsoleState {
    /// Internal RAM (2 KiB).
    pub ram: Vec<u8>,
    /// Cartridge work/CHR RAM.
    pub cart: CartridgeState,
    /// PPU observable state.
    pub ppu: PpuState,
    /// CPU register file.
    pub cpu: CpuState,
    /// Controller ports 1 and 2.
    pub controllers: [PortState; 2],
    /// Pending interrupt flags.
    pub interrupts: InterruptBus,
    /// CPU cycles since reset.
    pub total_cycles: u64,
    /// Frames since reset.
    pub frame_count: u64,
}

impl Console {
    /// Snapshot the console.
    #[must_use]
    pub fn save_state(&self) -> ConsoleState {
        let (cpu, bus, total_cycles, frame_count) = self.parts();
        ConsoleState {
            ram: bus.ram.to_vec(),
            cart: bus.cart.state(),
            ppu: bus.ppu.state(),
            cpu: cpu.state(),
            controllers: [bus.controller1.snapshot(), bus.controller2.snapshot()],
            interrupts: bus.interrupts,
            total_cycles,
            frame_count,
        }
    }

    /// Restore a snapshot taken from a console with the same
    /// cartridge layout.
    ///
    /// # Errors
    ///
    /// [`SaveStateError`] when any buffer in the state does not match
    /// this console's layout. The console is unchanged on error.
    pub fn load_state(&mut self, state: &ConsoleState) -> Result<(), SaveStateError> {
        if state.ram.len() != RAM_SIZE {
            return Err(SaveStateError::RamSize {
                expected: RAM_SIZE,
                actual: state.ram.len(),
            });
        }

        {
            // Validate the sized buffers before mutating anything
            let (_, bus, _, _) = self.parts();
            bus.cart.validate_state(&state.cart)?;
            bus.ppu.validate_state(&state.ppu)?;
        }

        let (cpu, bus, total_cycles, frame_count) = self.parts_mut();
        bus.ram.copy_from_slice(&state.ram);
        bus.cart.load_state(&state.cart)?;
        bus.ppu.load_state(&state.ppu)?;
        cpu.load_state(state.cpu);
        bus.controller1.restore(state.controllers[0]);
        bus.controller2.restore(state.controllers[1]);
        bus.interrupts = state.interrupts;
        *total_cycles = state.total_cycles;
        *frame_count = state.frame_count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use famibus_mappers::{Cartridge, MirrorPattern};
    use famibus_support::Memory;

    fn test_console() -> Console {
        let mut prg = vec![0xEA; 32 * 1024];
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        Console::new(Cartridge::new(prg, None, MirrorPattern::HORIZONTAL).unwrap())
    }

    #[test]
    fn test_round_trip() {
        let mut console = test_console();

        // Touch a bit of everything
        for _ in 0..100 {
            console.step().unwrap();
        }
        console.bus_mut().write(0x0123, 0x42);
        console.bus_mut().write(0x6000, 0x55);
        console.set_buttons_1(Button::A as u8 | Button::Start as u8);
        console.bus_mut().interrupts.raise_nmi();

        let state = console.save_state();

        // Diverge, then restore
        for _ in 0..50 {
            let _ = console.step();
        }
        console.bus_mut().write(0x0123, 0x00);
        console.load_state(&state).unwrap();

        assert_eq!(console.save_state(), state);
        assert_eq!(console.bus_mut().read(0x0123), 0x42);
        assert_eq!(console.bus_mut().read(0x6000), 0x55);
        assert!(console.bus().interrupts.nmi_active());
    }

    #[test]
    fn test_restored_console_continues_identically() {
        let mut console = test_console();
        for _ in 0..500 {
            console.step().unwrap();
        }
        let state = console.save_state();

        let mut other = test_console();
        other.load_state(&state).unwrap();

        for _ in 0..500 {
            console.step().unwrap();
            other.step().unwrap();
        }
        assert_eq!(console.save_state(), other.save_state());
    }

    #[test]
    fn test_ram_size_rejected() {
        let mut console = test_console();
        let mut state = console.save_state();
        state.ram.truncate(100);

        assert!(matches!(
            console.load_state(&state),
            Err(SaveStateError::RamSize { .. })
        ));
    }

    #[test]
    fn test_bad_cartridge_state_leaves_console_unchanged() {
        let mut console = test_console();
        console.bus_mut().write(0x0000, 0x77);

        let mut state = console.save_state();
        state.cart.prg_ram = vec![0; 16];
        state.ram[0] = 0x11;

        assert!(console.load_state(&state).is_err());
        assert_eq!(console.bus_mut().read(0x0000), 0x77);
    }
}
