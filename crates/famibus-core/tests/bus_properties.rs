//! Property tests for the bus mirroring rules.

use famibus_core::{Cartridge, Console, Memory, MirrorPattern};
use proptest::prelude::*;

fn test_console() -> Console {
    let mut prg = vec![0xEA; 16 * 1024];
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;
    Console::new(Cartridge::new(prg, None, MirrorPattern::HORIZONTAL).unwrap())
}

proptest! {
    /// Every address below $2000 reads the same byte as its 2 KiB
    /// canonical form.
    #[test]
    fn ram_window_is_fully_mirrored(addr in 0u16..0x2000, value: u8) {
        let mut console = test_console();
        let bus = console.bus_mut();

        bus.write(addr, value);
        prop_assert_eq!(bus.read(addr % 0x800), value);
        prop_assert_eq!(bus.read(addr), value);
    }

    /// Sprite backdrop palette entries alias the background ones:
    /// writes through $3F10/$14/$18/$1C land at $3F00/$04/$08/$0C.
    #[test]
    fn palette_backdrop_round_trips(slot in 0u16..4, value: u8) {
        let mut console = test_console();
        let alias = 0x3F10 + slot * 4;

        let bus = console.bus_mut();
        // Address through PPUADDR/PPUDATA
        bus.write(0x2006, (alias >> 8) as u8);
        bus.write(0x2006, alias as u8);
        bus.write(0x2007, value);

        let vram = console.ppu().vram();
        prop_assert_eq!(vram.read(&console.bus().cart, alias - 0x10), value);
        prop_assert_eq!(vram.read(&console.bus().cart, alias), value);
    }

    /// A 16 KiB PRG image mirrors across the 32 KiB window.
    #[test]
    fn prg_16k_mirrors(offset in 0u16..0x4000) {
        let mut console = test_console();
        let bus = console.bus_mut();

        prop_assert_eq!(bus.read(0x8000 + offset), bus.read(0xC000 + offset));
    }
}
