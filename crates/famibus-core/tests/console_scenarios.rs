//! End-to-end scenarios driven through the whole console: machine
//! programs in PRG ROM, dispatched over the CPU bus, observed through
//! the PPU and the interrupt flags.

use famibus_core::{Button, Cartridge, Console, Memory, MirrorPattern, StepError};

/// Build a mapper-0 cartridge whose PRG holds `program` at $8000
/// followed by a NOP slide. Reset runs the program; the NMI handler
/// at $8100 is part of the slide.
fn cart_with_program(program: &[u8], mirror: MirrorPattern) -> Cartridge {
    let mut prg = vec![0xEA; 32 * 1024];
    prg[..program.len()].copy_from_slice(program);
    prg[0x7FFC] = 0x00; // reset -> $8000
    prg[0x7FFD] = 0x80;
    prg[0x7FFA] = 0x00; // NMI -> $8100
    prg[0x7FFB] = 0x81;
    Cartridge::new(prg, None, mirror).unwrap()
}

fn console_with_program(program: &[u8]) -> Console {
    Console::new(cart_with_program(program, MirrorPattern::HORIZONTAL))
}

#[test]
fn horizontal_mirroring_shares_pages() {
    // Program writes $42 to PPU $2000 through PPUADDR/PPUDATA:
    //   LDA #$20, STA $2006, LDA #$00, STA $2006, LDA #$42, STA $2007
    let mut console = console_with_program(&[
        0xA9, 0x20, 0x8D, 0x06, 0x20, //
        0xA9, 0x00, 0x8D, 0x06, 0x20, //
        0xA9, 0x42, 0x8D, 0x07, 0x20, //
    ]);
    for _ in 0..6 {
        console.step().unwrap();
    }

    let vram = console.ppu().vram();
    let cart = &console.bus().cart;
    assert_eq!(vram.read(cart, 0x2400), 0x42); // mirrored page
    assert_eq!(vram.read(cart, 0x2800), 0x00); // distinct page
}

#[test]
fn palette_backdrop_alias() {
    //   LDA #$3F, STA $2006, LDA #$10, STA $2006, LDA #$1A, STA $2007
    let mut console = console_with_program(&[
        0xA9, 0x3F, 0x8D, 0x06, 0x20, //
        0xA9, 0x10, 0x8D, 0x06, 0x20, //
        0xA9, 0x1A, 0x8D, 0x07, 0x20, //
    ]);
    for _ in 0..6 {
        console.step().unwrap();
    }

    let vram = console.ppu().vram();
    assert_eq!(vram.read(&console.bus().cart, 0x3F00), 0x1A);
}

#[test]
fn ram_mirrors_every_2k() {
    let mut console = console_with_program(&[]);
    console.bus_mut().write(0x0000, 0x77);

    for mirror in [0x0800, 0x1000, 0x1800] {
        assert_eq!(console.bus_mut().read(mirror), 0x77);
    }
}

#[test]
fn oam_dma_copies_a_page_and_stalls() {
    // Program: LDA #$02, STA $4014
    let mut console = console_with_program(&[0xA9, 0x02, 0x8D, 0x14, 0x40]);

    for i in 0..=255u16 {
        console.bus_mut().write(0x0200 + i, i as u8);
    }

    console.step().unwrap(); // LDA
    console.step().unwrap(); // STA -> DMA fires inside the write

    for (i, &byte) in console.ppu().oam().iter().enumerate() {
        assert_eq!(byte, i as u8);
    }
    assert!(console.bus().interrupts.oam_dma_stall_active());

    // The stall occupies the following step; no instruction runs
    let pc = console.cpu().pc();
    let before = console.total_cycles();
    console.step().unwrap();
    assert_eq!(console.cpu().pc(), pc);
    assert!(matches!(console.total_cycles() - before, 513 | 514));
    assert!(!console.bus().interrupts.oam_dma_stall_active());
}

#[test]
fn nmi_serviced_once_at_next_boundary() {
    // Program enables NMI: LDA #$80, STA $2000, then NOPs forever
    let mut console = console_with_program(&[0xA9, 0x80, 0x8D, 0x00, 0x20]);

    // Run to vblank; the PPU raises NMI during some step's PPU cycles
    while !console.step().unwrap() {}
    assert!(console.bus().interrupts.nmi_active());
    let serviced_cycles = console.total_cycles();

    // Next step services it: 7 cycles, vector taken, flag cleared
    console.step().unwrap();
    assert_eq!(console.total_cycles() - serviced_cycles, 7);
    assert_eq!(console.cpu().pc(), 0x8100);
    assert!(!console.bus().interrupts.nmi_active());

    // And it is serviced exactly once: the handler's NOP runs next
    console.step().unwrap();
    assert_eq!(console.cpu().pc(), 0x8101);
}

#[test]
fn prg_rom_write_is_ignored() {
    // Program: LDA #$FF, STA $8000
    let mut console = console_with_program(&[0xA9, 0xFF, 0x8D, 0x00, 0x80]);

    let original = console.bus_mut().read(0x8000);
    console.step().unwrap();
    console.step().unwrap();

    assert_eq!(console.bus_mut().read(0x8000), original);
}

#[test]
fn irq_surfaces_to_the_frame_driver() {
    let mut console = console_with_program(&[]);
    console.bus_mut().interrupts.raise_irq();

    assert!(matches!(
        console.run_frame(),
        Err(StepError::UnsupportedInterrupt)
    ));
}

#[test]
fn controller_round_trip_through_the_bus() {
    // Program strobes and reads controller 1:
    //   LDA #$01, STA $4016, LDA #$00, STA $4016,
    //   LDA $4016, STA $0010
    let mut console = console_with_program(&[
        0xA9, 0x01, 0x8D, 0x16, 0x40, //
        0xA9, 0x00, 0x8D, 0x16, 0x40, //
        0xAD, 0x16, 0x40, 0x8D, 0x10, 0x00, //
    ]);
    console.set_buttons_1(Button::A as u8);

    for _ in 0..6 {
        console.step().unwrap();
    }

    let value = console.bus_mut().read(0x0010);
    assert_eq!(value & 0x01, 1); // A was latched
    assert_eq!(value & 0xE0, 0x40); // open-bus pattern
}

#[test]
fn frames_have_stable_cadence() {
    let mut console = console_with_program(&[]);

    console.run_frame().unwrap();
    let first = console.total_cycles();
    console.run_frame().unwrap();
    let second = console.total_cycles() - first;

    // Steady state: one frame is ~29,780 CPU cycles
    assert!(second > 29_000 && second < 30_500, "frame = {second}");
    assert_eq!(console.frame_count(), 2);
}
