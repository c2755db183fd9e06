//! The 256-entry opcode dispatch table.
//!
//! Every slot carries the mnemonic, addressing mode, base cycle count,
//! whether a page crossing adds a cycle, and which support level the
//! opcode needs. Base cycle counts are the documented values; branch
//! and page-cross penalties are added during execution.

use crate::addressing::AddrMode;

/// Instruction mnemonic.
///
/// Official mnemonics first, then the unofficial ones grouped by the
/// support level that unlocks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)] // the mnemonics are their own documentation
pub enum Mnemonic {
    // Official
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    // Unofficial, stable
    Lax, Sax, Dcp, Isc, Slo, Rla, Sre, Rra,
    // Unofficial, unstable
    Anc, Alr, Arr, Sbx, Las, Sha, Shx, Shy, Tas, Ane, Lxa,
    // Bus-jamming opcodes, never executed
    Jam,
}

/// Which support level an opcode needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    /// Documented opcode, always available.
    Official,
    /// Unofficial but deterministic; needs level 1.
    Stable,
    /// Unofficial with analog bus behavior; needs level 2.
    Unstable,
    /// Halts the processor; never executed.
    Jam,
}

/// One entry in the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,
    /// Addressing mode.
    pub mode: AddrMode,
    /// Base cycle count.
    pub cycles: u8,
    /// Whether an index crossing a page boundary costs a cycle.
    pub page_penalty: bool,
    /// Support level required.
    pub legality: Legality,
}

const fn official(mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: false,
        legality: Legality::Official,
    }
}

const fn official_px(mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: true,
        legality: Legality::Official,
    }
}

const fn stable(mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: false,
        legality: Legality::Stable,
    }
}

const fn stable_px(mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: true,
        legality: Legality::Stable,
    }
}

const fn unstable(mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: false,
        legality: Legality::Unstable,
    }
}

#[allow(clippy::too_many_lines)] // one line per opcode
const fn build_table() -> [Opcode; 256] {
    use AddrMode::{
        Absolute, AbsoluteX, AbsoluteY, Accumulator, Immediate, Implied, Indirect, IndirectX,
        IndirectY, Relative, ZeroPage, ZeroPageX, ZeroPageY,
    };
    use Mnemonic::{
        Adc, Alr, Anc, And, Ane, Arr, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
        Cld, Cli, Clv, Cmp, Cpx, Cpy, Dcp, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Isc, Jam, Jmp, Jsr,
        Las, Lax, Lda, Ldx, Ldy, Lsr, Lxa, Nop, Ora, Pha, Php, Pla, Plp, Rla, Rol, Ror, Rra, Rti,
        Rts, Sax, Sbc, Sbx, Sec, Sed, Sei, Sha, Shx, Shy, Slo, Sre, Sta, Stx, Sty, Tas, Tax, Tay,
        Tsx, Txa, Txs, Tya,
    };

    let jam = Opcode {
        mnemonic: Jam,
        mode: Implied,
        cycles: 0,
        page_penalty: false,
        legality: Legality::Jam,
    };
    let mut t = [jam; 256];

    // Loads
    t[0xA9] = official(Lda, Immediate, 2);
    t[0xA5] = official(Lda, ZeroPage, 3);
    t[0xB5] = official(Lda, ZeroPageX, 4);
    t[0xAD] = official(Lda, Absolute, 4);
    t[0xBD] = official_px(Lda, AbsoluteX, 4);
    t[0xB9] = official_px(Lda, AbsoluteY, 4);
    t[0xA1] = official(Lda, IndirectX, 6);
    t[0xB1] = official_px(Lda, IndirectY, 5);
    t[0xA2] = official(Ldx, Immediate, 2);
    t[0xA6] = official(Ldx, ZeroPage, 3);
    t[0xB6] = official(Ldx, ZeroPageY, 4);
    t[0xAE] = official(Ldx, Absolute, 4);
    t[0xBE] = official_px(Ldx, AbsoluteY, 4);
    t[0xA0] = official(Ldy, Immediate, 2);
    t[0xA4] = official(Ldy, ZeroPage, 3);
    t[0xB4] = official(Ldy, ZeroPageX, 4);
    t[0xAC] = official(Ldy, Absolute, 4);
    t[0xBC] = official_px(Ldy, AbsoluteX, 4);

    // Stores
    t[0x85] = official(Sta, ZeroPage, 3);
    t[0x95] = official(Sta, ZeroPageX, 4);
    t[0x8D] = official(Sta, Absolute, 4);
    t[0x9D] = official(Sta, AbsoluteX, 5);
    t[0x99] = official(Sta, AbsoluteY, 5);
    t[0x81] = official(Sta, IndirectX, 6);
    t[0x91] = official(Sta, IndirectY, 6);
    t[0x86] = official(Stx, ZeroPage, 3);
    t[0x96] = official(Stx, ZeroPageY, 4);
    t[0x8E] = official(Stx, Absolute, 4);
    t[0x84] = official(Sty, ZeroPage, 3);
    t[0x94] = official(Sty, ZeroPageX, 4);
    t[0x8C] = official(Sty, Absolute, 4);

    // Transfers
    t[0xAA] = official(Tax, Implied, 2);
    t[0xA8] = official(Tay, Implied, 2);
    t[0xBA] = official(Tsx, Implied, 2);
    t[0x8A] = official(Txa, Implied, 2);
    t[0x9A] = official(Txs, Implied, 2);
    t[0x98] = official(Tya, Implied, 2);

    // Arithmetic
    t[0x69] = official(Adc, Immediate, 2);
    t[0x65] = official(Adc, ZeroPage, 3);
    t[0x75] = official(Adc, ZeroPageX, 4);
    t[0x6D] = official(Adc, Absolute, 4);
    t[0x7D] = official_px(Adc, AbsoluteX, 4);
    t[0x79] = official_px(Adc, AbsoluteY, 4);
    t[0x61] = official(Adc, IndirectX, 6);
    t[0x71] = official_px(Adc, IndirectY, 5);
    t[0xE9] = official(Sbc, Immediate, 2);
    t[0xE5] = official(Sbc, ZeroPage, 3);
    t[0xF5] = official(Sbc, ZeroPageX, 4);
    t[0xED] = official(Sbc, Absolute, 4);
    t[0xFD] = official_px(Sbc, AbsoluteX, 4);
    t[0xF9] = official_px(Sbc, AbsoluteY, 4);
    t[0xE1] = official(Sbc, IndirectX, 6);
    t[0xF1] = official_px(Sbc, IndirectY, 5);

    // Compares
    t[0xC9] = official(Cmp, Immediate, 2);
    t[0xC5] = official(Cmp, ZeroPage, 3);
    t[0xD5] = official(Cmp, ZeroPageX, 4);
    t[0xCD] = official(Cmp, Absolute, 4);
    t[0xDD] = official_px(Cmp, AbsoluteX, 4);
    t[0xD9] = official_px(Cmp, AbsoluteY, 4);
    t[0xC1] = official(Cmp, IndirectX, 6);
    t[0xD1] = official_px(Cmp, IndirectY, 5);
    t[0xE0] = official(Cpx, Immediate, 2);
    t[0xE4] = official(Cpx, ZeroPage, 3);
    t[0xEC] = official(Cpx, Absolute, 4);
    t[0xC0] = official(Cpy, Immediate, 2);
    t[0xC4] = official(Cpy, ZeroPage, 3);
    t[0xCC] = official(Cpy, Absolute, 4);

    // Logic
    t[0x29] = official(And, Immediate, 2);
    t[0x25] = official(And, ZeroPage, 3);
    t[0x35] = official(And, ZeroPageX, 4);
    t[0x2D] = official(And, Absolute, 4);
    t[0x3D] = official_px(And, AbsoluteX, 4);
    t[0x39] = official_px(And, AbsoluteY, 4);
    t[0x21] = official(And, IndirectX, 6);
    t[0x31] = official_px(And, IndirectY, 5);
    t[0x49] = official(Eor, Immediate, 2);
    t[0x45] = official(Eor, ZeroPage, 3);
    t[0x55] = official(Eor, ZeroPageX, 4);
    t[0x4D] = official(Eor, Absolute, 4);
    t[0x5D] = official_px(Eor, AbsoluteX, 4);
    t[0x59] = official_px(Eor, AbsoluteY, 4);
    t[0x41] = official(Eor, IndirectX, 6);
    t[0x51] = official_px(Eor, IndirectY, 5);
    t[0x09] = official(Ora, Immediate, 2);
    t[0x05] = official(Ora, ZeroPage, 3);
    t[0x15] = official(Ora, ZeroPageX, 4);
    t[0x0D] = official(Ora, Absolute, 4);
    t[0x1D] = official_px(Ora, AbsoluteX, 4);
    t[0x19] = official_px(Ora, AbsoluteY, 4);
    t[0x01] = official(Ora, IndirectX, 6);
    t[0x11] = official_px(Ora, IndirectY, 5);
    t[0x24] = official(Bit, ZeroPage, 3);
    t[0x2C] = official(Bit, Absolute, 4);

    // Shifts and rotates
    t[0x0A] = official(Asl, Accumulator, 2);
    t[0x06] = official(Asl, ZeroPage, 5);
    t[0x16] = official(Asl, ZeroPageX, 6);
    t[0x0E] = official(Asl, Absolute, 6);
    t[0x1E] = official(Asl, AbsoluteX, 7);
    t[0x4A] = official(Lsr, Accumulator, 2);
    t[0x46] = official(Lsr, ZeroPage, 5);
    t[0x56] = official(Lsr, ZeroPageX, 6);
    t[0x4E] = official(Lsr, Absolute, 6);
    t[0x5E] = official(Lsr, AbsoluteX, 7);
    t[0x2A] = official(Rol, Accumulator, 2);
    t[0x26] = official(Rol, ZeroPage, 5);
    t[0x36] = official(Rol, ZeroPageX, 6);
    t[0x2E] = official(Rol, Absolute, 6);
    t[0x3E] = official(Rol, AbsoluteX, 7);
    t[0x6A] = official(Ror, Accumulator, 2);
    t[0x66] = official(Ror, ZeroPage, 5);
    t[0x76] = official(Ror, ZeroPageX, 6);
    t[0x6E] = official(Ror, Absolute, 6);
    t[0x7E] = official(Ror, AbsoluteX, 7);

    // Increments and decrements
    t[0xE6] = official(Inc, ZeroPage, 5);
    t[0xF6] = official(Inc, ZeroPageX, 6);
    t[0xEE] = official(Inc, Absolute, 6);
    t[0xFE] = official(Inc, AbsoluteX, 7);
    t[0xC6] = official(Dec, ZeroPage, 5);
    t[0xD6] = official(Dec, ZeroPageX, 6);
    t[0xCE] = official(Dec, Absolute, 6);
    t[0xDE] = official(Dec, AbsoluteX, 7);
    t[0xE8] = official(Inx, Implied, 2);
    t[0xC8] = official(Iny, Implied, 2);
    t[0xCA] = official(Dex, Implied, 2);
    t[0x88] = official(Dey, Implied, 2);

    // Jumps and subroutines
    t[0x4C] = official(Jmp, Absolute, 3);
    t[0x6C] = official(Jmp, Indirect, 5);
    t[0x20] = official(Jsr, Absolute, 6);
    t[0x60] = official(Rts, Implied, 6);
    t[0x40] = official(Rti, Implied, 6);
    t[0x00] = official(Brk, Implied, 7);

    // Branches
    t[0x90] = official(Bcc, Relative, 2);
    t[0xB0] = official(Bcs, Relative, 2);
    t[0xF0] = official(Beq, Relative, 2);
    t[0x30] = official(Bmi, Relative, 2);
    t[0xD0] = official(Bne, Relative, 2);
    t[0x10] = official(Bpl, Relative, 2);
    t[0x50] = official(Bvc, Relative, 2);
    t[0x70] = official(Bvs, Relative, 2);

    // Stack
    t[0x48] = official(Pha, Implied, 3);
    t[0x08] = official(Php, Implied, 3);
    t[0x68] = official(Pla, Implied, 4);
    t[0x28] = official(Plp, Implied, 4);

    // Flags
    t[0x18] = official(Clc, Implied, 2);
    t[0xD8] = official(Cld, Implied, 2);
    t[0x58] = official(Cli, Implied, 2);
    t[0xB8] = official(Clv, Implied, 2);
    t[0x38] = official(Sec, Implied, 2);
    t[0xF8] = official(Sed, Implied, 2);
    t[0x78] = official(Sei, Implied, 2);

    // The one official NOP
    t[0xEA] = official(Nop, Implied, 2);

    // Unofficial NOP variants
    t[0x1A] = stable(Nop, Implied, 2);
    t[0x3A] = stable(Nop, Implied, 2);
    t[0x5A] = stable(Nop, Implied, 2);
    t[0x7A] = stable(Nop, Implied, 2);
    t[0xDA] = stable(Nop, Implied, 2);
    t[0xFA] = stable(Nop, Implied, 2);
    t[0x80] = stable(Nop, Immediate, 2);
    t[0x82] = stable(Nop, Immediate, 2);
    t[0x89] = stable(Nop, Immediate, 2);
    t[0xC2] = stable(Nop, Immediate, 2);
    t[0xE2] = stable(Nop, Immediate, 2);
    t[0x04] = stable(Nop, ZeroPage, 3);
    t[0x44] = stable(Nop, ZeroPage, 3);
    t[0x64] = stable(Nop, ZeroPage, 3);
    t[0x14] = stable(Nop, ZeroPageX, 4);
    t[0x34] = stable(Nop, ZeroPageX, 4);
    t[0x54] = stable(Nop, ZeroPageX, 4);
    t[0x74] = stable(Nop, ZeroPageX, 4);
    t[0xD4] = stable(Nop, ZeroPageX, 4);
    t[0xF4] = stable(Nop, ZeroPageX, 4);
    t[0x0C] = stable(Nop, Absolute, 4);
    t[0x1C] = stable_px(Nop, AbsoluteX, 4);
    t[0x3C] = stable_px(Nop, AbsoluteX, 4);
    t[0x5C] = stable_px(Nop, AbsoluteX, 4);
    t[0x7C] = stable_px(Nop, AbsoluteX, 4);
    t[0xDC] = stable_px(Nop, AbsoluteX, 4);
    t[0xFC] = stable_px(Nop, AbsoluteX, 4);

    // LAX / SAX and the SBC alias
    t[0xA7] = stable(Lax, ZeroPage, 3);
    t[0xB7] = stable(Lax, ZeroPageY, 4);
    t[0xAF] = stable(Lax, Absolute, 4);
    t[0xBF] = stable_px(Lax, AbsoluteY, 4);
    t[0xA3] = stable(Lax, IndirectX, 6);
    t[0xB3] = stable_px(Lax, IndirectY, 5);
    t[0x87] = stable(Sax, ZeroPage, 3);
    t[0x97] = stable(Sax, ZeroPageY, 4);
    t[0x8F] = stable(Sax, Absolute, 4);
    t[0x83] = stable(Sax, IndirectX, 6);
    t[0xEB] = stable(Sbc, Immediate, 2);

    // Read-modify-write combos
    t[0xC7] = stable(Dcp, ZeroPage, 5);
    t[0xD7] = stable(Dcp, ZeroPageX, 6);
    t[0xCF] = stable(Dcp, Absolute, 6);
    t[0xDF] = stable(Dcp, AbsoluteX, 7);
    t[0xDB] = stable(Dcp, AbsoluteY, 7);
    t[0xC3] = stable(Dcp, IndirectX, 8);
    t[0xD3] = stable(Dcp, IndirectY, 8);
    t[0xE7] = stable(Isc, ZeroPage, 5);
    t[0xF7] = stable(Isc, ZeroPageX, 6);
    t[0xEF] = stable(Isc, Absolute, 6);
    t[0xFF] = stable(Isc, AbsoluteX, 7);
    t[0xFB] = stable(Isc, AbsoluteY, 7);
    t[0xE3] = stable(Isc, IndirectX, 8);
    t[0xF3] = stable(Isc, IndirectY, 8);
    t[0x07] = stable(Slo, ZeroPage, 5);
    t[0x17] = stable(Slo, ZeroPageX, 6);
    t[0x0F] = stable(Slo, Absolute, 6);
    t[0x1F] = stable(Slo, AbsoluteX, 7);
    t[0x1B] = stable(Slo, AbsoluteY, 7);
    t[0x03] = stable(Slo, IndirectX, 8);
    t[0x13] = stable(Slo, IndirectY, 8);
    t[0x27] = stable(Rla, ZeroPage, 5);
    t[0x37] = stable(Rla, ZeroPageX, 6);
    t[0x2F] = stable(Rla, Absolute, 6);
    t[0x3F] = stable(Rla, AbsoluteX, 7);
    t[0x3B] = stable(Rla, AbsoluteY, 7);
    t[0x23] = stable(Rla, IndirectX, 8);
    t[0x33] = stable(Rla, IndirectY, 8);
    t[0x47] = stable(Sre, ZeroPage, 5);
    t[0x57] = stable(Sre, ZeroPageX, 6);
    t[0x4F] = stable(Sre, Absolute, 6);
    t[0x5F] = stable(Sre, AbsoluteX, 7);
    t[0x5B] = stable(Sre, AbsoluteY, 7);
    t[0x43] = stable(Sre, IndirectX, 8);
    t[0x53] = stable(Sre, IndirectY, 8);
    t[0x67] = stable(Rra, ZeroPage, 5);
    t[0x77] = stable(Rra, ZeroPageX, 6);
    t[0x6F] = stable(Rra, Absolute, 6);
    t[0x7F] = stable(Rra, AbsoluteX, 7);
    t[0x7B] = stable(Rra, AbsoluteY, 7);
    t[0x63] = stable(Rra, IndirectX, 8);
    t[0x73] = stable(Rra, IndirectY, 8);

    // Unstable immediate-mode combos and the $9x store family
    t[0x0B] = unstable(Anc, Immediate, 2);
    t[0x2B] = unstable(Anc, Immediate, 2);
    t[0x4B] = unstable(Alr, Immediate, 2);
    t[0x6B] = unstable(Arr, Immediate, 2);
    t[0xCB] = unstable(Sbx, Immediate, 2);
    t[0x8B] = unstable(Ane, Immediate, 2);
    t[0xAB] = unstable(Lxa, Immediate, 2);
    t[0xBB] = {
        let mut op = unstable(Las, AbsoluteY, 4);
        op.page_penalty = true;
        op
    };
    t[0x9F] = unstable(Sha, AbsoluteY, 5);
    t[0x93] = unstable(Sha, IndirectY, 6);
    t[0x9E] = unstable(Shx, AbsoluteY, 5);
    t[0x9C] = unstable(Shy, AbsoluteX, 5);
    t[0x9B] = unstable(Tas, AbsoluteY, 5);

    t
}

/// Opcode dispatch table, indexed by opcode byte.
pub static OPCODES: [Opcode; 256] = build_table();
