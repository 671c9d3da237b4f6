/*!
table.rs - the 256-entry opcode decode table.

Each entry names an addressing mode, a mnemonic, and whether an
absolute-indexed/indirect-indexed access's extra bus cycle is
conditional on a page cross (loads) or unconditional (stores and
read-modify-write). Cycle counts are never stored here — they fall out
of the actual bus accesses `cpu::addressing` and `cpu::execute` perform
for the resolved mode, so there is exactly one source of timing truth
instead of a table of "base cycles" that could drift from the code that
implements them.

Undocumented opcodes are out of scope: every slot `build_table` doesn't
explicitly assign decodes to `Op::Illegal`.
*/

use std::sync::OnceLock;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum AddrMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Penalty {
    /// No conditional extra access (mode isn't indexed, or has none).
    None,
    /// Indexed read: one extra tick only if the index crossed a page.
    IfCrossed,
    /// Indexed store/RMW: the extra tick always happens.
    Always,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[allow(non_camel_case_types)]
pub(crate) enum Op {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    Illegal,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct OpEntry {
    pub op: Op,
    pub mode: AddrMode,
    pub penalty: Penalty,
}

impl OpEntry {
    const fn new(op: Op, mode: AddrMode, penalty: Penalty) -> Self {
        Self { op, mode, penalty }
    }
    const fn illegal() -> Self {
        Self::new(Op::Illegal, AddrMode::Implicit, Penalty::None)
    }
}

const fn build_table() -> [OpEntry; 256] {
    use AddrMode::*;
    use Op::*;
    use Penalty::{Always, IfCrossed, None as NoPenalty};

    let mut t = [OpEntry::illegal(); 256];

    t[0x00] = OpEntry::new(Brk, Implicit, NoPenalty);
    t[0x01] = OpEntry::new(Ora, IndirectX, NoPenalty);
    t[0x05] = OpEntry::new(Ora, ZeroPage, NoPenalty);
    t[0x06] = OpEntry::new(Asl, ZeroPage, NoPenalty);
    t[0x08] = OpEntry::new(Php, Implicit, NoPenalty);
    t[0x09] = OpEntry::new(Ora, Immediate, NoPenalty);
    t[0x0A] = OpEntry::new(Asl, Accumulator, NoPenalty);
    t[0x0D] = OpEntry::new(Ora, Absolute, NoPenalty);
    t[0x0E] = OpEntry::new(Asl, Absolute, NoPenalty);

    t[0x10] = OpEntry::new(Bpl, Relative, NoPenalty);
    t[0x11] = OpEntry::new(Ora, IndirectY, IfCrossed);
    t[0x15] = OpEntry::new(Ora, ZeroPageX, NoPenalty);
    t[0x16] = OpEntry::new(Asl, ZeroPageX, NoPenalty);
    t[0x18] = OpEntry::new(Clc, Implicit, NoPenalty);
    t[0x19] = OpEntry::new(Ora, AbsoluteY, IfCrossed);
    t[0x1D] = OpEntry::new(Ora, AbsoluteX, IfCrossed);
    t[0x1E] = OpEntry::new(Asl, AbsoluteX, Always);

    t[0x20] = OpEntry::new(Jsr, Absolute, NoPenalty);
    t[0x21] = OpEntry::new(And, IndirectX, NoPenalty);
    t[0x24] = OpEntry::new(Bit, ZeroPage, NoPenalty);
    t[0x25] = OpEntry::new(And, ZeroPage, NoPenalty);
    t[0x26] = OpEntry::new(Rol, ZeroPage, NoPenalty);
    t[0x28] = OpEntry::new(Plp, Implicit, NoPenalty);
    t[0x29] = OpEntry::new(And, Immediate, NoPenalty);
    t[0x2A] = OpEntry::new(Rol, Accumulator, NoPenalty);
    t[0x2C] = OpEntry::new(Bit, Absolute, NoPenalty);
    t[0x2D] = OpEntry::new(And, Absolute, NoPenalty);
    t[0x2E] = OpEntry::new(Rol, Absolute, NoPenalty);

    t[0x30] = OpEntry::new(Bmi, Relative, NoPenalty);
    t[0x31] = OpEntry::new(And, IndirectY, IfCrossed);
    t[0x35] = OpEntry::new(And, ZeroPageX, NoPenalty);
    t[0x36] = OpEntry::new(Rol, ZeroPageX, NoPenalty);
    t[0x38] = OpEntry::new(Sec, Implicit, NoPenalty);
    t[0x39] = OpEntry::new(And, AbsoluteY, IfCrossed);
    t[0x3D] = OpEntry::new(And, AbsoluteX, IfCrossed);
    t[0x3E] = OpEntry::new(Rol, AbsoluteX, Always);

    t[0x40] = OpEntry::new(Rti, Implicit, NoPenalty);
    t[0x41] = OpEntry::new(Eor, IndirectX, NoPenalty);
    t[0x45] = OpEntry::new(Eor, ZeroPage, NoPenalty);
    t[0x46] = OpEntry::new(Lsr, ZeroPage, NoPenalty);
    t[0x48] = OpEntry::new(Pha, Implicit, NoPenalty);
    t[0x49] = OpEntry::new(Eor, Immediate, NoPenalty);
    t[0x4A] = OpEntry::new(Lsr, Accumulator, NoPenalty);
    t[0x4C] = OpEntry::new(Jmp, Absolute, NoPenalty);
    t[0x4D] = OpEntry::new(Eor, Absolute, NoPenalty);
    t[0x4E] = OpEntry::new(Lsr, Absolute, NoPenalty);

    t[0x50] = OpEntry::new(Bvc, Relative, NoPenalty);
    t[0x51] = OpEntry::new(Eor, IndirectY, IfCrossed);
    t[0x55] = OpEntry::new(Eor, ZeroPageX, NoPenalty);
    t[0x56] = OpEntry::new(Lsr, ZeroPageX, NoPenalty);
    t[0x58] = OpEntry::new(Cli, Implicit, NoPenalty);
    t[0x59] = OpEntry::new(Eor, AbsoluteY, IfCrossed);
    t[0x5D] = OpEntry::new(Eor, AbsoluteX, IfCrossed);
    t[0x5E] = OpEntry::new(Lsr, AbsoluteX, Always);

    t[0x60] = OpEntry::new(Rts, Implicit, NoPenalty);
    t[0x61] = OpEntry::new(Adc, IndirectX, NoPenalty);
    t[0x65] = OpEntry::new(Adc, ZeroPage, NoPenalty);
    t[0x66] = OpEntry::new(Ror, ZeroPage, NoPenalty);
    t[0x68] = OpEntry::new(Pla, Implicit, NoPenalty);
    t[0x69] = OpEntry::new(Adc, Immediate, NoPenalty);
    t[0x6A] = OpEntry::new(Ror, Accumulator, NoPenalty);
    t[0x6C] = OpEntry::new(Jmp, Indirect, NoPenalty);
    t[0x6D] = OpEntry::new(Adc, Absolute, NoPenalty);
    // 0x6E is ROR absolute, not absolute,X — that's 0x7E.
    t[0x6E] = OpEntry::new(Ror, Absolute, NoPenalty);

    t[0x70] = OpEntry::new(Bvs, Relative, NoPenalty);
    t[0x71] = OpEntry::new(Adc, IndirectY, IfCrossed);
    t[0x75] = OpEntry::new(Adc, ZeroPageX, NoPenalty);
    t[0x76] = OpEntry::new(Ror, ZeroPageX, NoPenalty);
    t[0x78] = OpEntry::new(Sei, Implicit, NoPenalty);
    t[0x79] = OpEntry::new(Adc, AbsoluteY, IfCrossed);
    t[0x7D] = OpEntry::new(Adc, AbsoluteX, IfCrossed);
    t[0x7E] = OpEntry::new(Ror, AbsoluteX, Always);

    t[0x81] = OpEntry::new(Sta, IndirectX, NoPenalty);
    t[0x84] = OpEntry::new(Sty, ZeroPage, NoPenalty);
    t[0x85] = OpEntry::new(Sta, ZeroPage, NoPenalty);
    t[0x86] = OpEntry::new(Stx, ZeroPage, NoPenalty);
    t[0x88] = OpEntry::new(Dey, Implicit, NoPenalty);
    t[0x8A] = OpEntry::new(Txa, Implicit, NoPenalty);
    t[0x8C] = OpEntry::new(Sty, Absolute, NoPenalty);
    t[0x8D] = OpEntry::new(Sta, Absolute, NoPenalty);
    t[0x8E] = OpEntry::new(Stx, Absolute, NoPenalty);

    t[0x90] = OpEntry::new(Bcc, Relative, NoPenalty);
    t[0x91] = OpEntry::new(Sta, IndirectY, Always);
    t[0x94] = OpEntry::new(Sty, ZeroPageX, NoPenalty);
    t[0x95] = OpEntry::new(Sta, ZeroPageX, NoPenalty);
    t[0x96] = OpEntry::new(Stx, ZeroPageY, NoPenalty);
    t[0x98] = OpEntry::new(Tya, Implicit, NoPenalty);
    t[0x99] = OpEntry::new(Sta, AbsoluteY, Always);
    t[0x9A] = OpEntry::new(Txs, Implicit, NoPenalty);
    t[0x9D] = OpEntry::new(Sta, AbsoluteX, Always);

    t[0xA0] = OpEntry::new(Ldy, Immediate, NoPenalty);
    t[0xA1] = OpEntry::new(Lda, IndirectX, NoPenalty);
    t[0xA2] = OpEntry::new(Ldx, Immediate, NoPenalty);
    t[0xA4] = OpEntry::new(Ldy, ZeroPage, NoPenalty);
    t[0xA5] = OpEntry::new(Lda, ZeroPage, NoPenalty);
    t[0xA6] = OpEntry::new(Ldx, ZeroPage, NoPenalty);
    t[0xA8] = OpEntry::new(Tay, Implicit, NoPenalty);
    t[0xA9] = OpEntry::new(Lda, Immediate, NoPenalty);
    t[0xAA] = OpEntry::new(Tax, Implicit, NoPenalty);
    t[0xAC] = OpEntry::new(Ldy, Absolute, NoPenalty);
    t[0xAD] = OpEntry::new(Lda, Absolute, NoPenalty);
    t[0xAE] = OpEntry::new(Ldx, Absolute, NoPenalty);

    t[0xB0] = OpEntry::new(Bcs, Relative, NoPenalty);
    t[0xB1] = OpEntry::new(Lda, IndirectY, IfCrossed);
    t[0xB4] = OpEntry::new(Ldy, ZeroPageX, NoPenalty);
    t[0xB5] = OpEntry::new(Lda, ZeroPageX, NoPenalty);
    t[0xB6] = OpEntry::new(Ldx, ZeroPageY, NoPenalty);
    t[0xB8] = OpEntry::new(Clv, Implicit, NoPenalty);
    t[0xB9] = OpEntry::new(Lda, AbsoluteY, IfCrossed);
    t[0xBA] = OpEntry::new(Tsx, Implicit, NoPenalty);
    t[0xBC] = OpEntry::new(Ldy, AbsoluteX, IfCrossed);
    t[0xBD] = OpEntry::new(Lda, AbsoluteX, IfCrossed);
    t[0xBE] = OpEntry::new(Ldx, AbsoluteY, IfCrossed);

    t[0xC0] = OpEntry::new(Cpy, Immediate, NoPenalty);
    t[0xC1] = OpEntry::new(Cmp, IndirectX, NoPenalty);
    t[0xC4] = OpEntry::new(Cpy, ZeroPage, NoPenalty);
    t[0xC5] = OpEntry::new(Cmp, ZeroPage, NoPenalty);
    t[0xC6] = OpEntry::new(Dec, ZeroPage, NoPenalty);
    t[0xC8] = OpEntry::new(Iny, Implicit, NoPenalty);
    t[0xC9] = OpEntry::new(Cmp, Immediate, NoPenalty);
    t[0xCA] = OpEntry::new(Dex, Implicit, NoPenalty);
    t[0xCC] = OpEntry::new(Cpy, Absolute, NoPenalty);
    t[0xCD] = OpEntry::new(Cmp, Absolute, NoPenalty);
    t[0xCE] = OpEntry::new(Dec, Absolute, NoPenalty);

    t[0xD0] = OpEntry::new(Bne, Relative, NoPenalty);
    t[0xD1] = OpEntry::new(Cmp, IndirectY, IfCrossed);
    t[0xD5] = OpEntry::new(Cmp, ZeroPageX, NoPenalty);
    t[0xD6] = OpEntry::new(Dec, ZeroPageX, NoPenalty);
    t[0xD8] = OpEntry::new(Cld, Implicit, NoPenalty);
    t[0xD9] = OpEntry::new(Cmp, AbsoluteY, IfCrossed);
    t[0xDD] = OpEntry::new(Cmp, AbsoluteX, IfCrossed);
    t[0xDE] = OpEntry::new(Dec, AbsoluteX, Always);

    t[0xE0] = OpEntry::new(Cpx, Immediate, NoPenalty);
    t[0xE1] = OpEntry::new(Sbc, IndirectX, NoPenalty);
    t[0xE4] = OpEntry::new(Cpx, ZeroPage, NoPenalty);
    t[0xE5] = OpEntry::new(Sbc, ZeroPage, NoPenalty);
    t[0xE6] = OpEntry::new(Inc, ZeroPage, NoPenalty);
    t[0xE8] = OpEntry::new(Inx, Implicit, NoPenalty);
    t[0xE9] = OpEntry::new(Sbc, Immediate, NoPenalty);
    t[0xEA] = OpEntry::new(Nop, Implicit, NoPenalty);
    t[0xEC] = OpEntry::new(Cpx, Absolute, NoPenalty);
    t[0xED] = OpEntry::new(Sbc, Absolute, NoPenalty);
    t[0xEE] = OpEntry::new(Inc, Absolute, NoPenalty);

    t[0xF0] = OpEntry::new(Beq, Relative, NoPenalty);
    t[0xF1] = OpEntry::new(Sbc, IndirectY, IfCrossed);
    t[0xF5] = OpEntry::new(Sbc, ZeroPageX, NoPenalty);
    t[0xF6] = OpEntry::new(Inc, ZeroPageX, NoPenalty);
    t[0xF8] = OpEntry::new(Sed, Implicit, NoPenalty);
    t[0xF9] = OpEntry::new(Sbc, AbsoluteY, IfCrossed);
    t[0xFD] = OpEntry::new(Sbc, AbsoluteX, IfCrossed);
    t[0xFE] = OpEntry::new(Inc, AbsoluteX, Always);

    t
}

#[cfg(feature = "table_dispatch")]
static DISPATCH_TABLE: [OpEntry; 256] = build_table();

#[cfg(not(feature = "table_dispatch"))]
static LAZY_TABLE: OnceLock<[OpEntry; 256]> = OnceLock::new();

/// Look up the decode entry for `opcode`. With the default `table_dispatch`
/// feature the table is const-evaluated at compile time; disabling the
/// feature rebuilds it lazily behind a `OnceLock`, which exists purely so a
/// disassembler or illegal-opcode research tool can substitute a patched
/// table before first use.
#[inline]
pub(crate) fn decode(opcode: u8) -> OpEntry {
    #[cfg(feature = "table_dispatch")]
    {
        DISPATCH_TABLE[opcode as usize]
    }
    #[cfg(not(feature = "table_dispatch"))]
    {
        LAZY_TABLE.get_or_init(build_table)[opcode as usize]
    }
}
