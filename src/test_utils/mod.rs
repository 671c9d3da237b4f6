//! Minimal iNES (v1) image builders shared by unit tests across this crate.
//!
//! This core only ever exercises mapper 0 (NROM), so these builders don't
//! generalize past it: one PRG bank (16 or 32 KiB), an optional CHR bank
//! whose bytes are never inspected (there is no PPU to read them), and the
//! three CPU vectors (NMI/RESET/IRQ) patched into the tail of the PRG bank.

#![allow(dead_code)]

const HEADER_LEN: usize = 16;
const PRG_UNIT: usize = 16 * 1024;
const CHR_UNIT: usize = 8 * 1024;

/// Assemble a raw iNES (v1) image: header, optional 512-byte trainer, PRG
/// payload (pattern-filled, content doesn't matter at this layer), and CHR
/// payload if requested.
pub fn build_ines(
    prg_16k_units: usize,
    chr_8k_units: usize,
    flags6: u8,
    flags7: u8,
    prg_ram_8k_units: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut rom = Vec::with_capacity(
        HEADER_LEN
            + trainer.map_or(0, |_| 512)
            + prg_16k_units * PRG_UNIT
            + chr_8k_units * CHR_UNIT,
    );

    rom.extend_from_slice(b"NES\x1A");
    rom.push(prg_16k_units as u8);
    rom.push(chr_8k_units as u8);
    rom.push(flags6);
    rom.push(flags7);
    rom.push(prg_ram_8k_units);
    rom.extend_from_slice(&[0u8; 7]);

    if let Some(t) = trainer {
        rom.extend_from_slice(t);
    }
    rom.extend(std::iter::repeat(0xAA).take(prg_16k_units * PRG_UNIT));
    rom.extend(std::iter::repeat(0xCC).take(chr_8k_units * CHR_UNIT));
    rom
}

/// Build a single-16KiB-bank NROM image with `prg` placed at the bank's
/// start and the NMI/RESET/IRQ vectors patched in (defaulting all three to
/// $8000 when `vectors` is `None`). Horizontal mirroring, no trainer, no
/// battery — flags6/flags7 are always zero here since nothing under test
/// reads them back.
pub fn build_nrom_with_prg(
    prg: &[u8],
    chr_8k_units: usize,
    prg_ram_8k_units: u8,
    vectors: Option<(u16, u16, u16)>,
) -> Vec<u8> {
    assert!(prg.len() <= PRG_UNIT, "program exceeds one 16 KiB PRG bank");

    let mut rom = build_ines(1, chr_8k_units, 0, 0, prg_ram_8k_units, None);
    let prg_start = HEADER_LEN;
    let prg_end = prg_start + PRG_UNIT;
    rom[prg_start..prg_start + prg.len()].copy_from_slice(prg);

    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(&mut rom[prg_start..prg_end], reset, nmi, irq);
    rom
}

/// Same as [`build_nrom_with_prg`] but only the RESET vector can be
/// overridden; NMI and IRQ stay at $8000. Keeps call sites short for tests
/// that don't care about interrupt vectoring.
pub fn build_nrom_with_prg_reset_only(
    prg: &[u8],
    chr_8k_units: usize,
    prg_ram_8k_units: u8,
    reset: Option<u16>,
) -> Vec<u8> {
    let vectors = reset.map(|r| (r, 0x8000, 0x8000));
    build_nrom_with_prg(prg, chr_8k_units, prg_ram_8k_units, vectors)
}

/// Patch the NMI/RESET/IRQ vectors into the last 6 bytes of a 16 KiB or
/// 32 KiB PRG bank. Panics on any other length — there's no third NROM
/// bank size to support.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = match prg.len() {
        16384 => 0x3FFA,
        32768 => 0x7FFA,
        other => panic!("unsupported PRG length for vector placement: {other} bytes"),
    };
    write_le_u16(prg, base, nmi);
    write_le_u16(prg, base + 2, reset);
    write_le_u16(prg, base + 4, irq);
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = value as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom[7], 0x00);
        assert_eq!(rom[8], 1);
        assert_eq!(rom.len(), HEADER_LEN + 2 * PRG_UNIT + CHR_UNIT);
    }

    #[test]
    fn writes_vectors_for_16k_prg() {
        let mut prg = vec![0u8; 16 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x3FFA..0x4000], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
    }

    #[test]
    fn writes_vectors_for_32k_prg() {
        let mut prg = vec![0u8; 32 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x7FFA..0x8000], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
    }

    #[test]
    fn builds_nrom_with_prg_and_vectors() {
        let prg = [0xA9, 0x01, 0x00]; // LDA #$01; BRK
        let rom = build_nrom_with_prg(&prg, 1, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 1);
        assert_eq!(rom[5], 1);
        let prg_start = HEADER_LEN;
        assert_ne!(rom[prg_start + 0x3FFC], 0x00);
    }
}
