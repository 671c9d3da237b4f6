/*!
addressing.rs - the twelve 6502 addressing-mode evaluators.

Each function here resolves an effective address (or, for Immediate,
reads the operand directly) and ticks the bus exactly as many times as
the modes's fixed addressing cost requires. They do NOT apply the
conditional page-cross penalty for indexed-absolute/indirect-indexed
modes — that extra access depends on whether the instruction is a load,
a store, or a read-modify-write, so `cpu::dispatch` decides whether and
when to perform it (see `dispatch::maybe_penalize`).

Implicit, Accumulator, Immediate, and Relative modes have no address to
resolve and are handled directly at the call site instead of through
this module.
*/

use super::state::CpuState;
use crate::bus::Bus;

#[inline]
pub(crate) fn addr_zp(state: &mut CpuState, bus: &mut Bus) -> u16 {
    state.fetch_u8(bus) as u16
}

/// Zero Page,X: base is fetched, then a dummy read at the unindexed base
/// happens before the index is applied (wrapping within the page).
#[inline]
pub(crate) fn addr_zp_x(state: &mut CpuState, bus: &mut Bus) -> u16 {
    let base = state.fetch_u8(bus);
    bus.read(base as u16);
    base.wrapping_add(state.x()) as u16
}

#[inline]
pub(crate) fn addr_zp_y(state: &mut CpuState, bus: &mut Bus) -> u16 {
    let base = state.fetch_u8(bus);
    bus.read(base as u16);
    base.wrapping_add(state.y()) as u16
}

#[inline]
pub(crate) fn addr_abs(state: &mut CpuState, bus: &mut Bus) -> u16 {
    state.fetch_u16(bus)
}

/// Absolute,X / Absolute,Y: returns the corrected effective address plus
/// whether the index crossed a page boundary. The caller is responsible
/// for the conditional extra bus access this implies.
#[inline]
pub(crate) fn addr_abs_x(state: &mut CpuState, bus: &mut Bus) -> (u16, bool) {
    let base = state.fetch_u16(bus);
    let addr = base.wrapping_add(state.x() as u16);
    (addr, page_crossed(base, addr))
}

#[inline]
pub(crate) fn addr_abs_y(state: &mut CpuState, bus: &mut Bus) -> (u16, bool) {
    let base = state.fetch_u16(bus);
    let addr = base.wrapping_add(state.y() as u16);
    (addr, page_crossed(base, addr))
}

/// JMP (indirect): reads a 16-bit pointer, then the target address from
/// it. Reproduces the hardware page-wrap bug — when the pointer's low
/// byte is 0xFF, the high byte is fetched from the start of the *same*
/// page rather than the next one.
pub(crate) fn addr_indirect(state: &mut CpuState, bus: &mut Bus) -> u16 {
    let ptr = state.fetch_u16(bus);
    let lo = bus.read(ptr) as u16;
    let hi_addr = (ptr & 0xFF00) | ((ptr.wrapping_add(1)) & 0x00FF);
    let hi = bus.read(hi_addr) as u16;
    (hi << 8) | lo
}

/// (Indirect,X): zero-page pointer is indexed by X (wrapping) before the
/// two-byte target address is read, also from the zero page.
pub(crate) fn addr_ind_x(state: &mut CpuState, bus: &mut Bus) -> u16 {
    let base = state.fetch_u8(bus);
    bus.read(base as u16);
    let ptr = base.wrapping_add(state.x());
    read_word_zp(bus, ptr)
}

/// (Indirect),Y: a zero-page pointer is read, then Y is added to the
/// resulting 16-bit base. Returns the corrected address plus whether the
/// addition crossed a page.
pub(crate) fn addr_ind_y(state: &mut CpuState, bus: &mut Bus) -> (u16, bool) {
    let zp = state.fetch_u8(bus);
    let base = read_word_zp(bus, zp);
    let addr = base.wrapping_add(state.y() as u16);
    (addr, page_crossed(base, addr))
}

/// Zero-page word read with the 6502's zero-page wraparound (the high
/// byte comes from `(base+1) & 0xFF`, never spilling into page 1).
#[inline]
pub(crate) fn read_word_zp(bus: &mut Bus, base: u8) -> u16 {
    let lo = bus.read(base as u16) as u16;
    let hi = bus.read(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

#[inline]
fn page_crossed(base: u16, addr: u16) -> bool {
    (base & 0xFF00) != (addr & 0xFF00)
}

/// The uncorrected address an indexed-absolute/indirect-indexed mode
/// would have produced had the low-byte add not carried — this is the
/// address hardware actually probes for the conditional dummy read.
#[inline]
pub(crate) fn uncorrected(addr: u16, crossed: bool) -> u16 {
    if crossed {
        addr.wrapping_sub(0x100)
    } else {
        addr
    }
}
