/*!
execute.rs - instruction semantics, grouped by family.

Every function here takes the already-resolved operand (a value for
reads, an address for stores/RMW) and the bare minimum of `CpuState`/
`Bus` needed to apply it. Addressing and penalty-cycle bookkeeping are
`cpu::addressing`'s and `cpu::dispatch`'s job, not this module's.
*/

use super::state::{CARRY, CpuState, IRQ_DISABLE, NEGATIVE, OVERFLOW, ZERO};
use crate::bus::Bus;

// ---------------------------------------------------------------------
// Loads / stores / transfers
// ---------------------------------------------------------------------

pub(crate) fn lda(state: &mut CpuState, value: u8) {
    state.set_a(value);
    state.update_zn(value);
}

pub(crate) fn ldx(state: &mut CpuState, value: u8) {
    state.set_x(value);
    state.update_zn(value);
}

pub(crate) fn ldy(state: &mut CpuState, value: u8) {
    state.set_y(value);
    state.update_zn(value);
}

pub(crate) fn tax(state: &mut CpuState) {
    state.set_x(state.a());
    state.update_zn(state.x());
}

pub(crate) fn tay(state: &mut CpuState) {
    state.set_y(state.a());
    state.update_zn(state.y());
}

pub(crate) fn txa(state: &mut CpuState) {
    state.set_a(state.x());
    state.update_zn(state.a());
}

pub(crate) fn tya(state: &mut CpuState) {
    state.set_a(state.y());
    state.update_zn(state.a());
}

pub(crate) fn tsx(state: &mut CpuState) {
    state.set_x(state.sp());
    state.update_zn(state.x());
}

/// TXS does not touch the flags — SP is not a value register.
pub(crate) fn txs(state: &mut CpuState) {
    state.set_sp(state.x());
}

// ---------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------

pub(crate) fn pha(state: &mut CpuState, bus: &mut Bus) {
    bus.tick_internal();
    state.push_u8(bus, state.a());
}

pub(crate) fn php(state: &mut CpuState, bus: &mut Bus) {
    bus.tick_internal();
    let status = state.compose_status_for_push(true);
    state.push_u8(bus, status);
}

pub(crate) fn pla(state: &mut CpuState, bus: &mut Bus) {
    bus.tick_internal();
    bus.tick_internal();
    let v = state.pop_u8(bus);
    state.set_a(v);
    state.update_zn(v);
}

pub(crate) fn plp(state: &mut CpuState, bus: &mut Bus) {
    bus.tick_internal();
    bus.tick_internal();
    let popped = state.pop_u8(bus);
    // BREAK never lives in the live status register; UNUSED always reads 1.
    let status = (popped & !super::state::BREAK) | super::state::UNUSED;
    state.set_status(status);
}

// ---------------------------------------------------------------------
// Logical / bit test
// ---------------------------------------------------------------------

pub(crate) fn and(state: &mut CpuState, value: u8) {
    let result = state.a() & value;
    state.set_a(result);
    state.update_zn(result);
}

pub(crate) fn ora(state: &mut CpuState, value: u8) {
    let result = state.a() | value;
    state.set_a(result);
    state.update_zn(result);
}

pub(crate) fn eor(state: &mut CpuState, value: u8) {
    let result = state.a() ^ value;
    state.set_a(result);
    state.update_zn(result);
}

pub(crate) fn bit(state: &mut CpuState, value: u8) {
    let result = state.a() & value;
    state.assign_flag(ZERO, result == 0);
    state.assign_flag(NEGATIVE, (value & NEGATIVE) != 0);
    state.assign_flag(OVERFLOW, (value & OVERFLOW) != 0);
}

// ---------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------

/// ADC with the standard binary-mode carry/overflow formulas. The NES's
/// 2A03 ignores the decimal flag entirely, so there is no BCD path here.
pub(crate) fn adc(state: &mut CpuState, value: u8) {
    let carry_in = state.is_flag_set(CARRY) as u16;
    let a = state.a();
    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;
    state.update_carry(sum > 0xFF);
    state.update_overflow(((a ^ result) & (value ^ result) & 0x80) != 0);
    state.set_a(result);
    state.update_zn(result);
}

/// SBC is ADC with the operand's ones' complement (`value ^ 0xFF`) —
/// borrow comes in as `!carry`, which the shared `adc` path already
/// encodes since `carry_in` is read from the live CARRY flag.
pub(crate) fn sbc(state: &mut CpuState, value: u8) {
    adc(state, value ^ 0xFF);
}

pub(crate) fn cmp(state: &mut CpuState, reg: u8, value: u8) {
    state.update_carry(reg >= value);
    state.update_zn(reg.wrapping_sub(value));
}

// ---------------------------------------------------------------------
// Increment / decrement
// ---------------------------------------------------------------------

pub(crate) fn inx(state: &mut CpuState) {
    let v = state.x().wrapping_add(1);
    state.set_x(v);
    state.update_zn(v);
}

pub(crate) fn iny(state: &mut CpuState) {
    let v = state.y().wrapping_add(1);
    state.set_y(v);
    state.update_zn(v);
}

pub(crate) fn dex(state: &mut CpuState) {
    let v = state.x().wrapping_sub(1);
    state.set_x(v);
    state.update_zn(v);
}

pub(crate) fn dey(state: &mut CpuState) {
    let v = state.y().wrapping_sub(1);
    state.set_y(v);
    state.update_zn(v);
}

/// Shared read-modify-write choreography: read old, dummy-write old back,
/// write new. All four memory shifts and INC/DEC-memory go through this.
fn rmw(
    state: &mut CpuState,
    bus: &mut Bus,
    addr: u16,
    f: impl FnOnce(&mut CpuState, u8) -> u8,
) -> u8 {
    let old = bus.read(addr);
    bus.write(addr, old);
    let new = f(state, old);
    bus.write(addr, new);
    new
}

pub(crate) fn inc_mem(state: &mut CpuState, bus: &mut Bus, addr: u16) {
    let new = rmw(state, bus, addr, |_, old| old.wrapping_add(1));
    state.update_zn(new);
}

pub(crate) fn dec_mem(state: &mut CpuState, bus: &mut Bus, addr: u16) {
    let new = rmw(state, bus, addr, |_, old| old.wrapping_sub(1));
    state.update_zn(new);
}

// ---------------------------------------------------------------------
// Shifts / rotates
// ---------------------------------------------------------------------

pub(crate) fn asl_acc(state: &mut CpuState) {
    let old = state.a();
    let new = old << 1;
    state.update_carry((old & 0x80) != 0);
    state.set_a(new);
    state.update_zn(new);
}

pub(crate) fn lsr_acc(state: &mut CpuState) {
    let old = state.a();
    let new = old >> 1;
    state.update_carry((old & 0x01) != 0);
    state.set_a(new);
    state.update_zn(new);
}

pub(crate) fn rol_acc(state: &mut CpuState) {
    let old = state.a();
    let carry_in = state.is_flag_set(CARRY) as u8;
    let new = (old << 1) | carry_in;
    state.update_carry((old & 0x80) != 0);
    state.set_a(new);
    state.update_zn(new);
}

pub(crate) fn ror_acc(state: &mut CpuState) {
    let old = state.a();
    let carry_in = state.is_flag_set(CARRY) as u8;
    let new = (old >> 1) | (carry_in << 7);
    state.update_carry((old & 0x01) != 0);
    state.set_a(new);
    state.update_zn(new);
}

pub(crate) fn asl_mem(state: &mut CpuState, bus: &mut Bus, addr: u16) {
    let new = rmw(state, bus, addr, |state, old| {
        state.update_carry((old & 0x80) != 0);
        old << 1
    });
    state.update_zn(new);
}

pub(crate) fn lsr_mem(state: &mut CpuState, bus: &mut Bus, addr: u16) {
    let new = rmw(state, bus, addr, |state, old| {
        state.update_carry((old & 0x01) != 0);
        old >> 1
    });
    state.update_zn(new);
}

pub(crate) fn rol_mem(state: &mut CpuState, bus: &mut Bus, addr: u16) {
    let carry_in = state.is_flag_set(CARRY) as u8;
    let new = rmw(state, bus, addr, |state, old| {
        state.update_carry((old & 0x80) != 0);
        (old << 1) | carry_in
    });
    state.update_zn(new);
}

pub(crate) fn ror_mem(state: &mut CpuState, bus: &mut Bus, addr: u16) {
    let carry_in = state.is_flag_set(CARRY) as u8;
    let new = rmw(state, bus, addr, |state, old| {
        state.update_carry((old & 0x01) != 0);
        (old >> 1) | (carry_in << 7)
    });
    state.update_zn(new);
}

// ---------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------

pub(crate) fn clc(state: &mut CpuState) {
    state.clear_flag_bit(CARRY);
}
pub(crate) fn sec(state: &mut CpuState) {
    state.set_flag_bit(CARRY);
}
pub(crate) fn cli(state: &mut CpuState) {
    state.clear_flag_bit(IRQ_DISABLE);
}
pub(crate) fn sei(state: &mut CpuState) {
    state.set_flag_bit(IRQ_DISABLE);
}
pub(crate) fn clv(state: &mut CpuState) {
    state.clear_flag_bit(OVERFLOW);
}
pub(crate) fn cld(state: &mut CpuState) {
    state.clear_flag_bit(super::state::DECIMAL);
}
pub(crate) fn sed(state: &mut CpuState) {
    state.set_flag_bit(super::state::DECIMAL);
}

// ---------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------

/// Reads the signed 8-bit displacement and, if `taken`, applies it with
/// the hardware's two-step penalty: one dead cycle for the branch itself,
/// a second only if the new PC lands on a different page.
pub(crate) fn branch(state: &mut CpuState, bus: &mut Bus, taken: bool) {
    let offset = state.fetch_u8(bus) as i8;
    if !taken {
        return;
    }
    bus.tick_internal();
    let old_pc = state.pc();
    let new_pc = old_pc.wrapping_add(offset as u16);
    if (old_pc & 0xFF00) != (new_pc & 0xFF00) {
        bus.tick_internal();
    }
    state.set_pc(new_pc);
}

// ---------------------------------------------------------------------
// Jumps / calls / returns
// ---------------------------------------------------------------------

pub(crate) fn jsr(state: &mut CpuState, bus: &mut Bus, target: u16) {
    bus.tick_internal();
    let return_addr = state.pc().wrapping_sub(1);
    state.push_u16_le(bus, return_addr);
    state.set_pc(target);
}

pub(crate) fn rts(state: &mut CpuState, bus: &mut Bus) {
    bus.tick_internal();
    bus.tick_internal();
    let addr = state.pop_u16_le(bus);
    bus.tick_internal();
    state.set_pc(addr.wrapping_add(1));
}

pub(crate) fn rti(state: &mut CpuState, bus: &mut Bus) {
    bus.tick_internal();
    bus.tick_internal();
    let status = state.pop_u8(bus);
    let status = (status & !super::state::BREAK) | super::state::UNUSED;
    state.set_status(status);
    let addr = state.pop_u16_le(bus);
    state.set_pc(addr);
}

/// BRK: a software interrupt. Reads and discards the padding byte that
/// follows the opcode (the reason BRK is conventionally given a one-byte
/// operand in disassembly), pushes PC+2/status-with-BREAK-set, then jumps
/// through the IRQ/BRK vector with interrupts disabled.
pub(crate) fn brk(state: &mut CpuState, bus: &mut Bus) {
    state.fetch_u8(bus); // padding byte
    let pc = state.pc();
    state.push_u16_le(bus, pc);
    let status = state.compose_status_for_push(true);
    state.push_u8(bus, status);
    state.set_flag_bit(IRQ_DISABLE);
    let vector = bus.read_word(0xFFFE);
    state.set_pc(vector);
}
