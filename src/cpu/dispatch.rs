/*!
dispatch.rs - orchestrates a single CPU step: stall consumption, interrupt
polling, opcode fetch, table lookup, and addressing/execute dispatch.

This is the one place that knows how an `OpEntry`'s `AddrMode` and
`Penalty` combine into an actual sequence of bus accesses — `addressing`
and `execute` stay ignorant of each other's instruction-category
concerns (load vs. store vs. RMW), which is resolved here instead.
*/

use super::addressing::{self, uncorrected};
use super::execute;
use super::state::CpuState;
use super::table::{self, AddrMode, Op, OpEntry, Penalty};
use crate::bus::Bus;

/// Vector addresses for the three hardware-pushed interrupt kinds.
const NMI_VECTOR: u16 = 0xFFFA;
const IRQ_VECTOR: u16 = 0xFFFE;

/// Run one instruction (or one interrupt-service sequence, or one stall
/// cycle) and return the number of ticks it consumed.
pub(crate) fn step(state: &mut CpuState, bus: &mut Bus) -> u64 {
    if bus.consume_stall_cycle() {
        return 1;
    }

    let before = bus.cycle_count();

    if bus.nmi_pending {
        bus.nmi_pending = false;
        service_interrupt(state, bus, NMI_VECTOR);
        return bus.cycle_count() - before;
    }
    if bus.irq_line && !state.is_flag_set(super::state::IRQ_DISABLE) {
        service_interrupt(state, bus, IRQ_VECTOR);
        return bus.cycle_count() - before;
    }

    let pc_at_fetch = state.pc();
    let opcode = state.fetch_u8(bus);
    let entry = table::decode(opcode);
    dispatch_one(state, bus, entry, opcode, pc_at_fetch);

    bus.cycle_count() - before
}

/// Hardware interrupt sequence shared by reset-adjacent NMI/IRQ servicing
/// (never BRK: the live status pushed here always has B clear).
fn service_interrupt(state: &mut CpuState, bus: &mut Bus, vector: u16) {
    bus.tick_internal();
    bus.tick_internal();
    let pc = state.pc();
    state.push_u16_le(bus, pc);
    let status = state.compose_status_for_push(false);
    state.push_u8(bus, status);
    state.set_flag_bit(super::state::IRQ_DISABLE);
    let target = bus.read_word(vector);
    state.set_pc(target);
}

fn dispatch_one(state: &mut CpuState, bus: &mut Bus, entry: OpEntry, opcode: u8, pc: u16) {
    use Op::*;

    match entry.op {
        // Branches and the handful of truly implicit/immediate/accumulator
        // ops are handled directly; everything else goes through the
        // addressing resolvers for its declared mode.
        Bpl => execute::branch(state, bus, !state.is_flag_set(super::state::NEGATIVE)),
        Bmi => execute::branch(state, bus, state.is_flag_set(super::state::NEGATIVE)),
        Bvc => execute::branch(state, bus, !state.is_flag_set(super::state::OVERFLOW)),
        Bvs => execute::branch(state, bus, state.is_flag_set(super::state::OVERFLOW)),
        Bcc => execute::branch(state, bus, !state.is_flag_set(super::state::CARRY)),
        Bcs => execute::branch(state, bus, state.is_flag_set(super::state::CARRY)),
        Bne => execute::branch(state, bus, !state.is_flag_set(super::state::ZERO)),
        Beq => execute::branch(state, bus, state.is_flag_set(super::state::ZERO)),

        Clc => execute::clc(state),
        Sec => execute::sec(state),
        Cli => execute::cli(state),
        Sei => execute::sei(state),
        Clv => execute::clv(state),
        Cld => execute::cld(state),
        Sed => execute::sed(state),

        Tax => execute::tax(state),
        Tay => execute::tay(state),
        Txa => execute::txa(state),
        Tya => execute::tya(state),
        Tsx => execute::tsx(state),
        Txs => execute::txs(state),

        Inx => execute::inx(state),
        Iny => execute::iny(state),
        Dex => execute::dex(state),
        Dey => execute::dey(state),

        Pha => execute::pha(state, bus),
        Php => execute::php(state, bus),
        Pla => execute::pla(state, bus),
        Plp => execute::plp(state, bus),

        // NOP and undocumented opcodes both resolve to "fetch, then burn
        // one more cycle with no bus reference" — the 6502's cheapest
        // possible instruction shape.
        Nop => bus.tick_internal(),
        Illegal => {
            bus.tick_internal();
            illegal_opcode(opcode, pc);
        }

        Jsr => {
            let target = addressing::addr_abs(state, bus);
            execute::jsr(state, bus, target);
        }
        Rts => execute::rts(state, bus),
        Rti => execute::rti(state, bus),
        Brk => execute::brk(state, bus),

        Jmp => {
            let target = match entry.mode {
                AddrMode::Absolute => addressing::addr_abs(state, bus),
                AddrMode::Indirect => addressing::addr_indirect(state, bus),
                _ => unreachable!("JMP only decodes to Absolute or Indirect"),
            };
            state.set_pc(target);
        }

        Asl if entry.mode == AddrMode::Accumulator => execute::asl_acc(state),
        Lsr if entry.mode == AddrMode::Accumulator => execute::lsr_acc(state),
        Rol if entry.mode == AddrMode::Accumulator => execute::rol_acc(state),
        Ror if entry.mode == AddrMode::Accumulator => execute::ror_acc(state),

        op => dispatch_operand(state, bus, op, entry),
    }
}

/// Ops that read or write through a resolved effective address (loads,
/// stores, logical/arithmetic, memory RMW).
fn dispatch_operand(state: &mut CpuState, bus: &mut Bus, op: Op, entry: OpEntry) {
    use Op::*;

    if entry.mode == AddrMode::Immediate {
        let value = state.fetch_u8(bus);
        apply_read(state, op, value);
        return;
    }

    let (addr, crossed) = resolve_address(state, bus, entry.mode);
    maybe_penalize(bus, entry.penalty, addr, crossed);

    match op {
        Sta => bus.write(addr, state.a()),
        Stx => bus.write(addr, state.x()),
        Sty => bus.write(addr, state.y()),
        Asl => execute::asl_mem(state, bus, addr),
        Lsr => execute::lsr_mem(state, bus, addr),
        Rol => execute::rol_mem(state, bus, addr),
        Ror => execute::ror_mem(state, bus, addr),
        Inc => execute::inc_mem(state, bus, addr),
        Dec => execute::dec_mem(state, bus, addr),
        Cmp => {
            let v = bus.read(addr);
            execute::cmp(state, state.a(), v);
        }
        Cpx => {
            let v = bus.read(addr);
            execute::cmp(state, state.x(), v);
        }
        Cpy => {
            let v = bus.read(addr);
            execute::cmp(state, state.y(), v);
        }
        _ => {
            let v = bus.read(addr);
            apply_read(state, op, v);
        }
    }
}

fn apply_read(state: &mut CpuState, op: Op, value: u8) {
    use Op::*;
    match op {
        Lda => execute::lda(state, value),
        Ldx => execute::ldx(state, value),
        Ldy => execute::ldy(state, value),
        And => execute::and(state, value),
        Ora => execute::ora(state, value),
        Eor => execute::eor(state, value),
        Bit => execute::bit(state, value),
        Adc => execute::adc(state, value),
        Sbc => execute::sbc(state, value),
        Cmp => execute::cmp(state, state.a(), value),
        Cpx => execute::cmp(state, state.x(), value),
        Cpy => execute::cmp(state, state.y(), value),
        other => unreachable!("{other:?} is not a read-operand instruction"),
    }
}

fn resolve_address(state: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> (u16, bool) {
    match mode {
        AddrMode::ZeroPage => (addressing::addr_zp(state, bus), false),
        AddrMode::ZeroPageX => (addressing::addr_zp_x(state, bus), false),
        AddrMode::ZeroPageY => (addressing::addr_zp_y(state, bus), false),
        AddrMode::Absolute => (addressing::addr_abs(state, bus), false),
        AddrMode::AbsoluteX => addressing::addr_abs_x(state, bus),
        AddrMode::AbsoluteY => addressing::addr_abs_y(state, bus),
        AddrMode::IndirectX => (addressing::addr_ind_x(state, bus), false),
        AddrMode::IndirectY => addressing::addr_ind_y(state, bus),
        other => unreachable!("{other:?} does not resolve to a memory address"),
    }
}

/// Applies the conditional or unconditional dummy read that indexed
/// absolute/indirect-indexed modes incur, at the pre-carry address the
/// hardware actually probes.
fn maybe_penalize(bus: &mut Bus, penalty: Penalty, addr: u16, crossed: bool) {
    match penalty {
        Penalty::None => {}
        Penalty::IfCrossed => {
            if crossed {
                bus.read(uncorrected(addr, crossed));
            }
        }
        Penalty::Always => {
            bus.read(uncorrected(addr, crossed));
        }
    }
}

fn illegal_opcode(opcode: u8, pc: u16) {
    #[cfg(feature = "strict")]
    panic!("illegal opcode ${opcode:02X} at PC:{pc:04X}");
    #[cfg(not(feature = "strict"))]
    {
        let _ = (opcode, pc);
        // Behaves as a 2-tick NOP; the caller (Cpu6502::step) is
        // responsible for incrementing the diagnostic counter since it
        // owns that field, not CpuState.
    }
}
