/*!
cpu - the 6502/2A03 instruction-fetch/decode/execute engine.

Layout:
    cycles.rs     - monotonic tick accountant.
    state.rs      - register file and status flags.
    addressing.rs - the addressing-mode evaluators.
    execute.rs    - instruction semantics, grouped by family.
    table.rs      - the 256-entry opcode decode table.
    dispatch.rs   - `step()`'s orchestration of the above, plus interrupts.

`Cpu6502` is the only public type this module exports. It owns both its
architectural state and the bus it runs against, so callers never thread
a bus reference through the public API — internally, the submodules
above still pass `&mut Bus` around explicitly, matching how the rest of
this codebase writes bus-driven code.
*/

mod addressing;
pub(crate) mod cycles;
mod dispatch;
mod execute;
mod state;
mod table;

use std::fmt;

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use state::CpuState;

/// A snapshot of architectural state taken immediately before an
/// instruction executes, formatted to match the conventional
/// `nestest`-style trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub sp: u8,
    pub cycles: u64,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, self.a, self.x, self.y, self.p, self.sp, self.cycles
        )
    }
}

/// The CPU core: owns its register file and the bus it executes against.
pub struct Cpu6502 {
    state: CpuState,
    bus: Bus,
    illegal_opcode_count: u64,
}

impl Cpu6502 {
    pub fn new() -> Self {
        Self {
            state: CpuState::new(),
            bus: Bus::new(),
            illegal_opcode_count: 0,
        }
    }

    pub fn attach_cartridge(&mut self, cartridge: Cartridge) {
        self.bus.attach_cartridge(cartridge);
    }

    /// Hardware reset: RAM contents are left alone (real hardware's are
    /// undefined, not zeroed) beyond what `Bus::reset` already clears;
    /// the register file goes to its documented power-up state and PC is
    /// loaded from the reset vector.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.state = CpuState::new();
        self.state.load_reset_vector(&mut self.bus);
    }

    /// Execute exactly one instruction (or one pending interrupt-service
    /// sequence, or one DMA stall tick) and return the ticks it consumed.
    pub fn step(&mut self) -> u64 {
        let irq_taken = self.bus.irq_line && !self.state.is_flag_set(state::IRQ_DISABLE);
        let about_to_fetch = self.bus.stall_cycles() == 0 && !self.bus.nmi_pending && !irq_taken;
        let was_illegal = about_to_fetch
            && table::decode(self.bus.peek(self.state.pc())).op == table::Op::Illegal;

        let ticks = dispatch::step(&mut self.state, &mut self.bus);
        if was_illegal {
            self.illegal_opcode_count += 1;
        }
        ticks
    }

    /// Run instructions (and any pending interrupt/stall handling) until
    /// the cycle accountant reaches or exceeds `target_cycles`. A step that
    /// straddles the target still runs to completion, so the final count
    /// may overshoot it slightly — this core has no notion of stopping
    /// mid-instruction.
    pub fn run_until(&mut self, target_cycles: u64) {
        while self.cycle_count() < target_cycles {
            self.step();
        }
    }

    pub fn trigger_nmi(&mut self) {
        self.bus.nmi_pending = true;
    }

    pub fn set_irq(&mut self, level: bool) {
        self.bus.irq_line = level;
    }

    /// Non-ticking inspection read, for harnesses and debuggers.
    pub fn read(&self, addr: u16) -> u8 {
        self.bus.peek(addr)
    }

    /// Non-ticking inspection write, for harness/test setup.
    pub fn write(&mut self, addr: u16, data: u8) {
        self.bus.poke(addr, data);
    }

    pub fn illegal_opcode_count(&self) -> u64 {
        self.illegal_opcode_count
    }

    pub fn cycle_count(&self) -> u64 {
        self.bus.cycle_count()
    }

    /// Snapshot of architectural state, captured before the next
    /// instruction executes.
    pub fn trace(&self) -> TraceRecord {
        TraceRecord {
            pc: self.state.pc(),
            a: self.state.a(),
            x: self.state.x(),
            y: self.state.y(),
            p: self.state.status(),
            sp: self.state.sp(),
            cycles: self.bus.cycle_count(),
        }
    }
}

impl Default for Cpu6502 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{build_nrom_with_prg, build_nrom_with_prg_reset_only};

    fn cpu_with_prg(prg: &[u8]) -> Cpu6502 {
        let rom = build_nrom_with_prg_reset_only(prg, 1, 1, Some(0x8000));
        let cart = Cartridge::from_ines_bytes(&rom).unwrap();
        let mut cpu = Cpu6502::new();
        cpu.attach_cartridge(cart);
        cpu.reset();
        cpu
    }

    fn cpu_with_nmi_vector(prg: &[u8], nmi_target: u16) -> Cpu6502 {
        let rom = build_nrom_with_prg(prg, 1, 1, Some((0x8000, nmi_target, 0x8000)));
        let cart = Cartridge::from_ines_bytes(&rom).unwrap();
        let mut cpu = Cpu6502::new();
        cpu.attach_cartridge(cart);
        cpu.reset();
        cpu
    }

    #[test]
    fn reset_loads_vector_and_documented_power_up_state() {
        let cpu = cpu_with_prg(&[0xEA]);
        assert_eq!(cpu.trace().pc, 0x8000);
        assert_eq!(cpu.trace().sp, 0xFD);
    }

    #[test]
    fn step_lda_immediate() {
        let mut cpu = cpu_with_prg(&[0xA9, 0x05]);
        let ticks = cpu.step();
        assert_eq!(ticks, 2);
        assert_eq!(cpu.trace().a, 0x05);
    }

    #[test]
    fn illegal_opcode_counter_increments_without_panicking() {
        let mut cpu = cpu_with_prg(&[0x02]);
        cpu.step();
        assert_eq!(cpu.illegal_opcode_count(), 1);
    }

    #[test]
    fn trace_format_matches_nestest_style() {
        let cpu = cpu_with_prg(&[0xEA]);
        let line = cpu.trace().to_string();
        assert!(line.starts_with("PC:8000 A:00 X:00 Y:00 P:"));
        assert!(line.contains("SP:FD"));
        assert!(line.contains("CYC:0"));
    }

    #[test]
    fn run_until_stops_at_or_past_the_target() {
        let mut cpu = cpu_with_prg(&[0xEA, 0xEA, 0xEA, 0xEA]);
        cpu.run_until(5);
        assert!(cpu.cycle_count() >= 5);
    }

    #[test]
    fn nmi_then_step_services_the_interrupt() {
        let mut cpu = cpu_with_nmi_vector(&[0xEA], 0x9000);
        cpu.trigger_nmi();
        let ticks = cpu.step();
        assert_eq!(ticks, 7);
        assert_eq!(cpu.trace().pc, 0x9000);
    }
}
