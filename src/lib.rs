#![doc = r#"
Cycle-accurate MOS 6502 / Ricoh 2A03 CPU core.

Modules:
- bus: address decoding across RAM, stubbed PPU/APU register windows, and
  cartridge space.
- cartridge: iNES v1 loader producing a `Cartridge` backed by a `Mapper`.
- mapper: the `Mapper` trait and the NROM (mapper 0) implementation.
- cpu: the register file, addressing modes, instruction semantics, decode
  table, and `step()` dispatcher — `Cpu6502` is the public entry point.

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod mapper;

pub use bus::Bus;
pub use cartridge::Cartridge;
pub use cpu::Cpu6502;

#[cfg(test)]
pub mod test_utils;
