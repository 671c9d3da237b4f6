use std::env;
use std::process::ExitCode;

use rp2a03_core::{Cartridge, Cpu6502};

fn main() -> ExitCode {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "rp2a03-core".to_string());
    let Some(rom_path) = args.next() else {
        eprintln!("usage: {program} <rom.nes>");
        return ExitCode::FAILURE;
    };

    let cartridge = match Cartridge::from_ines_file(&rom_path) {
        Ok(cart) => cart,
        Err(err) => {
            eprintln!("failed to load {rom_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut cpu = Cpu6502::new();
    cpu.attach_cartridge(cartridge);
    cpu.reset();

    println!("{}", cpu.trace());
    loop {
        cpu.step();
        println!("{}", cpu.trace());
        if cpu.cycle_count() > 1_000_000 {
            break;
        }
    }

    ExitCode::SUCCESS
}
