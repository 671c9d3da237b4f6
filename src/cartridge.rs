/*!
Cartridge with an iNES (v1) loader and NROM (mapper 0) integration.

Only mapper 0 (NROM) is supported; bank-switching mappers are out of
scope for this core. CHR data is parsed only far enough to validate the
file and locate the end of the image; this core has no PPU to consume
it, so CHR bytes are never copied or stored.

NROM mapping rules:
- 16 KiB PRG (NROM-128): $8000-$BFFF maps to the single 16 KiB bank;
  $C000-$FFFF mirrors it.
- 32 KiB PRG (NROM-256): $8000-$FFFF maps directly to 32 KiB.
*/

use std::fmt;
use std::fs;
use std::path::Path;

use crate::mapper::{Mapper, Nrom};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    TooSmall,
    BadMagic,
    UnsupportedFormat(&'static str),
    TruncatedTrainer,
    TruncatedPrgRom,
    TruncatedChr,
    SizeOverflow(&'static str),
    UnsupportedMapper(u16),
    Io(String),
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall => write!(f, "data too small for an iNES header"),
            Self::BadMagic => write!(f, "invalid iNES header magic (expected NES<1A>)"),
            Self::UnsupportedFormat(what) => write!(f, "unsupported ROM format: {what}"),
            Self::TruncatedTrainer => write!(f, "data too small for the declared trainer"),
            Self::TruncatedPrgRom => write!(f, "data too small for the declared PRG ROM"),
            Self::TruncatedChr => write!(f, "data too small for the declared CHR ROM"),
            Self::SizeOverflow(what) => write!(f, "{what} size overflowed while decoding header"),
            Self::UnsupportedMapper(id) => write!(f, "unsupported mapper id: {id}"),
            Self::Io(msg) => write!(f, "failed to read iNES file: {msg}"),
        }
    }
}

impl std::error::Error for CartridgeError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InesVersion {
    Ines1,
    Ines2,
}

pub struct Cartridge {
    mapper: Nrom,
    mapper_id: u16,
    mirroring: Mirroring,
    battery: bool,
    has_trainer: bool,
    pub ines_version: InesVersion,
    prg_rom_len: usize,
    prg_ram_len: usize,
}

impl fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id)
            .field("mirroring", &self.mirroring)
            .field("battery", &self.battery)
            .field("has_trainer", &self.has_trainer)
            .field("ines_version", &self.ines_version)
            .field("prg_rom_len", &self.prg_rom_len)
            .field("prg_ram_len", &self.prg_ram_len)
            .finish()
    }
}

impl Cartridge {
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < 16 {
            return Err(CartridgeError::TooSmall);
        }
        if &data[0..4] != b"NES\x1A" {
            return Err(CartridgeError::BadMagic);
        }

        let prg_rom_16k_units = data[4] as usize;
        let chr_rom_8k_units = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];
        let prg_ram_8k_units = data.get(8).copied().unwrap_or(0) as usize;

        let is_ines2 = (flags7 & 0x0C) == 0x08;
        let version = if is_ines2 {
            InesVersion::Ines2
        } else {
            InesVersion::Ines1
        };
        if is_ines2 {
            return Err(CartridgeError::UnsupportedFormat("NES 2.0"));
        }

        let mapper_low = (flags6 >> 4) as u16;
        let mapper_high = (flags7 & 0xF0) as u16;
        let mapper_id = mapper_high | mapper_low;

        let four_screen = (flags6 & 0b0000_1000) != 0;
        let vertical_mirroring = (flags6 & 0b0000_0001) != 0;
        let mirroring = if four_screen {
            Mirroring::FourScreen
        } else if vertical_mirroring {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let battery = (flags6 & 0b0000_0010) != 0;
        let has_trainer = (flags6 & 0b0000_0100) != 0;

        let mut offset = 16usize;
        if has_trainer {
            if data.len() < offset + 512 {
                return Err(CartridgeError::TruncatedTrainer);
            }
            offset += 512;
        }

        let prg_rom_len = prg_rom_16k_units
            .checked_mul(16 * 1024)
            .ok_or(CartridgeError::SizeOverflow("PRG ROM"))?;
        let chr_len = if chr_rom_8k_units == 0 {
            8 * 1024
        } else {
            chr_rom_8k_units
                .checked_mul(8 * 1024)
                .ok_or(CartridgeError::SizeOverflow("CHR ROM"))?
        };

        if data.len() < offset + prg_rom_len {
            return Err(CartridgeError::TruncatedPrgRom);
        }
        let prg_rom = data[offset..offset + prg_rom_len].to_vec();
        offset += prg_rom_len;

        if chr_rom_8k_units != 0 && data.len() < offset + chr_len {
            return Err(CartridgeError::TruncatedChr);
        }

        let prg_ram_len = if prg_ram_8k_units == 0 {
            8 * 1024
        } else {
            prg_ram_8k_units
                .checked_mul(8 * 1024)
                .ok_or(CartridgeError::SizeOverflow("PRG RAM"))?
        };

        if mapper_id != 0 {
            return Err(CartridgeError::UnsupportedMapper(mapper_id));
        }
        let mapper = Nrom::new(prg_rom, prg_ram_len);

        Ok(Self {
            mapper,
            mapper_id,
            mirroring,
            battery,
            has_trainer,
            ines_version: version,
            prg_rom_len,
            prg_ram_len,
        })
    }

    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let bytes = fs::read(path).map_err(|e| CartridgeError::Io(e.to_string()))?;
        Self::from_ines_bytes(&bytes)
    }

    /// Dispatch a CPU-space read ($4020..=$FFFF) to the mapper.
    pub fn cpu_read(&self, addr: u16) -> u8 {
        self.mapper.read(addr)
    }

    /// Dispatch a CPU-space write ($4020..=$FFFF) to the mapper.
    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        self.mapper.write(addr, value);
    }

    pub fn mapper_id(&self) -> u16 {
        self.mapper_id
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn battery_backed(&self) -> bool {
        self.battery
    }

    pub fn has_trainer(&self) -> bool {
        self.has_trainer
    }

    pub fn has_prg_ram(&self) -> bool {
        self.prg_ram_len > 0
    }

    pub fn prg_rom_len(&self) -> usize {
        self.prg_rom_len
    }

    pub fn prg_ram_len(&self) -> usize {
        self.prg_ram_len
    }
}
