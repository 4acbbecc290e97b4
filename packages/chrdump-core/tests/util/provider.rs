use chrdump_core::cartridge::{CHR_ROM_BANK_SIZE, PRG_ROM_BANK_SIZE};
use chrdump_core::chr::ImageSink;
use rand::Rng;
use std::collections::BTreeMap;
use std::io;

/// A synthetic iNES image along with the banks that went into it
pub struct SyntheticRom {
    pub bytes: Vec<u8>,
    pub prg: Vec<Vec<u8>>,
    pub chr: Vec<Vec<u8>>,
}

fn random_bank(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Build an image with `prg_units` PRG banks and `chr_units` header CHR
/// units (each of which contributes two 4k banks) of random content
pub fn random_rom(prg_units: u8, chr_units: u8) -> SyntheticRom {
    let mut bytes = b"NES\x1a".to_vec();
    bytes.extend_from_slice(&[prg_units, chr_units]);
    bytes.resize(16, 0);

    let prg: Vec<Vec<u8>> = (0..prg_units)
        .map(|_| random_bank(PRG_ROM_BANK_SIZE))
        .collect();
    let chr: Vec<Vec<u8>> = (0..usize::from(chr_units) * 2)
        .map(|_| random_bank(CHR_ROM_BANK_SIZE))
        .collect();
    for bank in prg.iter().chain(chr.iter()) {
        bytes.extend_from_slice(bank);
    }

    SyntheticRom { bytes, prg, chr }
}

/// An image sink that keeps every image in memory, keyed by name
#[derive(Default)]
pub struct MemorySink {
    pub images: BTreeMap<String, (u32, u32, Vec<u8>)>,
    pub writes: usize,
}

impl ImageSink for MemorySink {
    fn write_gray(&mut self, name: &str, width: u32, height: u32, pixels: &[u8]) -> io::Result<()> {
        self.writes += 1;
        self.images
            .insert(name.to_string(), (width, height, pixels.to_vec()));
        Ok(())
    }
}

/// A sink that accepts `remaining` images and then fails
pub struct FailingSink {
    pub remaining: usize,
}

impl ImageSink for FailingSink {
    fn write_gray(&mut self, _name: &str, _w: u32, _h: u32, _pixels: &[u8]) -> io::Result<()> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.remaining -= 1;
        Ok(())
    }
}
