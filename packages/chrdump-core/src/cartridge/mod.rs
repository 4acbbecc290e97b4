//! Loading iNES cartridge images into PRG and CHR banks

pub mod ines;

use crate::error::{Error, Result, Section};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

pub use ines::{parse_ines_header, Header, Mirroring, HEADER_LEN};

/// Size of one PRG-ROM bank (a 16k header unit)
pub const PRG_ROM_BANK_SIZE: usize = 0x4000;
/// Size of one CHR-ROM bank (one pattern table, half a header unit)
pub const CHR_ROM_BANK_SIZE: usize = 0x1000;

pub type PrgBank = Box<[u8; PRG_ROM_BANK_SIZE]>;
pub type ChrBank = Box<[u8; CHR_ROM_BANK_SIZE]>;

/// A parsed cartridge image
///
/// The cartridge owns every bank it loaded. Nothing is mutable after `load`
/// returns, so a cartridge can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Cartridge {
    header: Header,
    prg_rom: Vec<PrgBank>,
    chr_rom: Vec<ChrBank>,
}

impl Cartridge {
    /// Read a cartridge from a forward-only byte stream.
    ///
    /// The stream is consumed once, in header, PRG-ROM, CHR-ROM order. Any
    /// trailing bytes are left unread.
    pub fn load<R: Read>(reader: &mut R) -> Result<Cartridge> {
        let mut header_bytes = [0u8; HEADER_LEN];
        reader
            .read_exact(&mut header_bytes)
            .map_err(|err| Error::from_read(err, Section::Header, 0, HEADER_LEN))?;
        let (header, prg_count, chr_count) = parse_ines_header(&header_bytes)?;
        if !header.has_dos_eof_marker() {
            warn!(found = header_bytes[3], "iNES header is missing its 0x1A marker");
        }

        let mut prg_rom: Vec<PrgBank> = Vec::with_capacity(prg_count as usize);
        for index in 0..prg_count as usize {
            prg_rom.push(read_bank(reader, Section::PrgRom, index)?);
        }

        let mut chr_rom: Vec<ChrBank> = Vec::with_capacity(chr_count as usize);
        for index in 0..chr_count as usize {
            chr_rom.push(read_bank(reader, Section::ChrRom, index)?);
        }

        info!(
            mapper = header.mapper,
            prg_banks = prg_rom.len(),
            chr_banks = chr_rom.len(),
            "loaded cartridge"
        );
        Ok(Cartridge {
            header,
            prg_rom,
            chr_rom,
        })
    }

    /// Load a cartridge from an in-memory iNES image
    pub fn from_buf(mut buf: &[u8]) -> Result<Cartridge> {
        Cartridge::load(&mut buf)
    }

    /// Load a cartridge from a file on disk.
    ///
    /// The file handle lives only for the duration of this call and is closed
    /// on every return path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Cartridge> {
        let path = path.as_ref();
        debug!(?path, "opening rom");
        let file = File::open(path)
            .map_err(|err| Error::io(err, format!("failed to open rom {:?}", path)))?;
        let mut reader = BufReader::new(file);
        Cartridge::load(&mut reader)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// PRG-ROM banks in file order
    pub fn prg_rom(&self) -> &[PrgBank] {
        &self.prg_rom
    }

    /// CHR-ROM banks in file order. There are two per header unit.
    pub fn chr_rom(&self) -> &[ChrBank] {
        &self.chr_rom
    }
}

fn read_bank<R: Read, const N: usize>(
    reader: &mut R,
    section: Section,
    index: usize,
) -> Result<Box<[u8; N]>> {
    let mut bank = Box::new([0u8; N]);
    reader
        .read_exact(&mut bank[..])
        .map_err(|err| Error::from_read(err, section, index, N))?;
    Ok(bank)
}
