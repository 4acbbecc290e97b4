//! Turning decoded tiles into grayscale images
//!
//! Encoding and persisting images is left to an [`ImageSink`]; this module
//! only produces pixel buffers and the name each tile is stored under.

use super::tile::{tiles, Tile, TILES_PER_BANK, TILE_SIZE};
use crate::cartridge::{Cartridge, CHR_ROM_BANK_SIZE};
use crate::error::{Error, Result};
use std::num::NonZeroU32;
use tracing::debug;

/// Grayscale intensity for each 2-bit palette index
pub const PALETTE: [u8; 4] = [0x00, 0x56, 0xAC, 0xFF];

/// The highest bank index that still fits the two hex digits of a tile name
const MAX_BLOCK_INDEX: usize = 0xFF;

/// Anything that can persist a single-channel 8-bit image
pub trait ImageSink {
    /// Store `pixels` (row-major, `width * height` bytes) under `name`.
    ///
    /// `name` carries no extension; picking one is up to the sink.
    fn write_gray(&mut self, name: &str, width: u32, height: u32, pixels: &[u8])
        -> std::io::Result<()>;
}

/// Knobs for batch export
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExportOptions {
    /// Prepended to every tile name
    pub prefix: String,
    /// Each tile pixel becomes a `scale` x `scale` square
    pub scale: NonZeroU32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            prefix: String::from("chrrom_"),
            scale: NonZeroU32::MIN,
        }
    }
}

impl Tile {
    /// Map every pixel through [`PALETTE`], upscaling by `scale`
    ///
    /// The result is a row-major square buffer of `8 * scale` pixels a side.
    pub fn to_intensities(&self, scale: NonZeroU32) -> Vec<u8> {
        let scale = scale.get() as usize;
        let side = TILE_SIZE * scale;
        let mut out = Vec::with_capacity(side * side);
        for row in self.pixels().iter() {
            let mut line = Vec::with_capacity(side);
            for &px in row.iter() {
                let shade = PALETTE[(px & 0x03) as usize];
                line.extend(std::iter::repeat(shade).take(scale));
            }
            for _ in 0..scale {
                out.extend_from_slice(&line);
            }
        }
        out
    }
}

/// Name a tile by its bank and tile index, e.g. `chrrom_01FF`
pub fn tile_name(prefix: &str, block_index: usize, tile_index: usize) -> Result<String> {
    if block_index > MAX_BLOCK_INDEX {
        return Err(Error::Range {
            what: "block",
            index: block_index as i64,
            max: MAX_BLOCK_INDEX,
        });
    }
    if tile_index >= TILES_PER_BANK {
        return Err(Error::Range {
            what: "tile",
            index: tile_index as i64,
            max: TILES_PER_BANK - 1,
        });
    }
    Ok(format!("{}{:02X}{:02X}", prefix, block_index, tile_index))
}

/// Write all 256 tiles of one CHR-ROM bank to `sink`, returning the count
pub fn export_block<S: ImageSink + ?Sized>(
    block: &[u8; CHR_ROM_BANK_SIZE],
    block_index: usize,
    options: &ExportOptions,
    sink: &mut S,
) -> Result<usize> {
    let side = TILE_SIZE as u32 * options.scale.get();
    let mut written = 0;
    for (tile_index, tile) in tiles(block) {
        let name = tile_name(&options.prefix, block_index, tile_index)?;
        let pixels = tile.to_intensities(options.scale);
        sink.write_gray(&name, side, side, &pixels)
            .map_err(|err| Error::io(err, format!("failed to write {}", name)))?;
        written += 1;
    }
    debug!(block_index, tiles = written, "exported CHR bank");
    Ok(written)
}

/// Export every CHR-ROM bank of a cartridge, in bank order
///
/// Fails up front, before anything is written, if the cartridge has more
/// banks than tile names can tell apart.
pub fn export_cartridge<S: ImageSink + ?Sized>(
    cart: &Cartridge,
    options: &ExportOptions,
    sink: &mut S,
) -> Result<usize> {
    let banks = cart.chr_rom();
    if banks.len() > MAX_BLOCK_INDEX + 1 {
        return Err(Error::Range {
            what: "block",
            index: (banks.len() - 1) as i64,
            max: MAX_BLOCK_INDEX,
        });
    }
    let mut written = 0;
    for (block_index, bank) in banks.iter().enumerate() {
        written += export_block(bank, block_index, options, sink)?;
    }
    Ok(written)
}
