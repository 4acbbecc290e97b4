//! Decoding 2bpp planar tiles out of a CHR-ROM bank
//!
//! Each tile is 16 bytes: eight bytes of low bitplane followed by eight bytes
//! of high bitplane. Byte `n` of a plane is pixel row `n`, with the leftmost
//! pixel in the most significant bit.

use crate::cartridge::CHR_ROM_BANK_SIZE;
use crate::error::{Error, Result};

/// Width and height of a tile, in pixels
pub const TILE_SIZE: usize = 8;
/// Bytes occupied by one tile in CHR-ROM
pub const TILE_BYTES: usize = 16;
/// Tiles in a single 4k CHR-ROM bank
pub const TILES_PER_BANK: usize = CHR_ROM_BANK_SIZE / TILE_BYTES;

/// One bitplane expanded to a pixel grid of 0/1 values
pub type Plane = [[u8; TILE_SIZE]; TILE_SIZE];

/// A decoded 8x8 tile of 2-bit palette indices
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tile {
    pixels: [[u8; TILE_SIZE]; TILE_SIZE],
}

impl Tile {
    /// Rows of palette indices, top to bottom
    pub fn pixels(&self) -> &[[u8; TILE_SIZE]; TILE_SIZE] {
        &self.pixels
    }

    /// Palette index at `row`, `col`, or `None` outside the 8x8 grid
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        self.pixels.get(row)?.get(col).copied()
    }
}

/// Expand 8 plane bytes into rows of single bits, MSB first
pub fn extract_plane(bytes: &[u8; TILE_SIZE]) -> Plane {
    let mut plane = [[0u8; TILE_SIZE]; TILE_SIZE];
    for (row, byte) in plane.iter_mut().zip(bytes.iter()) {
        for (col, px) in row.iter_mut().enumerate() {
            *px = (*byte >> (7 - col)) & 1;
        }
    }
    plane
}

/// Combine a low and a high bitplane into one tile of 2-bit values
pub fn merge_planes(lo: &Plane, hi: &Plane) -> Tile {
    let mut pixels = [[0u8; TILE_SIZE]; TILE_SIZE];
    for (row, px_row) in pixels.iter_mut().enumerate() {
        for (col, px) in px_row.iter_mut().enumerate() {
            *px = lo[row][col] | (hi[row][col] << 1);
        }
    }
    Tile { pixels }
}

/// Decode tile `tile_index` (0..=255) out of a CHR-ROM bank
pub fn decode_tile(block: &[u8; CHR_ROM_BANK_SIZE], tile_index: usize) -> Result<Tile> {
    if tile_index >= TILES_PER_BANK {
        return Err(Error::Range {
            what: "tile",
            index: tile_index as i64,
            max: TILES_PER_BANK - 1,
        });
    }
    Ok(decode_in_range(block, tile_index))
}

fn decode_in_range(block: &[u8; CHR_ROM_BANK_SIZE], tile_index: usize) -> Tile {
    let addr = tile_index * TILE_BYTES;
    let lo = extract_plane(&plane_bytes(block, addr));
    let hi = extract_plane(&plane_bytes(block, addr + TILE_SIZE));
    merge_planes(&lo, &hi)
}

fn plane_bytes(block: &[u8], addr: usize) -> [u8; TILE_SIZE] {
    let mut bytes = [0u8; TILE_SIZE];
    bytes.copy_from_slice(&block[addr..addr + TILE_SIZE]);
    bytes
}

/// Lazily decode every tile of a bank, in ascending index order
///
/// The iterator borrows the bank immutably; call `tiles` again (or clone the
/// iterator) to start over.
pub fn tiles(block: &[u8; CHR_ROM_BANK_SIZE]) -> Tiles<'_> {
    Tiles { block, next: 0 }
}

#[derive(Debug, Clone)]
pub struct Tiles<'a> {
    block: &'a [u8; CHR_ROM_BANK_SIZE],
    next: usize,
}

impl<'a> Iterator for Tiles<'a> {
    type Item = (usize, Tile);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= TILES_PER_BANK {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some((index, decode_in_range(self.block, index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = TILES_PER_BANK - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Tiles<'a> {}
