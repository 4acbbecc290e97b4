//! CHR-ROM pattern data: tile decoding and image export

pub mod export;
pub mod tile;

pub use export::{export_block, export_cartridge, tile_name, ExportOptions, ImageSink, PALETTE};
pub use tile::{decode_tile, extract_plane, merge_planes, tiles, Plane, Tile, Tiles};
