//! Helpers for parsing iNES ROM headers

use crate::error::{Error, Result};
use tracing::debug;

/// Length of the fixed iNES header prefix
pub const HEADER_LEN: usize = 16;

/// The magic string every iNES image starts with
pub const INES_MAGIC: [u8; 3] = *b"NES";

/// The MS-DOS end-of-file byte that conventionally follows the magic string
const DOS_EOF: u8 = 0x1A;

/// Nametable mirroring as wired on the cartridge board
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

/// Decoded iNES header
///
/// All fields are derived from flag bytes 6 and 7. Section counts are not
/// part of the header record; `parse_ines_header` returns them alongside it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Header {
    /// Always "NES" for a header that parsed successfully
    pub id: [u8; 3],
    /// The iNES mapper number, assembled from both flag bytes
    pub mapper: u8,
    /// Whether to use 4-screen VRAM instead of mirroring
    pub four_screen: bool,
    /// Whether a 512-byte trainer sits between the header and PRG-ROM
    pub trainer: bool,
    /// Whether the cartridge contains battery-backed RAM
    pub battery_backed: bool,
    pub mirroring: Mirroring,
    pub play_choice_10: bool,
    pub vs_unisystem: bool,
    /// Whether the rest of the header is in NES 2.0 format
    pub nes_2_0: bool,
    has_dos_eof: bool,
}

impl Header {
    /// Whether byte 3 held the conventional 0x1A terminator.
    ///
    /// This is informational only; parsing never rejects a header for it.
    pub fn has_dos_eof_marker(&self) -> bool {
        self.has_dos_eof
    }

    /// A short board name for well-known mapper numbers
    ///
    /// Mappers are identified, never emulated.
    pub fn mapper_name(&self) -> Option<&'static str> {
        match self.mapper {
            0 => Some("NROM"),
            1 => Some("MMC1"),
            2 => Some("UxROM"),
            3 => Some("CNROM"),
            4 => Some("MMC3"),
            5 => Some("MMC5"),
            7 => Some("AxROM"),
            9 => Some("MMC2"),
            10 => Some("MMC4"),
            11 => Some("Color Dreams"),
            66 => Some("GxROM"),
            _ => None,
        }
    }
}

bitflags! {
    pub struct INesFlags6: u8 {
        /** The mirroring mode.
         *
         * If 0, use horizontal (vertical arrangement) mirroring
         * If 1, use vertical (horizontal arrangement) mirroring.
         */
        const MIRRORING = 0x01;
        /** Whether this rom contains a battery-backed RAM */
        const HAS_PERSISTENT_MEMORY = 0x02;
        /** Whether this ROM contains a 512-byte trainer program. */
        const HAS_TRAINER = 0x04;
        /** Whether to use 4-screen VRAM instead of mirroring */
        const USE_FOUR_SCREEN_VRAM = 0x08;
        /** The lower nibble of the iNES mapper number */
        const LOWER_MAPPER_NIBBLE = 0xF0;
    }
}

bitflags! {
    pub struct INesFlags7: u8 {
        /** Whether this ROM was developed for the VS arcade */
        const VS_UNISYSTEM_ROM = 0x01;
        /** Whether this ROM was developed for the PlayChoice arcade.
         *
         * Note that this is rarely seen in the wild, but the presense of this bit
         * indicates that 8kb of hint screen data is included at the end of the
         * CHR section
         */
        const PLAYCHOICE_10 = 0x02;
        /** If set, the rest of this ROM's headers are in NES 2.0 format. */
        const IS_NES_2_0 = 0x08;
        /** The upper nibble of the iNES mapper number */
        const UPPER_MAPPER_NIBBLE = 0xF0;
    }
}

/** Given the first 16 bytes, parse out an iNES header
 *
 * Returns the header along with the PRG-ROM count (16k units, as stored) and
 * the CHR-ROM count doubled: each 8k CHR unit is loaded as two 4k halves, one
 * per pattern table.
 */
pub fn parse_ines_header(bytes: &[u8; HEADER_LEN]) -> Result<(Header, u8, u16)> {
    let mut id = [0u8; 3];
    id.copy_from_slice(&bytes[0..3]);
    if id != INES_MAGIC {
        return Err(Error::Format { found: id });
    }

    let flags_6 = INesFlags6::from_bits_truncate(bytes[6]);
    let flags_7 = INesFlags7::from_bits_truncate(bytes[7]);
    let lower_mapper_nibble = (flags_6 & INesFlags6::LOWER_MAPPER_NIBBLE).bits() >> 4;
    let upper_mapper_nibble = (flags_7 & INesFlags7::UPPER_MAPPER_NIBBLE).bits();

    let header = Header {
        id,
        mapper: upper_mapper_nibble | lower_mapper_nibble,
        four_screen: flags_6.contains(INesFlags6::USE_FOUR_SCREEN_VRAM),
        trainer: flags_6.contains(INesFlags6::HAS_TRAINER),
        battery_backed: flags_6.contains(INesFlags6::HAS_PERSISTENT_MEMORY),
        mirroring: if flags_6.contains(INesFlags6::MIRRORING) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        },
        play_choice_10: flags_7.contains(INesFlags7::PLAYCHOICE_10),
        vs_unisystem: flags_7.contains(INesFlags7::VS_UNISYSTEM_ROM),
        nes_2_0: flags_7.contains(INesFlags7::IS_NES_2_0),
        has_dos_eof: bytes[3] == DOS_EOF,
    };
    let prg_rom_units = bytes[4];
    let chr_rom_units = u16::from(bytes[5]) * 2;
    debug!(
        mapper = header.mapper,
        prg_rom_units,
        chr_rom_units,
        "parsed iNES header"
    );

    Ok((header, prg_rom_units, chr_rom_units))
}
