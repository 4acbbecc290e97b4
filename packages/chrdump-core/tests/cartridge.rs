//! Loads synthetic iNES images and checks that every bank comes back intact
//! and in file order.

extern crate chrdump_core;

mod util;

use chrdump_core::cartridge::{Cartridge, Mirroring, CHR_ROM_BANK_SIZE, PRG_ROM_BANK_SIZE};
use chrdump_core::error::{Error, Section};
use std::fs;
use std::io::Cursor;
use util::provider;

#[test]
fn should_round_trip_random_banks() {
    let rom = provider::random_rom(3, 3);
    let cart = Cartridge::from_buf(&rom.bytes).expect("Could not load synthetic rom");

    assert_eq!(cart.prg_rom().len(), 3);
    assert_eq!(cart.chr_rom().len(), 6);
    for (loaded, expected) in cart.prg_rom().iter().zip(rom.prg.iter()) {
        assert_eq!(&loaded[..], &expected[..]);
    }
    for (loaded, expected) in cart.chr_rom().iter().zip(rom.chr.iter()) {
        assert_eq!(&loaded[..], &expected[..]);
    }
    assert_eq!(cart.header().mirroring, Mirroring::Horizontal);
}

#[test]
fn should_load_from_reader_and_stop_after_chr() {
    let mut rom = provider::random_rom(1, 1);
    rom.bytes.extend_from_slice(b"trailing data");
    let mut cursor = Cursor::new(rom.bytes);

    let cart = Cartridge::load(&mut cursor).expect("Could not load synthetic rom");
    assert_eq!(cart.chr_rom().len(), 2);
    let consumed = 16 + PRG_ROM_BANK_SIZE + 2 * CHR_ROM_BANK_SIZE;
    assert_eq!(cursor.position() as usize, consumed);
}

#[test]
fn should_load_from_file() {
    let rom = provider::random_rom(2, 1);
    let dir = std::env::temp_dir().join(format!("chrdump-load-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("synthetic.nes");
    fs::write(&path, &rom.bytes).unwrap();

    let cart = Cartridge::from_file(&path).expect("Could not read synthetic rom");
    assert_eq!(&cart.prg_rom()[1][..], &rom.prg[1][..]);
    assert_eq!(&cart.chr_rom()[1][..], &rom.chr[1][..]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn should_fail_on_every_truncation_point() {
    let rom = provider::random_rom(1, 1);
    let cuts = [
        (8, Section::Header, 0),
        (16 + 100, Section::PrgRom, 0),
        (16 + PRG_ROM_BANK_SIZE + 5, Section::ChrRom, 0),
        (16 + PRG_ROM_BANK_SIZE + CHR_ROM_BANK_SIZE, Section::ChrRom, 1),
        (rom.bytes.len() - 1, Section::ChrRom, 1),
    ];
    for (len, expected_section, expected_index) in cuts.iter() {
        match Cartridge::from_buf(&rom.bytes[..*len]) {
            Err(Error::Truncated { section, index, .. }) => {
                assert_eq!(section, *expected_section, "cut at {}", len);
                assert_eq!(index, *expected_index, "cut at {}", len);
            }
            other => panic!("cut at {}: expected truncation, got {:?}", len, other.map(|_| ())),
        }
    }
}
