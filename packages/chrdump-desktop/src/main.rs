//! Dumps every CHR-ROM tile of an iNES image as a PNG file.
//!
//! Usage: chrdump <rom.nes> [out-dir] [--scale N] [--prefix P]

mod png_sink;

use chrdump_core::cartridge::Cartridge;
use chrdump_core::chr::{export_cartridge, ExportOptions};
use png_sink::PngDirectory;
use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: chrdump <rom.nes> [out-dir] [--scale N] [--prefix P]";

struct Args {
    rom: PathBuf,
    out_dir: PathBuf,
    options: ExportOptions,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut options = ExportOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scale" => {
                let value = args.next().ok_or("--scale needs a value")?;
                options.scale = value
                    .parse::<NonZeroU32>()
                    .map_err(|_| format!("invalid scale `{}`", value))?;
            }
            "--prefix" => {
                options.prefix = args.next().ok_or("--prefix needs a value")?;
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let rom = positional.next().ok_or(USAGE)?;
    let out_dir = positional.next().unwrap_or_else(|| ".".to_string());
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument `{}`\n{}", extra, USAGE));
    }
    Ok(Args {
        rom: PathBuf::from(rom),
        out_dir: PathBuf::from(out_dir),
        options,
    })
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let cart = Cartridge::from_file(&args.rom)?;
    let header = cart.header();
    info!(
        mapper = header.mapper,
        board = header.mapper_name().unwrap_or("unknown"),
        mirroring = ?header.mirroring,
        "read {}",
        args.rom.display()
    );

    let mut sink = PngDirectory::create(&args.out_dir)?;
    let written = export_cartridge(&cart, &args.options, &mut sink)?;
    info!("wrote {} tiles to {}", written, args.out_dir.display());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };

    if let Err(err) = run(args) {
        error!("{}", err);
        process::exit(1);
    }
}
