//! Writes exported tiles as grayscale PNG files into a directory

use chrdump_core::chr::ImageSink;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

fn to_io(err: png::EncodingError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

pub struct PngDirectory {
    dir: PathBuf,
}

impl PngDirectory {
    /// Use `dir` as the output directory, creating it (and any parents) first
    pub fn create<P: AsRef<Path>>(dir: P) -> io::Result<PngDirectory> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(PngDirectory { dir })
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.png", name))
    }
}

impl ImageSink for PngDirectory {
    fn write_gray(&mut self, name: &str, width: u32, height: u32, pixels: &[u8]) -> io::Result<()> {
        let file = File::create(self.path_for(name))?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(to_io)?;
        writer.write_image_data(pixels).map_err(to_io)?;
        writer.finish().map_err(to_io)
    }
}
