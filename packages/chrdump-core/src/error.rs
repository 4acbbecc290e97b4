//! Errors raised while parsing cartridges and decoding CHR tiles

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// The region of an iNES image that a read was attempting to fill
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Section {
    Header,
    PrgRom,
    ChrRom,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header => write!(f, "header"),
            Section::PrgRom => write!(f, "PRG-ROM"),
            Section::ChrRom => write!(f, "CHR-ROM"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[must_use]
pub enum Error {
    /// The first three bytes of the header were not "NES"
    #[error("unknown header type (found: {found:02X?}, expected \"NES\")")]
    Format { found: [u8; 3] },
    /// The stream ended before a declared block was fully read
    #[error("input ended inside {section} block {index} (expected {expected} bytes)")]
    Truncated {
        section: Section,
        index: usize,
        expected: usize,
    },
    #[error("{what} index {index} is out of range (0..={max})")]
    Range {
        what: &'static str,
        index: i64,
        max: usize,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Map a failed `read_exact` into either a truncation or a plain I/O error
    pub(crate) fn from_read(
        source: std::io::Error,
        section: Section,
        index: usize,
        expected: usize,
    ) -> Self {
        if let std::io::ErrorKind::UnexpectedEof = source.kind() {
            Error::Truncated {
                section,
                index,
                expected,
            }
        } else {
            Error::io(source, format!("failed to read {} block {}", section, index))
        }
    }
}
