#[macro_use]
extern crate bitflags;

pub mod bindings;
pub mod cartridge;
pub mod chr;
pub mod error;

pub use error::{Error, Result};
