/// WASM front-end for the CHR dumper
use crate::cartridge::Cartridge;
use crate::chr::decode_tile;
use crate::chr::tile::TILES_PER_BANK;
use crate::error::Error;
use js_sys::Uint8Array;
use std::num::NonZeroU32;
use std::panic;
use wasm_bindgen::prelude::*;

fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Check a signed index from JS against `count` valid entries
fn index_arg(what: &'static str, value: i32, count: usize) -> crate::Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|&index| index < count)
        .ok_or(Error::Range {
            what,
            index: i64::from(value),
            max: count.saturating_sub(1),
        })
}

#[wasm_bindgen]
pub struct ChrDump {
    cart: Cartridge,
}

#[wasm_bindgen]
impl ChrDump {
    #[wasm_bindgen(constructor)]
    pub fn new(buf: &[u8]) -> Result<ChrDump, JsValue> {
        let cart = Cartridge::from_buf(buf).map_err(to_js)?;
        Ok(ChrDump { cart })
    }

    #[wasm_bindgen(getter)]
    pub fn mapper(&self) -> u8 {
        self.cart.header().mapper
    }

    #[wasm_bindgen(getter)]
    pub fn prg_block_count(&self) -> usize {
        self.cart.prg_rom().len()
    }

    #[wasm_bindgen(getter)]
    pub fn chr_block_count(&self) -> usize {
        self.cart.chr_rom().len()
    }

    /// Grayscale intensities for one tile, `8 * scale` pixels a side
    #[wasm_bindgen]
    pub fn tile(&self, block: i32, tile: i32, scale: u32) -> Result<Uint8Array, JsValue> {
        let banks = self.cart.chr_rom();
        let block = index_arg("block", block, banks.len()).map_err(to_js)?;
        let tile = index_arg("tile", tile, TILES_PER_BANK).map_err(to_js)?;
        let scale =
            NonZeroU32::new(scale).ok_or_else(|| JsValue::from_str("scale must be at least 1"))?;
        let decoded = decode_tile(&banks[block], tile).map_err(to_js)?;
        Ok(Uint8Array::from(&decoded.to_intensities(scale)[..]))
    }
}

/// Installs a global panic handler to make debugging easier
#[wasm_bindgen]
pub fn init_debug_hooks() {
    panic::set_hook(Box::new(console_error_panic_hook::hook));
}
