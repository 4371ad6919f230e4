//! WASM bindings for the `bytecraft` record layout engine.
//!
//! A layout is described in JSON using the shape of
//! [`bytecraft::serde::LayoutDef`], compiled once, and then used from
//! JavaScript to read records out of a `Uint8Array` or write them back in
//! place.
//!
//! ```text
//! // const layoutJson = JSON.stringify({
//! //   fields: [
//! //     { type: "Uint8", name: "blue" },
//! //     { type: "Uint8", name: "green" },
//! //     { type: "Uint8", name: "red" },
//! //   ]
//! // });
//! //
//! // const pixel = new WasmLayout(layoutJson);
//! // const pixels = pixel.readArray(bytes, 54, 8, true);
//! // pixel.write(bytes, 54, true, { blue: 255, green: 0, red: 0 });
//! ```
//!
//! 64 bit integers cross the boundary as `BigInt`, byte arrays as plain
//! arrays of numbers. Errors are returned as their display string.

mod convert;

use std::collections::HashMap;

use bytecraft::{bytes::SharedBytes, codec::Endian, layout::Layout, serde::LayoutDef};
use wasm_bindgen::prelude::*;

use crate::convert::JsValueIn;

/// Compiled layout usable from JavaScript.
#[wasm_bindgen]
pub struct WasmLayout {
    layout: Layout,
}

#[wasm_bindgen]
impl WasmLayout {
    /// Compiles a layout from its JSON definition.
    #[wasm_bindgen(constructor)]
    pub fn new(layout_json: &str) -> Result<WasmLayout, JsValue> {
        let def: LayoutDef = serde_json::from_str(layout_json).map_err(convert::error_to_js)?;
        let layout = Layout::try_from(def).map_err(convert::error_to_js)?;
        Ok(WasmLayout { layout })
    }

    /// Total width of one record, including skipped bytes.
    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.layout.byte_length()
    }

    /// Decodes the record starting at `offset` into a plain object.
    pub fn read(
        &self,
        data: &mut [u8],
        offset: usize,
        little_endian: bool,
    ) -> Result<JsValue, JsValue> {
        let bytes = SharedBytes::new(data);
        let view = self
            .layout
            .project(bytes, offset, Endian::from_little(little_endian));

        convert::to_js(&convert::record_to_map(&view)?)
    }

    /// Decodes `count` consecutive records starting at `offset`.
    #[wasm_bindgen(js_name = readArray)]
    pub fn read_array(
        &self,
        data: &mut [u8],
        offset: usize,
        count: usize,
        little_endian: bool,
    ) -> Result<JsValue, JsValue> {
        let bytes = SharedBytes::new(data);

        let records = self
            .layout
            .records(bytes, offset, count, Endian::from_little(little_endian))
            .map(|view| convert::record_to_map(&view))
            .collect::<Result<Vec<_>, _>>()?;

        convert::to_js(&records)
    }

    /// Writes the fields present in `obj` into the record at `offset`.
    ///
    /// Every value is checked against its field before the first byte is
    /// written; fields missing from `obj` keep their current bytes.
    pub fn write(
        &self,
        data: &mut [u8],
        offset: usize,
        little_endian: bool,
        obj: JsValue,
    ) -> Result<(), JsValue> {
        let raw: HashMap<String, serde_json::Value> =
            serde_wasm_bindgen::from_value(obj).map_err(convert::error_to_js)?;

        let bytes = SharedBytes::new(data);
        let view = self
            .layout
            .project(bytes, offset, Endian::from_little(little_endian));

        for (field, input) in convert::map_to_inputs(&view, raw)? {
            let name = field.name.as_str();
            match input {
                JsValueIn::Scalar(value) => view.set(name, value),
                JsValueIn::Bytes(src) => view.set_bytes(name, &src),
            }
            .map_err(convert::error_to_js)?;
        }

        Ok(())
    }
}
