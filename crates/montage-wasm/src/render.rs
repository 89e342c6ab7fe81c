//! WASM bindings for the render pipeline and filter chain.
//!
//! The preview path renders at the native crop size with bilinear sampling;
//! the export path passes an explicit output size and Lanczos3. Mirroring is
//! a separate presentation-time flip.

use crate::editor::JsSlotEditor;
use crate::types::{filter_from_u8, JsRaster};
use wasm_bindgen::prelude::*;

/// Render the editor's current crop from the source raster and apply the
/// filter chain.
///
/// # Arguments
///
/// * `editor` - The slot editor holding crop/rotation/filter state
/// * `source` - Decoded source pixels
/// * `output_width`, `output_height` - Explicit output size for export; pass
///   `undefined` for both to keep the native crop size
/// * `filter` - 0 = nearest, 1 = bilinear (preview), 2 = lanczos3 (export)
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Interactive preview
/// const preview = render_assignment(editor, source, undefined, undefined, 1);
///
/// // Export at 4K
/// const full = render_assignment(editor, source, 3840, 2160, 2);
/// ```
#[wasm_bindgen]
pub fn render_assignment(
    editor: &JsSlotEditor,
    source: &JsRaster,
    output_width: Option<u32>,
    output_height: Option<u32>,
    filter: u8,
) -> Result<JsRaster, JsValue> {
    let output_size = match (output_width, output_height) {
        (Some(w), Some(h)) => Some((w, h)),
        _ => None,
    };

    let raster = editor
        .inner()
        .render(&source.to_raster(), output_size, filter_from_u8(filter))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(JsRaster::from_raster(raster))
}

/// The editor's ordered filter-operation list, for surfaces that apply
/// filters themselves (e.g. a canvas shader path).
#[wasm_bindgen]
pub fn filter_chain(editor: &JsSlotEditor) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&editor.inner().filter_chain())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Horizontally mirror a raster (the presentation-time flip for mirrored
/// assignments).
#[wasm_bindgen]
pub fn flip_horizontal(raster: &JsRaster) -> JsRaster {
    JsRaster::from_raster(raster.to_raster().flip_horizontal())
}
