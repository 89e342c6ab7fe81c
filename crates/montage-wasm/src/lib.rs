//! Montage WASM - WebAssembly bindings for the Montage transform core
//!
//! This crate exposes montage-core to the JavaScript/TypeScript editing
//! surface.
//!
//! # Module Structure
//!
//! - `editor` - Slot editor bindings (sliders, presets, crop gestures)
//! - `render` - Render pipeline and filter chain bindings
//! - `types` - WASM-compatible raster wrapper
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSlotEditor, JsRaster, render_assignment } from '@montage/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsSlotEditor(sourceId, 4000, 3000, 40, 30);
//! editor.set_value('rotation', 15);
//! editor.set_preset('sepia', undefined);
//!
//! const source = new JsRaster(4000, 3000, decodedPixels);
//! const preview = render_assignment(editor, source, undefined, undefined, 1);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod render;
mod types;

// Re-export public types
pub use editor::JsSlotEditor;
pub use render::{filter_chain, flip_horizontal, render_assignment};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
