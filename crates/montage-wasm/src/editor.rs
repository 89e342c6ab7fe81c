//! Slot editor WASM bindings.
//!
//! Wraps [`montage_core::SlotEditor`] for the web editing surface: slider
//! updates, enable toggles, preset selection, crop gestures, and crop
//! read-back for drawing interactive handles.
//!
//! This is the library boundary facing untrusted JavaScript callers, so
//! slider and rotation inputs are defensively clamped to their documented
//! ranges here; the core assumes ranges and does not re-check.

use montage_core::color::Rgb;
use montage_core::crop::{DragCorner, ZoomDirection};
use montage_core::{AdjustmentField, FilterKind, ImageAssignment, Preset, Slot, SlotEditor};
use wasm_bindgen::prelude::*;

/// Editor for one slot's assignment.
#[wasm_bindgen]
pub struct JsSlotEditor {
    inner: SlotEditor,
}

#[wasm_bindgen]
impl JsSlotEditor {
    /// Place a source image into a slot.
    ///
    /// The crop initializes to the maximal valid rect at the slot's aspect
    /// ratio, rotation 0, all filters at defaults.
    ///
    /// # Arguments
    /// * `source_id` - Catalog id of the placed image
    /// * `source_width`, `source_height` - Decoded source dimensions
    /// * `slot_width`, `slot_height` - Slot extent in percent of the
    ///   composition; only the ratio matters here
    #[wasm_bindgen(constructor)]
    pub fn new(
        source_id: f64,
        source_width: u32,
        source_height: u32,
        slot_width: f64,
        slot_height: f64,
    ) -> JsSlotEditor {
        JsSlotEditor {
            inner: SlotEditor::new(
                source_id as i64,
                source_width,
                source_height,
                Slot::new(0.0, 0.0, slot_width, slot_height),
            ),
        }
    }

    /// Update a slider or transform field.
    ///
    /// Fields: `brightness`, `contrast`, `saturation`, `temperature`,
    /// `tint` (clamped to [-100, 100]); `hue`, `rotation` (clamped to
    /// [-180, 180]). Unknown fields are ignored.
    pub fn set_value(&mut self, field: &str, value: f64) {
        let (field, value) = match field {
            "brightness" => (AdjustmentField::Brightness, value.clamp(-100.0, 100.0)),
            "contrast" => (AdjustmentField::Contrast, value.clamp(-100.0, 100.0)),
            "saturation" => (AdjustmentField::Saturation, value.clamp(-100.0, 100.0)),
            "hue" => (AdjustmentField::Hue, value.clamp(-180.0, 180.0)),
            "temperature" => (AdjustmentField::Temperature, value.clamp(-100.0, 100.0)),
            "tint" => (AdjustmentField::Tint, value.clamp(-100.0, 100.0)),
            "rotation" => (AdjustmentField::Rotation, value.clamp(-180.0, 180.0)),
            _ => return,
        };
        self.inner.set_value(field, value);
    }

    /// Flip one filter stage's enable flag. Unknown names are ignored.
    pub fn toggle_filter(&mut self, name: &str) {
        let kind = match name {
            "brightness" => FilterKind::Brightness,
            "contrast" => FilterKind::Contrast,
            "saturation" => FilterKind::Saturation,
            "hue" => FilterKind::Hue,
            "temperature" => FilterKind::Temperature,
            "tint" => FilterKind::Tint,
            _ => return,
        };
        self.inner.toggle_filter(kind);
    }

    /// Flip the master filter toggle.
    pub fn toggle_filters_enabled(&mut self) {
        self.inner.toggle_filters_enabled();
    }

    /// Radio-style preset selection.
    ///
    /// Names: `none`, `blackWhite`, `sepia`, `monochrome` (with a hex
    /// `color`). Selecting the active preset again clears it. An unparseable
    /// monochrome color selects no preset.
    pub fn set_preset(&mut self, name: &str, color: Option<String>) {
        let preset = match name {
            "blackWhite" => Preset::BlackWhite,
            "sepia" => Preset::Sepia,
            "monochrome" => match color.as_deref().and_then(Rgb::from_hex) {
                Some(rgb) => Preset::Monochrome(rgb),
                None => return,
            },
            "none" => {
                // Direct clear, not a toggle
                self.inner.set_preset(self.active_preset_value());
                return;
            }
            _ => return,
        };
        self.inner.set_preset(preset);
    }

    /// The active preset's name.
    pub fn preset(&self) -> String {
        self.inner.assignment().preset.tag().to_string()
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.inner.set_mirrored(mirrored);
    }

    #[wasm_bindgen(getter)]
    pub fn mirrored(&self) -> bool {
        self.inner.assignment().mirrored
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.assignment().rotation
    }

    /// Reset every adjustment: filters to defaults, preset cleared, rotation
    /// 0, mirror off, crop back to maximal.
    pub fn reset_all(&mut self) {
        self.inner.reset_all();
    }

    // ===== Crop gestures =====

    /// Translate the crop by a pointer delta in display pixels.
    pub fn drag_move(&mut self, dx: f64, dy: f64) {
        self.inner.drag_move(dx, dy);
    }

    /// Resize by dragging a corner handle (`nw`, `ne`, `sw`, `se`) to a
    /// pointer position in display pixels. Unknown corners are ignored.
    pub fn drag_resize(&mut self, corner: &str, x: f64, y: f64) {
        let corner = match corner {
            "nw" => DragCorner::NorthWest,
            "ne" => DragCorner::NorthEast,
            "sw" => DragCorner::SouthWest,
            "se" => DragCorner::SouthEast,
            _ => return,
        };
        self.inner.drag_resize(corner, x, y);
    }

    /// Scale the crop one wheel step; negative deltas zoom in.
    pub fn zoom(&mut self, delta: f64) {
        let direction = if delta < 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        self.inner.zoom(direction);
    }

    // ===== Display read-back =====

    /// Crop left edge in display pixels against the current bounding box.
    pub fn crop_x(&self) -> f64 {
        self.inner.crop_px().x
    }

    /// Crop top edge in display pixels.
    pub fn crop_y(&self) -> f64 {
        self.inner.crop_px().y
    }

    /// Crop width in display pixels.
    pub fn crop_width(&self) -> f64 {
        self.inner.crop_px().width
    }

    /// Crop height in display pixels.
    pub fn crop_height(&self) -> f64 {
        self.inner.crop_px().height
    }

    /// Current bounding-box width in pixels.
    pub fn bounds_width(&self) -> f64 {
        self.inner.space().bounds.width
    }

    /// Current bounding-box height in pixels.
    pub fn bounds_height(&self) -> f64 {
        self.inner.space().bounds.height
    }

    // ===== Persistence =====

    /// Serialize the assignment as its flat record for storage.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.assignment())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Resume editing a persisted assignment record.
    pub fn from_json(
        value: JsValue,
        source_width: u32,
        source_height: u32,
        slot_width: f64,
        slot_height: f64,
    ) -> Result<JsSlotEditor, JsValue> {
        let assignment: ImageAssignment =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsSlotEditor {
            inner: SlotEditor::from_assignment(
                assignment,
                source_width,
                source_height,
                Slot::new(0.0, 0.0, slot_width, slot_height),
            ),
        })
    }
}

impl JsSlotEditor {
    /// Access the wrapped editor for the render bindings.
    pub(crate) fn inner(&self) -> &SlotEditor {
        &self.inner
    }

    /// Currently active preset value, used to implement the explicit `none`
    /// clear as a self-toggle.
    fn active_preset_value(&self) -> Preset {
        self.inner.assignment().preset
    }
}
