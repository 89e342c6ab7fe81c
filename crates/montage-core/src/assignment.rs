//! Per-slot assignment state and its mutation surface.
//!
//! An [`ImageAssignment`] records everything needed to replay one slot's
//! edit: crop (percentage space), rotation, mirror flag, slider values, and
//! the active preset. It persists as a flat record of numeric fields,
//! booleans, and one hex color string.
//!
//! [`SlotEditor`] is the mutation surface the editing UI drives: slider
//! updates, enable toggles, radio-style preset selection, crop gestures, and
//! the full reset. Rotation changes route through the crop reprojection path
//! so the user's relative crop survives the new bounding box.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::crop::{CropSpace, DragCorner, ZoomDirection};
use crate::filters::{build_filter_chain, FilterOp};
use crate::geometry::{Point, Rect};
use crate::raster::{FilterType, Raster, RasterError};
use crate::transform::render_crop;
use crate::{FilterSettings, Preset, Slot};

/// A slider or transform field addressable through
/// [`SlotEditor::set_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentField {
    Brightness,
    Contrast,
    Saturation,
    Hue,
    Temperature,
    Tint,
    Rotation,
}

/// One of the six individually toggleable filter stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Brightness,
    Contrast,
    Saturation,
    Hue,
    Temperature,
    Tint,
}

/// Everything needed to replay one slot's edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AssignmentRecord", into = "AssignmentRecord")]
pub struct ImageAssignment {
    /// Catalog id of the source image placed in the slot.
    pub source_id: i64,
    /// Crop rect in percentage-of-bounding-box space (0..100).
    pub crop: Rect,
    /// Rotation in degrees, -180..180.
    pub rotation: f64,
    /// Presentation-time horizontal mirror.
    pub mirrored: bool,
    /// Slider values and enable flags.
    pub filters: FilterSettings,
    /// Active preset.
    pub preset: Preset,
}

impl ImageAssignment {
    /// Build the ordered filter chain for this assignment's current state.
    pub fn filter_chain(&self) -> Vec<FilterOp> {
        build_filter_chain(&self.filters, self.preset)
    }
}

/// Flat persistence form of [`ImageAssignment`]: numeric fields, booleans,
/// and one hex color string.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssignmentRecord {
    source_id: i64,
    crop_x: f64,
    crop_y: f64,
    crop_width: f64,
    crop_height: f64,
    rotation: f64,
    mirrored: bool,
    brightness: f32,
    contrast: f32,
    saturation: f32,
    hue: f32,
    temperature: f32,
    tint: f32,
    brightness_enabled: bool,
    contrast_enabled: bool,
    saturation_enabled: bool,
    hue_enabled: bool,
    temperature_enabled: bool,
    tint_enabled: bool,
    filters_enabled: bool,
    preset: String,
    preset_color: String,
}

impl From<AssignmentRecord> for ImageAssignment {
    fn from(record: AssignmentRecord) -> Self {
        // An unparseable monochrome color means the preset has no effect
        let preset = match record.preset.as_str() {
            "blackWhite" => Preset::BlackWhite,
            "sepia" => Preset::Sepia,
            "monochrome" => match Rgb::from_hex(&record.preset_color) {
                Some(color) => Preset::Monochrome(color),
                None => Preset::None,
            },
            _ => Preset::None,
        };

        Self {
            source_id: record.source_id,
            crop: Rect::new(
                record.crop_x,
                record.crop_y,
                record.crop_width,
                record.crop_height,
            ),
            rotation: record.rotation,
            mirrored: record.mirrored,
            filters: FilterSettings {
                brightness: record.brightness,
                contrast: record.contrast,
                saturation: record.saturation,
                hue: record.hue,
                temperature: record.temperature,
                tint: record.tint,
                brightness_enabled: record.brightness_enabled,
                contrast_enabled: record.contrast_enabled,
                saturation_enabled: record.saturation_enabled,
                hue_enabled: record.hue_enabled,
                temperature_enabled: record.temperature_enabled,
                tint_enabled: record.tint_enabled,
                enabled: record.filters_enabled,
            },
            preset,
        }
    }
}

impl From<ImageAssignment> for AssignmentRecord {
    fn from(assignment: ImageAssignment) -> Self {
        let preset_color = match assignment.preset {
            Preset::Monochrome(color) => color.to_hex(),
            _ => String::new(),
        };

        Self {
            source_id: assignment.source_id,
            crop_x: assignment.crop.x,
            crop_y: assignment.crop.y,
            crop_width: assignment.crop.width,
            crop_height: assignment.crop.height,
            rotation: assignment.rotation,
            mirrored: assignment.mirrored,
            brightness: assignment.filters.brightness,
            contrast: assignment.filters.contrast,
            saturation: assignment.filters.saturation,
            hue: assignment.filters.hue,
            temperature: assignment.filters.temperature,
            tint: assignment.filters.tint,
            brightness_enabled: assignment.filters.brightness_enabled,
            contrast_enabled: assignment.filters.contrast_enabled,
            saturation_enabled: assignment.filters.saturation_enabled,
            hue_enabled: assignment.filters.hue_enabled,
            temperature_enabled: assignment.filters.temperature_enabled,
            tint_enabled: assignment.filters.tint_enabled,
            filters_enabled: assignment.filters.enabled,
            preset: assignment.preset.tag().to_string(),
            preset_color,
        }
    }
}

/// Mutation surface for one slot's assignment.
///
/// Owns the assignment together with the source dimensions and the slot, so
/// every crop gesture can rebuild the geometry context for the current
/// rotation.
#[derive(Debug, Clone)]
pub struct SlotEditor {
    assignment: ImageAssignment,
    source_width: u32,
    source_height: u32,
    slot: Slot,
}

impl SlotEditor {
    /// Place a source image into a slot: crop initialized to the maximal
    /// valid rect at the slot's aspect ratio, rotation 0, everything else at
    /// defaults.
    pub fn new(source_id: i64, source_width: u32, source_height: u32, slot: Slot) -> Self {
        let space = CropSpace::new(
            source_width as f64,
            source_height as f64,
            0.0,
            slot.aspect_ratio(),
        );

        Self {
            assignment: ImageAssignment {
                source_id,
                crop: space.initial_crop(),
                rotation: 0.0,
                mirrored: false,
                filters: FilterSettings::default(),
                preset: Preset::None,
            },
            source_width,
            source_height,
            slot,
        }
    }

    /// Resume editing a persisted assignment.
    pub fn from_assignment(
        assignment: ImageAssignment,
        source_width: u32,
        source_height: u32,
        slot: Slot,
    ) -> Self {
        Self {
            assignment,
            source_width,
            source_height,
            slot,
        }
    }

    pub fn assignment(&self) -> &ImageAssignment {
        &self.assignment
    }

    pub fn into_assignment(self) -> ImageAssignment {
        self.assignment
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Geometry context at the current rotation.
    pub fn space(&self) -> CropSpace {
        CropSpace::new(
            self.source_width as f64,
            self.source_height as f64,
            self.assignment.rotation,
            self.slot.aspect_ratio(),
        )
    }

    /// Display-space crop for drawing interactive handles, in pixels against
    /// the current bounding box.
    pub fn crop_px(&self) -> Rect {
        self.assignment.crop.from_percentage(self.space().bounds)
    }

    // ===== Adjustment operations =====

    /// Update a slider or transform field. Setting rotation runs the crop
    /// reprojection path.
    pub fn set_value(&mut self, field: AdjustmentField, value: f64) {
        match field {
            AdjustmentField::Brightness => self.assignment.filters.brightness = value as f32,
            AdjustmentField::Contrast => self.assignment.filters.contrast = value as f32,
            AdjustmentField::Saturation => self.assignment.filters.saturation = value as f32,
            AdjustmentField::Hue => self.assignment.filters.hue = value as f32,
            AdjustmentField::Temperature => self.assignment.filters.temperature = value as f32,
            AdjustmentField::Tint => self.assignment.filters.tint = value as f32,
            AdjustmentField::Rotation => self.set_rotation(value),
        }
    }

    /// Change the rotation, carrying the crop across bounding boxes.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.assignment.rotation = degrees;
        let space = self.space();
        self.assignment.crop = space.reproject(self.assignment.crop);
    }

    /// Flip one stage's individual enable flag.
    pub fn toggle_filter(&mut self, kind: FilterKind) {
        let filters = &mut self.assignment.filters;
        match kind {
            FilterKind::Brightness => filters.brightness_enabled = !filters.brightness_enabled,
            FilterKind::Contrast => filters.contrast_enabled = !filters.contrast_enabled,
            FilterKind::Saturation => filters.saturation_enabled = !filters.saturation_enabled,
            FilterKind::Hue => filters.hue_enabled = !filters.hue_enabled,
            FilterKind::Temperature => filters.temperature_enabled = !filters.temperature_enabled,
            FilterKind::Tint => filters.tint_enabled = !filters.tint_enabled,
        }
    }

    /// Flip the master filter toggle.
    pub fn toggle_filters_enabled(&mut self) {
        self.assignment.filters.enabled = !self.assignment.filters.enabled;
    }

    /// Radio-style preset selection: picking a preset deselects the others;
    /// picking the currently active one clears back to `None`. Slider values
    /// are never touched.
    pub fn set_preset(&mut self, preset: Preset) {
        self.assignment.preset = if self.assignment.preset == preset {
            Preset::None
        } else {
            preset
        };
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.assignment.mirrored = mirrored;
    }

    /// Restore every filter value to 0, all enable flags to true, the preset
    /// to `None`, rotation to 0, mirror to false, and recompute the maximal
    /// crop at the slot's aspect ratio.
    pub fn reset_all(&mut self) {
        self.assignment.filters = FilterSettings::default();
        self.assignment.preset = Preset::None;
        self.assignment.rotation = 0.0;
        self.assignment.mirrored = false;
        self.assignment.crop = self.space().initial_crop();
    }

    // ===== Crop gestures =====

    /// Translate the crop by a pointer delta in display pixels.
    pub fn drag_move(&mut self, dx: f64, dy: f64) {
        let space = self.space();
        self.assignment.crop = space.move_by(self.assignment.crop, dx, dy);
    }

    /// Resize by dragging a corner handle to a pointer position in display
    /// pixels.
    pub fn drag_resize(&mut self, corner: DragCorner, x: f64, y: f64) {
        let space = self.space();
        self.assignment.crop = space.resize_to(self.assignment.crop, corner, Point::new(x, y));
    }

    /// Scale the crop one wheel step about its center.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        let space = self.space();
        self.assignment.crop = space.zoom(self.assignment.crop, direction);
    }

    // ===== Output =====

    /// The ordered filter chain for the current state.
    pub fn filter_chain(&self) -> Vec<FilterOp> {
        self.assignment.filter_chain()
    }

    /// Rasterize the current crop from `source` and apply the filter chain.
    ///
    /// `output_size` requests resampling to an explicit size (export);
    /// `None` keeps the native crop size (interactive preview). Mirroring is
    /// not applied here - the surface flips at presentation time.
    pub fn render(
        &self,
        source: &Raster,
        output_size: Option<(u32, u32)>,
        filter: FilterType,
    ) -> Result<Raster, RasterError> {
        let mut raster = render_crop(
            source,
            self.assignment.rotation,
            self.assignment.crop,
            output_size,
            filter,
        )?;
        crate::filters::apply_filter_chain(&mut raster.pixels, &self.filter_chain());
        Ok(raster)
    }
}
