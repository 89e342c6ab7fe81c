//! The rotate-then-crop render pass.
//!
//! Given the source raster, rotation angle, and a percentage crop rect:
//!
//! 1. Rasterize the rotation into the bounding-box canvas
//! 2. Convert the percentage crop into pixels against that bounding box
//! 3. Extract the crop region
//! 4. Resample to the requested output size, if one was given
//!
//! Mirroring is deliberately absent: it is a presentation-time flip
//! (`Raster::flip_horizontal`) so crop and rotation coordinates stay
//! mirror-invariant.

use crate::geometry::{BoundingBox, Rect};
use crate::raster::{resize, FilterType, Raster, RasterError};
use crate::transform::crop::extract_region;
use crate::transform::rotation::rasterize_rotation;

/// Produce the rotated, cropped raster for one assignment.
///
/// # Arguments
///
/// * `source` - Decoded source pixels
/// * `rotation_degrees` - Rotation about the source center
/// * `crop_pct` - Crop rect in percentage-of-bounding-box space (0..100)
/// * `output_size` - Explicit output dimensions (export); `None` keeps the
///   native crop size
/// * `filter` - Sampling quality for rotation and resampling
///
/// # Errors
///
/// Returns `RasterError::InvalidDimensions` if `output_size` has a zero
/// dimension.
pub fn render_crop(
    source: &Raster,
    rotation_degrees: f64,
    crop_pct: Rect,
    output_size: Option<(u32, u32)>,
    filter: FilterType,
) -> Result<Raster, RasterError> {
    let rotated = rasterize_rotation(source, rotation_degrees, filter);

    let bounds = BoundingBox::new(rotated.width as f64, rotated.height as f64);
    let crop_px = crop_pct.from_percentage(bounds);

    let cropped = extract_region(&rotated, crop_px);

    match output_size {
        Some((width, height)) if width != cropped.width || height != cropped.height => {
            resize(&cropped, width, height, filter)
        }
        _ => Ok(cropped),
    }
}
