//! Crop region extraction.
//!
//! Extracts a pixel-space rect from a raster. The render pipeline converts
//! the assignment's percentage crop against the rotated bounding box before
//! calling in here, so this stage only deals in pixels.

use crate::geometry::Rect;
use crate::raster::Raster;

/// Extract the region under `rect` (pixel coordinates) into a new raster.
///
/// # Behavior
///
/// - Coordinates beyond the raster bounds are clamped
/// - Minimum output dimension is 1x1 pixels
/// - A rect covering the whole raster returns a copy
pub fn extract_region(raster: &Raster, rect: Rect) -> Raster {
    // Fast path: full-raster rect returns a clone
    if rect.x <= 0.0
        && rect.y <= 0.0
        && rect.width >= raster.width as f64
        && rect.height >= raster.height as f64
    {
        return raster.clone();
    }

    let px_left = (rect.x.max(0.0).round() as u32).min(raster.width.saturating_sub(1));
    let px_top = (rect.y.max(0.0).round() as u32).min(raster.height.saturating_sub(1));
    let px_right = (px_left + rect.width.max(0.0).round() as u32).min(raster.width);
    let px_bottom = (px_top + rect.height.max(0.0).round() as u32).min(raster.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let mut output = vec![0u8; (out_width * out_height * 3) as usize];

    // Copy pixel data row by row
    for y in 0..out_height {
        let src_y = px_top + y;
        let src_row_start = ((src_y * raster.width + px_left) * 3) as usize;
        let dst_row_start = (y * out_width * 3) as usize;
        let row_len = (out_width * 3) as usize;

        output[dst_row_start..dst_row_start + row_len]
            .copy_from_slice(&raster.pixels[src_row_start..src_row_start + row_len]);
    }

    Raster {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Raster where each pixel encodes its position.
    fn position_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_full_region_returns_copy() {
        let raster = position_raster(100, 100);
        let result = extract_region(&raster, Rect::new(0.0, 0.0, 100.0, 100.0));

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 100);
        assert_eq!(result.pixels, raster.pixels);
    }

    #[test]
    fn test_center_region() {
        let raster = position_raster(10, 10);
        let result = extract_region(&raster, Rect::new(2.0, 2.0, 6.0, 6.0));

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // First pixel comes from (2, 2): value 2 * 10 + 2 = 22
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_region_clamps_to_bounds() {
        let raster = position_raster(10, 10);
        let result = extract_region(&raster, Rect::new(8.0, 8.0, 5.0, 5.0));

        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
    }

    #[test]
    fn test_negative_origin_clamps_to_zero() {
        let raster = position_raster(100, 100);
        let result = extract_region(&raster, Rect::new(-10.0, -10.0, 50.0, 50.0));

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 50);
        assert_eq!(result.pixels[0], 0);
    }

    #[test]
    fn test_tiny_region_clamps_to_one_pixel() {
        let raster = position_raster(100, 100);
        let result = extract_region(&raster, Rect::new(99.0, 99.0, 0.1, 0.1));

        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
    }

    #[test]
    fn test_fractional_coordinates_round() {
        let raster = position_raster(10, 10);
        let result = extract_region(&raster, Rect::new(2.6, 2.4, 4.0, 4.0));

        // x rounds to 3, y rounds to 2
        assert_eq!(result.pixels[0], 23);
        assert_eq!(result.width, 4);
    }

    #[test]
    fn test_rectangular_strip() {
        let raster = position_raster(200, 100);
        let result = extract_region(&raster, Rect::new(0.0, 0.0, 50.0, 100.0));

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 100);
    }
}
