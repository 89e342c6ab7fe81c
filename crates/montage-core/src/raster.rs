//! Pixel buffer type and resampling operations.
//!
//! The compositing surface hands this core already-decoded RGB pixels; all
//! pipeline stages (rotation, crop extraction, filtering) operate on the
//! `Raster` type defined here. Resampling delegates to the `image` crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for raster operations.
#[derive(Debug, Error)]
pub enum RasterError {
    /// An output dimension of zero was requested.
    #[error("Invalid raster dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),

    /// The pixel buffer could not be converted for resampling.
    #[error("Corrupted pixel buffer: {0}")]
    CorruptedBuffer(String),
}

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality) - good for preview.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality) - good for export.
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An RGB raster with 8-bit channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height * 3) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Raster from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Return a horizontally mirrored copy.
    ///
    /// Mirroring is a presentation-time transform: it is intentionally not
    /// part of the rotate-then-crop pipeline, so crop and rotation
    /// coordinates stay mirror-invariant.
    pub fn flip_horizontal(&self) -> Raster {
        let mut output = vec![0u8; self.pixels.len()];
        let w = self.width as usize;

        for y in 0..self.height as usize {
            let row = y * w * 3;
            for x in 0..w {
                let src = row + x * 3;
                let dst = row + (w - 1 - x) * 3;
                output[dst] = self.pixels[src];
                output[dst + 1] = self.pixels[src + 1];
                output[dst + 2] = self.pixels[src + 2];
            }
        }

        Raster {
            width: self.width,
            height: self.height,
            pixels: output,
        }
    }
}

/// Resize a raster to exact dimensions.
///
/// # Errors
///
/// Returns `RasterError::InvalidDimensions` if either target dimension is zero.
pub fn resize(
    raster: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions(width, height));
    }

    // Fast path: if dimensions match, just clone
    if raster.width == width && raster.height == height {
        return Ok(raster.clone());
    }

    let rgb_image = raster
        .to_rgb_image()
        .ok_or_else(|| RasterError::CorruptedBuffer("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(Raster::from_rgb_image(resized))
}

/// Resize a raster to fit within a maximum edge length while preserving
/// aspect ratio. Rasters already within the limit are returned unchanged.
pub fn resize_to_fit(
    raster: &Raster,
    max_edge: u32,
    filter: FilterType,
) -> Result<Raster, RasterError> {
    if max_edge == 0 {
        return Err(RasterError::InvalidDimensions(max_edge, max_edge));
    }

    let (src_width, src_height) = (raster.width, raster.height);

    // If already fits, just clone
    if src_width <= max_edge && src_height <= max_edge {
        return Ok(raster.clone());
    }

    let (new_width, new_height) = fit_dimensions(src_width, src_height, max_edge);
    resize(raster, new_width, new_height, filter)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_raster_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let raster = Raster::new(100, 50, pixels);

        assert_eq!(raster.width, 100);
        assert_eq!(raster.height, 50);
        assert_eq!(raster.pixel_count(), 5000);
        assert_eq!(raster.byte_size(), 15000);
        assert!(!raster.is_empty());
    }

    #[test]
    fn test_raster_empty() {
        let raster = Raster::new(0, 0, vec![]);
        assert!(raster.is_empty());
    }

    #[test]
    fn test_flip_horizontal() {
        // 2x1 raster: red pixel then blue pixel
        let raster = Raster::new(2, 1, vec![255, 0, 0, 0, 0, 255]);
        let flipped = raster.flip_horizontal();
        assert_eq!(flipped.pixels, vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn test_flip_horizontal_involution() {
        let raster = gradient_raster(7, 5);
        assert_eq!(raster.flip_horizontal().flip_horizontal(), raster);
    }

    #[test]
    fn test_resize_basic() {
        let raster = gradient_raster(100, 50);
        let resized = resize(&raster, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let raster = gradient_raster(100, 50);
        let resized = resize(&raster, 100, 50, FilterType::Bilinear).unwrap();

        assert_eq!(resized.pixels, raster.pixels);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let raster = gradient_raster(100, 50);

        assert!(resize(&raster, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&raster, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let raster = gradient_raster(6000, 4000);
        let resized = resize_to_fit(&raster, 2560, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width, 2560);
        assert_eq!(resized.height, 1707); // 4000 * (2560/6000) ≈ 1707
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let raster = gradient_raster(4000, 6000);
        let resized = resize_to_fit(&raster, 2560, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.height, 2560);
        assert_eq!(resized.width, 1707);
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let raster = gradient_raster(100, 50);
        let resized = resize_to_fit(&raster, 256, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_fit_dimensions() {
        assert_eq!(fit_dimensions(6000, 4000, 2560), (2560, 1707));
        assert_eq!(fit_dimensions(4000, 6000, 2560), (1707, 2560));
        assert_eq!(fit_dimensions(4000, 4000, 256), (256, 256));
        assert_eq!(fit_dimensions(0, 0, 256), (0, 0));
    }

    #[test]
    fn test_all_filter_types() {
        let raster = gradient_raster(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&raster, 50, 25, filter).unwrap();
            assert_eq!(resized.width, 50);
            assert_eq!(resized.height, 25);
        }
    }

    #[test]
    fn test_raster_error_display() {
        let err = RasterError::InvalidDimensions(0, 50);
        assert_eq!(err.to_string(), "Invalid raster dimensions: 0x50");
    }
}
