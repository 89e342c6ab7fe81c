//! Ordered per-pixel tone and color operations.
//!
//! ## Chain Order
//! 1. Brightness
//! 2. Contrast
//! 3. Hue + saturation (one combined stage)
//! 4. Temperature + tint (one combined stage)
//! 5. Preset (black & white, sepia, or monochrome)
//!
//! The chain is built from [`FilterSettings`] and a [`Preset`]: stages whose
//! values are zero or whose enable flag is off are skipped, and the whole
//! chain is empty when the master toggle is off. Application order never
//! varies.

use crate::color::{hsl_to_rgb, rgb_to_hsl, Hsl, Rgb};
use crate::luminance::{luminance_u8, LUMA_B, LUMA_G, LUMA_R};
use crate::{FilterSettings, Preset};

/// Saturation scale applied to the monochrome target color.
const MONOCHROME_SATURATION: f32 = 0.8;

/// One stage of the filter chain, carrying its resolved parameters.
///
/// Serializes tagged, so the compositing surface can consume the ordered
/// operation list directly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum FilterOp {
    /// Additive brightness shift; value is the slider scaled to [-1, 1].
    Brightness { value: f32 },
    /// Contrast; the slider value (-100..100) is used directly.
    Contrast { value: f32 },
    /// Combined hue rotation (degrees) and saturation gain
    /// (slider scaled to [-2, 2], applied as 2^value).
    HueSaturation { hue: f32, saturation: f32 },
    /// Combined white-balance shift; raw slider values (-100..100).
    WhiteBalance { temperature: f32, tint: f32 },
    /// Replace RGB with BT.601 luminance.
    BlackWhite,
    /// Fixed sepia matrix.
    Sepia,
    /// Re-tint toward the target color, preserving per-pixel lightness.
    Monochrome { color: Rgb },
}

/// Build the ordered operation list for the given settings and preset.
///
/// Returns an empty chain when the master toggle is off. The preset stage,
/// when present, is always last.
pub fn build_filter_chain(settings: &FilterSettings, preset: Preset) -> Vec<FilterOp> {
    let mut chain = Vec::new();

    if !settings.enabled {
        return chain;
    }

    if settings.brightness_enabled && settings.brightness != 0.0 {
        chain.push(FilterOp::Brightness {
            value: settings.brightness / 100.0,
        });
    }

    if settings.contrast_enabled && settings.contrast != 0.0 {
        chain.push(FilterOp::Contrast {
            value: settings.contrast,
        });
    }

    let hue = if settings.hue_enabled {
        settings.hue
    } else {
        0.0
    };
    let saturation = if settings.saturation_enabled {
        settings.saturation
    } else {
        0.0
    };
    if hue != 0.0 || saturation != 0.0 {
        chain.push(FilterOp::HueSaturation {
            hue,
            saturation: saturation / 50.0,
        });
    }

    let temperature = if settings.temperature_enabled {
        settings.temperature
    } else {
        0.0
    };
    let tint = if settings.tint_enabled {
        settings.tint
    } else {
        0.0
    };
    if temperature != 0.0 || tint != 0.0 {
        chain.push(FilterOp::WhiteBalance { temperature, tint });
    }

    match preset {
        Preset::None => {}
        Preset::BlackWhite => chain.push(FilterOp::BlackWhite),
        Preset::Sepia => chain.push(FilterOp::Sepia),
        Preset::Monochrome(color) => chain.push(FilterOp::Monochrome { color }),
    }

    chain
}

/// Apply the chain to RGB pixel data in place, one full pass per operation.
///
/// # Arguments
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `chain` - Operations from [`build_filter_chain`]
pub fn apply_filter_chain(pixels: &mut [u8], chain: &[FilterOp]) {
    for op in chain {
        apply_op(pixels, op);
    }
}

fn apply_op(pixels: &mut [u8], op: &FilterOp) {
    match *op {
        FilterOp::Brightness { value } => apply_brightness(pixels, value),
        FilterOp::Contrast { value } => apply_contrast(pixels, value),
        FilterOp::HueSaturation { hue, saturation } => apply_hue_saturation(pixels, hue, saturation),
        FilterOp::WhiteBalance { temperature, tint } => {
            apply_white_balance(pixels, temperature, tint)
        }
        FilterOp::BlackWhite => apply_black_white(pixels),
        FilterOp::Sepia => apply_sepia(pixels),
        FilterOp::Monochrome { color } => apply_monochrome(pixels, color),
    }
}

#[inline]
fn clamp_channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Additive brightness: each channel shifted by value * 255.
fn apply_brightness(pixels: &mut [u8], value: f32) {
    let shift = value * 255.0;
    for chunk in pixels.chunks_exact_mut(3) {
        chunk[0] = clamp_channel(chunk[0] as f32 + shift);
        chunk[1] = clamp_channel(chunk[1] as f32 + shift);
        chunk[2] = clamp_channel(chunk[2] as f32 + shift);
    }
}

/// Contrast about the mid-gray point.
///
/// Formula: `output = (input/255 - 0.5) * ((value + 100) / 100)^2 + 0.5`
fn apply_contrast(pixels: &mut [u8], value: f32) {
    let adjust = ((value + 100.0) / 100.0).powi(2);
    for chunk in pixels.chunks_exact_mut(3) {
        for c in chunk.iter_mut() {
            let v = (*c as f32 / 255.0 - 0.5) * adjust + 0.5;
            *c = clamp_channel(v * 255.0);
        }
    }
}

/// Combined hue rotation and saturation gain via the luma-basis rotation
/// matrix.
///
/// The matrix rotates the chroma plane by `hue` degrees and scales it by
/// `2^saturation`, leaving luma untouched when both are neutral.
fn apply_hue_saturation(pixels: &mut [u8], hue: f32, saturation: f32) {
    let gain = 2f32.powf(saturation);
    let angle = (hue % 360.0 + 360.0) % 360.0;
    let (sin, cos) = angle.to_radians().sin_cos();
    let vsu = gain * cos;
    let vsw = gain * sin;

    // Chroma rotation in the BT.601 luma basis; rows map output R, G, B
    let rr = LUMA_R + 0.701 * vsu + 0.168 * vsw;
    let rg = LUMA_G - 0.587 * vsu + 0.330 * vsw;
    let rb = LUMA_B - 0.114 * vsu - 0.497 * vsw;

    let gr = LUMA_R - 0.299 * vsu - 0.328 * vsw;
    let gg = LUMA_G + 0.413 * vsu + 0.035 * vsw;
    let gb = LUMA_B - 0.114 * vsu + 0.292 * vsw;

    let br = LUMA_R - 0.300 * vsu + 1.250 * vsw;
    let bg = LUMA_G - 0.588 * vsu - 1.050 * vsw;
    let bb = LUMA_B + 0.886 * vsu - 0.203 * vsw;

    for chunk in pixels.chunks_exact_mut(3) {
        let r = chunk[0] as f32;
        let g = chunk[1] as f32;
        let b = chunk[2] as f32;

        chunk[0] = clamp_channel(rr * r + rg * g + rb * b);
        chunk[1] = clamp_channel(gr * r + gg * g + gb * b);
        chunk[2] = clamp_channel(br * r + bg * g + bb * b);
    }
}

/// Combined temperature and tint shifts.
///
/// Warm (temperature > 0) pushes red up and blue down; cool is the
/// channel-swapped inverse. Magenta tint (tint > 0) raises red and blue and
/// lowers green; green tint is the inverse.
fn apply_white_balance(pixels: &mut [u8], temperature: f32, tint: f32) {
    let warm = (temperature.max(0.0)) / 100.0;
    let cool = (-temperature.min(0.0)) / 100.0;
    let magenta = (tint.max(0.0)) / 100.0;
    let green = (-tint.min(0.0)) / 100.0;

    let dr = warm * 45.0 - cool * 30.0 + magenta * 30.0 - green * 25.0;
    let dg = -magenta * 40.0 + green * 45.0;
    let db = -warm * 30.0 + cool * 45.0 + magenta * 30.0 - green * 25.0;

    for chunk in pixels.chunks_exact_mut(3) {
        chunk[0] = clamp_channel(chunk[0] as f32 + dr);
        chunk[1] = clamp_channel(chunk[1] as f32 + dg);
        chunk[2] = clamp_channel(chunk[2] as f32 + db);
    }
}

/// Replace each pixel with its BT.601 luminance.
fn apply_black_white(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(3) {
        let lum = luminance_u8(chunk[0], chunk[1], chunk[2]);
        chunk[0] = lum;
        chunk[1] = lum;
        chunk[2] = lum;
    }
}

/// The fixed sepia matrix.
fn apply_sepia(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(3) {
        let r = chunk[0] as f32;
        let g = chunk[1] as f32;
        let b = chunk[2] as f32;

        chunk[0] = clamp_channel(0.393 * r + 0.769 * g + 0.189 * b);
        chunk[1] = clamp_channel(0.349 * r + 0.686 * g + 0.168 * b);
        chunk[2] = clamp_channel(0.272 * r + 0.534 * g + 0.131 * b);
    }
}

/// Re-tint toward the target color: each pixel takes the target's hue and
/// saturation (saturation scaled down) while keeping its own lightness.
fn apply_monochrome(pixels: &mut [u8], color: Rgb) {
    let target = rgb_to_hsl(color);
    let hue = target.h;
    let saturation = target.s * MONOCHROME_SATURATION;

    for chunk in pixels.chunks_exact_mut(3) {
        let pixel = rgb_to_hsl(Rgb::new(chunk[0], chunk[1], chunk[2]));
        let tinted = hsl_to_rgb(Hsl {
            h: hue,
            s: saturation,
            l: pixel.l,
        });
        chunk[0] = tinted.r;
        chunk[1] = tinted.g;
        chunk[2] = tinted.b;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
