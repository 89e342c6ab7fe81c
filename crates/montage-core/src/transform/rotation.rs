//! Rotation rasterization into the bounding-box canvas.
//!
//! The output raster is sized to the rotation's bounding box and the source
//! is composited into it centered, rotated about its own center. Sampling
//! uses inverse mapping: for each output pixel the contributing source
//! position is computed and interpolated.
//!
//! The forward map matches `geometry::Polygon::footprint`, so a crop rect
//! that passed the containment test samples real pixels here.

use crate::geometry::BoundingBox;
use crate::raster::{FilterType, Raster};

/// Rasterize a rotation of `source` by `degrees` about its center.
///
/// The canvas expands to the rotation's bounding box; uncovered corners are
/// filled black (they lie outside the footprint polygon, so a valid crop
/// never reaches them).
///
/// # Arguments
///
/// * `source` - Source raster
/// * `degrees` - Rotation angle in degrees
/// * `filter` - Sampling quality: `Bilinear` for interactive preview,
///   `Lanczos3` for export
pub fn rasterize_rotation(source: &Raster, degrees: f64, filter: FilterType) -> Raster {
    // Fast path: no rotation needed
    if degrees.abs() < 0.001 {
        return source.clone();
    }

    let bounds = BoundingBox::of_rotated(source.width as f64, source.height as f64, degrees);
    let dst_w = (bounds.width.round() as u32).max(1);
    let dst_h = (bounds.height.round() as u32).max(1);

    // Inverse of the forward map used by the footprint polygon
    let radians = -degrees.to_radians();
    let (sin, cos) = radians.sin_cos();

    let src_cx = source.width as f64 / 2.0;
    let src_cy = source.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; (dst_w * dst_h * 3) as usize];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 - dst_cx;
            let dy = dst_y as f64 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let pixel = match filter {
                FilterType::Nearest => sample_nearest(source, src_x, src_y),
                FilterType::Bilinear => sample_bilinear(source, src_x, src_y),
                FilterType::Lanczos3 => sample_lanczos3(source, src_x, src_y),
            };

            let dst_idx = ((dst_y * dst_w + dst_x) * 3) as usize;
            output[dst_idx] = pixel[0];
            output[dst_idx + 1] = pixel[1];
            output[dst_idx + 2] = pixel[2];
        }
    }

    Raster {
        width: dst_w,
        height: dst_h,
        pixels: output,
    }
}

/// Get a pixel as [f64; 3] at the given coordinates.
#[inline]
fn get_pixel_f64(raster: &Raster, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * raster.width as usize + px) * 3;
    [
        raster.pixels[idx] as f64,
        raster.pixels[idx + 1] as f64,
        raster.pixels[idx + 2] as f64,
    ]
}

/// Sample the nearest source pixel; black outside the source.
fn sample_nearest(raster: &Raster, x: f64, y: f64) -> [u8; 3] {
    let px = x.round();
    let py = y.round();
    if px < 0.0 || px >= raster.width as f64 || py < 0.0 || py >= raster.height as f64 {
        return [0, 0, 0];
    }

    let idx = (py as usize * raster.width as usize + px as usize) * 3;
    [
        raster.pixels[idx],
        raster.pixels[idx + 1],
        raster.pixels[idx + 2],
    ]
}

/// Sample with bilinear interpolation over the 4 nearest pixels.
fn sample_bilinear(raster: &Raster, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (raster.width as i64, raster.height as i64);

    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(raster, x0, y0);
    let p10 = get_pixel_f64(raster, x1, y0);
    let p01 = get_pixel_f64(raster, x0, y1);
    let p11 = get_pixel_f64(raster, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Sample with Lanczos3 interpolation over a 6x6 neighborhood.
///
/// Falls back to bilinear near the edges where the kernel would run off the
/// raster.
fn sample_lanczos3(raster: &Raster, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (raster.width as i64, raster.height as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(raster, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            if px >= 0 && px < w && py >= 0 && py < h {
                let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
                let pixel = get_pixel_f64(raster, px as usize, py as usize);
                sum[0] += pixel[0] * weight;
                sum[1] += pixel[1] * weight;
                sum[2] += pixel[2] * weight;
                weight_sum += weight;
            }
        }
    }

    let mut result = [0u8; 3];
    if weight_sum > 0.0 {
        for i in 0..3 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// Lanczos kernel: sinc(x) * sinc(x/a) inside the window, 0 outside.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
