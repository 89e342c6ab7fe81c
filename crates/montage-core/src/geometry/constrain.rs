//! Area-constraint solving: shrinking a crop rect until it fits the
//! footprint polygon.
//!
//! Validity is monotonic under center scaling (a rect valid at factor f is
//! valid at every smaller factor), so a binary search over the shrink factor
//! converges to the largest valid crop. The search is iteration-bounded and
//! always terminates; when even the smallest factor fails, a minimum centered
//! rect is produced instead of an error.

use crate::geometry::{Polygon, Rect};

/// Smallest uniform shrink factor the search will try.
const SHRINK_MIN: f64 = 0.01;

/// Convergence threshold for the shrink-factor search. A [0.01, 1.0] span at
/// this precision resolves in about ten iterations.
const SHRINK_PRECISION: f64 = 0.001;

/// Fallback crop size as a fraction of the polygon's bounding extent.
pub const MIN_CROP_FRACTION: f64 = 0.05;

/// Constrain a rect into the polygon, preserving its center and aspect.
///
/// Already-valid rects are returned unchanged. Invalid rects are uniformly
/// shrunk about their own center by the largest factor in
/// `[SHRINK_MIN, 1.0]` that makes every corner land inside the polygon.
/// When no factor in range works the result is the minimum crop: a rect
/// `MIN_CROP_FRACTION` of the bounding extent wide, at aspect `ar`, centered
/// on the polygon centroid.
///
/// Never fails; an aspect ratio of zero or below is a no-op.
pub fn constrain_to_valid_area(rect: Rect, polygon: &Polygon, ar: f64) -> Rect {
    if ar <= 0.0 {
        return rect;
    }
    if polygon.contains_rect(&rect) {
        return rect;
    }

    if !polygon.contains_rect(&rect.scaled_from_center(SHRINK_MIN)) {
        return minimum_crop(polygon, ar);
    }

    let mut lo = SHRINK_MIN;
    let mut hi = 1.0;
    while hi - lo > SHRINK_PRECISION {
        let mid = (lo + hi) / 2.0;
        if polygon.contains_rect(&rect.scaled_from_center(mid)) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    rect.scaled_from_center(lo)
}

/// Largest crop at aspect ratio `ar` that fits the polygon.
///
/// Starts from the biggest aspect-correct rect inside the polygon's bounding
/// extent, centered on the centroid, then applies the same shrink search to
/// guarantee validity.
pub fn max_crop_at_aspect(polygon: &Polygon, ar: f64) -> Rect {
    let extent = polygon.extent();
    if ar <= 0.0 {
        return Rect::centered_at(polygon.centroid(), extent.width, extent.height);
    }

    let (width, height) = if extent.width / ar <= extent.height {
        (extent.width, extent.width / ar)
    } else {
        (extent.height * ar, extent.height)
    };

    let start = Rect::centered_at(polygon.centroid(), width, height);
    constrain_to_valid_area(start, polygon, ar)
}

/// The fallback crop: `MIN_CROP_FRACTION` of the bounding extent, at aspect
/// `ar`, centered on the centroid.
///
/// Extreme aspect ratios can push even the minimum rect past the footprint;
/// a bounded halving loop brings it inside (the centroid is interior, so a
/// small enough centered rect always fits).
fn minimum_crop(polygon: &Polygon, ar: f64) -> Rect {
    let extent = polygon.extent();
    let width = extent.width * MIN_CROP_FRACTION;
    let height = width / ar;

    let mut rect = Rect::centered_at(polygon.centroid(), width, height);
    for _ in 0..20 {
        if polygon.contains_rect(&rect) {
            break;
        }
        rect = rect.scaled_from_center(0.5);
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rect_unchanged() {
        let poly = Polygon::footprint(100.0, 100.0, 0.0);
        let rect = Rect::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(constrain_to_valid_area(rect, &poly, 1.0), rect);
    }

    #[test]
    fn test_invalid_rect_becomes_valid() {
        let poly = Polygon::footprint(100.0, 100.0, 45.0);
        let extent = poly.extent();
        // The full bounding extent is invalid at 45°
        let rect = Rect::new(0.0, 0.0, extent.width, extent.height);
        assert!(!poly.contains_rect(&rect));

        let constrained = constrain_to_valid_area(rect, &poly, 1.0);
        assert!(poly.contains_rect(&constrained));
    }

    #[test]
    fn test_constrained_preserves_center_and_aspect() {
        let poly = Polygon::footprint(200.0, 100.0, 30.0);
        let extent = poly.extent();
        let rect = Rect::new(0.0, 0.0, extent.width, extent.height);

        let constrained = constrain_to_valid_area(rect, &poly, rect.aspect_ratio());
        let c1 = rect.center();
        let c2 = constrained.center();
        assert!((c1.x - c2.x).abs() < 1e-6);
        assert!((c1.y - c2.y).abs() < 1e-6);
        assert!((constrained.aspect_ratio() - rect.aspect_ratio()).abs() < 1e-6);
    }

    #[test]
    fn test_converges_to_largest_valid_factor() {
        let poly = Polygon::footprint(100.0, 100.0, 45.0);
        let extent = poly.extent();
        let rect = Rect::centered_at(poly.centroid(), extent.width, extent.height);

        let constrained = constrain_to_valid_area(rect, &poly, 1.0);

        // Slightly larger than the converged result must be invalid
        let slightly_larger = constrained.scaled_from_center(1.0 + 10.0 * 0.001);
        assert!(
            !poly.contains_rect(&slightly_larger),
            "search stopped early: {:?}",
            constrained
        );
    }

    #[test]
    fn test_off_center_rect_falls_back_to_minimum() {
        let poly = Polygon::footprint(100.0, 100.0, 45.0);
        // A rect whose center sits outside the polygon can never shrink into
        // validity about its own center
        let rect = Rect::new(-50.0, -50.0, 40.0, 40.0);
        assert!(!poly.contains_rect(&rect.scaled_from_center(0.01)));

        let fallback = constrain_to_valid_area(rect, &poly, 1.0);
        let extent = poly.extent();
        assert!((fallback.width - extent.width * MIN_CROP_FRACTION).abs() < 1e-9);
        assert!((fallback.aspect_ratio() - 1.0).abs() < 1e-9);
        let c = fallback.center();
        let centroid = poly.centroid();
        assert!((c.x - centroid.x).abs() < 1e-9);
        assert!((c.y - centroid.y).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_aspect_is_noop() {
        let poly = Polygon::footprint(100.0, 100.0, 45.0);
        let rect = Rect::new(0.0, 0.0, 500.0, 500.0);
        assert_eq!(constrain_to_valid_area(rect, &poly, 0.0), rect);
        assert_eq!(constrain_to_valid_area(rect, &poly, -1.0), rect);
    }

    #[test]
    fn test_max_crop_zero_rotation_fills_image() {
        // At rotation 0 the footprint is the whole image, so a crop at the
        // image's own aspect fills it completely
        let poly = Polygon::footprint(400.0, 300.0, 0.0);
        let crop = max_crop_at_aspect(&poly, 4.0 / 3.0);

        assert!((crop.width - 400.0).abs() < 1.0, "width {}", crop.width);
        assert!((crop.height - 300.0).abs() < 1.0, "height {}", crop.height);
    }

    #[test]
    fn test_max_crop_constrained_by_narrow_aspect() {
        let poly = Polygon::footprint(400.0, 300.0, 0.0);
        // Tall slot: height binds
        let crop = max_crop_at_aspect(&poly, 0.5);
        assert!((crop.height - 300.0).abs() < 1.0);
        assert!((crop.width - 150.0).abs() < 1.0);
    }

    #[test]
    fn test_max_crop_valid_at_45_degrees() {
        let poly = Polygon::footprint(400.0, 300.0, 45.0);
        let crop = max_crop_at_aspect(&poly, 1.0);
        assert!(poly.contains_rect(&crop));
        assert!(crop.width > 0.0 && crop.height > 0.0);
    }

    #[test]
    fn test_max_crop_deterministic() {
        let poly = Polygon::footprint(357.0, 241.0, 23.5);
        let a = max_crop_at_aspect(&poly, 16.0 / 9.0);
        let b = max_crop_at_aspect(&poly, 16.0 / 9.0);
        assert_eq!(a, b);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dims_strategy() -> impl Strategy<Value = (f64, f64)> {
        (50.0f64..=4000.0, 50.0f64..=4000.0)
    }

    proptest! {
        /// Property: constrain_to_valid_area always returns a valid rect.
        #[test]
        fn prop_constrain_always_valid(
            (w, h) in dims_strategy(),
            degrees in -180.0f64..=180.0,
            (rx, ry) in (-0.5f64..=1.0, -0.5f64..=1.0),
            (rw, rh) in (0.05f64..=1.5, 0.05f64..=1.5),
        ) {
            let poly = Polygon::footprint(w, h, degrees);
            let extent = poly.extent();
            let rect = Rect::new(
                rx * extent.width,
                ry * extent.height,
                rw * extent.width,
                rh * extent.height,
            );
            let ar = rect.aspect_ratio().max(0.01);

            let constrained = constrain_to_valid_area(rect, &poly, ar);
            prop_assert!(
                poly.contains_rect(&constrained),
                "invalid result {:?} for input {:?} at {}°",
                constrained,
                rect,
                degrees
            );
        }

        /// Property: the maximal crop is valid and aspect-correct.
        #[test]
        fn prop_max_crop_valid_and_aspect_correct(
            (w, h) in dims_strategy(),
            degrees in -180.0f64..=180.0,
            ar in 0.25f64..=4.0,
        ) {
            let poly = Polygon::footprint(w, h, degrees);
            let crop = max_crop_at_aspect(&poly, ar);

            prop_assert!(poly.contains_rect(&crop));
            prop_assert!((crop.aspect_ratio() - ar).abs() / ar < 0.01);
            prop_assert!(crop.width > 0.0);
        }

        /// Property: the search is deterministic to well under 0.1%.
        #[test]
        fn prop_max_crop_deterministic(
            (w, h) in dims_strategy(),
            degrees in -180.0f64..=180.0,
        ) {
            let poly = Polygon::footprint(w, h, degrees);
            let a = max_crop_at_aspect(&poly, 1.0);
            let b = max_crop_at_aspect(&poly, 1.0);
            prop_assert!((a.width - b.width).abs() <= a.width * 0.001);
            prop_assert!((a.height - b.height).abs() <= a.height * 0.001);
        }
    }
}
