//! Rotated-image footprint geometry.
//!
//! When an image rotates inside its axis-aligned bounding box, the actual
//! pixels occupy a convex quadrilateral - the footprint. Crop rects must keep
//! all four corners inside that footprint so no blank corner pixels leak into
//! the composition.
//!
//! The footprint uses the same forward rotation matrix as the raster
//! rotation pass (`transform::rotation`), so a rect that tests valid here
//! samples real pixels there.

use crate::geometry::{Point, Rect};

/// Distance below which a point counts as lying on a polygon edge.
///
/// Ray casting alone excludes points exactly on the boundary; treating the
/// boundary as inside lets the unrotated footprint accept its own border, so
/// the maximal crop at rotation 0 is the full bounding box.
const BOUNDARY_EPS: f64 = 1e-6;

/// Dimensions of the axis-aligned box enclosing an image after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Bounding box of a `width` x `height` image rotated by `degrees`.
    ///
    /// width' = w·|cos θ| + h·|sin θ|, height' = w·|sin θ| + h·|cos θ|.
    pub fn of_rotated(width: f64, height: f64, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        let cos = radians.cos().abs();
        let sin = radians.sin().abs();

        Self {
            width: width * cos + height * sin,
            height: width * sin + height * cos,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The rotated image's actual pixel footprint inside its bounding box: an
/// ordered 4-vertex convex quadrilateral, clockwise from the image's
/// original top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    pub vertices: [Point; 4],
}

impl Polygon {
    /// Footprint of a `width` x `height` image rotated by `degrees`.
    ///
    /// The image's four corners are rotated about the image center and
    /// translated so the footprint sits centered in the rotation's bounding
    /// box.
    pub fn footprint(width: f64, height: f64, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        let (sin, cos) = radians.sin_cos();

        let bounds = BoundingBox::of_rotated(width, height, degrees);
        let bc = bounds.center();
        let (cx, cy) = (width / 2.0, height / 2.0);

        let corners = [
            (0.0, 0.0),
            (width, 0.0),
            (width, height),
            (0.0, height),
        ];

        let vertices = corners.map(|(x, y)| {
            let dx = x - cx;
            let dy = y - cy;
            Point::new(dx * cos - dy * sin + bc.x, dx * sin + dy * cos + bc.y)
        });

        Self { vertices }
    }

    /// Arithmetic centroid of the four vertices.
    pub fn centroid(&self) -> Point {
        let sum = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |acc, p| (acc.0 + p.x, acc.1 + p.y));
        Point::new(sum.0 / 4.0, sum.1 / 4.0)
    }

    /// Axis-aligned bounding extent of the vertices.
    pub fn extent(&self) -> BoundingBox {
        let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
        let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
        for p in &self.vertices {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        BoundingBox::new(max_x - min_x, max_y - min_y)
    }

    /// Point-in-polygon test via the ray-casting odd-even rule.
    ///
    /// Points within `BOUNDARY_EPS` of an edge count as inside.
    pub fn contains(&self, p: Point) -> bool {
        if self.on_boundary(p) {
            return true;
        }

        let mut inside = false;
        let mut j = 3;
        for i in 0..4 {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// True iff all four corners of `rect` lie inside the polygon.
    ///
    /// This is a corner-only approximation of rectangle containment, not an
    /// edge-intersection test. For an axis-aligned rect inside this convex
    /// quad the corners are the binding points in practice.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.corners().iter().all(|c| self.contains(*c))
    }

    fn on_boundary(&self, p: Point) -> bool {
        let mut j = 3;
        for i in 0..4 {
            if point_segment_distance_sq(p, self.vertices[j], self.vertices[i])
                <= BOUNDARY_EPS * BOUNDARY_EPS
            {
                return true;
            }
            j = i;
        }
        false
    }
}

/// Squared distance from `p` to the segment `a`..`b`.
fn point_segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;

    let t = if len_sq <= f64::EPSILON {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };

    let px = a.x + t * abx - p.x;
    let py = a.y + t * aby - p.y;
    px * px + py * py
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_no_rotation() {
        let b = BoundingBox::of_rotated(4000.0, 3000.0, 0.0);
        assert!((b.width - 4000.0).abs() < 1e-9);
        assert!((b.height - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_90_degrees_swaps() {
        let b = BoundingBox::of_rotated(4000.0, 3000.0, 90.0);
        assert!((b.width - 3000.0).abs() < 1e-6);
        assert!((b.height - 4000.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_box_45_degrees() {
        // (4000 + 3000) * cos(45°) ≈ 4949.75
        let b = BoundingBox::of_rotated(4000.0, 3000.0, 45.0);
        assert!((b.width - 4949.75).abs() < 0.01, "width {}", b.width);
        assert!((b.height - 4949.75).abs() < 0.01, "height {}", b.height);
    }

    #[test]
    fn test_bounding_box_symmetric_in_angle_sign() {
        let a = BoundingBox::of_rotated(400.0, 300.0, 30.0);
        let b = BoundingBox::of_rotated(400.0, 300.0, -30.0);
        assert!((a.width - b.width).abs() < 1e-9);
        assert!((a.height - b.height).abs() < 1e-9);
    }

    #[test]
    fn test_footprint_no_rotation_is_full_box() {
        let poly = Polygon::footprint(100.0, 50.0, 0.0);
        let v = poly.vertices;
        assert!((v[0].x - 0.0).abs() < 1e-9 && (v[0].y - 0.0).abs() < 1e-9);
        assert!((v[1].x - 100.0).abs() < 1e-9 && (v[1].y - 0.0).abs() < 1e-9);
        assert!((v[2].x - 100.0).abs() < 1e-9 && (v[2].y - 50.0).abs() < 1e-9);
        assert!((v[3].x - 0.0).abs() < 1e-9 && (v[3].y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_footprint_vertices_inside_bounding_box() {
        for degrees in [0.0, 10.0, 45.0, 90.0, 135.0, -20.0, -90.0, 179.0] {
            let bounds = BoundingBox::of_rotated(400.0, 300.0, degrees);
            let poly = Polygon::footprint(400.0, 300.0, degrees);
            for p in &poly.vertices {
                assert!(
                    p.x >= -1e-6 && p.x <= bounds.width + 1e-6,
                    "x {} out of [0, {}] at {}°",
                    p.x,
                    bounds.width,
                    degrees
                );
                assert!(
                    p.y >= -1e-6 && p.y <= bounds.height + 1e-6,
                    "y {} out of [0, {}] at {}°",
                    p.y,
                    bounds.height,
                    degrees
                );
            }
        }
    }

    #[test]
    fn test_footprint_centroid_is_bounding_center() {
        for degrees in [0.0, 33.0, 45.0, -70.0] {
            let bounds = BoundingBox::of_rotated(400.0, 300.0, degrees);
            let c = Polygon::footprint(400.0, 300.0, degrees).centroid();
            assert!((c.x - bounds.width / 2.0).abs() < 1e-9);
            assert!((c.y - bounds.height / 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_contains_interior_point() {
        let poly = Polygon::footprint(100.0, 100.0, 45.0);
        // Center is always inside
        assert!(poly.contains(poly.centroid()));
    }

    #[test]
    fn test_contains_excludes_bounding_box_corner() {
        // At 45° the bounding box corners are cut off the footprint
        let poly = Polygon::footprint(100.0, 100.0, 45.0);
        assert!(!poly.contains(Point::new(1.0, 1.0)));
        assert!(!poly.contains(Point::new(140.0, 140.0)));
    }

    #[test]
    fn test_contains_boundary_counts_as_inside() {
        let poly = Polygon::footprint(100.0, 50.0, 0.0);
        // Corners and edge midpoints of the unrotated footprint
        assert!(poly.contains(Point::new(0.0, 0.0)));
        assert!(poly.contains(Point::new(100.0, 50.0)));
        assert!(poly.contains(Point::new(50.0, 0.0)));
        assert!(poly.contains(Point::new(0.0, 25.0)));
    }

    #[test]
    fn test_contains_outside_point() {
        let poly = Polygon::footprint(100.0, 50.0, 0.0);
        assert!(!poly.contains(Point::new(-1.0, 25.0)));
        assert!(!poly.contains(Point::new(101.0, 25.0)));
        assert!(!poly.contains(Point::new(50.0, 51.0)));
    }

    #[test]
    fn test_contains_rect_full_box_at_zero_rotation() {
        let poly = Polygon::footprint(100.0, 50.0, 0.0);
        assert!(poly.contains_rect(&Rect::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn test_contains_rect_rejects_bounding_box_at_45() {
        let poly = Polygon::footprint(100.0, 100.0, 45.0);
        let bounds = poly.extent();
        assert!(!poly.contains_rect(&Rect::new(0.0, 0.0, bounds.width, bounds.height)));
    }

    #[test]
    fn test_contains_rect_accepts_small_center_rect() {
        let poly = Polygon::footprint(100.0, 100.0, 45.0);
        let c = poly.centroid();
        let rect = Rect::centered_at(c, 20.0, 20.0);
        assert!(poly.contains_rect(&rect));
    }

    #[test]
    fn test_extent_matches_bounding_box() {
        for degrees in [0.0, 28.0, 45.0, -60.0] {
            let bounds = BoundingBox::of_rotated(300.0, 200.0, degrees);
            let ext = Polygon::footprint(300.0, 200.0, degrees).extent();
            assert!((ext.width - bounds.width).abs() < 1e-9, "{}°", degrees);
            assert!((ext.height - bounds.height).abs() < 1e-9, "{}°", degrees);
        }
    }

    #[test]
    fn test_point_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(point_segment_distance_sq(Point::new(5.0, 0.0), a, b) < 1e-12);
        assert!((point_segment_distance_sq(Point::new(5.0, 3.0), a, b) - 9.0).abs() < 1e-9);
        // Beyond the endpoint, distance is to the endpoint itself
        assert!((point_segment_distance_sq(Point::new(13.0, 4.0), a, b) - 25.0).abs() < 1e-9);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
