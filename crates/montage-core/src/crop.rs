//! Crop gesture handling.
//!
//! The crop rect is stored in percentage-of-bounding-box space so it survives
//! rotation changes; every gesture converts it to pixel space against the
//! *current* bounding box, applies the interaction, re-validates against the
//! footprint polygon, and converts back.
//!
//! # Gesture Paths
//!
//! - `move_by`: translate, clamp into the bounding box, constrain if invalid
//! - `resize_to`: anchor the opposite corner, aspect-fit, enforce the minimum
//!   width, clamp, constrain
//! - `zoom`: ±5% scale about the center per wheel event
//! - `reproject`: the rotation-change path - re-express the percentage crop
//!   against the new bounding box and constrain into the new footprint

use crate::geometry::{
    constrain_to_valid_area, max_crop_at_aspect, Anchor, BoundingBox, Point, Polygon, Rect,
    MIN_CROP_FRACTION,
};

/// Crop scale step applied per zoom/wheel event.
pub const ZOOM_STEP: f64 = 0.05;

/// Which crop handle a resize gesture is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCorner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl DragCorner {
    /// The corner held fixed while this one is dragged.
    fn opposite_anchor(self) -> Anchor {
        match self {
            DragCorner::NorthWest => Anchor::SouthEast,
            DragCorner::NorthEast => Anchor::SouthWest,
            DragCorner::SouthWest => Anchor::NorthEast,
            DragCorner::SouthEast => Anchor::NorthWest,
        }
    }
}

/// Zoom direction for wheel gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Geometry context for crop interactions: the bounding box and footprint of
/// the source at its current rotation, plus the slot's required aspect ratio.
///
/// Rebuilt from the assignment whenever a gesture arrives; it holds no crop
/// state of its own.
#[derive(Debug, Clone)]
pub struct CropSpace {
    pub bounds: BoundingBox,
    pub footprint: Polygon,
    pub aspect: f64,
}

impl CropSpace {
    pub fn new(source_width: f64, source_height: f64, rotation_degrees: f64, aspect: f64) -> Self {
        Self {
            bounds: BoundingBox::of_rotated(source_width, source_height, rotation_degrees),
            footprint: Polygon::footprint(source_width, source_height, rotation_degrees),
            aspect,
        }
    }

    /// Minimum crop width: 5% of the bounding-box width.
    pub fn min_width(&self) -> f64 {
        self.bounds.width * MIN_CROP_FRACTION
    }

    /// The maximal valid crop at the slot aspect, in percentage space. Used
    /// when an assignment is created or reset.
    pub fn initial_crop(&self) -> Rect {
        max_crop_at_aspect(&self.footprint, self.aspect).to_percentage(self.bounds)
    }

    /// Translate the crop by a pointer delta in pixels.
    pub fn move_by(&self, crop_pct: Rect, dx: f64, dy: f64) -> Rect {
        let moved = crop_pct
            .from_percentage(self.bounds)
            .translated(dx, dy)
            .clamped_into(self.bounds);

        self.validated(moved)
    }

    /// Resize by dragging `corner` to `pointer` (pixel coordinates), keeping
    /// the opposite corner fixed.
    pub fn resize_to(&self, crop_pct: Rect, corner: DragCorner, pointer: Point) -> Rect {
        let rect = crop_pct.from_percentage(self.bounds);
        let anchor_point = anchor_position(&rect, corner.opposite_anchor());

        // Free rect spanning anchor to pointer; the aspect fit squares it up
        let free = Rect::new(
            anchor_point.x.min(pointer.x),
            anchor_point.y.min(pointer.y),
            (pointer.x - anchor_point.x).abs(),
            (pointer.y - anchor_point.y).abs(),
        );

        let mut sized = free.fit_to_aspect(self.aspect, corner.opposite_anchor());

        if sized.width < self.min_width() {
            let width = self.min_width();
            let height = width / self.aspect;
            sized = anchored_rect(anchor_point, corner.opposite_anchor(), width, height);
        }

        self.validated(sized.clamped_into(self.bounds))
    }

    /// Scale the crop about its center by one zoom step.
    pub fn zoom(&self, crop_pct: Rect, direction: ZoomDirection) -> Rect {
        let rect = crop_pct.from_percentage(self.bounds);
        let factor = match direction {
            ZoomDirection::In => 1.0 - ZOOM_STEP,
            ZoomDirection::Out => 1.0 + ZOOM_STEP,
        };

        let scaled = rect.scaled_from_center(factor);
        let width = scaled.width.clamp(self.min_width(), self.bounds.width);
        let height = width / self.aspect.max(f64::EPSILON);
        let recentered = Rect::centered_at(rect.center(), width, height);

        self.validated(recentered.clamped_into(self.bounds))
    }

    /// Re-express a percentage crop carried over from another rotation.
    ///
    /// The percentage rect keeps its relative position and size against the
    /// new bounding box; it is then re-fit to the slot aspect about its own
    /// center and constrained into the new footprint.
    pub fn reproject(&self, crop_pct: Rect) -> Rect {
        let rect = crop_pct
            .from_percentage(self.bounds)
            .fit_to_aspect(self.aspect, Anchor::Center);

        self.validated(rect)
    }

    /// Constrain into the footprint if invalid, then convert back to
    /// percentage space.
    fn validated(&self, rect: Rect) -> Rect {
        constrain_to_valid_area(rect, &self.footprint, self.aspect).to_percentage(self.bounds)
    }
}

fn anchor_position(rect: &Rect, anchor: Anchor) -> Point {
    match anchor {
        Anchor::Center => rect.center(),
        Anchor::NorthWest => Point::new(rect.x, rect.y),
        Anchor::NorthEast => Point::new(rect.x + rect.width, rect.y),
        Anchor::SouthWest => Point::new(rect.x, rect.y + rect.height),
        Anchor::SouthEast => Point::new(rect.x + rect.width, rect.y + rect.height),
    }
}

/// Build a rect of the given size with `anchor` pinned at `at`.
fn anchored_rect(at: Point, anchor: Anchor, width: f64, height: f64) -> Rect {
    match anchor {
        Anchor::Center => Rect::centered_at(at, width, height),
        Anchor::NorthWest => Rect::new(at.x, at.y, width, height),
        Anchor::NorthEast => Rect::new(at.x - width, at.y, width, height),
        Anchor::SouthWest => Rect::new(at.x, at.y - height, width, height),
        Anchor::SouthEast => Rect::new(at.x - width, at.y - height, width, height),
    }
}
