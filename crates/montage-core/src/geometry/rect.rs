//! Rectangle and point primitives for crop geometry.
//!
//! A `Rect` is used in two coordinate spaces: pixel space (against a concrete
//! bounding box) and percentage-of-bounding-box space (0..100). The
//! `to_percentage` / `from_percentage` pair converts between them; everything
//! else is space-agnostic.

use crate::geometry::BoundingBox;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Corner or center held fixed while a rect is resized to a target aspect
/// ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size centered on a point.
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The four corners, clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }

    /// Width/height ratio. Zero-height rects report an aspect of 0.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height <= 0.0 {
            0.0
        } else {
            self.width / self.height
        }
    }

    /// Uniform scale about the rect's own center.
    ///
    /// A factor of zero or below is a no-op: scale computations guard against
    /// degenerate inputs rather than producing inverted rects.
    pub fn scaled_from_center(&self, factor: f64) -> Rect {
        if factor <= 0.0 {
            return *self;
        }

        let center = self.center();
        let width = self.width * factor;
        let height = self.height * factor;
        Rect::centered_at(center, width, height)
    }

    /// Translate by a delta.
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Resize to the target aspect ratio without shrinking either extent,
    /// keeping the given anchor point fixed.
    ///
    /// Of the two candidate pairings - keep width and derive height, or keep
    /// height and derive width - the one that grows (never shrinks) the rect
    /// is chosen: if `width / ar` exceeds the current height the width is
    /// kept, otherwise the height is kept.
    ///
    /// An aspect ratio of zero or below is a no-op.
    pub fn fit_to_aspect(&self, ar: f64, anchor: Anchor) -> Rect {
        if ar <= 0.0 {
            return *self;
        }

        let width_derived_height = self.width / ar;
        let (width, height) = if width_derived_height > self.height {
            (self.width, width_derived_height)
        } else {
            (self.height * ar, self.height)
        };

        match anchor {
            Anchor::Center => Rect::centered_at(self.center(), width, height),
            Anchor::NorthWest => Rect::new(self.x, self.y, width, height),
            Anchor::NorthEast => Rect::new(self.x + self.width - width, self.y, width, height),
            Anchor::SouthWest => Rect::new(self.x, self.y + self.height - height, width, height),
            Anchor::SouthEast => Rect::new(
                self.x + self.width - width,
                self.y + self.height - height,
                width,
                height,
            ),
        }
    }

    /// Translate the rect so it lies within `[0, bounds.width] x
    /// [0, bounds.height]`.
    ///
    /// A rect larger than the bounds is pinned to the origin on that axis;
    /// the size is never changed here.
    pub fn clamped_into(&self, bounds: BoundingBox) -> Rect {
        let x = if self.width >= bounds.width {
            0.0
        } else {
            self.x.clamp(0.0, bounds.width - self.width)
        };
        let y = if self.height >= bounds.height {
            0.0
        } else {
            self.y.clamp(0.0, bounds.height - self.height)
        };
        Rect::new(x, y, self.width, self.height)
    }

    /// Rescale from pixel space to percentage-of-bounding-box space (0..100).
    pub fn to_percentage(&self, bounds: BoundingBox) -> Rect {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return *self;
        }
        Rect::new(
            self.x / bounds.width * 100.0,
            self.y / bounds.height * 100.0,
            self.width / bounds.width * 100.0,
            self.height / bounds.height * 100.0,
        )
    }

    /// Rescale from percentage-of-bounding-box space (0..100) to pixel space.
    pub fn from_percentage(&self, bounds: BoundingBox) -> Rect {
        Rect::new(
            self.x / 100.0 * bounds.width,
            self.y / 100.0 * bounds.height,
            self.width / 100.0 * bounds.width,
            self.height / 100.0 * bounds.height,
        )
    }
}
