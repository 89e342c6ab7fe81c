//! Crop geometry: bounding boxes, footprint polygons, containment, and the
//! area-constraint solver.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the rotated image's bounding box
//! - Rotation angles are in degrees
//! - Crop rects live in pixel space here; percentage-space conversion is on
//!   `Rect`

mod constrain;
mod polygon;
mod rect;

pub use constrain::{constrain_to_valid_area, max_crop_at_aspect, MIN_CROP_FRACTION};
pub use polygon::{BoundingBox, Polygon};
pub use rect::{Anchor, Point, Rect};
