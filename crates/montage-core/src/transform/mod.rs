//! Raster transform operations: rotation, crop extraction, and the combined
//! render pass.
//!
//! # Pipeline Order
//!
//! 1. Rotation (rasterized into the bounding-box canvas)
//! 2. Crop extraction (percentage rect against that canvas)
//! 3. Optional resampling to an explicit output size
//! 4. Filter chain (applied by the caller, see `filters`)
//!
//! Mirroring happens at presentation time, outside this pipeline.

mod crop;
mod render;
mod rotation;

pub use crop::extract_region;
pub use render::render_crop;
pub use rotation::rasterize_rotation;
