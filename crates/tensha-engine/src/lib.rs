//! Tensha engine crate.
//!
//! Draws batches of rectangular UI panels as screen-space quads shaded by a
//! signed-distance-field fragment program (rounded corners, fill, outline).
//!
//! Per frame:
//! - `coords` maps pixel rectangles into the camera's origin-centered world space
//! - `mesh` lays the quads out as one shared vertex/index buffer
//! - `params` packs per-primitive shader parameters into index-aligned arrays
//! - `batch` owns both and submits one draw to a `RenderBackend`

pub mod batch;
pub mod camera;
pub mod coords;
pub mod error;
pub mod logging;
pub mod mesh;
pub mod paint;
pub mod params;
pub mod render;

pub use error::BatchError;
