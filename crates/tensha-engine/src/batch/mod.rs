//! Panel batch aggregate and the draw-submission contract.
//!
//! A `PanelBatch` owns the rects, visuals, mesh and bound properties of one draw
//! call and keeps them index-aligned. Each frame it rebuilds what is stale and
//! hands exactly one `DrawSubmission` to a `RenderBackend`.

mod backend;
mod panel;

pub use backend::{DrawSubmission, MaterialRef, RenderBackend, DEFAULT_LAYER_MASK};
pub use panel::PanelBatch;
