//! wgpu backend for panel batches.
//!
//! `PanelRenderer` owns the pipeline and GPU buffers; `FrameBackend` borrows it
//! together with a frame's encoder and implements `batch::RenderBackend`.
//!
//! Convention:
//! - mesh positions are world units, transformed by `view_projection × draw.transform`
//! - per-primitive parameters live in one read-only storage buffer indexed by
//!   the vertex `primitive_id`

mod ctx;
mod gpu_params;
mod panel;

pub use ctx::{FrameBackend, RenderCtx, RenderTarget};
pub use gpu_params::{pack_primitive_params, GpuPrimitiveParams};
pub use panel::PanelRenderer;
