use glam::Mat4;

use crate::mesh::Batch;
use crate::params::PropertyBlock;

/// Rendering layer used when the caller does not pick one.
pub const DEFAULT_LAYER_MASK: u32 = 1;

/// Opaque reference to the material a batch is drawn with.
///
/// The engine never interprets it; backends map it to their pipelines.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct MaterialRef(pub u32);

impl MaterialRef {
    /// The rounded-rect SDF material shipped with the wgpu backend.
    pub const SDF_PANEL: MaterialRef = MaterialRef(0);
}

/// Everything a backend needs to issue one draw call.
#[derive(Debug, Copy, Clone)]
pub struct DrawSubmission<'a> {
    pub mesh: &'a Batch,
    pub material: MaterialRef,
    pub properties: &'a PropertyBlock,
    /// Model transform applied to the mesh's world-space positions.
    pub transform: Mat4,
    pub layer_mask: u32,
}

/// Host renderer contract: one `submit` is one draw call.
pub trait RenderBackend {
    fn submit(&mut self, draw: DrawSubmission<'_>);
}
