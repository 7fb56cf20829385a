//! Batched quad mesh.
//!
//! One mesh holds every primitive of a batch: 4 vertices and 6 indices per quad,
//! with primitive `i` owning vertices `4i..4i+4` and indices `6i..6i+6`.

mod batch;
mod builder;
mod quad;
mod vertex;

pub use batch::Batch;
pub use builder::{BatchMeshBuilder, OutlineExpansion};
pub use quad::{Quad, QUAD_INDEX_PATTERN, QUAD_UVS};
pub use vertex::MeshVertex;
