use super::{MeshVertex, Quad, QUAD_INDEX_PATTERN, QUAD_UVS};

/// CPU-side mesh for one batch of quads.
///
/// Invariants:
/// - `vertices.len() == 4 × primitive_count`
/// - `indices.len() == 6 × primitive_count`
/// - vertices `4i..4i+4` belong to primitive `i` and carry `primitive_id == i`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl Batch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(primitives: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(primitives * 4),
            indices: Vec::with_capacity(primitives * 6),
        }
    }

    /// Appends `quad` as the next primitive.
    pub(crate) fn push_quad(&mut self, quad: &Quad) {
        let primitive_id = self.primitive_count() as u32;
        let base = primitive_id * 4;

        for (corner, uv) in quad.corners.iter().zip(QUAD_UVS) {
            self.vertices.push(MeshVertex {
                position: corner.to_array(),
                primitive_id,
                uv,
            });
        }
        self.indices.extend(QUAD_INDEX_PATTERN.iter().map(|i| base + i));
    }

    #[inline]
    pub fn primitive_count(&self) -> usize {
        self.vertices.len() / 4
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The four vertices of primitive `i`.
    #[inline]
    pub fn quad_vertices(&self, i: usize) -> Option<&[MeshVertex]> {
        let start = i.checked_mul(4)?;
        self.vertices.get(start..start.checked_add(4)?)
    }

    pub fn uvs(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        self.vertices.iter().map(|v| v.uv)
    }

    pub fn primitive_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertices.iter().map(|v| v.primitive_id)
    }

    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
