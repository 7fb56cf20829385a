use bytemuck::{Pod, Zeroable};

/// Interleaved vertex layout (20 bytes):
///
///  offset  0  position      [f32; 2]  loc 0  world units
///  offset  8  primitive_id  u32       loc 1  index into the property arrays
///  offset 12  uv            [f32; 2]  loc 2  local quad frame, (0,0) bottom-left
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 2],
    pub primitive_id: u32,
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Uint32,    // primitive_id
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 20);
        let layout = MeshVertex::layout();
        assert_eq!(layout.array_stride, 20);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 12]);
    }
}
