use bytemuck::{Pod, Zeroable};

use crate::params::{PropertyBlock, ShaderProperty};

/// Storage-buffer element read by the fragment program (96 bytes, std430).
///
///  offset  0  fill_color     vec4   FillColor
///  offset 16  outline_color  vec4   OutlineColor
///  offset 32  sdf_size       vec4   SDFSize
///  offset 48  sdf_radii      vec4   SDFRadii
///  offset 64  sdf_padding    vec4   SDFPadding
///  offset 80  outline        vec4   (.x = OutlineWidth, .y = OutlineDirection)
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GpuPrimitiveParams {
    pub fill_color: [f32; 4],
    pub outline_color: [f32; 4],
    pub sdf_size: [f32; 4],
    pub sdf_radii: [f32; 4],
    pub sdf_padding: [f32; 4],
    pub outline: [f32; 4],
}

/// Interleaves the named arrays of `block` into `count` storage elements.
///
/// Missing arrays or short arrays read as zero.
pub fn pack_primitive_params(block: &PropertyBlock, count: usize) -> Vec<GpuPrimitiveParams> {
    let vectors = move |p: ShaderProperty| block.vector_array(p.name()).unwrap_or(&[]);
    let floats = move |p: ShaderProperty| block.float_array(p.name()).unwrap_or(&[]);

    let fill = vectors(ShaderProperty::FillColor);
    let outline_color = vectors(ShaderProperty::OutlineColor);
    let size = vectors(ShaderProperty::SdfSize);
    let radii = vectors(ShaderProperty::SdfRadii);
    let padding = vectors(ShaderProperty::SdfPadding);
    let width = floats(ShaderProperty::OutlineWidth);
    let direction = floats(ShaderProperty::OutlineDirection);

    (0..count)
        .map(|i| GpuPrimitiveParams {
            fill_color: fill.get(i).copied().unwrap_or_default(),
            outline_color: outline_color.get(i).copied().unwrap_or_default(),
            sdf_size: size.get(i).copied().unwrap_or_default(),
            sdf_radii: radii.get(i).copied().unwrap_or_default(),
            sdf_padding: padding.get(i).copied().unwrap_or_default(),
            outline: [
                width.get(i).copied().unwrap_or_default(),
                direction.get(i).copied().unwrap_or_default(),
                0.0,
                0.0,
            ],
        })
        .collect()
}
