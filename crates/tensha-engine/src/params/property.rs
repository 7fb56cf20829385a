use super::PropertyStore;

/// Named shader bindings for per-primitive parameters.
///
/// Names must match the fragment program exactly; array element `i` is read for
/// fragments whose vertex `primitive_id` is `i`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderProperty {
    /// `vec4[]`, premultiplied fill color.
    FillColor,
    /// `vec4[]`, premultiplied outline color.
    OutlineColor,
    /// `float[]`, outline width in world units.
    OutlineWidth,
    /// `float[]`, outline direction in `[-1, 1]`.
    OutlineDirection,
    /// `vec4[]`, `xy` = SDF cell size in world units.
    SdfSize,
    /// `vec4[]`, corner radii in world units (tl, tr, br, bl).
    SdfRadii,
    /// `vec4[]`, `xy` = padding in world units.
    SdfPadding,
}

impl ShaderProperty {
    pub const ALL: [ShaderProperty; 7] = [
        ShaderProperty::FillColor,
        ShaderProperty::OutlineColor,
        ShaderProperty::OutlineWidth,
        ShaderProperty::OutlineDirection,
        ShaderProperty::SdfSize,
        ShaderProperty::SdfRadii,
        ShaderProperty::SdfPadding,
    ];

    /// Pushed when primitives are created (or the viewport scale changes).
    pub const STATIC: [ShaderProperty; 4] = [
        ShaderProperty::FillColor,
        ShaderProperty::OutlineColor,
        ShaderProperty::SdfRadii,
        ShaderProperty::SdfPadding,
    ];

    /// Re-pushed every rendered frame.
    pub const DYNAMIC: [ShaderProperty; 3] = [
        ShaderProperty::OutlineWidth,
        ShaderProperty::OutlineDirection,
        ShaderProperty::SdfSize,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ShaderProperty::FillColor => "FillColor",
            ShaderProperty::OutlineColor => "OutlineColor",
            ShaderProperty::OutlineWidth => "OutlineWidth",
            ShaderProperty::OutlineDirection => "OutlineDirection",
            ShaderProperty::SdfSize => "SDFSize",
            ShaderProperty::SdfRadii => "SDFRadii",
            ShaderProperty::SdfPadding => "SDFPadding",
        }
    }

    pub const fn is_dynamic(self) -> bool {
        matches!(
            self,
            ShaderProperty::OutlineWidth | ShaderProperty::OutlineDirection | ShaderProperty::SdfSize
        )
    }
}

/// Bound shader parameters for one batch, one entry per primitive in every array.
///
/// Produced by [`ParameterBinder::bind`](super::ParameterBinder::bind); all arrays
/// have the same length by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    pub(super) fill_color: Vec<[f32; 4]>,
    pub(super) outline_color: Vec<[f32; 4]>,
    pub(super) outline_width: Vec<f32>,
    pub(super) outline_direction: Vec<f32>,
    pub(super) sdf_size: Vec<[f32; 4]>,
    pub(super) sdf_radii: Vec<[f32; 4]>,
    pub(super) sdf_padding: Vec<[f32; 4]>,
}

impl PropertySet {
    #[inline]
    pub fn len(&self) -> usize {
        self.fill_color.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fill_color.is_empty()
    }

    pub fn fill_color(&self) -> &[[f32; 4]] {
        &self.fill_color
    }

    pub fn outline_color(&self) -> &[[f32; 4]] {
        &self.outline_color
    }

    pub fn outline_width(&self) -> &[f32] {
        &self.outline_width
    }

    pub fn outline_direction(&self) -> &[f32] {
        &self.outline_direction
    }

    pub fn sdf_size(&self) -> &[[f32; 4]] {
        &self.sdf_size
    }

    pub fn sdf_radii(&self) -> &[[f32; 4]] {
        &self.sdf_radii
    }

    pub fn sdf_padding(&self) -> &[[f32; 4]] {
        &self.sdf_padding
    }

    /// Writes one named array into `target`, replacing whatever it held.
    pub fn write<S: PropertyStore + ?Sized>(&self, property: ShaderProperty, target: &mut S) {
        let name = property.name();
        match property {
            ShaderProperty::FillColor => target.set_vector_array(name, &self.fill_color),
            ShaderProperty::OutlineColor => target.set_vector_array(name, &self.outline_color),
            ShaderProperty::OutlineWidth => target.set_float_array(name, &self.outline_width),
            ShaderProperty::OutlineDirection => target.set_float_array(name, &self.outline_direction),
            ShaderProperty::SdfSize => target.set_vector_array(name, &self.sdf_size),
            ShaderProperty::SdfRadii => target.set_vector_array(name, &self.sdf_radii),
            ShaderProperty::SdfPadding => target.set_vector_array(name, &self.sdf_padding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_fragment_bindings() {
        let names: Vec<&str> = ShaderProperty::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec!["FillColor", "OutlineColor", "OutlineWidth", "OutlineDirection", "SDFSize", "SDFRadii", "SDFPadding"]
        );
    }

    #[test]
    fn static_and_dynamic_partition_all() {
        assert!(ShaderProperty::STATIC.iter().all(|p| !p.is_dynamic()));
        assert!(ShaderProperty::DYNAMIC.iter().all(|p| p.is_dynamic()));
        assert_eq!(ShaderProperty::STATIC.len() + ShaderProperty::DYNAMIC.len(), ShaderProperty::ALL.len());
    }
}
