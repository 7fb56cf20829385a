use crate::coords::{CoordinateMapper, Vec2};
use crate::error::BatchError;

use super::{PropertySet, PropertyStore, ShaderProperty, VisualColumns};

/// Converts pixel-space visuals into the world-space arrays the SDF program reads.
#[derive(Debug, Copy, Clone)]
pub struct ParameterBinder {
    mapper: CoordinateMapper,
}

impl ParameterBinder {
    #[inline]
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self { mapper }
    }

    /// Packs `visuals` into parallel arrays, element `i` for primitive `i`.
    ///
    /// Fails with [`BatchError::FieldLengthMismatch`] if any column disagrees with
    /// the others; nothing is produced in that case.
    pub fn bind(&self, visuals: &VisualColumns) -> Result<PropertySet, BatchError> {
        let n = visuals.validate()?;
        let ratio = self.mapper.screen_to_world_ratio();
        let to_world = |px: Vec2| {
            let w = self.mapper.screen_to_world_size(px);
            [w.x, w.y, 0.0, 0.0]
        };

        let set = PropertySet {
            fill_color: visuals.fill_color.iter().map(|c| c.to_array()).collect(),
            outline_color: visuals.outline_color.iter().map(|c| c.to_array()).collect(),
            outline_width: visuals
                .outline_width_px
                .iter()
                .map(|&w| self.mapper.screen_to_world_size(Vec2::splat(w)).x)
                .collect(),
            outline_direction: visuals.outline_direction.clone(),
            sdf_size: visuals.sdf_cell_size_px.iter().map(|&s| to_world(s)).collect(),
            sdf_radii: visuals.corner_radii.iter().map(|r| r.scaled(ratio).to_array()).collect(),
            sdf_padding: visuals.sdf_padding_px.iter().map(|&p| to_world(p)).collect(),
        };

        log::trace!("bound shader parameters for {n} primitives");
        Ok(set)
    }

    /// Pushes every array.
    pub fn push<S: PropertyStore + ?Sized>(set: &PropertySet, target: &mut S) {
        for property in ShaderProperty::ALL {
            set.write(property, target);
        }
    }

    /// Pushes the arrays that only change when primitives are (re)created.
    pub fn push_static<S: PropertyStore + ?Sized>(set: &PropertySet, target: &mut S) {
        for property in ShaderProperty::STATIC {
            set.write(property, target);
        }
    }

    /// Pushes the arrays that may change every frame.
    pub fn push_dynamic<S: PropertyStore + ?Sized>(set: &PropertySet, target: &mut S) {
        for property in ShaderProperty::DYNAMIC {
            set.write(property, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::coords::{CornerRadii, Viewport};
    use crate::paint::Color;
    use crate::params::{PrimitiveVisual, PropertyBlock};

    fn binder() -> ParameterBinder {
        // 100 px == 1 world unit
        ParameterBinder::new(CoordinateMapper::new(Viewport::new(800.0, 600.0, 3.0)).unwrap())
    }

    fn visuals() -> VisualColumns {
        [
            PrimitiveVisual::filled(Color::from_premul(1.0, 0.0, 0.0, 1.0), Vec2::new(200.0, 100.0))
                .with_outline(Color::white(), 10.0, 1.0)
                .with_corner_radii(CornerRadii::new(10.0, 20.0, 30.0, 40.0))
                .with_padding(Vec2::new(5.0, 5.0)),
            PrimitiveVisual::filled(Color::from_premul(0.0, 0.0, 1.0, 1.0), Vec2::new(50.0, 50.0))
                .with_outline(Color::black(), 4.0, -1.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn arrays_are_index_aligned_and_in_world_units() {
        let set = binder().bind(&visuals()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.fill_color()[1], [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(set.outline_direction(), &[1.0, -1.0]);
        assert_relative_eq!(set.outline_width()[0], 0.1, max_relative = 1e-5);
        assert_relative_eq!(set.sdf_size()[0][0], 2.0, max_relative = 1e-5);
        assert_relative_eq!(set.sdf_size()[0][1], 1.0, max_relative = 1e-5);
        assert_relative_eq!(set.sdf_radii()[0][3], 0.4, max_relative = 1e-5);
        assert_relative_eq!(set.sdf_padding()[0][1], 0.05, max_relative = 1e-5);
        assert_eq!(set.sdf_padding()[1], [0.0; 4]);
    }

    #[test]
    fn mismatched_columns_fail() {
        let mut v = visuals();
        v.sdf_cell_size_px.push(Vec2::zero());
        let err = binder().bind(&v).unwrap_err();
        assert_eq!(
            err,
            BatchError::FieldLengthMismatch { field: "sdf_cell_size_px", expected: 2, actual: 3 }
        );
    }

    #[test]
    fn push_writes_every_named_array() {
        let set = binder().bind(&visuals()).unwrap();
        let mut block = PropertyBlock::new();
        ParameterBinder::push(&set, &mut block);
        for p in ShaderProperty::ALL {
            assert_eq!(block.get(p.name()).map(|v| v.len()), Some(2), "{}", p.name());
        }
    }

    #[test]
    fn dynamic_push_leaves_static_arrays_alone() {
        let binder = binder();
        let mut v = visuals();
        let mut block = PropertyBlock::new();
        ParameterBinder::push(&binder.bind(&v).unwrap(), &mut block);

        v.fill_color[0] = Color::transparent();
        v.outline_direction[0] = 0.0;
        ParameterBinder::push_dynamic(&binder.bind(&v).unwrap(), &mut block);

        assert_eq!(block.vector_array("FillColor").unwrap()[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(block.float_array("OutlineDirection").unwrap()[0], 0.0);
    }

    #[test]
    fn static_push_only_touches_static_names() {
        let set = binder().bind(&visuals()).unwrap();
        let mut block = PropertyBlock::new();
        ParameterBinder::push_static(&set, &mut block);
        assert_eq!(block.len(), ShaderProperty::STATIC.len());
        assert!(block.float_array("OutlineWidth").is_none());
    }
}
