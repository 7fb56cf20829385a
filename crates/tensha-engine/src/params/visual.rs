use crate::coords::{CornerRadii, Vec2};
use crate::error::BatchError;
use crate::mesh::OutlineExpansion;
use crate::paint::Color;

/// Visual description of one panel, in pixels.
///
/// `outline_width_px`, `outline_direction` and `sdf_cell_size_px` may change every
/// frame; the remaining fields are fixed once the primitive is created.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PrimitiveVisual {
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_width_px: f32,
    /// `-1` inward, `0` centered, `1` outward.
    pub outline_direction: f32,
    pub corner_radii: CornerRadii,
    /// Size of the SDF cell; usually the panel's own size.
    pub sdf_cell_size_px: Vec2,
    /// Inset between the quad edge and the SDF shape.
    pub sdf_padding_px: Vec2,
}

impl PrimitiveVisual {
    /// Plain filled panel of `size_px` with no outline and square corners.
    pub fn filled(fill_color: Color, size_px: Vec2) -> Self {
        Self {
            fill_color,
            outline_color: Color::transparent(),
            outline_width_px: 0.0,
            outline_direction: 0.0,
            corner_radii: CornerRadii::zero(),
            sdf_cell_size_px: size_px,
            sdf_padding_px: Vec2::zero(),
        }
    }

    pub fn with_outline(mut self, color: Color, width_px: f32, direction: f32) -> Self {
        self.outline_color = color;
        self.outline_width_px = width_px;
        self.outline_direction = direction;
        self
    }

    pub fn with_corner_radii(mut self, radii: CornerRadii) -> Self {
        self.corner_radii = radii;
        self
    }

    pub fn with_padding(mut self, padding_px: Vec2) -> Self {
        self.sdf_padding_px = padding_px;
        self
    }
}

/// Struct-of-arrays storage for [`PrimitiveVisual`]s.
///
/// Columns are public so callers can update one field across many primitives
/// cheaply; [`VisualColumns::validate`] checks that they still line up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualColumns {
    pub fill_color: Vec<Color>,
    pub outline_color: Vec<Color>,
    pub outline_width_px: Vec<f32>,
    pub outline_direction: Vec<f32>,
    pub corner_radii: Vec<CornerRadii>,
    pub sdf_cell_size_px: Vec<Vec2>,
    pub sdf_padding_px: Vec<Vec2>,
}

impl VisualColumns {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            fill_color: Vec::with_capacity(n),
            outline_color: Vec::with_capacity(n),
            outline_width_px: Vec::with_capacity(n),
            outline_direction: Vec::with_capacity(n),
            corner_radii: Vec::with_capacity(n),
            sdf_cell_size_px: Vec::with_capacity(n),
            sdf_padding_px: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, v: PrimitiveVisual) {
        self.fill_color.push(v.fill_color);
        self.outline_color.push(v.outline_color);
        self.outline_width_px.push(v.outline_width_px);
        self.outline_direction.push(v.outline_direction);
        self.corner_radii.push(v.corner_radii);
        self.sdf_cell_size_px.push(v.sdf_cell_size_px);
        self.sdf_padding_px.push(v.sdf_padding_px);
    }

    /// Primitive count as seen by the `fill_color` column.
    #[inline]
    pub fn len(&self) -> usize {
        self.fill_color.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fill_color.is_empty()
    }

    /// Returns the common column length, or the first column that disagrees
    /// with `fill_color`.
    pub fn validate(&self) -> Result<usize, BatchError> {
        let expected = self.fill_color.len();
        let columns = [
            ("outline_color", self.outline_color.len()),
            ("outline_width_px", self.outline_width_px.len()),
            ("outline_direction", self.outline_direction.len()),
            ("corner_radii", self.corner_radii.len()),
            ("sdf_cell_size_px", self.sdf_cell_size_px.len()),
            ("sdf_padding_px", self.sdf_padding_px.len()),
        ];

        for (field, actual) in columns {
            if actual != expected {
                return Err(BatchError::FieldLengthMismatch { field, expected, actual });
            }
        }
        Ok(expected)
    }

    /// Reassembles primitive `i`. `None` when out of range in any column.
    pub fn get(&self, i: usize) -> Option<PrimitiveVisual> {
        Some(PrimitiveVisual {
            fill_color: *self.fill_color.get(i)?,
            outline_color: *self.outline_color.get(i)?,
            outline_width_px: *self.outline_width_px.get(i)?,
            outline_direction: *self.outline_direction.get(i)?,
            corner_radii: *self.corner_radii.get(i)?,
            sdf_cell_size_px: *self.sdf_cell_size_px.get(i)?,
            sdf_padding_px: *self.sdf_padding_px.get(i)?,
        })
    }

    /// Geometry-relevant outline inputs, index-aligned with the columns.
    ///
    /// Zips width and direction; callers validate lengths first.
    pub fn outline_expansions(&self) -> Vec<OutlineExpansion> {
        self.outline_width_px
            .iter()
            .zip(&self.outline_direction)
            .map(|(&w, &d)| OutlineExpansion::new(w, d))
            .collect()
    }
}

impl FromIterator<PrimitiveVisual> for VisualColumns {
    fn from_iter<I: IntoIterator<Item = PrimitiveVisual>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut columns = VisualColumns::with_capacity(iter.size_hint().0);
        for v in iter {
            columns.push(v);
        }
        columns
    }
}
