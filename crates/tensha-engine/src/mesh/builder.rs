use crate::coords::{CoordinateMapper, ScreenRect, Vec2};
use crate::error::BatchError;

use super::{Batch, Quad};

/// Outline inputs that affect geometry: width in pixels and direction in `[-1, 1]`.
///
/// Direction `-1` keeps the outline fully inside the panel (no expansion), `1`
/// places it fully outside (expansion by the whole width), `0` centers it on the edge.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OutlineExpansion {
    pub width_px: f32,
    pub direction: f32,
}

impl OutlineExpansion {
    #[inline]
    pub const fn new(width_px: f32, direction: f32) -> Self {
        Self { width_px, direction }
    }

    /// World-space distance each quad edge is pushed outward.
    ///
    /// Only the direction blend is clamped to `[0, 1]`; the width is used as given,
    /// so a negative width shrinks the quad instead of growing it.
    #[inline]
    pub fn world_expansion(&self, mapper: &CoordinateMapper) -> f32 {
        let full = mapper.screen_to_world_size(Vec2::splat(self.width_px)).x;
        full * ((1.0 + self.direction) / 2.0).clamp(0.0, 1.0)
    }
}

/// Lays out screen rectangles as one batched quad mesh.
#[derive(Debug, Copy, Clone)]
pub struct BatchMeshBuilder {
    mapper: CoordinateMapper,
}

impl BatchMeshBuilder {
    #[inline]
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self { mapper }
    }

    /// Builds a fresh mesh for `rects`, one quad per rect, expanded by the matching
    /// outline entry.
    ///
    /// Output is a pure function of the inputs and the mapper's viewport.
    pub fn build(&self, rects: &[ScreenRect], outlines: &[OutlineExpansion]) -> Result<Batch, BatchError> {
        if rects.len() != outlines.len() {
            return Err(BatchError::ShapeMismatch {
                rects: rects.len(),
                outlines: outlines.len(),
            });
        }

        let mut batch = Batch::with_capacity(rects.len());

        for (rect, outline) in rects.iter().zip(outlines) {
            let r = rect.normalized();
            let min = self.mapper.screen_to_world_position(r.origin);
            let size = self.mapper.screen_to_world_size(r.size);
            let expansion = outline.world_expansion(&self.mapper);

            batch.push_quad(&Quad::from_min_size(min, size).expanded(expansion));
        }

        log::trace!(
            "built panel mesh: {} quads, {} vertices, {} indices",
            batch.primitive_count(),
            batch.vertex_count(),
            batch.index_count()
        );

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::coords::Viewport;
    use crate::mesh::QUAD_UVS;

    fn hd() -> CoordinateMapper {
        CoordinateMapper::new(Viewport::new(1920.0, 1080.0, 5.0)).unwrap()
    }

    fn quad_min_x(batch: &Batch, i: usize) -> f32 {
        batch.quad_vertices(i).unwrap()[0].position[0]
    }

    // ── expansion ─────────────────────────────────────────────────────────

    #[test]
    fn outward_outline_expands_by_full_width() {
        let m = hd();
        let e = OutlineExpansion::new(10.0, 1.0).world_expansion(&m);
        assert_eq!(e, m.screen_to_world_size(Vec2::new(10.0, 10.0)).x);
    }

    #[test]
    fn inward_outline_does_not_expand() {
        assert_eq!(OutlineExpansion::new(10.0, -1.0).world_expansion(&hd()), 0.0);
    }

    #[test]
    fn centered_outline_expands_by_half() {
        let m = hd();
        let e = OutlineExpansion::new(10.0, 0.0).world_expansion(&m);
        assert_relative_eq!(e, m.screen_to_world_size(Vec2::splat(5.0)).x);
    }

    #[test]
    fn direction_beyond_range_is_clamped() {
        let m = hd();
        let full = OutlineExpansion::new(10.0, 1.0).world_expansion(&m);
        assert_eq!(OutlineExpansion::new(10.0, 3.0).world_expansion(&m), full);
        assert_eq!(OutlineExpansion::new(10.0, -7.0).world_expansion(&m), 0.0);
    }

    #[test]
    fn negative_width_is_not_clamped() {
        let m = hd();
        let e = OutlineExpansion::new(-10.0, 1.0).world_expansion(&m);
        assert!(e < 0.0);
        // Negative direction still zeroes the blend, whatever the width sign.
        assert_eq!(OutlineExpansion::new(-10.0, -1.0).world_expansion(&m), 0.0);
    }

    // ── build ─────────────────────────────────────────────────────────────

    #[test]
    fn single_rect_at_origin_with_outward_outline() {
        let m = hd();
        let builder = BatchMeshBuilder::new(m);
        let batch = builder
            .build(&[ScreenRect::new(0.0, 0.0, 100.0, 100.0)], &[OutlineExpansion::new(10.0, 1.0)])
            .unwrap();

        let e = m.screen_to_world_size(Vec2::new(10.0, 10.0)).x;
        let min = m.screen_to_world_position(Vec2::zero());
        let size = m.screen_to_world_size(Vec2::splat(100.0));

        let v = batch.quad_vertices(0).unwrap();
        assert_eq!(v[0].position, [min.x - e, min.y - e]);
        assert_eq!(v[3].position, [min.x + size.x + e, min.y + size.y + e]);
    }

    #[test]
    fn counts_scale_with_primitives() {
        let builder = BatchMeshBuilder::new(hd());
        for n in [0usize, 1, 7, 64] {
            let rects = vec![ScreenRect::new(10.0, 10.0, 20.0, 20.0); n];
            let outlines = vec![OutlineExpansion::default(); n];
            let batch = builder.build(&rects, &outlines).unwrap();

            assert_eq!(batch.vertex_count(), 4 * n);
            assert_eq!(batch.index_count(), 6 * n);
            if n > 0 {
                let max = *batch.indices().iter().max().unwrap();
                assert_eq!(max as usize, 4 * n - 1);
            }
        }
    }

    #[test]
    fn uv_corners_follow_vertex_order() {
        let builder = BatchMeshBuilder::new(hd());
        let batch = builder
            .build(
                &[ScreenRect::new(0.0, 0.0, 5.0, 5.0), ScreenRect::new(50.0, 50.0, 5.0, 9.0)],
                &[OutlineExpansion::default(); 2],
            )
            .unwrap();
        let uvs: Vec<[f32; 2]> = batch.uvs().collect();
        assert_eq!(&uvs[..4], &QUAD_UVS);
        assert_eq!(&uvs[4..], &QUAD_UVS);
    }

    #[test]
    fn negative_size_rect_is_normalized() {
        let builder = BatchMeshBuilder::new(hd());
        let flipped = builder
            .build(&[ScreenRect::new(100.0, 100.0, -50.0, -20.0)], &[OutlineExpansion::default()])
            .unwrap();
        let plain = builder
            .build(&[ScreenRect::new(50.0, 80.0, 50.0, 20.0)], &[OutlineExpansion::default()])
            .unwrap();
        assert_eq!(flipped, plain);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let builder = BatchMeshBuilder::new(hd());
        let rects = ScreenRect::grid(4, 3, Vec2::new(1920.0, 1080.0));
        let outlines: Vec<OutlineExpansion> =
            (0..rects.len()).map(|i| OutlineExpansion::new(i as f32, 0.25)).collect();

        let a = builder.build(&rects, &outlines).unwrap();
        let b = builder.build(&rects, &outlines).unwrap();
        assert_eq!(a.vertex_bytes(), b.vertex_bytes());
        assert_eq!(a.index_bytes(), b.index_bytes());
    }

    #[test]
    fn quads_follow_input_order() {
        let builder = BatchMeshBuilder::new(hd());
        let batch = builder
            .build(
                &[ScreenRect::new(500.0, 0.0, 10.0, 10.0), ScreenRect::new(0.0, 0.0, 10.0, 10.0)],
                &[OutlineExpansion::default(); 2],
            )
            .unwrap();
        assert!(quad_min_x(&batch, 0) > quad_min_x(&batch, 1));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let builder = BatchMeshBuilder::new(hd());
        let err = builder
            .build(&[ScreenRect::default(); 3], &[OutlineExpansion::default(); 2])
            .unwrap_err();
        assert_eq!(err, BatchError::ShapeMismatch { rects: 3, outlines: 2 });
    }
}
