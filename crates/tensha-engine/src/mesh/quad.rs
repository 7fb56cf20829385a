use crate::coords::Vec2;

/// Index pattern for one quad over vertices (bl, br, tl, tr).
///
/// Both triangles (bl, tl, br) and (tl, tr, br) wind clockwise in the +Y-up
/// world frame for any quad with non-negative extent.
pub const QUAD_INDEX_PATTERN: [u32; 6] = [0, 2, 1, 2, 3, 1];

/// Local UV per corner, in vertex order.
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Four world-space corners ordered bottom-left, bottom-right, top-left, top-right.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Quad {
    pub corners: [Vec2; 4],
}

impl Quad {
    /// Quad spanning `min .. min + size`.
    #[inline]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            corners: [
                min,
                Vec2::new(min.x + size.x, min.y),
                Vec2::new(min.x, min.y + size.y),
                min + size,
            ],
        }
    }

    /// Pushes every edge outward by `amount` (inward when negative).
    #[inline]
    pub fn expanded(self, amount: f32) -> Self {
        let [bl, br, tl, tr] = self.corners;
        Self {
            corners: [
                bl + Vec2::new(-amount, -amount),
                br + Vec2::new(amount, -amount),
                tl + Vec2::new(-amount, amount),
                tr + Vec2::new(amount, amount),
            ],
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.corners[3] - self.corners[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Twice the signed area; negative means clockwise in a +Y-up frame.
    fn signed_area2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    fn triangles(q: &Quad) -> [[Vec2; 3]; 2] {
        let v = |i: u32| q.corners[i as usize];
        let p = QUAD_INDEX_PATTERN;
        [[v(p[0]), v(p[1]), v(p[2])], [v(p[3]), v(p[4]), v(p[5])]]
    }

    #[test]
    fn corner_order_is_bl_br_tl_tr() {
        let q = Quad::from_min_size(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(q.corners[0], Vec2::new(1.0, 2.0));
        assert_eq!(q.corners[1], Vec2::new(4.0, 2.0));
        assert_eq!(q.corners[2], Vec2::new(1.0, 6.0));
        assert_eq!(q.corners[3], Vec2::new(4.0, 6.0));
    }

    #[test]
    fn winding_is_consistent_for_any_placement() {
        for (min, size) in [
            (Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)),
            (Vec2::new(-50.0, 12.0), Vec2::new(0.25, 8.0)),
            (Vec2::new(1e3, -1e3), Vec2::new(300.0, 0.5)),
        ] {
            let q = Quad::from_min_size(min, size);
            let [t0, t1] = triangles(&q);
            let a0 = signed_area2(t0[0], t0[1], t0[2]);
            let a1 = signed_area2(t1[0], t1[1], t1[2]);
            assert!(a0 < 0.0 && a1 < 0.0, "both triangles clockwise: {a0} {a1}");
            // The pair tiles the rectangle exactly.
            let total = (a0 + a1).abs() / 2.0;
            assert!((total - size.x * size.y).abs() <= 1e-3 * size.x * size.y);
        }
    }

    #[test]
    fn expansion_is_uniform_on_all_sides() {
        let q = Quad::from_min_size(Vec2::zero(), Vec2::new(4.0, 2.0)).expanded(0.5);
        assert_eq!(q.corners[0], Vec2::new(-0.5, -0.5));
        assert_eq!(q.corners[3], Vec2::new(4.5, 2.5));
        assert_eq!(q.size(), Vec2::new(5.0, 3.0));
    }

    #[test]
    fn negative_expansion_shrinks() {
        let q = Quad::from_min_size(Vec2::zero(), Vec2::new(4.0, 4.0)).expanded(-1.0);
        assert_eq!(q.size(), Vec2::new(2.0, 2.0));
    }
}
