use super::Vec2;

/// Axis-aligned rectangle in screen pixels (bottom-left origin, +Y up).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScreenRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl ScreenRect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    ///
    /// Quads are always emitted from a normalized rect, which keeps the
    /// bottom-left/bottom-right/top-left/top-right vertex order meaningful.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        ScreenRect::new(x, y, w, h)
    }

    /// Splits `area` (anchored at the screen origin) into `columns × rows` equal cells.
    ///
    /// Cells are returned column-major: all rows of column 0 first, then column 1, ...
    /// so primitive `i` sits at column `i / rows`, row `i % rows`.
    pub fn grid(columns: u32, rows: u32, area: Vec2) -> Vec<ScreenRect> {
        if columns == 0 || rows == 0 {
            return Vec::new();
        }

        let step_x = area.x / columns as f32;
        let step_y = area.y / rows as f32;

        let mut cells = Vec::with_capacity(columns as usize * rows as usize);
        for i in 0..columns {
            for j in 0..rows {
                cells.push(ScreenRect::new(step_x * i as f32, step_y * j as f32, step_x, step_y));
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> ScreenRect { ScreenRect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_width() {
        let rect = r(10.0, 0.0, -4.0, 5.0);
        let n = rect.normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    #[test]
    fn normalized_negative_height() {
        let rect = r(0.0, 10.0, 5.0, -3.0);
        let n = rect.normalized();
        assert_eq!(n.origin.y, 7.0);
        assert_eq!(n.size.y, 3.0);
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
    }

    #[test]
    fn is_empty_positive_size() {
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    // ── grid ──────────────────────────────────────────────────────────────

    #[test]
    fn grid_covers_area_column_major() {
        let cells = ScreenRect::grid(2, 3, Vec2::new(200.0, 300.0));
        assert_eq!(cells.len(), 6);
        // column 0, rows 0..3
        assert_eq!(cells[0], r(0.0, 0.0, 100.0, 100.0));
        assert_eq!(cells[1], r(0.0, 100.0, 100.0, 100.0));
        assert_eq!(cells[2], r(0.0, 200.0, 100.0, 100.0));
        // column 1 starts after all rows of column 0
        assert_eq!(cells[3], r(100.0, 0.0, 100.0, 100.0));
        assert_eq!(cells[5].max(), Vec2::new(200.0, 300.0));
    }

    #[test]
    fn grid_with_zero_dimension_is_empty() {
        assert!(ScreenRect::grid(0, 4, Vec2::new(10.0, 10.0)).is_empty());
        assert!(ScreenRect::grid(4, 0, Vec2::new(10.0, 10.0)).is_empty());
    }
}
