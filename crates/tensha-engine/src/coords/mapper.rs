use crate::error::BatchError;

use super::{Vec2, Viewport};

/// Screen ↔ world conversions for one viewport snapshot.
///
/// World space is centered on the camera: the viewport spans
/// `[-w/2, w/2] × [-h/2, h/2]` with `h = 2 × ortho_half_height`.
///
/// All derived quantities are computed once in [`CoordinateMapper::new`]; the
/// conversions themselves are pure and infallible.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoordinateMapper {
    viewport: Viewport,
    world_size: Vec2,
    ratio: f32,
}

impl CoordinateMapper {
    /// Validates `viewport` and precomputes the world extent and pixel ratio.
    ///
    /// Fails with [`BatchError::DegenerateViewport`] when the viewport has no pixel
    /// area; nothing downstream can be built against such a viewport.
    pub fn new(viewport: Viewport) -> Result<Self, BatchError> {
        if !viewport.is_valid() {
            return Err(BatchError::DegenerateViewport {
                pixel_width: viewport.pixel_width,
                pixel_height: viewport.pixel_height,
            });
        }

        let height = viewport.ortho_half_height * 2.0;
        let width = height * viewport.aspect();
        let world_size = Vec2::new(width, height);

        // Mean of the two per-axis ratios. Both axes share one scale, which assumes
        // square pixels; the horizontal extent is derived from the aspect ratio so
        // the two terms only differ by rounding.
        let ratio = (world_size.x / viewport.pixel_width + world_size.y / viewport.pixel_height) / 2.0;

        Ok(Self { viewport, world_size, ratio })
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// World extent of the whole viewport.
    #[inline]
    pub fn world_viewport_size(&self) -> Vec2 {
        self.world_size
    }

    /// World units per screen pixel.
    #[inline]
    pub fn screen_to_world_ratio(&self) -> f32 {
        self.ratio
    }

    #[inline]
    pub fn screen_to_world_position(&self, px: Vec2) -> Vec2 {
        -self.world_size / 2.0 + px * self.ratio
    }

    /// Pure scale, no offset.
    #[inline]
    pub fn screen_to_world_size(&self, size_px: Vec2) -> Vec2 {
        size_px * self.ratio
    }

    #[inline]
    pub fn world_to_screen_position(&self, world: Vec2) -> Vec2 {
        (world + self.world_size / 2.0) / self.ratio
    }

    #[inline]
    pub fn world_to_screen_size(&self, size: Vec2) -> Vec2 {
        size / self.ratio
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn hd() -> CoordinateMapper {
        CoordinateMapper::new(Viewport::new(1920.0, 1080.0, 5.0)).unwrap()
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn zero_height_viewport_is_rejected() {
        let err = CoordinateMapper::new(Viewport::new(800.0, 0.0, 5.0)).unwrap_err();
        assert_eq!(err, BatchError::DegenerateViewport { pixel_width: 800.0, pixel_height: 0.0 });
    }

    #[test]
    fn non_positive_ortho_height_is_rejected() {
        assert!(CoordinateMapper::new(Viewport::new(800.0, 600.0, 0.0)).is_err());
        assert!(CoordinateMapper::new(Viewport::new(800.0, 600.0, -5.0)).is_err());
        assert!(CoordinateMapper::new(Viewport::new(800.0, 600.0, f32::NAN)).is_err());
    }

    #[test]
    fn zero_width_viewport_is_rejected() {
        assert!(CoordinateMapper::new(Viewport::new(0.0, 600.0, 5.0)).is_err());
    }

    // ── world extent ──────────────────────────────────────────────────────

    #[test]
    fn world_size_follows_ortho_height_and_aspect() {
        let m = hd();
        let size = m.world_viewport_size();
        assert_relative_eq!(size.y, 10.0);
        assert_relative_eq!(size.x, 10.0 * 1920.0 / 1080.0);
    }

    #[test]
    fn ratio_is_world_units_per_pixel() {
        let m = hd();
        assert_relative_eq!(m.screen_to_world_ratio(), 10.0 / 1080.0, max_relative = 1e-6);
    }

    // ── conversions ───────────────────────────────────────────────────────

    #[test]
    fn screen_origin_maps_to_bottom_left_corner() {
        let m = hd();
        let p = m.screen_to_world_position(Vec2::zero());
        assert_relative_eq!(p.x, -m.world_viewport_size().x / 2.0);
        assert_relative_eq!(p.y, -5.0);
    }

    #[test]
    fn screen_center_maps_to_world_origin() {
        let m = hd();
        let p = m.screen_to_world_position(Vec2::new(960.0, 540.0));
        assert!(p.x.abs() < 1e-4, "x = {}", p.x);
        assert!(p.y.abs() < 1e-4, "y = {}", p.y);
    }

    #[test]
    fn size_conversion_has_no_offset() {
        let m = hd();
        assert_eq!(m.screen_to_world_size(Vec2::zero()), Vec2::zero());
        let s = m.screen_to_world_size(Vec2::new(108.0, 216.0));
        assert_relative_eq!(s.x, 1.0, max_relative = 1e-5);
        assert_relative_eq!(s.y, 2.0, max_relative = 1e-5);
    }

    #[test]
    fn position_and_size_round_trip() {
        for vp in [
            Viewport::new(1920.0, 1080.0, 5.0),
            Viewport::new(640.0, 480.0, 1.0),
            Viewport::new(300.0, 1200.0, 42.0),
        ] {
            let m = CoordinateMapper::new(vp).unwrap();
            let px = Vec2::new(123.5, 77.25);
            let back = m.world_to_screen_position(m.screen_to_world_position(px));
            assert_relative_eq!(back.x, px.x, max_relative = 1e-4);
            assert_relative_eq!(back.y, px.y, max_relative = 1e-4);

            let sz = m.world_to_screen_size(m.screen_to_world_size(px));
            assert_relative_eq!(sz.x, px.x, max_relative = 1e-5);
            assert_relative_eq!(sz.y, px.y, max_relative = 1e-5);
        }
    }

    #[test]
    fn snapshots_taken_before_and_after_a_resize_disagree() {
        // A mapper is bound to its snapshot; a new viewport needs a new mapper.
        let before = CoordinateMapper::new(Viewport::new(800.0, 600.0, 5.0)).unwrap();
        let after = CoordinateMapper::new(Viewport::new(1600.0, 600.0, 5.0)).unwrap();
        let px = Vec2::new(100.0, 100.0);
        assert_eq!(before.screen_to_world_size(px), after.screen_to_world_size(px));
        assert_ne!(before.screen_to_world_position(px), after.screen_to_world_position(px));
        assert_eq!(before.viewport().pixel_width, 800.0);
    }
}
