/// Snapshot of the active camera's viewport.
///
/// Read once per frame from the camera and passed by value into every conversion,
/// so all conversions of one frame agree even if the window resizes mid-frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub pixel_width: f32,
    pub pixel_height: f32,
    /// Half of the vertical world extent covered by the orthographic camera.
    pub ortho_half_height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(pixel_width: f32, pixel_height: f32, ortho_half_height: f32) -> Self {
        Self { pixel_width, pixel_height, ortho_half_height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.pixel_width > 0.0
            && self.pixel_height > 0.0
            && self.pixel_width.is_finite()
            && self.pixel_height.is_finite()
            && self.ortho_half_height > 0.0
            && self.ortho_half_height.is_finite()
    }

    #[inline]
    pub fn aspect(self) -> f32 {
        self.pixel_width / self.pixel_height
    }
}
