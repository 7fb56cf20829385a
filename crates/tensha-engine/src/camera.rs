//! Camera snapshot consumed once per frame.

use glam::{Mat4, Vec3};

use crate::coords::Viewport;

/// Orthographic camera parameters as read from the host at the start of a frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub pixel_width: f32,
    pub pixel_height: f32,
    pub ortho_half_height: f32,
    /// Camera pose in world space.
    pub camera_to_world: Mat4,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Camera {
    /// Camera at the world origin looking down -Z.
    pub fn new(pixel_width: f32, pixel_height: f32, ortho_half_height: f32) -> Self {
        Self {
            pixel_width,
            pixel_height,
            ortho_half_height,
            camera_to_world: Mat4::IDENTITY,
            near_clip: 0.3,
            far_clip: 1000.0,
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.pixel_width, self.pixel_height, self.ortho_half_height)
    }

    /// Model transform for panel meshes: the camera pose pushed forward to the
    /// near plane, so the origin-centered mesh fills the view.
    #[inline]
    pub fn draw_transform(&self) -> Mat4 {
        self.camera_to_world * Mat4::from_translation(Vec3::new(0.0, 0.0, -self.near_clip))
    }

    /// World → clip transform.
    pub fn view_projection(&self) -> Mat4 {
        let half_h = self.ortho_half_height;
        let half_w = if self.pixel_height > 0.0 {
            half_h * self.pixel_width / self.pixel_height
        } else {
            half_h
        };
        let projection = Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near_clip, self.far_clip);
        projection * self.camera_to_world.inverse()
    }
}
