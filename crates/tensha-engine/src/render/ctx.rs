use glam::Mat4;

use crate::batch::{DrawSubmission, RenderBackend};

use super::PanelRenderer;

/// Renderer-facing context (device/queue + surface format).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue, surface_format: wgpu::TextureFormat) -> Self {
        Self { device, queue, surface_format }
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}

/// One frame's view of the wgpu backend.
pub struct FrameBackend<'f, 'r> {
    pub renderer: &'f mut PanelRenderer,
    pub ctx: &'f RenderCtx<'r>,
    pub target: &'f mut RenderTarget<'r>,
    /// World → clip, usually `Camera::view_projection()`.
    pub view_projection: Mat4,
}

impl RenderBackend for FrameBackend<'_, '_> {
    fn submit(&mut self, draw: DrawSubmission<'_>) {
        self.renderer.draw(self.ctx, self.target, self.view_projection, &draw);
    }
}
