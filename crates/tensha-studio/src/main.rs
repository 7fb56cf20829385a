//! Demo host: a full-window grid of SDF panels with an animated outline.

mod gpu;
mod host;

use std::str::FromStr;

use anyhow::Result;
use tensha_engine::batch::{MaterialRef, PanelBatch, DEFAULT_LAYER_MASK};
use tensha_engine::camera::Camera;
use tensha_engine::coords::{CornerRadii, ScreenRect, Vec2};
use tensha_engine::logging::{init_logging, LoggingConfig};
use tensha_engine::paint::Color;
use tensha_engine::params::{PrimitiveVisual, VisualColumns};
use tensha_engine::render::{FrameBackend, PanelRenderer, RenderCtx, RenderTarget};

use gpu::SurfaceErrorAction;
use host::{FrameCtx, FrameHandler, HostConfig, HostControl};

/// Studio settings. Environment overrides: `TENSHA_GRID`, `TENSHA_OUTLINE_PX`,
/// `TENSHA_OUTLINE_DIR`.
#[derive(Debug, Clone)]
struct StudioConfig {
    /// Cells per side; the default gives 1600 panels.
    grid: u32,
    ortho_half_height: f32,
    outline_px: f32,
    /// Base direction; the studio oscillates around it.
    outline_direction: f32,
    corner_radius_px: f32,
    gap_px: f32,
    clear: wgpu::Color,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            grid: 40,
            ortho_half_height: 5.0,
            outline_px: 2.0,
            outline_direction: 0.0,
            corner_radius_px: 4.0,
            gap_px: 3.0,
            clear: wgpu::Color { r: 0.02, g: 0.02, b: 0.03, a: 1.0 },
        }
    }
}

impl StudioConfig {
    fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_override("TENSHA_GRID") {
            cfg.grid = v;
        }
        if let Some(v) = env_override("TENSHA_OUTLINE_PX") {
            cfg.outline_px = v;
        }
        if let Some(v) = env_override::<f32>("TENSHA_OUTLINE_DIR") {
            cfg.outline_direction = v.clamp(-1.0, 1.0);
        }
        cfg
    }

    fn panel_count(&self) -> u32 {
        self.grid.saturating_pow(2)
    }
}

fn env_override<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

/// Shrinks `cell` by `gap_px` on every side; collapses to zero size when the
/// cell is smaller than two gaps.
fn inset(cell: ScreenRect, gap_px: f32) -> ScreenRect {
    let size = Vec2::new(
        (cell.size.x - gap_px * 2.0).max(0.0),
        (cell.size.y - gap_px * 2.0).max(0.0),
    );
    ScreenRect::from_origin_size(cell.origin + Vec2::splat(gap_px), size)
}

struct PanelStudio {
    config: StudioConfig,
    renderer: PanelRenderer,
    batch: Option<PanelBatch>,
    /// Window size the grid was laid out for.
    layout_size: (u32, u32),
}

impl PanelStudio {
    fn new(config: StudioConfig) -> Self {
        Self {
            config,
            renderer: PanelRenderer::new().with_visible_layers(DEFAULT_LAYER_MASK),
            batch: None,
            layout_size: (0, 0),
        }
    }

    /// Grid of panels covering `size_px`, inset by the configured gap.
    fn layout(&self, size_px: Vec2) -> (Vec<ScreenRect>, VisualColumns) {
        let cfg = &self.config;
        let rects: Vec<ScreenRect> = ScreenRect::grid(cfg.grid, cfg.grid, size_px)
            .into_iter()
            .map(|cell| inset(cell, cfg.gap_px))
            .collect();

        let visuals = rects
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let fill = if i % 2 == 0 {
                    Color::from_srgb_u8(214, 72, 72, 255)
                } else {
                    Color::from_srgb_u8(64, 104, 214, 255)
                };
                PrimitiveVisual::filled(fill, r.size)
                    .with_outline(Color::from_srgb_u8(240, 240, 240, 255), cfg.outline_px, cfg.outline_direction)
                    .with_corner_radii(CornerRadii::all(cfg.corner_radius_px))
            })
            .collect();

        (rects, visuals)
    }

    fn relayout(&mut self, width: u32, height: u32) {
        let (rects, visuals) = self.layout(Vec2::new(width as f32, height as f32));
        let result = match self.batch.as_mut() {
            Some(batch) => batch.replace(rects, visuals),
            None => PanelBatch::new(MaterialRef::SDF_PANEL, rects, visuals).map(|b| {
                self.batch = Some(b);
            }),
        };
        match result {
            Ok(()) => {
                self.layout_size = (width, height);
                log::info!("laid out {} panels for {width}x{height}", self.config.panel_count());
            }
            Err(err) => log::error!("panel layout failed: {err}"),
        }
    }

    /// Sweeps every outline between inward and outward.
    fn animate(&mut self, t: f32) {
        let Some(batch) = self.batch.as_mut() else { return; };
        let base = self.config.outline_direction;
        for i in 0..batch.len() {
            let phase = t * 1.5 + i as f32 * 0.05;
            let direction = (base + phase.sin()).clamp(-1.0, 1.0);
            if let Err(err) = batch.set_outline_direction(i, direction) {
                log::warn!("outline update failed: {err}");
                return;
            }
        }
    }
}

impl FrameHandler for PanelStudio {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> HostControl {
        let size = ctx.gpu.size();
        if size.width == 0 || size.height == 0 {
            return HostControl::Continue;
        }
        if self.layout_size != (size.width, size.height) {
            self.relayout(size.width, size.height);
        }
        self.animate(ctx.elapsed.as_secs_f32());

        let camera = Camera::new(size.width as f32, size.height as f32, self.config.ortho_half_height);

        let mut frame = match ctx.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match ctx.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => HostControl::Exit,
                    _ => HostControl::Continue,
                };
            }
        };

        // Clear pass; dropped before the encoder is reused.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tensha clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        if let Some(batch) = self.batch.as_mut() {
            let rctx = RenderCtx::new(ctx.gpu.device(), ctx.gpu.queue(), ctx.gpu.surface_format());
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            let mut backend = FrameBackend {
                renderer: &mut self.renderer,
                ctx: &rctx,
                target: &mut target,
                view_projection: camera.view_projection(),
            };
            // A failed update is logged by the batch; the clear still presents.
            let _ = batch.frame(&camera, &mut backend);
        }

        if ctx.frame_index % 600 == 0 {
            log::debug!("frame {} at {:.1}s", ctx.frame_index, ctx.elapsed.as_secs_f32());
        }

        ctx.window.pre_present_notify();
        ctx.gpu.submit(frame);
        HostControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_env();
    log::info!("tensha studio: {0}x{0} panels, outline {1}px", config.grid, config.outline_px);

    host::run(
        HostConfig {
            title: "Tensha Studio".to_string(),
            ..HostConfig::default()
        },
        PanelStudio::new(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn inset_shrinks_on_every_side() {
        let r = inset(ScreenRect::new(10.0, 20.0, 30.0, 40.0), 3.0);
        assert_eq!(r, ScreenRect::new(13.0, 23.0, 24.0, 34.0));
    }

    #[test]
    fn inset_of_tiny_cell_is_empty_not_flipped() {
        let r = inset(ScreenRect::new(0.0, 0.0, 4.0, 10.0), 3.0);
        assert_eq!(r.size, Vec2::new(0.0, 4.0));
        assert!(r.is_empty());
    }

    #[test]
    fn small_window_layout_has_no_negative_cells() {
        let studio = PanelStudio::new(StudioConfig::default());
        let (rects, visuals) = studio.layout(Vec2::new(100.0, 100.0));
        assert_eq!(rects.len(), 40 * 40);
        assert!(rects.iter().all(|r| r.size.x >= 0.0 && r.size.y >= 0.0));
        assert!(visuals.sdf_cell_size_px.iter().all(|s| s.x >= 0.0 && s.y >= 0.0));
    }

    #[test]
    fn panel_count_saturates_for_huge_grids() {
        let cfg = StudioConfig { grid: 1 << 20, ..StudioConfig::default() };
        assert_eq!(cfg.panel_count(), u32::MAX);
        assert_eq!(StudioConfig::default().panel_count(), 1600);
    }
}
