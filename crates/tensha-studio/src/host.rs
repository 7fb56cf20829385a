//! Single-window host: owns the winit event loop, the window and its GPU
//! context, and calls a `FrameHandler` once per redraw.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::gpu::{Gpu, GpuInit};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gpu: GpuInit,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "tensha".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            gpu: GpuInit::default(),
        }
    }
}

/// Control directive returned by the frame handler.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostControl {
    Continue,
    Exit,
}

/// Per-frame context.
///
/// - `'a` is the duration of the callback
/// - `'w` is the window borrow carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    /// Time since the window was created.
    pub elapsed: Duration,
    pub frame_index: u64,
}

pub trait FrameHandler {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> HostControl;
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct HostState<H: FrameHandler> {
    config: HostConfig,
    handler: H,
    entry: Option<WindowEntry>,
    started: Instant,
    frame_index: u64,
    failure: Option<anyhow::Error>,
}

/// Runs `handler` until the window closes or it returns [`HostControl::Exit`].
pub fn run<H: FrameHandler>(config: HostConfig, handler: H) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut state = HostState {
        config,
        handler,
        entry: None,
        started: Instant::now(),
        frame_index: 0,
        failure: None,
    };

    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;

    match state.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

impl<H: FrameHandler> HostState<H> {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop.create_window(attrs).context("failed to create window")?;
        let gpu_init = self.config.gpu.clone();

        let entry = WindowEntry::try_new(window, |w| pollster::block_on(Gpu::new(w, gpu_init)))
            .context("GPU initialization failed")?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        self.started = Instant::now();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl<H: FrameHandler> ApplicationHandler for HostState<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: panel parameters animate every frame.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else { return; };

        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key, .. }
                if key.state == ElementState::Pressed && key.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let elapsed = self.started.elapsed();
                let frame_index = self.frame_index;
                let handler = &mut self.handler;

                let control = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: fields.window,
                        gpu: fields.gpu,
                        elapsed,
                        frame_index,
                    };
                    handler.on_frame(&mut ctx)
                });

                self.frame_index = self.frame_index.wrapping_add(1);
                if control == HostControl::Exit {
                    self.entry = None;
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
