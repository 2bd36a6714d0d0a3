//! Application event loop.
//!
//! [`run`] opens the window and drives an [`App`] through winit's
//! [`ApplicationHandler`]. Each redraw follows the same steps:
//!
//! 1. Apply the input gathered since the last frame to the camera
//! 2. Snapshot camera, cube color, viewport and cursor into a [`FrameContext`]
//! 3. [`render::compose`] the draws for that snapshot
//! 4. Upload their uniforms and overlay vertices
//! 5. Record scene draws, then overlay draws, into one render pass
//! 6. Present

use std::{iter, sync::Arc};

use anyhow::Context as _;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window},
};

use crate::{
    camera::{Camera, CameraController},
    config::Config,
    context::Context,
    data_structures::cube::{CUBE_INDICES, CUBE_VERTICES},
    frame::FrameContext,
    logging,
    overlay::{CursorState, FreeCursor},
    pipelines::basic::{mk_overlay_pipeline, mk_pipeline_layout, mk_scene_pipeline},
    render::{self, DRAWS_PER_FRAME, Pass, Render},
    resources::{GpuMesh, LineBuffer, UniformSlot, uniform_bind_group_layout},
    terrain::TerrainMesh,
};

const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

pub(crate) struct AppState {
    ctx: Context,
    scene_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,
    terrain: GpuMesh,
    cube: GpuMesh,
    tracer_lines: LineBuffer,
    crosshair_lines: LineBuffer,
    /// One per draw, in [`render::compose`] order.
    slots: Vec<UniformSlot>,
    camera: Camera,
    controller: CameraController,
    cube_color: [f32; 3],
    captured: bool,
    /// Last cursor position in logical pixels.
    cursor_position: [f64; 2],
    is_surface_configured: bool,
    frames: u32,
    fps_since: Instant,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config.vsync, config.clear_color).await?;

        let layout = uniform_bind_group_layout(&ctx.device);
        let pipeline_layout = mk_pipeline_layout(&ctx.device, &layout);
        let scene_pipeline = mk_scene_pipeline(&ctx.device, &ctx.config, &pipeline_layout);
        let overlay_pipeline = mk_overlay_pipeline(&ctx.device, &ctx.config, &pipeline_layout);

        let started = Instant::now();
        let mesh = TerrainMesh::build();
        log::info!(
            "Terrain built: {} vertices, {} indices in {:?}",
            mesh.vertices.len(),
            mesh.indices.len(),
            started.elapsed()
        );
        let terrain = GpuMesh::new(&ctx.device, "Terrain", &mesh.vertices, &mesh.indices);
        let cube = GpuMesh::new(&ctx.device, "Cube", &CUBE_VERTICES, &CUBE_INDICES);

        let tracer_lines = LineBuffer::new(&ctx.device, "Tracer Buffer", 2);
        let crosshair_lines = LineBuffer::new(&ctx.device, "Crosshair Buffer", 4);
        let slots = (0..DRAWS_PER_FRAME)
            .map(|i| UniformSlot::new(&ctx.device, &layout, &format!("Draw {} Uniform", i)))
            .collect();

        let is_surface_configured = !ctx.viewport.is_degenerate();
        if is_surface_configured {
            ctx.reconfigure();
        }

        Ok(Self {
            ctx,
            scene_pipeline,
            overlay_pipeline,
            terrain,
            cube,
            tracer_lines,
            crosshair_lines,
            slots,
            camera: config.camera.camera(),
            controller: CameraController::new(
                config.camera.mouse_sensitivity,
                config.camera.pitch_limit,
            ),
            cube_color: config.cube_color,
            captured: false,
            cursor_position: [0.0, 0.0],
            is_surface_configured,
            frames: 0,
            fps_since: Instant::now(),
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::info!("Viewport resized to {}x{}", width, height);
        self.is_surface_configured = self.ctx.resize(width, height);
    }

    fn set_captured(&mut self, captured: bool) {
        let window = self.ctx.window();
        if captured {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("Cursor grab unavailable: {}", e);
            }
            window.set_cursor_visible(false);
            log::info!("Cursor captured");
        } else {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("Cursor release failed: {}", e);
            }
            window.set_cursor_visible(true);
            log::info!("Cursor released");
        }
        self.captured = captured;
    }

    fn cursor_state(&self) -> CursorState {
        if self.captured {
            return CursorState::Captured;
        }
        let viewport = self.ctx.viewport;
        let window = self.ctx.window();
        let logical: LogicalSize<u32> = window.inner_size().to_logical(window.scale_factor());
        CursorState::Free(FreeCursor {
            position: self.cursor_position,
            window_size: [logical.width, logical.height],
            framebuffer_size: [viewport.width, viewport.height],
        })
    }

    fn frame_context(&self) -> FrameContext {
        FrameContext {
            camera: self.camera,
            color: self.cube_color,
            viewport: self.ctx.viewport,
            cursor: self.cursor_state(),
        }
    }

    fn line_buffer(&self, draw: &Render) -> Option<&LineBuffer> {
        match draw {
            Render::Tracer { .. } => Some(&self.tracer_lines),
            Render::Crosshair { .. } => Some(&self.crosshair_lines),
            Render::Terrain(_) | Render::Cube(_) => None,
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) {
        if self.controller.handle_window_events(event) {
            return;
        }
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.set_captured(!self.captured),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !self.captured => self.set_captured(true),
            WindowEvent::CursorMoved { position, .. } if !self.captured => {
                let scale = self.ctx.window().scale_factor();
                let logical = position.to_logical::<f64>(scale);
                self.cursor_position = [logical.x, logical.y];
            }
            _ => {}
        }
    }

    fn tick_fps(&mut self) {
        self.frames += 1;
        let elapsed = self.fps_since.elapsed();
        if elapsed >= FPS_LOG_INTERVAL {
            log::debug!("{:.1} fps", self.frames as f64 / elapsed.as_secs_f64());
            self.frames = 0;
            self.fps_since = Instant::now();
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.controller.update_camera(&mut self.camera);

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let draws = render::compose(&self.frame_context());
        for (draw, slot) in draws.iter().zip(&self.slots) {
            slot.write(&self.ctx.queue, draw.uniform());
            if let (Some(vertices), Some(lines)) = (draw.dynamic_vertices(), self.line_buffer(draw)) {
                lines.write(&self.ctx.queue, vertices);
            }
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for (draw, slot) in draws.iter().zip(&self.slots) {
                render_pass.set_pipeline(match draw.pass() {
                    Pass::Scene => &self.scene_pipeline,
                    Pass::Overlay => &self.overlay_pipeline,
                });
                render_pass.set_bind_group(0, &slot.bind_group, &[]);
                let mesh = match draw {
                    Render::Terrain(_) => Some(&self.terrain),
                    Render::Cube(_) => Some(&self.cube),
                    Render::Tracer { .. } | Render::Crosshair { .. } => None,
                };
                if let Some(mesh) = mesh {
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
                } else if let Some(lines) = self.line_buffer(draw) {
                    render_pass.set_vertex_buffer(0, lines.buffer.slice(..));
                    render_pass.draw(0..lines.vertex_count, 0..1);
                }
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        self.tick_fps();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    state: Option<AppState>,
    /// Set when startup fails inside the event loop; returned by [`run`].
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create the window")?,
        );
        let mut state = self
            .async_runtime
            .block_on(AppState::new(window, &self.config))?;
        if self.config.start_captured {
            state.set_captured(true);
        }
        Ok(state)
    }
}

impl ApplicationHandler<()> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                log::info!("Entering main loop");
                state.ctx.window().request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Startup failed: {:#}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if state.captured {
                state.controller.handle_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window().inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => log::error!("Unable to render frame: {}", e),
            },
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.ctx.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Leaving main loop");
    }
}

/// Open the window and run until it is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: Could not initialize logger: {:#}", e);
    }
    log::info!("Starting {}", config.title);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.error.take() {
        return Err(e);
    }
    log::info!("Exited cleanly");
    Ok(())
}
