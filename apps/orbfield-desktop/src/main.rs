use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use orbfield_common::OrbId;
use orbfield_input::{Action, PointerTracker, ScrollTracker, LINE_HEIGHT_PX};
use orbfield_kernel::scene::ORB_COUNT;
use orbfield_kernel::{Scene, SceneEvent};
use orbfield_pick::{pick_scene, Ray};
use orbfield_render_wgpu::{OrbCamera, WgpuRenderer};
use orbfield_tools::{FrameTimer, SceneInspector};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "orbfield-desktop", about = "Orbfield desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// RNG seed for the orb field
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of orbs to spawn
    #[arg(long, default_value_t = ORB_COUNT)]
    orbs: usize,
}

/// Application state.
struct AppState {
    scene: Scene,
    camera: OrbCamera,
    pointer: PointerTracker,
    scroll: ScrollTracker,
    timer: FrameTimer,
    hovered: Option<OrbId>,
    show_inspector: bool,
    seed: u64,
    orb_target: usize,
    start: Instant,
    last_frame: Instant,
}

impl AppState {
    fn new(seed: u64, orbs: usize) -> Self {
        let mut scene = Scene::with_seed(seed);
        scene.populate(orbs);

        Self {
            scene,
            camera: OrbCamera::default(),
            pointer: PointerTracker::new(1280, 720),
            scroll: ScrollTracker::new(),
            timer: FrameTimer::new(120),
            hovered: None,
            show_inspector: true,
            seed,
            orb_target: orbs,
            start: Instant::now(),
            last_frame: Instant::now(),
        }
    }

    /// Scene time since startup, the clock burst deadlines live on.
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn pointer_ray(&self) -> Ray {
        Ray::through_pointer(self.camera.inv_view_projection(), self.pointer.ndc())
    }

    /// Single entry point for all mapped input.
    fn apply(&mut self, action: Action) {
        match action {
            Action::PointerMoved { x, y } => {
                self.pointer.pointer_moved(x, y);
            }
            Action::Click => {
                let now = self.now();
                let ray = self.pointer_ray();
                let hits = pick_scene(&self.scene, &ray);
                for hit in &hits {
                    if self.scene.explode_orb(hit.id, now).is_err() {
                        tracing::warn!(id = ?hit.id, "picked orb vanished before explosion");
                    }
                }
                if !hits.is_empty() {
                    self.hovered = None;
                }
            }
            Action::Scroll(delta) => {
                let offset = self.scroll.scroll(delta);
                self.camera.apply_scroll(offset);
                self.scene.apply_scroll(offset);
            }
            Action::Resize { width, height } => {
                self.camera.set_aspect(width, height);
                self.pointer.viewport_resized(width, height);
            }
            Action::Noop => {}
        }
    }

    /// One simulation pass: sweep due bursts, advance the animation, paint
    /// hovered orbs, and drain scene events into the logs.
    fn update(&mut self) {
        let now = self.now();
        self.scene.sweep_expired(now);
        self.scene.advance(now);

        let ray = self.pointer_ray();
        let hits = pick_scene(&self.scene, &ray);
        self.hovered = hits.first().map(|h| h.id);
        for hit in &hits {
            self.scene.highlight_orb(hit.id);
        }

        for event in self.scene.drain_events() {
            match event {
                SceneEvent::OrbSpawned { id } => tracing::debug!(?id, "orb spawned"),
                SceneEvent::OrbExploded { id, particles } => {
                    tracing::info!(?id, particles, "orb exploded");
                }
                SceneEvent::BurstExpired { particles } => {
                    tracing::debug!(particles, "burst expired");
                }
            }
        }
    }

    fn reset_field(&mut self) {
        self.scene = Scene::with_seed(self.seed);
        self.scene.populate(self.orb_target);
        self.hovered = None;
        tracing::info!(seed = self.seed, orbs = self.orb_target, "field reset");
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_inspector {
            return;
        }

        let summary = SceneInspector::summary(&self.scene);

        egui::SidePanel::left("inspector")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Orbfield");
                ui.separator();
                ui.label(format!("Frame: {}  Seed: {}", summary.frame, summary.seed));
                ui.label(format!("Orbs: {}", summary.orb_count));
                ui.label(format!(
                    "Particles: {} in {} burst(s)",
                    summary.particle_count, summary.pending_bursts
                ));
                ui.label(format!("Camera depth: {:.1}", self.camera.position.z));
                ui.label(format!("Scroll offset: {:.0} px", self.scroll.offset()));
                match self.hovered {
                    Some(id) => ui.label(format!("Hovered: {}", &id.0.to_string()[..8])),
                    None => ui.label("Hovered: none"),
                };
                ui.separator();

                ui.heading("Timing");
                ui.label(format!(
                    "Frame: {:.2} ms avg",
                    self.timer.average().as_secs_f64() * 1000.0
                ));
                ui.label(format!(
                    "{:.2} ms min / {:.2} ms max",
                    self.timer.min().as_secs_f64() * 1000.0,
                    self.timer.max().as_secs_f64() * 1000.0
                ));
                ui.separator();

                ui.heading("Tools");
                if ui.button("Spawn Orb").clicked() {
                    self.scene.populate(1);
                }
                if ui.button("Explode Hovered").clicked() {
                    if let Some(id) = self.hovered {
                        let now = self.now();
                        if self.scene.explode_orb(id, now).is_ok() {
                            self.hovered = None;
                        }
                    }
                }
                if ui.button("Reset Field").clicked() {
                    self.reset_field();
                }

                ui.separator();
                ui.small("F1: Toggle Inspector | Click: Explode | Scroll: Dolly");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(seed: u64, orbs: usize) -> Self {
        Self {
            state: AppState::new(seed, orbs),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Orbfield")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("orbfield_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.apply(Action::Resize {
            width: config.width,
            height: config.height,
        });

        let renderer = WgpuRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                    self.state.apply(Action::Resize {
                        width: config.width,
                        height: config.height,
                    });
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.apply(Action::PointerMoved {
                    x: position.x,
                    y: position.y,
                });
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                self.state.apply(Action::Click);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scroll-up as positive y; the virtual scroll
                // offset grows downward like a document scrollbar.
                let action = match delta {
                    MouseScrollDelta::LineDelta(_, y) => Action::Scroll(-y * LINE_HEIGHT_PX),
                    MouseScrollDelta::PixelDelta(pos) => Action::Scroll(-(pos.y as f32)),
                };
                self.state.apply(action);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match key {
                KeyCode::F1 => {
                    self.state.show_inspector = !self.state.show_inspector;
                }
                KeyCode::Escape => {
                    event_loop.exit();
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                self.state.timer.record(now - self.state.last_frame);
                self.state.last_frame = now;
                self.state.update();

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, &self.state.camera, &self.state.scene);
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("orbfield-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.seed, cli.orbs);
    event_loop.run_app(&mut app)?;

    Ok(())
}
