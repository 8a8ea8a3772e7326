//! Viewer builder and runner

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::animator::Animator;
use crate::attractor::{generate_with, LorenzParams};
use crate::capture::{PngSequence, RowOrder};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::gpu::{Camera, GpuState, SceneStyle, SphereInstance};
use crate::time::FrameTimer;

const WINDOW_TITLE: &str = "Lorenz Attractor";

/// Distance of the camera from the attractor's center at startup.
const CAMERA_DISTANCE: f32 = 70.0;

/// An animated attractor window.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// Viewer::new()
///     .with_samples(30_000)
///     .with_threads(8)
///     .with_capture_dir("frames")
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    /// Create a viewer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Set the number of trajectory points (and spheres).
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.config.samples = samples;
        self
    }

    /// Set the number of workers per animation pass.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set how many frames it takes to move from one point to the next.
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.config.steps = steps;
        self
    }

    /// Set the integration step and Lorenz constants.
    pub fn with_lorenz(mut self, params: LorenzParams) -> Self {
        self.config.lorenz = params;
        self
    }

    pub fn with_sphere_radius(mut self, radius: f32) -> Self {
        self.config.sphere_radius = radius;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Write every rendered frame to `dir/frame_<N>.png`.
    pub fn with_capture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.capture_dir = Some(dir.into());
        self
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Run the viewer. This blocks until the window is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let config = self.config;
        config.validate()?;

        log::info!(
            "integrating {} points (dt={}, sigma={}, rho={}, beta={})",
            config.samples,
            config.lorenz.dt,
            config.lorenz.sigma,
            config.lorenz.rho,
            config.lorenz.beta
        );
        let trajectory = generate_with(&config.lorenz, config.samples);
        let center = trajectory.center();

        let animator = Animator::new(trajectory, config.threads, config.steps);
        log::info!(
            "animating with {} workers over {} chunks, {} steps per point",
            config.threads,
            animator.chunks().len(),
            config.steps
        );

        let mut instances = vec![SphereInstance::default(); animator.trajectory().len()];
        animator.place_all(&mut instances);

        let sink = match &config.capture_dir {
            Some(dir) => {
                let sink = PngSequence::create(dir, RowOrder::TopDown)?;
                log::info!("capturing frames to {}", sink.dir().display());
                Some(sink)
            }
            None => None,
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(config, animator, instances, center, sink);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    config: ViewerConfig,
    animator: Animator,
    instances: Vec<SphereInstance>,
    center: Vec3,
    sink: Option<PngSequence>,
    timer: FrameTimer,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<ViewerError>,
}

impl App {
    fn new(
        config: ViewerConfig,
        animator: Animator,
        instances: Vec<SphereInstance>,
        center: Vec3,
        sink: Option<PngSequence>,
    ) -> Self {
        Self {
            window: None,
            gpu_state: None,
            config,
            animator,
            instances,
            center,
            sink,
            timer: FrameTimer::new(),
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let style = SceneStyle {
            sphere_radius: self.config.sphere_radius,
            ..SceneStyle::default()
        };
        let gpu_state = pollster::block_on(GpuState::new(
            window,
            &self.instances,
            Camera::new(self.center, CAMERA_DISTANCE),
            style,
            self.sink.is_some(),
        ))?;

        if self.sink.is_some() && !gpu_state.can_capture() {
            self.sink = None;
        }
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.timer.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {}", WINDOW_TITLE, self.timer.summary()));
            }
        }

        self.animator.advance(&mut self.instances);

        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };
        let frame = match gpu_state.render(&self.instances, self.sink.is_some()) {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                gpu_state.reconfigure();
                None
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                None
            }
            Err(e) => {
                log::error!("render error: {:?}", e);
                None
            }
        };

        // Every animated frame takes a number, rendered or not
        if let Some(sink) = &mut self.sink {
            sink.record(frame.as_ref());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;

                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state.camera.orbit(dx as f32, dy as f32);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
