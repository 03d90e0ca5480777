//! Simulation builder and runner
//!
//! [`Simulation`] gathers a [`Config`] through a chain of `with_*` calls and
//! then hands it to a host: a native window ([`Simulation::run`]) or an
//! offscreen canvas ([`Simulation::run_headless`]).
//!
//! ```ignore
//! Simulation::new()
//!     .with_particle_count(120)
//!     .with_title("plexus")
//!     .run()?;
//! ```

use crate::config::{Config, LinkStrategy};
use crate::error::ConfigError;
use crate::field::Field;
use crate::raster::Canvas;

#[cfg(not(target_arch = "wasm32"))]
use {
    crate::error::SimulationError,
    crate::gpu::Presenter,
    crate::input::HostEvent,
    crate::time::FrameClock,
    std::sync::Arc,
    winit::{
        application::ApplicationHandler,
        dpi::{LogicalSize, PhysicalSize},
        event::WindowEvent,
        event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
        window::{Window, WindowId},
    },
};

/// A particle field builder.
///
/// Use method chaining to configure, then call `.run()` to start.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    config: Config,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration, e.g. one loaded from JSON.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config.field.particle_count = count;
        self
    }

    /// Seed spawning so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.field.seed = Some(seed);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    /// Initial window size. Headless runs use it as the canvas size.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.window.width = width;
        self.config.window.height = height;
        self
    }

    /// Color behind the particles (sRGB, 0-1).
    pub fn with_background(mut self, rgb: [f32; 3]) -> Self {
        self.config.window.background = rgb;
        self
    }

    pub fn with_link_strategy(mut self, strategy: LinkStrategy) -> Self {
        self.config.field.link_strategy = strategy;
        self
    }

    /// Cap particle speed. Uncapped unless set.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.config.field.max_speed = Some(max_speed);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `ticks` frames against an offscreen canvas and return the result.
    pub fn run_headless(self, ticks: usize) -> Result<(Field, Canvas), ConfigError> {
        self.config.field.validate()?;

        let Config { field, window } = self.config;
        let mut canvas = Canvas::new(window.width, window.height);
        let mut field = Field::with_config(window.width as f32, window.height as f32, field);

        for _ in 0..ticks {
            field.tick(&mut canvas);
        }
        log::debug!("headless run finished after {} ticks", ticks);

        Ok((field, canvas))
    }

    /// Open a window and run until it is closed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(self) -> Result<(), SimulationError> {
        self.config.field.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
struct App {
    config: Config,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    field: Option<Field>,
    canvas: Canvas,
    clock: FrameClock,
    error: Option<SimulationError>,
}

#[cfg(not(target_arch = "wasm32"))]
impl App {
    fn new(config: Config) -> Self {
        Self {
            config,
            window: None,
            presenter: None,
            field: None,
            canvas: Canvas::new(0, 0),
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.canvas.resize(size.width, size.height);

        match &mut self.field {
            Some(field) => field.on_resize(size.width as f32, size.height as f32),
            None => {
                self.field = Some(Field::with_config(
                    size.width as f32,
                    size.height as f32,
                    self.config.field.clone(),
                ))
            }
        }

        let presenter = pollster::block_on(Presenter::new(window.clone(), self.config.window.background))?;
        self.presenter = Some(presenter);

        log::info!("window ready at {}x{}", size.width, size.height);
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.canvas.resize(size.width, size.height);
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(size);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(field), Some(presenter)) = (&self.window, &mut self.field, &mut self.presenter) else {
            return;
        };

        field.tick(&mut self.canvas);

        match presenter.present(&self.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = PhysicalSize::new(presenter.config.width, presenter.config.height);
                presenter.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("frame skipped: {:?}", e),
        }

        if let Some(fps) = self.clock.update() {
            window.set_title(&format!("{} - {:.0} fps", self.config.window.title, fps));
            log::debug!("{:.1} fps over {} frames", fps, self.clock.frame());
        }

        window.request_redraw();
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                log::error!("failed to start: {}", err);
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(field), Some(host_event)) = (&mut self.field, HostEvent::from_window_event(&event)) {
            field.handle(host_event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
