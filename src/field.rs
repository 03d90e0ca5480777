//! The particle field: state, per-tick update and rendering.
//!
//! A [`Field`] owns a fixed population of particles, the current surface
//! size and the last known pointer position. Hosts drive it with one
//! [`Field::tick`] per display refresh and forward resize and pointer
//! events in between.
//!
//! # Update order
//!
//! Each [`Field::step`] runs, per particle:
//!
//! 1. Integrate: `position += velocity`.
//! 2. Attract toward the pointer when it is closer than
//!    `attraction_radius` (and not exactly on top of the particle), with a
//!    linear falloff from `attraction_strength` at distance 0 to nothing at
//!    the radius.
//! 3. Optionally cap the speed (`max_speed`, off by default).
//! 4. Bounce: an axis outside `[0, size]` has its velocity negated.
//! 5. Clamp the position into `[0, width] × [0, height]`.
//!
//! # Example
//!
//! ```ignore
//! let mut field = Field::new(800.0, 600.0, 50);
//! let mut canvas = Canvas::new(800, 600);
//! field.on_pointer_move(400.0, 300.0);
//! field.tick(&mut canvas);
//! ```

use crate::config::FieldConfig;
use crate::connections::{find_links, Link};
use crate::input::HostEvent;
use crate::particle::Particle;
use crate::spawn::SpawnContext;
use crate::surface::Surface;
use crate::Vec2;

/// All particle state plus the inputs that steer it.
#[derive(Debug, Clone)]
pub struct Field {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    pointer: Option<Vec2>,
    config: FieldConfig,
}

impl Field {
    /// Create a field of `count` particles with default parameters.
    pub fn new(width: f32, height: f32, count: usize) -> Self {
        let config = FieldConfig {
            particle_count: count,
            ..FieldConfig::default()
        };
        Self::with_config(width, height, config)
    }

    /// Create a field from a full configuration.
    ///
    /// The configuration is assumed valid; see [`FieldConfig::validate`].
    pub fn with_config(width: f32, height: f32, config: FieldConfig) -> Self {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        let count = config.particle_count;

        let particles = (0..count)
            .map(|i| {
                let mut ctx = SpawnContext::new(i, width, height, config.seed);
                Particle::spawn(&mut ctx, &config)
            })
            .collect();

        log::debug!("spawned {} particles on a {}x{} surface", count, width, height);

        Self {
            particles,
            width,
            height,
            pointer: None,
            config,
        }
    }

    /// Create a field around an existing population.
    ///
    /// `config.particle_count` is overwritten with the population size.
    pub fn from_particles(width: f32, height: f32, particles: Vec<Particle>, mut config: FieldConfig) -> Self {
        config.particle_count = particles.len();
        Self {
            particles,
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            pointer: None,
            config,
        }
    }

    // ========== Host inputs ==========

    /// Record new surface dimensions. Particles are not moved; the next
    /// step clamps against the new bounds.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        log::trace!("field resized to {}x{}", self.width, self.height);
    }

    /// Record the pointer position in surface pixels.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    /// Dispatch a host event to the matching handler.
    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::Resize { width, height } => self.on_resize(width, height),
            HostEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
        }
    }

    // ========== Simulation ==========

    /// Advance every particle by one tick.
    pub fn step(&mut self) {
        let bounds = Vec2::new(self.width, self.height);
        let pointer = self.pointer;
        let config = &self.config;

        for particle in &mut self.particles {
            particle.position += particle.velocity;

            if let Some(pointer) = pointer {
                particle.velocity += attraction(particle.position, pointer, config);
            }

            if let Some(max_speed) = config.max_speed {
                particle.velocity = particle.velocity.clamp_length_max(max_speed);
            }

            let p = particle.position;
            if p.x < 0.0 || p.x > bounds.x {
                particle.velocity.x = -particle.velocity.x;
            }
            if p.y < 0.0 || p.y > bounds.y {
                particle.velocity.y = -particle.velocity.y;
            }

            particle.position = Vec2::new(p.x.clamp(0.0, bounds.x), p.y.clamp(0.0, bounds.y));
        }
    }

    /// Clear `surface` and draw discs, then links.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        for particle in &self.particles {
            surface.fill_circle(particle.position, particle.radius(), particle.color(), particle.alpha());
        }

        for link in self.links() {
            let first = &self.particles[link.a];
            let second = &self.particles[link.b];
            surface.stroke_line(first.position, second.position, first.color(), link.alpha);
        }
    }

    /// One display frame: [`step`](Self::step) then [`render`](Self::render).
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }

    /// Links the next render would draw.
    pub fn links(&self) -> Vec<Link> {
        find_links(&self.particles, &self.config)
    }

    // ========== Accessors ==========

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to particle motion. The population size cannot change.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Current surface size as `(width, height)`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Last pointer position, `None` until the pointer first moves.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

/// Velocity impulse pulling a particle at `position` toward `pointer`.
fn attraction(position: Vec2, pointer: Vec2, config: &FieldConfig) -> Vec2 {
    let delta = pointer - position;
    let distance = delta.length();
    // Zero distance has no direction.
    if distance < config.attraction_radius && distance > 0.0 {
        let force = (config.attraction_radius - distance) / config.attraction_radius;
        delta / distance * force * config.attraction_strength
    } else {
        Vec2::ZERO
    }
}

/// Negative and NaN sizes collapse to zero so clamping stays well defined.
fn sanitize_extent(value: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}
