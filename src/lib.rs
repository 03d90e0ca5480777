//! # Plexus - drifting particle backgrounds
//!
//! A small field of particles drifts across a surface, bouncing off its
//! edges. Particles near each other are joined by faint lines, and the
//! pointer gently pulls nearby particles toward it.
//!
//! The field is host-agnostic: it draws through the [`Surface`] trait and
//! listens to [`HostEvent`]s. Three hosts ship with the crate:
//!
//! - a native window ([`Simulation::run`], winit + wgpu),
//! - an offscreen [`Canvas`] ([`Simulation::run_headless`]),
//! - a browser `<canvas>` (the `web` module on `wasm32`).
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexus::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_particle_count(80)
//!         .with_background([0.02, 0.02, 0.06])
//!         .run()
//! }
//! ```
//!
//! ## Driving a field by hand
//!
//! ```ignore
//! let mut field = Field::new(800.0, 600.0, 50);
//! let mut canvas = Canvas::new(800, 600);
//!
//! field.handle(HostEvent::PointerMove { x: 400.0, y: 300.0 });
//! for _ in 0..60 {
//!     field.tick(&mut canvas);
//! }
//! canvas.save_png("frame.png")?;
//! ```
//!
//! ## Links
//!
//! | Strategy | Cost | Use |
//! |----------|------|-----|
//! | [`LinkStrategy::AllPairs`] | O(n²) | default, a few hundred particles |
//! | [`LinkStrategy::Grid`] | ~O(n) | large or dense fields |
//!
//! Both strategies find the same links in the same order.

pub mod color;
pub mod config;
pub mod connections;
pub mod error;
pub mod field;
#[cfg(not(target_arch = "wasm32"))]
mod gpu;
pub mod input;
pub mod particle;
pub mod raster;
mod simulation;
pub mod spatial;
mod spawn;
pub mod surface;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use color::Hsl;
pub use config::{Config, FieldConfig, LinkStrategy, Span, WindowConfig};
pub use connections::Link;
pub use error::{ConfigError, SurfaceError};
#[cfg(not(target_arch = "wasm32"))]
pub use error::{GpuError, SimulationError};
pub use field::Field;
pub use glam::{Vec2, Vec3, Vec4};
#[cfg(not(target_arch = "wasm32"))]
pub use gpu::Presenter;
pub use input::HostEvent;
pub use particle::Particle;
pub use raster::Canvas;
pub use simulation::Simulation;
pub use spatial::SpatialGrid;
pub use spawn::SpawnContext;
pub use surface::{DrawCommand, DrawList, Surface};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use plexus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Hsl;
    pub use crate::config::{Config, FieldConfig, LinkStrategy, Span, WindowConfig};
    pub use crate::error::{ConfigError, SurfaceError};
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::error::SimulationError;
    pub use crate::field::Field;
    pub use crate::input::HostEvent;
    pub use crate::particle::Particle;
    pub use crate::raster::Canvas;
    pub use crate::simulation::Simulation;
    pub use crate::surface::{DrawList, Surface};
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3, Vec4};
}
