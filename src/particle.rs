//! The particle record.

use crate::color::Hsl;
use crate::config::FieldConfig;
use crate::spawn::SpawnContext;
use crate::Vec2;

/// A point-mass drifting across the surface.
///
/// Position and velocity are public because the field integrates them
/// every tick; radius, color and alpha are fixed at spawn and only
/// readable.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    radius: f32,
    color: Hsl,
    alpha: f32,
}

impl Particle {
    /// Build a particle with explicit attributes.
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, color: Hsl, alpha: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            alpha,
        }
    }

    /// Sample every attribute independently from the config's ranges.
    pub fn spawn(ctx: &mut SpawnContext, config: &FieldConfig) -> Self {
        let position = ctx.random_in_rect();
        let velocity = ctx.random_velocity(config.spawn_speed);
        let radius = ctx.random_in(config.radius);
        let color = ctx.random_hsl(config.hue, config.saturation, config.lightness);
        let alpha = ctx.random_in(config.alpha);
        Self::new(position, velocity, radius, color, alpha)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn color(&self) -> Hsl {
        self.color
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}
