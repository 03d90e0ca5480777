//! Spawn context for particle initialization.
//!
//! Every particle attribute is an independent uniform draw. `SpawnContext`
//! wraps the RNG and exposes the few sampling shapes a 2D field needs.

use crate::color::Hsl;
use crate::config::Span;
use crate::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Context handed to [`Particle::spawn`](crate::Particle::spawn).
///
/// ```ignore
/// let mut ctx = SpawnContext::new(0, 800.0, 600.0, Some(7));
/// let position = ctx.random_in_rect();
/// let velocity = ctx.random_velocity(0.5);
/// ```
pub struct SpawnContext {
    /// Surface width at spawn time.
    pub width: f32,
    /// Surface height at spawn time.
    pub height: f32,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context for the particle at `index`.
    ///
    /// With a `seed`, the draws depend only on `(seed, index)`; without one
    /// each particle gets an entropy-seeded generator.
    pub fn new(index: usize, width: f32, height: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(mix_seed(seed, index as u64)),
            None => SmallRng::from_entropy(),
        };

        Self { width, height, rng }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[span.min, span.max)`. Degenerate spans return `min`.
    #[inline]
    pub fn random_in(&mut self, span: Span) -> f32 {
        let t = self.random();
        span.lerp(t)
    }

    // ========== Shape helpers ==========

    /// Random point in `[0, width) × [0, height)`.
    ///
    /// Zero-sized surfaces yield the origin.
    pub fn random_in_rect(&mut self) -> Vec2 {
        Vec2::new(self.random() * self.width, self.random() * self.height)
    }

    /// Random velocity with each component in `[-speed/2, speed/2)`.
    pub fn random_velocity(&mut self, speed: f32) -> Vec2 {
        Vec2::new(
            (self.random() - 0.5) * speed,
            (self.random() - 0.5) * speed,
        )
    }

    /// Random color with hue drawn from `hue` and fixed saturation/lightness.
    pub fn random_hsl(&mut self, hue: Span, saturation: f32, lightness: f32) -> Hsl {
        Hsl::new(self.random_in(hue), saturation, lightness)
    }
}

/// SplitMix64 finalizer over `seed + index`, so neighboring indices get
/// unrelated streams.
fn mix_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_in_rect_bounds() {
        let mut ctx = SpawnContext::new(0, 640.0, 480.0, Some(1));
        for _ in 0..1000 {
            let pos = ctx.random_in_rect();
            assert!(pos.x >= 0.0 && pos.x <= 640.0);
            assert!(pos.y >= 0.0 && pos.y <= 480.0);
        }
    }

    #[test]
    fn test_random_in_rect_zero_sized() {
        let mut ctx = SpawnContext::new(0, 0.0, 0.0, Some(1));
        assert_eq!(ctx.random_in_rect(), Vec2::ZERO);
    }

    #[test]
    fn test_random_velocity_range() {
        let mut ctx = SpawnContext::new(3, 1.0, 1.0, Some(99));
        for _ in 0..1000 {
            let v = ctx.random_velocity(0.5);
            assert!(v.x >= -0.25 && v.x < 0.25);
            assert!(v.y >= -0.25 && v.y < 0.25);
        }
    }

    #[test]
    fn test_random_in_degenerate_span() {
        let mut ctx = SpawnContext::new(0, 1.0, 1.0, Some(5));
        assert_eq!(ctx.random_in(Span::new(2.0, 2.0)), 2.0);
    }

    #[test]
    fn test_random_in_stays_below_max() {
        let mut ctx = SpawnContext::new(0, 1.0, 1.0, Some(8));
        let radius = Span::new(1.0, 3.0);
        for _ in 0..10_000 {
            let r = ctx.random_in(radius);
            assert!(r >= 1.0 && r < 3.0);
        }
    }

    #[test]
    fn test_seeded_contexts_repeat() {
        let mut a = SpawnContext::new(4, 1.0, 1.0, Some(42));
        let mut b = SpawnContext::new(4, 1.0, 1.0, Some(42));
        let mut c = SpawnContext::new(5, 1.0, 1.0, Some(42));
        let first = a.random();
        assert_eq!(first, b.random());
        assert_ne!(first, c.random());
    }
}
