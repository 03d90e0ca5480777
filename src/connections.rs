//! Proximity links between nearby particles.
//!
//! Every unordered pair of distinct particles closer than the link
//! distance gets a line. Opacity falls off linearly with distance and is
//! scaled by the first particle's own alpha, so links are always faint:
//!
//! ```text
//! alpha = (1 - distance / link_distance) * link_alpha * first.alpha
//! ```

use crate::config::{FieldConfig, LinkStrategy};
use crate::particle::Particle;
use crate::spatial::SpatialGrid;
use crate::Vec2;

/// A line between particles `a` and `b`, with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    /// Stroke opacity, already scaled by particle `a`'s alpha.
    pub alpha: f32,
}

/// Opacity of a link of length `distance`.
#[inline]
pub fn link_alpha(distance: f32, link_distance: f32, scale: f32, particle_alpha: f32) -> f32 {
    (1.0 - distance / link_distance) * scale * particle_alpha
}

/// Find every link using the strategy selected in `config`.
///
/// Links are returned ordered by `(a, b)` whichever strategy runs.
pub fn find_links(particles: &[Particle], config: &FieldConfig) -> Vec<Link> {
    match config.link_strategy {
        LinkStrategy::AllPairs => all_pairs(particles, config),
        LinkStrategy::Grid => grid(particles, config),
    }
}

fn all_pairs(particles: &[Particle], config: &FieldConfig) -> Vec<Link> {
    let mut links = Vec::new();
    for (a, first) in particles.iter().enumerate() {
        for (b, second) in particles.iter().enumerate().skip(a + 1) {
            if let Some(link) = try_link(a, first, b, second.position, config) {
                links.push(link);
            }
        }
    }
    links
}

fn grid(particles: &[Particle], config: &FieldConfig) -> Vec<Link> {
    let positions: Vec<Vec2> = particles.iter().map(|p| p.position).collect();
    let grid = SpatialGrid::build(&positions, config.link_distance);

    let mut links = Vec::new();
    for (a, first) in particles.iter().enumerate() {
        let start = links.len();
        for b in grid.neighbors(first.position).filter(|&b| b > a) {
            if let Some(link) = try_link(a, first, b, positions[b], config) {
                links.push(link);
            }
        }
        links[start..].sort_unstable_by_key(|link| link.b);
    }
    links
}

fn try_link(a: usize, first: &Particle, b: usize, other: Vec2, config: &FieldConfig) -> Option<Link> {
    let distance = first.position.distance(other);
    if distance < config.link_distance {
        Some(Link {
            a,
            b,
            distance,
            alpha: link_alpha(distance, config.link_distance, config.link_alpha, first.alpha()),
        })
    } else {
        None
    }
}
