//! Configuration for fields and the windows that host them.
//!
//! Every value defaults to the behavior of the classic portfolio-site
//! particle background: 50 blue-ish points, a 100px attraction radius and a
//! 100px link distance. Configs can be built in code or loaded from JSON,
//! where every field is optional:
//!
//! ```ignore
//! let config = Config::from_json(r#"{ "field": { "particle_count": 120 } }"#)?;
//! assert_eq!(config.field.link_distance, 100.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An inclusive-exclusive sampling range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in `[0, 1)` into the span.
    ///
    /// The result stays below `max` even when rounding would land on it.
    /// A degenerate span always yields `min`.
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        let value = self.min + t * (self.max - self.min);
        if self.min < self.max && value >= self.max {
            below(self.max)
        } else {
            value
        }
    }

    /// Whether `value` lies in `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::Invalid(format!("{name} must be finite")));
        }
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "{name}.min ({}) must not exceed {name}.max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// The largest `f32` strictly less than a finite `x`.
fn below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f32::from_bits(x.to_bits() + 1)
    } else {
        -f32::from_bits(1)
    }
}

/// How proximity links are discovered during rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStrategy {
    /// Compare every unordered pair. O(N²), fine for the default 50 points.
    #[default]
    AllPairs,
    /// Bucket particles into a grid with cells one link distance wide and
    /// only compare neighboring cells.
    Grid,
}

/// Parameters of a particle field: spawning, motion and drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, fixed for the field's lifetime.
    pub particle_count: usize,
    /// Each velocity component is spawned in `[-spawn_speed/2, spawn_speed/2)`.
    pub spawn_speed: f32,
    /// Disc radius in pixels.
    pub radius: Span,
    /// Per-particle opacity.
    pub alpha: Span,
    /// Hue band in degrees.
    pub hue: Span,
    pub saturation: f32,
    pub lightness: f32,
    /// Pointer influence reaches this far (pixels).
    pub attraction_radius: f32,
    /// Velocity impulse per tick at zero distance.
    pub attraction_strength: f32,
    /// Optional cap on particle speed. `None` leaves velocity unbounded.
    pub max_speed: Option<f32>,
    /// Particles closer than this are linked (pixels).
    pub link_distance: f32,
    /// Link opacity at zero distance, before the particle's own alpha.
    pub link_alpha: f32,
    pub link_strategy: LinkStrategy,
    /// Fixed RNG seed for reproducible spawns.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            spawn_speed: 0.5,
            radius: Span::new(1.0, 3.0),
            alpha: Span::new(0.5, 1.0),
            hue: Span::new(200.0, 260.0),
            saturation: 0.7,
            lightness: 0.6,
            attraction_radius: 100.0,
            attraction_strength: 0.03,
            max_speed: None,
            link_distance: 100.0,
            link_alpha: 0.2,
            link_strategy: LinkStrategy::AllPairs,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Check that every value is usable by the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.radius.validate("radius")?;
        self.alpha.validate("alpha")?;
        self.hue.validate("hue")?;

        if self.radius.min <= 0.0 {
            return Err(ConfigError::Invalid("radius.min must be > 0".into()));
        }
        if self.alpha.min < 0.0 || self.alpha.max > 1.0 {
            return Err(ConfigError::Invalid("alpha must lie within [0, 1]".into()));
        }
        for (name, value) in [("saturation", self.saturation), ("lightness", self.lightness)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{name} must lie within [0, 1]")));
            }
        }
        for (name, value) in [
            ("attraction_radius", self.attraction_radius),
            ("link_distance", self.link_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be > 0")));
            }
        }
        for (name, value) in [
            ("spawn_speed", self.spawn_speed),
            ("attraction_strength", self.attraction_strength),
            ("link_alpha", self.link_alpha),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if let Some(max) = self.max_speed {
            if !(max.is_finite() && max > 0.0) {
                return Err(ConfigError::Invalid("max_speed must be > 0".into()));
            }
        }
        Ok(())
    }
}

/// Parameters of the native window host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner width in logical pixels.
    pub width: u32,
    /// Initial inner height in logical pixels.
    pub height: u32,
    /// Color the transparent canvas is composited over (sRGB, 0-1).
    pub background: [f32; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "plexus".to_string(),
            width: 1280,
            height: 720,
            background: [0.04, 0.05, 0.1],
        }
    }
}

/// Complete configuration: the field plus its native window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field: FieldConfig,
    pub window: WindowConfig,
}

impl Config {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.field.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
