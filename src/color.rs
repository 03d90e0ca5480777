//! Hue-based particle colors.
//!
//! Particles carry an [`Hsl`] color picked once at spawn time. Surfaces
//! convert it to whatever their backend wants: sRGB floats for
//! the software canvas, or a CSS `hsl(...)` string for a browser context.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A color in hue/saturation/lightness form.
///
/// `hue` is in degrees (wraps at 360), `saturation` and `lightness` are
/// fractions in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to RGB components in `0.0..=1.0`.
    pub fn to_rgb(&self) -> Vec3 {
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);
        if s == 0.0 {
            return Vec3::splat(l);
        }

        let h = (self.hue / 360.0).rem_euclid(1.0);

        let hue_to_rgb = |p: f32, q: f32, mut t: f32| {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                return p + (q - p) * 6.0 * t;
            }
            if t < 1.0 / 2.0 {
                return q;
            }
            if t < 2.0 / 3.0 {
                return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
            }
            p
        };

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Vec3::new(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    }

    /// 8-bit RGBA with the given opacity.
    pub fn to_rgba8(&self, alpha: f32) -> [u8; 4] {
        let rgb = self.to_rgb();
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_byte(rgb.x), to_byte(rgb.y), to_byte(rgb.z), to_byte(alpha)]
    }

    /// CSS color string, e.g. `hsl(231.5, 70%, 60%)`.
    pub fn to_css(&self) -> String {
        format!(
            "hsl({:.1}, {:.0}%, {:.0}%)",
            self.hue,
            self.saturation * 100.0,
            self.lightness * 100.0
        )
    }
}

impl Default for Hsl {
    fn default() -> Self {
        Self::new(230.0, 0.7, 0.6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_primary_hues() {
        assert!(approx(Hsl::new(0.0, 1.0, 0.5).to_rgb(), Vec3::new(1.0, 0.0, 0.0)));
        assert!(approx(Hsl::new(120.0, 1.0, 0.5).to_rgb(), Vec3::new(0.0, 1.0, 0.0)));
        assert!(approx(Hsl::new(240.0, 1.0, 0.5).to_rgb(), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hue_wraps() {
        assert!(approx(Hsl::new(360.0, 1.0, 0.5).to_rgb(), Hsl::new(0.0, 1.0, 0.5).to_rgb()));
        assert!(approx(Hsl::new(-120.0, 1.0, 0.5).to_rgb(), Hsl::new(240.0, 1.0, 0.5).to_rgb()));
    }

    #[test]
    fn test_gray_when_unsaturated() {
        assert!(approx(Hsl::new(210.0, 0.0, 0.25).to_rgb(), Vec3::splat(0.25)));
    }

    #[test]
    fn test_particle_band_is_blue() {
        // hsl(230, 70%, 60%) is the middle of the spawn band
        let rgb = Hsl::new(230.0, 0.7, 0.6).to_rgb();
        assert!(rgb.z > rgb.y && rgb.z > rgb.x);
    }

    #[test]
    fn test_rgba8() {
        assert_eq!(Hsl::new(0.0, 1.0, 0.5).to_rgba8(1.0), [255, 0, 0, 255]);
        assert_eq!(Hsl::new(0.0, 0.0, 1.0).to_rgba8(0.0), [255, 255, 255, 0]);
    }

    #[test]
    fn test_css() {
        assert_eq!(Hsl::new(231.5, 0.7, 0.6).to_css(), "hsl(231.5, 70%, 60%)");
    }
}
