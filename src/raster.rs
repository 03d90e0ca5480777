//! Software canvas: a [`Surface`] backed by an RGBA image.
//!
//! Drawing composites source-over in straight (non-premultiplied) sRGB,
//! the same way a browser 2D context does, so the native window and the
//! web page look alike. Discs and lines are anti-aliased by pixel-center
//! coverage. Anything outside the canvas is clipped.

use std::ops::Range;
use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::color::Hsl;
use crate::error::SurfaceError;
use crate::surface::Surface;
use crate::{Vec2, Vec3};

/// An offscreen RGBA8 drawing target.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// A transparent canvas. Zero-sized canvases are allowed.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Reallocate to a new size. Contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Tightly packed RGBA8 rows, top to bottom.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        self.image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        log::info!("wrote snapshot {}", path.as_ref().display());
        Ok(())
    }

    /// Composite `rgb` at opacity `alpha` over the pixel at `(x, y)`.
    fn blend(&mut self, x: u32, y: u32, rgb: Vec3, alpha: f32) {
        let dst = self.image.get_pixel_mut(x, y);
        let [dr, dg, db, da] = dst.0;
        let da = da as f32 / 255.0;
        let sa = alpha.clamp(0.0, 1.0);

        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            *dst = Rgba([0, 0, 0, 0]);
            return;
        }

        let mix = |s: f32, d: u8| {
            let d = d as f32 / 255.0;
            let c = (s * sa + d * da * (1.0 - sa)) / out_a;
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        };

        *dst = Rgba([
            mix(rgb.x, dr),
            mix(rgb.y, dg),
            mix(rgb.z, db),
            (out_a * 255.0).round() as u8,
        ]);
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsl, alpha: f32) {
        if !center.is_finite() || !(radius > 0.0 && radius.is_finite()) || !(alpha > 0.0) {
            return;
        }

        let rgb = color.to_rgb();
        let reach = radius + 1.0;
        let xs = pixel_span(center.x - reach, center.x + reach, self.width());
        let ys = pixel_span(center.y - reach, center.y + reach, self.height());

        for y in ys {
            for x in xs.clone() {
                let d = pixel_center(x, y).distance(center);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, rgb, alpha * coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsl, alpha: f32) {
        if !from.is_finite() || !to.is_finite() || !(alpha > 0.0) {
            return;
        }

        let rgb = color.to_rgb();
        let lo = from.min(to) - Vec2::ONE;
        let hi = from.max(to) + Vec2::ONE;
        let xs = pixel_span(lo.x, hi.x, self.width());
        let ys = pixel_span(lo.y, hi.y, self.height());

        for y in ys {
            for x in xs.clone() {
                let d = distance_to_segment(pixel_center(x, y), from, to);
                let coverage = (1.0 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, rgb, alpha * coverage);
                }
            }
        }
    }
}

#[inline]
fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// Pixel indices overlapping `[lo, hi]`, clipped to `0..limit`.
fn pixel_span(lo: f32, hi: f32, limit: u32) -> Range<u32> {
    let lo = lo.floor().max(0.0);
    let hi = hi.ceil().min(limit as f32);
    if lo < hi {
        lo as u32..hi as u32
    } else {
        0..0
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Hsl = Hsl::new(0.0, 1.0, 0.5);
    const BLUE: Hsl = Hsl::new(240.0, 1.0, 0.5);

    fn painted(canvas: &Canvas) -> usize {
        canvas.image().pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(8, 4);
        assert_eq!((canvas.width(), canvas.height()), (8, 4));
        assert_eq!(canvas.as_raw().len(), 8 * 4 * 4);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_opaque_disc_center() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, RED, 1.0);
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_translucent_disc_keeps_color() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, RED, 0.5);
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 128]));
    }

    #[test]
    fn test_source_over_blend() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, BLUE, 1.0);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, RED, 0.5);
        let [r, g, b, a] = canvas.pixel(10, 10).unwrap();
        assert_eq!(a, 255);
        assert_eq!(g, 0);
        assert!((r as i32 - 128).abs() <= 1);
        assert!((b as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_line_paints_along_segment_only() {
        let mut canvas = Canvas::new(40, 40);
        canvas.stroke_line(Vec2::new(5.5, 20.5), Vec2::new(35.5, 20.5), BLUE, 1.0);
        assert_eq!(canvas.pixel(20, 20), Some([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(20, 30), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(39, 20), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 2.0, RED, 1.0);
        assert!(painted(&canvas) > 0);
        canvas.clear();
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_clipping_never_panics() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(-100.0, -100.0), 3.0, RED, 1.0);
        canvas.fill_circle(Vec2::new(1.0e9, 5.0), 3.0, RED, 1.0);
        canvas.stroke_line(Vec2::new(-50.0, -50.0), Vec2::new(-10.0, -10.0), RED, 1.0);
        canvas.fill_circle(Vec2::new(f32::NAN, 5.0), 3.0, RED, 1.0);
        canvas.stroke_line(Vec2::ZERO, Vec2::new(f32::INFINITY, 0.0), RED, 1.0);
        assert_eq!(painted(&canvas), 0);

        // Partially visible disc at the corner
        canvas.fill_circle(Vec2::ZERO, 3.0, RED, 1.0);
        assert!(painted(&canvas) > 0);
    }

    #[test]
    fn test_zero_sized_canvas() {
        let mut canvas = Canvas::new(0, 0);
        canvas.clear();
        canvas.fill_circle(Vec2::ZERO, 2.0, RED, 1.0);
        canvas.stroke_line(Vec2::ZERO, Vec2::ONE, RED, 1.0);
        assert!(canvas.as_raw().is_empty());
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 2.0, RED, 1.0);
        canvas.resize(16, 9);
        assert_eq!((canvas.width(), canvas.height()), (16, 9));
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_save_png() {
        let mut canvas = Canvas::new(12, 12);
        canvas.fill_circle(Vec2::new(6.0, 6.0), 3.0, BLUE, 0.8);
        let path = std::env::temp_dir().join(format!("plexus-raster-{}.png", std::process::id()));
        canvas.save_png(&path).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (12, 12));
        assert_eq!(reloaded.get_pixel(6, 6).0, canvas.pixel(6, 6).unwrap());
        let _ = std::fs::remove_file(path);
    }
}
