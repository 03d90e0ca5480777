//! The drawing capability a field renders into.
//!
//! A [`Surface`] only needs to clear itself, fill discs and stroke thin
//! lines, each with a color and an opacity. The crate ships three
//! implementations: [`DrawList`] (records commands, used by tests and
//! tooling), [`Canvas`](crate::Canvas) (software RGBA raster), and a
//! browser 2D context on wasm32.

use crate::color::Hsl;
use crate::Vec2;

/// A 2D raster drawing target.
pub trait Surface {
    /// Clear the entire surface to transparent.
    fn clear(&mut self);

    /// Fill a disc of `radius` pixels centered at `center`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsl, alpha: f32);

    /// Stroke a 1px line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsl, alpha: f32);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Hsl,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Hsl,
        alpha: f32,
    },
}

/// A surface that records every call in order instead of drawing.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded circles as `(center, radius, color, alpha)`.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Hsl, f32)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => Some((center, radius, color, alpha)),
            _ => None,
        })
    }

    /// Recorded lines as `(from, to, color, alpha)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Hsl, f32)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Line {
                from,
                to,
                color,
                alpha,
            } => Some((from, to, color, alpha)),
            _ => None,
        })
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsl, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsl, alpha: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
        });
    }
}
