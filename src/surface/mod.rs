//! drawing target the render strategies paint into
//!
//! the pipeline never creates or resizes a surface, it only reads its size at
//! the start of every tick and uses the primitives below.

/// records draw calls instead of painting, handy for tests and for hosts that replay commands
pub mod recorder;

/// software rasteriser into an RGBA buffer
#[cfg(feature = "pixmap")]
pub mod pixmap;

pub use recorder::{DrawCommand, Recorder};

#[cfg(feature = "pixmap")]
pub use pixmap::Pixmap;

use crate::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// position along the gradient in 0..=1
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        ColorStop { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: Point, end: Point) -> Self {
        LinearGradient {
            start,
            end,
            stops: Vec::new(),
        }
    }

    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(ColorStop::new(offset, color));
        self
    }

    /// projection of `p` onto the gradient axis, clamped to 0..=1
    pub fn offset_at(&self, p: Point) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len2 = dx * dx + dy * dy;
        if len2 <= f32::EPSILON {
            return 0.0;
        }
        (((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len2).clamp(0.0, 1.0)
    }
}

/// gradient between two concentric circles
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Point, inner_radius: f32, outer_radius: f32) -> Self {
        RadialGradient {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::new(),
        }
    }

    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(ColorStop::new(offset, color));
        self
    }

    pub fn offset_at(&self, p: Point) -> f32 {
        let span = self.outer_radius - self.inner_radius;
        if span <= f32::EPSILON {
            return 1.0;
        }
        let d = ((p.x - self.center.x).powi(2) + (p.y - self.center.y).powi(2)).sqrt();
        ((d - self.inner_radius) / span).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Paint::Linear(gradient)
    }
}

impl From<RadialGradient> for Paint {
    fn from(gradient: RadialGradient) -> Self {
        Paint::Radial(gradient)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f32) -> Self {
        Stroke {
            paint: paint.into(),
            width,
        }
    }
}

/// blurred, color matched halo painted around every following shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f32,
}

impl Glow {
    pub fn new(color: Rgba, blur: f32) -> Self {
        Glow { color, blur }
    }
}

/// primitives consumed by the render strategies
///
/// `global_alpha` and `glow` are carried state, they apply to every shape drawn
/// after they were set until they are set again.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_glow(&mut self, glow: Option<Glow>);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint);
    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke);
    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.stroke_polyline(&[from, to], stroke);
    }

    /// back to fully opaque drawing without glow
    fn reset_paint_state(&mut self) {
        self.set_global_alpha(1.0);
        self.set_glow(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_offset_projects_onto_axis() {
        let g = LinearGradient::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(g.offset_at(Point::new(25.0, 40.0)), 0.25);
        assert_eq!(g.offset_at(Point::new(-5.0, 0.0)), 0.0);
        assert_eq!(g.offset_at(Point::new(500.0, 0.0)), 1.0);
    }

    #[test]
    fn degenerate_gradients_do_not_divide_by_zero() {
        let g = LinearGradient::new(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        assert_eq!(g.offset_at(Point::new(10.0, 10.0)), 0.0);

        let r = RadialGradient::new(Point::new(0.0, 0.0), 5.0, 5.0);
        assert_eq!(r.offset_at(Point::new(1.0, 1.0)), 1.0);
    }

    #[test]
    fn radial_offset_grows_with_distance() {
        let r = RadialGradient::new(Point::new(0.0, 0.0), 0.0, 10.0);
        assert_eq!(r.offset_at(Point::new(0.0, 0.0)), 0.0);
        assert_eq!(r.offset_at(Point::new(0.0, 5.0)), 0.5);
        assert_eq!(r.offset_at(Point::new(30.0, 0.0)), 1.0);
    }
}
