//! Every shape is described by a signed distance function, pixels get their
//! coverage from the distance of their center to the outline. That keeps the
//! edges antialiased and makes the glow halo a simple falloff outside the shape.
//!
//! Gradient stops are interpolated with linear splines, one per channel.

use splines::{Interpolation, Key, Spline};

use super::{ColorStop, Glow, Paint, Point, Rect, Stroke, Surface};
use crate::color::Rgba;

/// how much of the glow color reaches the pixels right next to a shape
const GLOW_STRENGTH: f32 = 0.6;

/// RGBA8 pixel buffer with straight alpha, row major, origin top left
#[derive(Clone, Debug)]
pub struct Pixmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    global_alpha: f32,
    glow: Option<Glow>,
}

impl Pixmap {
    /// opaque black pixmap
    pub fn new(width: usize, height: usize) -> Self {
        let mut pixmap = Pixmap {
            width,
            height,
            pixels: vec![0; width * height * 4],
            global_alpha: 1.0,
            glow: None,
        };
        pixmap.clear(Rgba::BLACK);
        pixmap
    }

    /// reallocates and clears, like resizing a canvas does
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width * height * 4];
        self.clear(Rgba::BLACK);
    }

    pub fn clear(&mut self, color: Rgba) {
        let alpha = to_byte(color.a);
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = alpha;
        }
    }

    /// raw buffer, ready to be copied into an `ImageData` or an image encoder
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba, alpha: f32) {
        let sa = alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = (y * self.width + x) * 4;
        let da = self.pixels[i + 3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }

        let mix = |src: u8, dst: u8| -> u8 {
            let v = (src as f32 * sa + dst as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        self.pixels[i] = mix(color.r, self.pixels[i]);
        self.pixels[i + 1] = mix(color.g, self.pixels[i + 1]);
        self.pixels[i + 2] = mix(color.b, self.pixels[i + 2]);
        self.pixels[i + 3] = to_byte(out_a);
    }

    /// paints every pixel inside `bounds` (plus glow margin) by its distance to the shape
    fn fill_distance<F>(&mut self, bounds: Rect, paint: &Paint, distance: F)
    where
        F: Fn(Point) -> f32,
    {
        if self.width == 0 || self.height == 0 || self.global_alpha <= 0.0 {
            return;
        }
        let glow = self.glow.filter(|g| g.blur > 0.0 && g.color.a > 0.0);
        let margin = glow.map(|g| g.blur).unwrap_or(0.0) + 1.0;

        let x0 = (bounds.x - margin).floor().max(0.0) as usize;
        let y0 = (bounds.y - margin).floor().max(0.0) as usize;
        let x1 = ((bounds.right() + margin).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((bounds.bottom() + margin).ceil().max(0.0) as usize).min(self.height);

        let sampler = Sampler::new(paint);
        let global_alpha = self.global_alpha;

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = distance(p);

                if let Some(glow) = glow {
                    if d > -0.5 && d < glow.blur {
                        let falloff = 1.0 - d.max(0.0) / glow.blur;
                        let a = glow.color.a * falloff * falloff * GLOW_STRENGTH * global_alpha;
                        self.blend(x, y, glow.color, a);
                    }
                }

                let coverage = (0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = sampler.at(p);
                    self.blend(x, y, color, color.a * coverage * global_alpha);
                }
            }
        }
    }
}

impl Surface for Pixmap {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let rect = Rect::new(rect.x, rect.y, rect.width.max(0.0), rect.height.max(0.0));
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        let hx = rect.width / 2.0;
        let hy = rect.height / 2.0;

        self.fill_distance(rect, paint, |p| {
            let qx = (p.x - cx).abs() - hx;
            let qy = (p.y - cy).abs() - hy;
            let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
            outside + qx.max(qy).min(0.0)
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        let radius = radius.max(0.0);
        let bounds = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.fill_distance(bounds, paint, |p| distance(p, center) - radius);
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke) {
        let half = stroke.width.max(0.0) / 2.0;
        let outer = radius.max(0.0) + half;
        let bounds = Rect::new(center.x - outer, center.y - outer, outer * 2.0, outer * 2.0);
        self.fill_distance(bounds, &stroke.paint, |p| {
            (distance(p, center) - radius).abs() - half
        });
    }

    // segments are painted one by one, translucent strokes get slightly denser joints
    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        let half = stroke.width.max(0.0) / 2.0;
        for segment in points.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            let bounds = Rect::new(
                a.x.min(b.x) - half,
                a.y.min(b.y) - half,
                (a.x - b.x).abs() + half * 2.0,
                (a.y - b.y).abs() + half * 2.0,
            );
            self.fill_distance(bounds, &stroke.paint, |p| segment_distance(p, a, b) - half);
        }
    }
}

/// resolves the color of a paint at a pixel
enum Sampler<'a> {
    Solid(Rgba),
    Linear(&'a super::LinearGradient, Ramp),
    Radial(&'a super::RadialGradient, Ramp),
}

impl<'a> Sampler<'a> {
    fn new(paint: &'a Paint) -> Self {
        match paint {
            Paint::Solid(color) => Sampler::Solid(*color),
            Paint::Linear(g) => Sampler::Linear(g, Ramp::new(&g.stops)),
            Paint::Radial(g) => Sampler::Radial(g, Ramp::new(&g.stops)),
        }
    }

    fn at(&self, p: Point) -> Rgba {
        match self {
            Sampler::Solid(color) => *color,
            Sampler::Linear(g, ramp) => ramp.sample(g.offset_at(p)),
            Sampler::Radial(g, ramp) => ramp.sample(g.offset_at(p)),
        }
    }
}

/// per channel splines over the gradient stops
struct Ramp {
    channels: Option<[Spline<f32, f32>; 4]>,
    fallback: Rgba,
}

impl Ramp {
    fn new(stops: &[ColorStop]) -> Self {
        let fallback = stops.first().map(|s| s.color).unwrap_or(Rgba::TRANSPARENT);
        if stops.len() < 2 {
            return Ramp {
                channels: None,
                fallback,
            };
        }

        Ramp {
            channels: Some([
                channel(stops, |c| c.r as f32),
                channel(stops, |c| c.g as f32),
                channel(stops, |c| c.b as f32),
                channel(stops, |c| c.a),
            ]),
            fallback,
        }
    }

    fn sample(&self, t: f32) -> Rgba {
        let channels = match &self.channels {
            Some(channels) => channels,
            None => return self.fallback,
        };
        let get = |i: usize, default: f32| channels[i].clamped_sample(t).unwrap_or(default);
        let f = self.fallback;

        Rgba::new(
            get(0, f.r as f32).round().clamp(0.0, 255.0) as u8,
            get(1, f.g as f32).round().clamp(0.0, 255.0) as u8,
            get(2, f.b as f32).round().clamp(0.0, 255.0) as u8,
            get(3, f.a).clamp(0.0, 1.0),
        )
    }
}

fn channel<F>(stops: &[ColorStop], get: F) -> Spline<f32, f32>
where
    F: Fn(&Rgba) -> f32,
{
    Spline::from_vec(
        stops
            .iter()
            .map(|s| Key::new(s.offset, get(&s.color), Interpolation::Linear))
            .collect(),
    )
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn distance(a: Point, b: Point) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len2 = abx * abx + aby * aby;
    if len2 <= f32::EPSILON {
        return distance(p, a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0);
    distance(p, Point::new(a.x + abx * t, a.y + aby * t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::LinearGradient;

    const RED: Rgba = Rgba::new(255, 0, 0, 1.0);
    const BLUE: Rgba = Rgba::new(0, 0, 255, 1.0);

    #[test]
    fn starts_opaque_black() {
        let pixmap = Pixmap::new(4, 3);
        assert_eq!(pixmap.as_rgba().len(), 4 * 3 * 4);
        assert_eq!(pixmap.pixel(3, 2), Some([0, 0, 0, 255]));
        assert_eq!(pixmap.pixel(4, 0), None);
    }

    #[test]
    fn fills_rect_interior() {
        let mut pixmap = Pixmap::new(10, 10);
        pixmap.fill_rect(Rect::new(2.0, 2.0, 4.0, 4.0), &Paint::Solid(RED));
        assert_eq!(pixmap.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(pixmap.pixel(8, 8), Some([0, 0, 0, 255]));
    }

    #[test]
    fn zero_height_rect_leaves_no_trace() {
        let mut pixmap = Pixmap::new(10, 10);
        pixmap.fill_rect(Rect::new(0.0, 10.0, 10.0, 0.0), &Paint::Solid(RED));
        assert!(pixmap.as_rgba().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn translucent_overlay_fades() {
        let mut pixmap = Pixmap::new(2, 2);
        pixmap.clear(Rgba::WHITE);
        pixmap.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), &Paint::Solid(Rgba::BLACK.with_alpha(0.5)));
        let [r, g, b, a] = pixmap.pixel(0, 0).unwrap();
        assert!((127..=128).contains(&r));
        assert_eq!((r, g, b, a), (r, r, r, 255));
    }

    #[test]
    fn global_alpha_scales_paint() {
        let mut pixmap = Pixmap::new(2, 2);
        pixmap.set_global_alpha(0.0);
        pixmap.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), &Paint::Solid(RED));
        assert_eq!(pixmap.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn linear_gradient_mixes_stops() {
        let mut pixmap = Pixmap::new(101, 1);
        let gradient = LinearGradient::new(Point::new(0.5, 0.0), Point::new(100.5, 0.0))
            .stop(0.0, RED)
            .stop(1.0, BLUE);
        pixmap.fill_rect(Rect::new(0.0, 0.0, 101.0, 1.0), &Paint::Linear(gradient));

        assert_eq!(pixmap.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(pixmap.pixel(100, 0), Some([0, 0, 255, 255]));
        let [r, _, b, _] = pixmap.pixel(50, 0).unwrap();
        assert!((126..=129).contains(&r));
        assert!((126..=129).contains(&b));
    }

    #[test]
    fn glow_reaches_outside_the_shape() {
        let mut pixmap = Pixmap::new(20, 20);
        pixmap.set_glow(Some(Glow::new(BLUE, 6.0)));
        pixmap.fill_circle(Point::new(10.0, 10.0), 3.0, &Paint::Solid(RED));

        assert_eq!(pixmap.pixel(9, 9).map(|p| p[0]), Some(255));
        let halo = pixmap.pixel(10, 15).unwrap();
        assert!(halo[2] > 0, "{:?}", halo);
        assert_eq!(pixmap.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn strokes_lines_and_rings() {
        let mut pixmap = Pixmap::new(20, 20);
        let stroke = Stroke::new(RED, 2.0);
        pixmap.stroke_line(Point::new(0.0, 5.0), Point::new(20.0, 5.0), &stroke);
        assert_eq!(pixmap.pixel(10, 5).map(|p| p[0]), Some(255));
        assert_eq!(pixmap.pixel(10, 10), Some([0, 0, 0, 255]));

        pixmap.stroke_circle(Point::new(10.0, 10.0), 6.0, &Stroke::new(BLUE, 2.0));
        assert_eq!(pixmap.pixel(15, 10).map(|p| p[2]), Some(255));
        assert_eq!(pixmap.pixel(10, 10), Some([0, 0, 0, 255]));
    }

    #[test]
    fn drawing_outside_is_clipped() {
        let mut pixmap = Pixmap::new(5, 5);
        pixmap.fill_circle(Point::new(-50.0, -50.0), 10.0, &Paint::Solid(RED));
        pixmap.fill_rect(Rect::new(3.0, 3.0, 100.0, 100.0), &Paint::Solid(RED));
        assert_eq!(pixmap.pixel(4, 4), Some([255, 0, 0, 255]));
    }

    #[test]
    fn resize_reallocates() {
        let mut pixmap = Pixmap::new(5, 5);
        pixmap.resize(8, 2);
        assert_eq!(pixmap.width(), 8.0);
        assert_eq!(pixmap.as_rgba().len(), 8 * 2 * 4);
    }
}
