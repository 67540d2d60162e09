use std::f32::consts::{FRAC_PI_2, TAU};

use super::{FrameContext, RenderMode, RenderStrategy};
use crate::color::Rgba;
use crate::config::RadialConfig;
use crate::surface::{Glow, Paint, Point, RadialGradient, Stroke, Surface};

const REFERENCE: Rgba = Rgba::new(255, 255, 255, 0.1);
const HIGHLIGHT_INNER: Rgba = Rgba::new(255, 255, 255, 0.8);
const HIGHLIGHT_OUTER: Rgba = Rgba::new(100, 150, 255, 0.1);
const HIGHLIGHT_RADIUS: f32 = 30.0;
const SPOKE_WIDTH: f32 = 2.0;
const SPOKE_GLOW: f32 = 10.0;

/// spokes radiating out of a reference circle, sample 0 points up and the rest follow clockwise
#[derive(Debug, Clone, Default)]
pub struct Radial {
    config: RadialConfig,
}

impl Radial {
    pub fn new(config: RadialConfig) -> Self {
        Radial { config }
    }

    /// radius of the reference circle, never negative on tiny surfaces
    pub fn base_radius(&self, width: f32, height: f32) -> f32 {
        (width.min(height) / 2.0 - self.config.inset).max(0.0)
    }
}

impl RenderStrategy for Radial {
    fn mode(&self) -> RenderMode {
        RenderMode::Radial
    }

    fn render(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>) {
        let width = surface.width();
        let height = surface.height();
        let center = Point::new(width / 2.0, height / 2.0);
        let radius = self.base_radius(width, height);

        surface.stroke_circle(center, radius, &Stroke::new(REFERENCE, 1.0));

        let total = frame.len() as f32;
        for (i, value) in frame.samples.iter().enumerate() {
            let angle = i as f32 / total * TAU - FRAC_PI_2;
            let (sin, cos) = angle.sin_cos();
            let length = *value as f32 / 255.0 * self.config.outward_scale;

            let from = Point::new(center.x + cos * radius, center.y + sin * radius);
            let to = Point::new(
                center.x + cos * (radius + length),
                center.y + sin * (radius + length),
            );

            let color = frame.color(i).to_rgba();
            surface.set_glow(Some(Glow::new(color, SPOKE_GLOW)));
            surface.stroke_line(from, to, &Stroke::new(color, SPOKE_WIDTH));
        }
        surface.set_glow(None);

        let highlight = RadialGradient::new(center, 0.0, HIGHLIGHT_RADIUS)
            .stop(0.0, HIGHLIGHT_INNER)
            .stop(1.0, HIGHLIGHT_OUTER);
        surface.fill_circle(center, HIGHLIGHT_RADIUS, &Paint::Radial(highlight));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorScheme;
    use crate::reducer::VisualSamples;
    use crate::surface::Recorder;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn reference_circle_and_highlight() {
        let samples = VisualSamples::zeros(128);
        let mut surface = Recorder::new(800.0, 600.0);
        Radial::default().render(&mut surface, &FrameContext::new(&samples, ColorScheme::Rainbow));

        let (center, radius, _) = surface.stroked_circles().next().unwrap();
        assert_eq!(*center, Point::new(400.0, 300.0));
        assert_eq!(radius, 250.0);

        let (center, radius, paint) = surface.filled_circles().last().unwrap();
        assert_eq!(*center, Point::new(400.0, 300.0));
        assert_eq!(radius, HIGHLIGHT_RADIUS);
        assert!(matches!(paint, Paint::Radial(_)));
    }

    #[test]
    fn first_spoke_points_up() {
        let mut values = vec![0u8; 128];
        values[0] = 255;
        let samples = VisualSamples::from(values);
        let mut surface = Recorder::new(800.0, 600.0);
        Radial::default().render(&mut surface, &FrameContext::new(&samples, ColorScheme::Fire));

        let spokes: Vec<_> = surface.polylines().collect();
        assert_eq!(spokes.len(), 128);

        let (points, _) = spokes[0];
        assert!(close(points[0].x, 400.0) && close(points[0].y, 50.0));
        assert!(close(points[1].x, 400.0) && close(points[1].y, -100.0));

        // a quarter turn later the spoke points right
        let (points, _) = spokes[32];
        assert!(close(points[0].x, 650.0) && close(points[0].y, 300.0));
        assert!(close(points[1].x, 650.0));
    }

    #[test]
    fn tiny_surface_keeps_radius_non_negative() {
        let radial = Radial::default();
        assert_eq!(radial.base_radius(60.0, 400.0), 0.0);
        assert_eq!(radial.base_radius(400.0, 300.0), 100.0);
    }

    #[test]
    fn spoke_scale_follows_config() {
        let samples = VisualSamples::from(vec![255]);
        let mut surface = Recorder::new(400.0, 400.0);
        let mut radial = Radial::new(RadialConfig {
            inset: 50.0,
            outward_scale: 100.0,
        });
        radial.render(&mut surface, &FrameContext::new(&samples, ColorScheme::Ocean));

        let (points, _) = surface.polylines().next().unwrap();
        assert!(close(points[0].y - points[1].y, 100.0));
    }
}
