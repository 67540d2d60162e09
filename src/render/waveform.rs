//! oscilloscope trace plus a vertically mirrored reflection
//!
//! expects time-domain samples, a value of 128 lands exactly on the centerline

use super::{FrameContext, RenderMode, RenderStrategy};
use crate::surface::{Glow, LinearGradient, Paint, Point, Stroke, Surface};

#[derive(Debug, Clone)]
pub struct Waveform {
    pub line_width: f32,
    pub glow_blur: f32,

    /// opacity of the mirrored trace
    pub reflection_alpha: f32,
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform {
            line_width: 3.0,
            glow_blur: 10.0,
            reflection_alpha: 0.5,
        }
    }
}

impl Waveform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace(frame: &FrameContext<'_>, width: f32, height: f32) -> Vec<Point> {
        let step = width / frame.len().max(1) as f32;
        frame
            .samples
            .iter()
            .enumerate()
            .map(|(i, value)| Point::new(i as f32 * step, *value as f32 / 128.0 * (height / 2.0)))
            .collect()
    }
}

impl RenderStrategy for Waveform {
    fn mode(&self) -> RenderMode {
        RenderMode::Waveform
    }

    fn render(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>) {
        if frame.is_empty() {
            return;
        }
        let width = surface.width();
        let height = surface.height();
        let last = frame.len() - 1;

        let start = frame.color(0).to_rgba();
        let middle = frame.color(frame.len() / 2).to_rgba();
        let end = frame.color(last).to_rgba();
        let gradient = LinearGradient::new(Point::new(0.0, 0.0), Point::new(width, 0.0))
            .stop(0.0, start)
            .stop(0.5, middle)
            .stop(1.0, end);
        let stroke = Stroke::new(Paint::Linear(gradient), self.line_width);

        let points = Self::trace(frame, width, height);
        surface.set_glow(Some(Glow::new(middle, self.glow_blur)));
        surface.stroke_polyline(&points, &stroke);

        let mirrored: Vec<Point> = points
            .iter()
            .map(|p| Point::new(p.x, height - p.y))
            .collect();
        surface.set_global_alpha(self.reflection_alpha);
        surface.stroke_polyline(&mirrored, &stroke);

        surface.reset_paint_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{color_for, ColorScheme};
    use crate::reducer::VisualSamples;
    use crate::surface::{DrawCommand, Recorder};

    #[test]
    fn constant_midvalue_is_flat_centerline() {
        let samples = VisualSamples::from(vec![128; 128]);
        let mut surface = Recorder::new(1024.0, 600.0);
        Waveform::new().render(&mut surface, &FrameContext::new(&samples, ColorScheme::Rainbow));

        let lines: Vec<_> = surface.polylines().collect();
        assert_eq!(lines.len(), 2);
        for (points, _) in lines {
            assert_eq!(points.len(), 128);
            assert!(points.iter().all(|p| p.y == 300.0));
            for (i, p) in points.iter().enumerate() {
                assert_eq!(p.x, i as f32 * 8.0);
            }
        }
    }

    #[test]
    fn reflection_is_mirrored_at_half_opacity() {
        let samples = VisualSamples::from(vec![0, 64, 255, 192]);
        let mut surface = Recorder::new(400.0, 200.0);
        Waveform::new().render(&mut surface, &FrameContext::new(&samples, ColorScheme::Ocean));

        let lines: Vec<_> = surface.polylines().collect();
        let (trace, _) = lines[0];
        let (mirror, _) = lines[1];
        for (a, b) in trace.iter().zip(mirror.iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(b.y, 200.0 - a.y);
        }

        let half_alpha = surface
            .commands
            .iter()
            .position(|c| *c == DrawCommand::SetGlobalAlpha(0.5))
            .unwrap();
        let mirror_draw = surface
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::StrokePolyline { .. }))
            .unwrap();
        assert!(half_alpha < mirror_draw);
        assert_eq!(surface.global_alpha(), 1.0);
        assert_eq!(surface.glow(), None);
    }

    #[test]
    fn gradient_samples_three_colors() {
        let samples = VisualSamples::from((0..128).map(|i| i as u8).collect::<Vec<_>>());
        let mut surface = Recorder::new(128.0, 100.0);
        Waveform::new().render(&mut surface, &FrameContext::new(&samples, ColorScheme::PurpleHaze));

        let (_, stroke) = surface.polylines().next().unwrap();
        let gradient = match &stroke.paint {
            Paint::Linear(g) => g,
            other => panic!("expected gradient, got {:?}", other),
        };
        let offsets: Vec<f32> = gradient.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
        assert_eq!(gradient.stops[1].color, color_for(64, 128, 64, ColorScheme::PurpleHaze).to_rgba());
        assert_eq!(gradient.end, Point::new(128.0, 0.0));
    }
}
