use super::{Glow, Paint, Point, Rect, Stroke, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetGlobalAlpha(f32),
    SetGlow(Option<Glow>),
    FillRect { rect: Rect, paint: Paint },
    FillCircle { center: Point, radius: f32, paint: Paint },
    StrokeCircle { center: Point, radius: f32, stroke: Stroke },
    StrokePolyline { points: Vec<Point>, stroke: Stroke },
}

/// surface of a given size that keeps every draw call
#[derive(Debug, Clone)]
pub struct Recorder {
    width: f32,
    height: f32,
    global_alpha: f32,
    glow: Option<Glow>,
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(width: f32, height: f32) -> Self {
        Recorder {
            width,
            height,
            global_alpha: 1.0,
            glow: None,
            commands: Vec::new(),
        }
    }

    /// stands in for an external resize event
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    pub fn glow(&self) -> Option<Glow> {
        self.glow
    }

    /// takes the recorded commands, leaving the carried paint state as is
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, paint } => Some((rect, paint)),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[Point], &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokePolyline { points, stroke } => Some((&points[..], stroke)),
            _ => None,
        })
    }

    pub fn filled_circles(&self) -> impl Iterator<Item = (&Point, f32, &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle {
                center,
                radius,
                paint,
            } => Some((center, *radius, paint)),
            _ => None,
        })
    }

    pub fn stroked_circles(&self) -> impl Iterator<Item = (&Point, f32, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeCircle {
                center,
                radius,
                stroke,
            } => Some((center, *radius, stroke)),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
        self.commands.push(DrawCommand::SetGlobalAlpha(alpha));
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
        self.commands.push(DrawCommand::SetGlow(glow));
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn tracks_carried_state() {
        let mut recorder = Recorder::new(10.0, 10.0);
        recorder.set_global_alpha(0.5);
        recorder.set_glow(Some(Glow::new(Rgba::WHITE, 4.0)));
        assert_eq!(recorder.global_alpha(), 0.5);

        recorder.reset_paint_state();
        assert_eq!(recorder.global_alpha(), 1.0);
        assert_eq!(recorder.glow(), None);
        assert_eq!(recorder.commands.len(), 4);
    }

    #[test]
    fn line_is_a_two_point_polyline() {
        let mut recorder = Recorder::new(10.0, 10.0);
        let stroke = Stroke::new(Rgba::WHITE, 1.0);
        recorder.stroke_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &stroke);

        let (points, _) = recorder.polylines().next().unwrap();
        assert_eq!(points, &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    }
}
