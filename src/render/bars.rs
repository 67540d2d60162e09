//! ```text
//!       |
//!   |   | |
//!   | | | |   |
//! | | | | | | | |
//! +++++++++++++++
//! ```

use super::{FrameContext, RenderMode, RenderStrategy};
use crate::color::Rgba;
use crate::surface::{Glow, LinearGradient, Paint, Point, Rect, Surface};

/// color the bars fade into at their tip
const TIP: Rgba = Rgba::new(255, 255, 255, 0.1);

/// one vertical bar per sample, left to right, full height at 255
#[derive(Debug, Clone)]
pub struct Bars {
    /// horizontal space between two bars in pixels
    pub gap: f32,
    pub glow_blur: f32,
}

impl Default for Bars {
    fn default() -> Self {
        Bars {
            gap: 2.0,
            glow_blur: 15.0,
        }
    }
}

impl Bars {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderStrategy for Bars {
    fn mode(&self) -> RenderMode {
        RenderMode::Bars
    }

    fn render(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>) {
        if frame.is_empty() {
            return;
        }
        let width = surface.width();
        let height = surface.height();
        let slot = width / frame.len() as f32;
        let bar_width = (slot - self.gap).max(0.0);

        for (i, value) in frame.samples.iter().enumerate() {
            let bar_height = *value as f32 / 255.0 * height;
            let x = i as f32 * slot;
            let y = height - bar_height;
            let color = frame.color(i).to_rgba();

            let gradient = LinearGradient::new(Point::new(x, height), Point::new(x, y))
                .stop(0.0, color)
                .stop(1.0, TIP);

            // silent bars get no halo so the baseline stays dark
            let glow = if *value > 0 {
                Some(Glow::new(color, self.glow_blur))
            } else {
                None
            };
            surface.set_glow(glow);
            surface.fill_rect(Rect::new(x, y, bar_width, bar_height), &Paint::Linear(gradient));
        }
        surface.set_glow(None);
    }
}
