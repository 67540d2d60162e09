//! the four ways a frame of visual samples can be painted
//!
//! every strategy only reads the samples of the current tick, the particle
//! field is the only one that keeps state between ticks (its `ParticlePool`).

pub mod bars;
pub mod particles;
pub mod radial;
pub mod waveform;

pub use bars::Bars;
pub use particles::{Particle, ParticleField, ParticlePool};
pub use radial::Radial;
pub use waveform::Waveform;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{color_for, Color, ColorScheme};
use crate::reducer::VisualSamples;
use crate::source::Domain;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RenderMode {
    Bars,
    Radial,
    Waveform,
    Particles,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Bars,
        RenderMode::Radial,
        RenderMode::Waveform,
        RenderMode::Particles,
    ];

    /// waveform needs amplitudes centered at 128, everything else draws energy
    pub fn domain(&self) -> Domain {
        match self {
            RenderMode::Waveform => Domain::Time,
            _ => Domain::Frequency,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Bars => "bars",
            RenderMode::Radial => "radial",
            RenderMode::Waveform => "waveform",
            RenderMode::Particles => "particles",
        }
    }

    /// unknown names fall back to bars
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "bars" => RenderMode::Bars,
            "radial" | "circle" => RenderMode::Radial,
            "waveform" | "wave" => RenderMode::Waveform,
            "particles" | "particle-field" => RenderMode::Particles,
            other => {
                log::warn!("unknown render mode '{}', falling back to bars", other);
                RenderMode::Bars
            }
        }
    }
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Bars
    }
}

impl FromStr for RenderMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RenderMode::parse(s))
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// what a strategy gets to see of the current tick
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub samples: &'a VisualSamples,
    pub scheme: ColorScheme,
}

impl<'a> FrameContext<'a> {
    pub fn new(samples: &'a VisualSamples, scheme: ColorScheme) -> Self {
        FrameContext { samples, scheme }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// color of sample `index` with its own value
    pub fn color(&self, index: usize) -> Color {
        let value = self.samples.get(index).copied().unwrap_or(0);
        color_for(index, self.samples.len(), value, self.scheme)
    }
}

pub trait RenderStrategy {
    fn mode(&self) -> RenderMode;

    /// paints one frame, the surface size is read on every call
    fn render(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>);

    /// drops state carried between ticks
    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_reads_time_domain() {
        for mode in RenderMode::ALL.iter() {
            let expected = if *mode == RenderMode::Waveform {
                Domain::Time
            } else {
                Domain::Frequency
            };
            assert_eq!(mode.domain(), expected);
        }
    }

    #[test]
    fn parses_ui_names() {
        assert_eq!(RenderMode::parse("Particles"), RenderMode::Particles);
        assert_eq!("radial".parse::<RenderMode>(), Ok(RenderMode::Radial));
        assert_eq!(RenderMode::parse("spiral"), RenderMode::Bars);
        for mode in RenderMode::ALL.iter() {
            assert_eq!(RenderMode::parse(mode.name()), *mode);
        }
    }

    #[test]
    fn frame_colors_use_their_own_sample() {
        let samples = VisualSamples::from(vec![0, 255]);
        let frame = FrameContext::new(&samples, ColorScheme::Fire);
        assert_eq!(frame.color(1), color_for(1, 2, 255, ColorScheme::Fire));
        assert_eq!(frame.color(0), color_for(0, 2, 0, ColorScheme::Fire));
    }
}
