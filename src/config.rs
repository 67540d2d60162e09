#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::ColorScheme;
use crate::render::RenderMode;

/// everything the `FrameScheduler` reads, hosts may swap `mode` and `scheme` between any two ticks
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub mode: RenderMode,
    pub scheme: ColorScheme,

    /// opacity of the dark overlay painted before every frame,
    /// lower values leave longer trails
    pub fade_alpha: f32,

    /// frames per second the host is expected to drive, only used to detect overrunning ticks
    pub refresh_rate: usize,

    pub reducer: ReducerConfig,
    pub radial: RadialConfig,
    pub particles: ParticleConfig,
}
impl Default for Config {
    fn default() -> Self {
        Config {
            mode: RenderMode::Bars,
            scheme: ColorScheme::Rainbow,
            fade_alpha: 0.2,
            refresh_rate: 60,
            reducer: ReducerConfig::default(),
            radial: RadialConfig::default(),
            particles: ParticleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReducerConfig {
    /// number of visual samples per frame
    pub resolution: usize,

    /// applied uniformly to frequency frames before clamping to 255
    pub amplification: f32,
}
impl Default for ReducerConfig {
    fn default() -> Self {
        ReducerConfig {
            resolution: 128,
            amplification: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadialConfig {
    /// distance between the reference circle and the closer surface edge
    pub inset: f32,

    /// spoke length in pixels at a sample value of 255
    pub outward_scale: f32,
}
impl Default for RadialConfig {
    fn default() -> Self {
        RadialConfig {
            inset: 50.0,
            outward_scale: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticleConfig {
    /// soft cap of living particles
    pub capacity: usize,

    /// spawn attempts per tick
    pub spawn_attempts: usize,

    /// a randomly picked sample has to exceed this to spawn a particle
    pub spawn_threshold: u8,

    /// added to the vertical velocity every tick
    pub gravity: f32,

    /// ticks a particle lives, life decays by `1 / life_ticks` per tick
    pub life_ticks: u16,

    /// opacity of the bar chart behind the particles
    pub background_alpha: f32,

    /// height of a full bar in the background relative to the surface
    pub background_height: f32,
}
impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            capacity: 100,
            spawn_attempts: 3,
            spawn_threshold: 80,
            gravity: 0.1,
            life_ticks: 100,
            background_alpha: 0.2,
            background_height: 0.3,
        }
    }
}
