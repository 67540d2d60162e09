//! # How a tick works
//! ```text
//!  ┌───────────────┐  get_frame(domain)  ┌─────────┐
//!  │ SampleSource  │ ------------------> │ Reducer │
//!  └───────────────┘                     └─────────┘
//!                                             | VisualSamples
//!                                             ↓
//!  ┌───────────────┐  fade overlay,      ┌───────────────────┐
//!  │    Surface    │ <-----------------  │  FrameScheduler   │
//!  │               │  reset paint state  │                   │
//!  │               │ <-----------------  │  strategy lookup  │
//!  └───────────────┘     render()        └───────────────────┘
//! ```
//!
//! The scheduler never blocks and never waits for the display itself, the host
//! calls `tick()` once per refresh, or hands a presenting closure to `run()`.

use std::time::{Duration, Instant};

use crate::color::{ColorScheme, Rgba};
use crate::config::Config;
use crate::reducer::{Reducer, VisualSamples};
use crate::render::{
    Bars, FrameContext, ParticleField, ParticlePool, Radial, RenderMode, RenderStrategy, Waveform,
};
use crate::source::SampleSource;
use crate::surface::{Paint, Rect, Surface};

pub struct FrameScheduler {
    config: Config,
    reducer: Reducer,

    bars: Bars,
    radial: Radial,
    waveform: Waveform,
    particles: ParticleField,

    /// mode of the previous tick, `None` before the first one
    active: Option<RenderMode>,
    samples: VisualSamples,
    frames: u64,
}

impl FrameScheduler {
    pub fn new(config: Config) -> Self {
        let particles = ParticleField::new(config.particles.clone());
        Self::with_particles(config, particles)
    }

    /// same as `new()` but with reproducible particle spawning
    pub fn with_seed(config: Config, seed: u64) -> Self {
        let particles = ParticleField::with_seed(config.particles.clone(), seed);
        Self::with_particles(config, particles)
    }

    fn with_particles(config: Config, particles: ParticleField) -> Self {
        let reducer = Reducer::new(config.reducer.clone());
        FrameScheduler {
            samples: VisualSamples::zeros(reducer.resolution()),
            reducer,
            bars: Bars::new(),
            radial: Radial::new(config.radial.clone()),
            waveform: Waveform::new(),
            particles,
            active: None,
            frames: 0,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> RenderMode {
        self.config.mode
    }

    /// takes effect on the next tick
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.config.mode = mode;
    }

    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.config.scheme = scheme;
    }

    /// samples painted by the last tick
    pub fn samples(&self) -> &VisualSamples {
        &self.samples
    }

    pub fn particles(&self) -> &ParticlePool {
        self.particles.pool()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn strategy(&mut self, mode: RenderMode) -> &mut dyn RenderStrategy {
        match mode {
            RenderMode::Bars => &mut self.bars,
            RenderMode::Radial => &mut self.radial,
            RenderMode::Waveform => &mut self.waveform,
            RenderMode::Particles => &mut self.particles,
        }
    }

    /// one frame: pull samples, reset paint state, fade, dispatch
    pub fn tick<S>(&mut self, source: &mut S, surface: &mut dyn Surface)
    where
        S: SampleSource + ?Sized,
    {
        let mode = self.config.mode;
        let domain = mode.domain();

        if self.active != Some(mode) {
            if let Some(previous) = self.active {
                log::debug!("render mode {} -> {}, resetting mode state", previous, mode);
                self.strategy(previous).reset();
            }
            self.strategy(mode).reset();
            self.active = Some(mode);
        }

        self.samples = match source.get_frame(domain) {
            Some(raw) => self.reducer.reduce(raw, domain),
            None => {
                log::trace!("no {:?} frame available, rendering idle", domain);
                VisualSamples::idle(self.reducer.resolution(), domain)
            }
        };

        // size is read fresh every tick, the surface may have been resized in between
        let width = surface.width();
        let height = surface.height();

        surface.reset_paint_state();
        surface.fill_rect(
            Rect::new(0.0, 0.0, width, height),
            &Paint::Solid(Rgba::BLACK.with_alpha(self.config.fade_alpha)),
        );

        // strategies borrow `self` mutably, the samples are moved out for the call
        let samples = std::mem::replace(&mut self.samples, VisualSamples::zeros(0));
        let frame = FrameContext::new(&samples, self.config.scheme);
        self.strategy(mode).render(surface, &frame);
        self.samples = samples;

        self.frames += 1;
    }

    /// drives `tick()` until `present` returns false
    ///
    /// `present` hands the finished frame to the display and returns once the
    /// next refresh is due, a tick that runs long only delays the next one
    pub fn run<S, T, P>(&mut self, source: &mut S, surface: &mut T, mut present: P)
    where
        S: SampleSource + ?Sized,
        T: Surface,
        P: FnMut(&mut T) -> bool,
    {
        let budget = Duration::from_secs_f64(1.0 / self.config.refresh_rate.max(1) as f64);
        loop {
            let started = Instant::now();
            self.tick(source, surface);

            let elapsed = started.elapsed();
            if elapsed > budget {
                log::debug!(
                    "frame {} took {:?}, over the {:?} budget",
                    self.frames,
                    elapsed,
                    budget
                );
            }

            if !present(surface) {
                break;
            }
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
