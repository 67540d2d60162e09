//! particles fired from the bottom edge by loud samples
//!
//! every tick, in this order:
//! 1. up to `spawn_attempts` particles spawn, each only if the pool has room
//!    and a randomly picked sample exceeds the spawn threshold
//! 2. all particles move, fall and age, dead or fallen ones are dropped
//! 3. a faint bar chart of the samples is painted
//! 4. the surviving particles are painted on top of it

mod pool;

pub use pool::{Particle, ParticlePool};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{FrameContext, RenderMode, RenderStrategy};
use crate::color::color_for;
use crate::config::ParticleConfig;
use crate::surface::{Glow, Paint, Point, Rect, Surface};

const BACKGROUND_GAP: f32 = 2.0;

pub struct ParticleField {
    config: ParticleConfig,
    pool: ParticlePool,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// reproducible spawning, mostly for tests
    pub fn with_seed(config: ParticleConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ParticleConfig, rng: StdRng) -> Self {
        ParticleField {
            pool: ParticlePool::new(config.capacity),
            config,
            rng,
        }
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    fn spawn(&mut self, frame: &FrameContext<'_>, width: f32, height: f32) {
        if frame.is_empty() {
            return;
        }
        for _ in 0..self.config.spawn_attempts {
            if self.pool.is_full() {
                break;
            }
            let index = self.rng.gen_range(0..frame.len());
            let value = frame.samples[index];
            if value <= self.config.spawn_threshold {
                continue;
            }

            let x = if width > 0.0 {
                self.rng.gen_range(0.0..width)
            } else {
                0.0
            };
            let vx = self.rng.gen_range(-2.0..=2.0);
            let vy = self.rng.gen_range(-8.0..=-3.0);
            let radius = self.rng.gen_range(2.0..=6.0);
            let color = color_for(index, frame.len(), value, frame.scheme).to_rgba();

            self.pool.spawn(Particle::new(
                x,
                height,
                vx,
                vy,
                radius,
                color,
                self.config.life_ticks,
            ));
        }
    }

    fn paint_background(&self, surface: &mut dyn Surface, frame: &FrameContext<'_>) {
        let width = surface.width();
        let height = surface.height();
        let slot = width / frame.len() as f32;
        let bar_width = (slot - BACKGROUND_GAP).max(0.0);

        surface.set_global_alpha(self.config.background_alpha);
        for (i, value) in frame.samples.iter().enumerate() {
            let bar_height = *value as f32 / 255.0 * height * self.config.background_height;
            let rect = Rect::new(i as f32 * slot, height - bar_height, bar_width, bar_height);
            surface.fill_rect(rect, &Paint::Solid(frame.color(i).to_rgba()));
        }
        surface.set_global_alpha(1.0);
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(ParticleConfig::default())
    }
}

impl RenderStrategy for ParticleField {
    fn mode(&self) -> RenderMode {
        RenderMode::Particles
    }

    fn render(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>) {
        let width = surface.width();
        let height = surface.height();

        self.spawn(frame, width, height);
        self.pool.update(self.config.gravity, height);

        if !frame.is_empty() {
            self.paint_background(surface, frame);
        }

        for particle in &self.pool {
            surface.set_global_alpha(particle.life());
            surface.set_glow(Some(Glow::new(particle.color, particle.radius * 2.0)));
            surface.fill_circle(
                Point::new(particle.x, particle.y),
                particle.radius,
                &Paint::Solid(particle.color),
            );
        }
        surface.reset_paint_state();
    }

    fn reset(&mut self) {
        self.pool.clear();
    }
}
