use crate::color::Rgba;

/// short lived dot that is shot upwards and falls back down
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub color: Rgba,

    // life is kept in whole ticks so it decays by exactly 1 / lifespan per tick
    remaining: u16,
    lifespan: u16,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, radius: f32, color: Rgba, lifespan: u16) -> Self {
        let lifespan = lifespan.max(1);
        Particle {
            x,
            y,
            vx,
            vy,
            radius,
            color,
            remaining: lifespan,
            lifespan,
        }
    }

    /// normalized life in 0..=1, also used as opacity
    pub fn life(&self) -> f32 {
        self.remaining as f32 / self.lifespan as f32
    }

    pub fn ticks_left(&self) -> u16 {
        self.remaining
    }

    pub fn is_alive(&self) -> bool {
        self.remaining > 0
    }

    /// moves by velocity, then gravity pulls on vy and life decays
    fn step(&mut self, gravity: f32) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += gravity;
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// owns every living particle, never holds more than `capacity`
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        ParticlePool {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// adds the particle unless the pool is full, a full pool silently drops it
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// advances every particle one tick and drops the dead ones
    /// and those that fell below `floor`
    pub fn update(&mut self, gravity: f32, floor: f32) {
        self.particles.retain_mut(|p| {
            p.step(gravity);
            p.is_alive() && p.y <= floor
        });
    }
}

impl<'a> IntoIterator for &'a ParticlePool {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
