// Ambient particle field with click bursts.
//
// The field owns every particle. Each frame it advances all of them,
// drops expired bursts, and exposes the particles and proximity links for
// drawing.

use crate::constants::*;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::Rng;

/// Tuning for a [`ParticleField`].
///
/// Defaults come from `constants.rs`; tests shrink or tweak individual knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    pub area_per_particle: f64,
    pub burst_count: usize,
    pub burst_life_decay: f64,
    pub burst_shrink: f64,
    pub ambient_speed: f64,
    pub burst_speed: f64,
    pub size_min: f64,
    pub size_span: f64,
    pub link_distance: f64,
    pub link_max_alpha: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_particle: AREA_PER_PARTICLE,
            burst_count: BURST_COUNT,
            burst_life_decay: BURST_LIFE_DECAY,
            burst_shrink: BURST_SHRINK,
            ambient_speed: AMBIENT_SPEED,
            burst_speed: BURST_SPEED,
            size_min: SIZE_MIN,
            size_span: SIZE_SPAN,
            link_distance: LINK_DISTANCE,
            link_max_alpha: LINK_MAX_ALPHA,
        }
    }
}

impl FieldConfig {
    /// Ambient population for a `width` x `height` surface.
    pub fn ambient_count(&self, width: f64, height: f64) -> usize {
        let n = (width * height / self.area_per_particle).floor();
        if n.is_finite() && n > 0.0 {
            n as usize
        } else {
            0
        }
    }

    /// Stroke alpha of the link between two ambient particles `distance`
    /// apart, or `None` when they are too far apart to be linked.
    pub fn link_alpha(&self, distance: f64) -> Option<f64> {
        (distance < self.link_distance)
            .then(|| (1.0 - distance / self.link_distance) * self.link_max_alpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleKind {
    Ambient,
    /// Short-lived spark; `life` runs from 1 down to 0.
    Burst { life: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub size: f64,
    kind: ParticleKind,
}

impl Particle {
    fn ambient(rng: &mut impl Rng, config: &FieldConfig, bounds: DVec2) -> Self {
        Self {
            position: DVec2::new(rng.gen::<f64>() * bounds.x, rng.gen::<f64>() * bounds.y),
            velocity: random_velocity(rng, config.ambient_speed),
            size: random_size(rng, config),
            kind: ParticleKind::Ambient,
        }
    }

    fn burst(rng: &mut impl Rng, config: &FieldConfig, at: DVec2) -> Self {
        Self {
            position: at,
            velocity: random_velocity(rng, config.burst_speed),
            size: random_size(rng, config),
            kind: ParticleKind::Burst { life: 1.0 },
        }
    }

    #[inline]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    #[inline]
    pub fn is_burst(&self) -> bool {
        matches!(self.kind, ParticleKind::Burst { .. })
    }

    #[inline]
    pub fn life(&self) -> Option<f64> {
        match self.kind {
            ParticleKind::Burst { life } => Some(life),
            ParticleKind::Ambient => None,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        matches!(self.kind, ParticleKind::Burst { life } if life <= 0.0)
    }

    /// Fill alpha: fixed for ambient particles, the remaining life for bursts.
    pub fn alpha(&self) -> f64 {
        match self.kind {
            ParticleKind::Ambient => AMBIENT_ALPHA,
            ParticleKind::Burst { life } => life,
        }
    }

    fn update(&mut self, config: &FieldConfig, bounds: DVec2) {
        self.position += self.velocity;
        match &mut self.kind {
            ParticleKind::Burst { life } => {
                *life -= config.burst_life_decay;
                self.size *= config.burst_shrink;
            }
            ParticleKind::Ambient => {
                // Reflect, never clamp: a particle may sit one step outside.
                if self.position.x < 0.0 || self.position.x > bounds.x {
                    self.velocity.x = -self.velocity.x;
                }
                if self.position.y < 0.0 || self.position.y > bounds.y {
                    self.velocity.y = -self.velocity.y;
                }
            }
        }
    }
}

#[inline]
fn random_velocity(rng: &mut impl Rng, speed: f64) -> DVec2 {
    DVec2::new(
        (rng.gen::<f64>() - 0.5) * speed,
        (rng.gen::<f64>() - 0.5) * speed,
    )
}

#[inline]
fn random_size(rng: &mut impl Rng, config: &FieldConfig) -> f64 {
    config.size_min + rng.gen::<f64>() * config.size_span
}

/// A proximity line between two ambient particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: DVec2,
    pub to: DVec2,
    pub alpha: f64,
}

pub struct ParticleField<R: Rng = StdRng> {
    particles: Vec<Particle>,
    bounds: DVec2,
    config: FieldConfig,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Creates an empty field; call [`ParticleField::resize`] to populate it.
    pub fn new(config: FieldConfig, rng: R) -> Self {
        Self {
            particles: Vec::new(),
            bounds: DVec2::ZERO,
            config,
            rng,
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn ambient_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_burst()).count()
    }

    pub fn burst_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_burst()).count()
    }

    /// Adopts new bounds and regenerates the population from scratch.
    ///
    /// Live bursts are discarded along with the ambient particles.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = DVec2::new(width.max(0.0), height.max(0.0));
        let count = self.config.ambient_count(self.bounds.x, self.bounds.y);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let p = Particle::ambient(&mut self.rng, &self.config, self.bounds);
            self.particles.push(p);
        }
        log::debug!(
            "[particles] {} ambient particles for {}x{}",
            count,
            self.bounds.x,
            self.bounds.y
        );
    }

    /// Spawns a batch of burst particles at `at` (viewport coordinates).
    pub fn burst(&mut self, at: DVec2) {
        for _ in 0..self.config.burst_count {
            let p = Particle::burst(&mut self.rng, &self.config, at);
            self.particles.push(p);
        }
    }

    /// Advances every particle one frame and drops expired bursts.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.update(&self.config, bounds);
        }
        // `retain` is a stable forward scan that visits every element once.
        self.particles.retain(|p| !p.is_expired());
    }

    /// Links for each unordered pair of distinct ambient particles closer
    /// than the link distance.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            if a.is_burst() {
                continue;
            }
            for b in &self.particles[i + 1..] {
                if b.is_burst() {
                    continue;
                }
                let distance = a.position.distance(b.position);
                if let Some(alpha) = self.config.link_alpha(distance) {
                    links.push(Link {
                        from: a.position,
                        to: b.position,
                        alpha,
                    });
                }
            }
        }
        links
    }
}
