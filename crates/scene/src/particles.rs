//! CPU particle simulation.
//!
//! Particles live in emitter-local space; the renderer places the emitter
//! with a per-draw transform. Spawning is driven by a deterministic
//! splitmix64 stream so a given config and frame sequence always produces the
//! same particles.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use homestead_assets::ParticleConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
    pub lifetime: f32,
}

impl Particle {
    /// Normalized age in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// Per-particle instance data as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    config: ParticleConfig,
    particles: Vec<Particle>,
    spawn_accumulator: f32,
    rng: SplitMix64,
    spawned_total: u64,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig) -> Self {
        let rng = SplitMix64(config.seed);
        tracing::debug!(
            "particle system: up to {} particles at {}/s",
            config.max_particles,
            config.spawn_rate
        );
        Self {
            particles: Vec::with_capacity(config.max_particles as usize),
            config,
            spawn_accumulator: 0.0,
            rng,
            spawned_total: 0,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Step the simulation: move and age live particles, drop expired ones,
    /// then emit the particles due in this interval. Emission beyond
    /// `max_particles` is discarded.
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let gravity = Vec3::from(self.config.gravity);
        for p in &mut self.particles {
            p.velocity += gravity * dt;
            p.position += p.velocity * dt;
            p.age += dt;
        }
        self.particles.retain(|p| p.age < p.lifetime);

        self.spawn_accumulator += self.config.spawn_rate * dt;
        let due = self.spawn_accumulator.floor();
        self.spawn_accumulator -= due;
        let room = (self.config.max_particles as usize).saturating_sub(self.particles.len());
        for _ in 0..(due as usize).min(room) {
            let particle = self.spawn_one();
            self.particles.push(particle);
        }
    }

    fn spawn_one(&mut self) -> Particle {
        let c = &self.config;
        let base = Vec3::from(c.velocity);
        let variance = Vec3::from(c.velocity_variance);
        let jitter = Vec3::new(
            self.rng.next_signed(),
            self.rng.next_signed(),
            self.rng.next_signed(),
        );
        let lifetime = c.lifetime + c.lifetime_variance * self.rng.next_signed();
        self.spawned_total += 1;
        Particle {
            position: Vec3::ZERO,
            velocity: base + variance * jitter,
            age: 0.0,
            lifetime: lifetime.max(f32::EPSILON),
        }
    }

    /// Instance data sorted back to front as seen from `view_origin`
    /// (emitter-local coordinates).
    pub fn instances(&self, view_origin: Vec3) -> Vec<ParticleInstance> {
        let c = &self.config;
        let start_color = Vec4::from(c.start_color);
        let end_color = Vec4::from(c.end_color);
        let mut sorted: Vec<&Particle> = self.particles.iter().collect();
        sorted.sort_by(|a, b| {
            let da = a.position.distance_squared(view_origin);
            let db = b.position.distance_squared(view_origin);
            db.total_cmp(&da)
        });
        sorted
            .into_iter()
            .map(|p| {
                let t = p.progress();
                ParticleInstance {
                    position: p.position.to_array(),
                    size: c.start_size + (c.end_size - c.start_size) * t,
                    color: start_color.lerp(end_color, t).to_array(),
                }
            })
            .collect()
    }
}

/// splitmix64 stream.
#[derive(Debug, Clone)]
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in [-1, 1).
    fn next_signed(&mut self) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        unit * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steady(rate: f32, lifetime: f32, max: u32) -> ParticleConfig {
        ParticleConfig {
            spawn_rate: rate,
            lifetime,
            lifetime_variance: 0.0,
            max_particles: max,
            ..Default::default()
        }
    }

    #[test]
    fn fractional_spawns_carry_over() {
        let mut sys = ParticleSystem::new(steady(10.0, 100.0, 100));
        sys.update(0.25);
        assert_eq!(sys.len(), 2);
        sys.update(0.25);
        assert_eq!(sys.len(), 5);
    }

    #[test]
    fn capacity_caps_live_particles() {
        let mut sys = ParticleSystem::new(steady(100.0, 100.0, 5));
        sys.update(1.0);
        assert_eq!(sys.len(), 5);
        sys.update(1.0);
        assert_eq!(sys.len(), 5);
        assert_eq!(sys.spawned_total(), 5);
    }

    #[test]
    fn expired_particles_are_removed() {
        let mut sys = ParticleSystem::new(steady(2.0, 1.0, 100));
        for _ in 0..10 {
            sys.update(0.5);
        }
        assert_eq!(sys.len(), 2);
        assert!(sys.particles().iter().all(|p| p.age < p.lifetime));
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut sys = ParticleSystem::new(ParticleConfig::default());
        sys.update(0.0);
        sys.update(-1.0);
        assert!(sys.is_empty());
    }

    #[test]
    fn same_seed_same_particles() {
        let mut a = ParticleSystem::new(ParticleConfig::default());
        let mut b = ParticleSystem::new(ParticleConfig::default());
        for _ in 0..30 {
            a.update(1.0 / 60.0);
            b.update(1.0 / 60.0);
        }
        assert!(!a.is_empty());
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn velocity_stays_within_variance() {
        let config = ParticleConfig {
            gravity: [0.0; 3],
            ..steady(1000.0, 10.0, 1000)
        };
        let mut sys = ParticleSystem::new(config.clone());
        sys.update(0.5);
        for p in sys.particles() {
            for axis in 0..3 {
                let dev = (p.velocity[axis] - config.velocity[axis]).abs();
                assert!(dev <= config.velocity_variance[axis] + 1e-6);
            }
        }
    }

    #[test]
    fn instances_are_back_to_front() {
        let mut sys = ParticleSystem::new(ParticleConfig {
            velocity_variance: [2.0, 2.0, 2.0],
            ..steady(50.0, 10.0, 100)
        });
        for _ in 0..10 {
            sys.update(0.1);
        }
        let eye = Vec3::new(0.0, 2.0, 10.0);
        let instances = sys.instances(eye);
        assert_eq!(instances.len(), sys.len());
        let dists: Vec<f32> = instances
            .iter()
            .map(|i| Vec3::from(i.position).distance_squared(eye))
            .collect();
        assert!(dists.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn size_and_color_interpolate() {
        let config = steady(1.0, 2.0, 10);
        let mut sys = ParticleSystem::new(config.clone());
        sys.update(1.0); // spawn at age 0
        let fresh = sys.instances(Vec3::ZERO)[0];
        assert_eq!(fresh.size, config.start_size);
        assert_eq!(fresh.color, config.start_color);

        sys.particles[0].age = 1.0;
        let half = sys.instances(Vec3::ZERO)[0];
        let expected = (config.start_size + config.end_size) * 0.5;
        assert!((half.size - expected).abs() < 1e-5);
    }
}
