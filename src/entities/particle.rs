use rand::Rng;

use super::{Aabb, Entity, Playfield};

/// Colour family of a particle burst, chosen by what triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleTint {
    Crash,
    Heal,
    Shield,
    Boost,
    Celebrate,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub size: f32,
    pub life: u32,
    pub tint: ParticleTint,
}

impl Particle {
    pub const START_LIFE: u32 = 255;
    const FADE_PER_TICK: u32 = 5;
    const SHRINK_PER_TICK: f32 = 0.1;

    pub fn new(x: f32, y: f32, velocity_x: f32, velocity_y: f32, size: f32, tint: ParticleTint) -> Self {
        Self {
            x,
            y,
            velocity_x,
            velocity_y,
            size,
            life: Self::START_LIFE,
            tint,
        }
    }

    /// Spawns a particle with random drift and size.
    pub fn random<R: Rng>(x: f32, y: f32, tint: ParticleTint, rng: &mut R) -> Self {
        Self::new(
            x,
            y,
            rng.random_range(-2.0..=2.0),
            rng.random_range(-2.0..=2.0),
            rng.random_range(2..=5) as f32,
            tint,
        )
    }
}

impl Entity for Particle {
    fn update(&mut self, _field: &Playfield) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
        self.life = self.life.saturating_sub(Self::FADE_PER_TICK);
        self.size = (self.size - Self::SHRINK_PER_TICK).max(0.0);
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }

    fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Creates a burst of `count` particles around the given point
pub fn create_burst<R: Rng>(
    center_x: f32,
    center_y: f32,
    tint: ParticleTint,
    count: usize,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle::random(center_x, center_y, tint, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0)
    }

    #[test]
    fn test_particle_new() {
        let particle = Particle::new(10.0, 10.0, 1.0, -1.0, 4.0, ParticleTint::Crash);
        assert_eq!(particle.x, 10.0);
        assert_eq!(particle.y, 10.0);
        assert_eq!(particle.life, 255);
        assert_eq!(particle.tint, ParticleTint::Crash);
    }

    #[test]
    fn test_particle_update_position() {
        let mut particle = Particle::new(10.0, 10.0, 2.0, -1.0, 4.0, ParticleTint::Heal);
        particle.update(&field());
        assert_eq!(particle.x, 12.0);
        assert_eq!(particle.y, 9.0);
        assert_eq!(particle.life, 250);
        assert!((particle.size - 3.9).abs() < 1e-5);
    }

    #[test]
    fn test_particle_lifetime_expires() {
        let mut particle = Particle::new(10.0, 10.0, 0.0, 0.0, 2.0, ParticleTint::Boost);
        for _ in 0..50 {
            particle.update(&field());
        }
        assert!(particle.is_alive());
        particle.update(&field());
        assert!(!particle.is_alive());
    }

    #[test]
    fn test_size_never_negative() {
        let mut particle = Particle::new(0.0, 0.0, 0.0, 0.0, 0.05, ParticleTint::Shield);
        particle.update(&field());
        assert_eq!(particle.size, 0.0);
    }

    #[test]
    fn test_create_burst() {
        let mut rng = Pcg32::seed_from_u64(7);
        let particles = create_burst(10.0, 20.0, ParticleTint::Celebrate, 10, &mut rng);
        assert_eq!(particles.len(), 10);

        for particle in particles.iter() {
            assert_eq!(particle.x, 10.0);
            assert_eq!(particle.y, 20.0);
            assert!((-2.0..=2.0).contains(&particle.velocity_x));
            assert!((2.0..=5.0).contains(&particle.size));
        }
    }
}
