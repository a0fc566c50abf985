use rand::Rng;

use super::{Aabb, Entity, Playfield};

/// A rock drifting in from the right edge.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub health: u32,
}

impl Obstacle {
    pub const SIZE: f32 = 40.0;

    pub fn new(x: f32, y: f32, level: u32) -> Self {
        Self {
            x,
            y,
            speed: 3.0 + level as f32,
            health: Self::health_for_level(level),
        }
    }

    /// Spawns just past the right edge at a random height, with speed and
    /// toughness scaled by level.
    pub fn spawn<R: Rng>(field: &Playfield, level: u32, rng: &mut R) -> Self {
        let y = rng.random_range(0.0..=(field.height - Self::SIZE).max(0.0));
        let speed = rng.random_range(3..=7) as f32 + level as f32;
        Self {
            x: field.width,
            y,
            speed,
            health: Self::health_for_level(level),
        }
    }

    pub fn health_for_level(level: u32) -> u32 {
        20 + level * 5
    }
}

impl Entity for Obstacle {
    fn update(&mut self, _field: &Playfield) {
        self.x -= self.speed;
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::new(self.x, self.y, Self::SIZE, Self::SIZE)
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }

    fn has_left(&self, _field: &Playfield) -> bool {
        self.x + Self::SIZE < 0.0
    }
}
