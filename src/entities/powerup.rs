use rand::Rng;

use super::{Aabb, Entity, Playfield};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    Invincible,
    Speed,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Health, PowerUpKind::Invincible, PowerUpKind::Speed];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            PowerUpKind::Health => "health",
            PowerUpKind::Invincible => "invincible",
            PowerUpKind::Speed => "speed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl PowerUp {
    pub const SIZE: f32 = 20.0;

    pub fn new(x: f32, y: f32, speed: f32, kind: PowerUpKind) -> Self {
        Self {
            x,
            y,
            speed,
            kind,
            collected: false,
        }
    }

    pub fn spawn<R: Rng>(field: &Playfield, speed: f32, rng: &mut R) -> Self {
        let kind = PowerUpKind::random(rng);
        let y = rng.random_range(0.0..=(field.height - Self::SIZE).max(0.0));
        Self::new(field.width, y, speed, kind)
    }
}

impl Entity for PowerUp {
    fn update(&mut self, _field: &Playfield) {
        self.x -= self.speed;
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::new(self.x, self.y, Self::SIZE, Self::SIZE)
    }

    fn is_alive(&self) -> bool {
        !self.collected
    }

    fn has_left(&self, _field: &Playfield) -> bool {
        self.x + Self::SIZE < 0.0
    }
}
