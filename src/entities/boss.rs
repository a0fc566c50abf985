use super::projectile::Projectile;
use super::{Aabb, Entity, Playfield, advance_all};
use crate::config::GameConfig;

/// Bullets per radial volley, spread evenly around the full circle.
const VOLLEY_SIZE: u32 = 8;

#[derive(Debug, Clone)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    /// +1 while moving down, -1 while moving up.
    pub direction: f32,
    pub shoot_timer: u32,
    pub fire_interval: u32,
    pub bullet_speed: f32,
    pub bullet_lifetime: u32,
    pub bullets: Vec<Projectile>,
}

impl Boss {
    pub const SIZE: f32 = 100.0;
    const DRIFT: f32 = 1.0;

    /// Enters just past the right edge, vertically centred.
    pub fn new(config: &GameConfig, level: u32) -> Self {
        let health = Self::health_for_level(level);
        Self {
            x: config.field.width,
            y: config.field.height / 2.0 - Self::SIZE / 2.0,
            health,
            max_health: health,
            speed: 2.0,
            direction: 1.0,
            shoot_timer: 0,
            fire_interval: config.boss_fire_interval,
            bullet_speed: config.boss_bullet_speed,
            bullet_lifetime: config.boss_bullet_lifetime,
            bullets: Vec::new(),
        }
    }

    pub fn health_for_level(level: u32) -> u32 {
        200 + level * 50
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    fn fire_volley(&mut self) {
        let (center_x, center_y) = self.bounding_box().center();
        let step = 360 / VOLLEY_SIZE;
        for i in 0..VOLLEY_SIZE {
            self.bullets.push(Projectile::radial(
                center_x,
                center_y,
                (i * step) as f32,
                self.bullet_speed,
                self.bullet_lifetime,
            ));
        }
    }
}

impl Entity for Boss {
    fn update(&mut self, field: &Playfield) {
        self.y += self.speed * self.direction;
        if self.y <= 0.0 || self.y + Self::SIZE >= field.height {
            self.direction = -self.direction;
        }
        self.x -= Self::DRIFT;

        self.shoot_timer += 1;
        if self.shoot_timer >= self.fire_interval {
            self.fire_volley();
            self.shoot_timer = 0;
        }

        advance_all(&mut self.bullets, field);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_new() {
        let config = GameConfig::default();
        let boss = Boss::new(&config, 2);
        assert_eq!(boss.health, 300);
        assert_eq!(boss.x, 800.0);
        assert_eq!(boss.y, 250.0);
        assert!(boss.bullets.is_empty());
    }

    #[test]
    fn test_boss_oscillates_and_drifts() {
        let config = GameConfig::default();
        let mut boss = Boss::new(&config, 1);
        boss.y = 498.0;
        boss.update(&config.field);
        assert_eq!(boss.y, 500.0);
        assert_eq!(boss.direction, -1.0);
        assert_eq!(boss.x, 799.0);
        boss.update(&config.field);
        assert_eq!(boss.y, 498.0);
    }

    #[test]
    fn test_boss_fires_radial_volley() {
        let config = GameConfig::default();
        let mut boss = Boss::new(&config, 1);
        boss.x = 300.0;
        for _ in 0..59 {
            boss.update(&config.field);
        }
        assert!(boss.bullets.is_empty());
        boss.update(&config.field);
        assert_eq!(boss.bullets.len(), 8);
        assert_eq!(boss.shoot_timer, 0);
    }

    #[test]
    fn test_boss_damage() {
        let config = GameConfig::default();
        let mut boss = Boss::new(&config, 1);
        boss.take_damage(240);
        assert!(boss.is_alive());
        boss.take_damage(20);
        assert_eq!(boss.health, 0);
        assert!(!boss.is_alive());
    }
}
