use super::{Aabb, Entity, Playfield};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOwner {
    Player,
    Boss,
}

/// A bullet travelling in a straight line until it runs out of lifetime.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub owner: ProjectileOwner,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub lifetime: u32,
}

impl Projectile {
    /// Forward (rightward) shot fired by the player craft.
    pub fn forward(x: f32, y: f32, speed: f32, lifetime: u32) -> Self {
        Self {
            x,
            y,
            owner: ProjectileOwner::Player,
            velocity_x: speed,
            velocity_y: 0.0,
            lifetime,
        }
    }

    /// Boss shot leaving the origin at `angle_degrees` (0 = right, 90 = down).
    pub fn radial(x: f32, y: f32, angle_degrees: f32, speed: f32, lifetime: u32) -> Self {
        let angle = angle_degrees.to_radians();
        Self {
            x,
            y,
            owner: ProjectileOwner::Boss,
            velocity_x: angle.cos() * speed,
            velocity_y: angle.sin() * speed,
            lifetime,
        }
    }

    /// Marks the projectile spent; it is swept on the next compaction.
    pub fn consume(&mut self) {
        self.lifetime = 0;
    }
}

impl Entity for Projectile {
    fn update(&mut self, _field: &Playfield) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::new(self.x, self.y, 0.0, 0.0)
    }

    fn is_alive(&self) -> bool {
        self.lifetime > 0
    }

    fn has_left(&self, field: &Playfield) -> bool {
        self.x < 0.0 || self.x > field.width || self.y < 0.0 || self.y > field.height
    }
}
