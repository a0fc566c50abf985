mod boss;
mod bounds;
mod obstacle;
mod particle;
mod player;
mod powerup;
mod projectile;

// Re-export all public types
pub use boss::Boss;
pub use bounds::{Aabb, Playfield};
pub use obstacle::Obstacle;
pub use particle::{Particle, ParticleTint, create_burst};
pub use player::{Craft, CraftKind};
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::{Projectile, ProjectileOwner};

/// Behaviour shared by everything that moves through the playfield.
pub trait Entity {
    fn update(&mut self, field: &Playfield);

    fn bounding_box(&self) -> Aabb;

    /// False once health, lifetime or pickup state says the entity is spent.
    fn is_alive(&self) -> bool;

    /// True once the entity has travelled past the field edge it was heading for.
    fn has_left(&self, _field: &Playfield) -> bool {
        false
    }
}

/// Updates every entity, then compacts away those that died or left the field.
pub fn advance_all<T: Entity>(entities: &mut Vec<T>, field: &Playfield) {
    for entity in entities.iter_mut() {
        entity.update(field);
    }
    compact(entities, field);
}

/// Drops spent entities, preserving the order of the survivors.
pub fn compact<T: Entity>(entities: &mut Vec<T>, field: &Playfield) {
    entities.retain(|e| e.is_alive() && !e.has_left(field));
}
