// Library exports for testing
pub use config::GameConfig;
pub use entities::{
    Aabb, Boss, Craft, CraftKind, Entity, Obstacle, Particle, ParticleTint, Playfield, PowerUp,
    PowerUpKind, Projectile, ProjectileOwner,
};
pub use game::{GameEvent, GameState, Session, SpawnDirector};
pub use highscore::{HighScoreRecord, HighScoreStore};
pub use input::TickInput;

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod game;
pub mod highscore;
pub mod input;
pub mod renderer;
