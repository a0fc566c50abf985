//! Gameplay tunables, built once and handed to the session.

use crate::entities::Playfield;

/// Immutable game configuration.
///
/// All timers are expressed in ticks; at the default rate of 60 ticks per
/// second, 60 ticks is one second of play.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub field: Playfield,
    pub tick_rate: u32,

    // Player craft
    pub fire_cooldown_ticks: u32,
    pub bullet_speed: f32,
    pub bullet_lifetime: u32,
    pub bullet_damage: u32,
    pub invincibility_ticks: u32,
    pub speed_boost_ticks: u32,
    pub boosted_speed: f32,
    pub heal_amount: u32,
    pub particle_burst: usize,

    // Hazards
    pub obstacle_damage: u32,
    pub boss_contact_damage: u32,
    pub boss_bullet_damage: u32,
    pub boss_fire_interval: u32,
    pub boss_bullet_speed: f32,
    pub boss_bullet_lifetime: u32,
    pub boss_kill_bonus: u64,

    // Spawn cadence
    pub obstacle_base_interval: u32,
    pub obstacle_min_interval: u32,
    pub obstacle_interval_step: u32,
    pub powerup_interval: u32,
    pub powerup_speed: f32,

    // Progression
    pub first_level_up_score: u64,
    pub level_up_step: u64,
    pub first_boss_score: u64,
    pub boss_spawn_step: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: Playfield::new(800.0, 600.0),
            tick_rate: 60,

            fire_cooldown_ticks: 15,
            bullet_speed: 10.0,
            bullet_lifetime: 100,
            bullet_damage: 10,
            invincibility_ticks: 180,
            speed_boost_ticks: 300, // 5 seconds
            boosted_speed: 8.0,
            heal_amount: 20,
            particle_burst: 10,

            obstacle_damage: 20,
            boss_contact_damage: 40,
            boss_bullet_damage: 10,
            boss_fire_interval: 60,
            boss_bullet_speed: 5.0,
            boss_bullet_lifetime: 100,
            boss_kill_bonus: 1000,

            obstacle_base_interval: 60,
            obstacle_min_interval: 30,
            obstacle_interval_step: 5,
            powerup_interval: 300,
            powerup_speed: 4.0,

            first_level_up_score: 1000,
            level_up_step: 1000,
            first_boss_score: 5000,
            boss_spawn_step: 5000,
        }
    }
}

impl GameConfig {
    /// Ticks between obstacle spawns at the given level, floored at the minimum interval.
    pub fn obstacle_interval(&self, level: u32) -> u32 {
        self.obstacle_base_interval
            .saturating_sub(self.obstacle_interval_step.saturating_mul(level))
            .max(self.obstacle_min_interval)
    }
}
