use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Boss, Obstacle, PowerUp};

/// Decides when obstacles, power-ups and the boss appear.
#[derive(Debug, Clone)]
pub struct SpawnDirector {
    pub obstacle_timer: u32,
    pub powerup_timer: u32,
    /// Score at which the next boss appears; only ever moves forward.
    pub next_boss_score: u64,
}

impl SpawnDirector {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            obstacle_timer: 0,
            powerup_timer: 0,
            next_boss_score: config.first_boss_score,
        }
    }

    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// Counts towards the next obstacle; the counter does not run while a boss is out.
    pub fn tick_obstacles<R: Rng>(
        &mut self,
        config: &GameConfig,
        level: u32,
        boss_active: bool,
        rng: &mut R,
    ) -> Option<Obstacle> {
        if boss_active {
            return None;
        }
        self.obstacle_timer += 1;
        if self.obstacle_timer >= config.obstacle_interval(level) {
            self.obstacle_timer = 0;
            let obstacle = Obstacle::spawn(&config.field, level, rng);
            log::debug!("Obstacle spawned at y={:.0} speed={:.0}", obstacle.y, obstacle.speed);
            return Some(obstacle);
        }
        None
    }

    pub fn tick_powerups<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> Option<PowerUp> {
        self.powerup_timer += 1;
        if self.powerup_timer >= config.powerup_interval {
            self.powerup_timer = 0;
            let powerup = PowerUp::spawn(&config.field, config.powerup_speed, rng);
            log::debug!("Power-up spawned: {}", powerup.kind.get_name());
            return Some(powerup);
        }
        None
    }

    /// Spawns a boss once the score threshold is reached and none is active,
    /// pushing the threshold forward by one step.
    pub fn check_boss(
        &mut self,
        config: &GameConfig,
        score: u64,
        level: u32,
        boss_active: bool,
    ) -> Option<Boss> {
        if boss_active || score < self.next_boss_score {
            return None;
        }
        self.next_boss_score += config.boss_spawn_step;
        Some(Boss::new(config, level))
    }
}
