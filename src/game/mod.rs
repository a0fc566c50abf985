//! One play session: the fixed-rate tick, spawning, combat and progression.

mod collision;
mod events;
mod spawn;

pub use events::GameEvent;
pub use spawn::SpawnDirector;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::entities::{
    Boss, Craft, CraftKind, Entity, Obstacle, ParticleTint, PowerUp, advance_all,
};
use crate::input::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

/// The whole simulation. Fields are public so the renderer can read them
/// directly; mutation goes through [`Session::tick`].
pub struct Session {
    pub config: GameConfig,
    pub state: GameState,
    pub player: Craft,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    /// At most one boss; `Some` is what "boss active" means.
    pub boss: Option<Boss>,
    pub spawner: SpawnDirector,
    pub level: u32,
    pub next_level_score: u64,
    pub high_score: u64,
    pub tick_count: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Session {
    /// Construct a new session seeded from system entropy.
    pub fn new(config: GameConfig, high_score: u64) -> Self {
        Self::with_seed(config, high_score, rand::random())
    }

    /// Construct a session with a fixed seed, for reproducible play.
    pub fn with_seed(config: GameConfig, high_score: u64, seed: u64) -> Self {
        Self {
            player: Craft::new(CraftKind::Default, &config.field),
            state: GameState::Playing,
            obstacles: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            spawner: SpawnDirector::new(&config),
            level: 1,
            next_level_score: config.first_level_up_score,
            high_score,
            tick_count: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            config,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }

    pub fn score(&self) -> u64 {
        self.player.score
    }

    /// Runs one fixed-rate tick and returns the events it raised.
    ///
    /// While the game is over only the restart signal does anything.
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        match self.state {
            GameState::GameOver => {
                if input.restart {
                    self.reset();
                }
            }
            GameState::Playing => self.step(input),
        }
        std::mem::take(&mut self.events)
    }

    fn step(&mut self, input: &TickInput) {
        if let Some(kind) = input.select
            && kind != self.player.kind
        {
            self.change_craft(kind);
        }

        let field = self.config.field;
        if self.player.update(input, &self.config) {
            self.events.push(GameEvent::Fired);
        }
        advance_all(&mut self.obstacles, &field);
        advance_all(&mut self.powerups, &field);
        self.update_boss();

        let boss_active = self.boss_active();
        if let Some(obstacle) =
            self.spawner
                .tick_obstacles(&self.config, self.level, boss_active, &mut self.rng)
        {
            self.obstacles.push(obstacle);
        }
        if let Some(powerup) = self.spawner.tick_powerups(&self.config, &mut self.rng) {
            self.powerups.push(powerup);
        }
        self.check_boss_spawn();

        self.resolve_collisions();
        if self.is_game_over() {
            return;
        }

        self.check_level_up();
        self.player.score += 1;
        self.tick_count += 1;
    }

    fn update_boss(&mut self) {
        let field = self.config.field;
        if let Some(boss) = self.boss.as_mut() {
            boss.update(&field);
            if boss.has_left(&field) {
                log::info!("Boss escaped off the left edge");
                self.boss = None;
                self.events.push(GameEvent::BossEscaped);
            }
        }
    }

    fn check_boss_spawn(&mut self) {
        let boss_active = self.boss_active();
        let boss = self.spawner.check_boss(
            &self.config,
            self.player.score,
            self.level,
            boss_active,
        );
        if let Some(boss) = boss {
            log::info!(
                "Boss spawned at score {} (level {}, health {})",
                self.player.score,
                self.level,
                boss.health
            );
            self.boss = Some(boss);
            self.events.push(GameEvent::BossSpawned { level: self.level });
        }
    }

    fn check_level_up(&mut self) {
        if self.player.score >= self.next_level_score {
            self.level += 1;
            self.next_level_score += self.config.level_up_step;
            self.player.emit_particles(
                ParticleTint::Celebrate,
                self.config.particle_burst,
                &mut self.rng,
            );
            log::info!("Level up: {}", self.level);
            self.events.push(GameEvent::LevelUp(self.level));
        }
    }

    /// Swaps the craft variant, keeping score and health.
    pub fn change_craft(&mut self, kind: CraftKind) {
        if self.is_game_over() {
            return;
        }
        self.player.change_kind(kind);
        log::info!("Craft changed to {}", kind.get_name());
        self.events.push(GameEvent::CraftChanged(kind));
    }

    /// Returns to a fresh `Playing` session. The craft variant and the high
    /// score survive.
    pub fn reset(&mut self) {
        self.state = GameState::Playing;
        self.player.reset(&self.config.field);
        self.obstacles.clear();
        self.powerups.clear();
        self.boss = None;
        self.spawner.reset(&self.config);
        self.level = 1;
        self.next_level_score = self.config.first_level_up_score;
        self.tick_count = 0;
        log::info!("Session restarted");
        self.events.push(GameEvent::Restarted);
    }

    /// Flips to `GameOver` exactly once, recording a new high score if beaten.
    fn end_game(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.state = GameState::GameOver;
        let score = self.player.score;
        log::info!("Game over at level {} with score {}", self.level, score);
        self.events.push(GameEvent::GameOver { score });

        if score > self.high_score {
            self.high_score = score;
            log::info!("New high score: {}", score);
            self.events.push(GameEvent::NewHighScore(score));
        }
    }
}
