use rand::Rng;

use super::particle::{Particle, ParticleTint, create_burst};
use super::projectile::Projectile;
use super::{Aabb, Entity, Playfield, advance_all};
use crate::config::GameConfig;
use crate::input::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftKind {
    Default,
    Fast,
    Tank,
}

impl CraftKind {
    pub fn get_name(&self) -> &'static str {
        match self {
            CraftKind::Default => "default",
            CraftKind::Fast => "fast",
            CraftKind::Tank => "tank",
        }
    }

    pub fn base_speed(&self) -> f32 {
        match self {
            CraftKind::Default => 5.0,
            CraftKind::Fast => 7.0,
            CraftKind::Tank => 3.0,
        }
    }

    pub fn max_health(&self) -> u32 {
        match self {
            CraftKind::Default => 100,
            CraftKind::Fast => 80,
            CraftKind::Tank => 150,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Craft {
    pub x: f32,
    pub y: f32,
    pub kind: CraftKind,
    pub speed: f32,
    pub health: u32,
    pub score: u64,
    pub invincible: bool,
    pub invincible_ticks: u32,
    /// Ticks left on the speed boost; the base speed returns when it hits zero.
    pub boost_ticks: u32,
    /// Ticks since the last shot.
    pub shoot_timer: u32,
    pub bullets: Vec<Projectile>,
    pub particles: Vec<Particle>,
}

impl Craft {
    pub const WIDTH: f32 = 50.0;
    pub const HEIGHT: f32 = 30.0;

    pub fn new(kind: CraftKind, field: &Playfield) -> Self {
        let (x, y) = Self::start_position(field);
        Self {
            x,
            y,
            kind,
            speed: kind.base_speed(),
            health: kind.max_health(),
            score: 0,
            invincible: false,
            invincible_ticks: 0,
            boost_ticks: 0,
            shoot_timer: 0,
            bullets: Vec::new(),
            particles: Vec::new(),
        }
    }

    /// Top-left corner that centres the craft on (W/4, H/2).
    pub fn start_position(field: &Playfield) -> (f32, f32) {
        (
            field.width / 4.0 - Self::WIDTH / 2.0,
            field.height / 2.0 - Self::HEIGHT / 2.0,
        )
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn max_health(&self) -> u32 {
        self.kind.max_health()
    }

    /// Advances the craft by one tick: status effects, movement, owned
    /// particles and bullets, then firing.
    ///
    /// Returns true if a shot was fired this tick.
    pub fn update(&mut self, input: &TickInput, config: &GameConfig) -> bool {
        self.tick_status_effects();

        let field = &config.field;
        if input.up {
            self.y -= self.speed;
        }
        if input.down {
            self.y += self.speed;
        }
        if input.left {
            self.x -= self.speed;
        }
        if input.right {
            self.x += self.speed;
        }
        self.x = self.x.clamp(0.0, field.width - Self::WIDTH);
        self.y = self.y.clamp(0.0, field.height - Self::HEIGHT);

        advance_all(&mut self.particles, field);
        advance_all(&mut self.bullets, field);

        self.shoot_timer = self.shoot_timer.saturating_add(1);
        if input.fire && self.shoot_timer >= config.fire_cooldown_ticks {
            self.shoot(config);
            self.shoot_timer = 0;
            return true;
        }
        false
    }

    fn tick_status_effects(&mut self) {
        if self.invincible {
            self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
            if self.invincible_ticks == 0 {
                self.invincible = false;
            }
        }

        if self.boost_ticks > 0 {
            self.boost_ticks -= 1;
            if self.boost_ticks == 0 {
                self.speed = self.kind.base_speed();
            }
        }
    }

    fn shoot(&mut self, config: &GameConfig) {
        let (_, center_y) = self.bounding_box().center();
        self.bullets.push(Projectile::forward(
            self.x + Self::WIDTH,
            center_y,
            config.bullet_speed,
            config.bullet_lifetime,
        ));
    }

    /// Applies damage unless invincible. Returns true if health changed.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.invincible {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        true
    }

    /// Heals up to the variant's maximum; never lowers a carried-over surplus.
    pub fn heal(&mut self, amount: u32) {
        let healed = self.health.saturating_add(amount).min(self.max_health());
        self.health = self.health.max(healed);
    }

    pub fn grant_invincibility(&mut self, ticks: u32) {
        self.invincible = true;
        self.invincible_ticks = ticks;
    }

    pub fn grant_speed_boost(&mut self, speed: f32, ticks: u32) {
        self.speed = speed;
        self.boost_ticks = ticks;
    }

    pub fn emit_particles<R: Rng>(&mut self, tint: ParticleTint, count: usize, rng: &mut R) {
        let (center_x, center_y) = self.bounding_box().center();
        self.particles
            .extend(create_burst(center_x, center_y, tint, count, rng));
    }

    /// Swaps to another variant, carrying score and health across.
    ///
    /// Speed and any boost start fresh for the new variant. Position and
    /// invincibility carry over.
    pub fn change_kind(&mut self, kind: CraftKind) {
        self.kind = kind;
        self.speed = kind.base_speed();
        self.boost_ticks = 0;
    }

    /// Restores a fresh-session craft of the same variant.
    pub fn reset(&mut self, field: &Playfield) {
        *self = Self::new(self.kind, field);
    }
}
