use super::{GameEvent, Session};
use crate::entities::{Entity, ParticleTint, PowerUpKind, compact};

impl Session {
    /// Resolves every interaction for this tick, in a fixed order.
    ///
    /// Anything removed earlier in the sequence is already gone by the time
    /// later checks run. Once the craft is destroyed nothing else resolves.
    pub(super) fn resolve_collisions(&mut self) {
        if !self.player.invincible {
            self.collide_obstacles();
            if self.is_game_over() {
                return;
            }
            self.collide_boss_body();
            if self.is_game_over() {
                return;
            }
            self.collide_boss_bullets();
            if self.is_game_over() {
                return;
            }
        }
        self.collect_powerups();
        self.hit_boss();
    }

    fn collide_obstacles(&mut self) {
        let field = self.config.field;
        let player_box = self.player.bounding_box();
        let mut hit = false;
        for obstacle in self.obstacles.iter_mut() {
            if obstacle.bounding_box().overlaps(&player_box) {
                obstacle.health = 0;
                hit = true;
            }
        }
        compact(&mut self.obstacles, &field);

        // Every overlapping obstacle is destroyed, but the crash costs one hit
        if hit {
            self.damage_player(self.config.obstacle_damage);
        }
    }

    fn collide_boss_body(&mut self) {
        let touching = self
            .boss
            .as_ref()
            .is_some_and(|boss| boss.bounding_box().overlaps(&self.player.bounding_box()));
        if touching {
            self.damage_player(self.config.boss_contact_damage);
        }
    }

    fn collide_boss_bullets(&mut self) {
        let field = self.config.field;
        let player_box = self.player.bounding_box();
        let mut hits = 0;
        if let Some(boss) = self.boss.as_mut() {
            for bullet in boss.bullets.iter_mut() {
                if bullet.is_alive() && player_box.contains_point(bullet.x, bullet.y) {
                    bullet.consume();
                    hits += 1;
                }
            }
            compact(&mut boss.bullets, &field);
        }

        for _ in 0..hits {
            self.damage_player(self.config.boss_bullet_damage);
            if self.is_game_over() {
                break;
            }
        }
    }

    fn collect_powerups(&mut self) {
        let field = self.config.field;
        let player_box = self.player.bounding_box();
        let mut collected = Vec::new();
        for powerup in self.powerups.iter_mut() {
            if powerup.is_alive() && powerup.bounding_box().overlaps(&player_box) {
                powerup.collected = true;
                collected.push(powerup.kind);
            }
        }
        compact(&mut self.powerups, &field);

        for kind in collected {
            self.apply_powerup(kind);
        }
    }

    fn apply_powerup(&mut self, kind: PowerUpKind) {
        let tint = match kind {
            PowerUpKind::Health => {
                self.player.heal(self.config.heal_amount);
                ParticleTint::Heal
            }
            PowerUpKind::Invincible => {
                self.player
                    .grant_invincibility(self.config.invincibility_ticks);
                ParticleTint::Shield
            }
            PowerUpKind::Speed => {
                self.player
                    .grant_speed_boost(self.config.boosted_speed, self.config.speed_boost_ticks);
                ParticleTint::Boost
            }
        };
        self.player
            .emit_particles(tint, self.config.particle_burst, &mut self.rng);
        log::debug!("Collected {} power-up", kind.get_name());
        self.events.push(GameEvent::PowerUpCollected(kind));
    }

    fn hit_boss(&mut self) {
        let field = self.config.field;
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        let boss_box = boss.bounding_box();
        for bullet in self.player.bullets.iter_mut() {
            if bullet.is_alive() && boss_box.contains_point(bullet.x, bullet.y) {
                boss.take_damage(self.config.bullet_damage);
                bullet.consume();
                if !boss.is_alive() {
                    break;
                }
            }
        }
        compact(&mut self.player.bullets, &field);

        if !boss.is_alive() {
            self.boss = None;
            self.player.score += self.config.boss_kill_bonus;
            self.player.emit_particles(
                ParticleTint::Celebrate,
                self.config.particle_burst,
                &mut self.rng,
            );
            log::info!("Boss defeated, score now {}", self.player.score);
            self.events.push(GameEvent::BossDefeated);
        }
    }

    /// Applies damage with crash feedback; the first drop to zero ends the game.
    fn damage_player(&mut self, amount: u32) {
        if !self.player.take_damage(amount) {
            return;
        }
        self.player
            .emit_particles(ParticleTint::Crash, self.config.particle_burst, &mut self.rng);
        self.events.push(GameEvent::Crash);

        if !self.player.is_alive() {
            self.end_game();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::entities::{Boss, Obstacle, PowerUp, PowerUpKind, Projectile};
    use crate::game::{GameEvent, GameState, Session};
    use crate::input::TickInput;

    fn session() -> Session {
        Session::with_seed(GameConfig::default(), 0, 5)
    }

    /// An obstacle that will still sit on the craft after its own move this tick.
    fn obstacle_on_player(session: &Session) -> Obstacle {
        Obstacle::new(session.player.x + 10.0, session.player.y, 1)
    }

    #[test]
    fn test_obstacle_hit_damages_and_removes() {
        let mut session = session();
        let far = Obstacle::new(700.0, 10.0, 1);
        session.obstacles = vec![obstacle_on_player(&session), far];

        let events = session.tick(&TickInput::default());
        assert_eq!(session.player.health, 80);
        assert_eq!(session.obstacles.len(), 1);
        assert!(events.contains(&GameEvent::Crash));
        assert_eq!(session.player.particles.len(), 10);
    }

    #[test]
    fn test_overlapping_obstacles_cost_one_hit() {
        let mut session = session();
        session.obstacles = vec![obstacle_on_player(&session), obstacle_on_player(&session)];
        let events = session.tick(&TickInput::default());
        assert_eq!(session.player.health, 80);
        assert!(session.obstacles.is_empty());
        let crashes = events.iter().filter(|e| **e == GameEvent::Crash).count();
        assert_eq!(crashes, 1);
    }

    #[test]
    fn test_invincible_passes_through_obstacles() {
        let mut session = session();
        session.player.grant_invincibility(180);
        session.obstacles = vec![obstacle_on_player(&session)];
        session.tick(&TickInput::default());
        assert_eq!(session.player.health, 100);
        assert_eq!(session.obstacles.len(), 1);
    }

    #[test]
    fn test_boss_contact_damage() {
        let mut session = session();
        let mut boss = Boss::new(&session.config, 1);
        boss.x = session.player.x;
        boss.y = session.player.y - 40.0;
        session.boss = Some(boss);

        session.tick(&TickInput::default());
        assert_eq!(session.player.health, 60);
        assert!(session.boss_active());
    }

    #[test]
    fn test_invincible_ignores_boss_contact() {
        let mut session = session();
        session.player.grant_invincibility(180);
        let mut boss = Boss::new(&session.config, 1);
        boss.x = session.player.x;
        boss.y = session.player.y - 40.0;
        session.boss = Some(boss);

        let events = session.tick(&TickInput::default());
        assert_eq!(session.player.health, 100);
        assert!(!events.contains(&GameEvent::Crash));
        assert!(session.boss_active());
    }

    #[test]
    fn test_invincible_ignores_boss_bullets() {
        let mut session = session();
        session.player.grant_invincibility(180);
        let mut boss = Boss::new(&session.config, 1);
        boss.x = 600.0;
        let (cx, cy) = session.player.bounding_box().center();
        boss.bullets
            .push(Projectile::radial(cx - 5.0, cy, 0.0, 5.0, 100));
        session.boss = Some(boss);

        let events = session.tick(&TickInput::default());
        assert_eq!(session.player.health, 100);
        assert!(!events.contains(&GameEvent::Crash));
        assert_eq!(session.boss.as_ref().map(|b| b.bullets.len()), Some(1));
    }

    #[test]
    fn test_boss_bullet_hits_and_is_consumed() {
        let mut session = session();
        let mut boss = Boss::new(&session.config, 1);
        boss.x = 600.0;
        let (cx, cy) = session.player.bounding_box().center();
        // Moving right by 5 this tick, still inside the craft afterwards
        boss.bullets
            .push(Projectile::radial(cx - 5.0, cy, 0.0, 5.0, 100));
        session.boss = Some(boss);

        let events = session.tick(&TickInput::default());
        assert_eq!(session.player.health, 90);
        assert!(events.contains(&GameEvent::Crash));
        assert!(session.boss.as_ref().is_some_and(|b| b.bullets.is_empty()));
    }

    #[test]
    fn test_health_powerup_heals_capped() {
        let mut session = session();
        session.player.health = 90;
        session.powerups = vec![PowerUp::new(
            session.player.x + 10.0,
            session.player.y + 5.0,
            4.0,
            PowerUpKind::Health,
        )];

        let events = session.tick(&TickInput::default());
        assert_eq!(session.player.health, 100);
        assert!(session.powerups.is_empty());
        assert!(events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Health)));
    }

    #[test]
    fn test_invincible_powerup() {
        let mut session = session();
        session.powerups = vec![PowerUp::new(
            session.player.x + 10.0,
            session.player.y + 5.0,
            4.0,
            PowerUpKind::Invincible,
        )];
        session.tick(&TickInput::default());
        assert!(session.player.invincible);
        assert_eq!(session.player.invincible_ticks, 180);
    }

    #[test]
    fn test_speed_powerup_reverts_after_countdown() {
        let mut session = session();
        session.powerups = vec![PowerUp::new(
            session.player.x + 10.0,
            session.player.y + 5.0,
            4.0,
            PowerUpKind::Speed,
        )];
        session.tick(&TickInput::default());
        assert_eq!(session.player.speed, 8.0);
        assert_eq!(session.player.boost_ticks, 300);

        session.player.boost_ticks = 1;
        session.obstacles.clear();
        session.tick(&TickInput::default());
        assert_eq!(session.player.speed, 5.0);
    }

    #[test]
    fn test_powerup_collected_while_invincible() {
        let mut session = session();
        session.player.grant_invincibility(180);
        session.player.health = 50;
        session.powerups = vec![PowerUp::new(
            session.player.x + 10.0,
            session.player.y + 5.0,
            4.0,
            PowerUpKind::Health,
        )];
        session.tick(&TickInput::default());
        assert_eq!(session.player.health, 70);
    }

    #[test]
    fn test_player_bullet_damages_boss() {
        let mut session = session();
        let mut boss = Boss::new(&session.config, 1);
        boss.x = 400.0;
        boss.y = 250.0;
        session.boss = Some(boss);
        session
            .player
            .bullets
            .push(Projectile::forward(440.0, 300.0, 10.0, 100));

        session.tick(&TickInput::default());
        assert_eq!(session.boss.as_ref().map(|b| b.health), Some(240));
        assert!(session.player.bullets.is_empty());
    }

    #[test]
    fn test_lethal_damage_ends_game_once() {
        let mut session = Session::with_seed(GameConfig::default(), 10, 5);
        session.player.health = 20;
        session.player.score = 25;
        session.obstacles = vec![obstacle_on_player(&session), obstacle_on_player(&session)];
        // Boss body on the craft as well; the obstacle crash already ended it
        let mut boss = Boss::new(&session.config, 1);
        boss.x = session.player.x;
        boss.y = session.player.y - 40.0;
        session.boss = Some(boss);

        let events = session.tick(&TickInput::default());
        assert_eq!(session.player.health, 0);
        assert_eq!(session.state, GameState::GameOver);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        let crashes = events.iter().filter(|e| **e == GameEvent::Crash).count();
        assert_eq!(crashes, 1);
        assert!(events.contains(&GameEvent::NewHighScore(25)));
        assert_eq!(session.high_score, 25);
    }

    #[test]
    fn test_dead_craft_cannot_collect_powerups() {
        let mut session = session();
        session.player.health = 20;
        session.obstacles = vec![obstacle_on_player(&session)];
        session.powerups = vec![PowerUp::new(
            session.player.x + 10.0,
            session.player.y + 5.0,
            4.0,
            PowerUpKind::Health,
        )];

        let events = session.tick(&TickInput::default());
        assert!(session.is_game_over());
        assert_eq!(session.player.health, 0);
        assert_eq!(session.powerups.len(), 1);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::PowerUpCollected(_))));
    }

    #[test]
    fn test_no_boss_bonus_after_game_over() {
        let mut session = session();
        session.player.health = 20;
        session.player.score = 100;
        session.obstacles = vec![obstacle_on_player(&session)];
        let mut boss = Boss::new(&session.config, 1);
        boss.x = 400.0;
        boss.y = 250.0;
        boss.health = 10;
        session.boss = Some(boss);
        session
            .player
            .bullets
            .push(Projectile::forward(440.0, 300.0, 10.0, 100));

        let events = session.tick(&TickInput::default());
        assert!(session.is_game_over());
        assert_eq!(session.score(), 100);
        assert_eq!(session.high_score, 100);
        assert!(session.boss_active());
        assert!(!events.contains(&GameEvent::BossDefeated));
    }

    #[test]
    fn test_game_over_below_high_score_keeps_record() {
        let mut session = Session::with_seed(GameConfig::default(), 500, 5);
        session.player.health = 20;
        session.player.score = 100;
        session.obstacles = vec![obstacle_on_player(&session)];

        let events = session.tick(&TickInput::default());
        assert!(session.is_game_over());
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewHighScore(_))));
        assert_eq!(session.high_score, 500);
    }
}
