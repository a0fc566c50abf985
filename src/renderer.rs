use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::entities::{
    Aabb, Boss, CraftKind, Entity, ParticleTint, Playfield, PowerUpKind, ProjectileOwner,
};
use crate::game::{GameState, Session};

const ORANGE: Color = Color::Rgb(255, 165, 0);

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub session: &'a Session,
    pub area: Rect,
    pub fps: u32,
}

/// Draws the session into the terminal, scaling the playfield to fit.
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        if view.session.state == GameState::GameOver {
            self.render_game_over(frame, view);
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let session = view.session;
        let field = &session.config.field;

        let arena = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Indexed(18)));
        let game_area = block.inner(arena);
        frame.render_widget(block, arena);

        let buffer = frame.buffer_mut();

        for obstacle in &session.obstacles {
            fill(buffer, game_area, field, obstacle.bounding_box(), "#", Style::default().fg(Color::Gray));
        }

        for powerup in &session.powerups {
            let (symbol, color) = match powerup.kind {
                PowerUpKind::Health => ("+", Color::Green),
                PowerUpKind::Invincible => ("I", Color::Yellow),
                PowerUpKind::Speed => ("S", Color::Magenta),
            };
            fill(
                buffer,
                game_area,
                field,
                powerup.bounding_box(),
                symbol,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        if let Some(boss) = &session.boss {
            fill(buffer, game_area, field, boss.bounding_box(), "@", Style::default().fg(ORANGE));
        }

        // Blink while invincible
        let player = &session.player;
        if !(player.invincible && session.tick_count % 10 < 5) {
            let color = match player.kind {
                CraftKind::Default => Color::Blue,
                CraftKind::Fast => Color::Green,
                CraftKind::Tank => Color::Red,
            };
            fill(
                buffer,
                game_area,
                field,
                player.bounding_box(),
                ">",
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        let boss_bullets = session.boss.iter().flat_map(|b| b.bullets.iter());
        for projectile in player.bullets.iter().chain(boss_bullets) {
            let (symbol, color) = match projectile.owner {
                ProjectileOwner::Player => ("-", Color::Yellow),
                ProjectileOwner::Boss => ("*", Color::Red),
            };
            point(buffer, game_area, field, projectile.x, projectile.y, symbol, Style::default().fg(color));
        }

        for particle in &player.particles {
            if particle.size < 1.0 {
                continue;
            }
            let color = match particle.tint {
                ParticleTint::Crash => Color::Red,
                ParticleTint::Heal => Color::Green,
                ParticleTint::Shield => Color::Yellow,
                ParticleTint::Boost => Color::Magenta,
                ParticleTint::Celebrate => Color::White,
            };
            point(buffer, game_area, field, particle.x, particle.y, ".", Style::default().fg(color));
        }

        self.render_hud(frame, view);
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let session = view.session;
        let player = &session.player;
        let label = Style::default().fg(Color::DarkGray);
        let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let health_color = if player.health * 2 > player.max_health() {
            Color::Green
        } else if player.health * 4 > player.max_health() {
            Color::Yellow
        } else {
            Color::Red
        };

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(player.score.to_string(), value(Color::Yellow)),
            Span::styled("  Health: ", label),
            Span::styled(player.health.to_string(), value(health_color)),
            Span::styled("  High Score: ", label),
            Span::styled(session.high_score.to_string(), value(Color::White)),
            Span::styled("  Level: ", label),
            Span::styled(session.level.to_string(), value(Color::Cyan)),
            Span::styled("  Craft: ", label),
            Span::styled(player.kind.get_name(), value(Color::Magenta)),
        ];
        if let Some(boss) = &session.boss {
            spans.push(Span::styled("  Boss: ", label));
            spans.push(Span::styled(boss_health_label(boss), value(ORANGE)));
        }
        if player.invincible {
            spans.push(Span::styled("  INVINCIBLE!", value(Color::Yellow)));
        }
        spans.push(Span::styled("  FPS: ", label));
        spans.push(Span::styled(view.fps.to_string(), value(Color::White)));

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[Arrows/WASD: Move] [Space: Shoot] [1/2/3: Default/Fast/Tank] [R: Restart] [Q: Quit]",
            label,
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Overlays the game over banner on top of the frozen field
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let session = view.session;

        let text = vec![
            Line::from(""),
            Line::from("GAME OVER").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", session.score()))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("High Score: {}", session.high_score))
                .centered()
                .cyan(),
            Line::from(format!("Level Reached: {}", session.level))
                .centered()
                .cyan(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        let width = 34.min(area.width);
        let height = 11.min(area.height);
        let banner = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, banner);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            banner,
        );
    }
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn boss_health_label(boss: &Boss) -> String {
    format!("{}/{}", boss.health, boss.max_health)
}

/// Maps playfield coordinates onto terminal cells inside `area`.
fn project(area: Rect, field: &Playfield, x: f32, y: f32) -> (f32, f32) {
    (
        x / field.width * area.width as f32,
        y / field.height * area.height as f32,
    )
}

/// Paints every cell covered by `bbox`, at least one cell per entity.
fn fill(buffer: &mut Buffer, area: Rect, field: &Playfield, bbox: Aabb, symbol: &str, style: Style) {
    let (left, top) = project(area, field, bbox.x, bbox.y);
    let (right, bottom) = project(area, field, bbox.right(), bbox.bottom());

    let x0 = left.floor() as i32;
    let y0 = top.floor() as i32;
    let x1 = (right.ceil() as i32).max(x0 + 1).min(area.width as i32);
    let y1 = (bottom.ceil() as i32).max(y0 + 1).min(area.height as i32);

    for row in y0.max(0)..y1 {
        for col in x0.max(0)..x1 {
            buffer.set_string(area.x + col as u16, area.y + row as u16, symbol, style);
        }
    }
}

fn point(buffer: &mut Buffer, area: Rect, field: &Playfield, x: f32, y: f32, symbol: &str, style: Style) {
    let (col, row) = project(area, field, x, y);
    if col < 0.0 || row < 0.0 {
        return;
    }
    let (col, row) = (col as u16, row as u16);
    if col < area.width && row < area.height {
        buffer.set_string(area.x + col, area.y + row, symbol, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_health_label() {
        let config = crate::config::GameConfig::default();
        let mut boss = Boss::new(&config, 2);
        assert_eq!(boss_health_label(&boss), "300/300");
        boss.take_damage(10);
        assert_eq!(boss_health_label(&boss), "290/300");
    }

    #[test]
    fn test_project_scales_to_area() {
        let area = Rect::new(0, 0, 80, 30);
        let field = Playfield::new(800.0, 600.0);
        assert_eq!(project(area, &field, 400.0, 300.0), (40.0, 15.0));
        assert_eq!(project(area, &field, 0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_fill_clips_to_area() {
        let area = Rect::new(0, 0, 10, 10);
        let field = Playfield::new(100.0, 100.0);
        let mut buffer = Buffer::empty(area);
        fill(&mut buffer, area, &field, Aabb::new(95.0, -20.0, 40.0, 30.0), "#", Style::default());
        assert_eq!(buffer[(9, 0)].symbol(), "#");
        assert_eq!(buffer[(8, 0)].symbol(), " ");
    }

    #[test]
    fn test_point_outside_is_skipped() {
        let area = Rect::new(0, 0, 10, 10);
        let field = Playfield::new(100.0, 100.0);
        let mut buffer = Buffer::empty(area);
        point(&mut buffer, area, &field, 150.0, 5.0, "*", Style::default());
        point(&mut buffer, area, &field, -1.0, 5.0, "*", Style::default());
        point(&mut buffer, area, &field, 55.0, 5.0, "*", Style::default());
        assert_eq!(buffer[(5, 0)].symbol(), "*");
    }
}
