use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::game::{GameEvent, Session};
use crate::highscore::HighScoreStore;
use crate::input::InputManager;
use crate::renderer::{GameRenderer, RenderView};

/// The terminal shell around a [`Session`]: polls input, ticks the
/// simulation at a fixed rate, forwards events and draws.
pub struct App {
    session: Session,
    frame_duration: Duration,
    last_frame_time: Instant,
    fps: u32,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
    high_scores: HighScoreStore,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        config: GameConfig,
        high_scores: HighScoreStore,
        audio_manager: AudioManager,
        reports_key_release: bool,
    ) -> Self {
        let high_score = high_scores.load();
        let frame_duration = Duration::from_secs_f64(1.0 / config.tick_rate.max(1) as f64);
        Self {
            session: Session::new(config, high_score),
            frame_duration,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(reports_key_release),
            renderer: GameRenderer::new(),
            audio_manager,
            high_scores,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        log::info!(
            "Starting at {} ticks/s, high score {}",
            self.session.config.tick_rate,
            self.session.high_score
        );
        loop {
            let frame_start = Instant::now();
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            self.input_manager.poll_events()?;
            if self.input_manager.quit_requested() {
                break;
            }

            let input = self.input_manager.snapshot();
            let events = self.session.tick(&input);
            self.handle_events(&events);

            terminal.draw(|frame| {
                let view = RenderView {
                    session: &self.session,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Sleep off the rest of the frame to hold the tick rate
            if let Some(remaining) = self.frame_duration.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        log::info!("Exiting with high score {}", self.session.high_score);
        Ok(())
    }

    fn handle_events(&self, events: &[GameEvent]) {
        for event in events {
            self.audio_manager.handle_event(event);
            if let GameEvent::NewHighScore(score) = event
                && let Err(err) = self.high_scores.save(*score)
            {
                log::warn!("Could not persist high score {}: {:#}", score, err);
            }
        }
    }
}
