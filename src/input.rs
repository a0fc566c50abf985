use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::CraftKind;

/// Snapshot of the player's intent for a single tick.
///
/// Movement and fire are "currently held"; restart and craft selection are
/// edge-triggered and only set on the tick the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub restart: bool,
    pub select: Option<CraftKind>,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire: bool,
}

/// Manages input polling and translates raw key events into tick snapshots
pub struct InputManager {
    key_state: KeyState,
    restart: bool,
    select: Option<CraftKind>,
    quit: bool,
    /// Whether the terminal reports key releases. Without them held keys are
    /// cleared after every snapshot and rely on key repeat instead.
    reports_release: bool,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            restart: false,
            select: None,
            quit: false,
            reports_release,
        }
    }

    /// Drains all pending terminal events without blocking.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }
        Ok(())
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Processes a key event and updates held keys and one-shot signals
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event),
            KeyEventKind::Release => self.set_held(key_event.code, false),
            KeyEventKind::Repeat => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            || (key_event.code == KeyCode::Char('c')
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit = true;
            return;
        }

        match key_event.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart = true,
            KeyCode::Char('1') => self.select = Some(CraftKind::Default),
            KeyCode::Char('2') => self.select = Some(CraftKind::Fast),
            KeyCode::Char('3') => self.select = Some(CraftKind::Tank),
            code => self.set_held(code, true),
        }
    }

    fn set_held(&mut self, code: KeyCode, held: bool) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = held;
                if held {
                    self.key_state.down = false;
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = held;
                if held {
                    self.key_state.up = false;
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = held;
                if held {
                    self.key_state.right = false;
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = held;
                if held {
                    self.key_state.left = false;
                }
            }
            KeyCode::Char(' ') => self.key_state.fire = held,
            _ => {}
        }
    }

    /// Returns this tick's input and clears the edge-triggered signals.
    /// Must be called after poll_events()
    pub fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            up: self.key_state.up,
            down: self.key_state.down,
            left: self.key_state.left,
            right: self.key_state.right,
            fire: self.key_state.fire,
            restart: std::mem::take(&mut self.restart),
            select: self.select.take(),
        };
        if !self.reports_release {
            self.key_state = KeyState::default();
        }
        input
    }
}
