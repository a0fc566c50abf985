use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::game::GameEvent;

type Sound = Buffered<Decoder<BufReader<File>>>;

pub const ASSETS_DIR: &str = "assets";

/// Plays sound effects in response to game events.
///
/// Every piece is optional: a missing output device or asset file silences
/// that sound and nothing else.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    crash_sound: Option<Sound>,
    powerup_sound: Option<Sound>,
    background: Option<Sink>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads the sounds in `assets_dir`
    pub fn new(assets_dir: impl AsRef<Path>) -> Self {
        let assets_dir = assets_dir.as_ref();
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("Failed to open audio output, continuing without sound: {}", err);
                None
            }
        };

        let mut audio = Self {
            output,
            crash_sound: None,
            powerup_sound: None,
            background: None,
        };
        if audio.output.is_none() {
            return audio;
        }

        audio.crash_sound = load_sound(&assets_dir.join("crash.wav"));
        audio.powerup_sound = load_sound(&assets_dir.join("powerup.wav"));
        if let Some(music) = load_sound(&assets_dir.join("background.wav")) {
            audio.start_background(music);
        }
        audio
    }

    /// An audio manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            output: None,
            crash_sound: None,
            powerup_sound: None,
            background: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn handle_event(&self, event: &GameEvent) {
        match event {
            GameEvent::Crash => self.play(self.crash_sound.as_ref(), 0.6),
            GameEvent::PowerUpCollected(_) => self.play(self.powerup_sound.as_ref(), 0.6),
            _ => {}
        }
    }

    fn play(&self, sound: Option<&Sound>, volume: f32) {
        let (Some((_, handle)), Some(sound)) = (&self.output, sound) else {
            return;
        };
        // Playback errors are not worth interrupting the game for
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            sink.append(sound.clone());
            sink.detach();
        }
    }

    fn start_background(&mut self, music: Sound) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.set_volume(0.3);
                sink.append(music.repeat_infinite());
                self.background = Some(sink);
            }
            Err(err) => log::warn!("Failed to start background music: {}", err),
        }
    }
}

fn load_sound(path: &Path) -> Option<Sound> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Sound {} unavailable: {}", path.display(), err);
            return None;
        }
    };
    match Decoder::new(BufReader::new(file)) {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            log::warn!("Sound {} could not be decoded: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PowerUpKind;

    #[test]
    fn test_silent_manager_ignores_events() {
        let audio = AudioManager::silent();
        assert!(!audio.is_enabled());
        audio.handle_event(&GameEvent::Crash);
        audio.handle_event(&GameEvent::PowerUpCollected(PowerUpKind::Speed));
    }

    #[test]
    fn test_missing_sound_file() {
        assert!(load_sound(Path::new("definitely/not/here.wav")).is_none());
    }
}
