use crate::entities::{CraftKind, PowerUpKind};

/// Discrete signals raised during a tick for the audio and persistence layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Fired,
    Crash,
    PowerUpCollected(PowerUpKind),
    BossSpawned { level: u32 },
    BossDefeated,
    BossEscaped,
    LevelUp(u32),
    GameOver { score: u64 },
    NewHighScore(u64),
    CraftChanged(CraftKind),
    Restarted,
}
