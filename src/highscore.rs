//! Persisted best score, stored as a tiny JSON record.

use color_eyre::{Result, eyre::WrapErr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.json";

/// On-disk shape: `{"high_score": <integer>}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub high_score: u64,
}

/// Reads and writes the high score file
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored high score, falling back to 0 if the file is missing
    /// or unreadable.
    pub fn load(&self) -> u64 {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) => {
                log::debug!("No high score at {}: {}", self.path.display(), err);
                return 0;
            }
        };

        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded high score {}", record.high_score);
                record.high_score
            }
            Err(err) => {
                log::warn!("Ignoring malformed high score file {}: {}", self.path.display(), err);
                0
            }
        }
    }

    pub fn save(&self, high_score: u64) -> Result<()> {
        let json = serde_json::to_string(&HighScoreRecord { high_score })
            .wrap_err("failed to encode high score")?;
        fs::write(&self.path, json)
            .wrap_err_with(|| format!("failed to write {}", self.path.display()))?;
        log::info!("High score {} saved", high_score);
        Ok(())
    }
}
