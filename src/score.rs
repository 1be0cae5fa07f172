use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScoreError;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Persistent best-score record.
///
/// `load` never fails: a missing or unreadable record counts as 0.
/// `save` never lowers the stored value.
pub trait ScoreStore {
    /// Returns the stored high score, or 0 when there is none.
    fn load(&self) -> u32;

    /// Stores `max(load(), candidate)` and returns the value now stored.
    fn save(&mut self, candidate: u32) -> Result<u32, ScoreError>;
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// High score kept as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the per-user data directory.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match load_high_score_from_path(&self.path) {
            Ok(score) => score,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable score file");
                0
            }
        }
    }

    fn save(&mut self, candidate: u32) -> Result<u32, ScoreError> {
        let best = self.load().max(candidate);
        save_high_score_to_path(&self.path, best)?;
        Ok(best)
    }
}

/// High score held in memory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryScoreStore {
    high_score: u32,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn with_score(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.high_score
    }

    fn save(&mut self, candidate: u32) -> Result<u32, ScoreError> {
        self.high_score = self.high_score.max(candidate);
        Ok(self.high_score)
    }
}

/// Returns `Ok(0)` when the file does not exist yet and `Err` when it exists
/// but holds neither the JSON record nor a bare integer.
fn load_high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    match serde_json::from_str::<ScoreFile>(&raw) {
        Ok(file) => Ok(file.high_score),
        Err(json_error) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, json_error)),
    }
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)?;

    fs::write(path, json)?;
    Ok(())
}
