use std::io;

use thiserror::Error;

/// No empty cell is left to place a goal on.
///
/// This is a normal end-of-game signal (the board has been filled), not a
/// failure: the session turns it into a win.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no empty cell left on the board")]
pub struct BoardFull;

/// Rejected session parameters.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1 cells, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("initial snake of length {length} does not fit a grid {width} cells wide")]
    SnakeTooLong { length: u16, width: u16 },
    #[error("win score must be at least 1")]
    ZeroWinScore,
    #[error("snake body must contain at least one segment")]
    EmptyBody,
}

/// Failure while persisting the high score.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file could not be encoded: {0}")]
    Format(#[from] serde_json::Error),
}
