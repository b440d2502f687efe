//! Crate-wide error type

use thiserror::Error;

/// Errors surfaced at the engine boundary (save files, settings, storage).
///
/// Collision and formation logic never fails; only I/O and decoding do.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or truncated save record. No live session is touched.
    #[error("invalid save record at line {line}: {reason}")]
    InvalidSaveRecord { line: usize, reason: String },

    /// A save file already exists for a new game's player name.
    #[error("a saved game already exists for player '{0}'")]
    DuplicatePlayerName(String),

    /// Blank names, or names that cannot be used as a file stem.
    #[error("invalid player name '{0}'")]
    InvalidPlayerName(String),

    #[error("no saved game for player '{0}'")]
    SaveNotFound(String),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn save_record(line: usize, reason: impl Into<String>) -> Self {
        Error::InvalidSaveRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
