//! One save file per player under a data directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::save_record::SaveRecord;
use crate::error::{Error, Result};
use crate::sim::Session;

const SAVE_EXTENSION: &str = "txt";

/// Save files live at `<dir>/<player>.txt`
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
    /// File in the same directory that is never treated as a save
    leaderboard_file: String,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>, leaderboard_file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            leaderboard_file: leaderboard_file.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reject names that are blank or cannot be a plain file stem
    pub fn validate_name(&self, name: &str) -> Result<()> {
        let trimmed = name.trim();
        let reserved = Path::new(&self.leaderboard_file)
            .file_stem()
            .is_some_and(|stem| stem == trimmed);
        if trimmed.is_empty()
            || trimmed != name
            || trimmed.starts_with('.')
            || trimmed.contains(['/', '\\'])
            || trimmed.contains(char::is_control)
            || reserved
        {
            return Err(Error::InvalidPlayerName(name.to_string()));
        }
        Ok(())
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        self.validate_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, SAVE_EXTENSION)))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|p| p.is_file())
    }

    /// Check a name before starting a new game with it
    pub fn ensure_available(&self, name: &str) -> Result<()> {
        if self.path_for(name)?.is_file() {
            return Err(Error::DuplicatePlayerName(name.to_string()));
        }
        Ok(())
    }

    /// Write the session's save record, replacing any previous one
    pub fn save(&self, session: &Session) -> Result<PathBuf> {
        let path = self.path_for(&session.player_name)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension(format!("{}.tmp", SAVE_EXTENSION));
        fs::write(&tmp, SaveRecord::from_session(session).encode())?;
        fs::rename(&tmp, &path)?;

        log::info!("Saved '{}' to {}", session.player_name, path.display());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<SaveRecord> {
        let path = self.path_for(name)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::SaveNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let record = SaveRecord::decode(&text)?;
        log::info!("Loaded save for '{}' from {}", name, path.display());
        Ok(record)
    }

    /// Remove a player's save. Returns false if there was none.
    pub fn discard(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Discarded save for '{}'", name);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Player names with a save file, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != SAVE_EXTENSION) {
                continue;
            }
            if path.file_name().is_some_and(|f| f == self.leaderboard_file.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
