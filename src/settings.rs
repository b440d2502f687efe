//! Game settings and preferences
//!
//! Persisted as JSON, separately from game saves. Missing fields fall back
//! to their defaults, so older settings files keep loading.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;
use crate::error::Result;
use crate::persistence::SaveStore;
use crate::sim::{Difficulty, KeyBinding};
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed simulation step (milliseconds)
    pub tick_interval_ms: u64,

    // === Storage ===
    /// Directory holding save files and the leaderboard
    pub data_dir: PathBuf,
    /// Leaderboard file name inside `data_dir`
    pub leaderboard_file: String,

    // === New game defaults ===
    pub difficulty: Difficulty,
    pub keys: KeyBinding,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_MS,
            data_dir: PathBuf::from("."),
            leaderboard_file: "leaderboard.txt".to_string(),
            difficulty: Difficulty::default(),
            keys: KeyBinding::default(),
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Tick interval, never zero
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join(&self.leaderboard_file)
    }

    pub fn save_store(&self) -> SaveStore {
        SaveStore::new(&self.data_dir, &self.leaderboard_file)
    }

    /// The configured seed, or one taken from the clock
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Load settings from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let settings = serde_json::from_str(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
