//! High score leaderboard
//!
//! Persisted as a flat text file, one `name:score` line per player, sorted by
//! score descending. Each player keeps only their latest final score.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Entries offered for display
pub const DISPLAY_LIMIT: usize = 12;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

/// Player name to score, kept sorted by score descending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name:score` lines. Malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut board = Self::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            // Names may contain ':'; the score is after the last one
            let parsed = line
                .rsplit_once(':')
                .and_then(|(name, score)| Some((name.trim(), score.trim().parse::<u64>().ok()?)))
                .filter(|(name, _)| !name.is_empty());
            match parsed {
                Some((name, score)) => board.record(name, score),
                None => log::warn!("Skipping malformed leaderboard line {}: '{}'", i + 1, line),
            }
        }
        board
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}:{}\n", e.name, e.score))
            .collect()
    }

    /// Insert or overwrite a player's score, then re-sort.
    /// Equal scores keep their previous relative order.
    pub fn record(&mut self, name: &str, score: u64) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.score = score,
            None => self.entries.push(LeaderboardEntry {
                name: name.to_string(),
                score,
            }),
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Highest `n` entries
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// 1-based rank of a player, if listed
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }

    pub fn score_of(&self, name: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Load from disk. A missing file is an empty leaderboard.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let board = Self::parse(&text);
                log::info!("Loaded {} leaderboard entries", board.len());
                Ok(board)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No leaderboard at {}, starting fresh", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the whole file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        log::info!("Leaderboard saved ({} entries)", self.len());
        Ok(())
    }

    /// Read, record one final score, write back
    pub fn update_file(path: &Path, name: &str, score: u64) -> Result<Self> {
        let mut board = Self::load(path)?;
        board.record(name, score);
        board.save(path)?;
        Ok(board)
    }
}
