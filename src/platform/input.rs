//! Keyboard mapping
//!
//! Key symbols follow the usual windowing names (`Left`, `space`, `a`,
//! `Escape`); letters are case-sensitive, so `M` and `m` differ.

use std::collections::HashSet;

use crate::sim::{Command, KeyBinding};

/// Held together: rebuild bunkers at maximum strength
const CHORD_RESET_BUNKERS: &[&str] = &["i", "b"];
/// Held together: the laser passes through what it hits
const CHORD_PASSING_LASER: &[&str] = &["M", "L", "P"];
/// Held together: one extra life
const CHORD_EXTRA_LIFE: &[&str] = &["i", "l"];

const MENU_KEY: &str = "m";
/// Boss key: pause instantly
const BOSS_KEYS: &[&str] = &["Escape", "B"];

/// Tracks held keys and maps press/release events to commands
#[derive(Debug, Clone)]
pub struct KeyMapper {
    keys: KeyBinding,
    held: HashSet<String>,
}

impl KeyMapper {
    pub fn new(keys: KeyBinding) -> Self {
        Self {
            keys,
            held: HashSet::new(),
        }
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    fn chord_held(&self, chord: &[&str]) -> bool {
        chord.iter().all(|k| self.held.contains(*k))
    }

    /// A key went down. Cheat chords win over single-key bindings.
    pub fn key_down(&mut self, key: &str) -> Option<Command> {
        self.held.insert(key.to_string());

        if self.chord_held(CHORD_RESET_BUNKERS) {
            Some(Command::ResetBunkers)
        } else if self.chord_held(CHORD_PASSING_LASER) {
            Some(Command::EnablePassingLaser)
        } else if self.chord_held(CHORD_EXTRA_LIFE) {
            Some(Command::IncreaseLife)
        } else if key == self.keys.left {
            Some(Command::StartMoveLeft)
        } else if key == self.keys.right {
            Some(Command::StartMoveRight)
        } else if key == self.keys.fire {
            Some(Command::Fire)
        } else if key == MENU_KEY || BOSS_KEYS.contains(&key) {
            Some(Command::Pause)
        } else {
            None
        }
    }

    pub fn key_up(&mut self, key: &str) -> Option<Command> {
        self.held.remove(key);
        if key == self.keys.left {
            Some(Command::StopMoveLeft)
        } else if key == self.keys.right {
            Some(Command::StopMoveRight)
        } else {
            None
        }
    }

    /// Forget held keys, e.g. after the window loses focus
    pub fn release_all(&mut self) -> Vec<Command> {
        self.held.clear();
        vec![Command::StopMoveLeft, Command::StopMoveRight]
    }
}
