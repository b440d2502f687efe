//! Alien Invasion - a fixed-tick arcade shooter engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (formation, combat, progression)
//! - `persistence`: Save-record codec and per-player save files
//! - `highscores`: Flat-file leaderboard
//! - `platform`: Keyboard-to-command mapping
//! - `runner`: Fixed-step tick scheduler and game-over bookkeeping
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::Leaderboard;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 750.0;
    pub const FIELD_HEIGHT: f32 = 750.0;

    /// Default fixed tick interval (milliseconds)
    pub const TICK_MS: u64 = 16;
    /// Maximum ticks run per runner update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Cannon defaults
    pub const CANNON_SIZE: f32 = 50.0;
    pub const CANNON_START_X: f32 = FIELD_WIDTH / 2.0;
    pub const CANNON_START_Y: f32 = 650.0;
    /// Closest the cannon may get to either side wall
    pub const CANNON_WALL_MARGIN: f32 = 5.0;
    pub const MAX_LIVES: u8 = 3;

    /// Laser and projectile spawn from the shooter's box shrunk by this much
    pub const MUZZLE_INSET_X: f32 = 23.0;
    pub const MUZZLE_INSET_Y: f32 = 7.0;

    /// Alien grid layout
    pub const ALIEN_SIZE: f32 = 50.0;
    pub const ALIEN_COLS: usize = 8;
    pub const ALIEN_SPACING: f32 = 60.0;
    /// Centre of the alien at row 0, column 0
    pub const ALIEN_ORIGIN_X: f32 = 165.0;
    pub const ALIEN_ORIGIN_Y: f32 = 95.0;
    /// Distance from a side wall that counts as an edge hit
    pub const FORMATION_EDGE_MARGIN: f32 = 15.0;
    /// Vertical drop after a full sweep cycle
    pub const FORMATION_DROP: f32 = 60.0;

    /// Bunker layout
    pub const BUNKER_COUNT: usize = 3;
    pub const BUNKER_WIDTH: f32 = 125.0;
    pub const BUNKER_HEIGHT: f32 = 50.0;
    pub const BUNKER_FIRST_X: f32 = 75.0;
    pub const BUNKER_SPACING: f32 = 242.5;
    pub const BUNKER_TOP: f32 = 500.0;
    /// Strength given to every bunker by the reset-bunkers cheat
    pub const CHEAT_BUNKER_STRENGTH: u32 = 300;

    /// Points for each alien destroyed by the laser
    pub const POINTS_PER_ALIEN: u64 = 100;
    /// Score multiple that triggers a milestone event
    pub const SCORE_MILESTONE: u64 = 1000;
}
