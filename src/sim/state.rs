//! Session state and entity types
//!
//! Everything the simulation mutates lives in `Session`. Entities are plain
//! data; the renderer only ever sees them through a `Snapshot`.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::formation::Formation;
use super::progression::Escalation;
use super::rect::{Inset, Rect};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation
    Playing,
    /// Ticks are no-ops until resumed
    Paused,
    /// Lives exhausted; terminal
    GameOver,
}

/// Difficulty level, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "beginner" => Some(Difficulty::Beginner),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// Alien rows in the formation
    pub fn alien_rows(&self) -> usize {
        match self {
            Difficulty::Beginner => 2,
            Difficulty::Advanced => 4,
        }
    }

    /// Total alien cells in the formation
    pub fn alien_count(&self) -> usize {
        self.alien_rows() * ALIEN_COLS
    }

    /// Enemy projectile slots at round 0
    pub fn projectile_slots(&self) -> usize {
        match self {
            Difficulty::Beginner => 2,
            Difficulty::Advanced => 4,
        }
    }

    /// Starting strength of each bunker
    pub fn bunker_strength(&self) -> u32 {
        match self {
            Difficulty::Beginner => 40,
            Difficulty::Advanced => 30,
        }
    }
}

/// Left / right / fire key symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub left: String,
    pub right: String,
    pub fire: String,
}

impl Default for KeyBinding {
    fn default() -> Self {
        Self::arrows()
    }
}

impl KeyBinding {
    pub fn new(left: impl Into<String>, right: impl Into<String>, fire: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            fire: fire.into(),
        }
    }

    /// Arrow keys to move, space to fire
    pub fn arrows() -> Self {
        Self::new("Left", "Right", "space")
    }

    /// A/D to move, space to fire
    pub fn wasd_space() -> Self {
        Self::new("a", "d", "space")
    }

    /// A/D to move, W to fire
    pub fn wasd_w() -> Self {
        Self::new("a", "d", "w")
    }

    /// Parse an underscore-joined triple such as `a_d_space`
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('_');
        let left = parts.next().filter(|p| !p.is_empty())?;
        let right = parts.next().filter(|p| !p.is_empty())?;
        let fire = parts.next().filter(|p| !p.is_empty())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(left, right, fire))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.left, self.right, self.fire)
    }
}

/// Notable things that happened during a tick, for sound and flash effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AlienDestroyed { row: usize, col: usize },
    /// Score reached a multiple of 1000
    ScoreMilestone { score: u64 },
    BunkerDestroyed { index: usize },
    /// Cannon was shot and re-centred
    CannonHit { lives_left: u8 },
    /// Formation reached the cannon
    Invaded,
    RoundCleared { round: u32, escalation: Escalation },
    GameOver { score: u64, round: u32 },
}

/// A positionable rectangle that can be shown or hidden
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub center: Vec2,
    pub size: Vec2,
    pub visible: bool,
}

impl Sprite {
    pub fn new(center: Vec2, size: Vec2, visible: bool) -> Self {
        Self {
            center,
            size,
            visible,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, self.size)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Place the sprite so its bounds equal `rect`
    pub fn place(&mut self, rect: Rect) {
        self.center = rect.center();
        self.size = rect.size();
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// The player's cannon
#[derive(Debug, Clone)]
pub struct Cannon {
    pub sprite: Sprite,
    pub lives: u8,
}

impl Default for Cannon {
    fn default() -> Self {
        Self {
            sprite: Sprite::new(Self::start_position(), Vec2::splat(CANNON_SIZE), true),
            lives: MAX_LIVES,
        }
    }
}

impl Cannon {
    pub fn start_position() -> Vec2 {
        Vec2::new(CANNON_START_X, CANNON_START_Y)
    }

    pub fn rect(&self) -> Rect {
        self.sprite.rect()
    }

    /// Where the laser appears when fired
    pub fn muzzle(&self) -> Rect {
        self.rect().inset(Inset::symmetric(MUZZLE_INSET_X, MUZZLE_INSET_Y))
    }

    pub fn recenter(&mut self) {
        self.sprite.center = Self::start_position();
    }

    /// Move horizontally by `dx`, clamped to the wall margins
    pub fn slide(&mut self, dx: f32) {
        let half = self.sprite.size.x / 2.0;
        let min_x = CANNON_WALL_MARGIN + half;
        let max_x = FIELD_WIDTH - CANNON_WALL_MARGIN - half;
        let target = self.sprite.center.x + dx;
        // A restored cannon may already sit outside the margins; never push it further out
        self.sprite.center.x = if dx < 0.0 {
            target.max(min_x).min(self.sprite.center.x)
        } else {
            target.min(max_x).max(self.sprite.center.x)
        };
    }
}

/// The player's single shot
#[derive(Debug, Clone)]
pub struct Laser {
    pub sprite: Sprite,
    /// Bunker already damaged by this shot; a passing laser wears each
    /// bunker down once
    pub(crate) bunker_hit: Option<usize>,
}

impl Default for Laser {
    fn default() -> Self {
        Self {
            sprite: Sprite::new(Vec2::ZERO, Vec2::ZERO, false),
            bunker_hit: None,
        }
    }
}

impl Laser {
    pub fn is_active(&self) -> bool {
        self.sprite.visible
    }

    pub fn rect(&self) -> Rect {
        self.sprite.rect()
    }

    pub fn launch(&mut self, muzzle: Rect) {
        self.sprite.place(muzzle);
        self.sprite.show();
        self.bunker_hit = None;
    }

    pub fn deactivate(&mut self) {
        self.sprite.hide();
    }
}

/// Destructible cover
#[derive(Debug, Clone)]
pub struct Bunker {
    pub rect: Rect,
    pub strength: u32,
}

impl Bunker {
    /// Bunker `index` (0-based, left to right) at full `strength`
    pub fn new(index: usize, strength: u32) -> Self {
        let x0 = BUNKER_FIRST_X + BUNKER_SPACING * index as f32;
        Self {
            rect: Rect::new(x0, BUNKER_TOP, x0 + BUNKER_WIDTH, BUNKER_TOP + BUNKER_HEIGHT),
            strength,
        }
    }

    /// The fixed row of bunkers
    pub fn row(strength: u32) -> Vec<Bunker> {
        (0..BUNKER_COUNT).map(|i| Bunker::new(i, strength)).collect()
    }

    /// Standing bunkers take part in collisions
    pub fn is_standing(&self) -> bool {
        self.strength > 0
    }

    /// Absorb one hit. Returns true if this hit destroyed the bunker.
    pub fn hit(&mut self) -> bool {
        if self.strength == 0 {
            return false;
        }
        self.strength -= 1;
        self.strength == 0
    }
}

/// An enemy projectile slot; hidden slots are free to be re-fired
#[derive(Debug, Clone)]
pub struct Projectile {
    pub sprite: Sprite,
    pub speed: u32,
}

impl Projectile {
    pub fn idle(speed: u32) -> Self {
        Self {
            sprite: Sprite::new(Vec2::ZERO, Vec2::ZERO, false),
            speed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.sprite.visible
    }

    pub fn rect(&self) -> Rect {
        self.sprite.rect()
    }
}

/// Held-key flags, last write wins; consumed by the next tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub moving_left: bool,
    pub moving_right: bool,
    pub fire_requested: bool,
}

/// One player's game: the aggregate root of all simulation state
#[derive(Debug, Clone)]
pub struct Session {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub keys: KeyBinding,
    /// Rounds cleared so far
    pub round: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub cannon: Cannon,
    pub laser: Laser,
    pub bunkers: Vec<Bunker>,
    pub formation: Formation,
    /// Enemy projectile pool; its length is the in-flight cap
    pub projectiles: Vec<Projectile>,
    /// Speed given to every projectile slot
    pub projectile_speed: u32,
    /// Cheat: the laser survives hits
    pub passing_laser: bool,
    pub controls: Controls,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Start a fresh game at round 0
    pub fn new(player_name: impl Into<String>, difficulty: Difficulty, keys: KeyBinding, seed: u64) -> Self {
        Self::with_tuning(player_name, difficulty, keys, seed, Tuning::default())
    }

    pub fn with_tuning(
        player_name: impl Into<String>,
        difficulty: Difficulty,
        keys: KeyBinding,
        seed: u64,
        tuning: Tuning,
    ) -> Self {
        let player_name = player_name.into();
        let projectile_speed = tuning.projectile_base_speed;
        let session = Self {
            difficulty,
            keys,
            round: 0,
            score: 0,
            phase: GamePhase::Playing,
            cannon: Cannon::default(),
            laser: Laser::default(),
            bunkers: Bunker::row(difficulty.bunker_strength()),
            formation: Formation::new(difficulty.alien_rows(), ALIEN_COLS, tuning.alien_base_speed),
            projectiles: (0..difficulty.projectile_slots())
                .map(|_| Projectile::idle(projectile_speed))
                .collect(),
            projectile_speed,
            passing_laser: false,
            controls: Controls::default(),
            time_ticks: 0,
            tuning,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            player_name,
        };
        log::info!(
            "New session for '{}' ({}, seed {})",
            session.player_name,
            difficulty.as_str(),
            seed
        );
        session
    }

    pub fn lives(&self) -> u8 {
        self.cannon.lives
    }

    /// Maximum enemy projectiles in flight at once
    pub fn max_projectiles(&self) -> usize {
        self.projectiles.len()
    }

    /// Aliens destroyed in the current round
    pub fn kills_this_round(&self) -> usize {
        self.formation.cell_count() - self.formation.alive()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
