//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major grid, bunkers left to right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod formation;
pub mod progression;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use formation::{Alien, Formation, FormationStep, Sweep};
pub use progression::{Escalation, EscalationLevel};
pub use rect::{Inset, Rect};
pub use snapshot::{AlienView, BunkerView, CannonView, LaserView, Snapshot, build_snapshot};
pub use state::{
    Bunker, Cannon, Controls, Difficulty, GameEvent, GamePhase, KeyBinding, Laser, Projectile,
    Session, Sprite,
};
pub use tick::{Command, tick};
