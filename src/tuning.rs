//! Data-driven game balance
//!
//! Speeds, collision insets and escalation periods. The inset values are
//! hand-tuned per entity pair so hits feel fair against the sprite art; they
//! carry no physical meaning and may be changed freely.

use serde::{Deserialize, Serialize};

use crate::sim::Inset;

/// Collision insets, one per entity pair.
///
/// Each inset shrinks the named operand before the overlap test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionInsets {
    /// Applied to the alien when the cannon touches the formation
    pub cannon_alien: Inset,
    /// Applied to the alien when the laser reaches it
    pub laser_alien: Inset,
    /// Applied to the bunker when the laser reaches it
    pub laser_bunker: Inset,
    /// Applied to the cannon when an enemy projectile reaches it
    pub projectile_cannon: Inset,
    /// Applied to the bunker when an enemy projectile reaches it
    pub projectile_bunker: Inset,
}

impl Default for CollisionInsets {
    fn default() -> Self {
        Self {
            cannon_alien: Inset::uniform(20.0),
            laser_alien: Inset::new(7.0, 0.0, 7.0, 15.0),
            laser_bunker: Inset::ZERO,
            projectile_cannon: Inset::new(5.0, 15.0, 5.0, 0.0),
            projectile_bunker: Inset::ZERO,
        }
    }
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Cannon horizontal step per tick (pixels)
    pub cannon_speed: f32,
    /// Laser upward step per tick (pixels)
    pub laser_speed: f32,
    /// Enemy projectile step per tick at round 0
    pub projectile_base_speed: u32,
    /// Formation horizontal step per tick at round 0
    pub alien_base_speed: u32,
    /// Every Nth round adds one enemy projectile slot
    pub extra_projectile_every: u32,
    /// Every Nth round speeds up enemy projectiles by 1
    pub projectile_speedup_every: u32,
    /// Every Nth round speeds up the formation by 1
    pub alien_speedup_every: u32,
    pub insets: CollisionInsets,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cannon_speed: 5.0,
            laser_speed: 12.0,
            projectile_base_speed: 4,
            alien_base_speed: 1,
            extra_projectile_every: 3,
            projectile_speedup_every: 5,
            alien_speedup_every: 7,
            insets: CollisionInsets::default(),
        }
    }
}

impl Tuning {
    /// Whether `round` is a multiple of `period` (period 0 disables the rule)
    pub fn hits_period(round: u32, period: u32) -> bool {
        period != 0 && round != 0 && round % period == 0
    }

    /// Number of times a period rule has fired by `round` (inclusive)
    pub fn periods_elapsed(round: u32, period: u32) -> u32 {
        if period == 0 { 0 } else { round / period }
    }
}
