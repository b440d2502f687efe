//! Read-only view of a session, produced at the end of every tick.
//!
//! Building a snapshot never mutates the session; the tick hands over the
//! events it drained separately.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{GameEvent, GamePhase, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannonView {
    pub rect: Rect,
    pub lives: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserView {
    pub rect: Rect,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlienView {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BunkerView {
    pub rect: Rect,
    pub strength: u32,
}

/// Everything a renderer needs to redraw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub round: u32,
    pub score: u64,
    pub cannon: CannonView,
    pub laser: LaserView,
    /// Every grid cell, row-major, hidden ones included
    pub aliens: Vec<AlienView>,
    pub bunkers: Vec<BunkerView>,
    /// Enemy projectiles currently in flight
    pub projectiles: Vec<Rect>,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    /// Live aliens in the view
    pub fn visible_aliens(&self) -> impl Iterator<Item = &AlienView> {
        self.aliens.iter().filter(|a| a.visible)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Build a snapshot of `session` carrying `events`
pub fn build_snapshot(session: &Session, events: Vec<GameEvent>) -> Snapshot {
    Snapshot {
        tick: session.time_ticks,
        phase: session.phase,
        round: session.round,
        score: session.score,
        cannon: CannonView {
            rect: session.cannon.rect(),
            lives: session.cannon.lives,
        },
        laser: LaserView {
            rect: session.laser.rect(),
            active: session.laser.is_active(),
        },
        aliens: session
            .formation
            .cells()
            .iter()
            .map(|a| AlienView {
                row: a.row,
                col: a.col,
                rect: a.rect(),
                visible: a.is_visible(),
            })
            .collect(),
        bunkers: session
            .bunkers
            .iter()
            .map(|b| BunkerView {
                rect: b.rect,
                strength: b.strength,
            })
            .collect(),
        projectiles: session
            .projectiles
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.rect())
            .collect(),
        events,
    }
}

impl Session {
    /// Snapshot without events; pending events stay queued
    pub fn snapshot(&self) -> Snapshot {
        build_snapshot(self, Vec::new())
    }
}
