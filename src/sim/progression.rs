//! Round progression, difficulty escalation and the life counter

use serde::{Deserialize, Serialize};

use super::state::{Bunker, GameEvent, GamePhase, Projectile, Session};
use crate::consts::*;
use crate::tuning::Tuning;

/// Escalations applied when a round was cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escalation {
    /// One more enemy projectile slot
    pub extra_projectile: bool,
    /// All enemy projectiles move 1 faster
    pub projectile_speed_up: bool,
    /// The formation moves 1 faster
    pub alien_speed_up: bool,
}

impl Escalation {
    /// Escalations triggered by reaching `round`
    pub fn for_round(round: u32, tuning: &Tuning) -> Self {
        Self {
            extra_projectile: Tuning::hits_period(round, tuning.extra_projectile_every),
            projectile_speed_up: Tuning::hits_period(round, tuning.projectile_speedup_every),
            alien_speed_up: Tuning::hits_period(round, tuning.alien_speedup_every),
        }
    }

    pub fn any(&self) -> bool {
        self.extra_projectile || self.projectile_speed_up || self.alien_speed_up
    }
}

/// Cumulative escalation state after `round` rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationLevel {
    pub projectile_slots: usize,
    pub projectile_speed: u32,
    pub alien_speed: u32,
}

impl EscalationLevel {
    pub fn at_round(round: u32, base_slots: usize, tuning: &Tuning) -> Self {
        Self {
            projectile_slots: base_slots
                + Tuning::periods_elapsed(round, tuning.extra_projectile_every) as usize,
            projectile_speed: tuning.projectile_base_speed
                + Tuning::periods_elapsed(round, tuning.projectile_speedup_every),
            alien_speed: tuning.alien_base_speed
                + Tuning::periods_elapsed(round, tuning.alien_speedup_every),
        }
    }
}

impl Session {
    /// Move to the next round: fresh formation, then apply escalations
    pub fn advance_round(&mut self) -> Escalation {
        self.round += 1;
        self.formation.reset();

        let escalation = Escalation::for_round(self.round, &self.tuning);
        if escalation.extra_projectile {
            self.projectiles.push(Projectile::idle(self.projectile_speed));
        }
        if escalation.projectile_speed_up {
            self.projectile_speed += 1;
            for projectile in &mut self.projectiles {
                projectile.speed += 1;
            }
        }
        if escalation.alien_speed_up {
            self.formation.speed += 1;
        }

        log::info!(
            "Round {} (projectiles {}, projectile speed {}, alien speed {})",
            self.round,
            self.projectiles.len(),
            self.projectile_speed,
            self.formation.speed
        );
        self.emit(GameEvent::RoundCleared {
            round: self.round,
            escalation,
        });
        escalation
    }

    /// Take one life after the cannon is shot
    pub(crate) fn lose_life(&mut self) {
        if self.cannon.lives > 0 {
            self.cannon.lives -= 1;
        }
    }

    /// End-of-tick checks: lives exhausted, then round cleared
    pub(crate) fn check_progression(&mut self) {
        if self.cannon.lives == 0 {
            self.end_game();
        } else if self.formation.is_empty() {
            self.advance_round();
        }
    }

    fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.controls = Default::default();
        log::info!(
            "Game over for '{}': score {}, round {}",
            self.player_name,
            self.score,
            self.round
        );
        self.emit(GameEvent::GameOver {
            score: self.score,
            round: self.round,
        });
    }

    /// Cheat: one extra life, only while alive and below the cap
    pub fn increase_life(&mut self) -> bool {
        if self.cannon.lives > 0 && self.cannon.lives < MAX_LIVES {
            self.cannon.lives += 1;
            true
        } else {
            false
        }
    }

    /// Cheat: rebuild every bunker at maximum strength
    pub fn reset_bunkers(&mut self) {
        self.bunkers = Bunker::row(CHEAT_BUNKER_STRENGTH);
        log::info!("Bunkers reset to {}", CHEAT_BUNKER_STRENGTH);
    }

    /// Cheat: the laser no longer stops on hits
    pub fn enable_passing_laser(&mut self) {
        self.passing_laser = true;
        log::info!("Passing laser enabled");
    }
}
