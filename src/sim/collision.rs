//! Combat resolution
//!
//! Moves the player laser and the enemy projectiles, and resolves their hits
//! in priority order: the laser tests bunkers before aliens, projectiles
//! test the bottom wall, then the cannon, then bunkers. Anything that hits
//! is removed in the same tick it first overlaps, so a hit never counts twice.

use glam::Vec2;
use rand::Rng;

use super::rect::Inset;
use super::state::{GameEvent, Session};
use crate::consts::*;

/// Fire the laser from the cannon's muzzle. No-op while a laser is in flight.
pub(crate) fn launch_laser(session: &mut Session) -> bool {
    if session.laser.is_active() {
        return false;
    }
    let muzzle = session.cannon.muzzle();
    session.laser.launch(muzzle);
    true
}

/// Move the laser up one step and resolve what it hits
pub(crate) fn advance_laser(session: &mut Session) {
    if !session.laser.is_active() {
        return;
    }
    let step = session.tuning.laser_speed;
    let insets = session.tuning.insets;
    let passing = session.passing_laser;

    session.laser.sprite.translate(Vec2::new(0.0, -step));
    let laser = session.laser.rect();

    let bunker_hit = session
        .bunkers
        .iter()
        .position(|b| b.is_standing() && laser.intersects(&b.rect.inset(insets.laser_bunker)));
    if let Some(index) = bunker_hit {
        if session.laser.bunker_hit != Some(index) {
            session.laser.bunker_hit = Some(index);
            if session.bunkers[index].hit() {
                session.emit(GameEvent::BunkerDestroyed { index });
            }
        }
        if !passing {
            session.laser.deactivate();
            return;
        }
    }

    let alien_hits: Vec<(usize, usize)> = session
        .formation
        .visible()
        .filter(|a| laser.intersects(&a.rect().inset(insets.laser_alien)))
        .map(|a| (a.row, a.col))
        .collect();
    for (row, col) in alien_hits {
        if session.formation.destroy(row, col) {
            award_kill(session, row, col);
        }
        if !passing {
            session.laser.deactivate();
            return;
        }
    }

    if laser.top() <= 0.0 {
        session.laser.deactivate();
    }
}

fn award_kill(session: &mut Session, row: usize, col: usize) {
    session.score += POINTS_PER_ALIEN;
    session.emit(GameEvent::AlienDestroyed { row, col });
    if session.score % SCORE_MILESTONE == 0 {
        let score = session.score;
        session.emit(GameEvent::ScoreMilestone { score });
    }
}

/// Re-arm idle projectile slots, move active ones, resolve their hits
pub(crate) fn advance_projectiles(session: &mut Session) {
    let insets = session.tuning.insets;

    for slot in 0..session.projectiles.len() {
        if !session.projectiles[slot].is_active() {
            try_spawn(session, slot);
            if !session.projectiles[slot].is_active() {
                continue;
            }
        }

        let projectile = &mut session.projectiles[slot];
        projectile.sprite.translate(Vec2::new(0.0, projectile.speed as f32));
        let rect = projectile.rect();

        if rect.bottom() >= FIELD_HEIGHT {
            projectile.sprite.hide();
            continue;
        }

        if rect.intersects(&session.cannon.rect().inset(insets.projectile_cannon)) {
            projectile.sprite.hide();
            session.lose_life();
            session.cannon.recenter();
            let lives_left = session.cannon.lives;
            log::debug!("Cannon hit, {} lives left", lives_left);
            session.emit(GameEvent::CannonHit { lives_left });
            continue;
        }

        let bunker_hit = session
            .bunkers
            .iter()
            .position(|b| b.is_standing() && rect.intersects(&b.rect.inset(insets.projectile_bunker)));
        if let Some(index) = bunker_hit {
            projectile.sprite.hide();
            if session.bunkers[index].hit() {
                session.emit(GameEvent::BunkerDestroyed { index });
            }
        }
    }
}

/// Pick one random grid cell; fire from it only if that alien is alive.
/// A miss simply skips this slot until the next tick.
fn try_spawn(session: &mut Session, slot: usize) {
    let (rows, cols) = (session.formation.rows(), session.formation.cols());
    if rows == 0 || cols == 0 {
        return;
    }
    let row = session.rng.random_range(0..rows);
    let col = session.rng.random_range(0..cols);
    let Some(alien) = session.formation.get(row, col).filter(|a| a.is_visible()) else {
        return;
    };
    let muzzle = alien
        .rect()
        .inset(Inset::symmetric(MUZZLE_INSET_X, MUZZLE_INSET_Y));
    let projectile = &mut session.projectiles[slot];
    projectile.sprite.place(muzzle);
    projectile.sprite.show();
}

/// The formation reaching the cannon ends the game outright
pub(crate) fn check_invasion(session: &mut Session) {
    let inset = session.tuning.insets.cannon_alien;
    let cannon = session.cannon.rect();
    let invaded = session
        .formation
        .visible()
        .any(|a| cannon.intersects(&a.rect().inset(inset)));
    if invaded && session.cannon.lives > 0 {
        session.cannon.lives = 0;
        log::info!("Formation reached the cannon");
        session.emit(GameEvent::Invaded);
    }
}
