//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically. Input arrives as
//! `Command`s that only toggle flags; the next tick consumes them.

use serde::{Deserialize, Serialize};

use super::collision::{advance_laser, advance_projectiles, check_invasion, launch_laser};
use super::snapshot::{Snapshot, build_snapshot};
use super::state::{GamePhase, Session};

/// Input commands from the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    StartMoveLeft,
    StopMoveLeft,
    StartMoveRight,
    StopMoveRight,
    /// Edge-triggered; ignored while a laser is in flight
    Fire,
    Pause,
    Resume,
    /// Cheat: every bunker back at maximum strength
    ResetBunkers,
    /// Cheat: the laser survives hits
    EnablePassingLaser,
    /// Cheat: one more life, capped
    IncreaseLife,
}

impl Session {
    /// Apply one input command. Returns false when the command was ignored.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        let playing = self.phase == GamePhase::Playing;

        match command {
            Command::StartMoveLeft if playing => self.controls.moving_left = true,
            Command::StartMoveRight if playing => self.controls.moving_right = true,
            Command::StopMoveLeft => self.controls.moving_left = false,
            Command::StopMoveRight => self.controls.moving_right = false,
            Command::Fire if playing && !self.laser.is_active() => {
                self.controls.fire_requested = true;
            }
            Command::Pause if playing => {
                self.phase = GamePhase::Paused;
                self.controls = Default::default();
                log::info!("Paused at tick {}", self.time_ticks);
            }
            Command::Resume if self.phase == GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                log::info!("Resumed at tick {}", self.time_ticks);
            }
            Command::ResetBunkers => self.reset_bunkers(),
            Command::EnablePassingLaser => self.enable_passing_laser(),
            Command::IncreaseLife => return self.increase_life(),
            _ => return false,
        }
        true
    }
}

/// Advance the session by one fixed timestep and return the frame to draw
pub fn tick(session: &mut Session) -> Snapshot {
    if session.phase != GamePhase::Playing {
        let events = session.drain_events();
        return build_snapshot(session, events);
    }

    if std::mem::take(&mut session.controls.fire_requested) {
        launch_laser(session);
    }

    session.formation.step();
    advance_laser(session);
    advance_projectiles(session);

    // Both directions held cancel out
    let mut dx = 0.0;
    if session.controls.moving_left {
        dx -= session.tuning.cannon_speed;
    }
    if session.controls.moving_right {
        dx += session.tuning.cannon_speed;
    }
    if dx != 0.0 {
        session.cannon.slide(dx);
    }

    check_invasion(session);
    session.check_progression();
    session.time_ticks += 1;

    let events = session.drain_events();
    build_snapshot(session, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Difficulty, GameEvent, KeyBinding};

    fn session(seed: u64) -> Session {
        Session::new("tick", Difficulty::Beginner, KeyBinding::default(), seed)
    }

    #[test]
    fn test_tick_pause() {
        let mut session = session(12345);
        tick(&mut session);
        assert!(session.apply(Command::Pause));
        assert_eq!(session.phase, GamePhase::Paused);

        let before = session.snapshot();
        let snap = tick(&mut session);
        assert_eq!(snap.tick, before.tick);
        assert_eq!(snap.aliens, before.aliens);

        // Resume only from paused
        assert!(session.apply(Command::Resume));
        assert!(!session.apply(Command::Resume));
        assert_eq!(tick(&mut session).tick, before.tick + 1);
    }

    #[test]
    fn test_pause_clears_movement() {
        let mut session = session(1);
        session.apply(Command::StartMoveLeft);
        session.apply(Command::Fire);
        session.apply(Command::Pause);
        assert!(!session.controls.moving_left);
        assert!(!session.controls.fire_requested);
        // Held keys are not picked up while paused
        assert!(!session.apply(Command::StartMoveRight));
        session.apply(Command::Resume);
        let x = session.cannon.rect().center().x;
        tick(&mut session);
        assert_eq!(session.cannon.rect().center().x, x);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and input produce identical frames
        let mut a = session(99999);
        let mut b = session(99999);
        for i in 0..600 {
            let command = match i % 40 {
                0 => Some(Command::StartMoveLeft),
                10 => Some(Command::StopMoveLeft),
                20 => Some(Command::StartMoveRight),
                30 => Some(Command::StopMoveRight),
                _ if i % 7 == 0 => Some(Command::Fire),
                _ => None,
            };
            if let Some(command) = command {
                a.apply(command);
                b.apply(command);
            }
            assert_eq!(tick(&mut a), tick(&mut b));
        }
    }

    #[test]
    fn test_cannon_stops_at_left_wall() {
        let mut session = session(5);
        session.cannon.slide(-1000.0);
        assert_eq!(session.cannon.rect().left(), CANNON_WALL_MARGIN);
        session.apply(Command::StartMoveLeft);
        let snap = tick(&mut session);
        assert_eq!(snap.cannon.rect.left(), CANNON_WALL_MARGIN);
    }

    #[test]
    fn test_opposite_moves_cancel() {
        let mut session = session(5);
        session.apply(Command::StartMoveLeft);
        session.apply(Command::StartMoveRight);
        let snap = tick(&mut session);
        assert_eq!(snap.cannon.rect.center().x, CANNON_START_X);
        session.apply(Command::StopMoveLeft);
        let snap = tick(&mut session);
        assert_eq!(snap.cannon.rect.center().x, CANNON_START_X + session.tuning.cannon_speed);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut session = session(5);
        assert!(session.apply(Command::Fire));
        let snap = tick(&mut session);
        assert!(snap.laser.active);
        let first = snap.laser.rect;
        // Second fire while in flight is rejected
        assert!(!session.apply(Command::Fire));
        let snap = tick(&mut session);
        assert!(snap.laser.active);
        assert_eq!(snap.laser.rect.top(), first.top() - session.tuning.laser_speed);
    }

    #[test]
    fn test_cheats_ignored_after_game_over() {
        let mut session = session(5);
        session.cannon.lives = 0;
        let snap = tick(&mut session);
        assert_eq!(snap.phase, GamePhase::GameOver);
        assert!(snap.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert!(!session.apply(Command::ResetBunkers));
        assert!(!session.apply(Command::Resume));
        assert!(!session.apply(Command::IncreaseLife));
        let after = tick(&mut session);
        assert_eq!(after.tick, snap.tick);
    }

    #[test]
    fn test_round_clear_at_end_of_tick() {
        let mut session = session(5);
        for row in 0..2 {
            for col in 0..8 {
                session.formation.destroy(row, col);
            }
        }
        let snap = tick(&mut session);
        assert_eq!(snap.round, 1);
        assert_eq!(snap.visible_aliens().count(), 16);
        assert!(snap.events.iter().any(|e| matches!(e, GameEvent::RoundCleared { round: 1, .. })));
    }
}
