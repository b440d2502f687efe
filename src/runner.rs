//! Fixed-step game runner
//!
//! Owns a session, turns elapsed wall time into whole ticks, hands every
//! frame to a `Renderer`, and performs the game-over bookkeeping (leaderboard
//! update, save discard) exactly once.

use std::path::PathBuf;
use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;
use crate::error::Result;
use crate::highscores::Leaderboard;
use crate::persistence::SaveStore;
use crate::settings::Settings;
use crate::sim::{Command, Session, Snapshot, tick};

/// Receives one snapshot per tick
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> Renderer for F {
    fn draw(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _snapshot: &Snapshot) {}
}

/// Game instance holding the session and its storage
pub struct Game {
    session: Session,
    store: SaveStore,
    leaderboard_path: PathBuf,
    tick_interval: Duration,
    accumulator: Duration,
    /// Game-over side effects already ran
    finished: bool,
}

impl Game {
    pub fn new(
        session: Session,
        store: SaveStore,
        leaderboard_path: impl Into<PathBuf>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            session,
            store,
            leaderboard_path: leaderboard_path.into(),
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            finished: false,
        }
    }

    pub fn from_settings(session: Session, settings: &Settings) -> Self {
        Self::new(
            session,
            settings.save_store(),
            settings.leaderboard_path(),
            settings.tick_interval(),
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Forward an input command to the session
    pub fn command(&mut self, command: Command) -> bool {
        self.session.apply(command)
    }

    /// Run exactly one tick
    pub fn step(&mut self) -> Result<Snapshot> {
        let snapshot = tick(&mut self.session);
        if snapshot.is_over() {
            self.finish()?;
        }
        Ok(snapshot)
    }

    /// Advance by elapsed wall time. Returns the number of ticks run.
    pub fn update(&mut self, elapsed: Duration, renderer: &mut impl Renderer) -> Result<u32> {
        if self.finished {
            return Ok(0);
        }
        // Cap catch-up to prevent spiral of death
        let max_catch_up = self.tick_interval * MAX_SUBSTEPS;
        self.accumulator = (self.accumulator + elapsed).min(max_catch_up);

        let mut substeps = 0;
        while self.accumulator >= self.tick_interval && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.tick_interval;
            substeps += 1;

            let snapshot = self.step()?;
            renderer.draw(&snapshot);
            if self.finished {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        Ok(substeps)
    }

    /// Run ticks back to back (no wall clock), letting `driver` issue
    /// commands after each frame. Stops at game over or after `max_ticks`.
    pub fn run(
        &mut self,
        renderer: &mut impl Renderer,
        mut driver: impl FnMut(&Snapshot) -> Vec<Command>,
        max_ticks: u64,
    ) -> Result<Snapshot> {
        let mut snapshot = self.session.snapshot();
        for _ in 0..max_ticks {
            if self.finished {
                break;
            }
            for command in driver(&snapshot) {
                self.session.apply(command);
            }
            snapshot = self.step()?;
            renderer.draw(&snapshot);
        }
        Ok(snapshot)
    }

    /// Write the current session to its save file
    pub fn save(&self) -> Result<Option<PathBuf>> {
        if self.session.is_over() {
            return Ok(None);
        }
        self.store.save(&self.session).map(Some)
    }

    pub fn leaderboard(&self) -> Result<Leaderboard> {
        Leaderboard::load(&self.leaderboard_path)
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }

        // Both steps are idempotent; a failure leaves `finished` unset so the
        // next step retries them
        let name = self.session.player_name.clone();
        let board = Leaderboard::update_file(&self.leaderboard_path, &name, self.session.score)?;
        self.store.discard(&name)?;
        self.finished = true;
        log::info!(
            "Final score for '{}': {} (rank {:?})",
            name,
            self.session.score,
            board.rank_of(&name)
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Left,
    Right,
}

/// Demo driver: chases the lowest live alien, leading it by the laser's
/// flight time, and fires when lined up
#[derive(Debug)]
pub struct Autopilot {
    heading: Option<Heading>,
    laser_speed: f32,
    /// Grid cell and centre x of the alien tracked last frame
    last_target: Option<(usize, usize, f32)>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(crate::tuning::Tuning::default().laser_speed)
    }
}

impl Autopilot {
    /// Cannon-to-aim-point distance that counts as lined up
    const AIM_TOLERANCE: f32 = 6.0;

    pub fn new(laser_speed: f32) -> Self {
        Self {
            heading: None,
            laser_speed: laser_speed.max(1.0),
            last_target: None,
        }
    }

    /// Commands for the next tick, given the last frame
    pub fn plan(&mut self, snapshot: &Snapshot) -> Vec<Command> {
        let mut commands = Vec::new();
        if snapshot.is_over() {
            return commands;
        }

        // Lowest alien first, leftmost on ties
        let target = snapshot.visible_aliens().max_by(|a, b| {
            a.rect
                .bottom()
                .total_cmp(&b.rect.bottom())
                .then(b.rect.left().total_cmp(&a.rect.left()))
        });
        let cannon = snapshot.cannon.rect;
        let wanted = target.and_then(|alien| {
            let x = alien.rect.center().x;
            let vx = match self.last_target {
                Some((row, col, last_x)) if (row, col) == (alien.row, alien.col) => x - last_x,
                _ => 0.0,
            };
            self.last_target = Some((alien.row, alien.col, x));

            let flight = ((cannon.top() - alien.rect.bottom()) / self.laser_speed).max(0.0);
            let dx = x + vx * flight - cannon.center().x;
            if dx.abs() <= Self::AIM_TOLERANCE {
                None
            } else if dx < 0.0 {
                Some(Heading::Left)
            } else {
                Some(Heading::Right)
            }
        });

        if wanted != self.heading {
            match self.heading {
                Some(Heading::Left) => commands.push(Command::StopMoveLeft),
                Some(Heading::Right) => commands.push(Command::StopMoveRight),
                None => {}
            }
            match wanted {
                Some(Heading::Left) => commands.push(Command::StartMoveLeft),
                Some(Heading::Right) => commands.push(Command::StartMoveRight),
                None => {}
            }
            self.heading = wanted;
        }

        if target.is_some() && wanted.is_none() && !snapshot.laser.active {
            commands.push(Command::Fire);
        }
        commands
    }
}
