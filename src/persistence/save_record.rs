//! Line-oriented save record
//!
//! Layout, one value per line:
//!
//! ```text
//! name
//! difficulty            beginner | advanced
//! keys                  left_right_fire
//! round
//! score
//! lives
//! alive alien count
//! one line per grid cell, row-major: 0 if destroyed, else [x0, y0, x1, y1]
//! one strength line per bunker
//! cannon bounds         [x0, y0, x1, y1]
//! ```
//!
//! The final line has no trailing newline.

use std::fmt::Display;

use crate::sim::{
    Difficulty, EscalationLevel, Formation, GamePhase, KeyBinding, Projectile, Rect, Session,
};
use crate::consts::*;
use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// Fixed lines before the alien cells
const HEADER_LINES: usize = 7;

/// Everything a save file carries
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRecord {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub keys: KeyBinding,
    pub round: u32,
    pub score: u64,
    pub lives: u8,
    pub alive_aliens: usize,
    /// Row-major; `None` for destroyed cells
    pub aliens: Vec<Option<Rect>>,
    pub bunkers: Vec<u32>,
    pub cannon: Rect,
}

impl SaveRecord {
    pub fn from_session(session: &Session) -> Self {
        Self {
            player_name: session.player_name.clone(),
            difficulty: session.difficulty,
            keys: session.keys.clone(),
            round: session.round,
            score: session.score,
            lives: session.lives(),
            alive_aliens: session.formation.alive(),
            aliens: session
                .formation
                .cells()
                .iter()
                .map(|a| a.is_visible().then(|| a.rect()))
                .collect(),
            bunkers: session.bunkers.iter().map(|b| b.strength).collect(),
            cannon: session.cannon.rect(),
        }
    }

    /// Number of lines a record for `difficulty` must have
    pub fn expected_lines(difficulty: Difficulty) -> usize {
        HEADER_LINES + difficulty.alien_count() + BUNKER_COUNT + 1
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        line(&mut out, &self.player_name);
        line(&mut out, self.difficulty.as_str());
        line(&mut out, &self.keys);
        line(&mut out, &self.round);
        line(&mut out, &self.score);
        line(&mut out, &self.lives);
        line(&mut out, &self.alive_aliens);
        for cell in &self.aliens {
            match cell {
                Some(rect) => line(&mut out, format_rect(rect)),
                None => out.push_str("0\n"),
            }
        }
        for strength in &self.bunkers {
            line(&mut out, strength);
        }
        out.push_str(&format_rect(&self.cannon));
        out
    }

    /// Parse a record. Line numbers in errors are 1-based.
    pub fn decode(text: &str) -> Result<Self> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() < HEADER_LINES {
            return Err(Error::save_record(
                lines.len() + 1,
                format!("truncated header ({} lines)", lines.len()),
            ));
        }

        let player_name = lines[0].trim().to_string();
        if player_name.is_empty() {
            return Err(Error::save_record(1, "blank player name"));
        }
        let difficulty = Difficulty::parse(lines[1])
            .ok_or_else(|| Error::save_record(2, format!("unknown difficulty '{}'", lines[1])))?;
        let keys = KeyBinding::parse(lines[2])
            .ok_or_else(|| Error::save_record(3, format!("bad key binding '{}'", lines[2])))?;

        let expected = Self::expected_lines(difficulty);
        if lines.len() != expected {
            return Err(Error::save_record(
                lines.len().min(expected) + 1,
                format!(
                    "expected {} lines for {} difficulty, found {}",
                    expected,
                    difficulty.as_str(),
                    lines.len()
                ),
            ));
        }

        let round: u32 = parse_number(lines[3], 4)?;
        let score: u64 = parse_number(lines[4], 5)?;
        let lives: u8 = parse_number(lines[5], 6)?;
        if lives == 0 || lives > MAX_LIVES {
            return Err(Error::save_record(6, format!("lives {} outside 1..={}", lives, MAX_LIVES)));
        }
        let alive_aliens: usize = parse_number(lines[6], 7)?;

        let cell_count = difficulty.alien_count();
        let mut aliens = Vec::with_capacity(cell_count);
        for i in 0..cell_count {
            let index = HEADER_LINES + i;
            let line = lines[index].trim();
            aliens.push(if line == "0" {
                None
            } else {
                Some(parse_rect(line, index + 1)?)
            });
        }
        let visible = aliens.iter().filter(|a| a.is_some()).count();
        if visible != alive_aliens {
            return Err(Error::save_record(
                7,
                format!("alive count {} but {} cells are visible", alive_aliens, visible),
            ));
        }

        let bunker_start = HEADER_LINES + cell_count;
        let bunkers = (0..BUNKER_COUNT)
            .map(|i| parse_number(lines[bunker_start + i], bunker_start + i + 1))
            .collect::<Result<Vec<u32>>>()?;

        let cannon_line = bunker_start + BUNKER_COUNT;
        let cannon = parse_rect(lines[cannon_line], cannon_line + 1)?;

        Ok(Self {
            player_name,
            difficulty,
            keys,
            round,
            score,
            lives,
            alive_aliens,
            aliens,
            bunkers,
            cannon,
        })
    }

    /// Rebuild a live session. Escalation is re-derived from the round
    /// number; the restored game starts paused.
    pub fn into_session(self, seed: u64, tuning: Tuning) -> Session {
        let level = EscalationLevel::at_round(self.round, self.difficulty.projectile_slots(), &tuning);
        let mut session =
            Session::with_tuning(self.player_name, self.difficulty, self.keys, seed, tuning);

        session.round = self.round;
        session.score = self.score;
        session.cannon.lives = self.lives;
        session.cannon.sprite.place(self.cannon);
        for (bunker, strength) in session.bunkers.iter_mut().zip(self.bunkers) {
            bunker.strength = strength;
        }
        session.formation = Formation::restore(
            self.difficulty.alien_rows(),
            ALIEN_COLS,
            level.alien_speed,
            &self.aliens,
        );
        session.projectile_speed = level.projectile_speed;
        session.projectiles = (0..level.projectile_slots)
            .map(|_| Projectile::idle(level.projectile_speed))
            .collect();
        session.phase = GamePhase::Paused;

        log::info!(
            "Restored '{}' at round {} with score {} ({} aliens left)",
            session.player_name,
            session.round,
            session.score,
            session.formation.alive()
        );
        session
    }
}

/// `[x0, y0, x1, y1]` with every coordinate written as a float
fn format_rect(rect: &Rect) -> String {
    let [x0, y0, x1, y1] = rect.as_array();
    format!("[{:?}, {:?}, {:?}, {:?}]", x0, y0, x1, y1)
}

fn line(out: &mut String, value: impl Display) {
    out.push_str(&value.to_string());
    out.push('\n');
}

fn parse_rect(line: &str, line_no: usize) -> Result<Rect> {
    let inner = line
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| Error::save_record(line_no, format!("expected [x0, y0, x1, y1], got '{}'", line)))?;

    let coords = inner
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<Vec<f32>, _>>()
        .map_err(|e| Error::save_record(line_no, format!("bad coordinate: {}", e)))?;

    let &[x0, y0, x1, y1] = coords.as_slice() else {
        return Err(Error::save_record(
            line_no,
            format!("expected 4 coordinates, got {}", coords.len()),
        ));
    };
    if !coords.iter().all(|c| c.is_finite()) || x1 < x0 || y1 < y0 {
        return Err(Error::save_record(line_no, format!("degenerate box '{}'", line)));
    }
    Ok(Rect::new(x0, y0, x1, y1))
}

fn parse_number<T: std::str::FromStr>(line: &str, line_no: usize) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    line.trim()
        .parse()
        .map_err(|e| Error::save_record(line_no, format!("'{}': {}", line.trim(), e)))
}
