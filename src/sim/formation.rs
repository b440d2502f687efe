//! Alien formation controller
//!
//! The formation sweeps right until its rightmost live column passes the
//! right margin, sweeps left until its leftmost live column passes the left
//! margin, then drops one row. Direction comes from the parity of a single
//! edge-hit counter: even sweeps right, odd sweeps left, and the drop fires
//! when the counter reaches 2 on the leftward leg.

use glam::Vec2;

use super::rect::Rect;
use super::state::Sprite;
use crate::consts::*;

/// Current sweep direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Right,
    Left,
}

/// What a formation step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStep {
    /// No live aliens; nothing moved
    Empty,
    Moved,
    /// Moved, hit a wall, but no drop yet
    EdgeHit,
    /// Completed a sweep cycle and dropped a row
    Descended,
}

/// One grid cell
#[derive(Debug, Clone)]
pub struct Alien {
    pub row: usize,
    pub col: usize,
    pub sprite: Sprite,
}

impl Alien {
    fn home(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            sprite: Sprite::new(Formation::home_center(row, col), Vec2::splat(ALIEN_SIZE), true),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.sprite.visible
    }

    pub fn rect(&self) -> Rect {
        self.sprite.rect()
    }
}

/// The alien grid, stored row-major
#[derive(Debug, Clone)]
pub struct Formation {
    rows: usize,
    cols: usize,
    cells: Vec<Alien>,
    alive: usize,
    /// Wall crossings since the last drop
    pub edge_hits: u32,
    /// Horizontal step per tick
    pub speed: u32,
}

impl Formation {
    /// Full formation at its home slots
    pub fn new(rows: usize, cols: usize, speed: u32) -> Self {
        let mut formation = Self {
            rows,
            cols,
            cells: Vec::with_capacity(rows * cols),
            alive: 0,
            edge_hits: 0,
            speed,
        };
        formation.reset();
        formation
    }

    /// Rebuild a formation from saved cells (row-major, `None` = destroyed).
    ///
    /// Destroyed cells are parked at their home slot; only their hidden
    /// state matters until the next reset.
    pub fn restore(rows: usize, cols: usize, speed: u32, cells: &[Option<Rect>]) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        let cells: Vec<Alien> = (0..rows * cols)
            .map(|i| {
                let (row, col) = (i / cols, i % cols);
                let mut alien = Alien::home(row, col);
                match cells.get(i).copied().flatten() {
                    Some(rect) => alien.sprite.place(rect),
                    None => alien.sprite.hide(),
                }
                alien
            })
            .collect();
        let alive = cells.iter().filter(|a| a.is_visible()).count();
        Self {
            rows,
            cols,
            cells,
            alive,
            edge_hits: 0,
            speed,
        }
    }

    /// Centre of the alien at (row, col) at the start of a round
    pub fn home_center(row: usize, col: usize) -> Vec2 {
        Vec2::new(
            ALIEN_ORIGIN_X + ALIEN_SPACING * col as f32,
            ALIEN_ORIGIN_Y + ALIEN_SPACING * row as f32,
        )
    }

    /// Put every alien back at its home slot, visible, and restart the sweep
    pub fn reset(&mut self) {
        self.cells.clear();
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.cells.push(Alien::home(row, col));
            }
        }
        self.alive = self.cells.len();
        self.edge_hits = 0;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Live aliens remaining this round
    pub fn alive(&self) -> usize {
        self.alive
    }

    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Alien] {
        &self.cells
    }

    pub fn visible(&self) -> impl Iterator<Item = &Alien> {
        self.cells.iter().filter(|a| a.is_visible())
    }

    pub fn sweep(&self) -> Sweep {
        if self.edge_hits % 2 == 0 {
            Sweep::Right
        } else {
            Sweep::Left
        }
    }

    /// Hide the alien at (row, col). Returns false if it was already gone.
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.rows && col < self.cols);
        let cols = self.cols;
        match self.cells.get_mut(row * cols + col) {
            Some(alien) if alien.is_visible() => {
                alien.sprite.hide();
                self.alive -= 1;
                true
            }
            _ => false,
        }
    }

    fn column_has_visible(&self, col: usize) -> bool {
        (0..self.rows).any(|row| self.cells[row * self.cols + col].is_visible())
    }

    pub fn leftmost_active_column(&self) -> Option<usize> {
        (0..self.cols).find(|&col| self.column_has_visible(col))
    }

    pub fn rightmost_active_column(&self) -> Option<usize> {
        (0..self.cols).rev().find(|&col| self.column_has_visible(col))
    }

    /// Topmost visible alien in a column
    fn representative(&self, col: usize) -> Option<&Alien> {
        (0..self.rows)
            .map(|row| &self.cells[row * self.cols + col])
            .find(|a| a.is_visible())
    }

    fn shift_visible(&mut self, delta: Vec2) {
        for alien in self.cells.iter_mut().filter(|a| a.sprite.visible) {
            alien.sprite.translate(delta);
        }
    }

    /// Drop every visible alien by one row
    pub fn descend(&mut self) {
        self.shift_visible(Vec2::new(0.0, FORMATION_DROP));
    }

    /// Advance the formation by one tick.
    ///
    /// The wall test uses the representative alien's position from before
    /// the move.
    pub fn step(&mut self) -> FormationStep {
        let sweep = self.sweep();
        let column = match sweep {
            Sweep::Right => self.rightmost_active_column(),
            Sweep::Left => self.leftmost_active_column(),
        };
        let Some(rep) = column.and_then(|col| self.representative(col)) else {
            return FormationStep::Empty;
        };
        let edge = rep.rect();

        let dx = self.speed as f32;
        match sweep {
            Sweep::Right => {
                self.shift_visible(Vec2::new(dx, 0.0));
                if edge.right() > FIELD_WIDTH - FORMATION_EDGE_MARGIN {
                    self.edge_hits += 1;
                    return FormationStep::EdgeHit;
                }
            }
            Sweep::Left => {
                self.shift_visible(Vec2::new(-dx, 0.0));
                if edge.left() < FORMATION_EDGE_MARGIN {
                    self.edge_hits += 1;
                    if self.edge_hits == 2 {
                        self.descend();
                        self.edge_hits = 0;
                        log::debug!("Formation descended");
                        return FormationStep::Descended;
                    }
                    return FormationStep::EdgeHit;
                }
            }
        }
        FormationStep::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_grid() {
        let formation = Formation::new(2, 8, 1);
        assert_eq!(formation.cell_count(), 16);
        assert_eq!(formation.alive(), 16);
        let first = formation.get(0, 0).unwrap();
        assert_eq!(first.rect(), Rect::new(140.0, 70.0, 190.0, 120.0));
        let last = formation.get(1, 7).unwrap();
        assert_eq!(last.rect(), Rect::new(560.0, 130.0, 610.0, 180.0));
        assert!(formation.get(2, 0).is_none());
        assert!(formation.get(0, 8).is_none());
    }

    #[test]
    fn test_active_columns_skip_empty_columns() {
        let mut formation = Formation::new(2, 8, 1);
        for row in 0..2 {
            formation.destroy(row, 0);
            formation.destroy(row, 7);
        }
        formation.destroy(0, 6);
        assert_eq!(formation.leftmost_active_column(), Some(1));
        // Column 6 still has a live alien in row 1
        assert_eq!(formation.rightmost_active_column(), Some(6));
        assert_eq!(formation.alive(), 11);
    }

    #[test]
    fn test_destroy_twice_counts_once() {
        let mut formation = Formation::new(2, 8, 1);
        assert!(formation.destroy(1, 3));
        assert!(!formation.destroy(1, 3));
        assert_eq!(formation.alive(), 15);
    }

    #[test]
    fn test_empty_formation_does_not_move() {
        let mut formation = Formation::new(1, 2, 1);
        formation.destroy(0, 0);
        formation.destroy(0, 1);
        assert!(formation.is_empty());
        assert_eq!(formation.step(), FormationStep::Empty);
        assert_eq!(formation.leftmost_active_column(), None);
    }

    #[test]
    fn test_hidden_aliens_stay_put() {
        let mut formation = Formation::new(2, 8, 1);
        formation.destroy(0, 0);
        let parked = formation.get(0, 0).unwrap().rect();
        formation.step();
        assert_eq!(formation.get(0, 0).unwrap().rect(), parked);
        assert_eq!(formation.get(1, 0).unwrap().rect().left(), 141.0);
    }

    #[test]
    fn test_single_edge_touch_does_not_descend() {
        let mut formation = Formation::new(2, 8, 1);
        let start_y = formation.get(0, 0).unwrap().rect().top();
        let mut steps = 0;
        while formation.sweep() == Sweep::Right {
            formation.step();
            steps += 1;
            assert!(steps < 1000);
        }
        assert_eq!(formation.edge_hits, 1);
        assert_eq!(formation.get(0, 0).unwrap().rect().top(), start_y);
    }

    #[test]
    fn test_full_cycle_descends_exactly_once() {
        let mut formation = Formation::new(2, 8, 1);
        let start_y = formation.get(0, 0).unwrap().rect().top();
        let mut descents = 0;
        let mut steps = 0;
        loop {
            steps += 1;
            assert!(steps < 2000);
            if formation.step() == FormationStep::Descended {
                descents += 1;
                break;
            }
        }
        assert_eq!(descents, 1);
        assert_eq!(formation.edge_hits, 0);
        assert_eq!(formation.sweep(), Sweep::Right);
        assert_eq!(formation.get(0, 0).unwrap().rect().top(), start_y + FORMATION_DROP);
    }

    #[test]
    fn test_restore_places_saved_rects() {
        let mut cells = vec![None; 16];
        cells[3] = Some(Rect::new(201.0, 130.0, 251.0, 180.0));
        let formation = Formation::restore(2, 8, 2, &cells);
        assert_eq!(formation.alive(), 1);
        assert_eq!(formation.speed, 2);
        let alien = formation.get(0, 3).unwrap();
        assert!(alien.is_visible());
        assert_eq!(alien.rect(), Rect::new(201.0, 130.0, 251.0, 180.0));
        assert!(!formation.get(0, 0).unwrap().is_visible());
    }
}
