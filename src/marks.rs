//! Per-cell render marks derived from a board.

use core::fmt;

use crate::common::Coord;
use crate::config::GRID_SIZE;

/// What a presentation layer should draw in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellMark {
    #[default]
    Empty,
    /// An unhit ship segment (only on boards whose ships are revealed).
    Ship,
    Miss,
    Hit,
    /// Segment of a ship that has been sunk.
    Sunk,
}

impl CellMark {
    pub fn symbol(self) -> char {
        match self {
            CellMark::Empty => '.',
            CellMark::Ship => 'S',
            CellMark::Miss => 'o',
            CellMark::Hit => 'X',
            CellMark::Sunk => '#',
        }
    }
}

/// A full grid of marks, recomputed from board state on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Marks {
    cells: [[CellMark; GRID_SIZE]; GRID_SIZE],
}

impl Marks {
    pub(crate) fn set(&mut self, at: Coord, mark: CellMark) {
        if at.in_bounds() {
            self.cells[at.row][at.col] = mark;
        }
    }

    /// Mark at `at`; off-grid cells read as empty.
    pub fn get(&self, at: Coord) -> CellMark {
        if at.in_bounds() {
            self.cells[at.row][at.col]
        } else {
            CellMark::Empty
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellMark; GRID_SIZE]> {
        self.cells.iter()
    }

    /// Number of cells carrying `mark`.
    pub fn count(&self, mark: CellMark) -> usize {
        self.cells.iter().flatten().filter(|m| **m == mark).count()
    }
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for mark in row {
                write!(f, "{} ", mark.symbol())?;
            }
            if r + 1 < GRID_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
