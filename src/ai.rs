// Opponent targeting: uniformly random over the grid, avoiding cells it has
// already fired at when it can find one within the attempt budget.

use rand::Rng;

use crate::bitboard::Cells;
use crate::common::Coord;
use crate::config::{GRID_SIZE, TARGETING_ATTEMPTS};

/// A uniformly random cell of the grid.
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Coord {
    Coord::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE))
}

/// Pick the opponent's next target given the shots it already made.
///
/// Resamples while the candidate was already fired at, up to
/// `TARGETING_ATTEMPTS` samples; past that the last sample is used as is.
pub fn select_target<R: Rng + ?Sized>(rng: &mut R, already_shot: &Cells) -> Coord {
    let mut candidate = random_cell(rng);
    let mut attempts = 1;
    while already_shot.contains(candidate) && attempts < TARGETING_ATTEMPTS {
        candidate = random_cell(rng);
        attempts += 1;
    }
    candidate
}
