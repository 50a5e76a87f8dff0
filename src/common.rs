//! Common types for the game: coordinates, shot outcomes and board errors.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoardError;
use crate::config::GRID_SIZE;
use crate::ship::ShipKind;

/// A cell on the grid. Row 0 is the top row, column 0 the leftmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` when the cell lies on the 8×8 grid.
    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Coord::new(row, col)))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

/// Column letter followed by the 1-based row, e.g. `C5`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < 26 {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row.saturating_add(1))
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Result of a shot against a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotOutcome {
    /// No ship occupies the cell.
    Miss,
    /// A ship was hit but is still afloat.
    Hit,
    /// The shot sank a ship; carries every cell of that ship.
    Sunk { kind: ShipKind, cells: Vec<Coord> },
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g. a coordinate off the grid).
    BitBoardError(BitBoardError),
    /// Candidate cells leave the grid or overlap another ship.
    InvalidPlacement,
    /// The fleet already contains a ship of this kind.
    ShipAlreadyPlaced(ShipKind),
    /// The cell was fired upon before.
    AlreadyShot(Coord),
    /// The cell is not on the grid.
    OutOfBounds(Coord),
    /// Occupancy says a ship is there but no ship claims the cell.
    UnknownShipHit(Coord),
    /// Recorded hits disagree with the shots received.
    InconsistentHits(ShipKind),
    /// Random placement ran out of attempts for this ship.
    PlacementExhausted(ShipKind),
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidPlacement => write!(f, "Ship placement is out of bounds or overlaps"),
            BoardError::ShipAlreadyPlaced(kind) => write!(f, "{} is already placed", kind),
            BoardError::AlreadyShot(at) => write!(f, "{} was already fired upon", at),
            BoardError::OutOfBounds(at) => write!(f, "{} is outside the grid", at),
            BoardError::UnknownShipHit(at) => write!(f, "No ship owns occupied cell {}", at),
            BoardError::InconsistentHits(kind) => {
                write!(f, "Hits recorded on {} do not match the shots received", kind)
            }
            BoardError::PlacementExhausted(kind) => {
                write!(f, "Unable to find a free spot for {}", kind)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
