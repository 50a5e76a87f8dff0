//! Ship kinds and ships placed on a board.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::Cells;
use crate::common::{BoardError, Coord};

/// The four kinds of ship in a fleet. Each fleet holds exactly one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShipKind {
    Battleship,
    Cruiser,
    Destroyer,
    Submarine,
}

impl ShipKind {
    /// All kinds in placement order.
    pub const ALL: [ShipKind; 4] = [
        ShipKind::Battleship,
        ShipKind::Cruiser,
        ShipKind::Destroyer,
        ShipKind::Submarine,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Submarine => "Submarine",
        }
    }

    pub const fn length(self) -> usize {
        match self {
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Destroyer => 2,
            ShipKind::Submarine => 1,
        }
    }

    /// Looks a kind up by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Extends rightward from the origin.
    #[default]
    Horizontal,
    /// Extends downward from the origin.
    Vertical,
}

impl Orientation {
    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Orientation::Horizontal => "H",
            Orientation::Vertical => "V",
        }
    }
}

#[inline]
fn step(origin: Coord, orientation: Orientation, i: usize) -> Coord {
    match orientation {
        Orientation::Horizontal => Coord::new(origin.row, origin.col.saturating_add(i)),
        Orientation::Vertical => Coord::new(origin.row.saturating_add(i), origin.col),
    }
}

/// The ordered cells a `kind` would cover from `origin`. No bounds checking.
pub fn cells_for(kind: ShipKind, origin: Coord, orientation: Orientation) -> Vec<Coord> {
    (0..kind.length())
        .map(|i| step(origin, orientation, i))
        .collect()
}

/// A ship placed on the grid, with hits tracked in a cell set.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    origin: Coord,
    orientation: Orientation,
    mask: Cells,
    hits: Cells,
}

impl Ship {
    /// Place a ship of `kind` at `origin`. Fails when any cell leaves the grid.
    ///
    /// Single-cell ships are always recorded as horizontal.
    pub fn new(kind: ShipKind, origin: Coord, orientation: Orientation) -> Result<Self, BoardError> {
        let orientation = if kind.length() == 1 {
            Orientation::Horizontal
        } else {
            orientation
        };
        let cells = cells_for(kind, origin, orientation);
        if !cells.iter().all(Coord::in_bounds) {
            return Err(BoardError::InvalidPlacement);
        }
        let mask = Cells::from_cells(cells)?;
        Ok(Ship {
            kind,
            origin,
            orientation,
            mask,
            hits: Cells::new(),
        })
    }

    /// Rebuild a ship from its ordered cell list.
    ///
    /// The list must be exactly the run `cells_for` produces from its first
    /// cell in one of the two orientations.
    pub fn from_cells(kind: ShipKind, cells: &[Coord]) -> Result<Self, BoardError> {
        let origin = *cells.first().ok_or(BoardError::InvalidPlacement)?;
        let orientation = match cells.get(1) {
            Some(next) if next.row > origin.row => Orientation::Vertical,
            _ => Orientation::Horizontal,
        };
        let ship = Self::new(kind, origin, orientation)?;
        if !ship.cells().eq(cells.iter().copied()) {
            return Err(BoardError::InvalidPlacement);
        }
        Ok(ship)
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship.
    pub fn mask(&self) -> Cells {
        self.mask
    }

    /// Cells of the ship that have been hit.
    pub fn hits(&self) -> Cells {
        self.hits
    }

    /// Cells from the origin outward.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.kind.length()).map(move |i| step(self.origin, self.orientation, i))
    }

    /// Hit cells, in the same order as [`Ship::cells`].
    pub fn hit_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells().filter(move |c| self.hits.contains(*c))
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.mask.contains(coord)
    }

    /// Record a hit at `coord`. Returns `false` if the ship is not there.
    pub fn register_hit(&mut self, coord: Coord) -> bool {
        if !self.mask.contains(coord) {
            return false;
        }
        let _ = self.hits.insert(coord);
        true
    }

    /// All segments hit.
    pub fn is_sunk(&self) -> bool {
        self.hits.is_superset(&self.mask)
    }

    pub(crate) fn clear_hits(&mut self) {
        self.hits = Cells::new();
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ kind: {}, origin: {}, orientation: {:?}, hits: {}/{} }}",
            self.kind,
            self.origin,
            self.orientation,
            self.hits.len(),
            self.kind.length(),
        )
    }
}
