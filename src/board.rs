//! One side's fleet and the shots fired against it.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::Cells;
use crate::common::{BoardError, Coord, ShotOutcome};
use crate::config::{FLEET, FLEET_SIZE, GRID_SIZE, PLACEMENT_ATTEMPTS};
use crate::marks::{CellMark, Marks};
use crate::ship::{cells_for, Orientation, Ship, ShipKind};

/// Ship placements plus every shot received.
///
/// Ship cells never overlap and always lie on the grid; `shots` only grows
/// during a battle.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Board {
    ships: Vec<Ship>,
    occupied: Cells,
    shots: Cells,
}

impl Board {
    /// Create an empty board (no ships placed, no shots).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from restored ships and shots.
    ///
    /// Rejects duplicate kinds, overlapping ships and hits that disagree with
    /// the shots received.
    pub fn restore(ships: Vec<Ship>, shots: Cells) -> Result<Self, BoardError> {
        let mut board = Board {
            ships: Vec::with_capacity(FLEET_SIZE),
            occupied: Cells::new(),
            shots,
        };
        for ship in ships {
            if board.has_ship(ship.kind()) {
                return Err(BoardError::ShipAlreadyPlaced(ship.kind()));
            }
            if !board.occupied.is_disjoint(&ship.mask()) {
                return Err(BoardError::InvalidPlacement);
            }
            if ship.hits() != (shots & ship.mask()) {
                return Err(BoardError::InconsistentHits(ship.kind()));
            }
            board.occupied = board.occupied | ship.mask();
            board.ships.push(ship);
        }
        Ok(board)
    }

    /// Ships in the order they were placed.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Every cell fired upon so far.
    pub fn shots_received(&self) -> Cells {
        self.shots
    }

    /// Union of all ships' cells.
    pub fn occupied_cells(&self) -> Cells {
        self.occupied
    }

    pub fn has_ship(&self, kind: ShipKind) -> bool {
        self.ships.iter().any(|s| s.kind() == kind)
    }

    /// `true` once one ship of every kind is on the board.
    pub fn is_complete(&self) -> bool {
        FLEET.iter().all(|kind| self.has_ship(*kind))
    }

    /// First kind in placement order that is not on the board yet.
    pub fn first_unplaced(&self) -> Option<ShipKind> {
        FLEET.into_iter().find(|kind| !self.has_ship(*kind))
    }

    /// Candidate cells for `kind` at `origin`, if they fit the grid and
    /// touch no other ship.
    pub fn can_place(
        &self,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, BoardError> {
        if !origin.in_bounds() {
            return Err(BoardError::InvalidPlacement);
        }
        let cells = cells_for(kind, origin, orientation);
        if cells
            .iter()
            .all(|c| c.in_bounds() && !self.occupied.contains(*c))
        {
            Ok(cells)
        } else {
            Err(BoardError::InvalidPlacement)
        }
    }

    /// Place a ship of `kind` at `origin`.
    pub fn place(
        &mut self,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<Ship, BoardError> {
        if self.has_ship(kind) {
            return Err(BoardError::ShipAlreadyPlaced(kind));
        }
        self.can_place(kind, origin, orientation)?;
        let ship = Ship::new(kind, origin, orientation)?;
        self.occupied = self.occupied | ship.mask();
        self.ships.push(ship);
        Ok(ship)
    }

    /// Returns a random non-overlapping origin and orientation for `kind`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<(Coord, Orientation), BoardError> {
        let len = kind.length();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            // constrain the origin so the ship always fits on the grid
            let (max_r, max_c) = match orientation {
                Orientation::Horizontal => (GRID_SIZE - 1, GRID_SIZE - len),
                Orientation::Vertical => (GRID_SIZE - len, GRID_SIZE - 1),
            };
            let origin = Coord::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if self.can_place(kind, origin, orientation).is_ok() {
                return Ok((origin, orientation));
            }
        }
        Err(BoardError::PlacementExhausted(kind))
    }

    /// Randomly place every kind not yet on the board, in fleet order.
    pub fn auto_place<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for kind in FLEET {
            if self.has_ship(kind) {
                continue;
            }
            let (origin, orientation) = self.random_placement(rng, kind)?;
            self.place(kind, origin, orientation)?;
            log::debug!("auto-placed {} at {} ({:?})", kind, origin, orientation);
        }
        Ok(())
    }

    /// The ship owning `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(coord))
    }

    /// `true` when the board has ships and every one of them is sunk.
    pub fn is_fleet_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Resolve a shot at `coord`, recording it and any hit.
    pub fn receive_shot(&mut self, coord: Coord) -> Result<ShotOutcome, BoardError> {
        if !coord.in_bounds() {
            return Err(BoardError::OutOfBounds(coord));
        }
        if self.shots.contains(coord) {
            return Err(BoardError::AlreadyShot(coord));
        }
        self.shots.insert(coord)?;
        if !self.occupied.contains(coord) {
            return Ok(ShotOutcome::Miss);
        }
        let ship = self
            .ships
            .iter_mut()
            .find(|s| s.contains(coord))
            .ok_or(BoardError::UnknownShipHit(coord))?;
        ship.register_hit(coord);
        if ship.is_sunk() {
            Ok(ShotOutcome::Sunk {
                kind: ship.kind(),
                cells: ship.cells().collect(),
            })
        } else {
            Ok(ShotOutcome::Hit)
        }
    }

    /// Mark for a single cell. Unhit ships are only shown when `reveal_ships`.
    pub fn mark_at(&self, coord: Coord, reveal_ships: bool) -> CellMark {
        match (self.ship_at(coord), self.shots.contains(coord)) {
            (Some(ship), _) if ship.is_sunk() => CellMark::Sunk,
            (Some(_), true) => CellMark::Hit,
            (Some(_), false) if reveal_ships => CellMark::Ship,
            (None, true) => CellMark::Miss,
            _ => CellMark::Empty,
        }
    }

    /// Render marks for the whole grid, derived fresh from the board.
    pub fn marks(&self, reveal_ships: bool) -> Marks {
        let mut marks = Marks::default();
        for coord in Coord::all() {
            marks.set(coord, self.mark_at(coord, reveal_ships));
        }
        marks
    }

    /// Forget every shot and hit, keeping ship positions.
    pub(crate) fn clear_shots(&mut self) {
        self.shots = Cells::new();
        for ship in &mut self.ships {
            ship.clear_hits();
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ships: {:?},\n  occupied: {:?},\n  shots: {:?}\n}}",
            self.ships, self.occupied, self.shots
        )
    }
}
