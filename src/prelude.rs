//! Commonly used types and utilities for ease of import.

pub use crate::{
    cells_for, select_target, Board, CellMark, Coord, GameEngine, GameEvent, GameState,
    Orientation, Phase, ShipKind, ShotOutcome, Side,
};

#[cfg(feature = "std")]
pub use crate::{Command, FileStore, MemoryStore, SaveStore, Session, Settings};
