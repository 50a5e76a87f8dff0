#![cfg(feature = "std")]

//! Flat save record for suspending and resuming a game.
//!
//! Ships are stored as flattened `row, col` lists with a parallel list of
//! kind names and a parallel list of flattened hit cells; shots as pairs.
//! Field names follow the on-disk format (`playerShips`, `enemyShots`, ...).
//!
//! Decoding is strict about geometry but lenient about kind names: an
//! unknown or missing name is read as a Battleship. The ship's cells must
//! still form a valid Battleship, so a renamed Destroyer fails to decode.
//! A battle must carry a full fleet on both boards, and `shotsCount` must
//! match the number of player shots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    bitboard::Cells,
    board::Board,
    common::{BoardError, Coord},
    game::{GameState, Outcome, Screen, Side},
    ship::{Ship, ShipKind},
    store::SaveStore,
};

/// On-disk representation of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub screen: Screen,
    pub player_ships: Vec<Vec<i64>>,
    #[serde(default)]
    pub player_ship_types: Vec<String>,
    #[serde(default)]
    pub player_ship_hits: Vec<Vec<i64>>,
    pub enemy_ships: Vec<Vec<i64>>,
    #[serde(default)]
    pub enemy_ship_types: Vec<String>,
    #[serde(default)]
    pub enemy_ship_hits: Vec<Vec<i64>>,
    /// Opponent's shots against the player board.
    pub enemy_shots: Vec<[i64; 2]>,
    /// Player's shots against the opponent board.
    pub player_shots: Vec<[i64; 2]>,
    pub is_player_turn: bool,
    pub shots_count: u32,
    pub player_won: bool,
    pub enemy_won: bool,
}

/// Reasons a save record cannot be turned back into a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A flattened coordinate list has an odd number of entries.
    OddCoordinateList(usize),
    /// A coordinate is negative or off the grid.
    CoordinateOutOfRange { row: i64, col: i64 },
    /// More hit lists than ships.
    OrphanHits { ships: usize, hit_lists: usize },
    /// A recorded hit is not a cell of its ship.
    HitOffShip { kind: ShipKind, at: Coord },
    /// Both sides are marked as winner.
    ConflictingOutcome,
    /// A battle is saved without a full fleet on this side's board.
    IncompleteFleet(Side),
    /// `shotsCount` disagrees with the number of player shots recorded.
    ShotCountMismatch { count: u32, shots: usize },
    Board(BoardError),
}

impl From<BoardError> for DecodeError {
    fn from(err: BoardError) -> Self {
        DecodeError::Board(err)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::OddCoordinateList(len) => {
                write!(f, "coordinate list has odd length {}", len)
            }
            DecodeError::CoordinateOutOfRange { row, col } => {
                write!(f, "coordinate ({}, {}) is off the grid", row, col)
            }
            DecodeError::OrphanHits { ships, hit_lists } => {
                write!(f, "{} hit lists for {} ships", hit_lists, ships)
            }
            DecodeError::HitOffShip { kind, at } => {
                write!(f, "hit at {} is not on the {}", at, kind)
            }
            DecodeError::ConflictingOutcome => write!(f, "both sides marked as winner"),
            DecodeError::IncompleteFleet(side) => {
                write!(f, "battle saved without a full {:?} fleet", side)
            }
            DecodeError::ShotCountMismatch { count, shots } => {
                write!(f, "shot count {} but {} player shots recorded", count, shots)
            }
            DecodeError::Board(err) => write!(f, "invalid board: {}", err),
        }
    }
}

impl std::error::Error for DecodeError {}

fn coord_from(row: i64, col: i64) -> Result<Coord, DecodeError> {
    let out_of_range = DecodeError::CoordinateOutOfRange { row, col };
    let coord = match (usize::try_from(row), usize::try_from(col)) {
        (Ok(r), Ok(c)) => Coord::new(r, c),
        _ => return Err(out_of_range),
    };
    if coord.in_bounds() {
        Ok(coord)
    } else {
        Err(out_of_range)
    }
}

/// Regroup a flattened `[r0, c0, r1, c1, ...]` list into coordinates.
fn regroup(flat: &[i64]) -> Result<Vec<Coord>, DecodeError> {
    if flat.len() % 2 != 0 {
        return Err(DecodeError::OddCoordinateList(flat.len()));
    }
    flat.chunks_exact(2)
        .map(|pair| coord_from(pair[0], pair[1]))
        .collect()
}

fn flatten(cells: impl Iterator<Item = Coord>) -> Vec<i64> {
    cells
        .flat_map(|c| [c.row as i64, c.col as i64])
        .collect()
}

fn pairs(cells: Cells) -> Vec<[i64; 2]> {
    cells.iter().map(|c| [c.row as i64, c.col as i64]).collect()
}

struct EncodedBoard {
    ships: Vec<Vec<i64>>,
    types: Vec<String>,
    hits: Vec<Vec<i64>>,
}

fn encode_board(board: &Board) -> EncodedBoard {
    let ships = board.ships();
    EncodedBoard {
        ships: ships.iter().map(|s| flatten(s.cells())).collect(),
        types: ships.iter().map(|s| s.kind().name().to_string()).collect(),
        hits: ships.iter().map(|s| flatten(s.hit_cells())).collect(),
    }
}

fn decode_board(
    ships: &[Vec<i64>],
    types: &[String],
    hits: &[Vec<i64>],
    shots: &[[i64; 2]],
) -> Result<Board, DecodeError> {
    if hits.len() > ships.len() {
        return Err(DecodeError::OrphanHits {
            ships: ships.len(),
            hit_lists: hits.len(),
        });
    }
    let mut restored = Vec::with_capacity(ships.len());
    for (i, flat) in ships.iter().enumerate() {
        let kind = match types.get(i).and_then(|name| ShipKind::from_name(name)) {
            Some(kind) => kind,
            None => {
                log::warn!(
                    "unknown ship kind {:?} at index {}, reading it as a Battleship",
                    types.get(i),
                    i
                );
                ShipKind::Battleship
            }
        };
        let mut ship = Ship::from_cells(kind, &regroup(flat)?)?;
        for at in regroup(hits.get(i).map(Vec::as_slice).unwrap_or_default())? {
            if !ship.register_hit(at) {
                return Err(DecodeError::HitOffShip { kind, at });
            }
        }
        restored.push(ship);
    }
    let shots = shots
        .iter()
        .map(|[row, col]| coord_from(*row, *col))
        .collect::<Result<Vec<_>, _>>()?;
    let shots = Cells::from_cells(shots).map_err(BoardError::from)?;
    Ok(Board::restore(restored, shots)?)
}

impl From<&GameState> for SaveRecord {
    fn from(state: &GameState) -> Self {
        let player = encode_board(&state.player_board);
        let enemy = encode_board(&state.opponent_board);
        SaveRecord {
            screen: state.screen,
            player_ships: player.ships,
            player_ship_types: player.types,
            player_ship_hits: player.hits,
            enemy_ships: enemy.ships,
            enemy_ship_types: enemy.types,
            enemy_ship_hits: enemy.hits,
            enemy_shots: pairs(state.player_board.shots_received()),
            player_shots: pairs(state.opponent_board.shots_received()),
            is_player_turn: state.turn == Side::Player,
            shots_count: state.shot_count,
            player_won: state.outcome == Outcome::PlayerWon,
            enemy_won: state.outcome == Outcome::OpponentWon,
        }
    }
}

impl TryFrom<SaveRecord> for GameState {
    type Error = DecodeError;

    fn try_from(record: SaveRecord) -> Result<Self, Self::Error> {
        let outcome = match (record.player_won, record.enemy_won) {
            (true, true) => return Err(DecodeError::ConflictingOutcome),
            (true, false) => Outcome::PlayerWon,
            (false, true) => Outcome::OpponentWon,
            (false, false) => Outcome::InProgress,
        };
        let player_board = decode_board(
            &record.player_ships,
            &record.player_ship_types,
            &record.player_ship_hits,
            &record.enemy_shots,
        )?;
        let opponent_board = decode_board(
            &record.enemy_ships,
            &record.enemy_ship_types,
            &record.enemy_ship_hits,
            &record.player_shots,
        )?;
        if record.screen == Screen::Battle {
            if !player_board.is_complete() {
                return Err(DecodeError::IncompleteFleet(Side::Player));
            }
            if !opponent_board.is_complete() {
                return Err(DecodeError::IncompleteFleet(Side::Opponent));
            }
        }
        let shots = opponent_board.shots_received().len();
        if record.shots_count as usize != shots {
            return Err(DecodeError::ShotCountMismatch {
                count: record.shots_count,
                shots,
            });
        }
        Ok(GameState {
            screen: record.screen,
            player_board,
            opponent_board,
            turn: if record.is_player_turn {
                Side::Player
            } else {
                Side::Opponent
            },
            shot_count: record.shots_count,
            outcome,
        })
    }
}

/// Serialize a game to its JSON save format.
pub fn encode(state: &GameState) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(&SaveRecord::from(state))
}

/// Parse a JSON save back into a game.
pub fn decode(bytes: &[u8]) -> anyhow::Result<GameState> {
    let record: SaveRecord = serde_json::from_slice(bytes)?;
    Ok(GameState::try_from(record)?)
}

/// Write `state` to `store`.
pub async fn save<S: SaveStore + ?Sized>(store: &mut S, state: &GameState) -> anyhow::Result<()> {
    let bytes = encode(state)?;
    store.save(&bytes).await
}

/// Load the saved game, falling back to a fresh one when there is no save
/// or it cannot be read.
pub async fn load_or_new<S: SaveStore + ?Sized>(store: &mut S) -> GameState {
    match store.load().await {
        Ok(Some(bytes)) => match decode(&bytes) {
            Ok(state) => {
                log::info!("resumed saved game");
                state
            }
            Err(err) => {
                log::warn!("discarding unreadable save: {:#}", err);
                GameState::default()
            }
        },
        Ok(None) => GameState::default(),
        Err(err) => {
            log::warn!("could not read save: {:#}", err);
            GameState::default()
        }
    }
}
