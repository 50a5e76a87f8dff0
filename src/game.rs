//! The game engine: placement, turn sequencing, shot resolution and
//! victory detection over two boards.
//!
//! Every command returns the events it produced. An empty list means the
//! command was not legal in the current state and nothing changed.

use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

use crate::{
    ai,
    board::Board,
    common::{BoardError, Coord, ShotOutcome},
    marks::Marks,
    ship::{cells_for, Orientation, ShipKind},
};

/// One of the two fleets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Player,
    Opponent,
}

/// Which screen the game is on; persisted alongside the boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Screen {
    #[default]
    Placement,
    Battle,
}

/// Result of the game so far. Exactly one variant holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    PlayerWon,
    OpponentWon,
}

impl Outcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::InProgress => None,
            Outcome::PlayerWon => Some(Side::Player),
            Outcome::OpponentWon => Some(Side::Opponent),
        }
    }
}

/// Engine state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Placement,
    Battle,
    GameOver(Side),
}

/// Complete game state: everything that is saved and restored.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GameState {
    pub screen: Screen,
    pub player_board: Board,
    pub opponent_board: Board,
    /// Side whose shot is next.
    pub turn: Side,
    /// Shots fired by the player.
    pub shot_count: u32,
    pub outcome: Outcome,
}

impl GameState {
    pub fn phase(&self) -> Phase {
        match (self.screen, self.outcome.winner()) {
            (Screen::Placement, _) => Phase::Placement,
            (Screen::Battle, Some(winner)) => Phase::GameOver(winner),
            (Screen::Battle, None) => Phase::Battle,
        }
    }
}

/// Candidate placement shown before it is committed. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementDraft {
    pub kind: ShipKind,
    pub origin: Coord,
    pub orientation: Orientation,
    pub cells: Vec<Coord>,
    pub valid: bool,
}

/// Token for a scheduled opponent turn, bound to the engine epoch it was
/// issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTicket {
    epoch: u64,
}

impl TurnTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// State changes reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ShipSelected(ShipKind),
    Rotated(Orientation),
    DraftUpdated { cells: Vec<Coord>, valid: bool },
    DraftCleared,
    ShipPlaced { kind: ShipKind, cells: Vec<Coord> },
    FleetCleared,
    BattleStarted,
    ShotResolved { by: Side, at: Coord, outcome: ShotOutcome },
    TurnPassed(Side),
    /// The opponent's shot is due once the caller has waited out the delay.
    OpponentTurnScheduled(TurnTicket),
    GameOver { winner: Side },
    ReturnedToPlacement,
    Reset,
}

/// Core game logic owning both boards.
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    selected: Option<ShipKind>,
    orientation: Orientation,
    draft: Option<PlacementDraft>,
    epoch: u64,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// A fresh game on the placement screen.
    pub fn new() -> Self {
        Self::from_state(GameState::default())
    }

    /// Restore an engine from a previously saved state.
    pub fn from_state(state: GameState) -> Self {
        let selected = state.player_board.first_unplaced();
        Self {
            state,
            selected,
            orientation: Orientation::Horizontal,
            draft: None,
            epoch: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn turn(&self) -> Side {
        self.state.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn shot_count(&self) -> u32 {
        self.state.shot_count
    }

    pub fn player_board(&self) -> &Board {
        &self.state.player_board
    }

    pub fn opponent_board(&self) -> &Board {
        &self.state.opponent_board
    }

    /// Ship kind the next placement applies to; `None` once all are placed.
    pub fn selected_ship(&self) -> Option<ShipKind> {
        self.selected
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn draft(&self) -> Option<&PlacementDraft> {
        self.draft.as_ref()
    }

    pub fn placed_kinds(&self) -> impl Iterator<Item = ShipKind> + '_ {
        self.state.player_board.ships().iter().map(|s| s.kind())
    }

    /// Generation counter, bumped whenever the current battle is thrown away.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Player's own board with ships shown.
    pub fn player_marks(&self) -> Marks {
        self.state.player_board.marks(true)
    }

    /// Opponent's board as the player sees it: only shots and sunk ships.
    pub fn opponent_marks(&self) -> Marks {
        self.state.opponent_board.marks(false)
    }

    fn in_placement(&self) -> bool {
        self.phase() == Phase::Placement
    }

    fn ticket(&self) -> TurnTicket {
        TurnTicket { epoch: self.epoch }
    }

    /// Ticket for an opponent turn that is owed but not yet resolved, e.g.
    /// after restoring a game saved mid-turn.
    pub fn pending_opponent_turn(&self) -> Option<TurnTicket> {
        (self.phase() == Phase::Battle && self.state.turn == Side::Opponent).then(|| self.ticket())
    }

    /// Choose which ship to place next. Placed kinds cannot be selected.
    pub fn select_ship(&mut self, kind: ShipKind) -> Vec<GameEvent> {
        if !self.in_placement() || self.state.player_board.has_ship(kind) {
            return Vec::new();
        }
        self.selected = Some(kind);
        let mut events = vec![GameEvent::ShipSelected(kind)];
        if self.draft.take().is_some() {
            events.push(GameEvent::DraftCleared);
        }
        events
    }

    /// Toggle the orientation, re-previewing any pending draft.
    pub fn rotate(&mut self) -> Vec<GameEvent> {
        if !self.in_placement() {
            return Vec::new();
        }
        self.orientation.toggle();
        let mut events = vec![GameEvent::Rotated(self.orientation)];
        if let Some(origin) = self.draft.as_ref().map(|d| d.origin) {
            events.extend(self.preview_placement(origin));
        }
        events
    }

    /// Compute the candidate cells of the selected ship at `origin` and
    /// record them as the pending draft. The board is not touched.
    pub fn preview_placement(&mut self, origin: Coord) -> Vec<GameEvent> {
        if !self.in_placement() {
            return Vec::new();
        }
        let Some(kind) = self.selected else {
            return Vec::new();
        };
        let (cells, valid) = match self
            .state
            .player_board
            .can_place(kind, origin, self.orientation)
        {
            Ok(cells) => (cells, true),
            Err(_) => (cells_for(kind, origin, self.orientation), false),
        };
        self.draft = Some(PlacementDraft {
            kind,
            origin,
            orientation: self.orientation,
            cells: cells.clone(),
            valid,
        });
        vec![GameEvent::DraftUpdated { cells, valid }]
    }

    /// Tap once to preview, tap the same cell again to commit.
    pub fn tap_placement(&mut self, coord: Coord) -> Vec<GameEvent> {
        match &self.draft {
            Some(draft) if draft.origin == coord => self.commit_placement(),
            _ => self.preview_placement(coord),
        }
    }

    /// Commit the pending draft if it is valid.
    pub fn commit_placement(&mut self) -> Vec<GameEvent> {
        if !self.in_placement() {
            return Vec::new();
        }
        let draft = match self.draft.take() {
            Some(draft) if draft.valid => draft,
            other => {
                self.draft = other;
                return Vec::new();
            }
        };
        match self
            .state
            .player_board
            .place(draft.kind, draft.origin, draft.orientation)
        {
            Ok(ship) => {
                log::debug!("placed {} at {} ({:?})", ship.kind(), ship.origin(), ship.orientation());
                self.selected = self.state.player_board.first_unplaced();
                vec![
                    GameEvent::ShipPlaced {
                        kind: ship.kind(),
                        cells: ship.cells().collect(),
                    },
                    GameEvent::DraftCleared,
                ]
            }
            Err(err) => {
                log::debug!("dropping stale draft for {}: {}", draft.kind, err);
                Vec::new()
            }
        }
    }

    /// Remove every player ship and start placement over.
    pub fn clear_placement(&mut self) -> Vec<GameEvent> {
        if !self.in_placement() {
            return Vec::new();
        }
        self.state.player_board = Board::new();
        self.selected = Some(ShipKind::Battleship);
        self.orientation = Orientation::Horizontal;
        self.draft = None;
        vec![GameEvent::FleetCleared]
    }

    /// Replace the player's fleet with a random legal one.
    pub fn auto_place_player<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, BoardError> {
        if !self.in_placement() {
            return Ok(Vec::new());
        }
        let mut board = Board::new();
        board.auto_place(rng)?;
        let mut events = vec![GameEvent::FleetCleared];
        events.extend(board.ships().iter().map(|ship| GameEvent::ShipPlaced {
            kind: ship.kind(),
            cells: ship.cells().collect(),
        }));
        self.state.player_board = board;
        self.selected = None;
        self.draft = None;
        Ok(events)
    }

    /// Place the opponent fleet and begin the battle with the player to move.
    ///
    /// Ignored until all four player ships are placed.
    pub fn start_battle<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, BoardError> {
        if !self.in_placement() || !self.state.player_board.is_complete() {
            return Ok(Vec::new());
        }
        let mut opponent = Board::new();
        opponent.auto_place(rng)?;
        self.state.player_board.clear_shots();
        self.state.opponent_board = opponent;
        self.state.screen = Screen::Battle;
        self.state.turn = Side::Player;
        self.state.shot_count = 0;
        self.state.outcome = Outcome::InProgress;
        self.draft = None;
        log::info!("battle started");
        Ok(vec![GameEvent::BattleStarted])
    }

    /// Player fires at `coord` on the opponent board.
    ///
    /// Ignored outside the battle, on the opponent's turn, after the game is
    /// over, and for cells already fired upon.
    pub fn fire(&mut self, coord: Coord) -> Vec<GameEvent> {
        if self.phase() != Phase::Battle || self.state.turn != Side::Player {
            return Vec::new();
        }
        let outcome = match self.state.opponent_board.receive_shot(coord) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("ignoring shot: {}", err);
                return Vec::new();
            }
        };
        self.state.shot_count += 1;
        log::debug!("player fires at {}: {:?}", coord, outcome);
        let mut events = vec![GameEvent::ShotResolved {
            by: Side::Player,
            at: coord,
            outcome,
        }];
        if self.state.opponent_board.is_fleet_sunk() {
            self.state.outcome = Outcome::PlayerWon;
            log::info!("player won after {} shots", self.state.shot_count);
            events.push(GameEvent::GameOver {
                winner: Side::Player,
            });
        } else {
            self.state.turn = Side::Opponent;
            events.push(GameEvent::TurnPassed(Side::Opponent));
            events.push(GameEvent::OpponentTurnScheduled(self.ticket()));
        }
        events
    }

    /// Resolve the opponent's shot for `ticket`.
    ///
    /// Tickets from an earlier epoch are discarded, as is any ticket when it
    /// is not the opponent's turn.
    pub fn resolve_opponent_turn<R: Rng + ?Sized>(
        &mut self,
        ticket: TurnTicket,
        rng: &mut R,
    ) -> Vec<GameEvent> {
        if ticket.epoch != self.epoch {
            log::debug!(
                "discarding stale opponent turn (epoch {} != {})",
                ticket.epoch,
                self.epoch
            );
            return Vec::new();
        }
        if self.phase() != Phase::Battle || self.state.turn != Side::Opponent {
            return Vec::new();
        }
        let target = ai::select_target(rng, &self.state.player_board.shots_received());
        let outcome = match self.state.player_board.receive_shot(target) {
            Ok(outcome) => outcome,
            Err(err) => {
                // targeting budget ran out on a cell that was already shot
                log::warn!("opponent shot wasted: {}", err);
                self.state.turn = Side::Player;
                return vec![GameEvent::TurnPassed(Side::Player)];
            }
        };
        log::debug!("opponent fires at {}: {:?}", target, outcome);
        let mut events = vec![GameEvent::ShotResolved {
            by: Side::Opponent,
            at: target,
            outcome,
        }];
        if self.state.player_board.is_fleet_sunk() {
            self.state.outcome = Outcome::OpponentWon;
            log::info!("opponent won");
            events.push(GameEvent::GameOver {
                winner: Side::Opponent,
            });
        } else {
            self.state.turn = Side::Player;
            events.push(GameEvent::TurnPassed(Side::Player));
        }
        events
    }

    /// Leave the battle and go back to placement, keeping the player's ship
    /// positions. The battle in progress is discarded.
    pub fn return_to_placement(&mut self) -> Vec<GameEvent> {
        if self.state.screen == Screen::Placement {
            return Vec::new();
        }
        self.state.player_board.clear_shots();
        self.state.opponent_board = Board::new();
        self.state.screen = Screen::Placement;
        self.state.turn = Side::Player;
        self.state.shot_count = 0;
        self.state.outcome = Outcome::InProgress;
        self.selected = self.state.player_board.first_unplaced();
        self.draft = None;
        self.epoch = self.epoch.wrapping_add(1);
        vec![GameEvent::ReturnedToPlacement]
    }

    /// Start a brand new game.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        let epoch = self.epoch.wrapping_add(1);
        *self = Self::new();
        self.epoch = epoch;
        log::info!("new game");
        vec![GameEvent::Reset]
    }
}
