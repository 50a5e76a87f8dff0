#![cfg(feature = "std")]

//! Orchestration around the engine: commands from a front end, delayed
//! opponent turns and autosave.

use rand::rngs::SmallRng;

use crate::{
    common::Coord,
    config::Settings,
    game::{GameEngine, GameEvent, TurnTicket},
    persistence,
    scheduler::TurnScheduler,
    ship::ShipKind,
    store::SaveStore,
};

/// Requests a front end can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(ShipKind),
    Rotate,
    Preview(Coord),
    /// Preview on first tap, commit on a second tap at the same cell.
    Tap(Coord),
    Commit,
    Clear,
    AutoPlace,
    StartBattle,
    Fire(Coord),
    BackToPlacement,
    Reset,
}

/// A running game bound to a save store.
pub struct Session<S: SaveStore> {
    engine: GameEngine,
    rng: SmallRng,
    store: S,
    scheduler: TurnScheduler,
}

impl<S: SaveStore> Session<S> {
    /// Wrap an existing engine. Any opponent turn it still owes is scheduled.
    pub fn new(engine: GameEngine, rng: SmallRng, store: S, scheduler: TurnScheduler) -> Self {
        let session = Self {
            engine,
            rng,
            store,
            scheduler,
        };
        if let Some(ticket) = session.engine.pending_opponent_turn() {
            session.scheduler.schedule(ticket);
        }
        session
    }

    /// Resume the game saved in `store`, or start a fresh one.
    pub async fn open(mut store: S, settings: &Settings) -> Self {
        let state = persistence::load_or_new(&mut store).await;
        Self::new(
            GameEngine::from_state(state),
            settings.rng(),
            store,
            TurnScheduler::new(settings.opponent_delay),
        )
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one command. Events are empty when the command was ignored.
    pub async fn apply(&mut self, command: Command) -> anyhow::Result<Vec<GameEvent>> {
        let events = match command {
            Command::Select(kind) => self.engine.select_ship(kind),
            Command::Rotate => self.engine.rotate(),
            Command::Preview(at) => self.engine.preview_placement(at),
            Command::Tap(at) => self.engine.tap_placement(at),
            Command::Commit => self.engine.commit_placement(),
            Command::Clear => self.engine.clear_placement(),
            Command::AutoPlace => self.engine.auto_place_player(&mut self.rng)?,
            Command::StartBattle => self.engine.start_battle(&mut self.rng)?,
            Command::Fire(at) => self.engine.fire(at),
            Command::BackToPlacement => self.engine.return_to_placement(),
            Command::Reset => self.engine.reset(),
        };
        for event in &events {
            if let GameEvent::OpponentTurnScheduled(ticket) = event {
                self.scheduler.schedule(*ticket);
            }
        }
        if changes_saved_state(&events) {
            self.persist().await;
        }
        Ok(events)
    }

    /// Wait until an opponent turn is due. Cancel safe; pass the ticket to
    /// [`Session::resolve_opponent_turn`].
    pub async fn opponent_turn_due(&mut self) -> TurnTicket {
        self.scheduler.next_due().await
    }

    /// Resolve a due opponent turn. Stale tickets yield no events.
    pub async fn resolve_opponent_turn(&mut self, ticket: TurnTicket) -> Vec<GameEvent> {
        let events = self.engine.resolve_opponent_turn(ticket, &mut self.rng);
        if changes_saved_state(&events) {
            self.persist().await;
        }
        events
    }

    /// Wait for the next due opponent turn and resolve it.
    pub async fn play_opponent_turn(&mut self) -> Vec<GameEvent> {
        let ticket = self.opponent_turn_due().await;
        self.resolve_opponent_turn(ticket).await
    }

    /// Save now. Failures are logged and the game carries on in memory.
    pub async fn persist(&mut self) {
        if let Err(err) = persistence::save(&mut self.store, self.engine.state()).await {
            log::warn!("could not save game: {:#}", err);
        }
    }
}

/// Draft and selection changes live only in memory.
fn changes_saved_state(events: &[GameEvent]) -> bool {
    events.iter().any(|event| {
        !matches!(
            event,
            GameEvent::ShipSelected(_)
                | GameEvent::Rotated(_)
                | GameEvent::DraftUpdated { .. }
                | GameEvent::DraftCleared
        )
    })
}
