//! Self-playing games where the player side also fires at random.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{
    ai,
    common::BoardError,
    game::{GameEngine, GameEvent, Phase, Side},
};

/// How a simulated game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSummary {
    pub winner: Option<Side>,
    pub player_shots: u32,
    pub opponent_shots: usize,
}

impl From<&GameEngine> for SimSummary {
    fn from(engine: &GameEngine) -> Self {
        SimSummary {
            winner: engine.outcome().winner(),
            player_shots: engine.shot_count(),
            opponent_shots: engine.player_board().shots_received().len(),
        }
    }
}

/// Auto-place both fleets and play until one is sunk, resolving each
/// opponent turn immediately.
pub fn autoplay<R: Rng + ?Sized>(rng: &mut R) -> Result<GameEngine, BoardError> {
    let mut engine = GameEngine::new();
    engine.auto_place_player(rng)?;
    engine.start_battle(rng)?;
    while engine.phase() == Phase::Battle {
        let target = ai::select_target(rng, &engine.opponent_board().shots_received());
        for event in engine.fire(target) {
            if let GameEvent::OpponentTurnScheduled(ticket) = event {
                engine.resolve_opponent_turn(ticket, rng);
            }
        }
    }
    Ok(engine)
}

/// Play one seeded game.
pub fn simulate(seed: u64) -> Result<SimSummary, BoardError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let engine = autoplay(&mut rng)?;
    Ok(SimSummary::from(&engine))
}
