use battleship_solo::{select_target, Coord, GameEngine, GameEvent, Phase, Side};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// A battle played for a random number of player shots (some of them
/// repeats), resolving each opponent turn right away.
fn random_battle(seed: u64) -> (GameEngine, u32) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new();
    engine.auto_place_player(&mut rng).unwrap();
    engine.start_battle(&mut rng).unwrap();

    let mut legal_shots = 0;
    let attempts = rng.random_range(0..80);
    for _ in 0..attempts {
        let at = Coord::new(rng.random_range(0..8), rng.random_range(0..8));
        let events = engine.fire(at);
        if !events.is_empty() {
            legal_shots += 1;
        }
        for event in events {
            if let GameEvent::OpponentTurnScheduled(ticket) = event {
                engine.resolve_opponent_turn(ticket, &mut rng);
            }
        }
        if engine.phase() != Phase::Battle {
            break;
        }
    }
    (engine, legal_shots)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn shot_count_counts_only_legal_player_shots(seed in any::<u64>()) {
        let (engine, legal) = random_battle(seed);
        prop_assert_eq!(engine.shot_count(), legal);
        prop_assert_eq!(engine.opponent_board().shots_received().len() as u32, legal);
    }

    #[test]
    fn battle_invariants_hold(seed in any::<u64>()) {
        let (engine, _) = random_battle(seed);
        for board in [engine.player_board(), engine.opponent_board()] {
            prop_assert!(board.is_complete());
            let mut cells = 0;
            for ship in board.ships() {
                // hits are exactly the shots that landed on the ship
                prop_assert_eq!(ship.hits(), board.shots_received() & ship.mask());
                cells += ship.mask().len();
            }
            prop_assert_eq!(board.occupied_cells().len(), cells);
        }
        match engine.phase() {
            Phase::GameOver(Side::Player) => prop_assert!(engine.opponent_board().is_fleet_sunk()),
            Phase::GameOver(Side::Opponent) => prop_assert!(engine.player_board().is_fleet_sunk()),
            Phase::Battle => {
                prop_assert!(!engine.opponent_board().is_fleet_sunk());
                prop_assert!(!engine.player_board().is_fleet_sunk());
                prop_assert_eq!(engine.turn(), Side::Player);
            }
            Phase::Placement => prop_assert!(false, "battle never returns to placement on its own"),
        }
    }

    #[test]
    fn repeat_fire_changes_nothing(seed in any::<u64>()) {
        let (mut engine, _) = random_battle(seed);
        let shot = engine.opponent_board().shots_received().iter().next();
        if let Some(at) = shot {
            let before = engine.state().clone();
            prop_assert!(engine.fire(at).is_empty());
            prop_assert_eq!(engine.state(), &before);
        }
    }

    #[test]
    fn opponent_targets_avoid_previous_shots(seed in any::<u64>(), taken in 0usize..60) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let shots = battleship_solo::Cells::from_cells(Coord::all().take(taken)).unwrap();
        let target = select_target(&mut rng, &shots);
        prop_assert!(target.in_bounds());
        prop_assert!(!shots.contains(target));
    }
}
