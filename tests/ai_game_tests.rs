use battleship_solo::sim::{autoplay, simulate};
use battleship_solo::{select_target, Cells, Coord, Outcome, Side, TOTAL_SHIP_CELLS};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_simulated_games_finish() {
    for seed in 0..20 {
        let summary = simulate(seed).unwrap();
        let winner = summary.winner.expect("every game has a winner");
        assert!(summary.player_shots as usize <= 64);
        assert!(summary.opponent_shots <= summary.player_shots as usize);
        match winner {
            Side::Player => assert!(summary.player_shots as usize >= TOTAL_SHIP_CELLS),
            Side::Opponent => assert!(summary.opponent_shots >= TOTAL_SHIP_CELLS),
        }
    }
}

#[test]
fn test_simulation_is_reproducible() {
    assert_eq!(simulate(42).unwrap(), simulate(42).unwrap());
}

#[test]
fn test_autoplay_sinks_the_losing_fleet() {
    let mut rng = SmallRng::seed_from_u64(123);
    let engine = autoplay(&mut rng).unwrap();
    match engine.outcome() {
        Outcome::PlayerWon => assert!(engine.opponent_board().is_fleet_sunk()),
        Outcome::OpponentWon => assert!(engine.player_board().is_fleet_sunk()),
        Outcome::InProgress => panic!("autoplay returned an unfinished game"),
    }
    assert_eq!(
        engine.shot_count() as usize,
        engine.opponent_board().shots_received().len()
    );
}

#[test]
fn test_select_target_on_empty_board() {
    let mut rng = SmallRng::seed_from_u64(5);
    let shots = Cells::new();
    for _ in 0..100 {
        assert!(select_target(&mut rng, &shots).in_bounds());
    }
}

#[test]
fn test_select_target_gives_up_on_full_board() {
    let mut rng = SmallRng::seed_from_u64(6);
    let shots = Cells::from_cells(Coord::all()).unwrap();
    let target = select_target(&mut rng, &shots);
    assert!(target.in_bounds());
    assert!(shots.contains(target));
}
