use battleship_solo::{cells_for, Board, Coord, Orientation, ShipKind};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Board with a random subset of the fleet placed.
fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    for kind in ShipKind::ALL {
        if rng.random_bool(0.6) {
            let (origin, orientation) = board.random_placement(&mut rng, kind).unwrap();
            board.place(kind, origin, orientation).unwrap();
        }
    }
    board
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn can_place_accepts_exactly_legal_placements(
        seed in any::<u64>(),
        kind in proptest::sample::select(ShipKind::ALL.to_vec()),
        orientation in orientation(),
        row in 0..8usize,
        col in 0..8usize,
    ) {
        let board = random_board(seed);
        let origin = Coord::new(row, col);
        let candidate = cells_for(kind, origin, orientation);
        let legal = candidate
            .iter()
            .all(|c| c.in_bounds() && !board.occupied_cells().contains(*c));
        let result = board.can_place(kind, origin, orientation);
        prop_assert_eq!(result.is_ok(), legal);
        if let Ok(cells) = result {
            prop_assert_eq!(cells, candidate);
        }
    }

    #[test]
    fn auto_place_yields_disjoint_in_bounds_fleet(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.auto_place(&mut rng).unwrap();

        prop_assert_eq!(board.ships().len(), 4);
        let mut seen = Vec::new();
        for ship in board.ships() {
            for cell in ship.cells() {
                prop_assert!(cell.in_bounds());
                prop_assert!(!seen.contains(&cell), "cell {} used twice", cell);
                seen.push(cell);
            }
        }
        let kinds: Vec<_> = board.ships().iter().map(|s| s.kind()).collect();
        prop_assert_eq!(kinds, ShipKind::ALL.to_vec());
    }

    #[test]
    fn shot_is_idempotent(seed in any::<u64>(), row in 0..8usize, col in 0..8usize) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.auto_place(&mut rng).unwrap();
        let at = Coord::new(row, col);

        board.receive_shot(at).unwrap();
        let after_first = board.clone();
        prop_assert!(board.receive_shot(at).is_err());
        prop_assert_eq!(&board, &after_first);
    }
}
