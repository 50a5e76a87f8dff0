#[cfg(feature = "std")]
mod cli_tests {
    use battleship_solo::session::Command;
    use battleship_solo::terminal::{describe, parse_coord, parse_input, render, Input};
    use battleship_solo::{
        Coord, GameEngine, GameEvent, Orientation, Phase, ShipKind, ShotOutcome, Side,
    };
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("A1"), Ok(Coord::new(0, 0)));
        assert_eq!(parse_coord("c5"), Ok(Coord::new(4, 2)));
        assert_eq!(parse_coord(" H8 "), Ok(Coord::new(7, 7)));
        for bad in ["", "I1", "A0", "A9", "1A", "Ax", "A"] {
            assert!(parse_coord(bad).is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_bare_cell_depends_on_phase() {
        assert_eq!(
            parse_input("C5", Phase::Placement),
            Ok(Input::Command(Command::Tap(Coord::new(4, 2))))
        );
        assert_eq!(
            parse_input("C5", Phase::Battle),
            Ok(Input::Command(Command::Fire(Coord::new(4, 2))))
        );
    }

    #[test]
    fn test_parse_words() {
        let phase = Phase::Placement;
        assert_eq!(parse_input("", phase), Ok(Input::Show));
        assert_eq!(parse_input("q", phase), Ok(Input::Quit));
        assert_eq!(parse_input("HELP", phase), Ok(Input::Help));
        assert_eq!(parse_input("R", phase), Ok(Input::Command(Command::Rotate)));
        assert_eq!(parse_input("place", phase), Ok(Input::Command(Command::Commit)));
        assert_eq!(parse_input("auto", phase), Ok(Input::Command(Command::AutoPlace)));
        assert_eq!(parse_input("start", phase), Ok(Input::Command(Command::StartBattle)));
        assert_eq!(parse_input("new", phase), Ok(Input::Command(Command::Reset)));
        assert_eq!(
            parse_input("ship cruiser", phase),
            Ok(Input::Command(Command::Select(ShipKind::Cruiser)))
        );
        assert!(parse_input("ship", phase).is_err());
        assert!(parse_input("ship yacht", phase).is_err());
        assert!(parse_input("fire!", phase).is_err());
    }

    #[test]
    fn test_render_placement_draft() {
        let mut engine = GameEngine::new();
        let text = render(&engine);
        assert!(text.contains("Your Fleet"));
        assert!(text.contains("Battleship(4) selected"));
        assert!(text.contains("Orientation: H"));

        engine.preview_placement(Coord::new(0, 0));
        assert!(render(&engine).contains("   1 + + + + . . . ."));

        engine.preview_placement(Coord::new(0, 5));
        assert!(render(&engine).contains("   1 . . . . . ! ! !"));

        engine.rotate();
        engine.preview_placement(Coord::new(0, 0));
        engine.commit_placement();
        let text = render(&engine);
        assert!(text.contains("   1 S . . . . . . ."));
        assert!(text.contains("Battleship(4) placed"));
        assert!(text.contains("Cruiser(3) selected"));
        assert_eq!(engine.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_render_battle_hides_enemy_fleet() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut engine = GameEngine::new();
        engine.auto_place_player(&mut rng).unwrap();
        engine.start_battle(&mut rng).unwrap();
        let text = render(&engine);
        assert!(text.contains("Enemy Waters"));
        assert!(text.contains("Your turn  Shots: 0"));
        let enemy = text.split("Enemy Waters").nth(1).unwrap();
        let grid: String = enemy.lines().skip(2).take(8).collect();
        assert!(!grid.contains('S'));
    }

    #[test]
    fn test_describe_events() {
        let shot = GameEvent::ShotResolved {
            by: Side::Player,
            at: Coord::new(4, 2),
            outcome: ShotOutcome::Miss,
        };
        assert_eq!(describe(&shot).as_deref(), Some("You fire at C5: miss"));
        let sunk = GameEvent::ShotResolved {
            by: Side::Opponent,
            at: Coord::new(0, 0),
            outcome: ShotOutcome::Sunk {
                kind: ShipKind::Submarine,
                cells: vec![Coord::new(0, 0)],
            },
        };
        assert_eq!(
            describe(&sunk).as_deref(),
            Some("Enemy fires at A1: Submarine sunk!")
        );
        assert_eq!(
            describe(&GameEvent::GameOver { winner: Side::Player }).as_deref(),
            Some("Victory!")
        );
        assert_eq!(describe(&GameEvent::DraftCleared), None);
        assert_eq!(
            describe(&GameEvent::DraftUpdated {
                cells: vec![],
                valid: true
            }),
            None
        );
    }
}
