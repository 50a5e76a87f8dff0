use std::time::Duration;

use battleship_solo::{
    persistence, Command, Coord, GameEngine, GameEvent, MemoryStore, Phase, Session, Settings,
    ShipKind, Side, TurnScheduler,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::timeout;

const DELAY: Duration = Duration::from_millis(20);
const PATIENCE: Duration = Duration::from_secs(5);

fn session_with(store: MemoryStore) -> Session<MemoryStore> {
    Session::new(
        GameEngine::new(),
        SmallRng::seed_from_u64(11),
        store,
        TurnScheduler::new(DELAY),
    )
}

fn settings() -> Settings {
    Settings {
        opponent_delay: DELAY,
        seed: Some(9),
        ..Settings::default()
    }
}

async fn battle(store: MemoryStore) -> Session<MemoryStore> {
    let mut session = session_with(store);
    session.apply(Command::AutoPlace).await.unwrap();
    let events = session.apply(Command::StartBattle).await.unwrap();
    assert_eq!(events, vec![GameEvent::BattleStarted]);
    session
}

#[tokio::test]
async fn test_opponent_answers_after_delay() {
    let mut session = battle(MemoryStore::new()).await;
    let events = session.apply(Command::Fire(Coord::new(0, 0))).await.unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::OpponentTurnScheduled(_))));
    assert_eq!(session.engine().turn(), Side::Opponent);

    // the player is locked out until the opponent has moved
    let ignored = session.apply(Command::Fire(Coord::new(0, 1))).await.unwrap();
    assert!(ignored.is_empty());

    let events = timeout(PATIENCE, session.play_opponent_turn())
        .await
        .expect("opponent turn never arrived");
    assert!(matches!(
        events.first(),
        Some(GameEvent::ShotResolved {
            by: Side::Opponent,
            ..
        })
    ));
    assert_eq!(events.last(), Some(&GameEvent::TurnPassed(Side::Player)));
    assert_eq!(session.engine().player_board().shots_received().len(), 1);
    assert_eq!(session.engine().turn(), Side::Player);
}

#[tokio::test]
async fn test_reset_discards_pending_turn() {
    let mut session = battle(MemoryStore::new()).await;
    session.apply(Command::Fire(Coord::new(3, 3))).await.unwrap();
    let events = session.apply(Command::Reset).await.unwrap();
    assert_eq!(events, vec![GameEvent::Reset]);

    let late = timeout(PATIENCE, session.play_opponent_turn())
        .await
        .expect("stale ticket was still delivered");
    assert!(late.is_empty());
    assert_eq!(session.engine().phase(), Phase::Placement);
    assert!(session.engine().player_board().ships().is_empty());
}

#[tokio::test]
async fn test_back_to_placement_discards_pending_turn() {
    let mut session = battle(MemoryStore::new()).await;
    session.apply(Command::Fire(Coord::new(3, 3))).await.unwrap();
    session.apply(Command::BackToPlacement).await.unwrap();

    let late = timeout(PATIENCE, session.play_opponent_turn()).await.unwrap();
    assert!(late.is_empty());
    assert_eq!(session.engine().player_board().ships().len(), 4);
    assert!(session.engine().player_board().shots_received().is_empty());
}

#[tokio::test]
async fn test_draft_changes_are_not_saved() {
    let store = MemoryStore::new();
    let mut session = session_with(store.clone());
    session.apply(Command::Select(ShipKind::Cruiser)).await.unwrap();
    session.apply(Command::Rotate).await.unwrap();
    session.apply(Command::Preview(Coord::new(0, 0))).await.unwrap();
    assert_eq!(store.contents(), None);

    let events = session.apply(Command::Tap(Coord::new(0, 0))).await.unwrap();
    assert!(matches!(
        events.first(),
        Some(GameEvent::ShipPlaced {
            kind: ShipKind::Cruiser,
            ..
        })
    ));
    let saved = persistence::decode(&store.contents().unwrap()).unwrap();
    assert_eq!(&saved, session.engine().state());
}

#[tokio::test]
async fn test_autosave_resumes_mid_turn() {
    let store = MemoryStore::new();
    let mut session = battle(store.clone()).await;
    session.apply(Command::Fire(Coord::new(7, 7))).await.unwrap();
    let expected = session.engine().state().clone();
    drop(session);

    let mut resumed = Session::open(store.clone(), &settings()).await;
    assert_eq!(resumed.engine().state(), &expected);
    assert_eq!(resumed.engine().turn(), Side::Opponent);

    let events = timeout(PATIENCE, resumed.play_opponent_turn())
        .await
        .expect("resumed opponent turn never arrived");
    assert!(!events.is_empty());
    assert_eq!(resumed.engine().turn(), Side::Player);

    let saved = persistence::decode(&store.contents().unwrap()).unwrap();
    assert_eq!(saved.player_board.shots_received().len(), 1);
}

#[tokio::test]
async fn test_open_with_corrupt_save_starts_fresh() {
    let store = MemoryStore::with_contents(b"{\"screen\": 3}".to_vec());
    let session = Session::open(store, &settings()).await;
    assert_eq!(session.engine().phase(), Phase::Placement);
    assert_eq!(session.engine().selected_ship(), Some(ShipKind::Battleship));
}

#[tokio::test]
async fn test_failing_store_keeps_game_running() {
    let mut session = battle(MemoryStore::failing()).await;
    let events = session.apply(Command::Fire(Coord::new(2, 2))).await.unwrap();
    assert!(!events.is_empty());
    assert_eq!(session.store().contents(), None);
    let events = timeout(PATIENCE, session.play_opponent_turn()).await.unwrap();
    assert!(!events.is_empty());
}
