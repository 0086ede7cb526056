//! End-to-end scenarios against [`SessionStore`] with the cozy-chess engine, plus engine-contract
//! checks using instrumented engines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chess_session::{
    parse_move, ChessPosition, CozyEngine, EngineError, GameOverPolicy, GameStatus,
    MoveDescriptor, Notification, RulesEngine, SessionError, SessionStore,
};

/// Wraps [`CozyEngine`] and counts every call made through the contract.
#[derive(Default)]
struct CountingEngine {
    inner: CozyEngine,
    calls: Arc<AtomicUsize>,
}

impl CountingEngine {
    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl RulesEngine for CountingEngine {
    type Position = ChessPosition;

    fn initial_position(&self) -> ChessPosition {
        self.tick();
        self.inner.initial_position()
    }

    fn is_legal(&self, position: &ChessPosition, mv: &MoveDescriptor) -> bool {
        self.tick();
        self.inner.is_legal(position, mv)
    }

    fn apply(&self, position: &ChessPosition, mv: &MoveDescriptor) -> Result<ChessPosition, EngineError> {
        self.tick();
        self.inner.apply(position, mv)
    }

    fn is_checkmate(&self, position: &ChessPosition) -> bool {
        self.tick();
        self.inner.is_checkmate(position)
    }

    fn is_draw(&self, position: &ChessPosition) -> bool {
        self.tick();
        self.inner.is_draw(position)
    }

    fn render(&self, position: &ChessPosition) -> String {
        self.tick();
        self.inner.render(position)
    }
}

/// Accepts every move but fails to apply it.
struct BrokenEngine;

impl RulesEngine for BrokenEngine {
    type Position = u32;

    fn initial_position(&self) -> u32 {
        0
    }

    fn is_legal(&self, _position: &u32, _mv: &MoveDescriptor) -> bool {
        true
    }

    fn apply(&self, _position: &u32, _mv: &MoveDescriptor) -> Result<u32, EngineError> {
        Err(EngineError::Internal("position invariant violated".to_string()))
    }

    fn is_checkmate(&self, _position: &u32) -> bool {
        false
    }

    fn is_draw(&self, _position: &u32) -> bool {
        false
    }

    fn render(&self, position: &u32) -> String {
        position.to_string()
    }
}

fn mv(text: &str) -> MoveDescriptor {
    parse_move(text).unwrap()
}

fn cozy_store(policy: GameOverPolicy) -> SessionStore<CozyEngine> {
    SessionStore::new(CozyEngine::new(), policy)
}

/// **Scenario 1:** NewGame then e2e4 → accepted with the updated board; still in progress.
#[tokio::test]
async fn test_pawn_advance_is_accepted() {
    let store = cozy_store(GameOverPolicy::AwaitNewGame);
    store.new_game(1).await;

    let note = store.submit_text(1, "e2e4").await.unwrap();

    let engine = CozyEngine::new();
    let expected = engine.apply(&engine.initial_position(), &mv("e2e4")).unwrap();
    assert_eq!(
        note,
        Notification::MoveAccepted {
            mv: mv("e2e4"),
            board: engine.render(&expected),
        }
    );
    assert_eq!(store.status(1).await, Some(GameStatus::InProgress));
}

/// **Scenario 2:** NewGame then e2e5 → illegal, position unchanged.
#[tokio::test]
async fn test_blocked_pawn_is_rejected() {
    let store = cozy_store(GameOverPolicy::AwaitNewGame);
    store.new_game(1).await;

    let err = store.submit_text(1, "e2e5").await.unwrap_err();

    assert_eq!(err, SessionError::IllegalMove(mv("e2e5")));
    assert_eq!(store.position(1).await, Some(CozyEngine::new().initial_position()));
    assert_eq!(store.status(1).await, Some(GameStatus::InProgress));
}

/// **Scenario 3:** malformed text → parse error and the engine is never consulted.
#[tokio::test]
async fn test_malformed_text_never_reaches_engine() {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = CountingEngine {
        inner: CozyEngine::new(),
        calls: calls.clone(),
    };
    let store = SessionStore::new(engine, GameOverPolicy::AwaitNewGame);

    let err = store.submit_text(1, "xyz1").await.unwrap_err();

    assert!(matches!(err, SessionError::Parse(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(store.is_empty().await);
}

/// **Scenario 4:** fool's mate ends in Checkmate; further moves are rejected until NewGame.
#[tokio::test]
async fn test_fools_mate() {
    let store = cozy_store(GameOverPolicy::AwaitNewGame);
    store.new_game(1).await;
    for m in ["f2f3", "e7e5", "g2g4"] {
        assert!(matches!(
            store.submit_text(1, m).await.unwrap(),
            Notification::MoveAccepted { .. }
        ));
    }

    let note = store.submit_text(1, "d8h4").await.unwrap();
    assert!(matches!(
        note,
        Notification::GameOver {
            status: GameStatus::Checkmate,
            next_game_started: false,
            ..
        }
    ));
    assert_eq!(store.status(1).await, Some(GameStatus::Checkmate));

    let final_position = store.position(1).await;
    let err = store.submit_text(1, "a2a3").await.unwrap_err();
    assert_eq!(err, SessionError::GameAlreadyOver(GameStatus::Checkmate));
    assert_eq!(store.position(1).await, final_position);

    store.new_game(1).await;
    assert_eq!(store.status(1).await, Some(GameStatus::InProgress));
    assert!(store.submit_text(1, "e2e4").await.is_ok());
}

/// **Auto-reset policy:** the game-over notification is emitted and the next game is ready.
#[tokio::test]
async fn test_fools_mate_auto_reset() {
    let store = cozy_store(GameOverPolicy::AutoReset);
    for m in ["f2f3", "e7e5", "g2g4"] {
        store.submit_text(1, m).await.unwrap();
    }

    let note = store.submit_text(1, "d8h4").await.unwrap();

    assert!(matches!(
        note,
        Notification::GameOver {
            status: GameStatus::Checkmate,
            next_game_started: true,
            ..
        }
    ));
    assert_eq!(store.status(1).await, Some(GameStatus::InProgress));
    assert!(store.submit_text(1, "e2e4").await.is_ok());
}

/// Knights out and back twice; the start position occurs for the third time on the last move.
const KNIGHT_SHUFFLE: [&str; 8] = [
    "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
];

/// **Threefold repetition:** the repeating move ends the game in Draw; later moves are rejected
/// and the final position is kept until NewGame.
#[tokio::test]
async fn test_repetition_draw_blocks_moves() {
    let store = cozy_store(GameOverPolicy::AwaitNewGame);
    store.new_game(1).await;
    let (last, opening) = KNIGHT_SHUFFLE.split_last().unwrap();
    for m in opening {
        assert!(matches!(
            store.submit_text(1, m).await.unwrap(),
            Notification::MoveAccepted { .. }
        ));
    }

    let note = store.submit_text(1, last).await.unwrap();
    assert!(matches!(
        note,
        Notification::GameOver {
            status: GameStatus::Draw,
            next_game_started: false,
            ..
        }
    ));
    assert_eq!(store.status(1).await, Some(GameStatus::Draw));

    let final_position = store.position(1).await;
    let err = store.submit_text(1, "e2e4").await.unwrap_err();
    assert_eq!(err, SessionError::GameAlreadyOver(GameStatus::Draw));
    assert_eq!(store.position(1).await, final_position);
    assert_eq!(store.view(1).await.unwrap().moves_played, KNIGHT_SHUFFLE.len());

    store.new_game(1).await;
    assert_eq!(store.status(1).await, Some(GameStatus::InProgress));
    assert!(store.submit_text(1, "e2e4").await.is_ok());
}

/// **Auto-reset policy on a draw:** the draw is announced and the next game is ready.
#[tokio::test]
async fn test_repetition_draw_auto_reset() {
    let store = cozy_store(GameOverPolicy::AutoReset);
    let (last, opening) = KNIGHT_SHUFFLE.split_last().unwrap();
    for m in opening {
        store.submit_text(1, m).await.unwrap();
    }

    let note = store.submit_text(1, last).await.unwrap();

    assert!(matches!(
        note,
        Notification::GameOver {
            status: GameStatus::Draw,
            next_game_started: true,
            ..
        }
    ));
    assert_eq!(store.status(1).await, Some(GameStatus::InProgress));
    assert_eq!(store.position(1).await, Some(CozyEngine::new().initial_position()));
    assert!(store.submit_text(1, "e2e4").await.is_ok());
}

/// **Engine failure:** surfaced as a typed error; session untouched.
#[tokio::test]
async fn test_engine_failure_is_request_scoped() {
    let store = SessionStore::new(BrokenEngine, GameOverPolicy::AwaitNewGame);
    store.new_game(1).await;

    let err = store.submit_text(1, "e2e4").await.unwrap_err();

    assert!(matches!(err, SessionError::Engine(EngineError::Internal(_))));
    assert_eq!(store.position(1).await, Some(0));
    assert_eq!(store.status(1).await, Some(GameStatus::InProgress));
    assert_eq!(store.view(1).await.unwrap().moves_played, 0);
}

/// **Isolation:** concurrent games on different conversations never see each other's moves.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_conversations_are_isolated() {
    let store = Arc::new(cozy_store(GameOverPolicy::AwaitNewGame));
    let openings: Vec<(i64, [&'static str; 2])> = vec![
        (10, ["e2e4", "e7e5"]),
        (20, ["d2d4", "d7d5"]),
        (30, ["g1f3", "g8f6"]),
        (40, ["c2c4", "c7c5"]),
    ];

    let tasks: Vec<_> = openings
        .iter()
        .map(|&(id, moves)| {
            let store = store.clone();
            tokio::spawn(async move {
                for m in moves {
                    store.submit_text(id, m).await.unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let engine = CozyEngine::new();
    assert_eq!(store.len().await, openings.len());
    for (id, moves) in openings {
        let expected = moves
            .iter()
            .fold(engine.initial_position(), |pos, m| engine.apply(&pos, &mv(m)).unwrap());
        assert_eq!(store.position(id).await, Some(expected));
    }
}

/// **Serialization:** many concurrent submissions of the same move on one conversation; exactly
/// one applies and the rest are rejected as illegal for the updated position.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_conversation_is_serialized() {
    let store = Arc::new(cozy_store(GameOverPolicy::AwaitNewGame));
    store.new_game(5).await;

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.submit_text(5, "e2e4").await })
        })
        .collect();

    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert_eq!(err, SessionError::IllegalMove(mv("e2e4"))),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(store.view(5).await.unwrap().moves_played, 1);
}
