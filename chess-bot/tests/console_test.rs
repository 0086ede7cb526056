//! Integration tests: the full chain driven through the console conversation.

use std::sync::Arc;

use chess_bot::console::{run_console_conversation, ConsoleBot};
use chess_bot::{build_handler_chain, ChessConfig};
use chess_handlers::replies;
use chess_session::{CozyEngine, GameOverPolicy, GameStatus, SessionStore};

fn setup(
    policy: GameOverPolicy,
) -> (
    Arc<ConsoleBot<Vec<u8>>>,
    Arc<SessionStore<CozyEngine>>,
    handler_chain::HandlerChain,
) {
    let chess = ChessConfig {
        game_over_policy: policy,
        webapp_url: "https://example.org/chess".to_string(),
    };
    let bot = Arc::new(ConsoleBot::new(Vec::new()));
    let store = Arc::new(SessionStore::new(CozyEngine::new(), chess.game_over_policy));
    let chain = build_handler_chain(bot.clone(), store.clone(), &chess, None);
    (bot, store, chain)
}

fn output(bot: &ConsoleBot<Vec<u8>>) -> String {
    String::from_utf8(bot.take_output()).unwrap()
}

/// **Test: a scripted game prints one reply block per line and stops at /quit.**
#[tokio::test]
async fn test_scripted_conversation() {
    let (bot, store, chain) = setup(GameOverPolicy::AwaitNewGame);
    let script: &[u8] = b"/start\n/play\ne2e4\nxyz1\ne7e5\n/quit\nd2d4\n";

    let handled = run_console_conversation(script, &chain).await.unwrap();

    assert_eq!(handled, 5);
    let out = output(&bot);
    assert!(out.contains("https://example.org/chess"));
    assert!(out.contains("Game started!"));
    assert!(out.contains("Move accepted: e2e4"));
    assert!(out.contains(replies::MSG_PARSE_ERROR));
    assert!(out.contains("Move accepted: e7e5"));
    assert!(!out.contains("d2d4"));
    assert_eq!(store.view(0).await.unwrap().moves_played, 2);
}

/// **Test: fool's mate over the console ends in checkmate and waits for /play.**
#[tokio::test]
async fn test_console_checkmate() {
    let (bot, store, chain) = setup(GameOverPolicy::AwaitNewGame);
    let script: &[u8] = b"/play\nf2f3\ne7e5\ng2g4\nd8h4\ne2e4\n";

    run_console_conversation(script, &chain).await.unwrap();

    let out = output(&bot);
    assert!(out.contains("Checkmate! Game over."));
    assert!(out.contains(&replies::game_already_over(GameStatus::Checkmate)));
    assert_eq!(store.status(0).await, Some(GameStatus::Checkmate));
}
