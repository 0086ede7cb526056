//! Wiring: build the session store and handler chain, then run over Telegram or the console.

use std::sync::Arc;

use anyhow::Result;
use chess_handlers::{ChessHandler, LoggingHandler, MoveHandler};
use chess_session::{CozyEngine, RulesEngine, SessionStore};
use dbot_core::{init_console_tracing, init_tracing, Bot};
use dbot_telegram::{bot_username, run_repl, TelegramBotAdapter};
use handler_chain::HandlerChain;
use tokio::io::BufReader;
use tracing::{info, instrument};

use crate::config::{BotConfig, ChessConfig};
use crate::console::{run_console_conversation, ConsoleBot};

/// Logging first, then the chess handler that replies through `bot`. With `bot_username`, group
/// commands addressed to other bots are left alone.
pub fn build_handler_chain<E: RulesEngine>(
    bot: Arc<dyn Bot>,
    store: Arc<SessionStore<E>>,
    chess: &ChessConfig,
    bot_username: Option<String>,
) -> HandlerChain {
    let moves = MoveHandler::new(store).with_webapp_url(chess.webapp_url.clone());
    let mut chess_handler = ChessHandler::new(bot, moves);
    if let Some(username) = bot_username {
        chess_handler = chess_handler.with_bot_username(username);
    }
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(chess_handler))
}

fn new_store(chess: &ChessConfig) -> Arc<SessionStore<CozyEngine>> {
    Arc::new(SessionStore::new(CozyEngine::new(), chess.game_over_policy))
}

/// Main entry for `chess-bot run`: init logging, build the chain, long-poll Telegram.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(&config.telegram.log_file)?;

    let teloxide_bot = config.telegram.build_bot();
    let username = bot_username(&teloxide_bot).await;
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let chain = build_handler_chain(adapter, new_store(&config.chess), &config.chess, username);

    info!(
        log_file = %config.telegram.log_file,
        game_over_policy = ?config.chess.game_over_policy,
        custom_api_url = config.telegram.telegram_api_url.is_some(),
        "Bot started"
    );

    run_repl(teloxide_bot, chain).await
}

/// Entry for `chess-bot play`: one conversation on stdin/stdout.
pub async fn run_console(chess: ChessConfig) -> Result<()> {
    init_console_tracing()?;

    let bot: Arc<dyn Bot> = Arc::new(ConsoleBot::new(std::io::stdout()));
    let chain = build_handler_chain(bot, new_store(&chess), &chess, None);

    println!("Type /play to start, moves like e2e4, /quit to exit.\n");
    let handled = run_console_conversation(BufReader::new(tokio::io::stdin()), &chain).await?;
    info!(handled = handled, "Console session finished");
    Ok(())
}
