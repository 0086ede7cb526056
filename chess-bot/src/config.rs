//! Bot configuration, loaded from environment variables (call `dotenvy::dotenv()` first).
//!
//! - `BOT_TOKEN`, `TELEGRAM_API_URL` / `TELOXIDE_API_URL`, `LOG_FILE`: see [`TelegramConfig`].
//! - `CHESS_GAME_OVER_POLICY`: `await` (default) keeps a finished game until `/play`;
//!   `auto-reset` starts the next game right after announcing the result.
//! - `CHESS_WEBAPP_URL`: link shown by `/start`.

use anyhow::{Context, Result};
use chess_handlers::replies::DEFAULT_WEBAPP_URL;
use chess_session::GameOverPolicy;
use dbot_telegram::TelegramConfig;
use std::env;

/// Game settings shared by the Telegram and console modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessConfig {
    pub game_over_policy: GameOverPolicy,
    pub webapp_url: String,
}

impl Default for ChessConfig {
    fn default() -> Self {
        Self {
            game_over_policy: GameOverPolicy::default(),
            webapp_url: DEFAULT_WEBAPP_URL.to_string(),
        }
    }
}

impl ChessConfig {
    pub fn from_env() -> Result<Self> {
        let game_over_policy = match env::var("CHESS_GAME_OVER_POLICY") {
            Ok(value) => value
                .parse::<GameOverPolicy>()
                .map_err(anyhow::Error::msg)
                .context("Invalid CHESS_GAME_OVER_POLICY")?,
            Err(_) => GameOverPolicy::default(),
        };
        let webapp_url =
            env::var("CHESS_WEBAPP_URL").unwrap_or_else(|_| DEFAULT_WEBAPP_URL.to_string());
        Ok(Self {
            game_over_policy,
            webapp_url,
        })
    }
}

/// Everything `chess-bot run` needs.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub chess: ChessConfig,
}

impl BotConfig {
    /// Loads from env. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            telegram: TelegramConfig::from_env(token)?,
            chess: ChessConfig::from_env()?,
        })
    }
}
