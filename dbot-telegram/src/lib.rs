//! # dbot-telegram
//!
//! Telegram transport layer: adapters from teloxide types, the [`dbot_core::Bot`] implementation,
//! minimal config, and the REPL runner that feeds each update to a [`handler_chain::HandlerChain`].
//! No game logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::{bot_username, run_repl};
