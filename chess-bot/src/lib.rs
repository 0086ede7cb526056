//! # chess-bot
//!
//! Binary support: CLI parsing, config loading, handler-chain wiring, and the console conversation.

pub mod app;
pub mod cli;
pub mod config;
pub mod console;

pub use app::{build_handler_chain, run_bot, run_console};
pub use cli::{Cli, Commands};
pub use config::{BotConfig, ChessConfig};
