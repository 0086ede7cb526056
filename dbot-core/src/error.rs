//! Error types for the bot core.
//!
//! [`DbotError`] is the single error type handlers and bots return.

use thiserror::Error;

/// Top-level error for the bot: transport failures and console IO.
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
