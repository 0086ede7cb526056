//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chess-bot")]
#[command(about = "Telegram chess bot: relay e2e4-style moves to a rules engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Play one game in the terminal: each stdin line is a message, replies go to stdout.
    Play,
}
