//! chess-bot CLI: run the Telegram bot or play in the terminal. Config from env and optional CLI args.

use anyhow::Result;
use chess_bot::{run_bot, run_console, BotConfig, ChessConfig, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
        Commands::Play => run_console(ChessConfig::from_env()?).await,
    }
}
