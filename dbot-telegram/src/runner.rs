//! REPL runner: converts teloxide messages to core::Message and passes them to the HandlerChain.
//!
//! teloxide's dispatcher delivers updates of one chat in order and different chats concurrently;
//! the chain is awaited inside the update handler so that ordering carries through to the game.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Asks Telegram for the bot's own username. `None` when `get_me` fails or the bot has none.
pub async fn bot_username(bot: &teloxide::Bot) -> Option<String> {
    match bot.get_me().await {
        Ok(me) => {
            info!(username = %me.user.username.as_deref().unwrap_or("unknown"), "Bot connected");
            me.user.username.clone()
        }
        Err(e) => {
            error!(error = %e, "get_me failed; continuing with polling");
            None
        }
    }
}

/// Starts long polling with the given teloxide Bot; every text message goes through `handler_chain`.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    info!(handlers = handler_chain.len(), "Starting long polling");
    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            if msg.text().is_none() {
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    "Ignoring non-text message"
                );
                return Ok(());
            }

            if let Err(e) = chain.handle(&core_msg).await {
                error!(
                    error = %e,
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    "Handler chain failed"
                );
            }
            Ok(())
        }
    })
    .await;

    Ok(())
}
