//! The chain handler that answers chess commands and moves.

use std::sync::Arc;

use async_trait::async_trait;
use chess_session::RulesEngine;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

use crate::command::ChatCommand;
use crate::move_handler::MoveHandler;

/// Answers every text message in the chat it came from. Returns `Reply(text)` with what was sent;
/// empty messages and commands addressed to another bot (`/play@other_bot`) are ignored.
pub struct ChessHandler<E: RulesEngine> {
    bot: Arc<dyn Bot>,
    moves: MoveHandler<E>,
    bot_username: Option<String>,
}

impl<E: RulesEngine> ChessHandler<E> {
    pub fn new(bot: Arc<dyn Bot>, moves: MoveHandler<E>) -> Self {
        Self {
            bot,
            moves,
            bot_username: None,
        }
    }

    /// Own username, without `@`. Without it every `@botname` suffix is accepted.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    fn addressed_elsewhere(&self, text: &str) -> bool {
        match (self.bot_username.as_deref(), ChatCommand::addressee(text)) {
            (Some(own), Some(target)) => !target.eq_ignore_ascii_case(own),
            _ => false,
        }
    }
}

#[async_trait]
impl<E: RulesEngine> Handler for ChessHandler<E> {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.trim().is_empty() {
            return Ok(HandlerResponse::Ignore);
        }
        if self.addressed_elsewhere(&message.content) {
            debug!(content = %message.content, "Command addressed to another bot");
            return Ok(HandlerResponse::Ignore);
        }

        let reply = self.moves.respond(message.chat.id, &message.content).await;
        self.bot.reply_to(message, &reply).await?;
        info!(
            user_id = message.user.id,
            reply_len = reply.len(),
            "Reply sent"
        );
        Ok(HandlerResponse::Reply(reply))
    }
}
