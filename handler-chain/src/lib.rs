//! # Handler chain
//!
//! Runs a sequence of handlers for each message in three phases: every `before()` in order (any
//! `false` stops the chain), `handle()` in order until one returns Stop or Reply, then every
//! `after()` in reverse order with the final response.

use dbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of handlers shared by every inbound message.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn response_type(response: &HandlerResponse) -> (&'static str, Option<usize>) {
    match response {
        HandlerResponse::Continue => ("Continue", None),
        HandlerResponse::Stop => ("Stop", None),
        HandlerResponse::Ignore => ("Ignore", None),
        HandlerResponse::Reply(s) => ("Reply", Some(s.len())),
    }
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the three phases for one message and returns the first Stop or Reply, or Continue.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(user_id = message.user.id, "step: handler_chain started");

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            if !handler.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = %handler_name,
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            let (kind, reply_len) = response_type(&response);
            debug!(
                handler = %handler_name,
                response_type = %kind,
                reply_len = ?reply_len,
                "step: handler done"
            );

            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                info!(
                    user_id = message.user.id,
                    handler = %handler_name,
                    response_type = %kind,
                    "step: handler chain stopped by handler"
                );
                final_response = response;
                break;
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(message, &final_response).await?;
        }

        info!(user_id = message.user.id, "step: handler_chain finished");
        Ok(final_response)
    }
}

// Integration tests live in tests/handler_chain_test.rs
