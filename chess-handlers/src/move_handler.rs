//! Transport-free routing: (conversation id, text) → reply text.

use std::sync::Arc;

use chess_session::{ConversationId, Notification, RulesEngine, SessionError, SessionStore};
use tracing::{debug, error, info, instrument};

use crate::command::ChatCommand;
use crate::replies;

/// Routes commands and moves to the [`SessionStore`] and renders every outcome as one reply.
/// Every failure is answered here; nothing escapes as an error.
pub struct MoveHandler<E: RulesEngine> {
    store: Arc<SessionStore<E>>,
    webapp_url: String,
}

impl<E: RulesEngine> MoveHandler<E> {
    pub fn new(store: Arc<SessionStore<E>>) -> Self {
        Self {
            store,
            webapp_url: replies::DEFAULT_WEBAPP_URL.to_string(),
        }
    }

    /// Link shown by `/start`.
    pub fn with_webapp_url(mut self, url: impl Into<String>) -> Self {
        self.webapp_url = url.into();
        self
    }

    pub fn store(&self) -> &Arc<SessionStore<E>> {
        &self.store
    }

    #[instrument(skip(self, text))]
    pub async fn respond(&self, conversation: ConversationId, text: &str) -> String {
        match ChatCommand::parse(text) {
            ChatCommand::Start => replies::welcome(&self.webapp_url),
            ChatCommand::Help => replies::MSG_HELP.to_string(),
            ChatCommand::Unknown(name) => {
                debug!(command = %name, "Unknown command");
                replies::MSG_HELP.to_string()
            }
            ChatCommand::Play => {
                let note = self.store.new_game(conversation).await;
                render_notification(&note)
            }
            ChatCommand::Board => match self.store.view(conversation).await {
                Some(view) => replies::board(&view),
                None => replies::MSG_NO_GAME.to_string(),
            },
            ChatCommand::Stop => {
                if self.store.close(conversation).await {
                    replies::MSG_GAME_CLOSED.to_string()
                } else {
                    replies::MSG_NO_GAME.to_string()
                }
            }
            ChatCommand::Move(candidate) => {
                match self.store.submit_text(conversation, candidate).await {
                    Ok(note) => {
                        if let Notification::GameOver { status, .. } = &note {
                            info!(status = %status, "Game finished");
                        }
                        render_notification(&note)
                    }
                    Err(e) => render_error(&e),
                }
            }
        }
    }
}

fn render_notification(note: &Notification) -> String {
    match note {
        Notification::GameStarted { board } => replies::game_started(board),
        Notification::MoveAccepted { mv, board } => replies::move_accepted(mv, board),
        Notification::GameOver {
            mv,
            board,
            status,
            next_game_started,
        } => replies::game_over(mv, board, *status, *next_game_started),
    }
}

fn render_error(err: &SessionError) -> String {
    match err {
        SessionError::Parse(e) => {
            debug!(error = %e, "Malformed move");
            replies::MSG_PARSE_ERROR.to_string()
        }
        SessionError::IllegalMove(mv) => {
            debug!(mv = %mv, "Illegal move");
            replies::MSG_ILLEGAL_MOVE.to_string()
        }
        SessionError::GameAlreadyOver(status) => replies::game_already_over(*status),
        SessionError::Engine(e) => {
            error!(error = %e, "Rules engine failure");
            replies::MSG_ENGINE_FAILURE.to_string()
        }
    }
}
