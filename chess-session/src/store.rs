//! In-memory map of conversation id → [`Session`], with one lock per conversation.
//!
//! The outer map lock is held only long enough to find or insert a session. Each session sits
//! behind its own `tokio::sync::Mutex`, so events for one conversation run one at a time while
//! different conversations proceed in parallel.
//!
//! Nothing expires on its own: a session stays until [`SessionStore::close`] or process exit.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};

use crate::engine::RulesEngine;
use crate::parser::{parse_move, MoveDescriptor};
use crate::session::{
    ConversationId, GameOverPolicy, GameStatus, Notification, Session, SessionError, SessionView,
};

type SharedSession<E> = Arc<Mutex<Session<E>>>;

pub struct SessionStore<E: RulesEngine> {
    engine: Arc<E>,
    policy: GameOverPolicy,
    sessions: RwLock<HashMap<ConversationId, SharedSession<E>>>,
}

impl<E: RulesEngine> SessionStore<E> {
    pub fn new(engine: E, policy: GameOverPolicy) -> Self {
        Self {
            engine: Arc::new(engine),
            policy,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn policy(&self) -> GameOverPolicy {
        self.policy
    }

    /// Number of conversations that have a session.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn existing(&self, id: ConversationId) -> Option<SharedSession<E>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Returns the session for `id`, creating a fresh game if there is none.
    async fn session(&self, id: ConversationId) -> SharedSession<E> {
        if let Some(session) = self.existing(id).await {
            return session;
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id)
            .or_insert_with(|| {
                debug!(conversation_id = id, "Creating session");
                Arc::new(Mutex::new(Session::new(id, &self.engine)))
            })
            .clone()
    }

    /// `NewGame` for one conversation; creates the session if needed.
    #[instrument(skip(self))]
    pub async fn new_game(&self, id: ConversationId) -> Notification {
        let session = self.session(id).await;
        let mut session = session.lock().await;
        info!(conversation_id = id, "New game");
        session.new_game(&self.engine)
    }

    /// `SubmitMove` for one conversation; a missing session is created lazily.
    #[instrument(skip(self, mv), fields(mv = %mv))]
    pub async fn submit_move(
        &self,
        id: ConversationId,
        mv: MoveDescriptor,
    ) -> Result<Notification, SessionError> {
        let session = self.session(id).await;
        let mut session = session.lock().await;
        let result = session.submit_move(&self.engine, &mv, self.policy);
        match &result {
            Ok(note) => debug!(conversation_id = id, notification = ?note, "Move applied"),
            Err(e) => debug!(conversation_id = id, error = %e, "Move rejected"),
        }
        result
    }

    /// Parses `text` and submits it. A parse failure returns before any session is looked up.
    pub async fn submit_text(
        &self,
        id: ConversationId,
        text: &str,
    ) -> Result<Notification, SessionError> {
        let mv = parse_move(text)?;
        self.submit_move(id, mv).await
    }

    /// Drops the conversation's session. Returns whether there was one.
    #[instrument(skip(self))]
    pub async fn close(&self, id: ConversationId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(conversation_id = id, "Closed session");
        }
        removed
    }

    /// Current state of a conversation's game, without creating one.
    pub async fn view(&self, id: ConversationId) -> Option<SessionView> {
        let session = self.existing(id).await?;
        let session = session.lock().await;
        Some(session.view(&self.engine))
    }

    pub async fn status(&self, id: ConversationId) -> Option<GameStatus> {
        let session = self.existing(id).await?;
        let status = session.lock().await.status();
        Some(status)
    }

    /// Clone of the conversation's current position.
    pub async fn position(&self, id: ConversationId) -> Option<E::Position> {
        let session = self.existing(id).await?;
        let position = session.lock().await.position().clone();
        Some(position)
    }
}
