//! Single-game state machine for one conversation.
//!
//! `NewGame` always lands in [`GameStatus::InProgress`] with the initial position. `SubmitMove`
//! is only accepted while in progress; it leaves the session untouched when the engine rejects the
//! move and moves to `Checkmate` or `Draw` when the engine reports a terminal position. Each
//! transition produces exactly one [`Notification`] or one [`SessionError`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::engine::{EngineError, RulesEngine};
use crate::parser::{MoveDescriptor, ParseError};

/// Conversation key; the chat id on Telegram.
pub type ConversationId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Checkmate,
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Draw => "draw",
        };
        f.write_str(s)
    }
}

/// What happens to a session once its game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOverPolicy {
    /// Stay in the terminal state until the player starts a new game.
    #[default]
    AwaitNewGame,
    /// Announce the result and immediately set up a fresh game.
    AutoReset,
}

impl FromStr for GameOverPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "await" | "await-new-game" => Ok(GameOverPolicy::AwaitNewGame),
            "auto-reset" | "reset" => Ok(GameOverPolicy::AutoReset),
            other => Err(format!(
                "unknown game over policy '{}', expected 'await' or 'auto-reset'",
                other
            )),
        }
    }
}

/// Outbound event produced by a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    GameStarted {
        board: String,
    },
    MoveAccepted {
        mv: MoveDescriptor,
        board: String,
    },
    /// The move ended the game. `board` is the final position; `next_game_started` is set when
    /// the session was already reset under [`GameOverPolicy::AutoReset`].
    GameOver {
        mv: MoveDescriptor,
        board: String,
        status: GameStatus,
        next_game_started: bool,
    },
}

/// Failures surfaced to the player as a single reply. None of them mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("malformed move: {0}")]
    Parse(#[from] ParseError),

    #[error("illegal move: {0}")]
    IllegalMove(MoveDescriptor),

    #[error("game already over ({0})")]
    GameAlreadyOver(GameStatus),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Read-only view of a session for status queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub status: GameStatus,
    pub moves_played: usize,
    pub board: String,
}

pub struct Session<E: RulesEngine> {
    conversation_id: ConversationId,
    position: E::Position,
    status: GameStatus,
    moves_played: usize,
}

impl<E: RulesEngine> Session<E> {
    pub fn new(conversation_id: ConversationId, engine: &E) -> Self {
        Self {
            conversation_id,
            position: engine.initial_position(),
            status: GameStatus::InProgress,
            moves_played: 0,
        }
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub fn position(&self) -> &E::Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    fn reset(&mut self, engine: &E) {
        self.position = engine.initial_position();
        self.status = GameStatus::InProgress;
        self.moves_played = 0;
    }

    /// `NewGame`: valid from any state.
    pub fn new_game(&mut self, engine: &E) -> Notification {
        self.reset(engine);
        Notification::GameStarted {
            board: engine.render(&self.position),
        }
    }

    /// `SubmitMove`. The position is replaced only once the engine has produced the complete
    /// successor and its terminal status.
    pub fn submit_move(
        &mut self,
        engine: &E,
        mv: &MoveDescriptor,
        policy: GameOverPolicy,
    ) -> Result<Notification, SessionError> {
        if self.status.is_over() {
            return Err(SessionError::GameAlreadyOver(self.status));
        }
        if !engine.is_legal(&self.position, mv) {
            return Err(SessionError::IllegalMove(*mv));
        }

        let next = engine.apply(&self.position, mv)?;
        let status = if engine.is_checkmate(&next) {
            GameStatus::Checkmate
        } else if engine.is_draw(&next) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };
        let board = engine.render(&next);

        self.position = next;
        self.status = status;
        self.moves_played += 1;

        if !status.is_over() {
            return Ok(Notification::MoveAccepted { mv: *mv, board });
        }

        let next_game_started = policy == GameOverPolicy::AutoReset;
        if next_game_started {
            self.reset(engine);
        }
        Ok(Notification::GameOver {
            mv: *mv,
            board,
            status,
            next_game_started,
        })
    }

    pub fn view(&self, engine: &E) -> SessionView {
        SessionView {
            status: self.status,
            moves_played: self.moves_played,
            board: engine.render(&self.position),
        }
    }
}
