//! The contract a chess rules engine fulfils for game sessions.
//!
//! Sessions never look inside a [`RulesEngine::Position`]; they hand it to the engine and get a
//! replacement back.

use thiserror::Error;

use crate::parser::MoveDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `apply` was called with a move `is_legal` rejects.
    #[error("move {0} is not legal in the current position")]
    IllegalPrecondition(MoveDescriptor),

    #[error("rules engine failure: {0}")]
    Internal(String),
}

/// Legality, move application and terminal-state detection for one chess variant.
pub trait RulesEngine: Send + Sync + 'static {
    type Position: Clone + Send + Sync + 'static;

    /// The standard starting arrangement.
    fn initial_position(&self) -> Self::Position;

    fn is_legal(&self, position: &Self::Position, mv: &MoveDescriptor) -> bool;

    /// Returns the position after `mv`. Only defined for moves `is_legal` accepts.
    fn apply(
        &self,
        position: &Self::Position,
        mv: &MoveDescriptor,
    ) -> Result<Self::Position, EngineError>;

    /// True when the side to move is checkmated.
    fn is_checkmate(&self, position: &Self::Position) -> bool;

    /// True for any drawn terminal position that is not checkmate.
    fn is_draw(&self, position: &Self::Position) -> bool;

    /// Human-readable text rendering of the board.
    fn render(&self, position: &Self::Position) -> String;
}
