//! # chess-session
//!
//! Chess games keyed by conversation: the `e2e4` move parser, the [`RulesEngine`] contract with
//! its cozy-chess implementation, the per-game [`Session`] state machine, and the concurrent
//! [`SessionStore`]. No transport or I/O; callers pass a conversation id and text, and turn the
//! returned [`Notification`] or [`SessionError`] into a reply.

pub mod cozy;
pub mod engine;
pub mod parser;
pub mod session;
pub mod store;

pub use cozy::{ChessPosition, CozyEngine};
pub use engine::{EngineError, RulesEngine};
pub use parser::{parse_move, Coordinate, MoveDescriptor, ParseError};
pub use session::{
    ConversationId, GameOverPolicy, GameStatus, Notification, Session, SessionError, SessionView,
};
pub use store::SessionStore;
