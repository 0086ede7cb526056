//! # chess-handlers
//!
//! Glue between the handler chain and game sessions. [`MoveHandler`] turns (conversation id, text)
//! into reply text and never touches a transport; [`ChessHandler`] sits in the chain, owns the
//! [`dbot_core::Bot`] and sends that text back. [`LoggingHandler`] logs every message and response.

mod chess_handler;
mod command;
mod logging;
mod move_handler;
pub mod replies;

pub use chess_handler::ChessHandler;
pub use command::ChatCommand;
pub use logging::LoggingHandler;
pub use move_handler::MoveHandler;
