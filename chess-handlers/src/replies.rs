//! User-facing reply texts.

use chess_session::{GameStatus, MoveDescriptor, SessionView};

pub const DEFAULT_WEBAPP_URL: &str = "https://lichess.org/";

pub const MSG_HELP: &str = "Use /play to start a game. Send your moves in the e2e4 format \
(from-square then to-square); you play both sides.\n/board shows the current position, \
/stop ends the game.";
pub const MSG_PARSE_ERROR: &str = "Error! Make sure your move is in the e2e4 format.";
pub const MSG_ILLEGAL_MOVE: &str = "Illegal move. Try again.";
pub const MSG_ENGINE_FAILURE: &str =
    "Sorry, something went wrong while processing your move. Please try again.";
pub const MSG_NO_GAME: &str = "No game in progress. Send /play to start one.";
pub const MSG_GAME_CLOSED: &str = "Game closed. Send /play to start a new one.";

pub fn welcome(webapp_url: &str) -> String {
    format!(
        "Welcome! Send /play to start a chess game right here, or play in the browser: {}",
        webapp_url
    )
}

pub fn game_started(board: &str) -> String {
    format!(
        "Game started! Your move. Send your move in the e2e4 format.\n\n{}",
        board
    )
}

pub fn move_accepted(mv: &MoveDescriptor, board: &str) -> String {
    format!("Move accepted: {}\n\n{}", mv, board)
}

pub fn game_over(mv: &MoveDescriptor, board: &str, status: GameStatus, next_game_started: bool) -> String {
    let result = match status {
        GameStatus::Checkmate => "Checkmate! Game over.",
        GameStatus::Draw => "Draw! Game over.",
        GameStatus::InProgress => "Game over.",
    };
    let next = if next_game_started {
        "A new game has started. Your move."
    } else {
        "Send /play to start a new game."
    };
    format!("{}\n\n{}\n{}", move_accepted(mv, board), result, next)
}

pub fn game_already_over(status: GameStatus) -> String {
    format!(
        "This game is over ({}). Send /play to start a new game.",
        status
    )
}

pub fn board(view: &SessionView) -> String {
    format!(
        "Status: {}. Moves played: {}.\n\n{}",
        view.status, view.moves_played, view.board
    )
}
