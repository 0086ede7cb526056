//! [`RulesEngine`] backed by `cozy-chess`.
//!
//! cozy-chess encodes castling as the king capturing its own rook (`e1h1`); players type the
//! king's two-square step (`e1g1`), so moves are resolved against a short list of candidates
//! before asking the board for legality. A pawn reaching the last rank is promoted to a queen
//! because the four-character move format has no room for a promotion piece.

use cozy_chess::{Board, Color, File, GameStatus, Move, Piece, Rank, Square};

use crate::engine::{EngineError, RulesEngine};
use crate::parser::{Coordinate, MoveDescriptor};

/// Number of occurrences of the same position that draws the game.
const REPETITION_LIMIT: usize = 3;
/// Half-moves without capture or pawn move that draw the game.
const FIFTY_MOVE_HALFMOVES: u8 = 100;

/// Board plus the hashes of every position since the last capture or pawn move.
#[derive(Debug, Clone)]
pub struct ChessPosition {
    board: Board,
    history: Vec<u64>,
}

impl ChessPosition {
    fn new(board: Board) -> Self {
        let history = vec![board.hash()];
        Self { board, history }
    }

    /// Builds a position from FEN. Repetition history starts empty apart from this position.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let board: Board = fen
            .parse()
            .map_err(|_| EngineError::Internal(format!("Invalid FEN: {}", fen)))?;
        Ok(Self::new(board))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    fn repetitions(&self) -> usize {
        let current = self.board.hash();
        self.history.iter().filter(|&&h| h == current).count()
    }
}

impl PartialEq for ChessPosition {
    fn eq(&self, other: &Self) -> bool {
        self.history == other.history && self.fen() == other.fen()
    }
}

impl Eq for ChessPosition {}

#[derive(Debug, Clone, Copy, Default)]
pub struct CozyEngine;

impl CozyEngine {
    pub fn new() -> Self {
        Self
    }

    /// Maps a typed move to the cozy-chess move it denotes, if any is legal.
    fn resolve(&self, board: &Board, mv: &MoveDescriptor) -> Option<Move> {
        let from = to_square(mv.origin);
        let to = to_square(mv.destination);
        let piece = board.piece_on(from)?;

        // King onto its own rook is the library's castling encoding, not something a player types.
        if piece == Piece::King && board.color_on(to) == board.color_on(from) {
            return None;
        }

        let candidate = match piece {
            Piece::King => castling_move(from, to).unwrap_or(Move {
                from,
                to,
                promotion: None,
            }),
            Piece::Pawn if to.rank() == Rank::First || to.rank() == Rank::Eighth => Move {
                from,
                to,
                promotion: Some(Piece::Queen),
            },
            _ => Move {
                from,
                to,
                promotion: None,
            },
        };

        board.is_legal(candidate).then_some(candidate)
    }
}

fn to_square(c: Coordinate) -> Square {
    Square::new(File::ALL[c.file() as usize], Rank::ALL[c.rank() as usize])
}

/// `e1g1`/`e1c1`/`e8g8`/`e8c8` to the king-takes-rook form.
fn castling_move(from: Square, to: Square) -> Option<Move> {
    if from.file() != File::E || from.rank() != to.rank() {
        return None;
    }
    if !matches!(from.rank(), Rank::First | Rank::Eighth) {
        return None;
    }
    let rook_file = match to.file() {
        File::G => File::H,
        File::C => File::A,
        _ => return None,
    };
    Some(Move {
        from,
        to: Square::new(rook_file, from.rank()),
        promotion: None,
    })
}

fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

fn insufficient_material(board: &Board) -> bool {
    let minors = board.pieces(Piece::Knight) | board.pieces(Piece::Bishop);
    match board.occupied().len() {
        2 => true,
        3 => minors.len() == 1,
        _ => false,
    }
}

impl RulesEngine for CozyEngine {
    type Position = ChessPosition;

    fn initial_position(&self) -> ChessPosition {
        ChessPosition::new(Board::default())
    }

    fn is_legal(&self, position: &ChessPosition, mv: &MoveDescriptor) -> bool {
        self.resolve(&position.board, mv).is_some()
    }

    fn apply(
        &self,
        position: &ChessPosition,
        mv: &MoveDescriptor,
    ) -> Result<ChessPosition, EngineError> {
        let resolved = self
            .resolve(&position.board, mv)
            .ok_or(EngineError::IllegalPrecondition(*mv))?;

        let mut board = position.board.clone();
        board.play_unchecked(resolved);

        let mut history = if board.halfmove_clock() == 0 {
            Vec::new()
        } else {
            position.history.clone()
        };
        history.push(board.hash());

        Ok(ChessPosition { board, history })
    }

    fn is_checkmate(&self, position: &ChessPosition) -> bool {
        position.board.status() == GameStatus::Won
    }

    fn is_draw(&self, position: &ChessPosition) -> bool {
        let board = &position.board;
        board.status() == GameStatus::Drawn
            || board.halfmove_clock() >= FIFTY_MOVE_HALFMOVES
            || insufficient_material(board)
            || position.repetitions() >= REPETITION_LIMIT
    }

    /// Eight rows, rank 8 first; uppercase white, lowercase black, `.` for empty squares.
    fn render(&self, position: &ChessPosition) -> String {
        let board = &position.board;
        Rank::ALL
            .iter()
            .rev()
            .map(|&rank| {
                File::ALL
                    .iter()
                    .map(|&file| {
                        let square = Square::new(file, rank);
                        match (board.piece_on(square), board.color_on(square)) {
                            (Some(piece), Some(color)) => piece_char(piece, color),
                            _ => '.',
                        }
                    })
                    .map(String::from)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
