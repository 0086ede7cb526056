//! Coordinate move parser: `e2e4`-style text to [`MoveDescriptor`].
//!
//! Purely syntactic. It does not look at any board, so `e2e5` parses fine and is rejected later
//! by the rules engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One board square, stored as zero-based file (`a` = 0) and rank (`1` = 0). Always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    file: u8,
    rank: u8,
}

impl Coordinate {
    /// Returns `None` unless both indices are in `0..8`.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file_char(self) -> char {
        char::from(b'a' + self.file)
    }

    pub fn rank_char(self) -> char {
        char::from(b'1' + self.rank)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// A candidate move: where the piece starts and where it lands. No promotion tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveDescriptor {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)
    }
}

impl FromStr for MoveDescriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 4 characters like e2e4, got {found}")]
    Length { found: usize },

    #[error("invalid file '{found}' at position {position}, expected a-h")]
    InvalidFile { position: usize, found: char },

    #[error("invalid rank '{found}' at position {position}, expected 1-8")]
    InvalidRank { position: usize, found: char },
}

fn parse_file(position: usize, c: char) -> Result<u8, ParseError> {
    match c {
        'a'..='h' => Ok(c as u8 - b'a'),
        _ => Err(ParseError::InvalidFile { position, found: c }),
    }
}

fn parse_rank(position: usize, c: char) -> Result<u8, ParseError> {
    match c {
        '1'..='8' => Ok(c as u8 - b'1'),
        _ => Err(ParseError::InvalidRank { position, found: c }),
    }
}

/// Parses `text` (surrounding whitespace stripped) as exactly file, rank, file, rank.
pub fn parse_move(text: &str) -> Result<MoveDescriptor, ParseError> {
    let chars: Vec<char> = text.trim().chars().collect();
    let [f1, r1, f2, r2] = chars[..] else {
        return Err(ParseError::Length { found: chars.len() });
    };

    let origin = Coordinate {
        file: parse_file(0, f1)?,
        rank: parse_rank(1, r1)?,
    };
    let destination = Coordinate {
        file: parse_file(2, f2)?,
        rank: parse_rank(3, r2)?,
    };
    Ok(MoveDescriptor {
        origin,
        destination,
    })
}
