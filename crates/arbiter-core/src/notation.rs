//! Collaborator-facing move text parsing.
//!
//! External move proposers reply with a bare 4-character string
//! `<file><rank><file><rank>` (e.g. "e2e4") - no capture marker and no
//! promotion suffix. Anything not matching that exact shape is rejected
//! here, before it can reach the engine.

use crate::Coord;
use thiserror::Error;

/// Errors that can occur when parsing a proposed move string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected 4 characters, got {0}")]
    BadLength(usize),

    #[error("invalid square '{0}'")]
    BadSquare(String),
}

/// Parses a 4-character move string into `(start, end)` coordinates.
pub fn parse_move(s: &str) -> Result<(Coord, Coord), ParseMoveError> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != 4 {
        return Err(ParseMoveError::BadLength(chars.len()));
    }
    let from = Coord::from_file_rank(chars[0], chars[1])
        .ok_or_else(|| ParseMoveError::BadSquare(chars[..2].iter().collect()))?;
    let to = Coord::from_file_rank(chars[2], chars[3])
        .ok_or_else(|| ParseMoveError::BadSquare(chars[2..].iter().collect()))?;
    Ok((from, to))
}
