//! Board coordinate representation.

use std::fmt;

/// A square on the board as a zero-indexed `(row, col)` pair.
///
/// Row 0 is rank 8 and column 0 is file a, matching the orientation a GUI
/// draws the board in (White at the bottom). Both axes run 0-7; constructing
/// an out-of-range coordinate is a programming error, not a runtime
/// condition, so [`Coord::new`] only debug-asserts bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Creates a coordinate from row and column indices (0-7).
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Coord { row, col }
    }

    /// Returns the coordinate displaced by `(dr, dc)`, or `None` if the
    /// result falls off the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Coord {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Creates a coordinate from a file character ('a'-'h') and a rank
    /// character ('1'-'8').
    pub const fn from_file_rank(file: char, rank: char) -> Option<Self> {
        if file < 'a' || file > 'h' || rank < '1' || rank > '8' {
            return None;
        }
        let col = file as u8 - b'a';
        let row = b'8' - rank as u8;
        Some(Coord { row, col })
    }

    /// Parses a coordinate from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        Self::from_file_rank(bytes[0] as char, bytes[1] as char)
    }

    /// Returns the file character ('a'-'h') for this coordinate.
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Returns the rank character ('1'-'8') for this coordinate.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }

    /// Returns the algebraic notation for this coordinate.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
