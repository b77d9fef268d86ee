//! Board storage: an 8x8 grid of optional piece occupants.

use arbiter_core::{Color, Coord, Piece, PieceKind};
use std::fmt;

/// Board side length.
pub const BOARD_SIZE: usize = 8;

/// An 8x8 grid of optional pieces.
///
/// Pure storage: accessors take coordinates that are valid by construction
/// (see [`Coord`]); the board performs no legality checking of its own.
///
/// `Copy` on purpose: the legality filter simulates candidate moves on a
/// snapshot, so no simulation path ever has to undo its edits on shared
/// state.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates the standard starting setup.
    ///
    /// Row 0 is rank 8, so Black's back rank fills row 0 and White's fills
    /// row 7.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.set(Coord::new(0, col), Some(Piece::new(kind, Color::Black)));
            board.set(Coord::new(7, col), Some(Piece::new(kind, Color::White)));
        }
        for col in 0..8 {
            board.set(
                Coord::new(1, col),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
            board.set(
                Coord::new(6, col),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
        }
        board
    }

    /// Returns the piece at the given coordinate.
    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.squares[at.row as usize][at.col as usize]
    }

    /// Sets the cell at the given coordinate.
    #[inline]
    pub fn set(&mut self, at: Coord, piece: Option<Piece>) {
        self.squares[at.row as usize][at.col as usize] = piece;
    }

    /// Iterates over all 64 coordinates, row by row.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..8).flat_map(|row| (0..8).map(move |col| Coord::new(row, col)))
    }

    /// Iterates over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Self::coords().filter_map(|at| self.piece_at(at).map(|piece| (at, piece)))
    }

    /// Returns the coordinate of the given side's king, if present.
    pub fn find_king(&self, color: Color) -> Option<Coord> {
        self.pieces()
            .find(|&(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(at, _)| at)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            for col in 0..8u8 {
                match self.piece_at(Coord::new(row, col)) {
                    Some(piece) => write!(f, "{}", piece.kind.to_fen_char(piece.color))?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
