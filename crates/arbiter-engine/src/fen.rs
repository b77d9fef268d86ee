//! FEN export.
//!
//! Export only: positions are serialized for external consumers (loggers,
//! move proposers, analysis tools), never parsed back. Castling rights and
//! the en passant target are derived from board state and the move history
//! rather than tracked incrementally.

use arbiter_core::{Color, Coord, PieceKind};

use crate::{Board, Game, MoveRecord, BOARD_SIZE};

impl Game {
    /// Serializes the current position as a FEN record.
    ///
    /// All six fields are produced: piece placement, active color, castling
    /// availability, en passant target, halfmove clock, and fullmove number.
    pub fn to_fen(&self) -> String {
        let mut fen = placement(self.board());

        fen.push(' ');
        fen.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        fen.push_str(&castling_rights(self.board()));

        fen.push(' ');
        match en_passant_target(self.last_move()) {
            Some(target) => fen.push_str(&target.to_algebraic()),
            None => fen.push('-'),
        }

        let fullmove = self.history().len() / 2 + 1;
        fen.push_str(&format!(" {} {}", self.halfmove_clock(), fullmove));
        fen
    }
}

/// Piece placement field: ranks 8 down to 1, empty runs as digits.
fn placement(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE as u8 {
        if row > 0 {
            out.push('/');
        }
        let mut empty_run = 0;
        for col in 0..BOARD_SIZE as u8 {
            match board.piece_at(Coord::new(row, col)) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    out.push(piece.kind.to_fen_char(piece.color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
    }
    out
}

/// Castling availability, derived from the corner and king squares: a right
/// exists when both the king and the relevant rook stand on their home
/// squares and neither has moved.
fn castling_rights(board: &Board) -> String {
    let mut rights = String::new();
    for (color, king_row, symbols) in [
        (Color::White, 7u8, ['K', 'Q']),
        (Color::Black, 0u8, ['k', 'q']),
    ] {
        let king_home = unmoved(board, Coord::new(king_row, 4), PieceKind::King, color);
        if king_home && unmoved(board, Coord::new(king_row, 7), PieceKind::Rook, color) {
            rights.push(symbols[0]);
        }
        if king_home && unmoved(board, Coord::new(king_row, 0), PieceKind::Rook, color) {
            rights.push(symbols[1]);
        }
    }
    if rights.is_empty() {
        rights.push('-');
    }
    rights
}

fn unmoved(board: &Board, at: Coord, kind: PieceKind, color: Color) -> bool {
    board
        .piece_at(at)
        .is_some_and(|p| p.kind == kind && p.color == color && !p.has_moved)
}

/// The square a capturing pawn would land on, present only when the
/// immediately preceding move was a pawn double-step.
fn en_passant_target(last: Option<&MoveRecord>) -> Option<Coord> {
    let last = last?;
    if !last.is_pawn_double_step() {
        return None;
    }
    Some(Coord::new((last.from.row + last.to.row) / 2, last.from.col))
}
