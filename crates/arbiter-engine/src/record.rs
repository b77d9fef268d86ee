//! Immutable record of one applied move.

use arbiter_core::{Coord, Piece, PieceKind};
use std::time::Duration;

/// Everything needed to display one applied move and to reverse it exactly.
///
/// A record is created once when a move executes and never mutated. The
/// game history is append-only; undo pops the tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The moving piece as it stood before the move, so `piece.has_moved`
    /// is the pre-move flag.
    pub piece: Piece,
    /// Start coordinate.
    pub from: Coord,
    /// End coordinate.
    pub to: Coord,
    /// The captured piece, if any. For en passant this is the bypassed
    /// pawn, which did not stand on `to`.
    pub captured: Option<Piece>,
    /// The kind the pawn became, when the move promoted.
    pub promotion: Option<PieceKind>,
    /// True when the move was a castle (king moved two files).
    pub is_castling: bool,
    /// True when the move was an en passant capture.
    pub is_en_passant: bool,
    /// Thinking time spent on this move.
    pub elapsed: Duration,
}

impl MoveRecord {
    /// Returns true if this move was a pawn advancing two rows.
    #[inline]
    pub fn is_pawn_double_step(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && (self.from.row as i8 - self.to.row as i8).abs() == 2
    }

    /// Renders simple long algebraic text for a move log, e.g. "e2-e4",
    /// "Ng1-f3", "Pe5xd6", "O-O", "a7-a8=Q".
    pub fn notation(&self) -> String {
        if self.is_castling {
            return if self.to.col > self.from.col {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            };
        }

        let mut text = String::new();
        if self.piece.kind != PieceKind::Pawn || self.captured.is_some() {
            text.push(self.piece.kind.symbol());
        }
        text.push_str(&self.from.to_algebraic());
        text.push(if self.captured.is_some() { 'x' } else { '-' });
        text.push_str(&self.to.to_algebraic());
        if let Some(kind) = self.promotion {
            text.push('=');
            text.push(kind.symbol());
        }
        text
    }
}
