//! Pseudo-legal move generation per piece kind.
//!
//! Everything here is a pure read of the board plus, for en passant, the
//! most recent move record. Candidates may leave the mover's own king
//! attacked - [`Game`](crate::Game) enforces king safety, not this module.

use arbiter_core::{Color, Coord, Piece, PieceKind};

use crate::{Board, MoveRecord};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns the pseudo-legal destinations for the piece at `from`.
///
/// `last_move` is the most recent record in the game history, consulted
/// only for the en passant rule. An unmoved king's two castling
/// destinations are included as unvalidated proposals; castling eligibility
/// belongs to the game layer. Returns an empty set if `from` is empty.
pub fn candidate_moves(board: &Board, from: Coord, last_move: Option<&MoveRecord>) -> Vec<Coord> {
    match board.piece_at(from) {
        Some(piece) => moves_for(board, from, piece, last_move, true),
        None => Vec::new(),
    }
}

/// Returns true if any piece of color `by` attacks `target`.
///
/// A square counts as attacked when it appears among a piece's pseudo-legal
/// destinations. Castling proposals are excluded (they are not attacks, and
/// including them would recurse through the eligibility check), and no en
/// passant lookback is needed - an en passant target square is always empty.
pub fn is_square_attacked(board: &Board, target: Coord, by: Color) -> bool {
    board.pieces().any(|(from, piece)| {
        piece.color == by && moves_for(board, from, piece, None, false).contains(&target)
    })
}

fn moves_for(
    board: &Board,
    from: Coord,
    piece: Piece,
    last_move: Option<&MoveRecord>,
    include_castle_proposals: bool,
) -> Vec<Coord> {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece, last_move),
        PieceKind::Knight => step_moves(board, from, piece, &KNIGHT_JUMPS),
        PieceKind::Bishop => sliding_moves(board, from, piece, &BISHOP_DIRECTIONS),
        PieceKind::Rook => sliding_moves(board, from, piece, &ROOK_DIRECTIONS),
        PieceKind::Queen => sliding_moves(board, from, piece, &QUEEN_DIRECTIONS),
        PieceKind::King => {
            let mut moves = step_moves(board, from, piece, &KING_STEPS);
            if include_castle_proposals && !piece.has_moved {
                for dc in [2, -2] {
                    if let Some(to) = from.offset(0, dc) {
                        moves.push(to);
                    }
                }
            }
            moves
        }
    }
}

fn pawn_moves(
    board: &Board,
    from: Coord,
    piece: Piece,
    last_move: Option<&MoveRecord>,
) -> Vec<Coord> {
    let mut moves = Vec::new();
    let dir = piece.color.pawn_row_direction();

    // Forward moves onto empty squares only.
    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            moves.push(one);
            if !piece.has_moved {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.piece_at(two).is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    // Diagonal captures.
    for dc in [-1, 1] {
        if let Some(diag) = from.offset(dir, dc) {
            if board.piece_at(diag).is_some_and(|target| piece.is_enemy_of(target)) {
                moves.push(diag);
            }
        }
    }

    // En passant: the immediately preceding move was an enemy pawn
    // double-step ending beside this pawn; the capture lands on the square
    // the enemy pawn passed over.
    if let Some(last) = last_move {
        if last.is_pawn_double_step()
            && last.to.row == from.row
            && (last.to.col as i8 - from.col as i8).abs() == 1
        {
            if let Some(behind) = from.offset(dir, last.to.col as i8 - from.col as i8) {
                moves.push(behind);
            }
        }
    }

    moves
}

fn step_moves(board: &Board, from: Coord, piece: Piece, offsets: &[(i8, i8)]) -> Vec<Coord> {
    let mut moves = Vec::new();
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => moves.push(to),
                Some(target) if piece.is_enemy_of(target) => moves.push(to),
                Some(_) => {}
            }
        }
    }
    moves
}

fn sliding_moves(board: &Board, from: Coord, piece: Piece, directions: &[(i8, i8)]) -> Vec<Coord> {
    let mut moves = Vec::new();
    for &(dr, dc) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(dr, dc) {
            match board.piece_at(next) {
                None => {
                    moves.push(next);
                    cursor = next;
                }
                Some(target) if piece.is_enemy_of(target) => {
                    moves.push(next);
                    break;
                }
                Some(_) => break,
            }
        }
    }
    moves
}
