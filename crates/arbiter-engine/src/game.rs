//! Full game management: turns, legality, execution, undo, and status.

use arbiter_core::{Color, Coord, Piece, PieceKind};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::rules;
use crate::{Board, MoveRecord};

/// A chess player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub color: Color,
}

/// Reason for a drawn game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same position (placement + side to move) occurred three times.
    ThreefoldRepetition,
    /// Neither side can deliver mate.
    InsufficientMaterial,
    /// Both players agreed to a draw.
    Agreement,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMoveRule => write!(f, "50-move rule"),
            DrawReason::ThreefoldRepetition => write!(f, "threefold repetition"),
            DrawReason::InsufficientMaterial => write!(f, "insufficient material"),
            DrawReason::Agreement => write!(f, "agreement"),
        }
    }
}

/// Game status, recomputed after every applied or undone move.
///
/// Checkmate, stalemate, and the draw and resignation variants are
/// terminal. The engine does not block further [`Game::make_move`] calls in
/// a terminal state; callers are expected to check the status first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
    Resigned { winner: Color },
}

impl GameStatus {
    /// Returns true for checkmate, stalemate, draws, and resignation.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Active | GameStatus::Check)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "active"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate => write!(f, "checkmate"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {}", reason),
            GameStatus::Resigned { winner } => write!(f, "resignation - {} wins", winner),
        }
    }
}

/// Errors from setting up a game on a custom board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("missing {0} king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    ExtraKing(Color),
}

/// A complete chess game.
///
/// Owns the board, enforces legality, executes and undoes moves, and
/// recomputes the status after every transition. Single-threaded by design:
/// at most one logical mutation in flight, no internal locking.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    side_to_move: Color,
    status: GameStatus,
    history: Vec<MoveRecord>,
    /// Captured pieces, indexed by the color of the captured piece.
    captured: [Vec<Piece>; 2],
    /// Accumulated thinking time per color.
    clocks: [Duration; 2],
    turn_started: Instant,
    /// Plies since the last pawn move or capture.
    halfmove_clock: u32,
    /// Occurrence count per position key (placement + side to move).
    repetition: HashMap<String, u32>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::with_players("White", "Black")
    }

    /// Creates a new game with named players.
    pub fn with_players(white: impl Into<String>, black: impl Into<String>) -> Self {
        let mut game = Game {
            board: Board::standard(),
            players: [
                Player {
                    name: white.into(),
                    color: Color::White,
                },
                Player {
                    name: black.into(),
                    color: Color::Black,
                },
            ],
            side_to_move: Color::White,
            status: GameStatus::Active,
            history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
            clocks: [Duration::ZERO, Duration::ZERO],
            turn_started: Instant::now(),
            halfmove_clock: 0,
            repetition: HashMap::new(),
        };
        game.record_position();
        game
    }

    /// Creates a game from an arbitrary board setup.
    ///
    /// The status is recomputed immediately, so a position that is already
    /// mate, stalemate, or a dead draw reports as such.
    pub fn from_setup(board: Board, side_to_move: Color) -> Result<Self, SetupError> {
        for color in [Color::White, Color::Black] {
            let kings = board
                .pieces()
                .filter(|&(_, p)| p.kind == PieceKind::King && p.color == color)
                .count();
            match kings {
                0 => return Err(SetupError::MissingKing(color)),
                1 => {}
                _ => return Err(SetupError::ExtraKing(color)),
            }
        }

        let mut game = Self::new();
        game.board = board;
        game.side_to_move = side_to_move;
        game.repetition.clear();
        game.record_position();
        game.update_status();
        Ok(game)
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the player of the given color.
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.side_to_move)
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns the most recent move, if any.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Returns the pieces of the given color that have been captured.
    pub fn captured_pieces(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    /// Returns the total thinking time the given color has used.
    pub fn time_used(&self, color: Color) -> Duration {
        self.clocks[color.index()]
    }

    /// Returns the number of plies since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns how many times the current position has occurred.
    pub fn position_occurrences(&self) -> u32 {
        self.repetition.get(&self.position_key()).copied().unwrap_or(0)
    }

    /// Returns the winner, if the game has one.
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Checkmate => Some(self.side_to_move.opposite()),
            GameStatus::Resigned { winner } => Some(winner),
            _ => None,
        }
    }

    /// Returns true if the given side's king is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        match self.board.find_king(color) {
            Some(king) => rules::is_square_attacked(&self.board, king, color.opposite()),
            None => false,
        }
    }

    /// Returns every legal destination for the piece at `from`.
    ///
    /// Pseudo-legal candidates come from the rules layer; a king's raw
    /// two-file proposals are replaced by the dedicated castling
    /// eligibility check; finally each candidate is kept only if relocating
    /// the piece leaves the moving side's own king unattacked.
    pub fn legal_moves_from(&self, from: Coord) -> Vec<Coord> {
        let piece = match self.board.piece_at(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        let mut candidates = rules::candidate_moves(&self.board, from, self.history.last());
        if piece.kind == PieceKind::King {
            candidates.retain(|to| (to.col as i8 - from.col as i8).abs() < 2);
            candidates.extend(self.castling_moves(from, piece));
        }
        candidates.retain(|&to| !self.move_exposes_king(piece, from, to));
        candidates
    }

    /// Executes a move, returning false (and doing nothing) if no piece sits
    /// at `from` or the piece does not belong to the side to move.
    ///
    /// The move itself is not legality-checked here; callers validate
    /// destinations against [`Game::legal_moves_from`] first. `promotion`
    /// selects the piece a promoting pawn becomes; an invalid or absent
    /// choice falls back to a queen.
    pub fn make_move(&mut self, from: Coord, to: Coord, promotion: Option<PieceKind>) -> bool {
        let piece = match self.board.piece_at(from) {
            Some(piece) => piece,
            None => return false,
        };
        if piece.color != self.side_to_move {
            return false;
        }

        let elapsed = self.turn_started.elapsed();
        let record = self.execute(piece, from, to, promotion, elapsed);
        self.clocks[piece.color.index()] += record.elapsed;
        self.history.push(record);
        self.turn_started = Instant::now();
        self.side_to_move = self.side_to_move.opposite();
        self.record_position();
        self.update_status();
        true
    }

    /// Reverses the most recent move; no-op when the history is empty.
    ///
    /// Restores board occupancy, captured lists, clocks, and side to move,
    /// then recomputes the status. The halfmove clock and the repetition
    /// counts are NOT rolled back: repeated apply/undo cycles over-count
    /// both (see `undo_keeps_halfmove_clock_and_repetition_counts`).
    pub fn undo(&mut self) {
        let record = match self.history.pop() {
            Some(record) => record,
            None => return,
        };

        self.board.set(record.from, Some(record.piece));

        if record.is_castling {
            let row = record.from.row;
            let (rook_home_col, rook_castled_col) = if record.to.col > record.from.col {
                (7, 5)
            } else {
                (0, 3)
            };
            let rook_castled = Coord::new(row, rook_castled_col);
            if let Some(rook) = self.board.piece_at(rook_castled) {
                // A castling rook had necessarily never moved.
                self.board.set(
                    Coord::new(row, rook_home_col),
                    Some(Piece {
                        has_moved: false,
                        ..rook
                    }),
                );
                self.board.set(rook_castled, None);
            }
            self.board.set(record.to, None);
        } else if record.is_en_passant {
            self.board
                .set(Coord::new(record.from.row, record.to.col), record.captured);
            self.board.set(record.to, None);
        } else {
            self.board.set(record.to, record.captured);
        }

        if let Some(victim) = record.captured {
            self.captured[victim.color.index()].pop();
        }

        let mover = record.piece.color.index();
        self.clocks[mover] = self.clocks[mover].saturating_sub(record.elapsed);
        self.side_to_move = self.side_to_move.opposite();
        self.turn_started = Instant::now();
        self.update_status();
    }

    /// Resigns on behalf of the side to move.
    pub fn resign(&mut self) {
        self.status = GameStatus::Resigned {
            winner: self.side_to_move.opposite(),
        };
    }

    /// Ends the game as a draw by agreement.
    pub fn agree_draw(&mut self) {
        self.status = GameStatus::Draw(DrawReason::Agreement);
    }

    fn execute(
        &mut self,
        piece: Piece,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
        elapsed: Duration,
    ) -> MoveRecord {
        let mut captured = self.board.piece_at(to);

        if piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        let mut is_castling = false;
        let mut is_en_passant = false;

        if piece.kind == PieceKind::King && (from.col as i8 - to.col as i8).abs() == 2 {
            is_castling = true;
            let (rook_home_col, rook_castled_col) = if to.col > from.col { (7, 5) } else { (0, 3) };
            let rook_home = Coord::new(from.row, rook_home_col);
            if let Some(rook) = self.board.piece_at(rook_home) {
                self.board
                    .set(Coord::new(from.row, rook_castled_col), Some(rook.as_moved()));
                self.board.set(rook_home, None);
            }
        } else if piece.kind == PieceKind::Pawn && from.col != to.col && captured.is_none() {
            // En passant: the victim sits on the mover's origin row at the
            // destination file, not on the destination square.
            is_en_passant = true;
            let bypassed = Coord::new(from.row, to.col);
            captured = self.board.piece_at(bypassed);
            self.board.set(bypassed, None);
        }

        if let Some(victim) = captured {
            self.captured[victim.color.index()].push(victim);
        }

        let promoted = if piece.kind == PieceKind::Pawn && to.row == piece.color.opposite().back_row()
        {
            Some(match promotion {
                Some(
                    kind @ (PieceKind::Queen
                    | PieceKind::Rook
                    | PieceKind::Bishop
                    | PieceKind::Knight),
                ) => kind,
                _ => PieceKind::Queen,
            })
        } else {
            None
        };

        let placed = match promoted {
            Some(kind) => Piece {
                kind,
                color: piece.color,
                has_moved: true,
            },
            None => piece.as_moved(),
        };
        self.board.set(to, Some(placed));
        self.board.set(from, None);

        MoveRecord {
            piece,
            from,
            to,
            captured,
            promotion: promoted,
            is_castling,
            is_en_passant,
            elapsed,
        }
    }

    /// Castling destinations for an unmoved king, validated for
    /// eligibility: not currently in check, the relevant rook never moved,
    /// the squares between king and rook empty, and neither the passed-over
    /// square nor the destination attacked.
    fn castling_moves(&self, from: Coord, king: Piece) -> Vec<Coord> {
        let mut moves = Vec::new();
        if king.has_moved || self.in_check(king.color) {
            return moves;
        }
        let row = from.row;
        let enemy = king.color.opposite();

        // Kingside: rook on the h-file, f and g empty and unattacked.
        if self.castling_rook_ready(Coord::new(row, 7), king.color)
            && [5, 6].iter().all(|&col| {
                let square = Coord::new(row, col);
                self.board.piece_at(square).is_none()
                    && !rules::is_square_attacked(&self.board, square, enemy)
            })
        {
            moves.push(Coord::new(row, 6));
        }

        // Queenside: rook on the a-file, b/c/d empty, c and d unattacked.
        if self.castling_rook_ready(Coord::new(row, 0), king.color)
            && [1, 2, 3]
                .iter()
                .all(|&col| self.board.piece_at(Coord::new(row, col)).is_none())
            && [2, 3].iter().all(|&col| {
                !rules::is_square_attacked(&self.board, Coord::new(row, col), enemy)
            })
        {
            moves.push(Coord::new(row, 2));
        }

        moves
    }

    fn castling_rook_ready(&self, at: Coord, color: Color) -> bool {
        self.board
            .piece_at(at)
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color && !p.has_moved)
    }

    /// Simulates relocating `piece` from `from` to `to` on a copy of the
    /// board and reports whether that leaves the moving side's king
    /// attacked. A plain relocate suffices for the safety test; promotion,
    /// castling, and en passant bookkeeping do not change the answer.
    fn move_exposes_king(&self, piece: Piece, from: Coord, to: Coord) -> bool {
        let mut board = self.board;
        board.set(to, Some(piece));
        board.set(from, None);
        match board.find_king(piece.color) {
            Some(king) => rules::is_square_attacked(&board, king, piece.color.opposite()),
            None => false,
        }
    }

    /// Recomputes the status, in strict precedence order: fifty-move rule,
    /// threefold repetition, insufficient material, mate/stalemate, then
    /// check/active.
    fn update_status(&mut self) {
        if self.halfmove_clock >= 100 {
            self.status = GameStatus::Draw(DrawReason::FiftyMoveRule);
            return;
        }
        if self.position_occurrences() >= 3 {
            self.status = GameStatus::Draw(DrawReason::ThreefoldRepetition);
            return;
        }
        if self.insufficient_material() {
            self.status = GameStatus::Draw(DrawReason::InsufficientMaterial);
            return;
        }

        let side = self.side_to_move;
        let has_legal_move = Board::coords().any(|at| {
            self.board
                .piece_at(at)
                .is_some_and(|p| p.color == side)
                && !self.legal_moves_from(at).is_empty()
        });

        self.status = if !has_legal_move {
            if self.in_check(side) {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if self.in_check(side) {
            GameStatus::Check
        } else {
            GameStatus::Active
        };
    }

    fn insufficient_material(&self) -> bool {
        let pieces: Vec<Piece> = self.board.pieces().map(|(_, p)| p).collect();
        match pieces.len() {
            0..=2 => true,
            3 => pieces
                .iter()
                .any(|p| matches!(p.kind, PieceKind::Bishop | PieceKind::Knight)),
            _ => false,
        }
    }

    fn record_position(&mut self) {
        let key = self.position_key();
        *self.repetition.entry(key).or_insert(0) += 1;
    }

    /// Position identity for repetition counting: piece placement plus side
    /// to move. Castling rights and en passant targets are deliberately
    /// ignored, a known simplification relative to FIDE repetition rules.
    fn position_key(&self) -> String {
        let mut key = String::with_capacity(65);
        for at in Board::coords() {
            key.push(match self.board.piece_at(at) {
                Some(piece) => piece.kind.to_fen_char(piece.color),
                None => '.',
            });
        }
        key.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });
        key
    }
}
