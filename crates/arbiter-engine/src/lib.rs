//! Rules engine for two-player standard chess.
//!
//! This crate owns board state, enforces move legality, detects terminal and
//! drawn positions, and serializes positions to FEN. It provides:
//! - [`Board`] - an 8x8 grid of optional piece occupants
//! - [`rules`] - pseudo-legal move generation per piece kind
//! - [`MoveRecord`] - an immutable description of one applied move
//! - [`Game`] - the orchestrator: turn management, legality filtering,
//!   move execution and undo, status recomputation, FEN export
//!
//! # Architecture
//!
//! [`Game`] asks the [`rules`] module for pseudo-legal candidates, filters
//! them by simulating each candidate on a copy of the board and testing
//! king safety, executes a chosen move by mutating the board and pushing a
//! [`MoveRecord`], then recomputes the game status. External callers (GUI,
//! AI move proposers) only ever talk to [`Game`].
//!
//! The engine is single-threaded and synchronous: no locking, no background
//! work, at most one logical mutation in flight. Callers driving it from
//! concurrent tasks must serialize access externally.
//!
//! # Example
//!
//! ```
//! use arbiter_core::Coord;
//! use arbiter_engine::Game;
//!
//! let mut game = Game::new();
//! let e2 = Coord::from_algebraic("e2").unwrap();
//! let e4 = Coord::from_algebraic("e4").unwrap();
//! assert!(game.legal_moves_from(e2).contains(&e4));
//! assert!(game.make_move(e2, e4, None));
//! assert!(game.to_fen().starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));
//! ```

mod board;
mod fen;
mod game;
mod record;
pub mod rules;

pub use board::{Board, BOARD_SIZE};
pub use game::{DrawReason, Game, GameStatus, Player, SetupError};
pub use record::MoveRecord;
pub use rules::{candidate_moves, is_square_attacked};
