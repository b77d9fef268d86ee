//! Core value types for the arbiter chess rules engine.
//!
//! This crate provides the fundamental types shared across the workspace:
//! - [`Color`] and [`PieceKind`] / [`Piece`] for piece representation
//! - [`Coord`] for board coordinates
//! - [`parse_move`] for the collaborator-facing move text format

mod color;
mod coord;
mod notation;
mod piece;

pub use color::Color;
pub use coord::Coord;
pub use notation::{parse_move, ParseMoveError};
pub use piece::{Piece, PieceKind};
