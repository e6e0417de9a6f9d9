//! Core types for the chess rules engine.
//!
//! This crate provides the value types shared across the workspace:
//! - [`Team`], [`PieceKind`], and [`Piece`] for piece representation
//! - [`Square`] for board coordinates (row 0 is the rank FEN lists first)
//! - [`CastlingRights`] for per-side, per-wing eligibility
//! - [`MoveRecord`] for self-describing, reversible moves
//! - [`Fen`] for FEN parsing and serialization

mod castling;
mod fen;
mod piece;
mod record;
mod square;
mod team;

pub use castling::CastlingRights;
pub use fen::{Fen, FenError};
pub use piece::{Piece, PieceKind};
pub use record::MoveRecord;
pub use square::Square;
pub use team::Team;
