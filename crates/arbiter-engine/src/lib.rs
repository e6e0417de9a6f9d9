//! Chess rules engine built on a flag-marked mailbox board.
//!
//! This crate provides:
//! - [`GameState`] - full game state with clocks, rights, trays, and histories
//! - [`Board`] / [`Cell`] - the 8x8 mailbox whose cells carry validity and
//!   threat marks, so scans work in place without allocating
//! - Two-pass validation - geometric reach first, then check filtering by
//!   simulating each candidate on a board copy
//! - Special moves in full: castling, en passant, and a promotion interrupt
//!   that holds the move open until the piece is chosen
//! - Draw detection: stalemate, insufficient material, the fifty-move rule,
//!   and threefold repetition via Zobrist hashing
//! - Reversible history: undo and redo restore clocks, rights, captures,
//!   and the en passant window exactly
//!
//! # Example
//!
//! ```
//! use arbiter_core::Square;
//! use arbiter_engine::GameState;
//!
//! let mut game = GameState::new();
//! let from = Square::from_algebraic("e2").unwrap();
//! let destinations = game.legal_destinations(from);
//! assert_eq!(destinations.len(), 2);
//!
//! let to = Square::from_algebraic("e4").unwrap();
//! game.move_piece(from, to).unwrap();
//! assert!(game.save_fen().starts_with("rnbqkbnr/pppppppp/8/8/4P3"));
//! ```

mod board;
mod game;
mod hash;
mod history;
mod legality;
mod movegen;
mod rules;
mod state;

pub use board::{Board, CaptureTray, Cell};
pub use game::{MoveError, MoveOutcome, PromotionError};
pub use rules::{DrawReason, GameResult, FIFTY_MOVE_HALFMOVE_LIMIT};
pub use state::{GameState, PlayerStatus, PromotionState};
