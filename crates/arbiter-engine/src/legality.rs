//! Check-filtered legality.
//!
//! Candidate moves from the geometric scan are vetted by playing each one
//! on a copy of the board and rescanning the opponent's threats there. The
//! live board never changes, so a legality probe can run at any time, even
//! mid-selection.

use arbiter_core::{PieceKind, Square, Team};

use crate::board::Board;
use crate::movegen::{mark_en_passant, mark_piece, scan_threats, Marking};
use crate::state::GameState;

/// Plays `from -> to` on a copy and reports whether `team`'s king survives.
///
/// The copy resolves en passant geometry too: a pawn landing on an empty
/// square of another column removes the pawn it passed. That makes the
/// probe exact for the one case where a capture does not land on the
/// captured piece, so a pinned-looking en passant is judged on the board
/// that would actually result.
pub(crate) fn move_is_safe(board: &Board, from: Square, to: Square, team: Team) -> bool {
    let mut sim = board.clone();
    if let Some(piece) = sim.take(from) {
        if piece.kind == PieceKind::Pawn && from.col() != to.col() && sim.piece_at(to).is_none() {
            sim.clear(from.with_col_of(to));
        }
        sim.place(to, piece);
    }
    scan_threats(&mut sim, team.opponent());
    match sim.find_king(team) {
        Some(king) => !sim.cell(king).vulnerable,
        None => true,
    }
}

impl GameState {
    /// Filters the current `primary_valid` marks down to `is_valid`:
    /// destinations that leave the mover's own king safe.
    ///
    /// Run [`GameState::primary_validation`] for the same square first;
    /// the pair is wrapped by [`GameState::legal_destinations`].
    pub fn final_validation(&mut self, at: Square) {
        self.board.reset_is_valid();
        let Some(piece) = self.board.piece_at(at) else {
            return;
        };
        if piece.team != self.turn {
            return;
        }
        for dest in Square::all() {
            if self.board.cell(dest).primary_valid {
                let legal = move_is_safe(&self.board, at, dest, piece.team);
                self.board.cell_mut(dest).is_valid = legal;
            }
        }
    }

    /// Every legal destination for the piece on `at`. Recomputes both
    /// validation passes, so the board's marks afterwards match the result.
    pub fn legal_destinations(&mut self, at: Square) -> Vec<Square> {
        self.primary_validation(at);
        self.final_validation(at);
        Square::all()
            .filter(|&sq| self.board.cell(sq).is_valid)
            .collect()
    }

    /// Whether `team` has any legal move at all. Probes piece by piece on
    /// board copies and stops at the first escape; the live board's marks
    /// are untouched.
    ///
    /// Castling is not probed: wherever it is legal, the plain one-square
    /// king move towards the rook is legal too, so it can never be the
    /// only escape.
    pub(crate) fn has_any_legal_move(&self, team: Team) -> bool {
        for from in Square::all() {
            let Some(piece) = self.board.piece_at(from) else {
                continue;
            };
            if piece.team != team {
                continue;
            }
            let mut probe = self.board.clone();
            probe.reset_primary_valid();
            mark_piece(&mut probe, from, Marking::Moves);
            if piece.kind == PieceKind::Pawn {
                mark_en_passant(&mut probe, from);
            }
            for to in Square::all() {
                if probe.cell(to).primary_valid && move_is_safe(&self.board, from, to, team) {
                    return true;
                }
            }
        }
        false
    }
}
