//! Move execution: guards, capture and castling handling, the promotion
//! interrupt, and the commit sequence shared by every path.

use arbiter_core::{MoveRecord, Piece, PieceKind, Square, Team};
use thiserror::Error;

use crate::hash::position_hash;
use crate::movegen::{CASTLE_KS_KING_COL, ROOK_KS_COL, ROOK_QS_COL};
use crate::state::{GameState, PromotionState};

/// Why [`GameState::move_piece`] refused to run. Refused moves leave the
/// game untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// A pending promotion must be resolved before anything else happens.
    #[error("promotion on {0} must be resolved first")]
    PromotionPending(Square),
    /// The source square holds no piece.
    #[error("no piece on {0}")]
    EmptySource(Square),
    /// Source and destination are the same square.
    #[error("null move on {0}")]
    NullMove(Square),
}

/// Why [`GameState::promote_pawn`] refused to run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PromotionError {
    #[error("no promotion is pending")]
    NotPromoting,
    #[error("a pawn cannot promote to {0}")]
    InvalidPiece(PieceKind),
}

/// What a successful [`GameState::move_piece`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is committed and the opponent is on turn.
    Played,
    /// The pawn reached its promotion row. The move is held open, and
    /// almost everything else is refused, until [`GameState::promote_pawn`]
    /// picks the piece.
    AwaitingPromotion(Square),
}

impl GameState {
    /// Executes `from -> to` for the side to move.
    ///
    /// The destination is taken at face value: callers offer only squares
    /// from [`GameState::legal_destinations`], and this method carries out
    /// whatever the move implies (capture, castling, en passant, the
    /// promotion interrupt) plus all bookkeeping. The only refusals are
    /// structural, listed in [`MoveError`].
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if let PromotionState::Awaiting { square, .. } = self.promotion {
            tracing::warn!(%from, %to, %square, "move rejected: promotion pending");
            return Err(MoveError::PromotionPending(square));
        }
        let Some(mover) = self.board.piece_at(from) else {
            tracing::warn!(%from, %to, "move rejected: empty source square");
            return Err(MoveError::EmptySource(from));
        };
        if from == to {
            tracing::warn!(%from, "move rejected: destination equals source");
            return Err(MoveError::NullMove(from));
        }

        // Snapshot first; everything below mutates.
        let record = self.record_move(from, to, mover);

        if self.turn == Team::Black {
            self.fullmove_number += 1;
        }
        if mover.kind == PieceKind::Pawn || record.captured.is_some() {
            self.halfmove_clock = 0;
            self.hash_history.clear();
        } else {
            self.halfmove_clock += 1;
        }

        if let Some(captured) = record.captured {
            if !self.tray_mut(mover.team.opponent()).push(captured) {
                tracing::warn!("capture tray full; piece not displayed");
            }
        }

        self.apply_rights_updates(&record);
        self.en_passant_col = None;
        self.board.reset_just_moved();

        if record.was_castling {
            self.board.place(to, Piece { has_moved: true, ..mover });
            self.board.clear(from);
            self.board.cell_mut(to).just_moved = true;
            self.move_castling_rook(record);
            self.finalize_commit(record);
            return Ok(MoveOutcome::Played);
        }

        self.board.place(to, Piece { has_moved: true, ..mover });
        self.board.clear(from);
        self.board.cell_mut(to).just_moved = true;

        if record.was_en_passant {
            self.board.clear(from.with_col_of(to));
        }

        if mover.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2 {
            self.board.cell_mut(to).pawn_moved_two = true;
            self.en_passant_col = Some(to.col());
        }

        if mover.kind == PieceKind::Pawn && to.row() == mover.team.promotion_row() {
            self.promotion = PromotionState::Awaiting {
                square: to,
                pending: record,
            };
            return Ok(MoveOutcome::AwaitingPromotion(to));
        }

        self.finalize_commit(record);
        Ok(MoveOutcome::Played)
    }

    /// Finishes the pending promotion by replacing the pawn with `kind`.
    /// Only then does the move commit: the turn flips and the history
    /// records the move together with its promotion choice.
    pub fn promote_pawn(&mut self, kind: PieceKind) -> Result<(), PromotionError> {
        let PromotionState::Awaiting { square, pending } = self.promotion else {
            tracing::warn!("promotion rejected: none pending");
            return Err(PromotionError::NotPromoting);
        };
        if !matches!(
            kind,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        ) {
            tracing::warn!(%kind, "promotion rejected: not a promotion piece");
            return Err(PromotionError::InvalidPiece(kind));
        }

        self.board.place(
            square,
            Piece {
                kind,
                team: pending.team,
                has_moved: true,
            },
        );
        self.promotion = PromotionState::Idle;

        let mut record = pending;
        record.promotion = Some(kind);
        self.finalize_commit(record);
        Ok(())
    }

    /// Builds the undo record before anything mutates, so the prior
    /// clocks, rights, and en passant column ride along with the move.
    fn record_move(&self, from: Square, to: Square, mover: Piece) -> MoveRecord {
        let captured_directly = self.board.piece_at(to).map(|p| p.kind);
        let was_en_passant =
            mover.kind == PieceKind::Pawn && from.col() != to.col() && captured_directly.is_none();
        let captured = if was_en_passant {
            Some(PieceKind::Pawn)
        } else {
            captured_directly
        };
        let was_castling = mover.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2;
        MoveRecord {
            from,
            to,
            moved: mover.kind,
            team: mover.team,
            mover_had_moved: mover.has_moved,
            captured,
            promotion: None,
            was_en_passant,
            was_castling,
            prior_en_passant_col: self.en_passant_col,
            prior_rights: self.rights,
            prior_halfmove_clock: self.halfmove_clock,
        }
    }

    /// Moves the rook across the king for the castling in `record`.
    pub(crate) fn move_castling_rook(&mut self, record: MoveRecord) {
        let kingside = record.to.col() == CASTLE_KS_KING_COL;
        let (home, castled) = if kingside {
            (record.from.offset(0, 3), record.from.offset(0, 1))
        } else {
            (record.from.offset(0, -4), record.from.offset(0, -1))
        };
        if let (Some(home), Some(castled)) = (home, castled) {
            if let Some(mut rook) = self.board.take(home) {
                rook.has_moved = true;
                self.board.place(castled, rook);
            }
        }
    }

    /// Clears whatever castling rights `record` burns: the king moving, a
    /// rook leaving its home square, or a rook captured on one.
    pub(crate) fn apply_rights_updates(&mut self, record: &MoveRecord) {
        if record.moved == PieceKind::King {
            self.rights.clear_team(record.team);
        }
        if record.moved == PieceKind::Rook && record.from.row() == record.team.back_row() {
            if record.from.col() == ROOK_KS_COL {
                self.rights.clear_kingside(record.team);
            } else if record.from.col() == ROOK_QS_COL {
                self.rights.clear_queenside(record.team);
            }
        }
        if record.captured == Some(PieceKind::Rook) {
            let victim = record.team.opponent();
            if record.to.row() == victim.back_row() {
                if record.to.col() == ROOK_KS_COL {
                    self.rights.clear_kingside(victim);
                } else if record.to.col() == ROOK_QS_COL {
                    self.rights.clear_queenside(victim);
                }
            }
        }
    }

    /// Commits a fully executed move: history in, redo line gone, turn
    /// flipped, status refreshed, repetition bookkeeping appended.
    fn finalize_commit(&mut self, record: MoveRecord) {
        if !self.undo_stack.push(record) {
            tracing::warn!(mv = %record, "undo history full; move not recorded");
        }
        self.redo_stack.clear();
        self.settle();

        let hash = position_hash(self);
        if self.hash_history.count(hash) >= 2 {
            self.repetition = true;
        }
        if !self.hash_history.push(hash) {
            tracing::warn!("position history full; repetition tracking degraded");
        }
    }

    /// Hands the turn to the opponent and refreshes their status.
    pub(crate) fn settle(&mut self) {
        self.turn = self.turn.opponent();
        self.refresh_status();
    }
}
