//! Move and position histories, and the undo/redo machinery.

use arbiter_core::{MoveRecord, Piece, PieceKind, Team};

use crate::hash::position_hash;
use crate::state::GameState;

const INITIAL_CAPACITY: usize = 32;

/// A stack of committed moves.
///
/// Growth is explicit: `push` pre-reserves through `try_reserve` and reports
/// failure instead of aborting, so running out of memory degrades the
/// history rather than the game.
#[derive(Debug, Clone)]
pub(crate) struct MoveStack {
    entries: Vec<MoveRecord>,
}

impl MoveStack {
    pub fn new() -> Self {
        MoveStack {
            entries: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Appends `record`. Returns `false` when growth cannot be reserved.
    pub fn push(&mut self, record: MoveRecord) -> bool {
        if !reserve_for_push(&mut self.entries) {
            return false;
        }
        self.entries.push(record);
        true
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[MoveRecord] {
        &self.entries
    }
}

/// Position hashes since the halfmove clock last reset, newest last.
///
/// The current position is always the final entry, so a hash occurring
/// three times in here *is* a threefold repetition.
#[derive(Debug, Clone)]
pub(crate) struct HashHistory {
    hashes: Vec<u64>,
}

impl HashHistory {
    pub fn new() -> Self {
        HashHistory {
            hashes: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Appends `hash`. Returns `false` when growth cannot be reserved.
    pub fn push(&mut self, hash: u64) -> bool {
        if !reserve_for_push(&mut self.hashes) {
            return false;
        }
        self.hashes.push(hash);
        true
    }

    pub fn pop(&mut self) -> Option<u64> {
        self.hashes.pop()
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
    }

    /// Drops everything and starts a fresh chain at `hash`.
    pub fn reseed(&mut self, hash: u64) {
        self.hashes.clear();
        self.hashes.push(hash);
    }

    /// How often `hash` occurs in the chain.
    pub fn count(&self, hash: u64) -> usize {
        self.hashes.iter().filter(|&&h| h == hash).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// Doubles capacity ahead of a push, fallibly. `true` when room exists.
fn reserve_for_push<T>(entries: &mut Vec<T>) -> bool {
    if entries.len() == entries.capacity() {
        let grow = entries.capacity().max(INITIAL_CAPACITY);
        if entries.try_reserve(grow).is_err() {
            return false;
        }
    }
    true
}

impl GameState {
    /// Takes back the last committed move. Returns `false` when there is
    /// nothing to undo or a promotion is pending.
    ///
    /// Everything the move changed comes back: position, clocks, castling
    /// rights, the en passant window, captured pieces, and status flags.
    /// The move itself transfers to the redo stack.
    pub fn undo(&mut self) -> bool {
        if self.promotion.is_awaiting() {
            tracing::warn!("undo rejected: a promotion is pending");
            return false;
        }
        let Some(record) = self.undo_stack.pop() else {
            return false;
        };

        self.halfmove_clock = record.prior_halfmove_clock;
        self.rights = record.prior_rights;
        self.en_passant_col = record.prior_en_passant_col;
        if record.team == Team::Black {
            self.fullmove_number -= 1;
        }

        // The mover returns home with its original kind, so promotions
        // revert to the pawn.
        self.board.place(
            record.from,
            Piece {
                kind: record.moved,
                team: record.team,
                has_moved: record.mover_had_moved,
            },
        );
        self.board.clear(record.to);

        if record.was_castling {
            let kingside = record.to.col() > record.from.col();
            let (castled, home) = if kingside {
                (record.from.offset(0, 1), record.from.offset(0, 3))
            } else {
                (record.from.offset(0, -1), record.from.offset(0, -4))
            };
            if let (Some(castled), Some(home)) = (castled, home) {
                if let Some(mut rook) = self.board.take(castled) {
                    rook.has_moved = false;
                    self.board.place(home, rook);
                }
            }
        }

        if let Some(captured) = record.captured {
            let victim = record.team.opponent();
            // An en passant victim stood beside the mover, not on the
            // destination.
            let square = if record.was_en_passant {
                record.from.with_col_of(record.to)
            } else {
                record.to
            };
            let has_moved =
                captured != PieceKind::Pawn || square.row() != victim.pawn_start_row();
            self.board.place(
                square,
                Piece {
                    kind: captured,
                    team: victim,
                    has_moved,
                },
            );
            self.tray_mut(victim).pop();
        }

        // Re-arm the capture window of the pawn named by the restored en
        // passant column.
        self.board.reset_just_moved();
        if let Some(col) = self.en_passant_col {
            let row = record.team.en_passant_row();
            let cell = self.board.rc_mut(row, col);
            let is_enemy_pawn = cell
                .piece
                .map_or(false, |p| p.kind == PieceKind::Pawn && p.team != record.team);
            if is_enemy_pawn {
                cell.just_moved = true;
                cell.pawn_moved_two = true;
            }
        }

        self.hash_history.pop();
        if !self.redo_stack.push(record) {
            tracing::warn!(mv = %record, "redo history full; replay unavailable");
        }

        self.settle();

        let hash = position_hash(self);
        if self.hash_history.is_empty() {
            // Undone past the last irreversible move; the chain restarts
            // at the restored position.
            self.hash_history.reseed(hash);
        }
        self.repetition = self.hash_history.count(hash) >= 3;
        true
    }

    /// Replays the last undone move. Returns `false` when there is nothing
    /// to redo or a promotion is pending.
    pub fn redo(&mut self) -> bool {
        if self.promotion.is_awaiting() {
            tracing::warn!("redo rejected: a promotion is pending");
            return false;
        }
        let Some(record) = self.redo_stack.pop() else {
            return false;
        };

        if !self.undo_stack.push(record) {
            tracing::warn!(mv = %record, "undo history full; move not recorded");
        }

        if record.team == Team::Black {
            self.fullmove_number += 1;
        }
        if record.moved == PieceKind::Pawn || record.captured.is_some() {
            self.halfmove_clock = 0;
            self.hash_history.clear();
        } else {
            self.halfmove_clock += 1;
        }

        if let Some(captured) = record.captured {
            if !self.tray_mut(record.team.opponent()).push(captured) {
                tracing::warn!("capture tray full; piece not displayed");
            }
        }

        self.en_passant_col = None;
        self.board.reset_just_moved();

        // Promotions land directly as the piece that was chosen.
        let kind = record.promotion.unwrap_or(record.moved);
        self.board.place(
            record.to,
            Piece {
                kind,
                team: record.team,
                has_moved: true,
            },
        );
        self.board.clear(record.from);
        self.board.cell_mut(record.to).just_moved = true;

        if record.was_en_passant {
            self.board.clear(record.from.with_col_of(record.to));
        }
        if record.was_castling {
            self.move_castling_rook(record);
        }

        self.apply_rights_updates(&record);

        if record.moved == PieceKind::Pawn && record.from.row().abs_diff(record.to.row()) == 2 {
            self.board.cell_mut(record.to).pawn_moved_two = true;
            self.en_passant_col = Some(record.to.col());
        }

        self.settle();

        let hash = position_hash(self);
        if self.hash_history.count(hash) >= 2 {
            self.repetition = true;
        }
        if !self.hash_history.push(hash) {
            tracing::warn!("position history full; repetition tracking degraded");
        }
        true
    }
}
