//! Game-end rules: check, checkmate, stalemate, and the draw conditions.

use arbiter_core::{PieceKind, Square};

use crate::board::Board;
use crate::movegen::scan_threats;
use crate::state::{GameState, PlayerStatus};

/// Halfmove-clock value at which the fifty-move rule draws the game
/// (fifty full moves by each side without a pawn move or capture).
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u32 = 100;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White delivered checkmate.
    WhiteWins,
    /// Black delivered checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves while not in check.
    Stalemate,
    /// Neither side retains mating material.
    InsufficientMaterial,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
}

impl GameState {
    /// Repaints the threat map and recomputes every status flag for the
    /// side to move. The opponent's flags reset: having just moved, they
    /// cannot be the one who is checked or trapped.
    pub(crate) fn refresh_status(&mut self) {
        self.board.reset_primary_valid();
        self.board.reset_is_valid();
        scan_threats(&mut self.board, self.turn.opponent());

        let turn = self.turn;
        let checked = self
            .board
            .find_king(turn)
            .map_or(false, |king| self.board.cell(king).vulnerable);
        let trapped = !self.has_any_legal_move(turn);

        *self.status_mut(turn.opponent()) = PlayerStatus::default();
        let status = self.status_mut(turn);
        status.checked = checked;
        status.checkmated = checked && trapped;
        status.stalemate = !checked && trapped;

        self.insufficient = insufficient_material(&self.board);
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.white_status.checkmated || self.black_status.checkmated
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.white_status.stalemate || self.black_status.stalemate
    }

    #[inline]
    pub fn is_insufficient_material(&self) -> bool {
        self.insufficient
    }

    #[inline]
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition
    }

    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVE_LIMIT
    }

    /// The verdict, if the game has ended; `None` while play continues.
    ///
    /// Checkmate outranks every draw, and stalemate outranks the
    /// claimable draws.
    pub fn game_result(&self) -> Option<GameResult> {
        if self.white_status.checkmated {
            return Some(GameResult::BlackWins);
        }
        if self.black_status.checkmated {
            return Some(GameResult::WhiteWins);
        }
        if self.is_stalemate() {
            return Some(GameResult::Draw(DrawReason::Stalemate));
        }
        if self.insufficient {
            return Some(GameResult::Draw(DrawReason::InsufficientMaterial));
        }
        if self.repetition {
            return Some(GameResult::Draw(DrawReason::ThreefoldRepetition));
        }
        if self.is_fifty_move_draw() {
            return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
        }
        None
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_result().is_some()
    }
}

/// True when neither side can possibly deliver mate: bare kings, a single
/// minor piece in total, or exactly one bishop per side with both bishops
/// on the same square color. Any queen, rook, or pawn keeps mate possible.
fn insufficient_material(board: &Board) -> bool {
    let mut minors = [0u32; 2];
    let mut bishops = [0u32; 2];
    let mut bishop_shade = [0u8; 2];

    for sq in Square::all() {
        let Some(piece) = board.piece_at(sq) else {
            continue;
        };
        let side = piece.team.index();
        match piece.kind {
            PieceKind::Queen | PieceKind::Rook | PieceKind::Pawn => return false,
            PieceKind::Bishop => {
                minors[side] += 1;
                bishops[side] += 1;
                bishop_shade[side] = (sq.row() + sq.col()) % 2;
            }
            PieceKind::Knight => minors[side] += 1,
            PieceKind::King => {}
        }
    }

    if minors[0] + minors[1] <= 1 {
        return true;
    }
    minors[0] + minors[1] == 2
        && bishops[0] == 1
        && bishops[1] == 1
        && bishop_shade[0] == bishop_shade[1]
}
