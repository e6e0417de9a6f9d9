//! Geometric move generation and threat scanning.
//!
//! One scanner serves two purposes, selected by [`Marking`]: computing
//! candidate destinations for a selected piece, or painting the threat map
//! of a whole side. The rules differ in small but load-bearing ways. A
//! slider's threat ray includes its first blocker even when that blocker is
//! friendly, because a covered piece must not be capturable by the enemy
//! king. A pawn's forward pushes are moves but never threats, while its
//! diagonals threaten even when empty.

use arbiter_core::{CastlingRights, PieceKind, Square, Team};

use crate::board::Board;
use crate::state::GameState;

pub(crate) const KING_START_COL: u8 = 4;
pub(crate) const ROOK_QS_COL: u8 = 0;
pub(crate) const ROOK_KS_COL: u8 = 7;
pub(crate) const CASTLE_KS_KING_COL: u8 = 6;
pub(crate) const CASTLE_QS_KING_COL: u8 = 2;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Which flag a scan writes into the cells it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marking {
    /// Candidate destinations for the side to move (`primary_valid`).
    Moves,
    /// Squares the scanned side attacks or covers (`vulnerable`).
    Threats,
}

#[inline]
fn mark(board: &mut Board, sq: Square, marking: Marking) {
    match marking {
        Marking::Moves => board.cell_mut(sq).primary_valid = true,
        Marking::Threats => board.cell_mut(sq).vulnerable = true,
    }
}

/// Marks everything the piece on `at` reaches, per its movement pattern.
/// Castling and en passant are separate scans; see [`mark_castling`] and
/// [`mark_en_passant`].
pub(crate) fn mark_piece(board: &mut Board, at: Square, marking: Marking) {
    let Some(piece) = board.piece_at(at) else {
        return;
    };
    match piece.kind {
        PieceKind::Rook => cast_rays(board, at, piece.team, &ROOK_DIRECTIONS, marking),
        PieceKind::Bishop => cast_rays(board, at, piece.team, &BISHOP_DIRECTIONS, marking),
        PieceKind::Queen => {
            cast_rays(board, at, piece.team, &ROOK_DIRECTIONS, marking);
            cast_rays(board, at, piece.team, &BISHOP_DIRECTIONS, marking);
        }
        PieceKind::Knight => mark_leaper(board, at, piece.team, marking),
        PieceKind::King => mark_king(board, at, piece.team, marking),
        PieceKind::Pawn => mark_pawn(board, at, piece.team, piece.has_moved, marking),
    }
}

fn cast_rays(
    board: &mut Board,
    from: Square,
    team: Team,
    directions: &[(i8, i8)],
    marking: Marking,
) {
    for &(dr, dc) in directions {
        let mut sq = from;
        while let Some(next) = sq.offset(dr, dc) {
            if ray_square(board, next, team, marking) {
                break;
            }
            sq = next;
        }
    }
}

/// Handles one square along a slider ray. Returns `true` when the ray stops.
fn ray_square(board: &mut Board, sq: Square, team: Team, marking: Marking) -> bool {
    match board.piece_at(sq) {
        None => {
            mark(board, sq, marking);
            false
        }
        Some(other) if other.team != team => {
            mark(board, sq, marking);
            true
        }
        Some(_) => {
            // The ray covers its own blocker: the enemy king may not
            // capture a defended piece.
            if marking == Marking::Threats {
                board.cell_mut(sq).vulnerable = true;
            }
            true
        }
    }
}

fn mark_leaper(board: &mut Board, at: Square, team: Team, marking: Marking) {
    for &(dr, dc) in &KNIGHT_OFFSETS {
        let Some(sq) = at.offset(dr, dc) else {
            continue;
        };
        match board.piece_at(sq) {
            None => mark(board, sq, marking),
            Some(other) if other.team != team => mark(board, sq, marking),
            Some(_) => {}
        }
    }
}

fn mark_king(board: &mut Board, at: Square, team: Team, marking: Marking) {
    for &(dr, dc) in &KING_OFFSETS {
        let Some(sq) = at.offset(dr, dc) else {
            continue;
        };
        // The standing threat map keeps the king off attacked squares
        // before simulation even runs.
        if marking == Marking::Moves && board.cell(sq).vulnerable {
            continue;
        }
        match board.piece_at(sq) {
            None => mark(board, sq, marking),
            Some(other) if other.team != team => mark(board, sq, marking),
            Some(_) => {}
        }
    }
}

fn mark_pawn(board: &mut Board, at: Square, team: Team, has_moved: bool, marking: Marking) {
    let dir = team.pawn_direction();

    // Forward pushes are moves only; a pawn never attacks straight ahead.
    if marking == Marking::Moves {
        if let Some(one) = at.offset(dir, 0) {
            if board.piece_at(one).is_none() {
                board.cell_mut(one).primary_valid = true;
                if !has_moved {
                    if let Some(two) = at.offset(2 * dir, 0) {
                        if board.piece_at(two).is_none() {
                            board.cell_mut(two).primary_valid = true;
                        }
                    }
                }
            }
        }
    }

    for dc in [-1i8, 1] {
        let Some(diag) = at.offset(dir, dc) else {
            continue;
        };
        match marking {
            // A diagonal is a move only onto an enemy piece.
            Marking::Moves => {
                if board.piece_at(diag).map_or(false, |p| p.team != team) {
                    board.cell_mut(diag).primary_valid = true;
                }
            }
            // But it threatens whether occupied or not.
            Marking::Threats => {
                if board.piece_at(diag).map_or(true, |p| p.team != team) {
                    board.cell_mut(diag).vulnerable = true;
                }
            }
        }
    }
}

/// Marks the en passant destination(s) for the pawn on `at`, if the
/// adjacent enemy pawn double-stepped last move.
pub(crate) fn mark_en_passant(board: &mut Board, at: Square) {
    let Some(piece) = board.piece_at(at) else {
        return;
    };
    if piece.kind != PieceKind::Pawn || at.row() != piece.team.en_passant_row() {
        return;
    }
    let dir = piece.team.pawn_direction();
    for dc in [-1i8, 1] {
        let Some(beside) = at.offset(0, dc) else {
            continue;
        };
        let window = {
            let cell = board.cell(beside);
            cell.just_moved && cell.pawn_moved_two
        };
        if window {
            if let Some(dest) = at.offset(dir, dc) {
                board.cell_mut(dest).primary_valid = true;
            }
        }
    }
}

/// Marks castling destinations for `team`'s king on its starting square.
///
/// A wing qualifies when its right survives, the squares between king and
/// rook are empty, and neither square the king crosses is under attack. A
/// checked king cannot castle at all. Rook presence is tracked by the
/// rights themselves.
pub(crate) fn mark_castling(board: &mut Board, team: Team, rights: CastlingRights, checked: bool) {
    if checked {
        return;
    }
    let row = team.back_row();
    let king_home = board.rc(row, KING_START_COL);
    let king_at_home = king_home
        .piece
        .map_or(false, |p| p.kind == PieceKind::King && p.team == team);
    if !king_at_home {
        return;
    }

    if rights.queenside(team)
        && board.rc(row, 1).piece.is_none()
        && board.rc(row, 2).piece.is_none()
        && board.rc(row, 3).piece.is_none()
        && !board.rc(row, 2).vulnerable
        && !board.rc(row, 3).vulnerable
    {
        board.rc_mut(row, CASTLE_QS_KING_COL).primary_valid = true;
    }

    if rights.kingside(team)
        && board.rc(row, 5).piece.is_none()
        && board.rc(row, 6).piece.is_none()
        && !board.rc(row, 5).vulnerable
        && !board.rc(row, 6).vulnerable
    {
        board.rc_mut(row, CASTLE_KS_KING_COL).primary_valid = true;
    }
}

/// Repaints the threat map: clears `vulnerable` everywhere, then marks every
/// square `by` attacks or covers.
pub(crate) fn scan_threats(board: &mut Board, by: Team) {
    board.reset_vulnerable();
    for sq in Square::all() {
        if board.piece_at(sq).map_or(false, |p| p.team == by) {
            mark_piece(board, sq, Marking::Threats);
        }
    }
}

impl GameState {
    /// Recomputes raw candidate destinations for the piece on `at`,
    /// including castling and en passant. Clears the previous selection's
    /// marks first. Selecting an empty square or an enemy piece simply
    /// leaves the board unmarked.
    pub fn primary_validation(&mut self, at: Square) {
        self.board.reset_primary_valid();
        let Some(piece) = self.board.piece_at(at) else {
            return;
        };
        if piece.team != self.turn {
            return;
        }
        mark_piece(&mut self.board, at, Marking::Moves);
        match piece.kind {
            PieceKind::King => {
                let checked = self.status(piece.team).checked;
                mark_castling(&mut self.board, piece.team, self.rights, checked)
            }
            PieceKind::Pawn => mark_en_passant(&mut self.board, at),
            _ => {}
        }
    }
}
