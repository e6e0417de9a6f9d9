//! The [`GameState`] container and position (de)serialization.

use arbiter_core::{CastlingRights, Fen, FenError, MoveRecord, Piece, PieceKind, Square, Team};

use crate::board::{Board, CaptureTray};
use crate::hash::position_hash;
use crate::history::{HashHistory, MoveStack};

/// Per-player status flags, refreshed after every committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStatus {
    /// The player's king is attacked.
    pub checked: bool,
    /// Checked with no legal reply.
    pub checkmated: bool,
    /// Not checked, but no legal move either.
    pub stalemate: bool,
}

/// Whether a pawn is waiting on its promotion piece.
///
/// While `Awaiting`, the game holds the move open: the turn has not flipped
/// and nothing has entered the history yet. [`GameState::promote_pawn`]
/// finishes the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionState {
    Idle,
    Awaiting {
        /// Where the pawn stands, on its promotion row.
        square: Square,
        /// The half-finished move, committed once the piece is chosen.
        pending: MoveRecord,
    },
}

impl PromotionState {
    #[inline]
    pub fn is_awaiting(&self) -> bool {
        matches!(self, PromotionState::Awaiting { .. })
    }

    /// The promotion square, if a choice is pending.
    pub fn square(&self) -> Option<Square> {
        match self {
            PromotionState::Idle => None,
            PromotionState::Awaiting { square, .. } => Some(*square),
        }
    }
}

/// A complete chess game: board, clocks, castling rights, histories, and
/// per-player status.
///
/// One value owns everything needed to play, undo, redo, and serialize a
/// game. Construct with [`GameState::new`] for the standard start or
/// [`GameState::from_fen`] for an arbitrary position.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) turn: Team,
    pub(crate) rights: CastlingRights,
    /// Column of the pawn that double-stepped last move, if any.
    pub(crate) en_passant_col: Option<u8>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) white_status: PlayerStatus,
    pub(crate) black_status: PlayerStatus,
    pub(crate) promotion: PromotionState,
    /// White pieces captured by Black.
    pub(crate) captured_white: CaptureTray,
    /// Black pieces captured by White.
    pub(crate) captured_black: CaptureTray,
    pub(crate) undo_stack: MoveStack,
    pub(crate) redo_stack: MoveStack,
    /// One hash per position since the halfmove clock last reset, the
    /// current position included.
    pub(crate) hash_history: HashHistory,
    pub(crate) repetition: bool,
    pub(crate) insufficient: bool,
}

impl GameState {
    /// The standard starting position.
    pub fn new() -> Self {
        let mut state = GameState::blank();
        state
            .load_fen(Fen::STARTPOS)
            .expect("the standard starting position always parses");
        state
    }

    /// A game loaded from a FEN record.
    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        let mut state = GameState::blank();
        state.load_fen(text)?;
        Ok(state)
    }

    fn blank() -> Self {
        GameState {
            board: Board::empty(),
            turn: Team::White,
            rights: CastlingRights::NONE,
            en_passant_col: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            white_status: PlayerStatus::default(),
            black_status: PlayerStatus::default(),
            promotion: PromotionState::Idle,
            captured_white: CaptureTray::new(),
            captured_black: CaptureTray::new(),
            undo_stack: MoveStack::new(),
            redo_stack: MoveStack::new(),
            hash_history: HashHistory::new(),
            repetition: false,
            insufficient: false,
        }
    }

    /// Throws the game away and deals the standard start again.
    pub fn restart(&mut self) {
        *self = GameState::new();
    }

    /// Replaces the whole game with the position in `text`.
    ///
    /// Histories, trays, and the pending promotion (if any) are discarded;
    /// status flags are recomputed from scratch. On error the game is left
    /// untouched.
    pub fn load_fen(&mut self, text: &str) -> Result<(), FenError> {
        let fen = Fen::parse(text)?;
        let board = board_from_placement(&fen.placement)?;

        self.board = board;
        self.turn = fen.turn;
        self.rights = fen.castling;
        self.en_passant_col = fen.en_passant_col;
        self.halfmove_clock = fen.halfmove_clock;
        self.fullmove_number = fen.fullmove_number;
        self.white_status = PlayerStatus::default();
        self.black_status = PlayerStatus::default();
        self.promotion = PromotionState::Idle;
        self.captured_white.clear();
        self.captured_black.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.repetition = false;
        self.insufficient = false;

        // The en passant field names a capturable pawn; give that pawn back
        // the flags a live double-step would have left on it.
        if let Some(col) = self.en_passant_col {
            let row = self.turn.en_passant_row();
            let cell = self.board.rc_mut(row, col);
            let is_enemy_pawn = cell
                .piece
                .map_or(false, |p| p.kind == PieceKind::Pawn && p.team != fen.turn);
            if is_enemy_pawn {
                cell.just_moved = true;
                cell.pawn_moved_two = true;
            }
        }

        self.refresh_status();
        self.hash_history.reseed(position_hash(self));
        Ok(())
    }

    /// Serializes the current position as a FEN record.
    pub fn save_fen(&self) -> String {
        let mut placement = String::new();
        for row in 0..8u8 {
            if row > 0 {
                placement.push('/');
            }
            let mut empties = 0u8;
            for col in 0..8u8 {
                match self.board.rc(row, col).piece {
                    Some(piece) => {
                        if empties > 0 {
                            placement.push(char::from(b'0' + empties));
                            empties = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empties += 1,
                }
            }
            if empties > 0 {
                placement.push(char::from(b'0' + empties));
            }
        }
        Fen {
            placement,
            turn: self.turn,
            castling: self.rights,
            en_passant_col: self.en_passant_col,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Team {
        self.turn
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.rights
    }

    /// Column of the pawn currently capturable en passant, if any.
    #[inline]
    pub fn en_passant_col(&self) -> Option<u8> {
        self.en_passant_col
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn status(&self, team: Team) -> PlayerStatus {
        match team {
            Team::White => self.white_status,
            Team::Black => self.black_status,
        }
    }

    pub(crate) fn status_mut(&mut self, team: Team) -> &mut PlayerStatus {
        match team {
            Team::White => &mut self.white_status,
            Team::Black => &mut self.black_status,
        }
    }

    #[inline]
    pub fn promotion(&self) -> PromotionState {
        self.promotion
    }

    /// Pieces `team` has lost, in capture order.
    pub fn captured(&self, team: Team) -> &[PieceKind] {
        match team {
            Team::White => self.captured_white.as_slice(),
            Team::Black => self.captured_black.as_slice(),
        }
    }

    /// Tray holding pieces captured *from* `victim`.
    pub(crate) fn tray_mut(&mut self, victim: Team) -> &mut CaptureTray {
        match victim {
            Team::White => &mut self.captured_white,
            Team::Black => &mut self.captured_black,
        }
    }

    /// Every committed move, oldest first.
    pub fn move_history(&self) -> &[MoveRecord] {
        self.undo_stack.as_slice()
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

/// Builds a board from an already-validated FEN placement field.
///
/// Pawns found off their starting row are marked as having moved, so a
/// loaded pawn cannot double-step from the middle of the board.
fn board_from_placement(placement: &str) -> Result<Board, FenError> {
    let mut board = Board::empty();
    for (row, rank_text) in placement.split('/').enumerate() {
        if row >= 8 {
            return Err(FenError::Placement(placement.to_string()));
        }
        let row = row as u8;
        let mut col = 0u8;
        for ch in rank_text.chars() {
            if let Some(skip) = ch.to_digit(10) {
                col = col.saturating_add(skip as u8);
                continue;
            }
            if col >= 8 {
                return Err(FenError::Placement(placement.to_string()));
            }
            let (kind, team) = PieceKind::from_fen_char(ch)
                .ok_or_else(|| FenError::Placement(placement.to_string()))?;
            let has_moved = kind == PieceKind::Pawn && row != team.pawn_start_row();
            board.rc_mut(row, col).piece = Some(Piece {
                kind,
                team,
                has_moved,
            });
            col += 1;
        }
    }
    Ok(board)
}
