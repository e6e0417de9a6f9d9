//! The 8x8 mailbox board and the captured-piece trays.
//!
//! Every square is a [`Cell`]: an optional occupant plus a set of transient
//! flags written by the validation scans. The flags make the board itself the
//! working storage for move generation, so a scan never allocates.

use std::fmt;

use arbiter_core::{Piece, PieceKind, Square, Team};

/// One board square.
///
/// `piece` is the occupant. The booleans are scratch state:
///
/// * `primary_valid` - reachable by the currently selected piece, before
///   check filtering.
/// * `is_valid` - reachable *and* leaves the mover's king safe. Only
///   meaningful for the most recent selection.
/// * `vulnerable` - attacked or covered by the side that just moved.
/// * `just_moved` - the last committed move ended here.
/// * `pawn_moved_two` - a pawn double-stepped onto this square.
///
/// `just_moved && pawn_moved_two` together identify the one pawn that may be
/// captured en passant this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub piece: Option<Piece>,
    pub primary_valid: bool,
    pub is_valid: bool,
    pub vulnerable: bool,
    pub just_moved: bool,
    pub pawn_moved_two: bool,
}

impl Cell {
    /// Team of the occupant, if any.
    #[inline]
    pub fn team(&self) -> Option<Team> {
        self.piece.map(|p| p.team)
    }
}

/// An 8x8 grid of cells, indexed `[row][col]` with row 0 at the top
/// (Black's back row) to match FEN reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Board {
    /// A board with no pieces and all flags cleared.
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::default(); 8]; 8],
        }
    }

    #[inline]
    pub fn cell(&self, sq: Square) -> &Cell {
        &self.cells[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn cell_mut(&mut self, sq: Square) -> &mut Cell {
        &mut self.cells[sq.row() as usize][sq.col() as usize]
    }

    /// Direct (row, col) access for fixed board geometry such as castling
    /// files. Both coordinates must be in `0..8`.
    #[inline]
    pub fn rc(&self, row: u8, col: u8) -> &Cell {
        debug_assert!(row < 8 && col < 8);
        &self.cells[row as usize][col as usize]
    }

    #[inline]
    pub fn rc_mut(&mut self, row: u8, col: u8) -> &mut Cell {
        debug_assert!(row < 8 && col < 8);
        &mut self.cells[row as usize][col as usize]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cell(sq).piece
    }

    /// Puts `piece` on `sq`, replacing any occupant.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.cell_mut(sq).piece = Some(piece);
    }

    /// Removes the occupant of `sq`, leaving the cell's flags untouched.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.cell_mut(sq).piece = None;
    }

    /// Removes and returns the occupant of `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cell_mut(sq).piece.take()
    }

    pub fn reset_primary_valid(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.primary_valid = false;
            }
        }
    }

    pub fn reset_is_valid(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.is_valid = false;
            }
        }
    }

    pub fn reset_vulnerable(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.vulnerable = false;
            }
        }
    }

    /// Clears `just_moved` and `pawn_moved_two` everywhere. Run before each
    /// commit so the en passant window lasts exactly one turn.
    pub fn reset_just_moved(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.just_moved = false;
                cell.pawn_moved_two = false;
            }
        }
    }

    /// Locates `team`'s king. `None` only on boards loaded without one.
    pub fn find_king(&self, team: Team) -> Option<Square> {
        Square::all().find(|&sq| {
            self.cell(sq)
                .piece
                .map_or(false, |p| p.kind == PieceKind::King && p.team == team)
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let glyph = self.rc(row, col).piece.map_or('.', |p| p.to_fen_char());
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        write!(f, "\n   a b c d e f g h")
    }
}

/// Captured pieces of one team, in capture order.
///
/// Sixteen slots suffice for any legal game, so the tray is a fixed array
/// behind a length, like a move list. `push` reports success instead of
/// panicking when the tray is somehow full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTray {
    pieces: [PieceKind; CaptureTray::CAPACITY],
    len: usize,
}

impl CaptureTray {
    pub const CAPACITY: usize = 16;

    pub fn new() -> Self {
        CaptureTray {
            pieces: [PieceKind::Pawn; CaptureTray::CAPACITY],
            len: 0,
        }
    }

    /// Appends a captured piece. Returns `false` if the tray is full.
    pub fn push(&mut self, kind: PieceKind) -> bool {
        if self.len == CaptureTray::CAPACITY {
            return false;
        }
        self.pieces[self.len] = kind;
        self.len += 1;
        true
    }

    /// Removes the most recent capture, if any.
    pub fn pop(&mut self) -> Option<PieceKind> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.pieces[self.len])
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[PieceKind] {
        &self.pieces[..self.len]
    }
}

impl Default for CaptureTray {
    fn default() -> Self {
        CaptureTray::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn place_and_take() {
        let mut board = Board::empty();
        let knight = Piece::new(PieceKind::Knight, Team::White);
        board.place(sq("g1"), knight);
        assert_eq!(board.piece_at(sq("g1")), Some(knight));
        assert_eq!(board.take(sq("g1")), Some(knight));
        assert_eq!(board.piece_at(sq("g1")), None);
    }

    #[test]
    fn clear_keeps_flags() {
        let mut board = Board::empty();
        board.place(sq("e4"), Piece::new(PieceKind::Pawn, Team::White));
        board.cell_mut(sq("e4")).just_moved = true;
        board.clear(sq("e4"));
        assert!(board.cell(sq("e4")).just_moved);
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn reset_just_moved_clears_pawn_moved_two() {
        let mut board = Board::empty();
        let cell = board.cell_mut(sq("e4"));
        cell.just_moved = true;
        cell.pawn_moved_two = true;
        board.reset_just_moved();
        assert!(!board.cell(sq("e4")).just_moved);
        assert!(!board.cell(sq("e4")).pawn_moved_two);
    }

    #[test]
    fn find_king_by_team() {
        let mut board = Board::empty();
        board.place(sq("e1"), Piece::new(PieceKind::King, Team::White));
        board.place(sq("e8"), Piece::new(PieceKind::King, Team::Black));
        assert_eq!(board.find_king(Team::White), Some(sq("e1")));
        assert_eq!(board.find_king(Team::Black), Some(sq("e8")));
        board.clear(sq("e8"));
        assert_eq!(board.find_king(Team::Black), None);
    }

    #[test]
    fn tray_is_bounded() {
        let mut tray = CaptureTray::new();
        for _ in 0..CaptureTray::CAPACITY {
            assert!(tray.push(PieceKind::Pawn));
        }
        assert!(!tray.push(PieceKind::Queen));
        assert_eq!(tray.len(), CaptureTray::CAPACITY);
        assert_eq!(tray.pop(), Some(PieceKind::Pawn));
        assert_eq!(tray.len(), CaptureTray::CAPACITY - 1);
    }

    #[test]
    fn tray_keeps_capture_order() {
        let mut tray = CaptureTray::new();
        tray.push(PieceKind::Knight);
        tray.push(PieceKind::Queen);
        assert_eq!(tray.as_slice(), &[PieceKind::Knight, PieceKind::Queen]);
        assert_eq!(tray.pop(), Some(PieceKind::Queen));
        assert_eq!(tray.as_slice(), &[PieceKind::Knight]);
    }

    #[test]
    fn display_has_rank_and_file_labels() {
        let mut board = Board::empty();
        board.place(sq("e1"), Piece::new(PieceKind::King, Team::White));
        let text = board.to_string();
        assert!(text.starts_with("8 "));
        assert!(text.contains('K'));
        assert!(text.ends_with("a b c d e f g h"));
    }
}
