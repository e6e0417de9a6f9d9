//! Board coordinates.
//!
//! Squares are addressed as (row, col) with both in `0..8`. Row 0 is the rank
//! FEN lists first, so Black's back rank sits at row 0 and White's at row 7.
//! Column 0 is the a-file. The checked constructor makes out-of-range
//! coordinates unrepresentable, so board indexing never needs bounds checks.

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square from row and column, if both are in range.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Returns the row (0-7, top to bottom).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7, a-file to h-file).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the flat index (`row * 8 + col`, 0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// Steps by a (row, col) delta, returning `None` if it leaves the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Keeps this square's row and takes the column of `other`.
    ///
    /// Handy for en passant geometry, where the captured pawn sits on the
    /// mover's row but the destination's column.
    #[inline]
    pub const fn with_col_of(self, other: Square) -> Square {
        Square {
            row: self.row,
            col: other.col,
        }
    }

    /// Parses algebraic notation (e.g. "e4").
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let row = 7 - (rank as u8 - b'1');
        Some(Square { row, col })
    }

    /// Returns algebraic notation (e.g. "e4").
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Returns the file letter (`a`-`h`).
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Returns the rank digit (`1`-`8`).
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + (7 - self.row)) as char
    }

    /// Iterates over all 64 squares, row 0 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..8).flat_map(|row| (0u8..8).map(move |col| Square { row, col }))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_construction() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn row_col_index() {
        let sq = Square::new(3, 5).unwrap();
        assert_eq!(sq.row(), 3);
        assert_eq!(sq.col(), 5);
        assert_eq!(sq.index(), 29);
    }

    #[test]
    fn offsets_stay_on_board() {
        let sq = Square::new(0, 0).unwrap();
        assert_eq!(sq.offset(1, 1), Square::new(1, 1));
        assert_eq!(sq.offset(-1, 0), None);
        assert_eq!(sq.offset(0, -1), None);
        let sq = Square::new(7, 7).unwrap();
        assert_eq!(sq.offset(1, 0), None);
        assert_eq!(sq.offset(0, 1), None);
        assert_eq!(sq.offset(-2, -1), Square::new(5, 6));
    }

    #[test]
    fn algebraic_round_trip() {
        // Row 0 is rank 8, so a8 is (0, 0) and h1 is (7, 7).
        assert_eq!(Square::from_algebraic("a8"), Square::new(0, 0));
        assert_eq!(Square::from_algebraic("h1"), Square::new(7, 7));
        assert_eq!(Square::from_algebraic("e4"), Square::new(4, 4));
        assert_eq!(Square::from_algebraic("e2"), Square::new(6, 4));
        for sq in Square::all() {
            assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
        }
    }

    #[test]
    fn invalid_algebraic() {
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a"), None);
        assert_eq!(Square::from_algebraic("a1x"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn all_covers_board_once() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::new(0, 0).unwrap());
        assert_eq!(squares[63], Square::new(7, 7).unwrap());
    }

    #[test]
    fn display_matches_algebraic() {
        let sq = Square::new(4, 4).unwrap();
        assert_eq!(format!("{}", sq), "e4");
    }

    #[test]
    fn with_col_of_mixes_row_and_col() {
        let d5 = Square::from_algebraic("d5").unwrap();
        let e6 = Square::from_algebraic("e6").unwrap();
        assert_eq!(d5.with_col_of(e6), Square::from_algebraic("e5").unwrap());
        assert_eq!(e6.with_col_of(d5), Square::from_algebraic("d6").unwrap());
    }
}
