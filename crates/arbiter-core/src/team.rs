//! Player team representation.

/// The two sides of a chess game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Team {
    White = 0,
    Black = 1,
}

impl Team {
    /// Returns the opposing team.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the row direction pawns advance in.
    ///
    /// Rows count from the top of the board (row 0 holds Black's back rank),
    /// so White pawns move towards smaller rows.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Team::White => -1,
            Team::Black => 1,
        }
    }

    /// Returns the back rank row for this team (7 for White, 0 for Black).
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Team::White => 7,
            Team::Black => 0,
        }
    }

    /// Returns the row this team's pawns start on.
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Team::White => 6,
            Team::Black => 1,
        }
    }

    /// Returns the row this team's pawns promote on.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Team::White => 0,
            Team::Black => 7,
        }
    }

    /// Returns the row a pawn of this team must occupy to capture en passant.
    #[inline]
    pub const fn en_passant_row(self) -> u8 {
        match self {
            Team::White => 3,
            Team::Black => 4,
        }
    }

    /// Returns the FEN active-color character (`w` or `b`).
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Team::White => 'w',
            Team::Black => 'b',
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}
