//! Castling rights bookkeeping.

use crate::Team;

/// Per-side, per-wing castling eligibility.
///
/// Rights are persistent: they fall when the king or the relevant rook moves
/// (or the rook is captured) and are only ever restored by undoing the move
/// that cleared them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    /// All four rights available.
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    /// No rights available.
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    /// Returns true if the given team may still castle kingside.
    #[inline]
    pub const fn kingside(self, team: Team) -> bool {
        match team {
            Team::White => self.white_kingside,
            Team::Black => self.black_kingside,
        }
    }

    /// Returns true if the given team may still castle queenside.
    #[inline]
    pub const fn queenside(self, team: Team) -> bool {
        match team {
            Team::White => self.white_queenside,
            Team::Black => self.black_queenside,
        }
    }

    /// Clears the kingside right for a team.
    #[inline]
    pub fn clear_kingside(&mut self, team: Team) {
        match team {
            Team::White => self.white_kingside = false,
            Team::Black => self.black_kingside = false,
        }
    }

    /// Clears the queenside right for a team.
    #[inline]
    pub fn clear_queenside(&mut self, team: Team) {
        match team {
            Team::White => self.white_queenside = false,
            Team::Black => self.black_queenside = false,
        }
    }

    /// Clears both rights for a team.
    #[inline]
    pub fn clear_team(&mut self, team: Team) {
        self.clear_kingside(team);
        self.clear_queenside(team);
    }

    /// Returns true if any right remains.
    #[inline]
    pub const fn any(self) -> bool {
        self.white_kingside || self.white_queenside || self.black_kingside || self.black_queenside
    }

    /// Parses the FEN castling field (`KQkq` subset or `-`).
    ///
    /// Letters may repeat or arrive out of order; unknown characters fail.
    pub fn from_fen_segment(segment: &str) -> Option<CastlingRights> {
        if segment == "-" {
            return Some(CastlingRights::NONE);
        }
        if segment.is_empty() {
            return None;
        }
        let mut rights = CastlingRights::NONE;
        for c in segment.chars() {
            match c {
                'K' => rights.white_kingside = true,
                'Q' => rights.white_queenside = true,
                'k' => rights.black_kingside = true,
                'q' => rights.black_queenside = true,
                _ => return None,
            }
        }
        Some(rights)
    }

    /// Writes the FEN castling field in canonical `KQkq` order.
    pub fn to_fen_segment(self) -> String {
        if !self.any() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        if self.white_kingside {
            s.push('K');
        }
        if self.white_queenside {
            s.push('Q');
        }
        if self.black_kingside {
            s.push('k');
        }
        if self.black_queenside {
            s.push('q');
        }
        s
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::NONE
    }
}
