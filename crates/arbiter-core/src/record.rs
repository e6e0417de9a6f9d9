//! Self-describing move records.

use crate::{CastlingRights, PieceKind, Square, Team};

/// Everything needed to replay or reverse one committed move.
///
/// Alongside the move itself, the record snapshots the castling rights, the
/// halfmove clock, and the en passant column from before the move, so undo
/// never has to replay the game from the start. The captured piece kind is
/// read before the destination square is overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Kind of the piece that moved, before any promotion.
    pub moved: PieceKind,
    /// Team that moved.
    pub team: Team,
    /// Whether the mover had already moved before this move.
    pub mover_had_moved: bool,
    /// Kind of the captured piece, if any.
    pub captured: Option<PieceKind>,
    /// Piece chosen when a promotion completed, if any.
    pub promotion: Option<PieceKind>,
    /// True if this was an en passant capture.
    pub was_en_passant: bool,
    /// True if this was a castling move.
    pub was_castling: bool,
    /// En passant column available before the move.
    pub prior_en_passant_col: Option<u8>,
    /// Castling rights before the move.
    pub prior_rights: CastlingRights,
    /// Halfmove clock before the move.
    pub prior_halfmove_clock: u32,
}

impl MoveRecord {
    /// Returns true if the move captured a piece (including en passant).
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    /// Returns true if the move ended in a promotion.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }
}

impl std::fmt::Display for MoveRecord {
    /// Coordinate notation: source, destination, and a promotion letter when
    /// present (e.g. `e2e4`, `e7e8q`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_fen_char(Team::Black))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_record(from: Square, to: Square) -> MoveRecord {
        MoveRecord {
            from,
            to,
            moved: PieceKind::Pawn,
            team: Team::White,
            mover_had_moved: false,
            captured: None,
            promotion: None,
            was_en_passant: false,
            was_castling: false,
            prior_en_passant_col: None,
            prior_rights: CastlingRights::ALL,
            prior_halfmove_clock: 0,
        }
    }

    #[test]
    fn display_coordinate_notation() {
        let record = plain_record(
            Square::from_algebraic("e2").unwrap(),
            Square::from_algebraic("e4").unwrap(),
        );
        assert_eq!(record.to_string(), "e2e4");
    }

    #[test]
    fn display_promotion_letter() {
        let mut record = plain_record(
            Square::from_algebraic("e7").unwrap(),
            Square::from_algebraic("e8").unwrap(),
        );
        record.promotion = Some(PieceKind::Queen);
        assert_eq!(record.to_string(), "e7e8q");
        record.promotion = Some(PieceKind::Knight);
        assert_eq!(record.to_string(), "e7e8n");
    }

    #[test]
    fn capture_and_promotion_queries() {
        let mut record = plain_record(
            Square::from_algebraic("d4").unwrap(),
            Square::from_algebraic("e5").unwrap(),
        );
        assert!(!record.is_capture());
        assert!(!record.is_promotion());
        record.captured = Some(PieceKind::Knight);
        assert!(record.is_capture());
        record.promotion = Some(PieceKind::Rook);
        assert!(record.is_promotion());
    }
}
