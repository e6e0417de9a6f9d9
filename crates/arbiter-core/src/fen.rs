//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! [`Fen`] is the validated six-field record. The engine converts it into its
//! board representation; this module only guarantees the text is well formed.
//! Validation is strict across every field: piece placement must describe
//! exactly eight ranks of eight files, and nothing is clamped or skipped.

use thiserror::Error;

use crate::{CastlingRights, Team};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 FEN fields, found {0}")]
    FieldCount(usize),

    #[error("bad piece placement: {0}")]
    Placement(String),

    #[error("bad active color: expected 'w' or 'b', found '{0}'")]
    ActiveColor(String),

    #[error("bad castling availability: '{0}'")]
    Castling(String),

    #[error("bad en passant target: '{0}'")]
    EnPassant(String),

    #[error("bad halfmove clock: '{0}'")]
    HalfmoveClock(String),

    #[error("bad fullmove number: '{0}'")]
    FullmoveNumber(String),
}

/// A validated FEN record.
///
/// The piece placement is kept as text (the engine walks it when populating a
/// board); the remaining fields are typed. The en passant target is reduced to
/// its column, since the row always derives from the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement field, e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub placement: String,
    /// Side to move.
    pub turn: Team,
    /// Castling availability.
    pub castling: CastlingRights,
    /// En passant target column, if any.
    pub en_passant_col: Option<u8>,
    /// Halfmove clock (plies since the last pawn move or capture).
    pub halfmove_clock: u32,
    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string, validating every field.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let placement = parts[0];
        Self::validate_placement(placement)?;

        let turn = match parts[1] {
            "w" => Team::White,
            "b" => Team::Black,
            other => return Err(FenError::ActiveColor(other.to_string())),
        };

        let castling = CastlingRights::from_fen_segment(parts[2])
            .ok_or_else(|| FenError::Castling(parts[2].to_string()))?;

        let en_passant_col = Self::parse_en_passant(parts[3], turn)?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::HalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::FullmoveNumber(parts[5].to_string()))?;

        Ok(Fen {
            placement: placement.to_string(),
            turn,
            castling,
            en_passant_col,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn validate_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::Placement(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        for (i, rank) in ranks.iter().enumerate() {
            let mut files = 0u32;
            for c in rank.chars() {
                if let Some(d) = c.to_digit(10) {
                    files += d;
                } else if "pnbrqkPNBRQK".contains(c) {
                    files += 1;
                } else {
                    return Err(FenError::Placement(format!(
                        "unknown character '{}' in rank {}",
                        c,
                        8 - i
                    )));
                }
            }
            if files != 8 {
                return Err(FenError::Placement(format!(
                    "rank {} covers {} files, expected 8",
                    8 - i,
                    files
                )));
            }
        }

        Ok(())
    }

    /// Parses the en passant field.
    ///
    /// The target rank must agree with the side to move: a target only exists
    /// behind a pawn the *opponent* just double-stepped, so White to move
    /// requires rank 6 and Black to move rank 3. Accepting the inconsistent
    /// combination would break the save/load round trip.
    fn parse_en_passant(ep: &str, turn: Team) -> Result<Option<u8>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        let chars: Vec<char> = ep.chars().collect();
        if chars.len() != 2 {
            return Err(FenError::EnPassant(ep.to_string()));
        }
        if !('a'..='h').contains(&chars[0]) {
            return Err(FenError::EnPassant(ep.to_string()));
        }
        let expected_rank = match turn {
            Team::White => '6',
            Team::Black => '3',
        };
        if chars[1] != expected_rank {
            return Err(FenError::EnPassant(ep.to_string()));
        }

        Ok(Some(chars[0] as u8 - b'a'))
    }
}

impl std::fmt::Display for Fen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ep = match self.en_passant_col {
            Some(col) => {
                let rank = match self.turn {
                    Team::White => '6',
                    Team::Black => '3',
                };
                format!("{}{}", (b'a' + col) as char, rank)
            }
            None => "-".to_string(),
        };
        write!(
            f,
            "{} {} {} {} {} {}",
            self.placement,
            self.turn.fen_char(),
            self.castling.to_fen_segment(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
