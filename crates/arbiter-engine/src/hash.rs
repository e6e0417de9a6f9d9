//! Zobrist hashing for repetition detection.
//!
//! The key tables are generated at compile time from a xorshift sequence,
//! so they cost nothing at startup and are identical across runs. A hash
//! covers piece placement, the side to move, castling rights, and the en
//! passant column. The clocks are excluded on purpose: a position repeats
//! regardless of what the move counters say.

use arbiter_core::{PieceKind, Square, Team};

use crate::state::GameState;

/// One random key per hashable feature of a position.
pub(crate) struct ZobristKeys {
    pieces: [[[u64; 64]; 2]; 6],
    black_to_move: u64,
    castling: [u64; 4],
    en_passant: [u64; 8],
}

/// xorshift64 step; returns the drawn key and the successor state.
const fn next_random(mut state: u64) -> (u64, u64) {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    (state, state)
}

impl ZobristKeys {
    const fn new() -> Self {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut piece = 0;
        while piece < 6 {
            let mut team = 0;
            while team < 2 {
                let mut square = 0;
                while square < 64 {
                    let (key, next) = next_random(state);
                    pieces[piece][team][square] = key;
                    state = next;
                    square += 1;
                }
                team += 1;
            }
            piece += 1;
        }

        let (black_to_move, next) = next_random(state);
        state = next;

        let mut castling = [0u64; 4];
        let mut wing = 0;
        while wing < 4 {
            let (key, next) = next_random(state);
            castling[wing] = key;
            state = next;
            wing += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut col = 0;
        while col < 8 {
            let (key, next) = next_random(state);
            en_passant[col] = key;
            state = next;
            col += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    fn piece_key(&self, kind: PieceKind, team: Team, square: Square) -> u64 {
        self.pieces[kind.index()][team.index()][square.index()]
    }
}

pub(crate) static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Hashes the identity of the current position.
pub(crate) fn position_hash(state: &GameState) -> u64 {
    let mut hash = 0u64;
    for sq in Square::all() {
        if let Some(piece) = state.board.piece_at(sq) {
            hash ^= ZOBRIST.piece_key(piece.kind, piece.team, sq);
        }
    }
    if state.turn == Team::Black {
        hash ^= ZOBRIST.black_to_move;
    }
    if state.rights.white_kingside {
        hash ^= ZOBRIST.castling[0];
    }
    if state.rights.white_queenside {
        hash ^= ZOBRIST.castling[1];
    }
    if state.rights.black_kingside {
        hash ^= ZOBRIST.castling[2];
    }
    if state.rights.black_queenside {
        hash ^= ZOBRIST.castling[3];
    }
    if let Some(col) = state.en_passant_col {
        hash ^= ZOBRIST.en_passant[col as usize];
    }
    hash
}
