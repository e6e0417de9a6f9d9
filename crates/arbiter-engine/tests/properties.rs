//! Randomized playouts over the full move pipeline.
//!
//! A playout picks every move from `legal_destinations`, so whatever the
//! dice produce is a legal game. Along the way each reached position must
//! serialize and reload losslessly, and afterwards the whole game must
//! rewind to the exact starting position and replay to the exact final one.

use arbiter_core::{Fen, PieceKind, Square, Team};
use arbiter_engine::{GameState, MoveOutcome};
use proptest::prelude::*;

const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

fn all_legal_moves(state: &mut GameState) -> Vec<(Square, Square)> {
    let mut moves = Vec::new();
    for from in Square::all() {
        let mine = state
            .board()
            .piece_at(from)
            .map_or(false, |p| p.team == state.turn());
        if mine {
            for to in state.legal_destinations(from) {
                moves.push((from, to));
            }
        }
    }
    moves
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn random_playouts_round_trip_and_rewind(
        choices in proptest::collection::vec(any::<u32>(), 1..40)
    ) {
        let mut state = GameState::new();
        let mut played = 0usize;

        for &choice in &choices {
            if state.is_game_over() {
                break;
            }
            let moves = all_legal_moves(&mut state);
            if moves.is_empty() {
                break;
            }
            let (from, to) = moves[choice as usize % moves.len()];
            let outcome = state
                .move_piece(from, to)
                .expect("a chosen legal destination executes");
            if let MoveOutcome::AwaitingPromotion(_) = outcome {
                let kind = PROMOTION_CHOICES[choice as usize % PROMOTION_CHOICES.len()];
                state.promote_pawn(kind).expect("promotion piece is valid");
            }
            played += 1;

            // every reached position survives a FEN round trip
            let fen = state.save_fen();
            let reloaded = GameState::from_fen(&fen).expect("engine-written FEN parses");
            prop_assert_eq!(reloaded.save_fen(), fen);

            // no legal line ever loses a king
            let kings = Square::all()
                .filter(|&sq| {
                    state
                        .board()
                        .piece_at(sq)
                        .map_or(false, |p| p.kind == PieceKind::King)
                })
                .count();
            prop_assert_eq!(kings, 2);

            // end flags stay coherent for the side to move
            let status = state.status(state.turn());
            prop_assert!(!(status.checkmated && status.stalemate));
            if status.checkmated {
                prop_assert!(status.checked);
            }
            if status.stalemate {
                prop_assert!(!status.checked);
            }
        }

        let final_fen = state.save_fen();

        let mut undone = 0usize;
        while state.undo() {
            undone += 1;
        }
        prop_assert_eq!(undone, played);
        prop_assert_eq!(state.save_fen(), Fen::STARTPOS);
        prop_assert!(state.captured(Team::White).is_empty());
        prop_assert!(state.captured(Team::Black).is_empty());

        let mut redone = 0usize;
        while state.redo() {
            redone += 1;
        }
        prop_assert_eq!(redone, played);
        prop_assert_eq!(state.save_fen(), final_fen);
    }

    #[test]
    fn legal_destinations_never_offer_own_pieces_or_kings(
        choices in proptest::collection::vec(any::<u32>(), 1..25)
    ) {
        let mut state = GameState::new();
        for &choice in &choices {
            if state.is_game_over() {
                break;
            }
            let moves = all_legal_moves(&mut state);
            if moves.is_empty() {
                break;
            }

            for &(from, to) in &moves {
                let mover = state.board().piece_at(from);
                prop_assert!(mover.is_some());
                if let Some(dest) = state.board().piece_at(to) {
                    // the only occupied destinations are enemy, never a king
                    prop_assert_ne!(dest.team, state.turn());
                    prop_assert_ne!(dest.kind, PieceKind::King);
                }
            }

            let (from, to) = moves[choice as usize % moves.len()];
            if let MoveOutcome::AwaitingPromotion(_) =
                state.move_piece(from, to).expect("legal move executes")
            {
                state.promote_pawn(PieceKind::Queen).expect("queen promotion");
            }
        }
    }
}
