//! Integration tests playing complete games through the public API.
//!
//! Moves are always fed as coordinate pairs the way a front end would
//! deliver them, and every expectation is checked through accessors only.

use arbiter_core::{Fen, PieceKind, Square, Team};
use arbiter_engine::{DrawReason, GameResult, GameState, MoveOutcome};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(state: &mut GameState, from: &str, to: &str) {
    let outcome = state
        .move_piece(sq(from), sq(to))
        .unwrap_or_else(|err| panic!("{from}{to} refused: {err}"));
    assert_eq!(outcome, MoveOutcome::Played, "unexpected interrupt on {from}{to}");
}

fn play_all(state: &mut GameState, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        play(state, from, to);
    }
}

#[test]
fn test_fools_mate() {
    // 1.f3 e5 2.g4 Qh4#
    let mut state = GameState::new();
    play_all(
        &mut state,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );

    assert!(state.status(Team::White).checked);
    assert!(state.status(Team::White).checkmated);
    assert_eq!(state.game_result(), Some(GameResult::BlackWins));
    assert!(state.is_game_over());

    // the mated side really has nothing: probe every one of its pieces
    for from in Square::all() {
        let is_white = state
            .board()
            .piece_at(from)
            .map_or(false, |p| p.team == Team::White);
        if is_white {
            assert!(state.legal_destinations(from).is_empty());
        }
    }
}

#[test]
fn test_scholars_mate() {
    // 1.e4 e5 2.Qh5 Nc6 3.Bc4 Nf6 4.Qxf7#
    let mut state = GameState::new();
    play_all(
        &mut state,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("d1", "h5"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
            ("h5", "f7"),
        ],
    );

    assert!(state.status(Team::Black).checkmated);
    assert_eq!(state.game_result(), Some(GameResult::WhiteWins));
    assert_eq!(state.captured(Team::Black), &[PieceKind::Pawn]);
    assert_eq!(state.fullmove_number(), 4);
}

#[test]
fn test_castling_lifecycle_with_undo_and_redo() {
    let start = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let mut state = GameState::from_fen(start).unwrap();

    play(&mut state, "e1", "g1");
    play(&mut state, "e8", "c8");
    let castled = state.save_fen();
    assert!(!state.castling_rights().any());

    assert!(state.undo());
    assert!(state.undo());
    assert_eq!(state.save_fen(), start);

    assert!(state.redo());
    assert!(state.redo());
    assert_eq!(state.save_fen(), castled);
    assert_eq!(
        state.board().piece_at(sq("f1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(
        state.board().piece_at(sq("d8")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
}

#[test]
fn test_en_passant_window_expires_after_one_turn() {
    let mut state = GameState::new();
    play_all(
        &mut state,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );

    // the window is open: exd6 is offered
    assert_eq!(state.en_passant_col(), Some(3));
    assert!(state.legal_destinations(sq("e5")).contains(&sq("d6")));

    // decline it; after one reply the capture is gone for good
    play(&mut state, "g1", "f3");
    play(&mut state, "a6", "a5");
    assert_eq!(state.en_passant_col(), None);
    assert!(!state.legal_destinations(sq("e5")).contains(&sq("d6")));
}

#[test]
fn test_en_passant_capture_with_undo_and_redo() {
    let mut state = GameState::new();
    play_all(
        &mut state,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    let before = state.save_fen();

    play(&mut state, "e5", "d6");
    assert!(state.board().piece_at(sq("d5")).is_none());
    assert_eq!(state.captured(Team::Black), &[PieceKind::Pawn]);

    assert!(state.undo());
    assert_eq!(state.save_fen(), before);
    assert!(state.captured(Team::Black).is_empty());

    assert!(state.redo());
    assert!(state.board().piece_at(sq("d5")).is_none());
    assert_eq!(state.captured(Team::Black), &[PieceKind::Pawn]);
}

#[test]
fn test_underpromotion_to_knight() {
    let mut state = GameState::from_fen("8/P3k3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let outcome = state.move_piece(sq("a7"), sq("a8")).unwrap();
    assert_eq!(outcome, MoveOutcome::AwaitingPromotion(sq("a8")));

    state.promote_pawn(PieceKind::Knight).unwrap();
    assert_eq!(
        state.board().piece_at(sq("a8")).map(|p| p.kind),
        Some(PieceKind::Knight)
    );
    assert_eq!(state.turn(), Team::Black);

    // the whole move reverts to the pawn and replays as the knight
    assert!(state.undo());
    assert_eq!(
        state.board().piece_at(sq("a7")).map(|p| p.kind),
        Some(PieceKind::Pawn)
    );
    assert!(state.redo());
    assert_eq!(
        state.board().piece_at(sq("a8")).map(|p| p.kind),
        Some(PieceKind::Knight)
    );
}

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut state = GameState::new();
    let shuffle = [
        ("g1", "f3"),
        ("g8", "f6"),
        ("f3", "g1"),
        ("f6", "g8"),
        ("g1", "f3"),
        ("g8", "f6"),
        ("f3", "g1"),
        ("f6", "g8"),
    ];
    for (i, (from, to)) in shuffle.iter().enumerate() {
        assert!(!state.is_threefold_repetition(), "flag set early at move {i}");
        play(&mut state, from, to);
    }

    // the starting position has now occurred three times
    assert!(state.is_threefold_repetition());
    assert_eq!(
        state.game_result(),
        Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
    );

    // rewinding leaves the twice-seen position, which is no draw
    assert!(state.undo());
    assert!(!state.is_threefold_repetition());
    assert_eq!(state.game_result(), None);

    // and replaying brings the draw right back
    assert!(state.redo());
    assert!(state.is_threefold_repetition());
}

#[test]
fn test_fifty_move_rule_reached_over_the_board() {
    let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 98 60").unwrap();
    assert!(!state.is_fifty_move_draw());

    play(&mut state, "a1", "a2");
    assert_eq!(state.halfmove_clock(), 99);
    assert!(!state.is_fifty_move_draw());

    play(&mut state, "e8", "d8");
    assert_eq!(state.halfmove_clock(), 100);
    assert!(state.is_fifty_move_draw());
    assert_eq!(
        state.game_result(),
        Some(GameResult::Draw(DrawReason::FiftyMoveRule))
    );

    // rewinding drops the clock back under the limit
    assert!(state.undo());
    assert_eq!(state.halfmove_clock(), 99);
    assert_eq!(state.game_result(), None);
}

#[test]
fn test_capture_down_to_insufficient_material() {
    let mut state = GameState::from_fen("4k3/8/8/8/8/2n5/1B6/4K3 w - - 4 30").unwrap();
    assert!(!state.is_insufficient_material());

    play(&mut state, "b2", "c3");
    assert!(state.is_insufficient_material());
    assert_eq!(
        state.game_result(),
        Some(GameResult::Draw(DrawReason::InsufficientMaterial))
    );
    assert_eq!(state.captured(Team::Black), &[PieceKind::Knight]);
}

#[test]
fn test_ruy_lopez_opening_rewinds_to_the_start() {
    // 1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 4.Bxc6 dxc6 5.O-O f6
    let mut state = GameState::new();
    play_all(
        &mut state,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "b5"),
            ("a7", "a6"),
            ("b5", "c6"),
            ("d7", "c6"),
            ("e1", "g1"),
            ("f7", "f6"),
        ],
    );
    let final_fen = state.save_fen();
    assert_eq!(state.move_history().len(), 10);
    assert!(!state.castling_rights().kingside(Team::White));
    assert!(state.castling_rights().kingside(Team::Black));

    let mut undone = 0;
    while state.undo() {
        undone += 1;
    }
    assert_eq!(undone, 10);
    assert_eq!(state.save_fen(), Fen::STARTPOS);
    assert!(state.captured(Team::White).is_empty());
    assert!(state.captured(Team::Black).is_empty());

    let mut redone = 0;
    while state.redo() {
        redone += 1;
    }
    assert_eq!(redone, 10);
    assert_eq!(state.save_fen(), final_fen);
}

#[test]
fn test_loading_mid_promotion_discards_the_interrupt() {
    let mut state = GameState::from_fen("8/P3k3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    state.move_piece(sq("a7"), sq("a8")).unwrap();
    assert!(state.promotion().is_awaiting());

    state.load_fen(Fen::STARTPOS).unwrap();
    assert!(!state.promotion().is_awaiting());
    assert!(state.move_piece(sq("e2"), sq("e4")).is_ok());
}
