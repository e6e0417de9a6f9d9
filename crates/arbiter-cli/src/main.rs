//! Arbiter CLI - play chess in the terminal.
//!
//! Reads one command per line from stdin and reprints the board after
//! every change. Moves are coordinate pairs like `e2e4`; `help` lists
//! the rest.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use arbiter_core::{PieceKind, Square, Team};
use arbiter_engine::{DrawReason, GameResult, GameState, MoveOutcome};
use clap::Parser;

/// Arbiter - a terminal chess board with full rules.
#[derive(Parser)]
#[command(name = "arbiter")]
#[command(about = "Play chess in the terminal")]
struct Args {
    /// Start from this FEN instead of the standard position
    #[arg(long)]
    fen: Option<String>,
}

enum Flow {
    Continue,
    Quit,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut game = match args.fen {
        Some(text) => GameState::from_fen(&text).context("the --fen position did not parse")?,
        None => GameState::new(),
    };

    render(&game);
    announce(&game);
    prompt(&game)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error reading input: {e}");
                continue;
            }
        };
        let input = line.trim();
        if input.is_empty() {
            prompt(&game)?;
            continue;
        }
        match dispatch(&mut game, input) {
            Flow::Continue => prompt(&game)?,
            Flow::Quit => break,
        }
    }

    Ok(())
}

fn dispatch(game: &mut GameState, input: &str) -> Flow {
    // A pending promotion locks the session until the piece is chosen.
    if game.promotion().is_awaiting() {
        return promotion_choice(game, input);
    }

    let (command, rest) = match input.split_once(' ') {
        Some((head, tail)) => (head, tail.trim()),
        None => (input, ""),
    };

    match command {
        "quit" | "exit" => return Flow::Quit,
        "help" => print_help(),
        "restart" => {
            game.restart();
            render(game);
        }
        "undo" => {
            if game.undo() {
                render(game);
            } else {
                println!("nothing to undo");
            }
        }
        "redo" => {
            if game.redo() {
                render(game);
            } else {
                println!("nothing to redo");
            }
        }
        "fen" => println!("{}", game.save_fen()),
        "load" => match game.load_fen(rest) {
            Ok(()) => {
                render(game);
                announce(game);
            }
            Err(err) => println!("load failed: {err}"),
        },
        "captured" => print_captured(game),
        "moves" => match Square::from_algebraic(rest) {
            Some(square) => print_moves(game, square),
            None => println!("usage: moves <square>   e.g. moves e2"),
        },
        _ => try_move(game, input),
    }
    Flow::Continue
}

fn try_move(game: &mut GameState, input: &str) {
    let Some((from, to)) = parse_move(input) else {
        println!("unrecognized command: {input}   (try `help`)");
        return;
    };
    // The engine trusts its caller with the destination, so vet it here.
    if !game.legal_destinations(from).contains(&to) {
        println!("illegal move: {input}");
        return;
    }
    match game.move_piece(from, to) {
        Ok(MoveOutcome::Played) => {
            render(game);
            announce(game);
        }
        Ok(MoveOutcome::AwaitingPromotion(square)) => {
            println!("promotion on {square}: choose q, r, b, or n");
        }
        Err(err) => println!("refused: {err}"),
    }
}

fn promotion_choice(game: &mut GameState, input: &str) -> Flow {
    let kind = match input {
        "q" | "queen" => PieceKind::Queen,
        "r" | "rook" => PieceKind::Rook,
        "b" | "bishop" => PieceKind::Bishop,
        "n" | "knight" => PieceKind::Knight,
        "quit" | "exit" => return Flow::Quit,
        _ => {
            println!("a promotion is pending: choose q, r, b, or n");
            return Flow::Continue;
        }
    };
    match game.promote_pawn(kind) {
        Ok(()) => {
            render(game);
            announce(game);
        }
        Err(err) => println!("refused: {err}"),
    }
    Flow::Continue
}

/// Splits `e2e4` into its two squares.
fn parse_move(input: &str) -> Option<(Square, Square)> {
    if input.len() != 4 || !input.is_ascii() {
        return None;
    }
    let (from, to) = input.split_at(2);
    Some((Square::from_algebraic(from)?, Square::from_algebraic(to)?))
}

fn render(game: &GameState) {
    println!("\n{}\n", game.board());
}

/// Reports check and game-over verdicts for the position on the board.
fn announce(game: &GameState) {
    match game.game_result() {
        Some(GameResult::WhiteWins) => println!("checkmate, White wins"),
        Some(GameResult::BlackWins) => println!("checkmate, Black wins"),
        Some(GameResult::Draw(reason)) => println!("draw: {}", draw_text(reason)),
        None => {
            if game.status(game.turn()).checked {
                println!("{} is in check", game.turn());
            }
        }
    }
}

fn draw_text(reason: DrawReason) -> &'static str {
    match reason {
        DrawReason::Stalemate => "stalemate",
        DrawReason::InsufficientMaterial => "insufficient material",
        DrawReason::FiftyMoveRule => "fifty-move rule",
        DrawReason::ThreefoldRepetition => "threefold repetition",
    }
}

fn prompt(game: &GameState) -> io::Result<()> {
    if let Some(square) = game.promotion().square() {
        print!("promote on {square} (q/r/b/n)> ");
    } else {
        print!("{} to move> ", game.turn());
    }
    io::stdout().flush()
}

fn print_moves(game: &mut GameState, square: Square) {
    let destinations = game.legal_destinations(square);
    if destinations.is_empty() {
        println!("no legal moves from {square}");
        return;
    }
    let list: Vec<String> = destinations.iter().map(Square::to_string).collect();
    println!("{square}: {}", list.join(" "));
}

fn print_captured(game: &GameState) {
    for team in [Team::White, Team::Black] {
        let lost = game.captured(team);
        if lost.is_empty() {
            println!("{team} has lost nothing");
        } else {
            let names: Vec<String> = lost.iter().map(PieceKind::to_string).collect();
            println!("{team} has lost: {}", names.join(", "));
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  e2e4          play a move (from-square, to-square)");
    println!("  moves <sq>    list the legal destinations from a square");
    println!("  undo / redo   step through the move history");
    println!("  fen           print the current position as FEN");
    println!("  load <fen>    replace the position");
    println!("  restart       back to the standard starting position");
    println!("  captured      list the pieces each side has lost");
    println!("  quit          leave");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn parse_move_accepts_coordinate_pairs() {
        assert_eq!(parse_move("e2e4"), Some((sq("e2"), sq("e4"))));
        assert_eq!(parse_move("a7a8"), Some((sq("a7"), sq("a8"))));
    }

    #[test]
    fn parse_move_rejects_malformed_input() {
        assert_eq!(parse_move("e2"), None);
        assert_eq!(parse_move("e2e44"), None);
        assert_eq!(parse_move("e2x4"), None);
        // Four bytes but not four ASCII chars; split_at(2) would land inside é.
        assert_eq!(parse_move("aé4"), None);
    }

    #[test]
    fn draw_text_names_every_reason() {
        assert_eq!(draw_text(DrawReason::Stalemate), "stalemate");
        assert_eq!(draw_text(DrawReason::FiftyMoveRule), "fifty-move rule");
    }
}
