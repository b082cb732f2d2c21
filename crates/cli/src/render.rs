//! Plain-text rendering of game records.

use std::fmt::Write;

use console::style;

use gambit_core::{Color, GameConfig, GameState, Identity, Piece, Square};

/// One letter per piece: upper case for White, lower case for Black.
///
/// Hidden identities render as `?`.
pub fn piece_symbol(piece: &Piece) -> char {
    let symbol = match piece.identity {
        Identity::King => 'K',
        Identity::Bomb => 'X',
        Identity::Bishop => 'B',
        Identity::Rook => 'R',
        Identity::Knight => 'N',
        Identity::Unknown => '?',
    };
    match piece.color {
        Color::White => symbol,
        Color::Black => symbol.to_ascii_lowercase(),
    }
}

/// The board with Black's home rank on top, one rank per line.
pub fn board(state: &GameState) -> String {
    let mut out = String::new();
    for row in (0..GameConfig::RANKS as u8).rev() {
        let _ = write!(out, "{row} ");
        for col in 0..GameConfig::FILES as u8 {
            let cell = state
                .board
                .get(Square::new(row, col))
                .map_or('.', piece_symbol);
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for col in 0..GameConfig::FILES {
        let _ = write!(out, " {col}");
    }
    out.push('\n');
    out
}

fn pieces(pieces: impl IntoIterator<Item = Piece>) -> String {
    let symbols: String = pieces.into_iter().map(|p| piece_symbol(&p)).collect();
    if symbols.is_empty() {
        "-".to_owned()
    } else {
        symbols
    }
}

fn result_line(state: &GameState) -> String {
    match (state.is_active, state.winner, state.win_reason) {
        (true, _, _) => "in progress".to_owned(),
        (false, Some(winner), Some(reason)) => format!("{winner} wins ({reason})"),
        (false, None, Some(reason)) => format!("drawn ({reason})"),
        (false, _, None) => "finished".to_owned(),
    }
}

pub fn print_summary(state: &GameState) {
    println!("{}", style(format!("=== Game {} ===", state.id)).bold().green());
    println!();
    print!("{}", board(state));
    println!();

    println!("{}", style("Status:").bold().yellow());
    println!("  Phase: {}", state.phase);
    match state.player_turn {
        Some(turn) => println!("  To act: {turn}"),
        None => println!("  To act: -"),
    }
    if let Some(owing) = state.on_decking_player {
        println!("  Owes on-deck: {owing}");
    }
    println!("  Quiet resolutions: {}", state.moves_since_action);
    println!("  Result: {}", result_line(state));
    println!();

    println!("{}", style("Pieces:").bold().yellow());
    for color in Color::ALL {
        println!(
            "  {color}: daggers {}, stash {}, on deck {}, captured {}",
            state.daggers[color],
            pieces(state.stashes[color].iter().copied()),
            pieces(state.on_decks[color]),
            pieces(state.captured[color].iter().copied()),
        );
    }
    println!();

    println!(
        "{} {} moves, {} actions",
        style("Log:").bold().yellow(),
        state.moves.len(),
        state.actions.len()
    );
}
