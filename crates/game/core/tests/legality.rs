use gambit_core::rules::{is_legal, reachable};
use gambit_core::{Board, Color, Declaration, GameConfig, Identity, Piece, Square};

fn all_squares() -> impl Iterator<Item = Square> {
    (0..GameConfig::RANKS as u8)
        .flat_map(|row| (0..GameConfig::FILES as u8).map(move |col| Square::new(row, col)))
}

/// Movement table evaluated on an empty board.
fn table_allows(from: Square, to: Square, declaration: Declaration) -> bool {
    let (dr, dc) = from.delta_to(to);
    let (adr, adc) = (dr.unsigned_abs(), dc.unsigned_abs());
    if (adr, adc) == (0, 0) {
        return false;
    }
    match declaration {
        Declaration::King => adr <= 1 && adc <= 1,
        Declaration::Knight => (adr, adc) == (1, 2) || (adr, adc) == (2, 1),
        Declaration::Bishop => adr == adc && adr <= 3,
        Declaration::Rook => (adr == 0 || adc == 0) && adr.max(adc) <= 3,
    }
}

#[test]
fn empty_board_matches_the_movement_table() {
    let board = Board::empty();
    for declaration in Declaration::ALL {
        for from in all_squares() {
            for to in all_squares() {
                assert_eq!(
                    is_legal(&board, from, to, declaration),
                    table_allows(from, to, declaration),
                    "{declaration} {from} -> {to}"
                );
            }
        }
    }
}

#[test]
fn every_intermediate_square_blocks_a_slide() {
    let blocker = Piece::new(Color::Black, Identity::Bomb);
    for declaration in [Declaration::Bishop, Declaration::Rook] {
        for from in all_squares() {
            for to in all_squares() {
                if !is_legal(&Board::empty(), from, to, declaration) {
                    continue;
                }
                for between in Board::between(from, to) {
                    let mut board = Board::empty();
                    board.set(between, Some(blocker));
                    assert!(
                        !is_legal(&board, from, to, declaration),
                        "{declaration} {from} -> {to} should be blocked at {between}"
                    );
                }
                let mut board = Board::empty();
                board.set(to, Some(blocker));
                assert!(
                    is_legal(&board, from, to, declaration),
                    "occupied destination does not block {declaration} {from} -> {to}"
                );
            }
        }
    }
}

#[test]
fn knights_and_kings_ignore_blockers() {
    let mut board = Board::empty();
    let from = Square::new(2, 2);
    for square in all_squares().filter(|&sq| sq != from) {
        board.set(square, Some(Piece::new(Color::White, Identity::Rook)));
    }
    assert_eq!(reachable(&board, from, Declaration::Knight).len(), 8);
    assert_eq!(reachable(&board, from, Declaration::King).len(), 8);
    assert_eq!(reachable(&board, from, Declaration::Rook).len(), 4);
    assert_eq!(reachable(&board, from, Declaration::Bishop).len(), 4);
}

#[test]
fn off_board_squares_are_never_legal() {
    let board = Board::empty();
    let inside = Square::new(0, 0);
    let outside = Square::new(0, GameConfig::FILES as u8);
    for declaration in Declaration::ALL {
        assert!(!is_legal(&board, inside, outside, declaration));
        assert!(!is_legal(&board, outside, inside, declaration));
    }
}
