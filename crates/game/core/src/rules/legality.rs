//! Geometric legality of a declared move.
//!
//! Only the *declared* identity matters here; the piece's true identity is
//! irrelevant until someone challenges.

use crate::config::GameConfig;
use crate::state::{Board, Declaration, Square};

/// Returns true when a piece declared as `declaration` may travel from `from`
/// to `to` on `board`.
///
/// Bishop and Rook slides are limited to [`GameConfig::MAX_SLIDE`] squares and
/// may not pass over any piece. Occupancy of `to` itself is not checked.
pub fn is_legal(board: &Board, from: Square, to: Square, declaration: Declaration) -> bool {
    if !from.in_bounds() || !to.in_bounds() || from == to {
        return false;
    }

    let (dr, dc) = from.delta_to(to);
    let (adr, adc) = (dr.unsigned_abs(), dc.unsigned_abs());

    match declaration {
        Declaration::Knight => matches!((adr, adc), (2, 1) | (1, 2)),
        Declaration::King => adr.max(adc) == 1,
        Declaration::Bishop => {
            adr == adc && adr <= GameConfig::MAX_SLIDE && board.path_clear(from, to)
        }
        Declaration::Rook => {
            (adr == 0 || adc == 0)
                && adr <= GameConfig::MAX_SLIDE
                && adc <= GameConfig::MAX_SLIDE
                && board.path_clear(from, to)
        }
    }
}

/// Every square a piece declared as `declaration` could reach from `from`,
/// ignoring what stands on the destination.
pub fn reachable(board: &Board, from: Square, declaration: Declaration) -> Vec<Square> {
    (0..GameConfig::RANKS as u8)
        .flat_map(|row| (0..GameConfig::FILES as u8).map(move |col| Square::new(row, col)))
        .filter(|&to| is_legal(board, from, to, declaration))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Color, Identity, Piece};

    const CENTER: Square = Square::new(2, 2);

    #[test]
    fn zero_vector_is_never_legal() {
        let board = Board::empty();
        for declaration in Declaration::ALL {
            assert!(!is_legal(&board, CENTER, CENTER, declaration));
        }
    }

    #[test]
    fn king_steps_one_square_in_any_direction() {
        let board = Board::empty();
        assert_eq!(reachable(&board, CENTER, Declaration::King).len(), 8);
        assert!(!is_legal(&board, CENTER, Square::new(4, 2), Declaration::King));
    }

    #[test]
    fn knight_ignores_blockers() {
        let mut board = Board::empty();
        board.set(Square::new(1, 0), Some(Piece::new(Color::White, Identity::Rook)));
        board.set(Square::new(0, 1), Some(Piece::new(Color::White, Identity::Rook)));
        assert!(is_legal(&board, Square::new(0, 0), Square::new(2, 1), Declaration::Knight));
        assert!(is_legal(&board, Square::new(0, 0), Square::new(1, 2), Declaration::Knight));
        assert!(!is_legal(&board, Square::new(0, 0), Square::new(2, 2), Declaration::Knight));
    }

    #[test]
    fn sliders_stop_after_three_squares() {
        let board = Board::empty();
        let corner = Square::new(0, 0);
        assert!(is_legal(&board, corner, Square::new(3, 0), Declaration::Rook));
        assert!(!is_legal(&board, corner, Square::new(4, 0), Declaration::Rook));
        assert!(is_legal(&board, corner, Square::new(3, 3), Declaration::Bishop));
        assert!(!is_legal(&board, corner, Square::new(4, 4), Declaration::Bishop));
        assert!(!is_legal(&board, corner, Square::new(1, 2), Declaration::Bishop));
        assert!(!is_legal(&board, corner, Square::new(1, 1), Declaration::Rook));
    }

    #[test]
    fn off_board_destination_is_illegal() {
        let board = Board::empty();
        assert!(!is_legal(&board, Square::new(5, 4), Square::new(6, 4), Declaration::King));
    }
}
