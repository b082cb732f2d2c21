//! Board geometry and occupancy.

use std::fmt;

use crate::config::GameConfig;

use super::{Color, Identity, Piece};

/// Zero-indexed board coordinate. Row 0 is White's back rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns true when the square lies on the board.
    pub const fn in_bounds(&self) -> bool {
        (self.row as usize) < GameConfig::RANKS && (self.col as usize) < GameConfig::FILES
    }

    /// Signed `(row, col)` displacement from `self` to `other`.
    pub const fn delta_to(&self, other: Square) -> (i8, i8) {
        (
            other.row as i8 - self.row as i8,
            other.col as i8 - self.col as i8,
        )
    }

    /// Square reached by stepping `(dr, dc)` from `self`, if it stays on the board.
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        let row = i16::from(self.row) + i16::from(dr);
        let col = i16::from(self.col) + i16::from(dc);
        let square = Square::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?);
        square.in_bounds().then_some(square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A piece placed on the home rank during setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub square: Square,
    pub identity: Identity,
}

impl Placement {
    pub const fn new(square: Square, identity: Identity) -> Self {
        Self { square, identity }
    }
}

type Grid = [[Option<Piece>; GameConfig::FILES]; GameConfig::RANKS];

/// RANKS x FILES grid, each square holding at most one piece.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    squares: Grid,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Piece standing on `square`, `None` when empty or off the board.
    #[inline]
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.squares
            .get(square.row as usize)?
            .get(square.col as usize)?
            .as_ref()
    }

    fn slot_mut(&mut self, square: Square) -> Option<&mut Option<Piece>> {
        self.squares
            .get_mut(square.row as usize)?
            .get_mut(square.col as usize)
    }

    /// Puts `piece` on `square` and returns whatever stood there.
    ///
    /// Off-board squares are ignored and `piece` is handed back.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        match self.slot_mut(square) {
            Some(slot) => std::mem::replace(slot, piece),
            None => piece,
        }
    }

    /// Removes and returns the piece on `square`.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.slot_mut(square).and_then(Option::take)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Returns true when `square` holds a piece of `color`.
    pub fn is_owned_by(&self, square: Square, color: Color) -> bool {
        self.get(square).is_some_and(|piece| piece.color == color)
    }

    /// Iterates over every occupied square.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.as_ref()
                    .map(|piece| (Square::new(row as u8, col as u8), piece))
            })
        })
    }

    /// Mutable access to every piece on the board.
    pub fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.squares
            .iter_mut()
            .flat_map(|cells| cells.iter_mut().filter_map(Option::as_mut))
    }

    /// Squares strictly between `from` and `to` along a straight or diagonal
    /// line. Empty when the two squares are not aligned.
    pub fn between(from: Square, to: Square) -> impl Iterator<Item = Square> {
        let (dr, dc) = from.delta_to(to);
        let aligned = (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && (dr, dc) != (0, 0);
        let steps = if aligned { dr.abs().max(dc.abs()) } else { 0 };
        let (sr, sc) = (dr.signum(), dc.signum());
        (1..steps).filter_map(move |i| from.offset(sr * i, sc * i))
    }

    /// Returns true when every square strictly between `from` and `to` is empty.
    pub fn path_clear(&self, from: Square, to: Square) -> bool {
        Self::between(from, to).all(|square| self.is_empty(square))
    }
}
