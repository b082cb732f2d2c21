use std::fmt;
use std::ops::{Add, Index, IndexMut};

/// Unique identifier for a game record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Wall-clock instant in milliseconds since the Unix epoch.
///
/// The core never reads a clock; every timestamp is supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    pub const fn millis_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u64> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Side of the board. White owns row 0, Black owns the last row.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row on which this colour deploys its pieces during setup.
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => (crate::config::GameConfig::RANKS - 1) as u8,
        }
    }

    /// Row a truthfully declared King of this colour must reach to win.
    pub const fn throne_row(self) -> u8 {
        self.opponent().home_row()
    }
}

/// Pair of values indexed by [`Color`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PerColor<T>([T; 2]);

impl<T> PerColor<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self([white, black])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Color, &mut T)> {
        Color::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn map<U>(self, mut f: impl FnMut(Color, T) -> U) -> PerColor<U> {
        let [white, black] = self.0;
        PerColor([f(Color::White, white), f(Color::Black, black)])
    }
}

impl<T: Clone> PerColor<T> {
    pub fn splat(value: T) -> Self {
        Self([value.clone(), value])
    }
}

impl<T> Index<Color> for PerColor<T> {
    type Output = T;

    fn index(&self, color: Color) -> &T {
        &self.0[color.index()]
    }
}

impl<T> IndexMut<Color> for PerColor<T> {
    fn index_mut(&mut self, color: Color) -> &mut T {
        &mut self.0[color.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        for color in Color::ALL {
            assert_ne!(color, color.opponent());
            assert_eq!(color, color.opponent().opponent());
        }
    }

    #[test]
    fn throne_is_the_opponent_home_row() {
        assert_eq!(Color::White.home_row(), 0);
        assert_eq!(Color::White.throne_row(), 5);
        assert_eq!(Color::Black.throne_row(), 0);
    }

    #[test]
    fn per_color_indexes_by_side() {
        let mut daggers = PerColor::new(0u8, 2u8);
        daggers[Color::White] += 1;
        assert_eq!(daggers[Color::White], 1);
        assert_eq!(daggers[Color::Black], 2);
        let doubled = daggers.map(|_, n| n * 2);
        assert_eq!(doubled, PerColor::new(2, 4));
    }

    #[test]
    fn color_parses_case_insensitively() {
        assert_eq!("WHITE".parse::<Color>(), Ok(Color::White));
        assert_eq!(Color::Black.to_string(), "black");
    }
}
