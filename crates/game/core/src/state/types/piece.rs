//! Piece identities and declarations.

use super::Color;

/// True identity of a piece.
///
/// `Unknown` is only ever produced by the information mask; the authoritative
/// record never stores it.
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
pub enum Identity {
    Unknown,
    King,
    Bomb,
    Bishop,
    Rook,
    Knight,
}

impl Identity {
    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Identity::Unknown)
    }
}

/// Identity a player may claim when moving a piece.
///
/// Bombs never move, so a Bomb cannot be declared.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Declaration {
    King,
    Bishop,
    Rook,
    Knight,
}

impl Declaration {
    pub const ALL: [Declaration; 4] = [
        Declaration::King,
        Declaration::Bishop,
        Declaration::Rook,
        Declaration::Knight,
    ];

    pub const fn identity(self) -> Identity {
        match self {
            Declaration::King => Identity::King,
            Declaration::Bishop => Identity::Bishop,
            Declaration::Rook => Identity::Rook,
            Declaration::Knight => Identity::Knight,
        }
    }
}

impl From<Declaration> for Identity {
    fn from(declaration: Declaration) -> Self {
        declaration.identity()
    }
}

impl TryFrom<Identity> for Declaration {
    type Error = Identity;

    fn try_from(identity: Identity) -> Result<Self, Self::Error> {
        match identity {
            Identity::King => Ok(Declaration::King),
            Identity::Bishop => Ok(Declaration::Bishop),
            Identity::Rook => Ok(Declaration::Rook),
            Identity::Knight => Ok(Declaration::Knight),
            other @ (Identity::Unknown | Identity::Bomb) => Err(other),
        }
    }
}

/// A piece on the board, in a stash, on deck, or captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub identity: Identity,
}

impl Piece {
    pub const fn new(color: Color, identity: Identity) -> Self {
        Self { color, identity }
    }

    /// Same piece with its identity hidden.
    pub const fn masked(self) -> Self {
        Self {
            color: self.color,
            identity: Identity::Unknown,
        }
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.identity, Identity::King)
    }

    #[inline]
    pub const fn is_bomb(&self) -> bool {
        matches!(self.identity, Identity::Bomb)
    }
}
