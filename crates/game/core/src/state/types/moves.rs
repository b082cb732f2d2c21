use super::{Color, Declaration, Square, Timestamp};

/// Lifecycle of a declared move.
///
/// A move is `Pending` until it is answered. `Resolved` means it took effect
/// on the board without dispute; `Completed` means a challenge or bomb changed
/// the normal outcome.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MoveState {
    Pending,
    Resolved,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub player: Color,
    pub from: Square,
    pub to: Square,
    pub declaration: Declaration,
    pub state: MoveState,
    pub timestamp: Timestamp,
}

impl Move {
    pub const fn pending(
        player: Color,
        from: Square,
        to: Square,
        declaration: Declaration,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            player,
            from,
            to,
            declaration,
            state: MoveState::Pending,
            timestamp,
        }
    }

    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, MoveState::Pending)
    }
}
