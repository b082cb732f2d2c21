/// Explicit state of the response machine.
///
/// Which responses are legal is a lookup on this value rather than an
/// inspection of the action log tail.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// At least one colour has not deployed its pieces.
    #[default]
    Setup,
    /// The side to move may only declare a move.
    AwaitingMove,
    /// The last action was a move that can be challenged, bombed, or answered
    /// with a move of one's own.
    MovePendingResponse,
    /// The mover must challenge the bomb or pass.
    BombPendingResponse,
    /// The side to move owes a blind on-deck placement.
    OnDeckOwed,
    Terminal,
}

impl Phase {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Terminal)
    }
}
