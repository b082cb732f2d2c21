//! Append-only action log.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::{Color, Declaration, Identity, Placement, Square, Timestamp};

/// Discriminant of a logged action.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Setup,
    Move,
    Challenge,
    Bomb,
    OnDeck,
    Pass,
    Resign,
    Ready,
}

/// Result of a challenge from the challenger's point of view.
///
/// `Success` means the challenger caught a bluff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeOutcome {
    Success,
    Fail,
}

/// Payload recorded with each action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionDetails {
    Setup {
        placements: ArrayVec<Placement, { GameConfig::FILES }>,
        on_deck: Identity,
    },
    Move {
        from: Square,
        to: Square,
        declaration: Declaration,
    },
    Challenge {
        outcome: ChallengeOutcome,
    },
    Bomb,
    OnDeck {
        identity: Identity,
    },
    Pass,
    Resign,
    Ready,
}

impl ActionDetails {
    pub const fn kind(&self) -> ActionKind {
        match self {
            ActionDetails::Setup { .. } => ActionKind::Setup,
            ActionDetails::Move { .. } => ActionKind::Move,
            ActionDetails::Challenge { .. } => ActionKind::Challenge,
            ActionDetails::Bomb => ActionKind::Bomb,
            ActionDetails::OnDeck { .. } => ActionKind::OnDeck,
            ActionDetails::Pass => ActionKind::Pass,
            ActionDetails::Resign => ActionKind::Resign,
            ActionDetails::Ready => ActionKind::Ready,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub player: Color,
    pub timestamp: Timestamp,
    pub details: ActionDetails,
}

impl ActionRecord {
    pub const fn new(player: Color, timestamp: Timestamp, details: ActionDetails) -> Self {
        Self {
            player,
            timestamp,
            details,
        }
    }

    #[inline]
    pub const fn kind(&self) -> ActionKind {
        self.details.kind()
    }
}
