use super::{Color, Timestamp};

/// Why a game ended.
///
/// Variants are declared in priority order: when several terminal conditions
/// hold after one mutation, the smallest one wins.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum WinReason {
    CapturedKing,
    Throne,
    TrueKing,
    Daggers,
    TimeControl,
    Disconnect,
    Resign,
    Draw,
}

/// Terminal condition detected by the win evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verdict {
    /// `None` for a draw.
    pub winner: Option<Color>,
    pub reason: WinReason,
}

impl Verdict {
    pub const fn win(winner: Color, reason: WinReason) -> Self {
        Self {
            winner: Some(winner),
            reason,
        }
    }

    pub const fn draw(reason: WinReason) -> Self {
        Self {
            winner: None,
            reason,
        }
    }
}

/// An outstanding draw proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawOffer {
    pub player: Color,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_sort_by_priority() {
        let mut reasons = vec![
            WinReason::Draw,
            WinReason::Daggers,
            WinReason::CapturedKing,
            WinReason::Throne,
        ];
        reasons.sort();
        assert_eq!(
            reasons,
            vec![
                WinReason::CapturedKing,
                WinReason::Throne,
                WinReason::Daggers,
                WinReason::Draw
            ]
        );
        assert_eq!(WinReason::TrueKing.to_string(), "TRUE_KING");
    }
}
