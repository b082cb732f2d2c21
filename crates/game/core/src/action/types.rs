//! Per-action execution results.

use crate::action::DrawResponse;
use crate::state::{ChallengeOutcome, Color, Piece, Square};

/// What an accepted action did, beyond the state change itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ActionResult {
    Setup {
        /// Both colours are deployed and White is to move.
        game_started: bool,
    },
    Move {
        /// Destination of the opponent's pending move that resolved first.
        resolved: Option<Square>,
        /// False when resolving that move ended the game and the new move
        /// was discarded.
        recorded: bool,
    },
    Challenge {
        outcome: ChallengeOutcome,
        against_bomb: bool,
    },
    Bomb,
    Pass {
        casualty: Piece,
    },
    OnDeck,
    Resign,
    Draw(DrawResponse),
    Ready {
        clock_started: bool,
    },
    TimeControl {
        /// Colour whose flag fell, `None` when every clock still has time.
        flagged: Option<Color>,
    },
    Disconnect,
}
