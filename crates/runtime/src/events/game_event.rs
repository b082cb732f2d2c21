use gambit_core::{Action, ActionResult, GameId, GameState, Verdict};
use serde::{Deserialize, Serialize};

/// Notification published after a game record changes.
///
/// `Changed` carries the unmasked record; subscribers mask it for whoever
/// they forward it to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    Created {
        game_id: GameId,
    },
    Changed {
        game_id: GameId,
        action: Action,
        result: ActionResult,
        state: Box<GameState>,
    },
    Ended {
        game_id: GameId,
        verdict: Verdict,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::Created { game_id }
            | GameEvent::Changed { game_id, .. }
            | GameEvent::Ended { game_id, .. } => *game_id,
        }
    }
}
