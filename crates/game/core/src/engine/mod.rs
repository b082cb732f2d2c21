//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! orchestrates the transition phases and surfaces rich error information
//! for the runtime. Player actions and system actions (time control,
//! disconnect) flow through the same execute() pipeline.

mod errors;
mod reducer;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use reducer::{StateReducer, end_game};

use crate::action::{Action, ActionContext, ActionResult};
use crate::state::{GameState, Timestamp, Verdict};

/// Complete outcome of action execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Action-specific execution result.
    pub action_result: ActionResult,

    /// Set when this action ended the game.
    pub verdict: Option<Verdict>,
}

impl ExecutionOutcome {
    pub fn ended_game(&self) -> bool {
        self.verdict.is_some()
    }
}

/// Game engine that applies actions to one game record.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// A failed action leaves the record exactly as it was, whichever phase
/// rejected it.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes `action` at wall-clock instant `now`.
    pub fn execute(
        &mut self,
        action: &Action,
        now: Timestamp,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let ctx = ActionContext::new(now);
        let before = self.state.clone();
        let was_active = before.is_active;

        match transition::execute_transition(action, self.state, &ctx) {
            Ok(action_result) => {
                let verdict = if was_active {
                    self.state.verdict()
                } else {
                    None
                };
                Ok(ExecutionOutcome {
                    action_result,
                    verdict,
                })
            }
            Err(error) => {
                *self.state = before;
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionError, PlayerAction, ReadyAction, ResignAction};
    use crate::config::GameConfig;
    use crate::state::{Color, GameId, WinReason};

    fn fresh() -> GameState {
        GameState::new(GameId(7), GameConfig::default(), Timestamp::ZERO)
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let mut state = fresh();
        let before = state.clone();
        let mut engine = GameEngine::new(&mut state);

        let ready = Action::from(PlayerAction::Ready(ReadyAction::new(Color::White)));
        engine.execute(&ready, Timestamp::from_millis(5)).unwrap();
        let err = engine
            .execute(&ready, Timestamp::from_millis(6))
            .unwrap_err();

        assert_eq!(err.phase(), TransitionPhase::PreValidate);
        assert!(matches!(
            err,
            ExecuteError::Ready(TransitionPhaseError {
                error: ActionError::AlreadyReady,
                ..
            })
        ));
        assert_ne!(state, before);
        assert!(state.players_ready[Color::White]);
        assert_eq!(state.actions.len(), 1);
    }

    #[test]
    fn verdict_reported_only_by_the_ending_action() {
        let mut state = fresh();
        let mut engine = GameEngine::new(&mut state);

        let resign = Action::from(PlayerAction::Resign(ResignAction::new(Color::Black)));
        let outcome = engine.execute(&resign, Timestamp::from_millis(10)).unwrap();
        let verdict = outcome.verdict.unwrap();
        assert_eq!(verdict.winner, Some(Color::White));
        assert_eq!(verdict.reason, WinReason::Resign);

        let err = engine
            .execute(&resign, Timestamp::from_millis(11))
            .unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::Resign(TransitionPhaseError {
                error: ActionError::GameInactive,
                ..
            })
        ));
    }
}
