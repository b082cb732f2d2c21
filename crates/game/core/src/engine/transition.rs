//! Action transition dispatch and execution logic.

use crate::action::{
    Action, ActionContext, ActionResult, ActionTransition, PlayerAction, SystemActionKind,
};
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Charge running clocks, then mutate the game state
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    ctx: &ActionContext,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    if transition.charges_clock() {
        let running = state.running_colors();
        state.clock.charge(&running, ctx.now);
    }

    let result = transition
        .apply(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    ctx: &ActionContext,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Player(action) => match action {
            PlayerAction::Setup(t) => drive_transition(t, state, ctx).map_err(ExecuteError::Setup),
            PlayerAction::Move(t) => drive_transition(t, state, ctx).map_err(ExecuteError::Move),
            PlayerAction::Challenge(t) => {
                drive_transition(t, state, ctx).map_err(ExecuteError::Challenge)
            }
            PlayerAction::Bomb(t) => drive_transition(t, state, ctx).map_err(ExecuteError::Bomb),
            PlayerAction::OnDeck(t) => {
                drive_transition(t, state, ctx).map_err(ExecuteError::OnDeck)
            }
            PlayerAction::Pass(t) => drive_transition(t, state, ctx).map_err(ExecuteError::Pass),
            PlayerAction::Resign(t) => {
                drive_transition(t, state, ctx).map_err(ExecuteError::Resign)
            }
            PlayerAction::Draw(t) => drive_transition(t, state, ctx).map_err(ExecuteError::Draw),
            PlayerAction::Ready(t) => drive_transition(t, state, ctx).map_err(ExecuteError::Ready),
        },
        Action::System { kind } => match kind {
            SystemActionKind::CheckTimeControl(t) => {
                drive_transition(t, state, ctx).map_err(ExecuteError::CheckTimeControl)
            }
            SystemActionKind::Disconnect(t) => {
                drive_transition(t, state, ctx).map_err(ExecuteError::Disconnect)
            }
        },
    }
}
