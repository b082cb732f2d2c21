use crate::action::{
    ActionContext, ActionError, ActionResult, ActionTransition, check_invariants, ensure_active,
    ensure_clock, ensure_turn,
};
use crate::engine::StateReducer;
use crate::state::{ActionDetails, Color, GameState, MoveState, Phase};

/// Accepts an unanswered bomb: the moving piece is lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassAction {
    pub color: Color,
}

impl PassAction {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ActionTransition for PassAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext) -> Result<(), Self::Error> {
        ensure_active(state)?;
        ensure_clock(state, ctx.now)?;
        ensure_turn(state, self.color)?;
        if state.phase != Phase::BombPendingResponse {
            return Err(ActionError::NoBombToAnswer);
        }
        let mv = state.last_move().ok_or(ActionError::NoBombToAnswer)?;
        if state.board.get(mv.from).is_none() {
            return Err(ActionError::NoPieceAt { square: mv.from });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        let mv = state.last_move().copied().ok_or(ActionError::NoBombToAnswer)?;
        let bomber = self.color.opponent();

        let mut reducer = StateReducer::new(state);
        let casualty = reducer.lift(mv.from)?;
        reducer.capture(bomber, casualty);
        reducer.set_last_move_state(MoveState::Completed);

        let state = reducer.state_mut();
        state.player_turn = Some(bomber);
        state.phase = Phase::AwaitingMove;
        state.moves_since_action = 0;

        reducer.log(self.color, ctx.now, ActionDetails::Pass);
        reducer.credit_increment(self.color);
        reducer.settle(ctx.now);
        Ok(ActionResult::Pass { casualty })
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state)
    }
}
