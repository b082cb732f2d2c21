use crate::action::{
    ActionContext, ActionError, ActionResult, ActionTransition, check_invariants, ensure_active,
};
use crate::engine::StateReducer;
use crate::state::{ActionDetails, Color, GameState};

/// Marks a colour as ready. The clocks start once both colours are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadyAction {
    pub color: Color,
}

impl ReadyAction {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ActionTransition for ReadyAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        ensure_active(state)?;
        if state.players_ready[self.color] {
            return Err(ActionError::AlreadyReady);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        state.players_ready[self.color] = true;

        let clock_started = state.both_ready() && state.start_time.is_none();
        if clock_started {
            state.start_time = Some(ctx.now);
            state.clock.start(ctx.now);
        }

        let mut reducer = StateReducer::new(state);
        reducer.log(self.color, ctx.now, ActionDetails::Ready);
        reducer.settle(ctx.now);
        Ok(ActionResult::Ready { clock_started })
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state)
    }
}
