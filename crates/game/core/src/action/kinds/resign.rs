use crate::action::{
    ActionContext, ActionError, ActionResult, ActionTransition, check_invariants, ensure_active,
};
use crate::engine::StateReducer;
use crate::state::{ActionDetails, Color, GameState, Verdict, WinReason};

/// Concedes the game to the opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResignAction {
    pub color: Color,
}

impl ResignAction {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ActionTransition for ResignAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        ensure_active(state)
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        let mut reducer = StateReducer::new(state);
        reducer.log(self.color, ctx.now, ActionDetails::Resign);
        reducer.push_verdict(Verdict::win(self.color.opponent(), WinReason::Resign));
        reducer.settle(ctx.now);
        Ok(ActionResult::Resign)
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state)
    }
}
