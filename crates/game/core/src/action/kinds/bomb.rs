use crate::action::{
    ActionContext, ActionError, ActionResult, ActionTransition, check_invariants, ensure_active,
    ensure_clock, ensure_turn,
};
use crate::engine::StateReducer;
use crate::state::{ActionDetails, Color, Declaration, GameState, Phase};

/// Claims that the piece attacked by the pending move is a Bomb.
///
/// Nothing is resolved yet: the mover answers with a challenge or a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BombAction {
    pub color: Color,
}

impl BombAction {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ActionTransition for BombAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext) -> Result<(), Self::Error> {
        ensure_active(state)?;
        ensure_clock(state, ctx.now)?;
        ensure_turn(state, self.color)?;
        if state.phase != Phase::MovePendingResponse {
            return Err(ActionError::NothingToBomb);
        }
        let mv = state.pending_move().ok_or(ActionError::NothingToBomb)?;
        if mv.declaration == Declaration::King {
            return Err(ActionError::CannotBombKing);
        }
        if !state.board.is_owned_by(mv.to, self.color) {
            return Err(ActionError::NotYourPiece {
                square: mv.to,
                color: self.color,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        state.player_turn = Some(self.color.opponent());
        state.phase = Phase::BombPendingResponse;

        let mut reducer = StateReducer::new(state);
        reducer.log(self.color, ctx.now, ActionDetails::Bomb);
        reducer.credit_increment(self.color);
        reducer.settle(ctx.now);
        Ok(ActionResult::Bomb)
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state)
    }
}
