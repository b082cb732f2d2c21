use crate::action::{
    ActionContext, ActionError, ActionResult, ActionTransition, check_invariants, ensure_active,
    ensure_clock, ensure_turn,
};
use crate::engine::StateReducer;
use crate::state::{ActionDetails, Color, GameState, Identity, MoveState, Phase};

/// Stages a piece from the stash as the colour's next blind replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnDeckAction {
    pub color: Color,
    pub identity: Identity,
}

impl OnDeckAction {
    pub fn new(color: Color, identity: Identity) -> Self {
        Self { color, identity }
    }
}

impl ActionTransition for OnDeckAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext) -> Result<(), Self::Error> {
        ensure_active(state)?;
        ensure_clock(state, ctx.now)?;
        if state.on_decking_player != Some(self.color) {
            return Err(ActionError::NotOnDecking { color: self.color });
        }
        ensure_turn(state, self.color)?;
        if !self.identity.is_known() {
            return Err(ActionError::InvalidIdentity {
                identity: self.identity,
            });
        }
        if state.stash_count(self.color, self.identity) == 0 {
            return Err(ActionError::PieceNotInStash {
                identity: self.identity,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        let piece = state
            .take_from_stash(self.color, self.identity)
            .ok_or(ActionError::PieceNotInStash {
                identity: self.identity,
            })?;
        state.on_decks[self.color] = Some(piece);
        state.on_decking_player = None;
        state.phase = Phase::AwaitingMove;

        if let Some(mv) = state.last_move_mut() {
            if mv.is_pending() {
                mv.state = MoveState::Resolved;
            }
            let mover = mv.player;
            state.player_turn = Some(mover.opponent());
        }

        let mut reducer = StateReducer::new(state);
        reducer.log(
            self.color,
            ctx.now,
            ActionDetails::OnDeck {
                identity: self.identity,
            },
        );
        reducer.credit_increment(self.color);
        reducer.settle(ctx.now);
        Ok(ActionResult::OnDeck)
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state)
    }
}
