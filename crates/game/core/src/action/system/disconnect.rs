use crate::action::{ActionContext, ActionResult, ActionTransition};
use crate::engine::end_game;
use crate::error::NeverError;
use crate::state::{Color, GameState, Verdict, WinReason};

/// Awards the game to the opponent of a colour that left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisconnectAction {
    pub color: Color,
}

impl DisconnectAction {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ActionTransition for DisconnectAction {
    type Error = NeverError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        None
    }

    fn charges_clock(&self) -> bool {
        false
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        if state.is_active {
            let verdict = Verdict::win(self.color.opponent(), WinReason::Disconnect);
            end_game(state, verdict, ctx.now);
        }
        Ok(ActionResult::Disconnect)
    }
}
