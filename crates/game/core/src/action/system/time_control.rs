use crate::action::{ActionContext, ActionResult, ActionTransition};
use crate::engine::end_game;
use crate::error::NeverError;
use crate::state::{Color, GameState, Verdict, WinReason};

/// Ends the game on time if a running clock has reached zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckTimeControlAction;

impl CheckTimeControlAction {
    /// Verdict for a flag that fell while `flagged` was running.
    fn verdict(state: &GameState, flagged: Color) -> Verdict {
        if state.both_setup() {
            return Verdict::win(flagged.opponent(), WinReason::TimeControl);
        }
        match (
            state.setup_complete[Color::White],
            state.setup_complete[Color::Black],
        ) {
            (true, false) => Verdict::win(Color::White, WinReason::TimeControl),
            (false, true) => Verdict::win(Color::Black, WinReason::TimeControl),
            _ => Verdict::draw(WinReason::TimeControl),
        }
    }
}

impl ActionTransition for CheckTimeControlAction {
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
        if !state.is_active || !state.clock.is_running() {
            return Ok(ActionResult::TimeControl { flagged: None });
        }

        let running = state.running_colors();
        let remaining = state.clock.projected(&running, ctx.now);
        let flagged = running
            .iter()
            .copied()
            .filter(|&color| remaining[color] <= 0)
            .filter_map(|color| state.clock.flag_time(color).map(|at| (at, color)))
            .min();

        let Some((fell_at, color)) = flagged else {
            return Ok(ActionResult::TimeControl { flagged: None });
        };

        let verdict = Self::verdict(state, color);
        state.clock.charge(&running, fell_at);
        end_game(state, verdict, fell_at);
        Ok(ActionResult::TimeControl {
            flagged: Some(color),
        })
    }
}
