use crate::action::{
    ActionContext, ActionError, ActionResult, ActionTransition, check_invariants, ensure_active,
};
use crate::engine::StateReducer;
use crate::state::{Color, DrawOffer, GameState, Verdict, WinReason};

/// Draw negotiation step.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DrawResponse {
    Offer,
    Accept,
    Decline,
}

/// Offers, accepts, or declines a draw.
///
/// A declined offerer must wait `draw_offer_cooldown_ms` before offering again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawAction {
    pub color: Color,
    pub response: DrawResponse,
}

impl DrawAction {
    pub fn new(color: Color, response: DrawResponse) -> Self {
        Self { color, response }
    }

    fn incoming_offer(&self, state: &GameState) -> Result<DrawOffer, ActionError> {
        let offer = state.draw_offer.ok_or(ActionError::NoDrawOffer)?;
        if offer.player == self.color {
            return Err(ActionError::OwnDrawOffer);
        }
        Ok(offer)
    }
}

impl ActionTransition for DrawAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext) -> Result<(), Self::Error> {
        ensure_active(state)?;
        match self.response {
            DrawResponse::Offer => {
                if let Some(offer) = state.draw_offer {
                    return Err(ActionError::DrawOfferPending { by: offer.player });
                }
                if let Some(until) = state.draw_offer_cooldowns[self.color]
                    && until > ctx.now
                {
                    return Err(ActionError::DrawCooldown {
                        remaining_ms: until.millis_since(ctx.now),
                    });
                }
                Ok(())
            }
            DrawResponse::Accept | DrawResponse::Decline => self.incoming_offer(state).map(|_| ()),
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        let mut reducer = StateReducer::new(state);
        match self.response {
            DrawResponse::Offer => {
                reducer.state_mut().draw_offer = Some(DrawOffer {
                    player: self.color,
                    created_at: ctx.now,
                });
            }
            DrawResponse::Accept => {
                reducer.push_verdict(Verdict::draw(WinReason::Draw));
            }
            DrawResponse::Decline => {
                let offer = self.incoming_offer(reducer.state())?;
                let state = reducer.state_mut();
                let until = ctx.now + state.config.draw_offer_cooldown_ms;
                state.draw_offer = None;
                state.draw_offer_cooldowns[offer.player] = Some(until);
            }
        }
        reducer.settle(ctx.now);
        Ok(ActionResult::Draw(self.response))
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state)
    }
}
