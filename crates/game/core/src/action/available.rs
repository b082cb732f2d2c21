//! Responses a colour may issue in the current phase.

use bitflags::bitflags;

use crate::state::{Color, Declaration, GameState, Phase};

bitflags! {
    /// Set of gameplay responses currently open to a colour.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Responses: u8 {
        const MOVE = 1 << 0;
        const CHALLENGE = 1 << 1;
        const BOMB = 1 << 2;
        const PASS = 1 << 3;
        const ON_DECK = 1 << 4;
    }
}

/// Returns the responses `color` may issue right now.
///
/// Resign and draw negotiation are open to both colours throughout an active
/// game and are not listed.
pub fn available_responses(state: &GameState, color: Color) -> Responses {
    if !state.is_active || state.player_turn != Some(color) {
        return Responses::empty();
    }

    match state.phase {
        Phase::Setup | Phase::Terminal => Responses::empty(),
        Phase::AwaitingMove => Responses::MOVE,
        Phase::MovePendingResponse => {
            let mut responses = Responses::MOVE | Responses::CHALLENGE;
            if let Some(mv) = state.pending_move()
                && mv.declaration != Declaration::King
                && state.board.is_owned_by(mv.to, color)
            {
                responses |= Responses::BOMB;
            }
            responses
        }
        Phase::BombPendingResponse => Responses::CHALLENGE | Responses::PASS,
        Phase::OnDeckOwed if state.on_decking_player == Some(color) => Responses::ON_DECK,
        Phase::OnDeckOwed => Responses::empty(),
    }
}
