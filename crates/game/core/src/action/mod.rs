//! Action domain.
//!
//! Every state change is an [`Action`] routed through the engine's
//! three-phase pipeline (`pre_validate` → `apply` → `post_validate`).
//!
//! # Module Structure
//!
//! - `error`: rejection errors (`ActionError`, `SetupError`)
//! - `kinds`: player actions (setup, move, challenge, bomb, pass, on-deck,
//!   resign, draw, ready)
//! - `system`: terminal transitions issued by external collaborators
//!   (time control, disconnect)
//! - `available`: which responses a colour may issue right now
//! - `types`: per-action results

pub mod available;
pub mod error;
pub mod kinds;
pub mod system;
pub mod types;

pub use available::{Responses, available_responses};
pub use error::{ActionError, SetupError};
pub use kinds::{
    BombAction, ChallengeAction, DrawAction, DrawResponse, MoveAction, OnDeckAction, PassAction,
    ReadyAction, ResignAction, SetupAction,
};
pub use system::{CheckTimeControlAction, DisconnectAction};
pub use types::ActionResult;

use crate::config::GameConfig;
use crate::state::{Color, GameState, Identity, MoveState, Timestamp};

/// Inputs shared by every transition that do not belong to the action itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionContext {
    /// Wall-clock instant the action is applied at.
    pub now: Timestamp,
}

impl ActionContext {
    pub const fn new(now: Timestamp) -> Self {
        Self { now }
    }
}

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Colour issuing the action, `None` for system transitions.
    fn player(&self) -> Option<Color>;

    /// Whether running clocks are charged up to `ctx.now` before `apply`.
    fn charges_clock(&self) -> bool {
        true
    }

    /// Validates pre-conditions using the state **before** mutation.
    ///
    /// Every rule check belongs here so a rejected action never touches the record.
    fn pre_validate(&self, _state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Gameplay actions issued by a player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum PlayerAction {
    Setup(SetupAction),
    Move(MoveAction),
    Challenge(ChallengeAction),
    Bomb(BombAction),
    OnDeck(OnDeckAction),
    Pass(PassAction),
    Resign(ResignAction),
    Draw(DrawAction),
    Ready(ReadyAction),
}

/// Transitions issued by the runtime on behalf of external collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum SystemActionKind {
    CheckTimeControl(CheckTimeControlAction),
    Disconnect(DisconnectAction),
}

/// Top-level action enum that can be either a player action or a system action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Player(PlayerAction),
    System { kind: SystemActionKind },
}

impl Action {
    pub fn player(action: PlayerAction) -> Self {
        Self::Player(action)
    }

    pub fn system(kind: SystemActionKind) -> Self {
        Self::System { kind }
    }

    /// Colour issuing the action, `None` for system transitions.
    pub fn actor(&self) -> Option<Color> {
        match self {
            Action::Player(action) => Some(action.color()),
            Action::System { .. } => None,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Player(action) => match action {
                PlayerAction::Setup(_) => "setup",
                PlayerAction::Move(_) => "move",
                PlayerAction::Challenge(_) => "challenge",
                PlayerAction::Bomb(_) => "bomb",
                PlayerAction::OnDeck(_) => "on_deck",
                PlayerAction::Pass(_) => "pass",
                PlayerAction::Resign(_) => "resign",
                PlayerAction::Draw(_) => "draw",
                PlayerAction::Ready(_) => "ready",
            },
            Action::System { kind } => match kind {
                SystemActionKind::CheckTimeControl(_) => "check_time_control",
                SystemActionKind::Disconnect(_) => "disconnect",
            },
        }
    }
}

impl PlayerAction {
    pub fn color(&self) -> Color {
        match self {
            PlayerAction::Setup(a) => a.color,
            PlayerAction::Move(a) => a.color,
            PlayerAction::Challenge(a) => a.color,
            PlayerAction::Bomb(a) => a.color,
            PlayerAction::OnDeck(a) => a.color,
            PlayerAction::Pass(a) => a.color,
            PlayerAction::Resign(a) => a.color,
            PlayerAction::Draw(a) => a.color,
            PlayerAction::Ready(a) => a.color,
        }
    }
}

impl From<PlayerAction> for Action {
    fn from(action: PlayerAction) -> Self {
        Action::Player(action)
    }
}

// ============================================================================
// Shared Guards
// ============================================================================

pub(crate) fn ensure_active(state: &GameState) -> Result<(), ActionError> {
    if state.is_active {
        Ok(())
    } else {
        Err(ActionError::GameInactive)
    }
}

/// Rejects the action when a running clock already reads zero at `now`.
///
/// The flag itself is only recorded by [`CheckTimeControlAction`].
pub(crate) fn ensure_clock(state: &GameState, now: Timestamp) -> Result<(), ActionError> {
    let running = state.running_colors();
    let remaining = state.clock.projected(&running, now);
    match running.iter().find(|&&color| remaining[color] <= 0) {
        Some(&color) if state.clock.is_running() => Err(ActionError::ClockExpired { color }),
        _ => Ok(()),
    }
}

pub(crate) fn ensure_turn(state: &GameState, color: Color) -> Result<(), ActionError> {
    if state.player_turn == Some(color) {
        Ok(())
    } else {
        Err(ActionError::NotYourTurn { color })
    }
}

/// Structural post-conditions every gameplay transition must leave intact.
pub(crate) fn check_invariants(state: &GameState) -> Result<(), ActionError> {
    let violated = |what: &str| Err(ActionError::InvariantViolated(what.to_owned()));

    let pending = state
        .moves
        .iter()
        .filter(|mv| mv.state == MoveState::Pending)
        .count();
    if pending > 1 {
        return violated("more than one pending move");
    }
    if pending == 1 && state.pending_move().is_none() {
        return violated("pending move is not the latest move");
    }

    let hidden = |identity: Identity| !identity.is_known();
    if state.board.pieces().any(|(_, piece)| hidden(piece.identity))
        || Color::ALL.into_iter().any(|color| {
            state.stashes[color].iter().any(|piece| hidden(piece.identity))
                || state.on_decks[color].is_some_and(|piece| hidden(piece.identity))
        })
    {
        return violated("unknown identity in the authoritative record");
    }

    if state.is_active {
        if Color::ALL
            .into_iter()
            .any(|color| state.daggers[color] >= GameConfig::MAX_DAGGERS)
        {
            return violated("dagger limit reached on an active game");
        }
        if let Some(owing) = state.on_decking_player
            && state.player_turn != Some(owing)
        {
            return violated("on-decking player does not hold the turn");
        }
    } else if state.win_reason.is_none() || state.end_time.is_none() {
        return violated("finished game without a result");
    }

    Ok(())
}
