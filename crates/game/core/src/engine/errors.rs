//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, BombAction, ChallengeAction, CheckTimeControlAction, DisconnectAction,
    DrawAction, MoveAction, OnDeckAction, PassAction, ReadyAction, ResignAction, SetupAction,
};
use crate::error::{ErrorKind, ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("setup failed: {0}")]
    Setup(TransitionPhaseError<<SetupAction as ActionTransition>::Error>),

    #[error("move failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("challenge failed: {0}")]
    Challenge(TransitionPhaseError<<ChallengeAction as ActionTransition>::Error>),

    #[error("bomb failed: {0}")]
    Bomb(TransitionPhaseError<<BombAction as ActionTransition>::Error>),

    #[error("on-deck failed: {0}")]
    OnDeck(TransitionPhaseError<<OnDeckAction as ActionTransition>::Error>),

    #[error("pass failed: {0}")]
    Pass(TransitionPhaseError<<PassAction as ActionTransition>::Error>),

    #[error("resign failed: {0}")]
    Resign(TransitionPhaseError<<ResignAction as ActionTransition>::Error>),

    #[error("draw failed: {0}")]
    Draw(TransitionPhaseError<<DrawAction as ActionTransition>::Error>),

    #[error("ready failed: {0}")]
    Ready(TransitionPhaseError<<ReadyAction as ActionTransition>::Error>),

    #[error("time control check failed: {0}")]
    CheckTimeControl(TransitionPhaseError<<CheckTimeControlAction as ActionTransition>::Error>),

    #[error("disconnect failed: {0}")]
    Disconnect(TransitionPhaseError<<DisconnectAction as ActionTransition>::Error>),
}

impl ExecuteError {
    /// The underlying domain error, whatever the action kind.
    pub fn source_error(&self) -> &dyn GameError {
        match self {
            ExecuteError::Setup(e) => &e.error,
            ExecuteError::Move(e)
            | ExecuteError::Challenge(e)
            | ExecuteError::Bomb(e)
            | ExecuteError::OnDeck(e)
            | ExecuteError::Pass(e)
            | ExecuteError::Resign(e)
            | ExecuteError::Draw(e)
            | ExecuteError::Ready(e) => &e.error,
            ExecuteError::CheckTimeControl(e) | ExecuteError::Disconnect(e) => &e.error,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        match self {
            ExecuteError::Setup(e) => e.phase,
            ExecuteError::Move(e)
            | ExecuteError::Challenge(e)
            | ExecuteError::Bomb(e)
            | ExecuteError::OnDeck(e)
            | ExecuteError::Pass(e)
            | ExecuteError::Resign(e)
            | ExecuteError::Draw(e)
            | ExecuteError::Ready(e) => e.phase,
            ExecuteError::CheckTimeControl(e) | ExecuteError::Disconnect(e) => e.phase,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.source_error().severity()
    }

    fn error_code(&self) -> &'static str {
        self.source_error().error_code()
    }

    fn kind(&self) -> ErrorKind {
        self.source_error().kind()
    }
}
