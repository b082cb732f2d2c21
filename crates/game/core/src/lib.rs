//! Deterministic rules engine for Cloaks Gambit.
//!
//! `gambit-core` defines the canonical rules (actions, engine, game record)
//! and exposes pure APIs that can be reused by the runtime and offline tools.
//! All state mutation flows through [`engine::GameEngine`]; every timestamp is
//! supplied by the caller, so replaying the same actions always yields the
//! same record.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod state;
pub mod view;

pub use action::{
    Action, ActionError, ActionResult, ActionTransition, BombAction, ChallengeAction,
    CheckTimeControlAction, DisconnectAction, DrawAction, DrawResponse, MoveAction, OnDeckAction,
    PassAction, PlayerAction, ReadyAction, ResignAction, Responses, SetupAction, SetupError,
    SystemActionKind, available_responses,
};
pub use config::{GameConfig, GameMode};
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError};
pub use error::{ErrorKind, ErrorSeverity, GameError};
pub use state::{
    ActionDetails, ActionKind, ActionRecord, Board, ChallengeOutcome, Color, Declaration,
    GameClock, GameId, GameState, Identity, Move, MoveState, PerColor, Phase, Piece, Placement,
    Square, TimeControl, Timestamp, Verdict, WinReason,
};
pub use view::{ClockSnapshot, SpectatorSnapshot, Viewer, mask, spectator_snapshot};
