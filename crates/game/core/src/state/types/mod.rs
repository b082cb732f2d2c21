//! Value types that make up the game record.
mod board;
mod clock;
mod common;
mod log;
mod moves;
mod outcome;
mod phase;
mod piece;

pub use board::{Board, Placement, Square};
pub use clock::{GameClock, TimeControl};
pub use common::{Color, GameId, PerColor, Timestamp};
pub use log::{ActionDetails, ActionKind, ActionRecord, ChallengeOutcome};
pub use moves::{Move, MoveState};
pub use outcome::{DrawOffer, Verdict, WinReason};
pub use phase::Phase;
pub use piece::{Declaration, Identity, Piece};
