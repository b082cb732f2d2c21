//! Action rejection errors.
//!
//! Every variant is produced by `pre_validate`, before the record is touched,
//! except `InvariantViolated` which guards the post-conditions.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Color, Identity, Square};

// ============================================================================
// Gameplay Errors
// ============================================================================

/// Errors raised by gameplay actions (move, challenge, bomb, on-deck, pass,
/// resign, draw, ready).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("game is not active")]
    GameInactive,

    #[error("{color} has run out of time")]
    ClockExpired { color: Color },

    #[error("setup not complete for both players")]
    SetupIncomplete,

    #[error("not {color}'s turn")]
    NotYourTurn { color: Color },

    #[error("{color} must place an on-deck piece first")]
    OnDeckOwed { color: Color },

    #[error("waiting for {color} to place an on-deck piece")]
    AwaitingOnDeck { color: Color },

    #[error("a bomb must be answered by a challenge or a pass")]
    BombPending,

    #[error("square {square} is out of bounds")]
    OutOfBounds { square: Square },

    #[error("no piece at {square}")]
    NoPieceAt { square: Square },

    #[error("piece at {square} does not belong to {color}")]
    NotYourPiece { square: Square, color: Color },

    #[error("piece must move to a different square")]
    SameSquare,

    #[error("illegal move for a declared {declaration}: {from} -> {to}")]
    IllegalDeclaration {
        declaration: Identity,
        from: Square,
        to: Square,
    },

    #[error("destination {square} is occupied by own piece")]
    DestinationOccupied { square: Square },

    #[error("no pending move or bomb to challenge")]
    NothingToChallenge,

    #[error("the on-decking player cannot challenge")]
    OnDeckingPlayerCannotChallenge,

    #[error("last action was not a move")]
    NothingToBomb,

    #[error("cannot bomb a declared king move")]
    CannotBombKing,

    #[error("last action was not a bomb")]
    NoBombToAnswer,

    #[error("{color} is not the on-decking player")]
    NotOnDecking { color: Color },

    #[error("{identity} is not available in the stash")]
    PieceNotInStash { identity: Identity },

    #[error("{identity} is not a valid piece identity here")]
    InvalidIdentity { identity: Identity },

    #[error("player already ready")]
    AlreadyReady,

    #[error("a draw offer by {by} is already pending")]
    DrawOfferPending { by: Color },

    #[error("draw offer recently declined, retry in {remaining_ms}ms")]
    DrawCooldown { remaining_ms: u64 },

    #[error("no draw offer to respond to")]
    NoDrawOffer,

    #[error("cannot respond to your own draw offer")]
    OwnDrawOffer,

    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            GameInactive | ClockExpired { .. } | SetupIncomplete => ErrorSeverity::Recoverable,
            NotYourTurn { .. } | OnDeckOwed { .. } | AwaitingOnDeck { .. } | BombPending => {
                ErrorSeverity::Recoverable
            }
            NoPieceAt { .. } | NotYourPiece { .. } | IllegalDeclaration { .. } => {
                ErrorSeverity::Recoverable
            }
            DestinationOccupied { .. } | PieceNotInStash { .. } => ErrorSeverity::Recoverable,
            NothingToChallenge | OnDeckingPlayerCannotChallenge => ErrorSeverity::Recoverable,
            NothingToBomb | CannotBombKing | NoBombToAnswer | NotOnDecking { .. } => {
                ErrorSeverity::Recoverable
            }
            AlreadyReady | DrawOfferPending { .. } | DrawCooldown { .. } => {
                ErrorSeverity::Recoverable
            }
            NoDrawOffer | OwnDrawOffer => ErrorSeverity::Recoverable,
            OutOfBounds { .. } | SameSquare | InvalidIdentity { .. } => ErrorSeverity::Validation,
            InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            GameInactive => "ACTION_GAME_INACTIVE",
            ClockExpired { .. } => "ACTION_CLOCK_EXPIRED",
            SetupIncomplete => "ACTION_SETUP_INCOMPLETE",
            NotYourTurn { .. } => "ACTION_NOT_YOUR_TURN",
            OnDeckOwed { .. } => "ACTION_ON_DECK_OWED",
            AwaitingOnDeck { .. } => "ACTION_AWAITING_ON_DECK",
            BombPending => "ACTION_BOMB_PENDING",
            OutOfBounds { .. } => "ACTION_OUT_OF_BOUNDS",
            NoPieceAt { .. } => "ACTION_NO_PIECE_AT",
            NotYourPiece { .. } => "ACTION_NOT_YOUR_PIECE",
            SameSquare => "ACTION_SAME_SQUARE",
            IllegalDeclaration { .. } => "ACTION_ILLEGAL_DECLARATION",
            DestinationOccupied { .. } => "ACTION_DESTINATION_OCCUPIED",
            NothingToChallenge => "ACTION_NOTHING_TO_CHALLENGE",
            OnDeckingPlayerCannotChallenge => "ACTION_ON_DECKING_CANNOT_CHALLENGE",
            NothingToBomb => "ACTION_NOTHING_TO_BOMB",
            CannotBombKing => "ACTION_CANNOT_BOMB_KING",
            NoBombToAnswer => "ACTION_NO_BOMB_TO_ANSWER",
            NotOnDecking { .. } => "ACTION_NOT_ON_DECKING",
            PieceNotInStash { .. } => "ACTION_PIECE_NOT_IN_STASH",
            InvalidIdentity { .. } => "ACTION_INVALID_IDENTITY",
            AlreadyReady => "ACTION_ALREADY_READY",
            DrawOfferPending { .. } => "ACTION_DRAW_OFFER_PENDING",
            DrawCooldown { .. } => "ACTION_DRAW_COOLDOWN",
            NoDrawOffer => "ACTION_NO_DRAW_OFFER",
            OwnDrawOffer => "ACTION_OWN_DRAW_OFFER",
            InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}

// ============================================================================
// Setup Errors
// ============================================================================

/// Errors raised while validating a colour's initial deployment.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("game is not active")]
    GameInactive,

    #[error("setup already completed for {color}")]
    AlreadyComplete { color: Color },

    #[error("{color} has run out of time")]
    ClockExpired { color: Color },

    #[error("must provide exactly {expected} pieces for setup, got {actual}")]
    WrongPieceCount { expected: usize, actual: usize },

    #[error("all pieces must be placed on rank {expected_row}, got {square}")]
    WrongRank { expected_row: u8, square: Square },

    #[error("two pieces placed on {square}")]
    DuplicateSquare { square: Square },

    #[error("{identity} cannot be placed")]
    InvalidIdentity { identity: Identity },

    #[error("setup must include a king")]
    MissingKing,

    #[error("not enough {identity} pieces in stash (wanted {wanted}, have {available})")]
    NotInStash {
        identity: Identity,
        wanted: usize,
        available: usize,
    },

    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        use SetupError::*;
        match self {
            GameInactive | AlreadyComplete { .. } | ClockExpired { .. } => {
                ErrorSeverity::Recoverable
            }
            WrongPieceCount { .. } | WrongRank { .. } | DuplicateSquare { .. } => {
                ErrorSeverity::Validation
            }
            InvalidIdentity { .. } | MissingKing | NotInStash { .. } => ErrorSeverity::Validation,
            InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use SetupError::*;
        match self {
            GameInactive => "SETUP_GAME_INACTIVE",
            AlreadyComplete { .. } => "SETUP_ALREADY_COMPLETE",
            ClockExpired { .. } => "SETUP_CLOCK_EXPIRED",
            WrongPieceCount { .. } => "SETUP_WRONG_PIECE_COUNT",
            WrongRank { .. } => "SETUP_WRONG_RANK",
            DuplicateSquare { .. } => "SETUP_DUPLICATE_SQUARE",
            InvalidIdentity { .. } => "SETUP_INVALID_IDENTITY",
            MissingKing => "SETUP_MISSING_KING",
            NotInStash { .. } => "SETUP_NOT_IN_STASH",
            InvariantViolated(_) => "SETUP_INVARIANT_VIOLATED",
        }
    }
}
