//! Common error infrastructure for gambit-core.
//!
//! Domain errors (e.g. `ActionError`, `SetupError`) live next to the actions
//! they validate. This module holds the classification shared by all of them.
//!
//! Every rejection happens before the record is written, so callers can treat
//! any error as "nothing changed".

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same player may act differently and succeed
/// - **Validation**: malformed input that should not be retried unchanged
/// - **Internal**: the record contradicts itself; indicates a bug
/// - **Fatal**: the record cannot be used any more
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: not your turn, destination occupied.
    Recoverable,

    /// Examples: off-board square, unknown identity, wrong setup piece count.
    Validation,

    /// Examples: pending move points at an empty square.
    Internal,

    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Caller-facing taxonomy of a rejection.
///
/// `NotFound` is only produced by layers that look games up by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The action is well-formed but not legal in the current state.
    InvalidState,
    /// The action itself is malformed.
    Validation,
}

/// Common trait for all gambit-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs, metrics, and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn kind(&self) -> ErrorKind {
        match self.severity() {
            ErrorSeverity::Validation => ErrorKind::Validation,
            _ => ErrorKind::InvalidState,
        }
    }
}

/// Error type for transitions that never fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("this error should never be constructed")]
pub enum NeverError {}

impl GameError for NeverError {
    fn severity(&self) -> ErrorSeverity {
        match *self {}
    }

    fn error_code(&self) -> &'static str {
        match *self {}
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NeverError {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match *self {}
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NeverError {
    fn deserialize<D>(_deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Err(serde::de::Error::custom(
            "NeverError cannot be deserialized as it represents an impossible error",
        ))
    }
}
