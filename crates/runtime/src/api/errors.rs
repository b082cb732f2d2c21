//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the engine so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use gambit_core::{ErrorKind, ExecuteError, GameError, GameId};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("game {0} not found")]
    NotFound(GameId),

    #[error("action rejected: {0}")]
    Rejected(#[from] ExecuteError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("game worker command channel closed")]
    CommandChannelClosed,

    #[error("game worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("background task join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Engine rejection, if that is what this is.
    pub fn rejection(&self) -> Option<&ExecuteError> {
        match self {
            RuntimeError::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// Caller-facing classification; `None` for infrastructure failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.rejection().map(GameError::kind)
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::NotFound(_) => "RUNTIME_NOT_FOUND",
            RuntimeError::Rejected(err) => err.error_code(),
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}
