//! Runtime orchestration for Cloaks Gambit games.
//!
//! This crate wraps the pure rules engine in an imperative shell: a game
//! store, one worker task per active game, a time-control ticker, and change
//! notifications. Consumers embed [`Runtime`] and drive games through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder, and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] broadcasts what changed after every committed action
//! - [`repository`] stores game records in memory or on disk
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Clock, ManualClock, Result, RuntimeError, RuntimeHandle, SystemClock};
pub use events::{GameEvent, GameNotifier};
pub use repository::{
    FileGameRepository, GameRepository, InMemoryGameRepository, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, default_data_dir};
