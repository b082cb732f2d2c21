//! Worker tasks that back the runtime orchestration.
//!
//! Each active game is owned by one [`GameWorker`], which serializes every
//! mutation of that game. The [`Ticker`] nudges workers so clocks run out
//! even when nobody acts.

mod game;
mod registry;
mod ticker;

pub use game::{Command, GameWorker};
pub use registry::WorkerRegistry;
pub use ticker::Ticker;
