//! Game record store.
//!
//! Repositories hold the authoritative [`GameState`](gambit_core::GameState)
//! of every game, active or finished. Workers load a record, run the engine,
//! and save the result; nothing else writes to a repository.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileGameRepository;
pub use memory::InMemoryGameRepository;
pub use traits::GameRepository;
