//! Repository contract for loading and saving game records.

use async_trait::async_trait;
use gambit_core::{GameId, GameState};

use super::Result;

/// Store of game records keyed by [`GameId`].
///
/// Whether records live in memory, on disk, or behind a network service is
/// up to the implementation. Callers serialize writes per game id, so
/// implementations only need each `save` to be atomic.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Loads a record, `None` if the id is unknown.
    async fn load(&self, id: GameId) -> Result<Option<GameState>>;

    /// Inserts or replaces the record under `state.id`.
    async fn save(&self, state: &GameState) -> Result<()>;

    async fn exists(&self, id: GameId) -> Result<bool> {
        Ok(self.load(id).await?.is_some())
    }

    /// Ids of every stored game, ascending.
    async fn list(&self) -> Result<Vec<GameId>>;
}
