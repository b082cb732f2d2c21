use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use gambit_core::{GameId, GameState};

use super::{GameRepository, RepositoryError, Result};

/// In-memory implementation of [`GameRepository`].
#[derive(Default)]
pub struct InMemoryGameRepository {
    games: RwLock<BTreeMap<GameId, GameState>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn load(&self, id: GameId) -> Result<Option<GameState>> {
        let games = self.games.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(games.get(&id).cloned())
    }

    async fn save(&self, state: &GameState) -> Result<()> {
        let mut games = self
            .games
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        games.insert(state.id, state.clone());
        Ok(())
    }

    async fn exists(&self, id: GameId) -> Result<bool> {
        let games = self.games.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(games.contains_key(&id))
    }

    async fn list(&self) -> Result<Vec<GameId>> {
        let games = self.games.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(games.keys().copied().collect())
    }
}
