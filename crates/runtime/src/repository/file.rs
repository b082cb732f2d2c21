//! File-based [`GameRepository`] implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gambit_core::{GameId, GameState};
use tokio::fs;

use super::{GameRepository, RepositoryError, Result};

/// Stores each game as `game_{id}.bin` in bincode format.
///
/// Saves go through a temporary file and a rename, so a crash never leaves a
/// half-written record behind.
pub struct FileGameRepository {
    base_dir: PathBuf,
}

impl FileGameRepository {
    /// Creates the repository, making `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn game_path(&self, id: GameId) -> PathBuf {
        self.base_dir.join(format!("game_{}.bin", id.0))
    }

    fn parse_id(path: &Path) -> Option<GameId> {
        path.file_name()?
            .to_str()?
            .strip_prefix("game_")?
            .strip_suffix(".bin")?
            .parse()
            .ok()
            .map(GameId)
    }
}

#[async_trait]
impl GameRepository for FileGameRepository {
    async fn load(&self, id: GameId) -> Result<Option<GameState>> {
        let path = self.game_path(id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let state: GameState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if state.id != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds game {}",
                path.display(),
                state.id
            )));
        }

        tracing::debug!("Loaded game {} from {}", id, path.display());
        Ok(Some(state))
    }

    async fn save(&self, state: &GameState) -> Result<()> {
        let path = self.game_path(state.id);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved game {} to {}", state.id, path.display());
        Ok(())
    }

    async fn exists(&self, id: GameId) -> Result<bool> {
        Ok(fs::try_exists(self.game_path(id)).await?)
    }

    async fn list(&self) -> Result<Vec<GameId>> {
        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Some(id) = Self::parse_id(&entry.path()) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
