//! Live worker bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

use gambit_core::GameId;

use super::{Command, GameWorker};
use crate::api::{Clock, Result, RuntimeError};
use crate::events::GameNotifier;
use crate::repository::GameRepository;

struct WorkerEntry {
    tx: mpsc::Sender<Command>,
    join: JoinHandle<()>,
}

/// Spawns game workers on demand and remembers the live ones.
pub struct WorkerRegistry {
    workers: Mutex<HashMap<GameId, WorkerEntry>>,
    repository: Arc<dyn GameRepository>,
    notifier: GameNotifier,
    clock: Arc<dyn Clock>,
    command_buffer_size: usize,
}

impl WorkerRegistry {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        notifier: GameNotifier,
        clock: Arc<dyn Clock>,
        command_buffer_size: usize,
    ) -> Self {
        Self {
            workers: Mutex::new(HashMap::new()),
            repository,
            notifier,
            clock,
            command_buffer_size,
        }
    }

    /// Command sender for `game_id`, spawning a worker when none is running.
    ///
    /// Fails with [`RuntimeError::NotFound`] when the store has no such game.
    pub async fn sender(&self, game_id: GameId) -> Result<mpsc::Sender<Command>> {
        let mut workers = self.workers.lock().await;
        if let Some(entry) = workers.get(&game_id)
            && !entry.tx.is_closed()
        {
            return Ok(entry.tx.clone());
        }

        if !self.repository.exists(game_id).await? {
            return Err(RuntimeError::NotFound(game_id));
        }

        let (tx, rx) = mpsc::channel(self.command_buffer_size);
        let worker = GameWorker::new(
            game_id,
            Arc::clone(&self.repository),
            self.notifier.clone(),
            Arc::clone(&self.clock),
            rx,
        );
        let join = tokio::spawn(worker.run());
        debug!(target: "runtime::registry", game = %game_id, "spawned game worker");

        // A closed worker may still be answering its queue; let it finish detached.
        workers.insert(
            game_id,
            WorkerEntry {
                tx: tx.clone(),
                join,
            },
        );
        Ok(tx)
    }

    /// Senders of every worker still running; finished ones are dropped.
    pub async fn live(&self) -> Vec<(GameId, mpsc::Sender<Command>)> {
        let mut workers = self.workers.lock().await;
        workers.retain(|_, entry| !entry.tx.is_closed());
        workers
            .iter()
            .map(|(&id, entry)| (id, entry.tx.clone()))
            .collect()
    }

    /// Closes every command channel and waits for the workers to drain.
    pub async fn shutdown(&self) -> Result<()> {
        let drained: Vec<_> = self.workers.lock().await.drain().collect();
        for (_, entry) in drained {
            drop(entry.tx);
            entry.join.await.map_err(RuntimeError::WorkerJoin)?;
        }
        Ok(())
    }
}
