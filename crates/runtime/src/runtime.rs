//! High-level runtime orchestrator.
//!
//! The runtime owns the worker registry and the time-control ticker, wires
//! up the store and the notifier, and exposes a builder-based API.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use gambit_core::GameMode;

use crate::api::{Clock, Result, RuntimeError, RuntimeHandle, SystemClock};
use crate::events::{GameEvent, GameNotifier};
use crate::repository::{FileGameRepository, GameRepository, InMemoryGameRepository};
use crate::workers::{Ticker, WorkerRegistry};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// How often live games get a time-control check. Zero disables the ticker.
    pub tick_interval: Duration,
    /// Mode used by [`RuntimeHandle::create_default_game`].
    pub game_mode: GameMode,
    /// Directory for the file store; `None` keeps games in memory.
    pub data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 32,
            event_buffer_size: 100,
            tick_interval: Duration::from_millis(500),
            game_mode: GameMode::default(),
            data_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAMBIT_COMMAND_BUFFER` - Per-game command queue size (default: 32)
    /// - `GAMBIT_EVENT_BUFFER` - Notification channel capacity (default: 100)
    /// - `GAMBIT_TICK_INTERVAL_MS` - Time-control tick period, 0 disables (default: 500)
    /// - `GAMBIT_GAME_MODE` - `ranked` or `quickplay` (default: quickplay)
    /// - `GAMBIT_DATA_DIR` - Directory for the file store (default: in-memory store)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("GAMBIT_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("GAMBIT_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(millis) = read_env::<u64>("GAMBIT_TICK_INTERVAL_MS") {
            config.tick_interval = Duration::from_millis(millis);
        }
        if let Some(mode) = read_env::<GameMode>("GAMBIT_GAME_MODE") {
            config.game_mode = mode;
        }
        config.data_dir = env::var("GAMBIT_DATA_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Platform-specific data directory for the file store.
///
/// - macOS: `~/Library/Application Support/gambit`
/// - Linux: `~/.local/share/gambit` (or `$XDG_DATA_HOME/gambit`)
/// - Windows: `%APPDATA%\gambit`
/// - Fallback: `./gambit_data`
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "gambit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./gambit_data"))
}

/// Main runtime that hosts the per-game workers.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    registry: Arc<WorkerRegistry>,
    ticker: Option<(watch::Sender<bool>, JoinHandle<()>)>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe()
    }

    /// Stops the ticker, then lets every worker finish its queue.
    pub async fn shutdown(self) -> Result<()> {
        if let Some((stop, join)) = self.ticker {
            // The ticker may already be gone; joining below reports that.
            let _ = stop.send(true);
            join.await.map_err(RuntimeError::WorkerJoin)?;
        }
        self.registry.shutdown().await?;
        info!(target: "runtime", "runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn GameRepository>>,
    clock: Option<Arc<dyn Clock>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific game store instead of the one implied by the config.
    pub fn repository(mut self, repository: Arc<dyn GameRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Use a specific time source (tests pass a [`ManualClock`](crate::ManualClock)).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let repository: Arc<dyn GameRepository> = match (self.repository, &self.config.data_dir) {
            (Some(repository), _) => repository,
            (None, Some(dir)) => Arc::new(FileGameRepository::new(dir)?),
            (None, None) => Arc::new(InMemoryGameRepository::new()),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let notifier = GameNotifier::with_capacity(self.config.event_buffer_size);

        let first_id = repository
            .list()
            .await?
            .last()
            .map_or(1, |last| last.0 + 1);

        let registry = Arc::new(WorkerRegistry::new(
            Arc::clone(&repository),
            notifier.clone(),
            Arc::clone(&clock),
            self.config.command_buffer_size,
        ));

        let ticker = if self.config.tick_interval.is_zero() {
            None
        } else {
            let (stop_tx, stop_rx) = watch::channel(false);
            let ticker = Ticker::new(Arc::clone(&registry), self.config.tick_interval, stop_rx);
            Some((stop_tx, tokio::spawn(ticker.run())))
        };

        debug!(
            target: "runtime",
            first_id,
            tick_ms = self.config.tick_interval.as_millis() as u64,
            mode = %self.config.game_mode,
            "runtime started"
        );

        let handle = RuntimeHandle::new(
            Arc::clone(&registry),
            repository,
            notifier,
            clock,
            first_id,
            self.config.game_mode,
        );

        Ok(Runtime {
            handle,
            registry,
            ticker,
        })
    }
}
