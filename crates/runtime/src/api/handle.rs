//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing: every mutating call is routed to
//! the worker that owns the game id, while reads go straight to the store.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::info;

use gambit_core::{
    Action, BombAction, ChallengeAction, Color, Declaration, DisconnectAction, DrawAction,
    DrawResponse, ExecutionOutcome, GameConfig, GameId, GameMode, GameState, Identity,
    MoveAction, OnDeckAction, PassAction, Placement, PlayerAction, ReadyAction, ResignAction,
    Responses, SetupAction, SpectatorSnapshot, Square, SystemActionKind, Viewer,
    available_responses, mask, spectator_snapshot,
};

use super::clock::Clock;
use super::errors::{Result, RuntimeError};
use crate::events::{GameEvent, GameNotifier};
use crate::repository::GameRepository;
use crate::workers::{Command, WorkerRegistry};

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    registry: Arc<WorkerRegistry>,
    repository: Arc<dyn GameRepository>,
    notifier: GameNotifier,
    clock: Arc<dyn Clock>,
    next_id: Arc<AtomicU64>,
    default_mode: GameMode,
}

impl RuntimeHandle {
    pub(crate) fn new(
        registry: Arc<WorkerRegistry>,
        repository: Arc<dyn GameRepository>,
        notifier: GameNotifier,
        clock: Arc<dyn Clock>,
        first_id: u64,
        default_mode: GameMode,
    ) -> Self {
        Self {
            registry,
            repository,
            notifier,
            clock,
            next_id: Arc::new(AtomicU64::new(first_id)),
            default_mode,
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Creates a game with the preset time control of `mode`.
    pub async fn create_game(&self, mode: GameMode) -> Result<GameId> {
        self.create_game_with(GameConfig::for_mode(mode)).await
    }

    /// Creates a game using the runtime's default mode.
    pub async fn create_default_game(&self) -> Result<GameId> {
        self.create_game(self.default_mode).await
    }

    pub async fn create_game_with(&self, config: GameConfig) -> Result<GameId> {
        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let state = GameState::new(id, config, self.clock.now());
        self.repository.save(&state).await?;

        info!(
            target: "runtime::handle",
            game = %id,
            base_ms = config.time_control.base_ms,
            increment_ms = config.time_control.increment_ms,
            "game created"
        );
        self.notifier.publish(GameEvent::Created { game_id: id });
        Ok(id)
    }

    /// Ids of every stored game, finished ones included.
    pub async fn games(&self) -> Result<Vec<GameId>> {
        Ok(self.repository.list().await?)
    }

    // ------------------------------------------------------------------------
    // Player operations
    // ------------------------------------------------------------------------

    pub async fn ready(&self, game_id: GameId, color: Color) -> Result<ExecutionOutcome> {
        self.execute(game_id, PlayerAction::Ready(ReadyAction::new(color)))
            .await
    }

    pub async fn setup(
        &self,
        game_id: GameId,
        color: Color,
        placements: Vec<Placement>,
        on_deck: Identity,
    ) -> Result<ExecutionOutcome> {
        let action = SetupAction::new(color, placements, on_deck);
        self.execute(game_id, PlayerAction::Setup(action)).await
    }

    pub async fn move_piece(
        &self,
        game_id: GameId,
        color: Color,
        from: Square,
        to: Square,
        declaration: Declaration,
    ) -> Result<ExecutionOutcome> {
        let action = MoveAction::new(color, from, to, declaration);
        self.execute(game_id, PlayerAction::Move(action)).await
    }

    pub async fn challenge(&self, game_id: GameId, color: Color) -> Result<ExecutionOutcome> {
        self.execute(game_id, PlayerAction::Challenge(ChallengeAction::new(color)))
            .await
    }

    pub async fn bomb(&self, game_id: GameId, color: Color) -> Result<ExecutionOutcome> {
        self.execute(game_id, PlayerAction::Bomb(BombAction::new(color)))
            .await
    }

    pub async fn on_deck(
        &self,
        game_id: GameId,
        color: Color,
        identity: Identity,
    ) -> Result<ExecutionOutcome> {
        self.execute(
            game_id,
            PlayerAction::OnDeck(OnDeckAction::new(color, identity)),
        )
        .await
    }

    pub async fn pass(&self, game_id: GameId, color: Color) -> Result<ExecutionOutcome> {
        self.execute(game_id, PlayerAction::Pass(PassAction::new(color)))
            .await
    }

    pub async fn resign(&self, game_id: GameId, color: Color) -> Result<ExecutionOutcome> {
        self.execute(game_id, PlayerAction::Resign(ResignAction::new(color)))
            .await
    }

    pub async fn draw(
        &self,
        game_id: GameId,
        color: Color,
        response: DrawResponse,
    ) -> Result<ExecutionOutcome> {
        self.execute(
            game_id,
            PlayerAction::Draw(DrawAction::new(color, response)),
        )
        .await
    }

    /// Routes any player action to the game's worker.
    pub async fn execute(&self, game_id: GameId, action: PlayerAction) -> Result<ExecutionOutcome> {
        self.dispatch(game_id, Action::player(action)).await
    }

    // ------------------------------------------------------------------------
    // System operations
    // ------------------------------------------------------------------------

    /// Ends the game on time if a running clock reached zero.
    pub async fn check_time_control(&self, game_id: GameId) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            game_id,
            Command::Tick {
                reply: Some(reply_tx),
            },
        )
        .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Awards the game to the opponent of `color`.
    pub async fn disconnect(&self, game_id: GameId, color: Color) -> Result<ExecutionOutcome> {
        let kind = SystemActionKind::Disconnect(DisconnectAction::new(color));
        self.dispatch(game_id, Action::system(kind)).await
    }

    async fn dispatch(&self, game_id: GameId, action: Action) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            game_id,
            Command::Execute {
                action,
                reply: reply_tx,
            },
        )
        .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    async fn send(&self, game_id: GameId, cmd: Command) -> Result<()> {
        let tx = self.registry.sender(game_id).await?;
        let Err(mpsc::error::SendError(cmd)) = tx.send(cmd).await else {
            return Ok(());
        };

        // The worker stopped between lookup and send; a fresh one takes over.
        self.registry
            .sender(game_id)
            .await?
            .send(cmd)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// The record as `viewer` is allowed to see it.
    pub async fn get_view(&self, game_id: GameId, viewer: Viewer) -> Result<GameState> {
        let state = self.load(game_id).await?;
        Ok(mask(&state, viewer))
    }

    /// Spectator read-out with the clock projected to now.
    pub async fn spectate(&self, game_id: GameId) -> Result<SpectatorSnapshot> {
        let state = self.load(game_id).await?;
        Ok(spectator_snapshot(&state, self.clock.now()))
    }

    /// Responses `color` may issue right now.
    pub async fn responses(&self, game_id: GameId, color: Color) -> Result<Responses> {
        let state = self.load(game_id).await?;
        Ok(available_responses(&state, color))
    }

    async fn load(&self, game_id: GameId) -> Result<GameState> {
        self.repository
            .load(game_id)
            .await?
            .ok_or(RuntimeError::NotFound(game_id))
    }

    /// Subscribes to change notifications for every game.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.notifier.subscribe()
    }
}

