//! Worker that owns one game id.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), loads the
//! record, executes the action via [`GameEngine`], saves, and notifies.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use gambit_core::{
    Action, CheckTimeControlAction, ExecutionOutcome, GameEngine, GameId, GameState,
    SystemActionKind, Timestamp,
};

use crate::api::{Clock, Result, RuntimeError};
use crate::events::{GameEvent, GameNotifier};
use crate::repository::GameRepository;

/// Commands that can be sent to a game worker.
pub enum Command {
    /// Executes an action at the worker's current time.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Runs the time-control check; the reply is optional for fire-and-forget ticks.
    Tick {
        reply: Option<oneshot::Sender<Result<ExecutionOutcome>>>,
    },
}

/// Background task that processes commands for a single game.
///
/// The worker stops once its game is over; finished records stay in the
/// repository and a fresh worker is spawned if anyone asks again.
pub struct GameWorker {
    game_id: GameId,
    repository: Arc<dyn GameRepository>,
    notifier: GameNotifier,
    clock: Arc<dyn Clock>,
    command_rx: mpsc::Receiver<Command>,
    finished: bool,
}

impl GameWorker {
    pub fn new(
        game_id: GameId,
        repository: Arc<dyn GameRepository>,
        notifier: GameNotifier,
        clock: Arc<dyn Clock>,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            game_id,
            repository,
            notifier,
            clock,
            command_rx,
            finished: false,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        debug!(target: "runtime::worker", game = %self.game_id, "worker started");
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                    if self.finished {
                        break;
                    }
                }
                else => break,
            }
        }

        // Answer whatever was queued before the game ended.
        self.command_rx.close();
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!(target: "runtime::worker", game = %self.game_id, "worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        let (result, reply) = match cmd {
            Command::Execute { action, reply } => (self.handle_action(action).await, Some(reply)),
            Command::Tick { reply } => (self.handle_tick().await, reply),
        };

        if let Some(reply) = reply
            && reply.send(result).is_err()
        {
            debug!(target: "runtime::worker", game = %self.game_id, "reply channel closed (caller dropped)");
        }
    }

    async fn load(&mut self) -> Result<GameState> {
        let state = self
            .repository
            .load(self.game_id)
            .await?
            .ok_or(RuntimeError::NotFound(self.game_id));
        match state {
            Ok(state) => {
                self.finished = !state.is_active;
                Ok(state)
            }
            Err(err) => {
                self.finished = true;
                Err(err)
            }
        }
    }

    /// Runs the time-control check first so a flag that already fell wins
    /// over the incoming action.
    async fn handle_action(&mut self, action: Action) -> Result<ExecutionOutcome> {
        let now = self.clock.now();
        let mut state = self.load().await?;

        if let Some(outcome) = self.check_time(&mut state, now) {
            self.commit(&state, &time_check(), &outcome).await?;
        }

        match GameEngine::new(&mut state).execute(&action, now) {
            Ok(outcome) => {
                debug!(
                    target: "runtime::worker",
                    game = %self.game_id,
                    action = action.name(),
                    actor = ?action.actor(),
                    result = ?outcome.action_result,
                    "action applied"
                );
                // System transitions that decided nothing leave the record as it was.
                if action.actor().is_some() || outcome.ended_game() {
                    self.commit(&state, &action, &outcome).await?;
                }
                Ok(outcome)
            }
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    game = %self.game_id,
                    action = action.name(),
                    actor = ?action.actor(),
                    phase = error.phase().as_str(),
                    code = gambit_core::GameError::error_code(&error),
                    "action rejected: {error}"
                );
                Err(RuntimeError::Rejected(error))
            }
        }
    }

    async fn handle_tick(&mut self) -> Result<ExecutionOutcome> {
        let now = self.clock.now();
        let mut state = self.load().await?;
        let action = time_check();
        let outcome = GameEngine::new(&mut state)
            .execute(&action, now)
            .map_err(RuntimeError::Rejected)?;
        if outcome.ended_game() {
            self.commit(&state, &action, &outcome).await?;
        }
        Ok(outcome)
    }

    fn check_time(&self, state: &mut GameState, now: Timestamp) -> Option<ExecutionOutcome> {
        GameEngine::new(state)
            .execute(&time_check(), now)
            .ok()
            .filter(ExecutionOutcome::ended_game)
    }

    /// Saves `state` and tells subscribers what happened.
    async fn commit(
        &mut self,
        state: &GameState,
        action: &Action,
        outcome: &ExecutionOutcome,
    ) -> Result<()> {
        self.repository.save(state).await?;

        self.notifier.publish(GameEvent::Changed {
            game_id: self.game_id,
            action: action.clone(),
            result: outcome.action_result,
            state: Box::new(state.clone()),
        });

        if let Some(verdict) = outcome.verdict {
            self.finished = true;
            info!(
                target: "runtime::worker",
                game = %self.game_id,
                winner = ?verdict.winner,
                reason = %verdict.reason,
                "game over"
            );
            self.notifier.publish(GameEvent::Ended {
                game_id: self.game_id,
                verdict,
            });
        }
        Ok(())
    }
}

fn time_check() -> Action {
    Action::system(SystemActionKind::CheckTimeControl(CheckTimeControlAction))
}
