//! JSON replay scripts.
//!
//! A script names the time control and lists operations in order. Each step
//! may advance the replay clock first, so time-control scenarios replay the
//! same way every time.
//!
//! ```json
//! {
//!   "mode": "ranked",
//!   "steps": [
//!     { "op": "ready", "color": "white" },
//!     { "op": "move", "advance_ms": 2000, "color": "white",
//!       "from": { "row": 0, "col": 0 }, "to": { "row": 2, "col": 0 },
//!       "declaration": "rook" }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use gambit_core::{
    Color, Declaration, DrawResponse, ExecutionOutcome, GameError, GameId, GameMode, Identity,
    Placement, Square,
};
use gambit_runtime::{ManualClock, RuntimeError, RuntimeHandle};

#[derive(Clone, Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub mode: GameMode,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse replay script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::from_json(&json)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Step {
    /// Milliseconds the replay clock moves forward before this step.
    #[serde(default)]
    pub advance_ms: u64,
    #[serde(flatten)]
    pub op: Op,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Ready {
        color: Color,
    },
    Setup {
        color: Color,
        placements: Vec<Placement>,
        on_deck: Identity,
    },
    Move {
        color: Color,
        from: Square,
        to: Square,
        declaration: Declaration,
    },
    Challenge {
        color: Color,
    },
    Bomb {
        color: Color,
    },
    Pass {
        color: Color,
    },
    OnDeck {
        color: Color,
        identity: Identity,
    },
    Resign {
        color: Color,
    },
    Draw {
        color: Color,
        response: DrawResponse,
    },
    Disconnect {
        color: Color,
    },
    CheckTimeControl,
}

impl Op {
    pub fn name(&self) -> &'static str {
        match self {
            Op::Ready { .. } => "ready",
            Op::Setup { .. } => "setup",
            Op::Move { .. } => "move",
            Op::Challenge { .. } => "challenge",
            Op::Bomb { .. } => "bomb",
            Op::Pass { .. } => "pass",
            Op::OnDeck { .. } => "on_deck",
            Op::Resign { .. } => "resign",
            Op::Draw { .. } => "draw",
            Op::Disconnect { .. } => "disconnect",
            Op::CheckTimeControl => "check_time_control",
        }
    }

    async fn apply(
        &self,
        handle: &RuntimeHandle,
        id: GameId,
    ) -> gambit_runtime::Result<ExecutionOutcome> {
        match self.clone() {
            Op::Ready { color } => handle.ready(id, color).await,
            Op::Setup {
                color,
                placements,
                on_deck,
            } => handle.setup(id, color, placements, on_deck).await,
            Op::Move {
                color,
                from,
                to,
                declaration,
            } => handle.move_piece(id, color, from, to, declaration).await,
            Op::Challenge { color } => handle.challenge(id, color).await,
            Op::Bomb { color } => handle.bomb(id, color).await,
            Op::Pass { color } => handle.pass(id, color).await,
            Op::OnDeck { color, identity } => handle.on_deck(id, color, identity).await,
            Op::Resign { color } => handle.resign(id, color).await,
            Op::Draw { color, response } => handle.draw(id, color, response).await,
            Op::Disconnect { color } => handle.disconnect(id, color).await,
            Op::CheckTimeControl => handle.check_time_control(id).await,
        }
    }
}

/// Why the engine refused a step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub code: &'static str,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct StepReport {
    pub index: usize,
    pub op: &'static str,
    pub outcome: Result<ExecutionOutcome, Rejection>,
}

#[derive(Clone, Debug)]
pub struct Replay {
    pub game_id: GameId,
    pub steps: Vec<StepReport>,
}

impl Replay {
    pub fn rejected(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|step| step.outcome.is_err())
    }
}

/// Plays `script` as a fresh game.
///
/// Engine rejections are recorded and the replay moves on; with `strict` the
/// first one stops it. Infrastructure failures always abort.
pub async fn run(
    handle: &RuntimeHandle,
    clock: &ManualClock,
    script: &Script,
    strict: bool,
) -> gambit_runtime::Result<Replay> {
    let game_id = handle.create_game(script.mode).await?;
    let mut steps = Vec::with_capacity(script.steps.len());

    for (index, step) in script.steps.iter().enumerate() {
        clock.advance(step.advance_ms);
        let outcome = match step.op.apply(handle, game_id).await {
            Ok(outcome) => Ok(outcome),
            Err(RuntimeError::Rejected(err)) => Err(Rejection {
                code: err.error_code(),
                message: err.to_string(),
            }),
            Err(err) => return Err(err),
        };

        let rejected = outcome.is_err();
        if let Err(rejection) = &outcome {
            tracing::warn!(
                step = index,
                op = step.op.name(),
                code = rejection.code,
                "step rejected"
            );
        }
        steps.push(StepReport {
            index,
            op: step.op.name(),
            outcome,
        });
        if rejected && strict {
            break;
        }
    }

    Ok(Replay { game_id, steps })
}
