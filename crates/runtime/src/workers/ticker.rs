//! Periodic time-control checks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use super::{Command, WorkerRegistry};

/// Sends a time-control check to every live game on each tick.
///
/// Keeps clocks honest when nobody acts; a flag that falls between ticks is
/// still dated at the instant it reached zero.
pub struct Ticker {
    registry: Arc<WorkerRegistry>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl Ticker {
    pub fn new(
        registry: Arc<WorkerRegistry>,
        interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            registry,
            interval,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => self.tick().await,
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        debug!(target: "runtime::ticker", "ticker stopped");
    }

    async fn tick(&self) {
        for (game_id, tx) in self.registry.live().await {
            // A full queue means the worker is busy and will check the clock anyway.
            if tx.try_send(Command::Tick { reply: None }).is_err() {
                trace!(target: "runtime::ticker", game = %game_id, "tick skipped");
            }
        }
    }
}
