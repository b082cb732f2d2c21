//! Broadcast notifier implementation.

use tokio::sync::broadcast;

use super::GameEvent;

/// Cloneable sender side of the change notifications.
///
/// Publishing never blocks; events sent while nobody listens are dropped.
#[derive(Clone)]
pub struct GameNotifier {
    tx: broadcast::Sender<GameEvent>,
}

impl GameNotifier {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: GameEvent) {
        let game_id = event.game_id();
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for game {} event", game_id);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.tx.subscribe()
    }
}

impl Default for GameNotifier {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}
