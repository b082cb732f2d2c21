//! Change notifications fanned out to subscribers.

mod bus;
mod game_event;

pub use bus::GameNotifier;
pub use game_event::GameEvent;
